//! Codec Tests
//!
//! Tests for RESP2 command encoding and reply decoding.

use std::io::Cursor;

use bytes::Bytes;
use popwire::protocol::{
    decode_reply, encode_command, encode_reply, read_reply, write_command, Reply,
};
use popwire::PopError;

// =============================================================================
// Command Encoding Tests
// =============================================================================

#[test]
fn test_encode_command() {
    let encoded = encode_command(&["BZPOPMIN", "key", "0"]);
    assert_eq!(
        encoded,
        b"*3\r\n$8\r\nBZPOPMIN\r\n$3\r\nkey\r\n$1\r\n0\r\n".to_vec()
    );
}

#[test]
fn test_encode_binary_argument() {
    let arg: &[u8] = &[0x00, b'\r', b'\n', 0xFF];
    let encoded = encode_command(&[arg]);
    assert_eq!(encoded, b"*1\r\n$4\r\n\x00\r\n\xFF\r\n".to_vec());
}

#[test]
fn test_write_command_to_stream() {
    let mut out = Vec::new();
    write_command(&mut out, &[Bytes::from_static(b"PING")]).unwrap();
    assert_eq!(out, b"*1\r\n$4\r\nPING\r\n".to_vec());
}

#[test]
fn test_encoded_command_reads_back_as_array_of_bulks() {
    let encoded = encode_command(&["CLIENT", "SETINFO", "LIB-NAME", "x"]);
    let reply = decode_reply(&encoded).unwrap();
    assert_eq!(
        reply,
        Reply::Array(vec![
            Reply::Bulk(Bytes::from_static(b"CLIENT")),
            Reply::Bulk(Bytes::from_static(b"SETINFO")),
            Reply::Bulk(Bytes::from_static(b"LIB-NAME")),
            Reply::Bulk(Bytes::from_static(b"x")),
        ])
    );
}

// =============================================================================
// Reply Decoding Tests
// =============================================================================

#[test]
fn test_decode_scalars() {
    assert_eq!(decode_reply(b"+OK\r\n").unwrap(), Reply::Simple("OK".to_string()));
    assert_eq!(
        decode_reply(b"-ERR bad\r\n").unwrap(),
        Reply::Error("ERR bad".to_string())
    );
    assert_eq!(decode_reply(b":-12\r\n").unwrap(), Reply::Integer(-12));
    assert_eq!(
        decode_reply(b"$5\r\nhello\r\n").unwrap(),
        Reply::Bulk(Bytes::from_static(b"hello"))
    );
}

#[test]
fn test_null_bulk_and_null_array_are_nil() {
    assert_eq!(decode_reply(b"$-1\r\n").unwrap(), Reply::Nil);
    assert_eq!(decode_reply(b"*-1\r\n").unwrap(), Reply::Nil);
}

#[test]
fn test_empty_array_is_not_nil() {
    assert_eq!(decode_reply(b"*0\r\n").unwrap(), Reply::Array(vec![]));
}

#[test]
fn test_decode_bzmpop_reply() {
    let raw = b"*2\r\n$1\r\ns\r\n*2\r\n*2\r\n$1\r\na\r\n$3\r\n1.5\r\n*2\r\n$1\r\nc\r\n$3\r\n3.7\r\n";
    let reply = decode_reply(raw).unwrap();

    let expected = Reply::Array(vec![
        Reply::Bulk(Bytes::from_static(b"s")),
        Reply::Array(vec![
            Reply::Array(vec![
                Reply::Bulk(Bytes::from_static(b"a")),
                Reply::Bulk(Bytes::from_static(b"1.5")),
            ]),
            Reply::Array(vec![
                Reply::Bulk(Bytes::from_static(b"c")),
                Reply::Bulk(Bytes::from_static(b"3.7")),
            ]),
        ]),
    ]);
    assert_eq!(reply, expected);
}

#[test]
fn test_encode_reply_reads_back() {
    let reply = Reply::Array(vec![
        Reply::Bulk(Bytes::from_static(b"key")),
        Reply::Nil,
        Reply::Integer(7),
        Reply::Array(vec![]),
        Reply::Simple("OK".to_string()),
    ]);
    assert_eq!(decode_reply(&encode_reply(&reply)).unwrap(), reply);
}

#[test]
fn test_read_consecutive_replies() {
    let mut reader = Cursor::new(b"+OK\r\n:1\r\n$-1\r\n".to_vec());
    assert_eq!(read_reply(&mut reader).unwrap(), Reply::Simple("OK".to_string()));
    assert_eq!(read_reply(&mut reader).unwrap(), Reply::Integer(1));
    assert_eq!(read_reply(&mut reader).unwrap(), Reply::Nil);
}

// =============================================================================
// Error Tests
// =============================================================================

#[test]
fn test_truncated_reply_is_transport_error() {
    let mut reader = Cursor::new(b"*2\r\n$1\r\na\r\n".to_vec());
    match read_reply(&mut reader) {
        Err(PopError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::UnexpectedEof),
        other => panic!("Expected UnexpectedEof, got {:?}", other),
    }
}

#[test]
fn test_unknown_type_byte() {
    assert!(matches!(
        decode_reply(b"?what\r\n"),
        Err(PopError::ProtocolDecode(_))
    ));
}

#[test]
fn test_missing_crlf() {
    assert!(matches!(
        decode_reply(b"+OK\n"),
        Err(PopError::ProtocolDecode(_))
    ));
    assert!(matches!(
        decode_reply(b"$2\r\nokXX"),
        Err(PopError::ProtocolDecode(_))
    ));
}

#[test]
fn test_bad_length_header() {
    assert!(matches!(
        decode_reply(b"$abc\r\n"),
        Err(PopError::ProtocolDecode(_))
    ));
}

#[test]
fn test_oversized_bulk_rejected() {
    assert!(matches!(
        decode_reply(b"$999999999999\r\n"),
        Err(PopError::ProtocolDecode(_))
    ));
}

#[test]
fn test_large_declared_lengths_with_short_body() {
    // Headers near the limits must fail on the missing bytes
    let mut reader = Cursor::new(b"$536870000\r\nshort\r\n".to_vec());
    match read_reply(&mut reader) {
        Err(PopError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::UnexpectedEof),
        other => panic!("Expected UnexpectedEof, got {:?}", other),
    }

    let mut reader = Cursor::new(b"*1000000\r\n:1\r\n".to_vec());
    match read_reply(&mut reader) {
        Err(PopError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::UnexpectedEof),
        other => panic!("Expected UnexpectedEof, got {:?}", other),
    }
}

#[test]
fn test_bulk_split_across_reads() {
    let payload = vec![b'x'; 200_000];
    let mut raw = format!("${}\r\n", payload.len()).into_bytes();
    raw.extend_from_slice(&payload);
    raw.extend_from_slice(b"\r\n");

    let mut reader = std::io::BufReader::with_capacity(1024, Cursor::new(raw));
    assert_eq!(read_reply(&mut reader).unwrap(), Reply::Bulk(Bytes::from(payload)));
}

#[test]
fn test_trailing_data_rejected() {
    assert!(matches!(
        decode_reply(b"+OK\r\n+OK\r\n"),
        Err(PopError::ProtocolDecode(_))
    ));
}

#[test]
fn test_excessive_nesting_rejected() {
    let raw = "*1\r\n".repeat(64) + "+OK\r\n";
    assert!(matches!(
        decode_reply(raw.as_bytes()),
        Err(PopError::ProtocolDecode(_))
    ));
}
