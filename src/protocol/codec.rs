//! Protocol codec
//!
//! Encoding of commands and decoding of replies for RESP2.
//!
//! ## Wire Format
//!
//! ### Command Format
//! Every command is an array of bulk strings:
//! ```text
//! *<argc>\r\n
//! $<len>\r\n<arg bytes>\r\n     (repeated argc times)
//! ```
//!
//! ### Reply Format
//! ```text
//! +<status>\r\n          simple string
//! -<message>\r\n         error
//! :<integer>\r\n         integer
//! $<len>\r\n<bytes>\r\n  bulk string ($-1 = nil)
//! *<count>\r\n<items>    array (*-1 = nil)
//! ```

use std::io::{BufRead, Cursor, Read, Write};

use bytes::Bytes;

use super::Reply;
use crate::error::{PopError, Result};

/// Maximum bulk payload size (512 MB, the server's own limit)
pub const MAX_BULK_LEN: i64 = 512 * 1024 * 1024;

/// Maximum number of elements accepted in one array header
pub const MAX_ARRAY_LEN: i64 = 1024 * 1024;

/// Maximum nesting of arrays inside a single reply
pub const MAX_DEPTH: usize = 32;

/// Upper bound on memory reserved from a length header before any payload
/// has arrived; buffers grow past it only as bytes are actually read
const PREALLOC_LIMIT: usize = 64 * 1024;

// =============================================================================
// Command Encoding
// =============================================================================

/// Encode a command to bytes
///
/// Format: `*argc` header followed by one bulk string per argument
pub fn encode_command<A: AsRef<[u8]>>(args: &[A]) -> Vec<u8> {
    let payload: usize = args.iter().map(|a| a.as_ref().len() + 16).sum();
    let mut message = Vec::with_capacity(16 + payload);

    message.push(b'*');
    message.extend_from_slice(args.len().to_string().as_bytes());
    message.extend_from_slice(b"\r\n");

    for arg in args {
        let arg = arg.as_ref();
        message.push(b'$');
        message.extend_from_slice(arg.len().to_string().as_bytes());
        message.extend_from_slice(b"\r\n");
        message.extend_from_slice(arg);
        message.extend_from_slice(b"\r\n");
    }

    message
}

/// Write a command to a stream
pub fn write_command<W: Write, A: AsRef<[u8]>>(writer: &mut W, args: &[A]) -> Result<()> {
    let bytes = encode_command(args);
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

// =============================================================================
// Reply Encoding/Decoding
// =============================================================================

/// Encode a reply to bytes
///
/// Used by test servers and tooling; the client itself only reads replies.
pub fn encode_reply(reply: &Reply) -> Vec<u8> {
    let mut out = Vec::new();
    encode_reply_into(reply, &mut out);
    out
}

fn encode_reply_into(reply: &Reply, out: &mut Vec<u8>) {
    match reply {
        Reply::Nil => out.extend_from_slice(b"$-1\r\n"),
        Reply::Simple(text) => {
            out.push(b'+');
            out.extend_from_slice(text.as_bytes());
            out.extend_from_slice(b"\r\n");
        }
        Reply::Error(message) => {
            out.push(b'-');
            out.extend_from_slice(message.as_bytes());
            out.extend_from_slice(b"\r\n");
        }
        Reply::Integer(value) => {
            out.push(b':');
            out.extend_from_slice(value.to_string().as_bytes());
            out.extend_from_slice(b"\r\n");
        }
        Reply::Bulk(data) => {
            out.push(b'$');
            out.extend_from_slice(data.len().to_string().as_bytes());
            out.extend_from_slice(b"\r\n");
            out.extend_from_slice(data);
            out.extend_from_slice(b"\r\n");
        }
        Reply::Array(items) => {
            out.push(b'*');
            out.extend_from_slice(items.len().to_string().as_bytes());
            out.extend_from_slice(b"\r\n");
            for item in items {
                encode_reply_into(item, out);
            }
        }
    }
}

/// Decode a single reply that must occupy the whole buffer
pub fn decode_reply(bytes: &[u8]) -> Result<Reply> {
    let mut cursor = Cursor::new(bytes);
    let reply = read_reply(&mut cursor)?;

    let consumed = cursor.position() as usize;
    if consumed != bytes.len() {
        return Err(PopError::ProtocolDecode(format!(
            "Trailing data after reply: {} unread bytes",
            bytes.len() - consumed
        )));
    }

    Ok(reply)
}

/// Read one complete reply from a stream
///
/// Blocks until a complete reply is received or an error occurs
pub fn read_reply<R: BufRead>(reader: &mut R) -> Result<Reply> {
    let mut line = Vec::with_capacity(64);
    read_reply_at(reader, &mut line, 0)
}

fn read_reply_at<R: BufRead>(reader: &mut R, line: &mut Vec<u8>, depth: usize) -> Result<Reply> {
    if depth > MAX_DEPTH {
        return Err(PopError::ProtocolDecode(format!(
            "Reply nested deeper than {} levels",
            MAX_DEPTH
        )));
    }

    read_line(reader, line)?;
    let (tag, body) = match line.split_first() {
        Some((tag, body)) => (*tag, body),
        None => return Err(PopError::ProtocolDecode("Empty reply line".to_string())),
    };

    match tag {
        b'+' => Ok(Reply::Simple(String::from_utf8_lossy(body).into_owned())),
        b'-' => Ok(Reply::Error(String::from_utf8_lossy(body).into_owned())),
        b':' => Ok(Reply::Integer(parse_i64(body)?)),
        b'$' => {
            let len = parse_i64(body)?;
            read_bulk(reader, len)
        }
        b'*' => {
            let len = parse_i64(body)?;
            if len < 0 {
                return Ok(Reply::Nil);
            }
            if len > MAX_ARRAY_LEN {
                return Err(PopError::ProtocolDecode(format!(
                    "Array too large: {} elements (max {})",
                    len, MAX_ARRAY_LEN
                )));
            }
            let mut items = Vec::with_capacity((len as usize).min(PREALLOC_LIMIT));
            for _ in 0..len {
                items.push(read_reply_at(reader, line, depth + 1)?);
            }
            Ok(Reply::Array(items))
        }
        _ => Err(PopError::ProtocolDecode(format!(
            "Unknown reply type byte: 0x{:02x}",
            tag
        ))),
    }
}

fn read_bulk<R: BufRead>(reader: &mut R, len: i64) -> Result<Reply> {
    if len < 0 {
        return Ok(Reply::Nil);
    }
    if len > MAX_BULK_LEN {
        return Err(PopError::ProtocolDecode(format!(
            "Bulk string too large: {} bytes (max {})",
            len, MAX_BULK_LEN
        )));
    }

    let expected = len as usize + 2;
    let mut data = Vec::with_capacity(expected.min(PREALLOC_LIMIT));
    reader.by_ref().take(expected as u64).read_to_end(&mut data)?;
    if data.len() < expected {
        return Err(PopError::Io(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            format!("bulk string truncated: {} of {} bytes", data.len(), expected),
        )));
    }
    if !data.ends_with(b"\r\n") {
        return Err(PopError::ProtocolDecode(
            "Bulk string not terminated by CRLF".to_string(),
        ));
    }
    data.truncate(len as usize);

    Ok(Reply::Bulk(Bytes::from(data)))
}

fn read_line<R: BufRead>(reader: &mut R, line: &mut Vec<u8>) -> Result<()> {
    line.clear();
    let read = reader.read_until(b'\n', line)?;
    if read == 0 {
        return Err(PopError::Io(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "connection closed before reply",
        )));
    }
    if !line.ends_with(b"\r\n") {
        return Err(PopError::ProtocolDecode(
            "Reply line not terminated by CRLF".to_string(),
        ));
    }
    line.truncate(line.len() - 2);
    Ok(())
}

fn parse_i64(data: &[u8]) -> Result<i64> {
    std::str::from_utf8(data)
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or_else(|| {
            PopError::ProtocolDecode(format!(
                "Invalid integer in reply header: {:?}",
                String::from_utf8_lossy(data)
            ))
        })
}
