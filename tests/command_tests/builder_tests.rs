//! Builder Tests
//!
//! Tests for command token sequences and argument validation.

use std::time::Duration;

use bytes::Bytes;
use popwire::command::{
    build_bzmpop, build_bzpop, build_client_setinfo, Direction, LibAttribute, Order, Timeout,
};
use popwire::PopError;

// =============================================================================
// Helper Functions
// =============================================================================

fn strings(tokens: &[Bytes]) -> Vec<String> {
    tokens
        .iter()
        .map(|t| String::from_utf8_lossy(t).into_owned())
        .collect()
}

fn assert_invalid<T: std::fmt::Debug>(result: popwire::Result<T>) {
    match result {
        Err(PopError::InvalidArgument(_)) => {}
        other => panic!("Expected InvalidArgument, got {:?}", other),
    }
}

// =============================================================================
// BZMPOP Tests
// =============================================================================

#[test]
fn test_bzmpop_token_order() {
    let tokens = build_bzmpop(Timeout::from(1.5), &["a", "b"], Direction::Min, None).unwrap();
    assert_eq!(strings(&tokens), ["BZMPOP", "1.5", "2", "a", "b", "MIN"]);
}

#[test]
fn test_bzmpop_with_count() {
    let tokens = build_bzmpop(Timeout::from(0u64), &["queue"], Direction::Max, Some(10)).unwrap();
    assert_eq!(
        strings(&tokens),
        ["BZMPOP", "0", "1", "queue", "MAX", "COUNT", "10"]
    );
}

#[test]
fn test_bzmpop_prefix_is_name_timeout_numkeys() {
    let key_sets: [&[&str]; 4] = [&["k"], &["k1", "k2"], &["x", "y", "z"], &["s"; 7]];
    let timeouts = [0.0, 0.25, 3.0, 120.5];

    for keys in key_sets {
        for timeout in timeouts {
            for direction in [Direction::Min, Direction::Max] {
                let tokens = build_bzmpop(timeout.into(), keys, direction, Some(2)).unwrap();
                let tokens = strings(&tokens);
                assert_eq!(tokens[0], "BZMPOP");
                assert_eq!(tokens[1], Timeout::from(timeout).to_string());
                assert_eq!(tokens[2], keys.len().to_string());
                assert_eq!(&tokens[3..3 + keys.len()], keys);
            }
        }
    }
}

#[test]
fn test_bzmpop_empty_keys_rejected() {
    let no_keys: [&str; 0] = [];
    for direction in [Direction::Min, Direction::Max] {
        for count in [None, Some(1), Some(50)] {
            for timeout in [0.0, 1.0, 0.5] {
                assert_invalid(build_bzmpop(timeout.into(), &no_keys, direction, count));
            }
        }
    }
}

#[test]
fn test_bzmpop_zero_count_rejected() {
    assert_invalid(build_bzmpop(Timeout::from(1u64), &["k"], Direction::Min, Some(0)));
}

#[test]
fn test_bzmpop_binary_keys() {
    let key: &[u8] = &[0x00, 0xFF, b'\r', b'\n'];
    let tokens = build_bzmpop(Timeout::INFINITE, &[key], Direction::Min, None).unwrap();
    assert_eq!(&tokens[3][..], key);
}

// =============================================================================
// BZPOPMIN / BZPOPMAX Tests
// =============================================================================

#[test]
fn test_bzpopmin_token_order() {
    let tokens = build_bzpop(&["a", "b", "c"], Timeout::from(2u64), Direction::Min).unwrap();
    assert_eq!(strings(&tokens), ["BZPOPMIN", "a", "b", "c", "2"]);
}

#[test]
fn test_bzpopmax_token_order() {
    let tokens = build_bzpop(&["only"], Timeout::from(0.5), Direction::Max).unwrap();
    assert_eq!(strings(&tokens), ["BZPOPMAX", "only", "0.5"]);
}

#[test]
fn test_bzpop_empty_keys_rejected() {
    let no_keys: Vec<String> = Vec::new();
    assert_invalid(build_bzpop(&no_keys, Timeout::from(1u64), Direction::Min));
    assert_invalid(build_bzpop(&no_keys, Timeout::from(1u64), Direction::Max));
}

// =============================================================================
// Timeout Formatting Tests
// =============================================================================

#[test]
fn test_integer_and_float_timeouts_match() {
    let from_int = build_bzpop(&["k"], Timeout::from(5u64), Direction::Min).unwrap();
    let from_float = build_bzpop(&["k"], Timeout::from(5.0), Direction::Min).unwrap();
    assert_eq!(from_int, from_float);
    assert_eq!(strings(&from_int)[2], "5");
}

#[test]
fn test_timeout_never_exponential() {
    assert_eq!(Timeout::from(0.0000001).to_string(), "0.0000001");
    assert_eq!(Timeout::from(1e10).to_string(), "10000000000");
    assert_eq!(Timeout::from(0.1).to_string(), "0.1");
}

#[test]
fn test_timeout_negative_zero_renders_as_zero() {
    assert_eq!(Timeout::from(-0.0).to_string(), "0");
}

#[test]
fn test_timeout_from_duration() {
    assert_eq!(Timeout::from(Duration::from_millis(500)).to_string(), "0.5");
    assert_eq!(Timeout::from(Duration::from_secs(3)).to_string(), "3");
}

#[test]
fn test_invalid_timeouts_rejected() {
    for bad in [-1.0, f64::NAN, f64::INFINITY] {
        assert_invalid(build_bzmpop(bad.into(), &["k"], Direction::Min, None));
        assert_invalid(build_bzpop(&["k"], bad.into(), Direction::Max));
    }
}

// =============================================================================
// CLIENT SETINFO Tests
// =============================================================================

#[test]
fn test_setinfo_lib_name() {
    let tokens = build_client_setinfo(LibAttribute::Name, "mylib");
    assert_eq!(strings(&tokens), ["CLIENT", "SETINFO", "LIB-NAME", "mylib"]);
}

#[test]
fn test_setinfo_lib_version() {
    let tokens = build_client_setinfo(LibAttribute::Version, "1.2.3");
    assert_eq!(strings(&tokens), ["CLIENT", "SETINFO", "LIB-VER", "1.2.3"]);
}

#[test]
fn test_setinfo_value_passed_through() {
    let tokens = build_client_setinfo(LibAttribute::Name, "has space");
    assert_eq!(strings(&tokens)[3], "has space");
}

// =============================================================================
// Direction Tests
// =============================================================================

#[test]
fn test_direction_order_round_trip() {
    for direction in [Direction::Min, Direction::Max] {
        assert_eq!(Direction::from(Order::from(direction)), direction);
    }
    for order in [Order::Ascending, Order::Descending] {
        assert_eq!(Order::from(Direction::from(order)), order);
    }
    assert_eq!(Direction::from(Order::Ascending), Direction::Min);
    assert_eq!(Direction::from(Order::Descending), Direction::Max);
}
