//! Reply decoders
//!
//! Pure mappings from a raw [`Reply`] to typed, nullable results. Which
//! decoder applies is decided by the command that was sent, never by
//! inspecting the reply.
//!
//! ## Accepted Shapes
//! ```text
//! BZMPOP         nil | [key, [[member, score], ...]]
//! BZPOPMIN/MAX   nil | [key, member, score]
//! CLIENT SETINFO +OK (true) | anything else (false)
//! ```
//!
//! An error reply from the server becomes `PopError::Server` in every
//! decoder.

use bytes::Bytes;

use super::types::{BatchPopResult, PopResult, ScoredEntry};
use super::CommandKind;
use crate::error::{PopError, Result};
use crate::protocol::Reply;

/// A decoded reply, tagged by the shape of the command that produced it
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    Batch(Option<BatchPopResult>),
    Single(Option<PopResult>),
    Ack(bool),
}

/// Decode `reply` with the decoder registered for `kind`
pub fn decode(kind: CommandKind, reply: &Reply) -> Result<Decoded> {
    match kind {
        CommandKind::BzMPop => decode_batch_pop(reply).map(Decoded::Batch),
        CommandKind::BzPopMin | CommandKind::BzPopMax => {
            decode_single_pop(reply).map(Decoded::Single)
        }
        CommandKind::ClientSetInfo => decode_ok(reply).map(Decoded::Ack),
    }
}

// =============================================================================
// BZMPOP
// =============================================================================

/// Decode a BZMPOP reply
///
/// An empty entry list inside a non-nil reply is kept as an empty result.
pub fn decode_batch_pop(reply: &Reply) -> Result<Option<BatchPopResult>> {
    let items = match reply {
        Reply::Nil => return Ok(None),
        Reply::Error(message) => return Err(PopError::Server(message.clone())),
        Reply::Array(items) => items,
        other => return Err(shape_error("BZMPOP", "array", other)),
    };

    let (key, entries) = match items.as_slice() {
        [key, entries] => (key, entries),
        _ => return Err(arity_error("BZMPOP", 2, items.len())),
    };

    let key = bytes_of("BZMPOP key", key)?;
    let entries = match entries {
        Reply::Array(entries) => entries,
        other => return Err(shape_error("BZMPOP entries", "array", other)),
    };

    let entries = entries
        .iter()
        .map(decode_pair)
        .collect::<Result<Vec<_>>>()?;

    Ok(Some(BatchPopResult { key, entries }))
}

fn decode_pair(reply: &Reply) -> Result<ScoredEntry> {
    match reply {
        Reply::Array(pair) => match pair.as_slice() {
            [member, score] => Ok(ScoredEntry {
                member: bytes_of("BZMPOP member", member)?,
                score: score_of(score)?,
            }),
            _ => Err(arity_error("BZMPOP entry", 2, pair.len())),
        },
        other => Err(shape_error("BZMPOP entry", "array", other)),
    }
}

// =============================================================================
// BZPOPMIN / BZPOPMAX
// =============================================================================

/// Decode a BZPOPMIN / BZPOPMAX reply
///
/// The member and score are siblings of the key, not a nested pair.
pub fn decode_single_pop(reply: &Reply) -> Result<Option<PopResult>> {
    let items = match reply {
        Reply::Nil => return Ok(None),
        Reply::Error(message) => return Err(PopError::Server(message.clone())),
        Reply::Array(items) => items,
        other => return Err(shape_error("BZPOP", "array", other)),
    };

    match items.as_slice() {
        [key, member, score] => Ok(Some(PopResult {
            key: bytes_of("BZPOP key", key)?,
            entry: ScoredEntry {
                member: bytes_of("BZPOP member", member)?,
                score: score_of(score)?,
            },
        })),
        _ => Err(arity_error("BZPOP", 3, items.len())),
    }
}

// =============================================================================
// Acknowledgements
// =============================================================================

/// `+OK` decodes to true; any other non-error reply decodes to false
pub fn decode_ok(reply: &Reply) -> Result<bool> {
    match reply {
        Reply::Simple(text) => Ok(text == "OK"),
        Reply::Error(message) => Err(PopError::Server(message.clone())),
        _ => Ok(false),
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn bytes_of(what: &str, reply: &Reply) -> Result<Bytes> {
    match reply {
        Reply::Bulk(data) => Ok(data.clone()),
        Reply::Simple(text) => Ok(Bytes::copy_from_slice(text.as_bytes())),
        other => Err(shape_error(what, "string", other)),
    }
}

fn score_of(reply: &Reply) -> Result<f64> {
    match reply {
        Reply::Integer(value) => Ok(*value as f64),
        Reply::Bulk(_) | Reply::Simple(_) => {
            let raw = reply.as_bytes().unwrap_or_default();
            std::str::from_utf8(raw)
                .ok()
                .and_then(|s| s.trim().parse::<f64>().ok())
                .filter(|score| !score.is_nan())
                .ok_or_else(|| {
                    PopError::ProtocolDecode(format!(
                        "Score is not a number: {:?}",
                        String::from_utf8_lossy(raw)
                    ))
                })
        }
        other => Err(shape_error("score", "number", other)),
    }
}

fn shape_error(what: &str, expected: &str, got: &Reply) -> PopError {
    PopError::ProtocolDecode(format!(
        "{}: expected {}, got {}",
        what,
        expected,
        got.kind_name()
    ))
}

fn arity_error(what: &str, expected: usize, got: usize) -> PopError {
    PopError::ProtocolDecode(format!(
        "{}: expected {} elements, got {}",
        what, expected, got
    ))
}
