//! Reply definitions
//!
//! Represents raw replies received from the server.

use bytes::Bytes;

/// A single RESP2 reply value
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Null bulk (`$-1`) or null array (`*-1`): the absence marker
    Nil,

    /// `+OK` style status line
    Simple(String),

    /// `-ERR ...` error line
    Error(String),

    /// `:123`
    Integer(i64),

    /// `$n` binary-safe payload
    Bulk(Bytes),

    /// `*n` nested replies (`*0` is an empty array, not `Nil`)
    Array(Vec<Reply>),
}

impl Reply {
    /// True for the protocol's "no value" marker
    pub fn is_nil(&self) -> bool {
        matches!(self, Reply::Nil)
    }

    /// Short name of the reply shape, used in decode error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Reply::Nil => "nil",
            Reply::Simple(_) => "simple string",
            Reply::Error(_) => "error",
            Reply::Integer(_) => "integer",
            Reply::Bulk(_) => "bulk string",
            Reply::Array(_) => "array",
        }
    }

    /// Borrow the payload of a string-like reply
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Reply::Bulk(data) => Some(data),
            Reply::Simple(text) => Some(text.as_bytes()),
            _ => None,
        }
    }
}

impl std::fmt::Display for Reply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reply::Nil => write!(f, "(nil)"),
            Reply::Simple(text) => write!(f, "{}", text),
            Reply::Error(message) => write!(f, "(error) {}", message),
            Reply::Integer(value) => write!(f, "(integer) {}", value),
            Reply::Bulk(data) => write!(f, "\"{}\"", String::from_utf8_lossy(data)),
            Reply::Array(items) => {
                if items.is_empty() {
                    return write!(f, "(empty array)");
                }
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}) {}", idx + 1, item)?;
                }
                Ok(())
            }
        }
    }
}
