//! Command Module
//!
//! Builders and decoders for the blocking sorted-set pop family and for
//! client identification.
//!
//! ## Commands
//! - BZMPOP:          pop up to N entries from the first non-empty key
//! - BZPOPMIN/MAX:    pop one entry from the first non-empty key
//! - CLIENT SETINFO:  attach library name/version to the connection
//!
//! Builders and decoders are stateless and hold no locks.

mod builder;
mod decoder;
mod types;

use bytes::Bytes;

pub use builder::{build_bzmpop, build_bzpop, build_client_setinfo};
pub use decoder::{decode, decode_batch_pop, decode_ok, decode_single_pop, Decoded};
pub use types::{
    BatchPopResult, Direction, LibAttribute, Order, PopResult, ScoredEntry, Timeout,
};

/// Ordered argument list of one command, name first
pub type Tokens = Vec<Bytes>;

/// Commands this crate builds; selects the reply decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    BzMPop,
    BzPopMin,
    BzPopMax,
    ClientSetInfo,
}

impl CommandKind {
    /// Single-entry pop command for a direction
    pub fn single_pop(direction: Direction) -> Self {
        match direction {
            Direction::Min => CommandKind::BzPopMin,
            Direction::Max => CommandKind::BzPopMax,
        }
    }

    /// Command name as sent on the wire
    pub fn name(self) -> &'static str {
        match self {
            CommandKind::BzMPop => "BZMPOP",
            CommandKind::BzPopMin => "BZPOPMIN",
            CommandKind::BzPopMax => "BZPOPMAX",
            CommandKind::ClientSetInfo => "CLIENT SETINFO",
        }
    }
}
