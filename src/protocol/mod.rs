//! Protocol Module
//!
//! RESP2 framing between the client and the server.
//!
//! ## Request Format
//! ```text
//! *3\r\n$8\r\nBZPOPMIN\r\n$3\r\nkey\r\n$1\r\n0\r\n
//! ```
//!
//! ## Replies
//! - Nil: the absence marker (`$-1` / `*-1`)
//! - Simple / Error / Integer / Bulk: scalars
//! - Array: nested replies, possibly empty

mod codec;
mod reply;

pub use codec::{
    decode_reply, encode_command, encode_reply, read_reply, write_command, MAX_ARRAY_LEN,
    MAX_BULK_LEN, MAX_DEPTH,
};
pub use reply::Reply;
