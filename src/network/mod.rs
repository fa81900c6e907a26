//! Network Module
//!
//! The execution primitive consumed by the client and a TCP implementation
//! of it.
//!
//! ## Architecture
//! - `Executor`: one command in, one reply out
//! - `TcpConnection`: blocking socket, RESP2 framing, cached server version

mod connection;
mod executor;

pub use connection::TcpConnection;
pub use executor::{Executor, ServerVersion};
