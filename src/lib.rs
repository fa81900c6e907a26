//! # popwire
//!
//! Command construction and reply interpretation for blocking sorted-set
//! pops and client identification over RESP:
//! - BZMPOP / BZPOPMIN / BZPOPMAX with typed, nullable results
//! - CLIENT SETINFO gated on the server version
//! - One-time identification handshake per naming context
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   PopClient (facade)                         │
//! └──────┬──────────────────┬───────────────────────┬───────────┘
//!        │                  │                       │
//!        ▼                  ▼                       ▼
//! ┌─────────────┐   ┌───────────────┐      ┌────────────────┐
//! │  Builders   │   │   Executor    │      │ Identification │
//! │ (tokens)    │   │ (one command) │      │    Policy      │
//! └─────────────┘   └───────┬───────┘      └────────────────┘
//!                           │
//!                           ▼
//!                   ┌───────────────┐
//!                   │   Decoders    │
//!                   │ (typed reply) │
//!                   └───────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod command;
pub mod identity;
pub mod network;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{PopError, Result};
pub use config::ClientConfig;
pub use client::PopClient;
pub use command::{BatchPopResult, Direction, LibAttribute, PopResult, ScoredEntry, Timeout};
pub use identity::IdentificationPolicy;
pub use network::{Executor, ServerVersion, TcpConnection};
pub use protocol::Reply;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of popwire
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
