//! Identity Module
//!
//! Library name/version announced to the server with CLIENT SETINFO, and
//! the policy deciding when to announce them.
//!
//! ## Default Values
//! - name:    `popwire(rust_v1.70)`, or `popwire(<suffix>;rust_v1.70)`
//! - version: the crate version

mod policy;

pub use crate::command::LibAttribute;
pub use policy::{Handshake, IdentificationPolicy};

/// Fixed library identifier at the start of every announced name
pub const LIB_IDENTIFIER: &str = "popwire";

/// Toolchain the crate declares as its minimum
pub const RUST_VERSION: &str = env!("CARGO_PKG_RUST_VERSION");

/// Announced library name, with the extra identity as a prefix segment
pub fn default_lib_name(suffix: Option<&str>) -> String {
    match suffix {
        Some(suffix) => format!("{}({};rust_v{})", LIB_IDENTIFIER, suffix, RUST_VERSION),
        None => format!("{}(rust_v{})", LIB_IDENTIFIER, RUST_VERSION),
    }
}

/// Announced library version
pub fn default_lib_version() -> &'static str {
    crate::VERSION
}
