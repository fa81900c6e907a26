//! Execution primitive
//!
//! The seam between this crate and whatever actually moves bytes.

use std::fmt;
use std::str::FromStr;

use bytes::Bytes;

use crate::error::{PopError, Result};
use crate::protocol::Reply;

/// Executes one command and returns its reply
///
/// Implementations own the transport: timeouts, reconnection and
/// cancellation are theirs to enforce. Errors are propagated by the facade
/// unchanged. One command is in flight per executor at a time.
pub trait Executor {
    /// Send `tokens` (command name first) and wait for the reply
    ///
    /// Server error replies are returned as `Reply::Error`, not as `Err`.
    fn execute(&mut self, tokens: &[Bytes]) -> Result<Reply>;

    /// Version of the connected server
    fn server_version(&mut self) -> Result<ServerVersion>;
}

impl<E: Executor + ?Sized> Executor for &mut E {
    fn execute(&mut self, tokens: &[Bytes]) -> Result<Reply> {
        (**self).execute(tokens)
    }

    fn server_version(&mut self) -> Result<ServerVersion> {
        (**self).server_version()
    }
}

impl<E: Executor + ?Sized> Executor for Box<E> {
    fn execute(&mut self, tokens: &[Bytes]) -> Result<Reply> {
        (**self).execute(tokens)
    }

    fn server_version(&mut self) -> Result<ServerVersion> {
        (**self).server_version()
    }
}

// =============================================================================
// Server Version
// =============================================================================

/// `major.minor.patch` version reported by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ServerVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl ServerVersion {
    /// First release that understands `CLIENT SETINFO`
    pub const SETINFO_MIN: ServerVersion = ServerVersion::new(7, 2, 0);

    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Extract the version from an `INFO server` payload
    pub fn from_info(info: &str) -> Result<Self> {
        info.lines()
            .find_map(|line| line.trim().strip_prefix("redis_version:"))
            .ok_or_else(|| {
                PopError::ProtocolDecode("INFO reply has no redis_version field".to_string())
            })?
            .parse()
    }

    /// Fail with `UnsupportedByServer` when older than `required`
    pub fn require(self, required: ServerVersion, command: &'static str) -> Result<()> {
        if self < required {
            return Err(PopError::UnsupportedByServer {
                command,
                required: required.to_string(),
                actual: self.to_string(),
            });
        }
        Ok(())
    }
}

impl FromStr for ServerVersion {
    type Err = PopError;

    /// Parses `7`, `7.2` or `7.2.4`; missing parts are zero
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || PopError::ProtocolDecode(format!("Invalid server version: {:?}", s));

        let mut parts = [0u32; 3];
        let mut count = 0;
        for piece in s.trim().split('.') {
            if count == parts.len() {
                return Err(invalid());
            }
            parts[count] = piece.parse().map_err(|_| invalid())?;
            count += 1;
        }

        Ok(ServerVersion::new(parts[0], parts[1], parts[2]))
    }
}

impl fmt::Display for ServerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
