//! Identification policy
//!
//! Tracks, per naming context, whether the CLIENT SETINFO handshake has been
//! sent.
//!
//! ## Lifecycle
//! ```text
//! NotYetIdentified ──first generic command──▶ Identified
//!        ▲                                        │
//!        └──────────────── reset() ───────────────┘
//! ```
//!
//! The transition happens before the handshake is sent and is not undone if
//! the handshake fails.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;

use super::{default_lib_name, default_lib_version};
use crate::command::LibAttribute;

/// Library name and version to announce on a connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handshake {
    pub lib_name: String,
    pub lib_version: String,
}

impl Handshake {
    /// Defaults for a naming context
    pub fn for_context(context: Option<&str>) -> Self {
        Self {
            lib_name: default_lib_name(context),
            lib_version: default_lib_version().to_string(),
        }
    }

    /// The two SETINFO attribute/value pairs, name first
    pub fn attributes(&self) -> [(LibAttribute, &str); 2] {
        [
            (LibAttribute::Name, self.lib_name.as_str()),
            (LibAttribute::Version, self.lib_version.as_str()),
        ]
    }
}

/// Per-context handshake state, shared by the connections of one session
///
/// `None` is the context without an extra identity.
#[derive(Debug, Default)]
pub struct IdentificationPolicy {
    identified: Mutex<HashSet<Option<String>>>,
}

impl IdentificationPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// A new policy behind an `Arc`, ready to hand to several clients
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Mark `context` identified and return the handshake to send, or
    /// `None` if an earlier call already claimed it
    ///
    /// Test-and-set happens under one lock, so concurrent first uses send
    /// the handshake exactly once.
    pub fn begin(&self, context: Option<&str>) -> Option<Handshake> {
        let mut identified = self.identified.lock();
        let key = context.map(str::to_owned);
        if identified.contains(&key) {
            return None;
        }
        identified.insert(key);
        drop(identified);

        tracing::debug!(context = ?context, "Identification handshake claimed");
        Some(Handshake::for_context(context))
    }

    pub fn is_identified(&self, context: Option<&str>) -> bool {
        let key = context.map(str::to_owned);
        self.identified.lock().contains(&key)
    }

    /// Forget every context so the next generic command handshakes again
    ///
    /// Intended for test isolation.
    pub fn reset(&self) {
        self.identified.lock().clear();
        tracing::debug!("Identification state reset");
    }
}
