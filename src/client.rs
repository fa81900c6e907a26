//! Client Module
//!
//! The caller-facing operations. Each one builds a command, hands it to the
//! executor and decodes the reply.
//!
//! ## Responsibilities
//! - Validate arguments before any I/O
//! - Gate CLIENT SETINFO on the server version
//! - Send the identification handshake before the first generic command

use std::sync::Arc;

use bytes::Bytes;

use crate::command::{
    build_bzmpop, build_bzpop, build_client_setinfo, decode_batch_pop, decode_ok,
    decode_single_pop, BatchPopResult, Direction, LibAttribute, PopResult, Timeout,
};
use crate::config::ClientConfig;
use crate::error::{PopError, Result};
use crate::identity::IdentificationPolicy;
use crate::network::{Executor, ServerVersion, TcpConnection};
use crate::protocol::Reply;

/// Blocking sorted-set pop and identification commands over an executor
///
/// ## Shared State
/// The only shared state is the `IdentificationPolicy`. Clients of one
/// session share it through an `Arc`; builders and decoders are stateless.
pub struct PopClient<E: Executor> {
    /// Transport for one command at a time
    executor: E,

    /// Handshake state shared with other clients of the same session
    identification: Arc<IdentificationPolicy>,

    /// Extra identity; also the key into `identification`
    context: Option<String>,

    /// Send the handshake on the generic path
    identify: bool,

    /// Oldest server that is sent CLIENT SETINFO
    min_setinfo_version: ServerVersion,
}

impl PopClient<TcpConnection> {
    /// Open a TCP connection with its own identification state
    pub fn connect(config: &ClientConfig) -> Result<Self> {
        let conn = TcpConnection::connect(config)?;
        Ok(Self::with_config(conn, IdentificationPolicy::shared(), config))
    }
}

impl<E: Executor> PopClient<E> {
    /// Wrap an executor with default settings
    pub fn new(executor: E, identification: Arc<IdentificationPolicy>) -> Self {
        Self::with_config(executor, identification, &ClientConfig::default())
    }

    /// Wrap an executor, taking identification settings from `config`
    pub fn with_config(
        executor: E,
        identification: Arc<IdentificationPolicy>,
        config: &ClientConfig,
    ) -> Self {
        Self {
            executor,
            identification,
            context: config.lib_name_suffix.clone(),
            identify: config.identify,
            min_setinfo_version: config.min_setinfo_version,
        }
    }

    pub fn identification(&self) -> &Arc<IdentificationPolicy> {
        &self.identification
    }

    /// Naming context used for the handshake
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    pub fn executor_mut(&mut self) -> &mut E {
        &mut self.executor
    }

    pub fn into_inner(self) -> E {
        self.executor
    }

    // =========================================================================
    // Blocking pops
    // =========================================================================

    /// `BZMPOP`: pop up to `count` entries from the first non-empty key
    ///
    /// `None` for `count` lets the server pick (one entry). Returns
    /// `Ok(None)` when the timeout expires with nothing popped.
    pub fn bzmpop<K: AsRef<[u8]>>(
        &mut self,
        timeout: impl Into<Timeout>,
        keys: &[K],
        direction: Direction,
        count: Option<u64>,
    ) -> Result<Option<BatchPopResult>> {
        let tokens = build_bzmpop(timeout.into(), keys, direction, count)?;
        let reply = self.executor.execute(&tokens)?;
        decode_batch_pop(&reply)
    }

    /// `BZPOPMIN` or `BZPOPMAX`, depending on `direction`
    pub fn bzpop<K: AsRef<[u8]>>(
        &mut self,
        keys: &[K],
        timeout: impl Into<Timeout>,
        direction: Direction,
    ) -> Result<Option<PopResult>> {
        let tokens = build_bzpop(keys, timeout.into(), direction)?;
        let reply = self.executor.execute(&tokens)?;
        decode_single_pop(&reply)
    }

    /// `BZPOPMIN`: pop the lowest-scored entry
    pub fn bzpopmin<K: AsRef<[u8]>>(
        &mut self,
        keys: &[K],
        timeout: impl Into<Timeout>,
    ) -> Result<Option<PopResult>> {
        self.bzpop(keys, timeout, Direction::Min)
    }

    /// `BZPOPMAX`: pop the highest-scored entry
    pub fn bzpopmax<K: AsRef<[u8]>>(
        &mut self,
        keys: &[K],
        timeout: impl Into<Timeout>,
    ) -> Result<Option<PopResult>> {
        self.bzpop(keys, timeout, Direction::Max)
    }

    // =========================================================================
    // Identification
    // =========================================================================

    /// `CLIENT SETINFO`
    ///
    /// Returns `Ok(false)` without sending anything when the server predates
    /// the command. A value the server rejects comes back as
    /// `PopError::Server`.
    pub fn client_setinfo(&mut self, attribute: LibAttribute, value: &str) -> Result<bool> {
        let version = self.executor.server_version()?;
        match version.require(self.min_setinfo_version, "CLIENT SETINFO") {
            Ok(()) => {}
            Err(PopError::UnsupportedByServer { .. }) => {
                tracing::debug!(%version, "Skipping CLIENT SETINFO on older server");
                return Ok(false);
            }
            Err(e) => return Err(e),
        }

        let tokens = build_client_setinfo(attribute, value);
        let reply = self.executor.execute(&tokens)?;
        decode_ok(&reply)
    }

    // =========================================================================
    // Generic execution
    // =========================================================================

    /// Execute any command and return its raw reply
    ///
    /// The first call for this client's naming context is preceded by the
    /// identification handshake. Handshake failures are logged and ignored;
    /// a transport failure ends the handshake early.
    pub fn execute<A: AsRef<[u8]>>(&mut self, tokens: &[A]) -> Result<Reply> {
        if tokens.is_empty() {
            return Err(PopError::InvalidArgument(
                "command must have at least a name".to_string(),
            ));
        }

        if self.identify {
            if let Some(handshake) = self.identification.begin(self.context.as_deref()) {
                for (attribute, value) in handshake.attributes() {
                    if let Err(e) = self.client_setinfo(attribute, value) {
                        tracing::warn!(
                            attribute = attribute.keyword(),
                            "Identification handshake failed: {}",
                            e
                        );
                        if e.is_transport() {
                            break;
                        }
                    }
                }
            }
        }

        let tokens: Vec<Bytes> = tokens
            .iter()
            .map(|t| Bytes::copy_from_slice(t.as_ref()))
            .collect();
        self.executor.execute(&tokens)
    }
}
