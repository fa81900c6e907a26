//! Configuration for popwire
//!
//! Centralized client configuration with sensible defaults.

use crate::network::ServerVersion;

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// Server address (host:port)
    pub addr: String,

    /// Connect timeout (milliseconds, 0 = OS default)
    pub connect_timeout_ms: u64,

    /// Socket read timeout (milliseconds, 0 = none)
    ///
    /// Unbounded by default: blocking pops wait on the server for as long as
    /// their own timeout says.
    pub read_timeout_ms: u64,

    /// Socket write timeout (milliseconds, 0 = none)
    pub write_timeout_ms: u64,

    // -------------------------------------------------------------------------
    // Identification Configuration
    // -------------------------------------------------------------------------
    /// Extra identity inserted into the announced library name
    pub lib_name_suffix: Option<String>,

    /// Send the CLIENT SETINFO handshake before the first generic command
    pub identify: bool,

    /// Oldest server that is sent CLIENT SETINFO
    pub min_setinfo_version: ServerVersion,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:6379".to_string(),
            connect_timeout_ms: 5000,
            read_timeout_ms: 0,
            write_timeout_ms: 5000,
            lib_name_suffix: None,
            identify: true,
            min_setinfo_version: ServerVersion::SETINFO_MIN,
        }
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for ClientConfig
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the server address
    pub fn addr(mut self, addr: impl Into<String>) -> Self {
        self.config.addr = addr.into();
        self
    }

    /// Set the connect timeout (in milliseconds)
    pub fn connect_timeout_ms(mut self, ms: u64) -> Self {
        self.config.connect_timeout_ms = ms;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    /// Set the extra identity announced in the library name
    pub fn lib_name_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.config.lib_name_suffix = Some(suffix.into());
        self
    }

    /// Enable or disable the identification handshake
    pub fn identify(mut self, enabled: bool) -> Self {
        self.config.identify = enabled;
        self
    }

    /// Set the oldest server version that is sent CLIENT SETINFO
    pub fn min_setinfo_version(mut self, version: ServerVersion) -> Self {
        self.config.min_setinfo_version = version;
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }
}
