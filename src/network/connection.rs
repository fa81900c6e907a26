//! TCP Connection
//!
//! Blocking request/reply connection to a single server.

use std::io::{BufReader, BufWriter};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use bytes::Bytes;

use super::{Executor, ServerVersion};
use crate::config::ClientConfig;
use crate::error::{PopError, Result};
use crate::protocol::{read_reply, write_command, Reply};

/// A single blocking connection to the server
pub struct TcpConnection {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Peer address for logging
    peer_addr: String,

    /// Filled by the first `server_version` call
    server_version: Option<ServerVersion>,

    /// Set when a write or read failed partway; the stream may hold a
    /// stale or partial reply and is never reused
    broken: bool,
}

impl TcpConnection {
    /// Connect to `config.addr` and apply the configured timeouts
    pub fn connect(config: &ClientConfig) -> Result<Self> {
        let addrs: Vec<SocketAddr> = config
            .addr
            .to_socket_addrs()
            .map_err(|e| PopError::Config(format!("Invalid address {}: {}", config.addr, e)))?
            .collect();

        if addrs.is_empty() {
            return Err(PopError::Config(format!(
                "Address {} did not resolve",
                config.addr
            )));
        }

        let mut last_err = None;
        for addr in &addrs {
            let attempt = match millis(config.connect_timeout_ms) {
                Some(timeout) => TcpStream::connect_timeout(addr, timeout),
                None => TcpStream::connect(addr),
            };
            match attempt {
                Ok(stream) => {
                    let mut conn = Self::from_stream(stream)?;
                    conn.set_timeouts(config.read_timeout_ms, config.write_timeout_ms)?;
                    return Ok(conn);
                }
                Err(e) => {
                    tracing::debug!("Connect to {} failed: {}", addr, e);
                    last_err = Some(e);
                }
            }
        }

        Err(PopError::Io(last_err.unwrap_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotConnected, "no address to connect to")
        })))
    }

    /// Wrap an already connected stream
    pub fn from_stream(stream: TcpStream) -> Result<Self> {
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Disable Nagle's algorithm for low latency
        stream.set_nodelay(true)?;

        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        tracing::debug!("Connected to {}", peer_addr);

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            peer_addr,
            server_version: None,
            broken: false,
        })
    }

    /// Configure socket timeouts; 0 disables the timeout
    ///
    /// Blocking pops wait server-side, so a read timeout shorter than the
    /// command's own timeout surfaces as a transport error.
    pub fn set_timeouts(&mut self, read_ms: u64, write_ms: u64) -> Result<()> {
        self.reader.get_ref().set_read_timeout(millis(read_ms))?;
        self.writer.get_ref().set_write_timeout(millis(write_ms))?;
        Ok(())
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }

    /// True once a transport or framing failure has retired the connection
    pub fn is_broken(&self) -> bool {
        self.broken
    }

    fn ensure_usable(&self) -> Result<()> {
        if self.broken {
            return Err(PopError::Io(std::io::Error::new(
                std::io::ErrorKind::NotConnected,
                format!("connection to {} is broken", self.peer_addr),
            )));
        }
        Ok(())
    }

    fn round_trip(&mut self, tokens: &[Bytes]) -> Result<Reply> {
        write_command(&mut self.writer, tokens)?;
        read_reply(&mut self.reader)
    }

    fn mark_broken(&mut self, cause: &PopError) {
        tracing::warn!("Dropping connection to {}: {}", self.peer_addr, cause);
        self.broken = true;
        let _ = self.writer.get_ref().shutdown(Shutdown::Both);
    }
}

impl Executor for TcpConnection {
    fn execute(&mut self, tokens: &[Bytes]) -> Result<Reply> {
        self.ensure_usable()?;
        if tokens.is_empty() {
            return Err(PopError::InvalidArgument(
                "cannot send an empty command".to_string(),
            ));
        }

        tracing::trace!(
            "Sending {} ({} args) to {}",
            String::from_utf8_lossy(&tokens[0]),
            tokens.len() - 1,
            self.peer_addr
        );

        let result = self.round_trip(tokens);
        if let Err(e @ (PopError::Io(_) | PopError::ProtocolDecode(_))) = &result {
            self.mark_broken(e);
        }
        result
    }

    fn server_version(&mut self) -> Result<ServerVersion> {
        self.ensure_usable()?;
        if let Some(version) = self.server_version {
            return Ok(version);
        }

        let info = self.execute(&[Bytes::from_static(b"INFO"), Bytes::from_static(b"server")])?;
        let version = match info {
            Reply::Bulk(text) => ServerVersion::from_info(&String::from_utf8_lossy(&text))?,
            Reply::Error(message) => return Err(PopError::Server(message)),
            other => {
                return Err(PopError::ProtocolDecode(format!(
                    "INFO: expected bulk string, got {}",
                    other.kind_name()
                )))
            }
        };

        tracing::debug!("Server {} reports version {}", self.peer_addr, version);
        self.server_version = Some(version);
        Ok(version)
    }
}

fn millis(ms: u64) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(ms))
}
