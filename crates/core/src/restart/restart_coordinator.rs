use std::io::{Read, Write};
use std::net::TcpStream;
use std::time::Duration;

use thiserror::Error;

use crate::shared::constants::{DEFAULT_RESTART_HOST, DEFAULT_RESTART_PORT};

#[derive(Error, Debug)]
pub enum RestartError {
    #[error("invalid restart target '{0}': expected host:port with a numeric port")]
    InvalidTarget(String),
    #[error("no restart targets given")]
    NoTargets,
    #[error("could not reach restart daemon at {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("restart daemon connection failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("daemon failed to restart servers (status byte {status:#04x}), check server logs")]
    Daemon { status: u8 },
}

/// Client for the local restart daemon.
///
/// The daemon speaks a one-shot line protocol: the client sends the
/// comma-joined target port numbers terminated by a newline, and the
/// daemon answers with a single ASCII byte, `'0'` for success. Restarting
/// before constructing a session guarantees the session sees freshly
/// restarted servers rather than servers mid-restart.
///
/// A single round trip, no retry: this client cannot assume the daemon's
/// restart command is idempotent, so retry policy stays with the caller.
pub struct RestartCoordinator {
    host: String,
    port: u16,
    timeout: Option<Duration>,
}

impl Default for RestartCoordinator {
    fn default() -> Self {
        Self::new(DEFAULT_RESTART_HOST, DEFAULT_RESTART_PORT)
    }
}

impl RestartCoordinator {
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            host: host.to_string(),
            port,
            timeout: None,
        }
    }

    /// Bound the wait on the daemon. By default both reads and writes
    /// block indefinitely; a hung daemon hangs the caller.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Restart the servers named by explicit `host:port` addresses and
    /// block until the daemon acknowledges.
    ///
    /// Target validation happens before any socket is opened.
    pub fn restart<S: AsRef<str>>(&self, servers: &[S]) -> Result<(), RestartError> {
        if servers.is_empty() {
            return Err(RestartError::NoTargets);
        }

        let ports: Vec<String> = servers
            .iter()
            .map(|server| {
                let server = server.as_ref();
                server
                    .rsplit(':')
                    .next()
                    .and_then(|p| p.parse::<u16>().ok())
                    .map(|p| p.to_string())
                    .ok_or_else(|| RestartError::InvalidTarget(server.to_string()))
            })
            .collect::<Result<_, _>>()?;

        self.exchange(&ports.join(","))
    }

    /// Count-only convenience form: the daemon picks which servers to
    /// restart from its own ordering convention.
    pub fn restart_count(&self, count: usize) -> Result<(), RestartError> {
        if count == 0 {
            return Err(RestartError::NoTargets);
        }
        self.exchange(&count.to_string())
    }

    /// One request/response exchange over a short-lived connection. The
    /// stream is closed on every exit path when it drops.
    fn exchange(&self, request: &str) -> Result<(), RestartError> {
        let addr = format!("{}:{}", self.host, self.port);
        log::debug!("requesting restart via {addr}: {request}");

        let mut stream =
            TcpStream::connect(addr.as_str()).map_err(|source| RestartError::Connect {
                addr: addr.clone(),
                source,
            })?;
        stream.set_read_timeout(self.timeout)?;
        stream.set_write_timeout(self.timeout)?;

        stream.write_all(format!("{request}\n").as_bytes())?;

        let mut status = [0u8; 1];
        stream.read_exact(&mut status)?;

        if status[0] != b'0' {
            return Err(RestartError::Daemon { status: status[0] });
        }

        log::info!("restart daemon acknowledged: {request}");
        Ok(())
    }
}
