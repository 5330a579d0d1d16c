use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, TransportError};
use crate::traits::{Connector, IpcStream};

/// Well-known socket path used when no endpoint is configured.
pub const DEFAULT_SOCKET_PATH: &str = "/tmp/telefoniste.sock";

/// Client side of a filesystem-path Unix domain socket.
///
/// Each call to [`Connector::connect`] dials the path anew; the connector
/// itself holds no socket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UdsConnector {
    path: PathBuf,
}

impl UdsConnector {
    /// Maximum socket path length.
    /// Unix `sockaddr_un.sun_path` is typically 108 bytes on Linux, 104 on macOS.
    #[cfg(target_os = "linux")]
    pub const MAX_PATH_LEN: usize = 108;
    #[cfg(not(target_os = "linux"))]
    pub const MAX_PATH_LEN: usize = 104;

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path this connector dials.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Transport name for diagnostics.
    pub fn transport_name(&self) -> &'static str {
        "unix-domain-socket"
    }
}

impl Default for UdsConnector {
    fn default() -> Self {
        Self::new(DEFAULT_SOCKET_PATH)
    }
}

impl Connector for UdsConnector {
    type Stream = IpcStream;

    fn endpoint(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<IpcStream> {
        connect(&self.path)
    }
}

/// Connect to a listening Unix domain socket (blocking).
///
/// A missing path fails with [`TransportError::EndpointNotFound`] before any
/// socket is created, so it stays distinguishable from a refused connection.
pub fn connect(path: impl AsRef<Path>) -> Result<IpcStream> {
    let path = path.as_ref();

    let path_bytes = path.as_os_str().len();
    if path_bytes >= UdsConnector::MAX_PATH_LEN {
        return Err(TransportError::PathTooLong {
            path: path.to_path_buf(),
            len: path_bytes,
            max: UdsConnector::MAX_PATH_LEN,
        });
    }

    if !path.exists() {
        return Err(TransportError::EndpointNotFound {
            path: path.to_path_buf(),
        });
    }

    let stream = UnixStream::connect(path).map_err(|e| TransportError::Connect {
        path: path.to_path_buf(),
        source: e,
    })?;
    debug!(?path, "connected to unix domain socket");
    Ok(IpcStream::from_unix(stream))
}
