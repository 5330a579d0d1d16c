use std::path::PathBuf;
use std::time::Duration;

use telefoniste_frame::MAX_PAYLOAD;
use telefoniste_transport::{UdsConnector, DEFAULT_SOCKET_PATH};

/// Configuration for a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Filesystem path of the server's Unix domain socket.
    pub path: PathBuf,
    /// Read timeout applied to the connection. Default: none (block).
    pub read_timeout: Option<Duration>,
    /// Write timeout applied to the connection. Default: none (block).
    pub write_timeout: Option<Duration>,
    /// Maximum payload size in either direction. Default: [`MAX_PAYLOAD`].
    pub max_payload_size: usize,
}

impl SessionConfig {
    /// Default configuration pointed at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Apply the same timeout to reads and writes.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self.write_timeout = Some(timeout);
        self
    }

    pub(crate) fn connector(&self) -> UdsConnector {
        UdsConnector::new(&self.path)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_SOCKET_PATH),
            read_timeout: None,
            write_timeout: None,
            max_payload_size: MAX_PAYLOAD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_well_known_socket() {
        let cfg = SessionConfig::default();
        assert_eq!(cfg.path, PathBuf::from(DEFAULT_SOCKET_PATH));
        assert_eq!(cfg.read_timeout, None);
        assert_eq!(cfg.write_timeout, None);
        assert_eq!(cfg.max_payload_size, MAX_PAYLOAD);
    }

    #[test]
    fn with_timeout_sets_both_directions() {
        let cfg = SessionConfig::new("/tmp/x.sock").with_timeout(Duration::from_millis(250));
        assert_eq!(cfg.path, PathBuf::from("/tmp/x.sock"));
        assert_eq!(cfg.read_timeout, Some(Duration::from_millis(250)));
        assert_eq!(cfg.write_timeout, Some(Duration::from_millis(250)));
    }
}
