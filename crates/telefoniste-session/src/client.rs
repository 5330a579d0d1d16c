use std::path::Path;

use bytes::Bytes;
use telefoniste_transport::{Connector, UdsConnector};

use crate::config::SessionConfig;
use crate::error::Result;
use crate::session::Session;

/// Issues one-shot calls against a fixed endpoint.
///
/// Every [`Client::call`] runs on its own fresh [`Session`]; nothing is
/// shared between calls, so a client may be used from several threads.
#[derive(Debug, Clone)]
pub struct Client<C: Connector + Clone = UdsConnector> {
    connector: C,
    config: SessionConfig,
}

impl Client<UdsConnector> {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            connector: config.connector(),
            config,
        }
    }
}

impl<C: Connector + Clone> Client<C> {
    pub fn with_connector(connector: C, config: SessionConfig) -> Self {
        Self { connector, config }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Open a connection, send `payload`, read the reply, and close.
    ///
    /// The connection is closed before any error is returned. Failed calls
    /// are not retried.
    pub fn call(&self, payload: &[u8]) -> Result<Bytes> {
        let mut session = Session::with_connector(self.connector.clone(), self.config.clone());
        session.call(payload)
    }
}

/// Call the server listening at `path` with default settings.
pub fn call(path: impl AsRef<Path>, payload: &[u8]) -> Result<Bytes> {
    Client::new(SessionConfig::new(path.as_ref())).call(payload)
}
