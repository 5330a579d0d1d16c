use bytes::Bytes;
use telefoniste_frame::{read_frame_with_limit, write_frame_with_limit};
use telefoniste_transport::{Connector, Transport, UdsConnector};
use tracing::debug;

use crate::config::SessionConfig;
use crate::error::{Result, SessionError};

/// Observable lifecycle state of a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unopened,
    Open,
    Closed,
}

enum State<S> {
    Unopened,
    Open(S),
    Closed,
}

/// One transport connection carrying a single request/response exchange.
///
/// The session moves `Unopened → Open → Closed` and never back. While open
/// it exclusively owns the connected stream. Dropping an open session closes
/// it.
pub struct Session<C: Connector = UdsConnector> {
    connector: C,
    config: SessionConfig,
    state: State<C::Stream>,
}

impl Session<UdsConnector> {
    /// Create an unopened session for the Unix domain socket at `config.path`.
    pub fn new(config: SessionConfig) -> Self {
        let connector = config.connector();
        Self::with_connector(connector, config)
    }
}

impl<C: Connector> Session<C> {
    /// Create an unopened session that dials through `connector`.
    ///
    /// `config.path` is not consulted; the connector owns the endpoint.
    pub fn with_connector(connector: C, config: SessionConfig) -> Self {
        Self {
            connector,
            config,
            state: State::Unopened,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        match self.state {
            State::Unopened => SessionState::Unopened,
            State::Open(_) => SessionState::Open,
            State::Closed => SessionState::Closed,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, State::Open(_))
    }

    /// Connect to the endpoint (blocking).
    ///
    /// Fails with [`SessionError::EndpointNotFound`] when the endpoint does
    /// not exist, without attempting a connection. A failed connect leaves
    /// the session closed.
    pub fn open_client(&mut self) -> Result<()> {
        match self.state {
            State::Unopened => {}
            State::Open(_) => return Err(SessionError::AlreadyOpen),
            State::Closed => return Err(SessionError::Closed),
        }

        let connected = self.connector.connect().and_then(|stream| {
            stream.set_read_timeout(self.config.read_timeout)?;
            stream.set_write_timeout(self.config.write_timeout)?;
            Ok(stream)
        });

        match connected {
            Ok(stream) => {
                debug!(endpoint = ?self.connector.endpoint(), "session open");
                self.state = State::Open(stream);
                Ok(())
            }
            Err(err) => {
                self.state = State::Closed;
                Err(err.into())
            }
        }
    }

    /// Send one framed payload, writing every byte before returning.
    pub fn send_message(&mut self, payload: &[u8]) -> Result<()> {
        let max_payload = self.config.max_payload_size;
        let stream = self.stream_mut()?;
        let result = write_frame_with_limit(stream, payload, max_payload);
        self.abort_on_error(result)?;
        debug!(payload_len = payload.len(), "request sent");
        Ok(())
    }

    /// Receive one framed payload.
    pub fn receive_message(&mut self) -> Result<Bytes> {
        let max_payload = self.config.max_payload_size;
        let stream = self.stream_mut()?;
        let result = read_frame_with_limit(stream, max_payload);
        let payload = self.abort_on_error(result)?;
        debug!(payload_len = payload.len(), "response received");
        Ok(payload)
    }

    /// Release the connection. Never fails.
    ///
    /// A no-op unless the session is open. Errors from shutting down the
    /// stream are logged and dropped; the session always ends up closed.
    pub fn close(&mut self) {
        match std::mem::replace(&mut self.state, State::Closed) {
            State::Open(mut stream) => {
                if let Err(err) = stream.shutdown() {
                    debug!(error = %err, "ignoring shutdown error during close");
                }
                drop(stream);
                debug!(endpoint = ?self.connector.endpoint(), "session closed");
            }
            State::Unopened => self.state = State::Unopened,
            State::Closed => {}
        }
    }

    /// Open the session, run `f`, and close the session on every exit path.
    pub fn scoped<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        self.open_client()?;
        let result = f(self);
        self.close();
        result
    }

    /// One request, one response, then teardown.
    ///
    /// The session is closed afterwards whether or not the exchange
    /// succeeded; a second call fails with [`SessionError::Closed`].
    pub fn call(&mut self, payload: &[u8]) -> Result<Bytes> {
        self.scoped(|session| {
            session.send_message(payload)?;
            session.receive_message()
        })
    }

    fn stream_mut(&mut self) -> Result<&mut C::Stream> {
        match &mut self.state {
            State::Open(stream) => Ok(stream),
            _ => Err(SessionError::NotOpen),
        }
    }

    /// Any transport or protocol failure aborts the exchange.
    fn abort_on_error<T>(&mut self, result: telefoniste_frame::Result<T>) -> Result<T> {
        result.map_err(|err| {
            self.close();
            SessionError::from(err)
        })
    }
}

impl<C: Connector> Drop for Session<C> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<C: Connector> std::fmt::Debug for Session<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("endpoint", &self.connector.endpoint())
            .field("state", &self.state())
            .finish()
    }
}
