//! Stream transport abstraction for telefoniste.
//!
//! This is the lowest layer. It provides the connect / read / write /
//! shutdown capability the session builds on:
//! - [`Transport`]: a connected byte stream that can be shut down
//! - [`Connector`]: dials one configured endpoint
//! - [`UdsConnector`]: filesystem-path Unix domain sockets (Linux/macOS)

pub mod error;
pub mod traits;

#[cfg(unix)]
pub mod uds;

pub use error::{Result, TransportError};
pub use traits::{Connector, IpcStream, Transport};

#[cfg(unix)]
pub use uds::{connect, UdsConnector, DEFAULT_SOCKET_PATH};
