//! One request, one response: length-prefixed framing over Unix domain sockets.
//!
//! # Crate Structure
//!
//! - [`transport`]: Stream transport capability (Unix domain sockets)
//! - [`frame`]: 4-byte big-endian length-prefixed framing
//! - [`session`]: Single-exchange sessions and the one-shot client (behind `session` feature)
//!
//! ```no_run
//! let reply = telefoniste::session::call("/tmp/telefoniste.sock", b"hello")?;
//! assert_eq!(reply.as_ref(), b"hello");
//! # Ok::<(), telefoniste::session::SessionError>(())
//! ```

/// Re-export transport types.
pub mod transport {
    pub use telefoniste_transport::*;
}

/// Re-export frame types.
pub mod frame {
    pub use telefoniste_frame::*;
}

/// Re-export session types (requires `session` feature).
#[cfg(feature = "session")]
pub mod session {
    pub use telefoniste_session::*;
}
