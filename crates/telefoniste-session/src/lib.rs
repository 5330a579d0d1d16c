//! One-shot request/response sessions over framed IPC.
//!
//! A [`Session`] owns a single connection for exactly one exchange:
//! open, send one frame, receive one frame, close. [`Client`] wraps that
//! pattern so each call gets a fresh session and the connection is always
//! released, even when the exchange fails.

pub mod client;
pub mod config;
pub mod error;
pub mod session;

pub use client::{call, Client};
pub use config::SessionConfig;
pub use error::{Result, SessionError};
pub use session::{Session, SessionState};
