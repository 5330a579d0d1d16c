//! Length-prefixed message framing for telefoniste.
//!
//! Every message is framed with a 4-byte big-endian payload length followed
//! by the payload itself. The codec holds no state and works over any
//! [`std::io::Read`] / [`std::io::Write`], so it runs the same against a
//! socket or an in-memory buffer.
//!
//! Short reads and short writes are handled internally; callers always see
//! a complete payload or an error.

pub mod codec;
pub mod error;
pub mod reader;
pub mod writer;

pub use codec::{decode_header, encode_frame, wire_size, HEADER_SIZE, MAX_PAYLOAD};
pub use error::{FrameError, Result};
pub use reader::{read_frame, read_frame_with_limit};
pub use writer::{write_frame, write_frame_with_limit};
