use bytes::{BufMut, BytesMut};

use crate::error::{FrameError, Result};

/// Frame header: a single big-endian `u32` payload length.
pub const HEADER_SIZE: usize = 4;

/// Largest payload the length header can describe.
pub const MAX_PAYLOAD: usize = u32::MAX as usize;

/// Encode a payload into the wire format.
///
/// Wire format:
/// ```text
/// ┌────────────────────┬────────────────────────────┐
/// │ Length (4B BE)     │ Payload (Length bytes)     │
/// └────────────────────┴────────────────────────────┘
/// ```
///
/// An empty payload encodes to the header alone.
pub fn encode_frame(payload: &[u8], dst: &mut BytesMut) -> Result<()> {
    if payload.len() > MAX_PAYLOAD {
        return Err(FrameError::PayloadTooLarge {
            size: payload.len(),
            max: MAX_PAYLOAD,
        });
    }
    dst.reserve(HEADER_SIZE + payload.len());
    dst.put_u32(payload.len() as u32);
    dst.put_slice(payload);
    Ok(())
}

/// Payload length declared by a frame header.
pub fn decode_header(header: [u8; HEADER_SIZE]) -> usize {
    u32::from_be_bytes(header) as usize
}

/// Total number of bytes a payload of `payload_len` occupies on the wire.
pub fn wire_size(payload_len: usize) -> usize {
    HEADER_SIZE + payload_len
}
