use std::io::{ErrorKind, Write};

use bytes::BytesMut;
use tracing::trace;

use crate::codec::{encode_frame, wire_size, MAX_PAYLOAD};
use crate::error::{FrameError, Result};

/// Encode `payload` and write the complete frame to `sink` (blocking).
///
/// Partial writes are continued until every byte of header and payload has
/// been submitted, then the sink is flushed.
pub fn write_frame<W: Write>(sink: &mut W, payload: &[u8]) -> Result<()> {
    write_frame_with_limit(sink, payload, MAX_PAYLOAD)
}

/// Like [`write_frame`], but refuses payloads larger than `max_payload`.
pub fn write_frame_with_limit<W: Write>(
    sink: &mut W,
    payload: &[u8],
    max_payload: usize,
) -> Result<()> {
    if payload.len() > max_payload {
        return Err(FrameError::PayloadTooLarge {
            size: payload.len(),
            max: max_payload,
        });
    }

    let mut buf = BytesMut::with_capacity(wire_size(payload.len()));
    encode_frame(payload, &mut buf)?;

    let mut offset = 0usize;
    while offset < buf.len() {
        match sink.write(&buf[offset..]) {
            Ok(0) => return Err(FrameError::ConnectionClosed),
            Ok(n) => offset += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(FrameError::Io(err)),
        }
    }

    flush(sink)?;
    trace!(payload_len = payload.len(), "wrote frame");
    Ok(())
}

fn flush<W: Write>(sink: &mut W) -> Result<()> {
    loop {
        match sink.flush() {
            Ok(()) => return Ok(()),
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(FrameError::Io(err)),
        }
    }
}
