use std::io::{ErrorKind, Read};

use bytes::{Bytes, BytesMut};
use tracing::trace;

use crate::codec::{decode_header, HEADER_SIZE, MAX_PAYLOAD};
use crate::error::{FrameError, Result};

const READ_CHUNK_SIZE: usize = 8 * 1024;

/// Read one complete frame from `source` and return its payload (blocking).
///
/// Short reads are accumulated until the exact byte count is reached. Only a
/// zero-byte read ends accumulation early, and that is reported as
/// [`FrameError::TruncatedHeader`] or [`FrameError::TruncatedBody`]. Nothing
/// past the end of the frame is consumed from `source`.
pub fn read_frame<R: Read>(source: &mut R) -> Result<Bytes> {
    read_frame_with_limit(source, MAX_PAYLOAD)
}

/// Like [`read_frame`], but rejects a declared length above `max_payload`
/// before reading the body.
pub fn read_frame_with_limit<R: Read>(source: &mut R, max_payload: usize) -> Result<Bytes> {
    let mut header = BytesMut::with_capacity(HEADER_SIZE);
    let received = read_up_to(source, &mut header, HEADER_SIZE)?;
    if received < HEADER_SIZE {
        return Err(FrameError::TruncatedHeader { received });
    }

    let mut raw = [0u8; HEADER_SIZE];
    raw.copy_from_slice(&header);
    let payload_len = decode_header(raw);
    if payload_len == 0 {
        trace!("read empty frame");
        return Ok(Bytes::new());
    }

    if payload_len > max_payload {
        return Err(FrameError::PayloadTooLarge {
            size: payload_len,
            max: max_payload,
        });
    }

    // The declared length is untrusted; grow the buffer as bytes arrive.
    let mut body = BytesMut::with_capacity(payload_len.min(READ_CHUNK_SIZE));
    let received = read_up_to(source, &mut body, payload_len)?;
    if received < payload_len {
        return Err(FrameError::TruncatedBody {
            expected: payload_len,
            received,
        });
    }

    trace!(payload_len, "read frame");
    Ok(body.freeze())
}

/// Append up to `n` bytes from `source` to `dst`, stopping early only at end
/// of stream. Returns the number of bytes appended.
fn read_up_to<R: Read>(source: &mut R, dst: &mut BytesMut, n: usize) -> Result<usize> {
    let mut chunk = [0u8; READ_CHUNK_SIZE];
    let mut total = 0usize;
    while total < n {
        let want = (n - total).min(READ_CHUNK_SIZE);
        match source.read(&mut chunk[..want]) {
            Ok(0) => break,
            Ok(read) => {
                dst.extend_from_slice(&chunk[..read]);
                total += read;
            }
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(FrameError::Io(err)),
        }
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use bytes::BufMut;

    use super::*;
    use crate::codec::encode_frame;

    fn wire(payload: &[u8]) -> Vec<u8> {
        let mut buf = BytesMut::new();
        encode_frame(payload, &mut buf).unwrap();
        buf.to_vec()
    }

    #[test]
    fn read_single_frame() {
        let mut source = Cursor::new(wire(b"hello"));
        let payload = read_frame(&mut source).unwrap();
        assert_eq!(payload.as_ref(), b"hello");
    }

    #[test]
    fn read_empty_frame_without_body_read() {
        let mut source = CountingReader {
            inner: Cursor::new(vec![0, 0, 0, 0]),
            calls: 0,
        };
        let payload = read_frame(&mut source).unwrap();

        assert!(payload.is_empty());
        // One call for the header; no attempt to read a body.
        assert_eq!(source.calls, 1);
    }

    #[test]
    fn read_stops_at_frame_boundary() {
        let mut bytes = wire(b"one");
        bytes.extend_from_slice(&wire(b"two"));
        let mut source = Cursor::new(bytes);

        assert_eq!(read_frame(&mut source).unwrap().as_ref(), b"one");
        assert_eq!(source.position() as usize, HEADER_SIZE + 3);
        assert_eq!(read_frame(&mut source).unwrap().as_ref(), b"two");
    }

    #[test]
    fn read_frame_with_large_payload() {
        let payload: Vec<u8> = (0..(1 << 20)).map(|i| (i % 251) as u8).collect();
        let mut source = Cursor::new(wire(&payload));

        let decoded = read_frame(&mut source).unwrap();
        assert_eq!(decoded.len(), payload.len());
        assert_eq!(decoded.as_ref(), payload.as_slice());
    }

    #[test]
    fn partial_read_handling() {
        let mut source = ByteByByteReader {
            bytes: wire(b"slow"),
            pos: 0,
        };
        let payload = read_frame(&mut source).unwrap();
        assert_eq!(payload.as_ref(), b"slow");
    }

    #[test]
    fn truncated_header_at_every_length() {
        for len in 0..HEADER_SIZE {
            let mut source = Cursor::new(vec![0u8; len]);
            let err = read_frame(&mut source).unwrap_err();
            assert!(
                matches!(err, FrameError::TruncatedHeader { received } if received == len),
                "len {len}: {err:?}"
            );
            assert!(err.is_protocol());
        }
    }

    #[test]
    fn truncated_header_byte_by_byte() {
        let mut source = ByteByByteReader {
            bytes: vec![0, 0],
            pos: 0,
        };
        let err = read_frame(&mut source).unwrap_err();
        assert!(matches!(err, FrameError::TruncatedHeader { received: 2 }));
    }

    #[test]
    fn truncated_body() {
        let mut partial = BytesMut::new();
        partial.put_u32(16);
        partial.put_slice(b"only-part");

        let mut source = Cursor::new(partial.to_vec());
        let err = read_frame(&mut source).unwrap_err();
        assert!(matches!(
            err,
            FrameError::TruncatedBody {
                expected: 16,
                received: 9
            }
        ));
        assert!(err.is_protocol());
    }

    #[test]
    fn oversized_frame_rejected_before_body() {
        let mut header = BytesMut::new();
        header.put_u32(1024);

        let mut source = Cursor::new(header.to_vec());
        let err = read_frame_with_limit(&mut source, 16).unwrap_err();
        assert!(matches!(
            err,
            FrameError::PayloadTooLarge {
                size: 1024,
                max: 16
            }
        ));
    }

    #[test]
    fn interrupted_read_retries() {
        let mut source = InterruptedThenData {
            interrupted: false,
            inner: Cursor::new(wire(b"ok")),
        };
        let payload = read_frame(&mut source).unwrap();
        assert_eq!(payload.as_ref(), b"ok");
    }

    #[test]
    fn other_io_errors_propagate() {
        let mut source = FailingReader;
        let err = read_frame(&mut source).unwrap_err();
        assert!(matches!(err, FrameError::Io(e) if e.kind() == ErrorKind::ConnectionReset));
    }

    #[test]
    fn roundtrip_over_socket_pair() {
        let (left, mut right) = std::os::unix::net::UnixStream::pair().unwrap();
        let writer = std::thread::spawn(move || {
            let mut left = left;
            crate::writer::write_frame(&mut left, b"ping").unwrap();
        });

        let payload = read_frame(&mut right).unwrap();
        assert_eq!(payload.as_ref(), b"ping");
        writer.join().unwrap();
    }

    struct CountingReader {
        inner: Cursor<Vec<u8>>,
        calls: usize,
    }

    impl Read for CountingReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            self.calls += 1;
            self.inner.read(buf)
        }
    }

    #[derive(Debug)]
    struct ByteByByteReader {
        bytes: Vec<u8>,
        pos: usize,
    }

    impl Read for ByteByByteReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.pos >= self.bytes.len() || buf.is_empty() {
                return Ok(0);
            }

            buf[0] = self.bytes[self.pos];
            self.pos += 1;
            Ok(1)
        }
    }

    struct InterruptedThenData {
        interrupted: bool,
        inner: Cursor<Vec<u8>>,
    }

    impl Read for InterruptedThenData {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(std::io::Error::from(ErrorKind::Interrupted));
            }
            self.inner.read(buf)
        }
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(ErrorKind::ConnectionReset))
        }
    }
}
