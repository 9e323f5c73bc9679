//! Response head encoder.
//!
//! Serializes a [`ResponseHead`] into an HTTP/1.0 status line, its header lines and the
//! empty line that ends the head. Header names are written as given.

use std::io;
use std::io::Write;

use bytes::{BufMut, BytesMut};
use tokio_util::codec::Encoder;

use crate::protocol::{ResponseHead, SendError};

/// Initial buffer size allocated for header serialization
const INIT_HEADER_SIZE: usize = 256;

/// Encoder for HTTP response heads implementing the [`Encoder`] trait.
#[derive(Debug, Default)]
pub struct HeaderEncoder;

impl Encoder<ResponseHead> for HeaderEncoder {
    type Error = SendError;

    fn encode(&mut self, head: ResponseHead, dst: &mut BytesMut) -> Result<(), Self::Error> {
        dst.reserve(INIT_HEADER_SIZE);

        let status = head.status();
        write!(FastWrite(dst), "HTTP/1.0 {} {}\r\n", status.as_str(), status.canonical_reason().unwrap_or("Unknown"))?;

        for (name, value) in head.headers() {
            dst.put_slice(name.as_bytes());
            dst.put_slice(b": ");
            dst.put_slice(value.as_bytes());
            dst.put_slice(b"\r\n");
        }
        dst.put_slice(b"\r\n");
        Ok(())
    }
}

/// Adapter so `write!` can format straight into a [`BytesMut`].
struct FastWrite<'a>(&'a mut BytesMut);

impl Write for FastWrite<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.put_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
