use std::io;
use std::pin::Pin;
use std::task::{Context, Poll, ready};

use bytes::{Buf, BytesMut};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio_util::codec::Encoder;

use crate::codec::ResponseEncoder;
use crate::protocol::{Message, PayloadItem, ResponseHead, SendError};

/// Buffered bytes past this size are pushed to the socket before more body is accepted
const FLUSH_THRESHOLD: usize = 8 * 1024;

/// The response side of a connection, handed to the [`Handler`](crate::handler::Handler).
///
/// A handler writes exactly one status line, through [`write_success`](Self::write_success)
/// or [`write_failure`](Self::write_failure), and then any number of raw body bytes. There is
/// no length framing: the connection is closed once the handler returns.
///
/// Output is buffered and flushed by the connection when the handler returns, or earlier
/// once the buffer grows past 8KB. `ResponseWriter` also implements [`AsyncWrite`], so a
/// handler can stream into it with `tokio::io::copy` and friends.
#[derive(Debug)]
pub struct ResponseWriter<W> {
    writer: W,
    buffer: BytesMut,
    encoder: ResponseEncoder,
}

impl<W> ResponseWriter<W> {
    pub fn with_capacity(writer: W, buffer_size: usize) -> Self {
        Self { writer, buffer: BytesMut::with_capacity(buffer_size), encoder: ResponseEncoder::new() }
    }

    /// Returns true once a status line has been written.
    #[inline]
    pub fn is_head_written(&self) -> bool {
        self.encoder.is_head_written()
    }

    #[inline]
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Writes an arbitrary response head. Fails if a status line was already written.
    pub fn write_head(&mut self, head: ResponseHead) -> Result<(), SendError> {
        self.encoder.encode(Message::<_, &[u8]>::Header(head), &mut self.buffer)
    }

    /// Writes `HTTP/1.0 200 OK`, `Content-Type`, `Connection: close` and the blank line.
    pub fn write_success(&mut self, content_type: &str) -> Result<(), SendError> {
        self.write_head(ResponseHead::success(content_type))
    }

    /// [`write_success`](Self::write_success) with `text/html`.
    pub fn write_html_success(&mut self) -> Result<(), SendError> {
        self.write_success(mime::TEXT_HTML.essence_str())
    }

    /// Writes `HTTP/1.0 404 Not Found`, `Connection: close` and the blank line.
    pub fn write_failure(&mut self) -> Result<(), SendError> {
        self.write_head(ResponseHead::failure())
    }

    fn encode_body(&mut self, data: &[u8]) -> Result<(), SendError> {
        self.encoder.encode(Message::<ResponseHead, _>::Payload(PayloadItem::Chunk(data)), &mut self.buffer)
    }
}

impl<W> ResponseWriter<W>
where
    W: AsyncWrite + Unpin,
{
    /// Appends raw body bytes. Fails if no status line was written yet.
    pub async fn write_body<B: AsRef<[u8]>>(&mut self, data: B) -> Result<(), SendError> {
        self.encode_body(data.as_ref())?;
        if self.buffer.len() >= FLUSH_THRESHOLD {
            self.flush().await?;
        }
        Ok(())
    }

    pub async fn flush(&mut self) -> Result<(), SendError> {
        if !self.buffer.is_empty() {
            self.writer.write_all(self.buffer.as_ref()).await?;
            self.buffer.clear();
        }
        Ok(self.writer.flush().await?)
    }

    /// Flushes everything and shuts the write side down.
    pub(crate) async fn close(&mut self) -> Result<(), SendError> {
        self.flush().await?;
        Ok(self.writer.shutdown().await?)
    }

    fn poll_drain(&mut self, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        while !self.buffer.is_empty() {
            let n = ready!(Pin::new(&mut self.writer).poll_write(cx, self.buffer.as_ref()))?;
            if n == 0 {
                return Poll::Ready(Err(io::ErrorKind::WriteZero.into()));
            }
            self.buffer.advance(n);
        }
        Poll::Ready(Ok(()))
    }
}

impl<W> AsyncWrite for ResponseWriter<W>
where
    W: AsyncWrite + Unpin,
{
    fn poll_write(self: Pin<&mut Self>, cx: &mut Context<'_>, buf: &[u8]) -> Poll<io::Result<usize>> {
        let this = self.get_mut();
        if this.buffer.len() >= FLUSH_THRESHOLD {
            ready!(this.poll_drain(cx))?;
        }
        this.encode_body(buf)?;
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        ready!(this.poll_drain(cx))?;
        Pin::new(&mut this.writer).poll_flush(cx)
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        ready!(this.poll_drain(cx))?;
        Pin::new(&mut this.writer).poll_shutdown(cx)
    }
}
