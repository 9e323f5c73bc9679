use std::sync::Arc;

use bytes::BytesMut;
use futures::StreamExt;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::FramedRead;
use tracing::{debug, error, info, trace, warn};

use crate::codec::RequestDecoder;
use crate::connection::ResponseWriter;
use crate::handler::Handler;
use crate::protocol::body::ReqBody;
use crate::protocol::{HttpError, Message, ParseError, PayloadItem, PayloadSize, RequestKind};

const READ_BUFFER_SIZE: usize = 8 * 1024;
const WRITE_BUFFER_SIZE: usize = 8 * 1024;

/// One accepted connection, processed end to end.
///
/// `HttpConnection` runs a single request through its states in strict order, never going
/// back and stopping at the first failure:
///
/// 1. Read the request line and headers
/// 2. Dispatch on the method: `GET` calls [`Handler::handle_get`], `POST` reads the body and
///    calls [`Handler::handle_post`], any other method calls nothing and writes nothing
/// 3. Flush the response and shut the connection down
///
/// A failure while reading the request, or an error returned by the handler before it wrote
/// a status line, is answered with the failure response. The connection is closed whatever
/// the outcome.
///
/// # Type Parameters
///
/// * `R`: The async readable stream type
/// * `W`: The async writable stream type
#[derive(Debug)]
pub struct HttpConnection<R, W> {
    framed_read: FramedRead<R, RequestDecoder>,
    writer: ResponseWriter<W>,
}

impl<R, W> HttpConnection<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            framed_read: FramedRead::with_capacity(reader, RequestDecoder::new(), READ_BUFFER_SIZE),
            writer: ResponseWriter::with_capacity(writer, WRITE_BUFFER_SIZE),
        }
    }

    pub async fn process<H>(mut self, handler: Arc<H>) -> Result<(), HttpError>
    where
        H: Handler,
    {
        let result = self.do_process(handler.as_ref()).await;

        if let Err(e) = &result {
            error!(cause = %e, "failed to process request");
            if !self.writer.is_head_written()
                && let Err(e) = self.writer.write_failure()
            {
                warn!(cause = %e, "can't write failure response");
            }
        }

        if let Err(e) = self.writer.close().await {
            if result.is_ok() {
                return Err(e.into());
            }
            debug!(cause = %e, "can't flush failure response");
        }

        result
    }

    async fn do_process<H>(&mut self, handler: &H) -> Result<(), HttpError>
    where
        H: Handler,
    {
        let (head, payload_size) = match self.framed_read.next().await {
            Some(Ok(Message::Header(header))) => header,
            Some(Ok(Message::Payload(_))) => {
                return Err(ParseError::invalid_body("need request head while receive body").into());
            }
            Some(Err(e)) => return Err(e.into()),
            None => {
                info!("cant read request, peer closed the connection");
                return Ok(());
            }
        };

        info!(method = head.method(), target = head.target(), version = head.version(), "starting request");

        match head.kind() {
            RequestKind::Get => handler.handle_get(&head, &mut self.writer).await.map_err(HttpError::handler),
            RequestKind::Post => {
                let body = self.read_body(payload_size).await?;
                handler.handle_post(&head, body, &mut self.writer).await.map_err(HttpError::handler)
            }
            RequestKind::Other => {
                warn!(method = head.method(), "no handler for method, closing without response");
                Ok(())
            }
        }
    }

    async fn read_body(&mut self, payload_size: PayloadSize) -> Result<ReqBody, ParseError> {
        let PayloadSize::Length(length) = payload_size else {
            return Ok(ReqBody::empty());
        };

        let mut body = body_buffer(length);
        loop {
            match self.framed_read.next().await {
                Some(Ok(Message::Payload(PayloadItem::Chunk(bytes)))) => {
                    body.extend_from_slice(&bytes);
                    trace!(read = bytes.len(), to_read = length - body.len() as u64, "read body chunk");
                }
                Some(Ok(Message::Payload(PayloadItem::Eof))) => break,
                Some(Ok(Message::Header(_))) => return Err(ParseError::invalid_body("receive request head while reading body")),
                Some(Err(e)) => return Err(e),
                None => return Err(ParseError::client_disconnected(length - body.len() as u64)),
            }
        }

        debug!(length, "read request body");
        Ok(ReqBody::from(body.freeze()))
    }
}

fn body_buffer(length: u64) -> BytesMut {
    BytesMut::with_capacity(usize::try_from(length).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{RequestHead, SendError};
    use async_trait::async_trait;
    use indoc::indoc;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    struct RecordingHandler {
        gets: AtomicUsize,
        posts: AtomicUsize,
        bodies: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Handler for RecordingHandler {
        type Error = SendError;

        async fn handle_get<W>(&self, request: &RequestHead, response: &mut ResponseWriter<W>) -> Result<(), Self::Error>
        where
            W: AsyncWrite + Unpin + Send,
        {
            self.gets.fetch_add(1, Ordering::SeqCst);
            response.write_html_success()?;
            response.write_body(format!("url : {}", request.target())).await
        }

        async fn handle_post<W>(&self, _request: &RequestHead, body: ReqBody, response: &mut ResponseWriter<W>) -> Result<(), Self::Error>
        where
            W: AsyncWrite + Unpin + Send,
        {
            self.posts.fetch_add(1, Ordering::SeqCst);
            let data = body.to_string_lossy().into_owned();
            self.bodies.lock().unwrap().push(data.clone());
            response.write_html_success()?;
            response.write_body(format!("postbody: <pre>{data}</pre>")).await
        }
    }

    /// Fails before writing anything on GET, after writing a status line on POST.
    #[derive(Debug)]
    struct FailingHandler;

    #[async_trait]
    impl Handler for FailingHandler {
        type Error = Box<dyn std::error::Error + Send + Sync>;

        async fn handle_get<W>(&self, _request: &RequestHead, _response: &mut ResponseWriter<W>) -> Result<(), Self::Error>
        where
            W: AsyncWrite + Unpin + Send,
        {
            Err("file missing".into())
        }

        async fn handle_post<W>(&self, _request: &RequestHead, _body: ReqBody, response: &mut ResponseWriter<W>) -> Result<(), Self::Error>
        where
            W: AsyncWrite + Unpin + Send,
        {
            response.write_html_success()?;
            response.write_body("partial").await?;
            Err("gave up half way".into())
        }
    }

    async fn run<H: Handler>(input: &[u8], handler: Arc<H>) -> (Result<(), HttpError>, String) {
        let mut output = Vec::new();
        let result = HttpConnection::new(input, &mut output).process(handler).await;
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn body_buffer_has_declared_capacity() {
        assert_eq!(body_buffer(7).capacity(), 7);
        assert_eq!(body_buffer(4096).capacity(), 4096);
        assert_eq!(body_buffer(0).capacity(), 0);
    }

    #[tokio::test]
    async fn get_invokes_only_get_callback() {
        let handler = Arc::new(RecordingHandler::default());
        let (result, output) = run(b"GET /hello HTTP/1.0\r\n\r\n", handler.clone()).await;

        assert!(result.is_ok());
        assert_eq!(output, "HTTP/1.0 200 OK\r\nContent-Type: text/html\r\nConnection: close\r\n\r\nurl : /hello");
        assert_eq!(handler.gets.load(Ordering::SeqCst), 1);
        assert_eq!(handler.posts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn post_reads_body_then_invokes_post_callback() {
        let handler = Arc::new(RecordingHandler::default());
        let request = indoc! {"
            POST /form HTTP/1.0
            Content-Length: 7

            foo=bar"};
        let (result, output) = run(request.as_bytes(), handler.clone()).await;

        assert!(result.is_ok());
        assert!(output.starts_with("HTTP/1.0 200 OK\r\n"));
        assert!(output.ends_with("postbody: <pre>foo=bar</pre>"));
        assert_eq!(handler.gets.load(Ordering::SeqCst), 0);
        assert_eq!(handler.posts.load(Ordering::SeqCst), 1);
        assert_eq!(*handler.bodies.lock().unwrap(), vec!["foo=bar".to_string()]);
    }

    #[tokio::test]
    async fn post_reads_exactly_content_length() {
        let handler = Arc::new(RecordingHandler::default());
        let (result, _) = run(b"POST /form HTTP/1.0\r\nContent-Length: 5\r\n\r\nhelloEXTRA", handler.clone()).await;

        assert!(result.is_ok());
        assert_eq!(*handler.bodies.lock().unwrap(), vec!["hello".to_string()]);
    }

    #[tokio::test]
    async fn post_without_content_length_has_empty_body() {
        let handler = Arc::new(RecordingHandler::default());
        let (result, _) = run(b"POST /form HTTP/1.0\r\n\r\nignored", handler.clone()).await;

        assert!(result.is_ok());
        assert_eq!(*handler.bodies.lock().unwrap(), vec![String::new()]);
    }

    #[tokio::test]
    async fn other_method_writes_nothing() {
        let handler = Arc::new(RecordingHandler::default());
        let (result, output) = run(b"PUT /thing HTTP/1.0\r\n\r\n", handler.clone()).await;

        assert!(result.is_ok());
        assert!(output.is_empty());
        assert_eq!(handler.gets.load(Ordering::SeqCst), 0);
        assert_eq!(handler.posts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn malformed_request_gets_failure_response() {
        let handler = Arc::new(RecordingHandler::default());
        let (result, output) = run(b"BADREQUEST\r\n\r\n", handler.clone()).await;

        assert!(matches!(result, Err(HttpError::RequestError { source: ParseError::MalformedRequest { .. } })));
        assert_eq!(output, "HTTP/1.0 404 Not Found\r\nConnection: close\r\n\r\n");
        assert_eq!(handler.gets.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn malformed_header_gets_failure_response() {
        let (result, output) = run(b"GET / HTTP/1.0\r\nbroken\r\n\r\n", Arc::new(RecordingHandler::default())).await;

        assert!(matches!(result, Err(HttpError::RequestError { source: ParseError::MalformedHeader { .. } })));
        assert_eq!(output, "HTTP/1.0 404 Not Found\r\nConnection: close\r\n\r\n");
    }

    #[tokio::test]
    async fn payload_too_large_fails_before_body_read() {
        let handler = Arc::new(RecordingHandler::default());
        let (result, output) = run(b"POST /form HTTP/1.0\r\nContent-Length: 20000000\r\n\r\nabc", handler.clone()).await;

        assert!(matches!(result, Err(HttpError::RequestError { source: ParseError::PayloadTooLarge { .. } })));
        assert_eq!(output, "HTTP/1.0 404 Not Found\r\nConnection: close\r\n\r\n");
        assert_eq!(handler.posts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn disconnect_during_body() {
        let handler = Arc::new(RecordingHandler::default());
        let (result, output) = run(b"POST /form HTTP/1.0\r\nContent-Length: 10\r\n\r\nabc", handler.clone()).await;

        assert!(matches!(
            result,
            Err(HttpError::RequestError { source: ParseError::ClientDisconnected { remaining: 7 } })
        ));
        assert_eq!(output, "HTTP/1.0 404 Not Found\r\nConnection: close\r\n\r\n");
        assert_eq!(handler.posts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_connection_closes_silently() {
        let (result, output) = run(b"", Arc::new(RecordingHandler::default())).await;

        assert!(result.is_ok());
        assert!(output.is_empty());
    }

    #[tokio::test]
    async fn truncated_head_gets_failure_response() {
        let (result, output) = run(b"GET / HTTP/1.0\r\nHost: a\r\n", Arc::new(RecordingHandler::default())).await;

        assert!(matches!(result, Err(HttpError::RequestError { source: ParseError::UnexpectedEof })));
        assert_eq!(output, "HTTP/1.0 404 Not Found\r\nConnection: close\r\n\r\n");
    }

    #[tokio::test]
    async fn handler_error_before_status_line_gets_failure_response() {
        let (result, output) = run(b"GET /missing.mp3 HTTP/1.0\r\n\r\n", Arc::new(FailingHandler)).await;

        assert!(matches!(result, Err(HttpError::HandlerError { .. })));
        assert_eq!(output, "HTTP/1.0 404 Not Found\r\nConnection: close\r\n\r\n");
    }

    #[tokio::test]
    async fn handler_error_after_status_line_keeps_partial_response() {
        let (result, output) = run(b"POST /form HTTP/1.0\r\n\r\n", Arc::new(FailingHandler)).await;

        assert!(matches!(result, Err(HttpError::HandlerError { .. })));
        assert_eq!(output, "HTTP/1.0 200 OK\r\nContent-Type: text/html\r\nConnection: close\r\n\r\npartial");
    }
}
