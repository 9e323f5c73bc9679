//! The application side of the server.
//!
//! The protocol core knows nothing about what a request means. It parses the request and
//! calls one of the two callbacks of a [`Handler`], injected into the
//! [`Server`](crate::server::Server) or [`HttpConnection`](crate::connection::HttpConnection)
//! as an `Arc`. The handler answers through the [`ResponseWriter`] it is given.

use std::error::Error;

use async_trait::async_trait;
use tokio::io::AsyncWrite;

use crate::connection::ResponseWriter;
use crate::protocol::RequestHead;
use crate::protocol::body::ReqBody;

/// The two request callbacks an application implements.
///
/// A callback should write exactly one status line, with
/// [`ResponseWriter::write_success`] or [`ResponseWriter::write_failure`], before any body
/// bytes. If it returns an error before writing a status line, the connection answers with
/// the failure response; after that, whatever was written is sent as is.
#[async_trait]
pub trait Handler: Send + Sync {
    type Error: Into<Box<dyn Error + Send + Sync>> + Send;

    /// Called for `GET` requests.
    async fn handle_get<W>(&self, request: &RequestHead, response: &mut ResponseWriter<W>) -> Result<(), Self::Error>
    where
        W: AsyncWrite + Unpin + Send;

    /// Called for `POST` requests, once the whole body declared by `Content-Length` was read.
    async fn handle_post<W>(&self, request: &RequestHead, body: ReqBody, response: &mut ResponseWriter<W>) -> Result<(), Self::Error>
    where
        W: AsyncWrite + Unpin + Send;
}
