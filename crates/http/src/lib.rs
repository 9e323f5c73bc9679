//! A minimal HTTP/1.0 server core.
//!
//! Accepts TCP connections, parses one request per connection, hands `GET` and `POST`
//! requests to an application [`handler::Handler`], writes back a status line, a couple of
//! headers and a raw body, and closes the connection.
//!
//! # Example
//!
//! ```no_run
//! use std::error::Error;
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use tokio::io::AsyncWrite;
//! use plain_http::connection::ResponseWriter;
//! use plain_http::handler::Handler;
//! use plain_http::protocol::RequestHead;
//! use plain_http::protocol::body::ReqBody;
//!
//! struct Hello;
//!
//! #[async_trait]
//! impl Handler for Hello {
//!     type Error = Box<dyn Error + Send + Sync>;
//!
//!     async fn handle_get<W>(&self, request: &RequestHead, response: &mut ResponseWriter<W>) -> Result<(), Self::Error>
//!     where
//!         W: AsyncWrite + Unpin + Send,
//!     {
//!         response.write_html_success()?;
//!         response.write_body(format!("<h1>hello {}</h1>", request.target())).await?;
//!         Ok(())
//!     }
//!
//!     async fn handle_post<W>(&self, _request: &RequestHead, body: ReqBody, response: &mut ResponseWriter<W>) -> Result<(), Self::Error>
//!     where
//!         W: AsyncWrite + Unpin + Send,
//!     {
//!         response.write_success("text/plain")?;
//!         response.write_body(body.as_bytes()).await?;
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     if let Err(e) = plain_http::server::start(8080, Arc::new(Hello)).await {
//!         eprintln!("{e}");
//!     }
//! }
//! ```
//!
//! # Architecture
//!
//! - [`server`]: the listener, one tokio task per accepted connection
//! - [`connection`]: the per-connection state machine and the response writer
//! - [`codec`]: request line, header and body decoding, response head encoding
//! - [`protocol`]: request/response types and errors
//! - [`handler`]: the two-callback application contract
//!
//! # Protocol
//!
//! - HTTP/1.0 only: no keep-alive, no chunked encoding, no pipelining
//! - No TLS
//! - Header names are case-sensitive and single-valued, the last occurrence wins
//! - Request bodies are read for `POST` only, bounded by `Content-Length` (at most 10MB)
//! - Every response carries `Connection: close`; the body is unframed
//!
//! # Error Handling
//!
//! - [`protocol::HttpError`]: Top-level per-connection error type
//! - [`protocol::ParseError`]: Request parsing errors
//! - [`protocol::SendError`]: Response writing errors
//! - [`protocol::ServerError`]: The listener could not bind

pub mod codec;
pub mod connection;
pub mod handler;
pub mod protocol;
pub mod server;

mod utils;
pub(crate) use utils::ensure;
