//! HTTP request body handling.
//!
//! POST bodies are read completely by the connection before the handler runs, bounded by
//! the declared `Content-Length`. [`ReqBody`] hands the buffered bytes to the handler, either
//! directly or through the `http_body::Body` interface.

mod req_body;

pub use req_body::ReqBody;
