//! HTTP connection handling module
//!
//! - [`HttpConnection`]: owns one accepted connection, parses its request, dispatches to the
//!   handler and closes the connection
//! - [`ResponseWriter`]: the handle a handler uses to write the status line and body

mod http_connection;
mod response_writer;

pub use http_connection::HttpConnection;
pub use response_writer::ResponseWriter;
