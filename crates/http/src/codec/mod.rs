//! HTTP codec module for encoding and decoding HTTP/1.0 messages
//!
//! - Request handling:
//!   - [`RequestDecoder`]: decodes the request head, then a `Content-Length` bounded body
//!   - [`LineDecoder`]: the line reader shared by the request line and the headers
//!   - Head parsing via the `header` module, payload decoding via the `body` module
//!
//! - Response handling:
//!   - [`ResponseEncoder`]: encodes the status line and headers once, then raw body bytes
//!
//! # Example
//!
//! ```no_run
//! use plain_http::codec::{RequestDecoder, ResponseEncoder};
//! use tokio_util::codec::{Decoder, Encoder};
//! use bytes::BytesMut;
//!
//! // Decode incoming request
//! let mut decoder = RequestDecoder::new();
//! let mut request_buffer = BytesMut::new();
//! let request = decoder.decode(&mut request_buffer);
//!
//! // Encode outgoing response
//! let mut encoder = ResponseEncoder::new();
//! let mut response_buffer = BytesMut::new();
//! // ... encode response ...
//! ```

mod body;
mod header;
mod line_decoder;
mod request_decoder;
mod response_encoder;

pub use body::LengthDecoder;
pub use header::{HeaderDecoder, HeaderEncoder, MAX_HEADER_BYTES, MAX_PAYLOAD_BYTES};
pub use line_decoder::LineDecoder;
pub use request_decoder::RequestDecoder;
pub use response_encoder::ResponseEncoder;
