//! Request head decoding and response head encoding.
//!
//! - [`HeaderDecoder`]: request line and header block into a [`RequestHead`](crate::protocol::RequestHead)
//! - [`HeaderEncoder`]: [`ResponseHead`](crate::protocol::ResponseHead) into a status line and headers

mod header_decoder;
mod header_encoder;

pub use header_decoder::HeaderDecoder;
pub use header_decoder::{MAX_HEADER_BYTES, MAX_PAYLOAD_BYTES};
pub use header_encoder::HeaderEncoder;
