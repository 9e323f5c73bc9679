//! Request payload decoding.
//!
//! HTTP/1.0 request bodies here are always delimited by `Content-Length`, so the only
//! payload decoder is [`LengthDecoder`].

mod length_decoder;

pub use length_decoder::LengthDecoder;
