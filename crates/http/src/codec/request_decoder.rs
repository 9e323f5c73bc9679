//! HTTP request decoder module
//!
//! Drives one request through its decoding states, in strict order:
//!
//! 1. Request line and headers, through [`HeaderDecoder`]
//! 2. The POST body, if one was declared, through [`LengthDecoder`]
//!
//! End of stream is terminal. A stream that ends before sending anything decodes to
//! nothing; a stream that ends inside the head or inside a declared body is an error.
//!
//! # Example
//!
//! ```no_run
//! use plain_http::codec::RequestDecoder;
//! use tokio_util::codec::Decoder;
//! use bytes::BytesMut;
//!
//! let mut decoder = RequestDecoder::new();
//! let mut buffer = BytesMut::from(&b"GET / HTTP/1.0\r\n\r\n"[..]);
//! let result = decoder.decode(&mut buffer);
//! ```

use crate::codec::body::LengthDecoder;
use crate::codec::header::HeaderDecoder;
use crate::protocol::{Message, ParseError, PayloadItem, PayloadSize, RequestHead};
use bytes::BytesMut;
use tokio_util::codec::Decoder;

/// A decoder for HTTP requests that handles both the head and the payload
///
/// # State Machine
///
/// The decoder maintains its state through the `payload_decoder` field:
/// - `None`: Currently parsing the request head
/// - `Some(LengthDecoder)`: Currently reading a POST body
#[derive(Debug, Default)]
pub struct RequestDecoder {
    header_decoder: HeaderDecoder,
    payload_decoder: Option<LengthDecoder>,
}

impl RequestDecoder {
    /// Creates a new `RequestDecoder` instance
    pub fn new() -> Self {
        Default::default()
    }

    fn decode_payload(&mut self, item: Option<PayloadItem>) -> Option<Message<(RequestHead, PayloadSize)>> {
        match item {
            Some(item @ PayloadItem::Chunk(_)) => Some(Message::Payload(item)),
            Some(item @ PayloadItem::Eof) => {
                // no need payload decoder in this request now
                self.payload_decoder.take();
                Some(Message::Payload(item))
            }
            None => None,
        }
    }

    fn decode_head(&mut self, head: Option<(RequestHead, PayloadSize)>) -> Option<Message<(RequestHead, PayloadSize)>> {
        let (head, payload_size) = head?;
        if let PayloadSize::Length(length) = payload_size {
            self.payload_decoder = Some(LengthDecoder::new(length));
        }
        Some(Message::Header((head, payload_size)))
    }
}

impl Decoder for RequestDecoder {
    type Item = Message<(RequestHead, PayloadSize)>;
    type Error = ParseError;

    /// Attempts to decode an HTTP request from the provided buffer
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Message::Header(_)))`: Successfully decoded the request head
    /// - `Ok(Some(Message::Payload(_)))`: Successfully decoded a payload chunk or its end
    /// - `Ok(None)`: Need more data to proceed
    /// - `Err(_)`: Encountered a parsing error
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let Some(payload_decoder) = &mut self.payload_decoder {
            let item = payload_decoder.decode(src)?;
            return Ok(self.decode_payload(item));
        }

        let head = self.header_decoder.decode(src)?;
        Ok(self.decode_head(head))
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let Some(payload_decoder) = &mut self.payload_decoder {
            let item = payload_decoder.decode_eof(src)?;
            return Ok(self.decode_payload(item));
        }

        match self.header_decoder.decode(src)? {
            Some(head) => Ok(self.decode_head(Some(head))),
            None if src.is_empty() && self.header_decoder.is_idle() => Ok(None),
            None => Err(ParseError::UnexpectedEof),
        }
    }
}
