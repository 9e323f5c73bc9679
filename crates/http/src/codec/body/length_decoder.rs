//! Decoder for request bodies with a Content-Length header.

use std::cmp;

use crate::protocol::{ParseError, PayloadItem};
use bytes::BytesMut;
use tokio_util::codec::Decoder;

/// A decoder for handling HTTP messages with a known content length.
///
/// The decoder tracks the remaining bytes to be read and ensures the total
/// payload matches the specified content length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthDecoder {
    /// The number of bytes remaining to be read from the payload
    length: u64,
}

impl LengthDecoder {
    /// Creates a new LengthDecoder instance.
    ///
    /// # Arguments
    /// * `length` - The total content length to decode, specified by Content-Length header
    pub fn new(length: u64) -> Self {
        Self { length }
    }

    /// Returns the number of payload bytes not yet decoded.
    pub fn remaining(&self) -> u64 {
        self.length
    }
}

impl Decoder for LengthDecoder {
    type Item = PayloadItem;
    type Error = ParseError;

    /// Decodes bytes from the input buffer according to the content length.
    ///
    /// # Returns
    /// * `Ok(Some(PayloadItem::Eof))` when all bytes have been read
    /// * `Ok(Some(PayloadItem::Chunk(bytes)))` when a chunk is successfully decoded
    /// * `Ok(None)` when more data is needed
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if self.length == 0 {
            return Ok(Some(PayloadItem::Eof));
        }

        if src.is_empty() {
            return Ok(None);
        }

        // Read the minimum of remaining length and available bytes
        let len = cmp::min(self.length, src.len() as u64);
        let bytes = src.split_to(len as usize).freeze();

        self.length -= bytes.len() as u64;
        Ok(Some(PayloadItem::Chunk(bytes)))
    }

    /// At end of stream a body that is still short means the peer went away mid-body.
    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.decode(src)? {
            Some(item) => Ok(Some(item)),
            None => Err(ParseError::client_disconnected(self.length)),
        }
    }
}
