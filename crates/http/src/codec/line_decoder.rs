//! Line decoder for the request head.
//!
//! A line ends at `\n`, which is not part of the returned text. Every `\r` is dropped,
//! wherever it appears in the line, and never ends a line on its own. Each byte becomes one
//! `char` (ISO-8859-1), so decoding never fails on non UTF-8 input.

use bytes::BytesMut;
use tokio_util::codec::Decoder;

use crate::protocol::ParseError;

/// Splits the request head into lines.
///
/// The decoder remembers how far it has already searched for a newline, so feeding a long
/// line in small pieces doesn't rescan the buffer from the start each time.
#[derive(Debug, Default, Clone)]
pub struct LineDecoder {
    next_index: usize,
}

impl LineDecoder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Decoder for LineDecoder {
    type Item = String;
    type Error = ParseError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let start = self.next_index.min(src.len());
        match src[start..].iter().position(|b| *b == b'\n') {
            Some(offset) => {
                let newline_index = start + offset;
                self.next_index = 0;
                let line = src.split_to(newline_index + 1);
                Ok(Some(latin1_text(&line[..newline_index])))
            }
            None => {
                self.next_index = src.len();
                Ok(None)
            }
        }
    }
}

fn latin1_text(bytes: &[u8]) -> String {
    bytes.iter().filter(|b| **b != b'\r').map(|b| char::from(*b)).collect()
}
