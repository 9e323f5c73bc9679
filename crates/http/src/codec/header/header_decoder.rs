//! Request head decoder.
//!
//! Parses the request line and the header block that follows it, one line at a time, using
//! [`LineDecoder`]. State survives between calls, so the head may arrive in any number of
//! pieces.
//!
//! # Request line
//!
//! The first line is split on single spaces and must yield exactly three tokens: method,
//! target and version. Anything else, including an empty line or doubled spaces, is
//! [`ParseError::MalformedRequest`].
//!
//! # Headers
//!
//! Every following non-empty line must contain a `:`. The name is everything before the
//! first `:`; the value is everything after it with leading spaces (not tabs) removed.
//! Trailing whitespace is kept. A repeated name overwrites the earlier value. An empty line
//! ends the head.
//!
//! # Limits
//!
//! - Maximum size of the whole head: 64KB
//! - Maximum declared POST body: 10MB

use std::mem;

use bytes::BytesMut;
use tokio_util::codec::Decoder;
use tracing::{debug, trace};

use crate::codec::LineDecoder;
use crate::ensure;
use crate::protocol::{Headers, ParseError, PayloadSize, RequestHead, RequestKind};

/// Maximum size in bytes allowed for the request line and headers together
pub const MAX_HEADER_BYTES: usize = 64 * 1024;

/// Maximum `Content-Length` accepted for a POST body
pub const MAX_PAYLOAD_BYTES: u64 = 10 * 1024 * 1024;

const CONTENT_LENGTH: &str = "Content-Length";

/// Decoder for the request head implementing the [`Decoder`] trait.
///
/// Yields the parsed [`RequestHead`] together with the [`PayloadSize`] of the body that
/// follows it.
#[derive(Debug, Default)]
pub struct HeaderDecoder {
    line_decoder: LineDecoder,
    request_line: Option<RequestLine>,
    headers: Headers,
    consumed: usize,
}

#[derive(Debug)]
struct RequestLine {
    method: String,
    target: String,
    version: String,
}

impl HeaderDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no byte of a request head has been consumed yet.
    pub fn is_idle(&self) -> bool {
        self.consumed == 0
    }
}

impl Decoder for HeaderDecoder {
    type Item = (RequestHead, PayloadSize);
    type Error = ParseError;

    /// Attempts to decode a complete request head from the provided buffer.
    ///
    /// # Returns
    ///
    /// - `Ok(Some((head, payload_size)))` once the empty line ending the headers was read
    /// - `Ok(None)` if more data is needed
    /// - `Err(ParseError)` on a malformed request line or header, an oversized head, or an
    ///   invalid or oversized `Content-Length` on a POST request
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        loop {
            let before = src.len();
            let Some(line) = self.line_decoder.decode(src)? else {
                let pending = self.consumed + src.len();
                ensure!(pending <= MAX_HEADER_BYTES, ParseError::too_large_header(pending, MAX_HEADER_BYTES));
                return Ok(None);
            };

            self.consumed += before - src.len();
            ensure!(self.consumed <= MAX_HEADER_BYTES, ParseError::too_large_header(self.consumed, MAX_HEADER_BYTES));

            let Some(request_line) = self.request_line.take() else {
                let request_line = parse_request_line(&line)?;
                trace!(method = %request_line.method, target = %request_line.target, "parsed request line");
                self.request_line = Some(request_line);
                continue;
            };

            if line.is_empty() {
                let headers = mem::take(&mut self.headers);
                self.consumed = 0;

                let RequestLine { method, target, version } = request_line;
                let head = RequestHead::new(method, target, version, headers);
                trace!(header_count = head.headers().len(), "parsed request head");

                let payload_size = parse_payload(&head)?;
                return Ok(Some((head, payload_size)));
            }

            self.request_line = Some(request_line);
            let (name, value) = parse_header_line(&line)?;
            debug!(name, value, "header");
            self.headers.insert(name, value);
        }
    }
}

fn parse_request_line(line: &str) -> Result<RequestLine, ParseError> {
    let tokens = line.split(' ').collect::<Vec<_>>();
    let [method, target, version] = tokens.as_slice() else {
        return Err(ParseError::malformed_request(line));
    };

    Ok(RequestLine { method: method.to_ascii_uppercase(), target: (*target).to_owned(), version: (*version).to_owned() })
}

fn parse_header_line(line: &str) -> Result<(&str, &str), ParseError> {
    let (name, value) = line.split_once(':').ok_or_else(|| ParseError::malformed_header(line))?;
    Ok((name, value.trim_start_matches(' ')))
}

/// Determines the size of the body that follows the head.
///
/// Only POST requests carry a body. Without a `Content-Length` header the body is empty;
/// the stream is never read until close. The header name is matched case-sensitively.
///
/// # Errors
///
/// Returns `ParseError` if:
/// - the `Content-Length` value is not a non-negative integer
/// - the `Content-Length` value exceeds [`MAX_PAYLOAD_BYTES`]
fn parse_payload(head: &RequestHead) -> Result<PayloadSize, ParseError> {
    if head.kind() != RequestKind::Post {
        return Ok(PayloadSize::new_empty());
    }

    let Some(cl_str) = head.headers().get(CONTENT_LENGTH) else {
        return Ok(PayloadSize::new_empty());
    };

    let length = cl_str.trim().parse::<u64>().map_err(|e| ParseError::invalid_content_length(format!("value {cl_str:?} is not u64: {e}")))?;

    ensure!(length <= MAX_PAYLOAD_BYTES, ParseError::payload_too_large(length, MAX_PAYLOAD_BYTES));

    Ok(PayloadSize::new_length(length))
}
