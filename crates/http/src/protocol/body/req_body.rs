use std::borrow::Cow;
use std::convert::Infallible;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use http_body::{Body, Frame, SizeHint};

/// A fully buffered request body.
///
/// Polling it as a [`Body`] yields the whole payload as a single data frame; after that the
/// body is at its end and [`ReqBody::as_bytes`] returns an empty slice.
#[derive(Debug, Clone, Default)]
pub struct ReqBody {
    data: Option<Bytes>,
}

impl ReqBody {
    pub fn empty() -> Self {
        Self { data: None }
    }

    pub fn len(&self) -> usize {
        self.data.as_ref().map_or(0, Bytes::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.data.as_deref().unwrap_or_default()
    }

    pub fn into_bytes(self) -> Bytes {
        self.data.unwrap_or_default()
    }

    /// Reads the body to completion as text, replacing invalid UTF-8 sequences.
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }
}

impl From<Bytes> for ReqBody {
    fn from(bytes: Bytes) -> Self {
        Self { data: Some(bytes) }
    }
}

impl From<&'static [u8]> for ReqBody {
    fn from(slice: &'static [u8]) -> Self {
        Self::from(Bytes::from_static(slice))
    }
}

impl From<Vec<u8>> for ReqBody {
    fn from(vec: Vec<u8>) -> Self {
        Self::from(Bytes::from(vec))
    }
}

impl Body for ReqBody {
    type Data = Bytes;
    type Error = Infallible;

    fn poll_frame(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        let frame = self.data.take().filter(|bytes| !bytes.is_empty()).map(|bytes| Ok(Frame::data(bytes)));
        Poll::Ready(frame)
    }

    fn is_end_stream(&self) -> bool {
        self.is_empty()
    }

    fn size_hint(&self) -> SizeHint {
        SizeHint::with_exact(self.len() as u64)
    }
}
