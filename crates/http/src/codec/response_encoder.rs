use crate::codec::header::HeaderEncoder;
use crate::ensure;
use crate::protocol::{Message, PayloadItem, ResponseHead, SendError};
use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::Encoder;
use tracing::error;

/// Encodes one response: exactly one head, then any number of raw body chunks.
///
/// There is no length framing on the body; the connection is closed after the response.
/// A second head, or body bytes before the head, are refused without writing anything.
#[derive(Debug, Default)]
pub struct ResponseEncoder {
    header_encoder: HeaderEncoder,
    head_written: bool,
}

impl ResponseEncoder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Returns true once the status line has been encoded.
    pub fn is_head_written(&self) -> bool {
        self.head_written
    }
}

impl<D: Buf> Encoder<Message<ResponseHead, D>> for ResponseEncoder {
    type Error = SendError;

    fn encode(&mut self, item: Message<ResponseHead, D>, dst: &mut BytesMut) -> Result<(), Self::Error> {
        match item {
            Message::Header(head) => {
                if self.head_written {
                    error!(status = %head.status(), "status line already written, refusing another response head");
                    return Err(SendError::invalid_state("status line already written"));
                }

                self.head_written = true;
                self.header_encoder.encode(head, dst)
            }

            Message::Payload(PayloadItem::Chunk(chunk)) => {
                ensure!(self.head_written, SendError::invalid_state("body bytes written before status line"));
                dst.put(chunk);
                Ok(())
            }

            Message::Payload(PayloadItem::Eof) => Ok(()),
        }
    }
}
