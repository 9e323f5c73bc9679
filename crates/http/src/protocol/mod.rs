//! Core HTTP/1.0 protocol types.
//!
//! - **Message Handling** ([`Message`], [`PayloadItem`], [`PayloadSize`]): the items that flow
//!   out of the request decoder and into the response encoder
//! - **Request Processing** ([`RequestHead`], [`RequestKind`], [`Headers`]): the parsed request
//!   line and header block, and the GET / POST / other dispatch decision
//! - **Response Processing** ([`ResponseHead`]): status line and headers of a response
//! - **Body** ([`body::ReqBody`]): the buffered POST body handed to the handler
//! - **Error Handling**: [`HttpError`], [`ParseError`], [`SendError`], [`ServerError`]

mod message;
pub use message::Message;
pub use message::PayloadItem;
pub use message::PayloadSize;

mod headers;
pub use headers::Headers;

mod request;
pub use request::RequestHead;
pub use request::RequestKind;

mod response;
pub use response::ResponseHead;

mod error;
pub use error::HttpError;
pub use error::ParseError;
pub use error::SendError;
pub use error::ServerError;

pub mod body;
