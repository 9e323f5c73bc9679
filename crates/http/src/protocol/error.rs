use std::error::Error;
use std::io;
use std::net::SocketAddr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("request error: {source}")]
    RequestError {
        #[from]
        source: ParseError,
    },

    #[error("response error: {source}")]
    ResponseError {
        #[from]
        source: SendError,
    },

    #[error("handler error: {source}")]
    HandlerError { source: Box<dyn Error + Send + Sync> },
}

impl HttpError {
    pub fn handler<E: Into<Box<dyn Error + Send + Sync>>>(e: E) -> Self {
        Self::HandlerError { source: e.into() }
    }
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("malformed request line: {line:?}")]
    MalformedRequest { line: String },

    #[error("malformed header line: {line:?}")]
    MalformedHeader { line: String },

    #[error("request head too large, current: {current_size} exceed the limit {max_size}")]
    TooLargeHeader { current_size: usize, max_size: usize },

    #[error("invalid content-length header: {reason}")]
    InvalidContentLength { reason: String },

    #[error("payload too large, content-length {length} exceed the limit {max_size}")]
    PayloadTooLarge { length: u64, max_size: u64 },

    #[error("client disconnected during body read, {remaining} bytes still expected")]
    ClientDisconnected { remaining: u64 },

    #[error("stream ended before the request head was complete")]
    UnexpectedEof,

    #[error("invalid body: {reason}")]
    InvalidBody { reason: String },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl ParseError {
    pub fn malformed_request<S: ToString>(line: S) -> Self {
        Self::MalformedRequest { line: line.to_string() }
    }

    pub fn malformed_header<S: ToString>(line: S) -> Self {
        Self::MalformedHeader { line: line.to_string() }
    }

    pub fn too_large_header(current_size: usize, max_size: usize) -> Self {
        Self::TooLargeHeader { current_size, max_size }
    }

    pub fn invalid_content_length<S: ToString>(str: S) -> Self {
        Self::InvalidContentLength { reason: str.to_string() }
    }

    pub fn payload_too_large(length: u64, max_size: u64) -> Self {
        Self::PayloadTooLarge { length, max_size }
    }

    pub fn client_disconnected(remaining: u64) -> Self {
        Self::ClientDisconnected { remaining }
    }

    pub fn invalid_body<S: ToString>(str: S) -> Self {
        Self::InvalidBody { reason: str.to_string() }
    }
}

#[derive(Error, Debug)]
pub enum SendError {
    #[error("invalid response state: {reason}")]
    InvalidState { reason: String },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl SendError {
    pub fn invalid_state<S: ToString>(str: S) -> Self {
        Self::InvalidState { reason: str.to_string() }
    }
}

impl From<SendError> for io::Error {
    fn from(e: SendError) -> Self {
        match e {
            SendError::Io { source } => source,
            e @ SendError::InvalidState { .. } => io::Error::new(io::ErrorKind::InvalidInput, e),
        }
    }
}

/// Errors raised while starting the listener.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("can't bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
}

impl ServerError {
    pub fn bind(addr: SocketAddr, source: io::Error) -> Self {
        Self::Bind { addr, source }
    }
}
