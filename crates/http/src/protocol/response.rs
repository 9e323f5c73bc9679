//! HTTP response head.
//!
//! Header names are written exactly as given, so the wire shows `Content-Type` rather than
//! the lowercased form an `http::HeaderMap` would produce.

use http::StatusCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHead {
    status: StatusCode,
    headers: Vec<(&'static str, String)>,
}

impl ResponseHead {
    pub fn new(status: StatusCode) -> Self {
        Self { status, headers: Vec::new() }
    }

    /// `200 OK` with the given content type and `Connection: close`.
    pub fn success(content_type: &str) -> Self {
        Self::new(StatusCode::OK).header("Content-Type", content_type).header("Connection", "close")
    }

    /// `404 Not Found` with `Connection: close` and no content type.
    pub fn failure() -> Self {
        Self::new(StatusCode::NOT_FOUND).header("Connection", "close")
    }

    pub fn header<V: Into<String>>(mut self, name: &'static str, value: V) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &[(&'static str, String)] {
        &self.headers
    }
}
