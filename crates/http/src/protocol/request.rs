//! HTTP request head handling.
//!
//! A [`RequestHead`] is the parsed request line plus the header block. The target is kept
//! as the raw string from the request line: no path or query decomposition happens here.

use crate::protocol::Headers;

/// How the connection dispatches a request, decided from its uppercased method token.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RequestKind {
    Get,
    Post,
    /// Any other method. No callback fires and no response is written.
    Other,
}

impl RequestKind {
    pub fn from_method(method: &str) -> Self {
        if method.eq_ignore_ascii_case("GET") {
            RequestKind::Get
        } else if method.eq_ignore_ascii_case("POST") {
            RequestKind::Post
        } else {
            RequestKind::Other
        }
    }
}

/// The parsed request line and headers of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHead {
    method: String,
    target: String,
    version: String,
    headers: Headers,
}

impl RequestHead {
    /// Builds a head from raw request line tokens. The method is uppercased.
    pub fn new<M, T, V>(method: M, target: T, version: V, headers: Headers) -> Self
    where
        M: AsRef<str>,
        T: Into<String>,
        V: Into<String>,
    {
        Self { method: method.as_ref().to_ascii_uppercase(), target: target.into(), version: version.into(), headers }
    }

    /// Returns the uppercased method token.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Returns the raw request target, e.g. `/form?x=1`.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Returns the protocol version token as received, e.g. `HTTP/1.0`.
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn kind(&self) -> RequestKind {
        RequestKind::from_method(&self.method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_is_uppercased() {
        let head = RequestHead::new("get", "/", "HTTP/1.0", Headers::new());
        assert_eq!(head.method(), "GET");
        assert_eq!(head.kind(), RequestKind::Get);
    }

    #[test]
    fn kind_from_method() {
        assert_eq!(RequestKind::from_method("POST"), RequestKind::Post);
        assert_eq!(RequestKind::from_method("post"), RequestKind::Post);
        assert_eq!(RequestKind::from_method("PUT"), RequestKind::Other);
        assert_eq!(RequestKind::from_method(""), RequestKind::Other);
    }
}
