use std::borrow::Cow;
use std::fmt;

/// Operations understood by the file server.
///
/// Tokens are matched case-sensitively. Anything that is not one of the four
/// known verbs is kept as `Unknown` so the caller can answer `501` instead of
/// treating it as a malformed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Read a file
    GET,
    /// PUT - Create or overwrite a file with the request body
    PUT,
    /// POST - Append the request body to a file
    POST,
    /// DELETE - Remove a file
    DELETE,
    /// Any other token, kept (lossily decoded) for logging
    Unknown(String),
}

impl Method {
    /// Parses an operation token.
    ///
    /// # Example
    ///
    /// ```
    /// # use flatserve::http::request::Method;
    /// assert_eq!(Method::from_token(b"GET"), Method::GET);
    /// assert_eq!(Method::from_token(b"get"), Method::Unknown("get".to_string()));
    /// ```
    pub fn from_token(token: &[u8]) -> Self {
        match token {
            b"GET" => Method::GET,
            b"PUT" => Method::PUT,
            b"POST" => Method::POST,
            b"DELETE" => Method::DELETE,
            other => Method::Unknown(String::from_utf8_lossy(other).into_owned()),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Method::Unknown(_))
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::GET => f.write_str("GET"),
            Method::PUT => f.write_str("PUT"),
            Method::POST => f.write_str("POST"),
            Method::DELETE => f.write_str("DELETE"),
            Method::Unknown(token) => f.write_str(token),
        }
    }
}

/// A parsed request line.
///
/// Built once per connection and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// The requested operation
    pub method: Method,
    /// Raw target bytes with exactly one leading `/` removed, not decoded
    pub target: Vec<u8>,
}

impl Request {
    pub fn new(method: Method, raw_target: &[u8]) -> Self {
        let target = raw_target.strip_prefix(b"/").unwrap_or(raw_target);
        Self {
            method,
            target: target.to_vec(),
        }
    }

    /// Target for logs; invalid UTF-8 is replaced.
    pub fn target_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.target)
    }
}
