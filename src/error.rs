//! Error taxonomy
//!
//! Every failure a worker can hit maps to exactly one status code. Errors end
//! the current connection only; nothing is retried.

use std::fmt;
use std::io;

use crate::http::parser::ParseError;
use crate::http::response::Response;

#[derive(Debug)]
pub enum ServeError {
    /// Unparseable request line
    MalformedRequest(String),
    /// Target name escapes the single-directory constraint
    InvalidName(String),
    /// GET target does not exist
    NotFound(String),
    /// File-system or streaming I/O failure
    ServerFault(String),
    /// Operation token outside the supported set
    Unimplemented(String),
}

impl ServeError {
    /// Wraps an I/O error with a short description of what was being done.
    pub fn fault(context: impl fmt::Display, err: io::Error) -> Self {
        ServeError::ServerFault(format!("{}: {}", context, err))
    }

    /// Client-facing response. The detail text stays in the logs.
    pub fn response(&self) -> Response {
        match self {
            ServeError::MalformedRequest(_) => Response::bad_request(),
            ServeError::InvalidName(_) => Response::invalid_path(),
            ServeError::NotFound(_) => Response::not_found(),
            ServeError::ServerFault(_) => Response::internal_error(),
            ServeError::Unimplemented(_) => Response::not_implemented(),
        }
    }
}

impl fmt::Display for ServeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServeError::MalformedRequest(s) => write!(f, "Malformed request: {}", s),
            ServeError::InvalidName(s) => write!(f, "Invalid file name: {}", s),
            ServeError::NotFound(s) => write!(f, "File not found: {}", s),
            ServeError::ServerFault(s) => write!(f, "Server fault: {}", s),
            ServeError::Unimplemented(s) => write!(f, "Operation not implemented: {}", s),
        }
    }
}

impl std::error::Error for ServeError {}

impl From<ParseError> for ServeError {
    fn from(err: ParseError) -> Self {
        let detail = match err {
            ParseError::Empty => "empty request line".to_string(),
            ParseError::MissingTarget => "missing target".to_string(),
            ParseError::LineTooLong(limit) => {
                format!("request line too long (limit {} bytes)", limit)
            }
            ParseError::NoData => "no request received".to_string(),
        };
        ServeError::MalformedRequest(detail)
    }
}
