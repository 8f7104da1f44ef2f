/// Status codes the file server can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
    /// 500 Internal Server Error
    InternalServerError,
    /// 501 Not Implemented
    NotImplemented,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use flatserve::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotImplemented.as_u16(), 501);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::InternalServerError => 500,
            StatusCode::NotImplemented => 501,
        }
    }

    /// Returns the standard reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::InternalServerError => "Internal Server Error",
            StatusCode::NotImplemented => "Not Implemented",
        }
    }

    /// `"<code> <reason>"`, e.g. `"404 Not Found"`.
    pub fn status_line(&self) -> String {
        format!("{} {}", self.as_u16(), self.reason_phrase())
    }
}

/// A response ready to be written: one status line and a body.
///
/// There are no headers; the end of the body is signalled by closing the
/// connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 200 OK with the given body.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::new(StatusCode::Ok, body)
    }

    /// 400 for a request line that could not be parsed.
    pub fn bad_request() -> Self {
        Self::new(StatusCode::BadRequest, b"Invalid request.".to_vec())
    }

    /// 400 for a target name that escapes the root directory.
    pub fn invalid_path() -> Self {
        Self::new(StatusCode::BadRequest, b"Invalid file path.".to_vec())
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NotFound, b"Page not found.".to_vec())
    }

    pub fn internal_error() -> Self {
        Self::new(
            StatusCode::InternalServerError,
            b"An error occurred while processing the request.".to_vec(),
        )
    }

    pub fn not_implemented() -> Self {
        Self::new(StatusCode::NotImplemented, b"Not implemented.".to_vec())
    }
}
