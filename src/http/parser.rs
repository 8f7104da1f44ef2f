use crate::http::request::{Method, Request};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Nothing but whitespace was received
    Empty,
    /// Operation present, target missing
    MissingTarget,
    /// No line terminator within the configured bound
    LineTooLong(usize),
    /// The peer sent nothing before closing, failing or timing out
    NoData,
}

/// Location of the request line inside a buffered read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Head {
    /// End of the request line, terminator excluded
    pub line_end: usize,
    /// First byte that belongs to the body
    pub body_start: usize,
}

impl Head {
    /// Head for a buffer that ended (EOF) without a line terminator.
    pub fn whole(len: usize) -> Self {
        Self {
            line_end: len,
            body_start: len,
        }
    }
}

/// Finds the request line terminator in `buf`.
///
/// Returns `None` while no `\n` has been received. A single blank line right
/// after the request line is treated as the end-of-request marker and skipped.
pub fn split_head(buf: &[u8]) -> Option<Head> {
    let lf = buf.iter().position(|&b| b == b'\n')?;
    let rest = &buf[lf + 1..];

    let skip = if rest.starts_with(b"\r\n") {
        2
    } else if rest.starts_with(b"\n") {
        1
    } else {
        0
    };

    Some(Head {
        line_end: lf,
        body_start: lf + 1 + skip,
    })
}

/// Parses `<OPERATION> <TARGET> [anything...]`.
///
/// Works on raw bytes and only looks at the first two whitespace-delimited
/// tokens, so whatever follows them is never inspected. An unknown operation
/// is not an error.
pub fn parse_request_line(line: &[u8]) -> Result<Request, ParseError> {
    let mut parts = line
        .split(u8::is_ascii_whitespace)
        .filter(|token| !token.is_empty());

    let method = parts.next().ok_or(ParseError::Empty)?;
    let target = parts.next().ok_or(ParseError::MissingTarget)?;

    Ok(Request::new(Method::from_token(method), target))
}
