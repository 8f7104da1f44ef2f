use std::net::SocketAddr;
use std::sync::Arc;

use bytes::{Buf, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::{Instant, timeout_at};
use tracing::{debug, warn};

use crate::config::Limits;
use crate::error::ServeError;
use crate::http::parser::{Head, ParseError, parse_request_line, split_head};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::server::body::BodyReader;
use crate::server::dispatcher::{Dispatcher, log_failure};
use crate::storage::ValidatedTarget;

const READ_CHUNK: usize = 1024;

/// One client connection, from the first read to close.
///
/// Exactly one response is written, then the stream is shut down and dropped.
pub struct Connection<S> {
    stream: S,
    peer: SocketAddr,
    dispatcher: Arc<Dispatcher>,
    limits: Limits,
    buffer: BytesMut,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Parsing(Head),
    Validating(Request),
    Dispatching(Request, ValidatedTarget),
    Responding(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, peer: SocketAddr, dispatcher: Arc<Dispatcher>, limits: Limits) -> Self {
        Self {
            stream,
            peer,
            dispatcher,
            limits,
            buffer: BytesMut::with_capacity(READ_CHUNK),
            state: ConnectionState::Reading,
        }
    }

    /// Drives the connection to `Closed`. Every failure along the way turns
    /// into a response; a failed write is logged and the connection still closes.
    pub async fn run(mut self) {
        loop {
            let state = std::mem::replace(&mut self.state, ConnectionState::Closed);

            self.state = match state {
                ConnectionState::Reading => match self.read_head().await {
                    Ok(head) => ConnectionState::Parsing(head),
                    Err(e) => self.reject(None, e),
                },

                ConnectionState::Parsing(head) => {
                    let parsed = parse_request_line(&self.buffer[..head.line_end]);
                    // what remains in the buffer is the start of the body
                    self.buffer.advance(head.body_start);

                    match parsed {
                        Ok(request) => ConnectionState::Validating(request),
                        Err(e) => self.reject(None, e.into()),
                    }
                }

                ConnectionState::Validating(request) => {
                    match self.dispatcher.store().resolve(&request.target) {
                        Ok(target) => ConnectionState::Dispatching(request, target),
                        Err(e) => self.reject(Some(&request), e),
                    }
                }

                ConnectionState::Dispatching(request, target) => {
                    let mut body =
                        BodyReader::new(self.buffer.split(), &mut self.stream, &self.limits);
                    let response = self
                        .dispatcher
                        .dispatch(self.peer, &request, &target, &mut body)
                        .await;
                    ConnectionState::Responding(ResponseWriter::new(&response))
                }

                ConnectionState::Responding(mut writer) => {
                    if let Err(e) = writer.write_to_stream(&mut self.stream).await {
                        let err = ServeError::ServerFault(format!("writing response: {}", e));
                        warn!(peer = %self.peer, error = %err, "Response not delivered");
                    }
                    ConnectionState::Closed
                }

                ConnectionState::Closed => {
                    if let Err(e) = self.stream.shutdown().await {
                        debug!(peer = %self.peer, error = %e, "Shutdown after response failed");
                    }
                    break;
                }
            };
        }

        debug!(peer = %self.peer, "Connection closed");
    }

    /// Reads until the request line is complete.
    ///
    /// The line must end within `max_request_line` bytes. If the peer closes
    /// or goes quiet before sending a terminator, whatever arrived is taken
    /// as the line.
    async fn read_head(&mut self) -> Result<Head, ServeError> {
        let limit = self.limits.max_request_line;
        let deadline = Instant::now() + self.limits.request_timeout;

        loop {
            if let Some(head) = split_head(&self.buffer) {
                if head.line_end > limit {
                    return Err(ParseError::LineTooLong(limit).into());
                }
                return Ok(head);
            }

            if self.buffer.len() >= limit {
                return Err(ParseError::LineTooLong(limit).into());
            }

            self.buffer.reserve(READ_CHUNK);

            match timeout_at(deadline, self.stream.read_buf(&mut self.buffer)).await {
                Ok(Ok(0)) | Err(_) => {
                    if self.buffer.is_empty() {
                        return Err(ParseError::NoData.into());
                    }
                    return Ok(Head::whole(self.buffer.len()));
                }
                Ok(Ok(_)) => continue,
                Ok(Err(e)) if self.buffer.is_empty() => {
                    debug!(peer = %self.peer, error = %e, "Read failed before any data");
                    return Err(ParseError::NoData.into());
                }
                Ok(Err(e)) => return Err(ServeError::fault("reading request", e)),
            }
        }
    }

    fn reject(&self, request: Option<&Request>, err: ServeError) -> ConnectionState {
        match request {
            Some(request) => log_failure(self.peer, request, &err),
            None => warn!(peer = %self.peer, error = %err, "Request rejected"),
        }

        let response: Response = err.response();
        ConnectionState::Responding(ResponseWriter::new(&response))
    }
}
