//! Upload body streaming
//!
//! The body has no declared length: it runs until the peer closes its send
//! side or stops sending for longer than the idle timeout. Bytes that arrived
//! together with the request line are delivered first.

use std::time::Duration;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;
use tracing::debug;

use crate::config::Limits;
use crate::error::ServeError;

const BUFFER_SIZE: usize = 8192;

pub struct BodyReader<'a, S> {
    leftover: BytesMut,
    stream: &'a mut S,
    idle_timeout: Duration,
    max_bytes: u64,
}

impl<'a, S> BodyReader<'a, S>
where
    S: AsyncRead + Unpin,
{
    pub fn new(leftover: BytesMut, stream: &'a mut S, limits: &Limits) -> Self {
        Self {
            leftover,
            stream,
            idle_timeout: limits.body_idle_timeout,
            max_bytes: limits.max_body_bytes,
        }
    }

    /// Streams the whole body into `sink` and flushes it.
    ///
    /// Returns the number of bytes written. Fails if reading from the peer or
    /// writing to the sink errors, or if the body exceeds the size limit.
    pub async fn copy_to<W>(&mut self, sink: &mut W) -> Result<u64, ServeError>
    where
        W: AsyncWrite + Unpin,
    {
        let mut total = 0u64;

        if !self.leftover.is_empty() {
            let chunk = self.leftover.split();
            total = self.check_size(total, chunk.len())?;
            sink.write_all(&chunk)
                .await
                .map_err(|e| ServeError::fault("writing request body", e))?;
        }

        let mut buffer = BytesMut::with_capacity(BUFFER_SIZE);

        loop {
            buffer.clear();
            buffer.reserve(BUFFER_SIZE);

            let n = match timeout(self.idle_timeout, self.stream.read_buf(&mut buffer)).await {
                Ok(Ok(0)) => break,
                Ok(Ok(n)) => n,
                Ok(Err(e)) => return Err(ServeError::fault("reading request body", e)),
                Err(_) => {
                    debug!(bytes = total, "Peer went idle, ending body");
                    break;
                }
            };

            total = self.check_size(total, n)?;
            sink.write_all(&buffer[..n])
                .await
                .map_err(|e| ServeError::fault("writing request body", e))?;
        }

        sink.flush()
            .await
            .map_err(|e| ServeError::fault("flushing request body", e))?;

        Ok(total)
    }

    fn check_size(&self, total: u64, n: usize) -> Result<u64, ServeError> {
        let total = total + n as u64;
        if total > self.max_bytes {
            return Err(ServeError::ServerFault(format!(
                "request body exceeds {} bytes",
                self.max_bytes
            )));
        }
        Ok(total)
    }
}
