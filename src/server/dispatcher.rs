//! Operation dispatch
//!
//! Maps a parsed request and its validated target to one file action and
//! produces the response for it.

use std::net::SocketAddr;

use tokio::io::AsyncRead;
use tracing::{error, info, warn};

use crate::error::ServeError;
use crate::http::request::{Method, Request};
use crate::http::response::Response;
use crate::server::body::BodyReader;
use crate::storage::{FileStore, ValidatedTarget, WriteMode};

/// Handles the file operations for every connection.
///
/// Holds no mutable state, so one instance is shared by all workers.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    store: FileStore,
}

impl Dispatcher {
    pub fn new(store: FileStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &FileStore {
        &self.store
    }

    /// Runs the operation and returns the response to send.
    ///
    /// Known operations are audit-logged after handling, whatever the outcome.
    /// Unknown operations answer `501` without touching the file system.
    pub async fn dispatch<S>(
        &self,
        peer: SocketAddr,
        request: &Request,
        target: &ValidatedTarget,
        body: &mut BodyReader<'_, S>,
    ) -> Response
    where
        S: AsyncRead + Unpin,
    {
        let outcome = match &request.method {
            Method::GET => self.get(target).await,
            Method::PUT => self.upload(target, WriteMode::Truncate, body).await,
            Method::POST => self.upload(target, WriteMode::Append, body).await,
            Method::DELETE => self.delete(target).await,
            Method::Unknown(token) => Err(ServeError::Unimplemented(token.clone())),
        };

        let response = match outcome {
            Ok(response) => response,
            Err(e) => {
                log_failure(peer, request, &e);
                e.response()
            }
        };

        if request.method.is_known() {
            info!(
                peer = %peer,
                method = %request.method,
                file = %request.target_lossy(),
                status = response.status.as_u16(),
                "Handled request"
            );
        }

        response
    }

    async fn get(&self, target: &ValidatedTarget) -> Result<Response, ServeError> {
        let contents = self.store.read(target).await?;
        Ok(Response::ok(contents))
    }

    async fn upload<S>(
        &self,
        target: &ValidatedTarget,
        mode: WriteMode,
        body: &mut BodyReader<'_, S>,
    ) -> Result<Response, ServeError>
    where
        S: AsyncRead + Unpin,
    {
        let mut file = self.store.open_for_write(target, mode).await?;
        let written = body.copy_to(&mut file).await?;

        tracing::debug!(file = target.name(), bytes = written, ?mode, "Stored body");

        let message: &[u8] = match mode {
            WriteMode::Truncate => b"File uploaded successfully.",
            WriteMode::Append => b"File appended successfully.",
        };
        Ok(Response::ok(message))
    }

    async fn delete(&self, target: &ValidatedTarget) -> Result<Response, ServeError> {
        self.store.remove(target).await?;
        Ok(Response::ok(b"File deleted successfully.".to_vec()))
    }
}

/// Logs a failed request with the peer and the request it was working on.
pub(crate) fn log_failure(peer: SocketAddr, request: &Request, err: &ServeError) {
    match err {
        ServeError::ServerFault(_) => error!(
            peer = %peer,
            method = %request.method,
            file = %request.target_lossy(),
            error = %err,
            "Request failed"
        ),
        _ => warn!(
            peer = %peer,
            method = %request.method,
            file = %request.target_lossy(),
            error = %err,
            "Request rejected"
        ),
    }
}
