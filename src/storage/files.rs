//! File operations
//!
//! Read, create/overwrite, append and delete, each addressed by a validated
//! target. No locking is layered on top: concurrent writers to the same name
//! race at the file-system level.

use std::io::ErrorKind;
use std::path::PathBuf;

use tokio::fs::{self, File, OpenOptions};
use tracing::debug;

use crate::error::ServeError;
use crate::storage::validation::{ValidatedTarget, validate_name};

/// How an upload is applied to the target file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Create or truncate
    Truncate,
    /// Create or append at the end
    Append,
}

/// File-system capability rooted at one directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn resolve(&self, name: &[u8]) -> Result<ValidatedTarget, ServeError> {
        validate_name(&self.root, name)
    }

    /// Whole file contents. A missing file is `NotFound`, anything else a fault.
    pub async fn read(&self, target: &ValidatedTarget) -> Result<Vec<u8>, ServeError> {
        match fs::read(target.path()).await {
            Ok(contents) => {
                debug!(path = %target.path().display(), bytes = contents.len(), "Read file");
                Ok(contents)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(ServeError::NotFound(target.name().to_string()))
            }
            Err(e) => Err(ServeError::fault(
                format!("reading {}", target.path().display()),
                e,
            )),
        }
    }

    pub async fn open_for_write(
        &self,
        target: &ValidatedTarget,
        mode: WriteMode,
    ) -> Result<File, ServeError> {
        let mut options = OpenOptions::new();
        options.create(true);

        match mode {
            WriteMode::Truncate => options.write(true).truncate(true),
            WriteMode::Append => options.append(true),
        };

        options.open(target.path()).await.map_err(|e| {
            ServeError::fault(format!("opening {}", target.path().display()), e)
        })
    }

    /// Removes the file. A missing file is a fault, not `NotFound`.
    pub async fn remove(&self, target: &ValidatedTarget) -> Result<(), ServeError> {
        fs::remove_file(target.path()).await.map_err(|e| {
            ServeError::fault(format!("deleting {}", target.path().display()), e)
        })
    }
}
