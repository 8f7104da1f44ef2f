use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::ServeError;

const PARENT_REF: &[u8] = b"..";

/// A target name that is known to be a single component under the root.
///
/// Only [`validate_name`] can build one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedTarget {
    name: String,
    path: PathBuf,
}

impl ValidatedTarget {
    /// Name for logs; invalid UTF-8 is replaced.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Root directory joined with the undecoded name.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Rejects any name that could leave the root directory.
///
/// The rule is deliberately coarse: a separator anywhere, or `..` anywhere,
/// fails. Nested paths are therefore refused too, not only traversal. The
/// name bytes are otherwise passed to the file system as they are.
pub fn validate_name(root: &Path, name: &[u8]) -> Result<ValidatedTarget, ServeError> {
    let display = String::from_utf8_lossy(name).into_owned();

    if name.is_empty() {
        return Err(ServeError::InvalidName("empty name".into()));
    }

    if name.iter().any(|b| matches!(b, b'/' | b'\\' | b'\0'))
        || name.windows(PARENT_REF.len()).any(|w| w == PARENT_REF)
    {
        return Err(ServeError::InvalidName(display));
    }

    Ok(ValidatedTarget {
        name: display,
        path: root.join(os_name(name)),
    })
}

#[cfg(unix)]
fn os_name(name: &[u8]) -> OsString {
    use std::os::unix::ffi::OsStrExt;
    std::ffi::OsStr::from_bytes(name).to_os_string()
}

#[cfg(not(unix))]
fn os_name(name: &[u8]) -> OsString {
    OsString::from(String::from_utf8_lossy(name).into_owned())
}
