//! File storage confined to a single flat root directory
//!
//! `validation` turns a raw target name into a path that is guaranteed to be a
//! direct child of the root; `files` performs the actual file-system calls.

pub mod files;
pub mod validation;

pub use files::{FileStore, WriteMode};
pub use validation::{ValidatedTarget, validate_name};
