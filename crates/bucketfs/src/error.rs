// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, Error>;

/// Represents errors that can occur in filesystem operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The logical file or directory does not exist.
    #[error("Path not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Any other failure reported by the object store, unmodified.
    #[error("Object store error: {0}")]
    Backend(#[from] object_store::Error),

    /// The operation has no meaning for a stream over a flat store.
    #[error("Not implemented: {0}")]
    Unsupported(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub fn not_found<P: AsRef<Path>>(path: P) -> Self {
        Error::NotFound(path.as_ref().to_path_buf())
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config(message.into())
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

/// Map a backend failure for `path` onto the filesystem error space.
///
/// The store's "no such object" signal becomes [`Error::NotFound`]; everything
/// else passes through as [`Error::Backend`] with no retry or rewrapping.
pub fn map_backend_error<P: AsRef<Path>>(path: P, err: object_store::Error) -> Error {
    match err {
        object_store::Error::NotFound { .. } => Error::not_found(path),
        other => Error::Backend(other),
    }
}
