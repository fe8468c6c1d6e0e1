//! Error types
//!
//! Every failure leaving this crate or a provider is a [`PathError`]: the
//! operation, the path it was given, and the [`ErrorCause`].

use std::fmt;
use std::io;
use thiserror::Error;

/// An optional filesystem capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// `stat` on the handle itself
    Stat,
    /// `open_file` and `mkdir`
    Write,
    /// `read_link` and `lstat`
    ReadLink,
    /// Symlink creation
    Symlink,
    /// Directory listing
    ReadDir,
    /// File and directory removal
    Remove,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Stat => write!(f, "Stat"),
            Capability::Write => write!(f, "Write"),
            Capability::ReadLink => write!(f, "ReadLink"),
            Capability::Symlink => write!(f, "Symlink"),
            Capability::ReadDir => write!(f, "ReadDir"),
            Capability::Remove => write!(f, "Remove"),
        }
    }
}

/// Why an operation failed
#[derive(Debug, Error)]
pub enum ErrorCause {
    /// The handle does not implement the capability the operation needs
    #[error("filesystem type {fs_type} does not support {capability}")]
    Unsupported {
        capability: Capability,
        fs_type: &'static str,
    },

    /// `open_file` asked for write access but the handle cannot be written
    #[error("filesystem type {fs_type} did not return a writable file from open_file")]
    NotWritable { fs_type: &'static str },

    #[error("file does not exist")]
    NotFound,

    #[error("file already exists")]
    AlreadyExists,

    #[error("not a directory")]
    NotADirectory,

    #[error("is a directory")]
    IsADirectory,

    #[error("not a symlink")]
    NotASymlink,

    #[error("directory not empty")]
    DirectoryNotEmpty,

    #[error("too many levels of symbolic links")]
    TooManyLinks,

    #[error("invalid path")]
    InvalidPath,

    /// Failure passed through from the backing store
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ErrorCause {
    /// Maps the cause onto the closest [`io::ErrorKind`]
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            ErrorCause::Unsupported { .. } | ErrorCause::NotWritable { .. } => {
                io::ErrorKind::Unsupported
            }
            ErrorCause::NotFound => io::ErrorKind::NotFound,
            ErrorCause::AlreadyExists => io::ErrorKind::AlreadyExists,
            ErrorCause::NotADirectory => io::ErrorKind::NotADirectory,
            ErrorCause::IsADirectory => io::ErrorKind::IsADirectory,
            ErrorCause::DirectoryNotEmpty => io::ErrorKind::DirectoryNotEmpty,
            ErrorCause::NotASymlink | ErrorCause::InvalidPath => io::ErrorKind::InvalidInput,
            ErrorCause::TooManyLinks => io::ErrorKind::Other,
            ErrorCause::Io(err) => err.kind(),
        }
    }
}

/// A failed operation on a path
#[derive(Debug, Error)]
#[error("{op} {path}: {cause}")]
pub struct PathError {
    /// Operation name, e.g. `"mkdir"`
    pub op: &'static str,
    /// The path argument as given
    pub path: String,
    #[source]
    pub cause: ErrorCause,
}

impl PathError {
    pub fn new(op: &'static str, path: impl Into<String>, cause: impl Into<ErrorCause>) -> Self {
        Self {
            op,
            path: path.into(),
            cause: cause.into(),
        }
    }

    /// Builds the capability-missing error for `fs_type`
    pub fn unsupported(
        op: &'static str,
        path: impl Into<String>,
        capability: Capability,
        fs_type: &'static str,
    ) -> Self {
        Self::new(
            op,
            path,
            ErrorCause::Unsupported {
                capability,
                fs_type,
            },
        )
    }

    pub fn kind(&self) -> io::ErrorKind {
        self.cause.kind()
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == io::ErrorKind::NotFound
    }

    pub fn is_already_exists(&self) -> bool {
        self.kind() == io::ErrorKind::AlreadyExists
    }

    /// True when the failure is a missing capability
    pub fn is_unsupported(&self) -> bool {
        matches!(self.cause, ErrorCause::Unsupported { .. })
    }
}

impl From<PathError> for io::Error {
    fn from(err: PathError) -> Self {
        io::Error::new(err.kind(), err)
    }
}

/// Result alias used across the crate and by providers
pub type FsResult<T> = Result<T, PathError>;
