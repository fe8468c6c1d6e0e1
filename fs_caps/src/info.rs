//! File metadata and directory entries

use crate::mode::FileMode;
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// Metadata describing a file, as returned by `stat` and `lstat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    /// Base name of the file
    pub name: String,
    /// Length in bytes for regular files; provider-defined otherwise
    pub size: u64,
    /// Type and permission bits
    pub mode: FileMode,
    /// Last modification time, if the provider tracks one
    pub modified: Option<SystemTime>,
}

impl FileInfo {
    /// Creates file info without a modification time
    pub fn new(name: impl Into<String>, size: u64, mode: FileMode) -> Self {
        Self {
            name: name.into(),
            size,
            mode,
            modified: None,
        }
    }

    /// Sets the modification time
    pub fn with_modified(mut self, modified: SystemTime) -> Self {
        self.modified = Some(modified);
        self
    }

    pub fn is_dir(&self) -> bool {
        self.mode.is_dir()
    }

    /// True for a regular file: no type bit is set
    pub fn is_file(&self) -> bool {
        self.mode.is_regular()
    }

    pub fn is_symlink(&self) -> bool {
        self.mode.is_symlink()
    }
}

/// A single entry from a directory listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirEntry {
    /// Name of the entry within its directory
    pub name: String,
    /// Type bits only; permission bits are never set here
    pub file_type: FileMode,
}

impl DirEntry {
    /// Creates a directory entry, keeping only the type bits of `mode`
    pub fn new(name: impl Into<String>, mode: FileMode) -> Self {
        Self {
            name: name.into(),
            file_type: mode.file_type(),
        }
    }

    pub fn is_dir(&self) -> bool {
        self.file_type.is_dir()
    }

    pub fn is_symlink(&self) -> bool {
        self.file_type.is_symlink()
    }
}
