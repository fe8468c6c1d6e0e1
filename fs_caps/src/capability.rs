//! Capability traits
//!
//! [`Fs`] is the only contract every handle satisfies: open a file by name
//! for reading. Each optional capability is a separate trait, reached at
//! runtime through one of the `as_*` queries on [`Fs`]. A provider opts in
//! by overriding the query to return `Some(self)`:
//!
//! ```
//! use fs_caps::{File, FileMode, Fs, FsResult, WriteFs, OpenFlags};
//!
//! struct Scratch;
//!
//! impl Fs for Scratch {
//!     fn open(&self, name: &str) -> FsResult<Box<dyn File>> {
//!         self.open_file(name, OpenFlags::READ_ONLY, FileMode::empty())
//!     }
//!
//!     fn as_write(&self) -> Option<&dyn WriteFs> {
//!         Some(self)
//!     }
//! }
//!
//! impl WriteFs for Scratch {
//!     fn open_file(&self, name: &str, _: OpenFlags, _: FileMode) -> FsResult<Box<dyn File>> {
//!         Err(fs_caps::PathError::new("open", name, fs_caps::ErrorCause::NotFound))
//!     }
//!
//!     fn mkdir(&self, _: &str, _: FileMode) -> FsResult<()> {
//!         Ok(())
//!     }
//! }
//!
//! let fsys = Scratch;
//! assert!(fs_caps::as_fs(&fsys).as_write().is_some());
//! assert!(fs_caps::as_fs(&fsys).as_symlink().is_none());
//! ```
//!
//! Callers normally go through [`crate::dispatch`] rather than calling the
//! queries themselves.

use crate::error::FsResult;
use crate::file::File;
use crate::info::{DirEntry, FileInfo};
use crate::mode::{FileMode, OpenFlags};

/// A read-only filesystem handle, with optional capabilities
pub trait Fs {
    /// Opens the named file for reading
    fn open(&self, name: &str) -> FsResult<Box<dyn File>>;

    /// Concrete type name, used in capability-missing diagnostics
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn as_stat(&self) -> Option<&dyn StatFs> {
        None
    }

    fn as_write(&self) -> Option<&dyn WriteFs> {
        None
    }

    fn as_read_link(&self) -> Option<&dyn ReadLinkFs> {
        None
    }

    fn as_symlink(&self) -> Option<&dyn SymlinkFs> {
        None
    }

    fn as_read_dir(&self) -> Option<&dyn ReadDirFs> {
        None
    }

    fn as_remove(&self) -> Option<&dyn RemoveFs> {
        None
    }
}

/// Metadata lookup that follows symlinks
pub trait StatFs: Fs {
    fn stat(&self, name: &str) -> FsResult<FileInfo>;
}

/// Writing: opening with flags and creating single directories
pub trait WriteFs: Fs {
    /// Opens a file with the given flags
    ///
    /// When `flags` grant write access the returned handle must answer
    /// [`File::as_writer`] with `Some`. `perm` applies only when the file is
    /// created.
    fn open_file(&self, name: &str, flags: OpenFlags, perm: FileMode) -> FsResult<Box<dyn File>>;

    /// Creates one directory; the parent must already exist
    fn mkdir(&self, name: &str, perm: FileMode) -> FsResult<()>;
}

/// Symlink inspection
pub trait ReadLinkFs: Fs {
    /// Returns the target of a symlink
    ///
    /// Fails with [`ErrorCause::NotASymlink`](crate::ErrorCause::NotASymlink)
    /// when `name` exists but is not a symlink.
    fn read_link(&self, name: &str) -> FsResult<String>;

    /// Like `stat`, but a trailing symlink is described rather than followed
    fn lstat(&self, name: &str) -> FsResult<FileInfo>;
}

/// Symlink creation
pub trait SymlinkFs: Fs {
    /// Creates `name` as a symlink pointing at `target`
    fn symlink(&self, name: &str, target: &str) -> FsResult<()>;
}

/// Directory listing
pub trait ReadDirFs: Fs {
    /// Lists the entries of a directory, in any order
    fn read_dir(&self, name: &str) -> FsResult<Vec<DirEntry>>;
}

/// Removal of files, symlinks and empty directories
pub trait RemoveFs: Fs {
    fn remove(&self, name: &str) -> FsResult<()>;
}

/// Upcasts a concrete handle to `&dyn Fs`
pub fn as_fs<F: Fs>(fsys: &F) -> &dyn Fs {
    fsys
}
