//! Capability dispatch
//!
//! One function per optional operation. Each narrows the handle to the
//! capability that declares the operation and delegates, returning the
//! provider's result untouched. When the handle lacks the capability the
//! function either falls back to the base contract (only where a fallback
//! is defined below) or returns [`ErrorCause::Unsupported`].
//!
//! | Operation | Capability | Fallback |
//! |-----------|------------|----------|
//! | `stat` | `StatFs` | `open` + `File::stat` + `close` |
//! | `open_file` | `WriteFs` | `open`, for `OpenFlags::READ_ONLY` only |
//! | `mkdir` | `WriteFs` | none |
//! | `read_link` | `ReadLinkFs` | none |
//! | `lstat` | `ReadLinkFs` | `stat` |
//! | `symlink` | `SymlinkFs` | none |
//! | `read_dir` | `ReadDirFs` | none |
//! | `remove` | `RemoveFs` | none |

use crate::capability::Fs;
use crate::error::{Capability, FsResult, PathError};
use crate::file::{File, FileGuard};
use crate::info::{DirEntry, FileInfo};
use crate::mode::{FileMode, OpenFlags};

/// Opens the named file for reading
pub fn open(fsys: &dyn Fs, name: &str) -> FsResult<Box<dyn File>> {
    fsys.open(name)
}

/// Returns metadata for `name`, following symlinks
pub fn stat(fsys: &dyn Fs, name: &str) -> FsResult<FileInfo> {
    if let Some(statfs) = fsys.as_stat() {
        return statfs.stat(name);
    }

    log::debug!(
        "{} has no Stat capability, stat {} through open",
        fsys.type_name(),
        name
    );
    let file = FileGuard::new(fsys.open(name)?);
    let info = file.stat();
    let closed = file.close();
    let info = info?;
    closed?;
    Ok(info)
}

/// Opens a file with flags and permission bits
///
/// A handle without the write capability can still serve
/// [`OpenFlags::READ_ONLY`] through [`Fs::open`].
pub fn open_file(
    fsys: &dyn Fs,
    name: &str,
    flags: OpenFlags,
    perm: FileMode,
) -> FsResult<Box<dyn File>> {
    if let Some(writefs) = fsys.as_write() {
        return writefs.open_file(name, flags, perm);
    }
    if flags.is_read_only() {
        log::debug!(
            "{} has no Write capability, open_file {} read-only through open",
            fsys.type_name(),
            name
        );
        return fsys.open(name);
    }
    Err(PathError::unsupported(
        "open_file",
        name,
        Capability::Write,
        fsys.type_name(),
    ))
}

/// Creates a single directory
pub fn mkdir(fsys: &dyn Fs, name: &str, perm: FileMode) -> FsResult<()> {
    match fsys.as_write() {
        Some(writefs) => writefs.mkdir(name, perm),
        None => Err(PathError::unsupported(
            "mkdir",
            name,
            Capability::Write,
            fsys.type_name(),
        )),
    }
}

/// Returns the target of a symlink
pub fn read_link(fsys: &dyn Fs, name: &str) -> FsResult<String> {
    match fsys.as_read_link() {
        Some(linkfs) => linkfs.read_link(name),
        None => Err(PathError::unsupported(
            "read_link",
            name,
            Capability::ReadLink,
            fsys.type_name(),
        )),
    }
}

/// Returns metadata for `name` without following a trailing symlink
///
/// Handles that know nothing of symlinks are asked for a plain `stat`.
pub fn lstat(fsys: &dyn Fs, name: &str) -> FsResult<FileInfo> {
    if let Some(linkfs) = fsys.as_read_link() {
        return linkfs.lstat(name);
    }
    log::debug!(
        "{} has no ReadLink capability, lstat {} falls back to stat",
        fsys.type_name(),
        name
    );
    stat(fsys, name)
}

/// Creates `name` as a symlink to `target`
pub fn symlink(fsys: &dyn Fs, name: &str, target: &str) -> FsResult<()> {
    match fsys.as_symlink() {
        Some(linkfs) => linkfs.symlink(name, target),
        None => Err(PathError::unsupported(
            "symlink",
            name,
            Capability::Symlink,
            fsys.type_name(),
        )),
    }
}

/// Lists a directory, in provider order
///
/// See [`crate::walk::read_dir`] for the sorted listing.
pub fn read_dir(fsys: &dyn Fs, name: &str) -> FsResult<Vec<DirEntry>> {
    match fsys.as_read_dir() {
        Some(dirfs) => dirfs.read_dir(name),
        None => Err(PathError::unsupported(
            "read_dir",
            name,
            Capability::ReadDir,
            fsys.type_name(),
        )),
    }
}

/// Removes a file, symlink or empty directory
pub fn remove(fsys: &dyn Fs, name: &str) -> FsResult<()> {
    match fsys.as_remove() {
        Some(removefs) => removefs.remove(name),
        None => Err(PathError::unsupported(
            "remove",
            name,
            Capability::Remove,
            fsys.type_name(),
        )),
    }
}
