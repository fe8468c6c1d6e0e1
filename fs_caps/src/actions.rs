//! Whole-file reads and writes, and path-type queries

use crate::capability::Fs;
use crate::dispatch;
use crate::error::{ErrorCause, FsResult, PathError};
use crate::file::FileGuard;
use crate::mode::{FileMode, OpenFlags};
use std::io::Read;

/// Reads the whole named file
pub fn read_file(fsys: &dyn Fs, name: &str) -> FsResult<Vec<u8>> {
    let mut file = FileGuard::new(dispatch::open(fsys, name)?);
    let mut body = Vec::new();
    let read = file.read_to_end(&mut body);
    let closed = file.close();
    read.map_err(|err| PathError::new("read", name, err))?;
    closed?;
    Ok(body)
}

/// Writes `body` to the named file, creating or truncating it
///
/// `perm` applies only if the file is created. The handle is closed on every
/// path out; a write failure is reported in preference to a close failure.
pub fn write_file(fsys: &dyn Fs, name: &str, perm: FileMode, body: &[u8]) -> FsResult<()> {
    let flags = OpenFlags::CREATE | OpenFlags::TRUNCATE | OpenFlags::WRITE_ONLY;
    let mut file = FileGuard::new(dispatch::open_file(fsys, name, flags, perm)?);

    let written = match file.as_writer() {
        Some(writer) => writer
            .write_all(body)
            .and_then(|()| writer.flush())
            .map_err(|err| PathError::new("write", name, err)),
        None => Err(PathError::new(
            "write_file",
            name,
            ErrorCause::NotWritable {
                fs_type: fsys.type_name(),
            },
        )),
    };
    let closed = file.close();
    written?;
    closed
}

/// True when `name` is a regular file
///
/// A stat failure is returned as the error; it is never folded into `false`.
pub fn is_path_file(fsys: &dyn Fs, name: &str) -> FsResult<bool> {
    let info = dispatch::stat(fsys, name)?;
    Ok(info.mode.file_type().is_empty())
}

/// True when `name` is a directory
///
/// A stat failure is returned as the error; it is never folded into `false`.
pub fn is_path_dir(fsys: &dyn Fs, name: &str) -> FsResult<bool> {
    let info = dispatch::stat(fsys, name)?;
    Ok(info.mode.file_type() == FileMode::DIR)
}
