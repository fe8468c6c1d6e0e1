//! Open file handles
//!
//! A [`File`] is returned by `open` and `open_file`. It is always readable
//! in the `io::Read` sense (reading may fail, e.g. on a write-only handle),
//! and may additionally be writable: see [`File::as_writer`].
//!
//! Handles are owned by whoever opened them and must be closed. [`FileGuard`]
//! closes on every exit path.

use crate::error::FsResult;
use crate::info::FileInfo;
use std::fmt;
use std::io::{self, Read, Write};

/// An open file
pub trait File: Read + Send {
    /// Returns metadata for the open file
    fn stat(&self) -> FsResult<FileInfo>;

    /// Releases the handle
    ///
    /// Closing twice is an error; reads and writes after close fail.
    fn close(&mut self) -> FsResult<()>;

    /// Narrows the handle to a writer, if it was opened writable
    fn as_writer(&mut self) -> Option<&mut dyn Write> {
        None
    }
}

/// Scoped ownership of an open [`File`]
///
/// Call [`FileGuard::close`] to observe the close result. A guard dropped
/// without an explicit close still releases the handle.
pub struct FileGuard {
    file: Box<dyn File>,
    closed: bool,
}

impl FileGuard {
    pub fn new(file: Box<dyn File>) -> Self {
        Self {
            file,
            closed: false,
        }
    }

    /// Closes the handle and reports the result
    pub fn close(mut self) -> FsResult<()> {
        self.closed = true;
        self.file.close()
    }

    pub fn stat(&self) -> FsResult<FileInfo> {
        self.file.stat()
    }

    pub fn as_writer(&mut self) -> Option<&mut dyn Write> {
        self.file.as_writer()
    }
}

impl Read for FileGuard {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

impl Drop for FileGuard {
    fn drop(&mut self) {
        if !self.closed {
            if let Err(err) = self.file.close() {
                log::warn!("closing dropped file handle failed: {}", err);
            }
        }
    }
}

impl fmt::Debug for FileGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileGuard")
            .field("closed", &self.closed)
            .finish()
    }
}
