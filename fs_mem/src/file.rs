//! Open file handles for [`MemFs`](crate::MemFs)

use crate::tree::SharedData;
use fs_caps::{File, FileInfo, FileMode, FsResult, OpenFlags, PathError};
use std::fmt;
use std::io::{self, Read, Write};
use std::sync::PoisonError;
use std::time::SystemTime;

enum Contents {
    File(SharedData),
    /// Directories can be opened for `stat`, not read
    Dir { modified: SystemTime },
}

/// A handle on a file or directory in a [`MemFs`](crate::MemFs)
pub struct MemFile {
    name: String,
    mode: FileMode,
    contents: Contents,
    pos: usize,
    flags: OpenFlags,
    closed: bool,
}

impl MemFile {
    pub(crate) fn file(name: &str, mode: FileMode, data: SharedData, flags: OpenFlags) -> Self {
        Self {
            name: name.to_string(),
            mode,
            contents: Contents::File(data),
            pos: 0,
            flags,
            closed: false,
        }
    }

    pub(crate) fn dir(name: &str, mode: FileMode, modified: SystemTime) -> Self {
        Self {
            name: name.to_string(),
            mode,
            contents: Contents::Dir { modified },
            pos: 0,
            flags: OpenFlags::READ_ONLY,
            closed: false,
        }
    }

    fn check_open(&self) -> io::Result<()> {
        if self.closed {
            return Err(io::Error::other(format!("{}: file already closed", self.name)));
        }
        Ok(())
    }
}

impl Read for MemFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.check_open()?;
        if !self.flags.is_readable() {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{}: not opened for reading", self.name),
            ));
        }
        let data = match &self.contents {
            Contents::File(data) => data,
            Contents::Dir { .. } => {
                return Err(io::Error::new(
                    io::ErrorKind::IsADirectory,
                    format!("{}: is a directory", self.name),
                ))
            }
        };

        let data = data.read().unwrap_or_else(PoisonError::into_inner);
        let start = self.pos.min(data.bytes.len());
        let n = (&data.bytes[start..]).read(buf)?;
        self.pos = start + n;
        Ok(n)
    }
}

impl Write for MemFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.check_open()?;
        let Contents::File(data) = &self.contents else {
            return Err(io::Error::new(
                io::ErrorKind::IsADirectory,
                format!("{}: is a directory", self.name),
            ));
        };

        let mut data = data.write().unwrap_or_else(PoisonError::into_inner);
        if self.flags.contains(OpenFlags::APPEND) {
            self.pos = data.bytes.len();
        }
        let end = self.pos + buf.len();
        if data.bytes.len() < end {
            data.bytes.resize(end, 0);
        }
        data.bytes[self.pos..end].copy_from_slice(buf);
        data.modified = SystemTime::now();
        self.pos = end;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.check_open()
    }
}

impl File for MemFile {
    fn stat(&self) -> FsResult<FileInfo> {
        self.check_open()
            .map_err(|err| PathError::new("stat", self.name.clone(), err))?;
        let info = match &self.contents {
            Contents::File(data) => {
                let data = data.read().unwrap_or_else(PoisonError::into_inner);
                FileInfo::new(fs_caps::path::base_name(&self.name), data.bytes.len() as u64, self.mode)
                    .with_modified(data.modified)
            }
            Contents::Dir { modified } => {
                FileInfo::new(fs_caps::path::base_name(&self.name), 0, self.mode)
                    .with_modified(*modified)
            }
        };
        Ok(info)
    }

    fn close(&mut self) -> FsResult<()> {
        if self.closed {
            return Err(PathError::new(
                "close",
                self.name.clone(),
                io::Error::other("file already closed"),
            ));
        }
        self.closed = true;
        Ok(())
    }

    fn as_writer(&mut self) -> Option<&mut dyn Write> {
        let is_file = matches!(self.contents, Contents::File(_));
        if is_file && self.flags.is_writable() {
            Some(self)
        } else {
            None
        }
    }
}

impl fmt::Debug for MemFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemFile")
            .field("name", &self.name)
            .field("mode", &self.mode)
            .field("pos", &self.pos)
            .field("flags", &self.flags)
            .field("closed", &self.closed)
            .finish()
    }
}

