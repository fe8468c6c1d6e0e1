//! Open file handles for [`DirFs`](crate::DirFs)

use crate::meta;
use fs_caps::path::base_name;
use fs_caps::{File, FileInfo, FsResult, OpenFlags, PathError};
use std::fs;
use std::io::{self, Read, Write};

/// A host file opened through a [`DirFs`](crate::DirFs)
#[derive(Debug)]
pub struct OsFile {
    /// Name as given to the filesystem, for error messages
    name: String,
    file: Option<fs::File>,
    writable: bool,
    /// Flush to the device after every write
    sync: bool,
}

impl OsFile {
    pub(crate) fn new(name: &str, file: fs::File, flags: OpenFlags) -> Self {
        Self {
            name: name.to_string(),
            file: Some(file),
            writable: flags.is_writable(),
            sync: flags.contains(OpenFlags::SYNC),
        }
    }

    fn handle(&mut self) -> io::Result<&mut fs::File> {
        self.file
            .as_mut()
            .ok_or_else(|| io::Error::other(format!("{}: file already closed", self.name)))
    }
}

impl Read for OsFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.handle()?.read(buf)
    }
}

impl Write for OsFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let sync = self.sync;
        let file = self.handle()?;
        let n = file.write(buf)?;
        if sync {
            file.sync_data()?;
        }
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.handle()?.flush()
    }
}

impl File for OsFile {
    fn stat(&self) -> FsResult<FileInfo> {
        let file = self.file.as_ref().ok_or_else(|| {
            PathError::new("stat", self.name.clone(), io::Error::other("file already closed"))
        })?;
        let metadata = file
            .metadata()
            .map_err(|err| PathError::new("stat", self.name.clone(), err))?;
        Ok(meta::info_of(base_name(&self.name), &metadata))
    }

    fn close(&mut self) -> FsResult<()> {
        let Some(file) = self.file.take() else {
            return Err(PathError::new(
                "close",
                self.name.clone(),
                io::Error::other("file already closed"),
            ));
        };
        if self.sync && self.writable {
            file.sync_all()
                .map_err(|err| PathError::new("close", self.name.clone(), err))?;
        }
        log::trace!("dirfs close {}", self.name);
        Ok(())
    }

    fn as_writer(&mut self) -> Option<&mut dyn Write> {
        if self.writable && self.file.is_some() {
            Some(self)
        } else {
            None
        }
    }
}
