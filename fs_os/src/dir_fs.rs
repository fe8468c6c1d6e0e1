//! A filesystem rooted at a host directory

use crate::config::{ConfigError, DirFsConfig};
use crate::file::OsFile;
use crate::meta;
use fs_caps::path::base_name;
use fs_caps::{
    DirEntry, ErrorCause, File, FileInfo, FileMode, Fs, FsResult, OpenFlags, PathError,
    ReadDirFs, ReadLinkFs, RemoveFs, StatFs, SymlinkFs, WriteFs,
};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Host directory exposed through every [`fs_caps`] capability
#[derive(Debug, Clone)]
pub struct DirFs {
    root: PathBuf,
}

impl DirFs {
    /// Wraps `root`; the directory is not checked until first use
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Builds a handle from configuration, creating the root if asked to
    pub fn from_config(config: &DirFsConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        if config.create_root {
            let mut builder = fs::DirBuilder::new();
            builder.recursive(true);
            #[cfg(unix)]
            {
                use std::os::unix::fs::DirBuilderExt;
                builder.mode(config.root_mode);
            }
            builder
                .create(&config.root)
                .map_err(|err| ConfigError::Io(err.to_string()))?;
        }

        let metadata =
            fs::metadata(&config.root).map_err(|err| ConfigError::Io(err.to_string()))?;
        if !metadata.is_dir() {
            return Err(ConfigError::Invalid(format!(
                "root {} is not a directory",
                config.root.display()
            )));
        }

        log::debug!("dirfs rooted at {}", config.root.display());
        Ok(Self::new(config.root.clone()))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Host path for `name`
    fn host_path(&self, op: &'static str, name: &str) -> FsResult<PathBuf> {
        let mut path = self.root.clone();
        for element in name.split('/') {
            match element {
                "" | "." => {}
                ".." => return Err(PathError::new(op, name, ErrorCause::InvalidPath)),
                _ => path.push(element),
            }
        }
        Ok(path)
    }
}

/// Sets the permission bits used when a file is created
fn apply_perm(options: &mut fs::OpenOptions, perm: FileMode) {
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(perm.permissions());
    }
    #[cfg(not(unix))]
    let _ = (options, perm);
}

impl Fs for DirFs {
    fn open(&self, name: &str) -> FsResult<Box<dyn File>> {
        self.open_file(name, OpenFlags::READ_ONLY, FileMode::empty())
    }

    fn as_stat(&self) -> Option<&dyn StatFs> {
        Some(self)
    }

    fn as_write(&self) -> Option<&dyn WriteFs> {
        Some(self)
    }

    fn as_read_link(&self) -> Option<&dyn ReadLinkFs> {
        Some(self)
    }

    fn as_symlink(&self) -> Option<&dyn SymlinkFs> {
        Some(self)
    }

    fn as_read_dir(&self) -> Option<&dyn ReadDirFs> {
        Some(self)
    }

    fn as_remove(&self) -> Option<&dyn RemoveFs> {
        Some(self)
    }
}

impl StatFs for DirFs {
    fn stat(&self, name: &str) -> FsResult<FileInfo> {
        let path = self.host_path("stat", name)?;
        log::trace!("dirfs stat {}", path.display());
        let metadata = fs::metadata(&path).map_err(|err| PathError::new("stat", name, err))?;
        Ok(meta::info_of(base_name(name), &metadata))
    }
}

impl WriteFs for DirFs {
    fn open_file(&self, name: &str, flags: OpenFlags, perm: FileMode) -> FsResult<Box<dyn File>> {
        let path = self.host_path("open", name)?;
        log::trace!("dirfs open_file {} {:?}", path.display(), flags);

        let create_new = flags.contains(OpenFlags::CREATE | OpenFlags::EXCLUSIVE);
        let mut options = fs::OpenOptions::new();

        // std refuses to create without write access: create, then reopen for reading
        if flags.contains(OpenFlags::CREATE) && !flags.is_writable() {
            let mut creator = fs::OpenOptions::new();
            creator.write(true);
            if create_new {
                creator.create_new(true);
            } else {
                creator.create(true);
            }
            apply_perm(&mut creator, perm);
            match creator.open(&path) {
                Ok(_) => {}
                // An existing directory still opens for reading
                Err(err) if !create_new && err.kind() == io::ErrorKind::IsADirectory => {}
                Err(err) => return Err(PathError::new("open", name, err)),
            }
            options.read(true);
        } else {
            options
                .read(flags.is_readable())
                .write(flags.intersects(OpenFlags::WRITE_ONLY | OpenFlags::READ_WRITE))
                .append(flags.contains(OpenFlags::APPEND))
                .truncate(flags.contains(OpenFlags::TRUNCATE));
            if create_new {
                options.create_new(true);
            } else {
                options.create(flags.contains(OpenFlags::CREATE));
            }
            apply_perm(&mut options, perm);
        }

        let file = options
            .open(&path)
            .map_err(|err| PathError::new("open", name, err))?;
        Ok(Box::new(OsFile::new(name, file, flags)))
    }

    fn mkdir(&self, name: &str, perm: FileMode) -> FsResult<()> {
        let path = self.host_path("mkdir", name)?;
        log::trace!("dirfs mkdir {}", path.display());

        let mut builder = fs::DirBuilder::new();
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(perm.permissions());
        }
        #[cfg(not(unix))]
        let _ = perm;

        builder
            .create(&path)
            .map_err(|err| PathError::new("mkdir", name, err))
    }
}

impl ReadLinkFs for DirFs {
    fn read_link(&self, name: &str) -> FsResult<String> {
        let path = self.host_path("read_link", name)?;
        log::trace!("dirfs read_link {}", path.display());
        let target = fs::read_link(&path).map_err(|err| PathError::new("read_link", name, err))?;
        target
            .into_os_string()
            .into_string()
            .map_err(|_| PathError::new("read_link", name, ErrorCause::InvalidPath))
    }

    fn lstat(&self, name: &str) -> FsResult<FileInfo> {
        let path = self.host_path("lstat", name)?;
        log::trace!("dirfs lstat {}", path.display());
        let metadata =
            fs::symlink_metadata(&path).map_err(|err| PathError::new("lstat", name, err))?;
        Ok(meta::info_of(base_name(name), &metadata))
    }
}

impl SymlinkFs for DirFs {
    fn symlink(&self, name: &str, target: &str) -> FsResult<()> {
        let path = self.host_path("symlink", name)?;
        log::trace!("dirfs symlink {} -> {}", path.display(), target);

        #[cfg(unix)]
        let created = std::os::unix::fs::symlink(target, &path);
        #[cfg(not(unix))]
        let created: io::Result<()> = {
            let _ = target;
            Err(io::ErrorKind::Unsupported.into())
        };

        created.map_err(|err| PathError::new("symlink", name, err))
    }
}

impl ReadDirFs for DirFs {
    fn read_dir(&self, name: &str) -> FsResult<Vec<DirEntry>> {
        let path = self.host_path("read_dir", name)?;
        log::trace!("dirfs read_dir {}", path.display());
        let err = |err: io::Error| PathError::new("read_dir", name, err);

        let mut entries = Vec::new();
        for entry in fs::read_dir(&path).map_err(err)? {
            let entry = entry.map_err(err)?;
            let file_type = entry.file_type().map_err(err)?;
            let entry_name = entry
                .file_name()
                .into_string()
                .map_err(|_| PathError::new("read_dir", name, ErrorCause::InvalidPath))?;
            entries.push(DirEntry::new(entry_name, meta::type_bits(file_type)));
        }
        Ok(entries)
    }
}

impl RemoveFs for DirFs {
    fn remove(&self, name: &str) -> FsResult<()> {
        let path = self.host_path("remove", name)?;
        if path == self.root {
            return Err(PathError::new("remove", name, ErrorCause::InvalidPath));
        }
        log::trace!("dirfs remove {}", path.display());

        let err = |err: io::Error| PathError::new("remove", name, err);
        let metadata = fs::symlink_metadata(&path).map_err(err)?;
        if metadata.is_dir() {
            fs::remove_dir(&path).map_err(err)
        } else {
            fs::remove_file(&path).map_err(err)
        }
    }
}
