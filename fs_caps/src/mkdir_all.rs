//! Recursive directory creation
//!
//! Built only from `stat`, `lstat` and single-level `mkdir`, so it works on
//! any handle with the write capability.

use crate::capability::Fs;
use crate::dispatch;
use crate::error::{Capability, ErrorCause, FsResult, PathError};
use crate::mode::FileMode;
use crate::path::{is_trivial_parent, split_parent};

/// Creates `name` as a directory, along with any missing parents
///
/// Succeeds without touching the store when `name` is already a directory,
/// and fails with [`ErrorCause::NotADirectory`] when it exists as anything
/// else. Losing a creation race to another caller counts as success.
/// `perm` applies to every directory created.
pub fn mkdir_all(fsys: &dyn Fs, name: &str, perm: FileMode) -> FsResult<()> {
    let Some(writefs) = fsys.as_write() else {
        return Err(PathError::unsupported(
            "mkdir",
            name,
            Capability::Write,
            fsys.type_name(),
        ));
    };

    // Fast path: already there, one way or another
    let stat_err = match dispatch::stat(fsys, name) {
        Ok(info) if info.is_dir() => return Ok(()),
        Ok(_) => return Err(PathError::new("mkdir", name, ErrorCause::NotADirectory)),
        Err(err) => err,
    };

    // A name the provider refuses is refused before any parent is created
    if matches!(stat_err.cause, ErrorCause::InvalidPath) {
        return Err(PathError::new("mkdir", name, ErrorCause::InvalidPath));
    }

    // Only separators: that is the root, which is never created
    let Some(split) = split_parent(name) else {
        return Err(stat_err);
    };

    if !is_trivial_parent(split.parent) {
        mkdir_all(fsys, split.parent, perm)?;
    }

    log::trace!("mkdir_all: creating {}", name);
    if let Err(err) = writefs.mkdir(name, perm) {
        // Someone else may have created it first, or the name ends in "/."
        if let Ok(info) = dispatch::lstat(fsys, name) {
            if info.is_dir() {
                log::debug!("mkdir_all: {} appeared concurrently, keeping it", name);
                return Ok(());
            }
        }
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{ReadLinkFs, StatFs, WriteFs};
    use crate::file::File;
    use crate::info::FileInfo;
    use crate::mode::OpenFlags;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    /// Flat map of path -> is_dir, with a mkdir call log
    #[derive(Default)]
    struct Recorder {
        entries: Mutex<BTreeMap<String, bool>>,
        mkdirs: Mutex<Vec<String>>,
        /// Paths whose mkdir creates the directory and then reports a conflict
        racing: Vec<String>,
    }

    impl Recorder {
        fn with(entries: &[(&str, bool)]) -> Self {
            let rec = Recorder::default();
            {
                let mut map = rec.entries.lock().unwrap();
                for (path, is_dir) in entries {
                    map.insert(path.to_string(), *is_dir);
                }
            }
            rec
        }

        fn key(name: &str) -> String {
            name.trim_matches('/').to_string()
        }

        fn mkdirs(&self) -> Vec<String> {
            self.mkdirs.lock().unwrap().clone()
        }
    }

    impl Fs for Recorder {
        fn open(&self, name: &str) -> FsResult<Box<dyn File>> {
            Err(PathError::new("open", name, ErrorCause::NotFound))
        }

        fn as_stat(&self) -> Option<&dyn StatFs> {
            Some(self)
        }

        fn as_write(&self) -> Option<&dyn WriteFs> {
            Some(self)
        }
    }

    impl StatFs for Recorder {
        fn stat(&self, name: &str) -> FsResult<FileInfo> {
            let key = Self::key(name);
            if key.is_empty() {
                return Ok(FileInfo::new(".", 0, FileMode::DIR));
            }
            if key.split('/').any(|element| element == "..") {
                return Err(PathError::new("stat", name, ErrorCause::InvalidPath));
            }
            match self.entries.lock().unwrap().get(&key) {
                Some(true) => Ok(FileInfo::new(key, 0, FileMode::DIR | FileMode::perm(0o755))),
                Some(false) => Ok(FileInfo::new(key, 0, FileMode::perm(0o644))),
                None => Err(PathError::new("stat", name, ErrorCause::NotFound)),
            }
        }
    }

    impl WriteFs for Recorder {
        fn open_file(&self, name: &str, _: OpenFlags, _: FileMode) -> FsResult<Box<dyn File>> {
            Err(PathError::new("open", name, ErrorCause::NotFound))
        }

        fn mkdir(&self, name: &str, _perm: FileMode) -> FsResult<()> {
            self.mkdirs.lock().unwrap().push(name.to_string());
            let key = Self::key(name);
            let mut entries = self.entries.lock().unwrap();
            if self.racing.contains(&key) {
                entries.insert(key, true);
                return Err(PathError::new("mkdir", name, ErrorCause::AlreadyExists));
            }
            if entries.contains_key(&key) {
                return Err(PathError::new("mkdir", name, ErrorCause::AlreadyExists));
            }
            if let Some(split) = split_parent(&key) {
                if !split.parent.is_empty() && entries.get(split.parent) != Some(&true) {
                    return Err(PathError::new("mkdir", name, ErrorCause::NotFound));
                }
            }
            entries.insert(key, true);
            Ok(())
        }
    }

    /// Write-capable handle whose lstat and stat disagree
    struct LinkToFile;

    impl Fs for LinkToFile {
        fn open(&self, name: &str) -> FsResult<Box<dyn File>> {
            Err(PathError::new("open", name, ErrorCause::NotFound))
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
    }

    impl StatFs for LinkToFile {
        fn stat(&self, name: &str) -> FsResult<FileInfo> {
            Err(PathError::new("stat", name, ErrorCause::NotFound))
        }
    }

    impl WriteFs for LinkToFile {
        fn open_file(&self, name: &str, _: OpenFlags, _: FileMode) -> FsResult<Box<dyn File>> {
            Err(PathError::new("open", name, ErrorCause::NotFound))
        }

        fn mkdir(&self, name: &str, _perm: FileMode) -> FsResult<()> {
            Err(PathError::new("mkdir", name, ErrorCause::AlreadyExists))
        }
    }

    impl ReadLinkFs for LinkToFile {
        fn read_link(&self, _name: &str) -> FsResult<String> {
            Ok("target".to_string())
        }

        fn lstat(&self, name: &str) -> FsResult<FileInfo> {
            Ok(FileInfo::new(name, 6, FileMode::SYMLINK | FileMode::perm(0o777)))
        }
    }

    #[test]
    fn test_creates_missing_ancestors_in_order() {
        let fsys = Recorder::default();
        mkdir_all(&fsys, "a/b/c", FileMode::perm(0o777)).unwrap();
        assert_eq!(fsys.mkdirs(), vec!["a", "a/b", "a/b/c"]);
    }

    #[test]
    fn test_existing_directory_is_untouched() {
        let fsys = Recorder::with(&[("a", true), ("a/b", true)]);
        mkdir_all(&fsys, "a/b", FileMode::perm(0o777)).unwrap();
        assert!(fsys.mkdirs().is_empty());
    }

    #[test]
    fn test_only_missing_suffix_is_created() {
        let fsys = Recorder::with(&[("a", true)]);
        mkdir_all(&fsys, "a/b/c", FileMode::perm(0o777)).unwrap();
        assert_eq!(fsys.mkdirs(), vec!["a/b", "a/b/c"]);
    }

    #[test]
    fn test_existing_file_fails_without_mutation() {
        let fsys = Recorder::with(&[("a", false)]);
        let err = mkdir_all(&fsys, "a", FileMode::perm(0o777)).unwrap_err();
        assert!(matches!(err.cause, ErrorCause::NotADirectory));
        assert_eq!(err.op, "mkdir");
        assert!(fsys.mkdirs().is_empty());
    }

    #[test]
    fn test_file_ancestor_stops_recursion() {
        let fsys = Recorder::with(&[("a", false)]);
        let err = mkdir_all(&fsys, "a/b/c", FileMode::perm(0o777)).unwrap_err();
        assert!(matches!(err.cause, ErrorCause::NotADirectory));
        assert_eq!(err.path, "a");
        assert!(fsys.mkdirs().is_empty());
    }

    #[test]
    fn test_trailing_separators() {
        let fsys = Recorder::default();
        mkdir_all(&fsys, "x/y//", FileMode::perm(0o755)).unwrap();
        assert_eq!(fsys.mkdirs(), vec!["x", "x/y//"]);
    }

    #[test]
    fn test_root_is_never_created() {
        let fsys = Recorder::default();
        mkdir_all(&fsys, "///", FileMode::perm(0o755)).unwrap();
        mkdir_all(&fsys, "/top", FileMode::perm(0o755)).unwrap();
        assert_eq!(fsys.mkdirs(), vec!["/top"]);
    }

    #[test]
    fn test_refused_name_creates_nothing() {
        let fsys = Recorder::default();
        let err = mkdir_all(&fsys, "a/..", FileMode::perm(0o755)).unwrap_err();
        assert!(matches!(err.cause, ErrorCause::InvalidPath));
        assert_eq!(err.op, "mkdir");
        assert!(fsys.mkdirs().is_empty());
    }

    #[test]
    fn test_lost_race_is_success() {
        let fsys = Recorder {
            racing: vec!["a/b".to_string()],
            ..Recorder::with(&[("a", true)])
        };
        mkdir_all(&fsys, "a/b", FileMode::perm(0o777)).unwrap();
        assert_eq!(fsys.mkdirs(), vec!["a/b"]);
    }

    #[test]
    fn test_failed_leaf_keeps_original_error() {
        let fsys = LinkToFile;
        let err = mkdir_all(&fsys, "link", FileMode::perm(0o777)).unwrap_err();
        assert!(err.is_already_exists());
        assert_eq!(err.op, "mkdir");
    }

    #[test]
    fn test_read_only_handle_fails_immediately() {
        struct ReadOnly;
        impl Fs for ReadOnly {
            fn open(&self, name: &str) -> FsResult<Box<dyn File>> {
                Err(PathError::new("open", name, ErrorCause::NotFound))
            }
        }

        let err = mkdir_all(&ReadOnly, "a/b/c", FileMode::perm(0o777)).unwrap_err();
        assert!(err.is_unsupported());
        assert_eq!(err.path, "a/b/c");
    }
}
