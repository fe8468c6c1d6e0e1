//! The in-memory filesystem

use crate::file::MemFile;
use crate::tree::{Node, NodeKind, Tree};
use fs_caps::path::base_name;
use fs_caps::{
    DirEntry, ErrorCause, File, FileInfo, FileMode, Fs, FsResult, OpenFlags, PathError,
    ReadDirFs, ReadLinkFs, RemoveFs, StatFs, SymlinkFs, WriteFs,
};
use std::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A directory tree held in memory
///
/// Safe to share between threads; every operation takes the tree lock for
/// its own duration only.
pub struct MemFs {
    tree: RwLock<Tree>,
}

impl MemFs {
    /// Creates an empty filesystem holding only the root directory
    pub fn new() -> Self {
        Self {
            tree: RwLock::new(Tree::new()),
        }
    }

    fn read_tree(&self) -> RwLockReadGuard<'_, Tree> {
        self.tree.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_tree(&self) -> RwLockWriteGuard<'_, Tree> {
        self.tree.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn lookup(
        &self,
        op: &'static str,
        name: &str,
        follow_last: bool,
    ) -> FsResult<FileInfo> {
        let tree = self.read_tree();
        let resolved = tree
            .resolve(name, follow_last)
            .map_err(|cause| PathError::new(op, name, cause))?;
        let id = resolved
            .node
            .ok_or_else(|| PathError::new(op, name, ErrorCause::NotFound))?;
        let node = tree.node(id).map_err(|cause| PathError::new(op, name, cause))?;
        Ok(node.info(base_name(name)))
    }
}

impl Default for MemFs {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MemFs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemFs").finish_non_exhaustive()
    }
}

impl Fs for MemFs {
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

impl StatFs for MemFs {
    fn stat(&self, name: &str) -> FsResult<FileInfo> {
        log::trace!("memfs stat {}", name);
        self.lookup("stat", name, true)
    }
}

impl WriteFs for MemFs {
    fn open_file(&self, name: &str, flags: OpenFlags, perm: FileMode) -> FsResult<Box<dyn File>> {
        log::trace!("memfs open_file {} {:?}", name, flags);
        let err = |cause: ErrorCause| PathError::new("open", name, cause);

        // An exclusive create fails on any existing entry, dangling links included
        let exclusive = flags.contains(OpenFlags::CREATE | OpenFlags::EXCLUSIVE);
        let mut tree = self.write_tree();
        let resolved = tree.resolve(name, !exclusive).map_err(err)?;

        let id = match resolved.node {
            Some(_) if exclusive => return Err(err(ErrorCause::AlreadyExists)),
            Some(id) => id,
            None if flags.contains(OpenFlags::CREATE) => {
                let Some(leaf) = resolved.leaf.as_deref() else {
                    return Err(err(ErrorCause::InvalidPath));
                };
                tree.insert(resolved.parent, leaf, Node::file(perm)).map_err(err)?
            }
            None => return Err(err(ErrorCause::NotFound)),
        };

        let node = tree.node(id).map_err(err)?;
        let mode = node.mode();
        match &node.kind {
            NodeKind::Dir(_) if flags.is_writable() => Err(err(ErrorCause::IsADirectory)),
            NodeKind::Dir(_) => Ok(Box::new(MemFile::dir(name, mode, node.modified))),
            NodeKind::File(data) => {
                if flags.contains(OpenFlags::TRUNCATE) && flags.is_writable() {
                    let mut contents = data.write().unwrap_or_else(PoisonError::into_inner);
                    contents.bytes.clear();
                    contents.modified = std::time::SystemTime::now();
                }
                Ok(Box::new(MemFile::file(name, mode, data.clone(), flags)))
            }
            // resolve() followed every symlink
            NodeKind::Symlink(_) => Err(err(ErrorCause::InvalidPath)),
        }
    }

    fn mkdir(&self, name: &str, perm: FileMode) -> FsResult<()> {
        log::trace!("memfs mkdir {}", name);
        let err = |cause: ErrorCause| PathError::new("mkdir", name, cause);

        let mut tree = self.write_tree();
        let resolved = tree.resolve(name, false).map_err(err)?;
        match (resolved.node, resolved.leaf) {
            (None, Some(leaf)) => {
                tree.insert(resolved.parent, &leaf, Node::dir(perm))
                    .map_err(err)?;
                Ok(())
            }
            _ => Err(err(ErrorCause::AlreadyExists)),
        }
    }
}

impl ReadLinkFs for MemFs {
    fn read_link(&self, name: &str) -> FsResult<String> {
        log::trace!("memfs read_link {}", name);
        let err = |cause: ErrorCause| PathError::new("read_link", name, cause);

        let tree = self.read_tree();
        let resolved = tree.resolve(name, false).map_err(err)?;
        let id = resolved.node.ok_or_else(|| err(ErrorCause::NotFound))?;
        match &tree.node(id).map_err(err)?.kind {
            NodeKind::Symlink(target) => Ok(target.clone()),
            _ => Err(err(ErrorCause::NotASymlink)),
        }
    }

    fn lstat(&self, name: &str) -> FsResult<FileInfo> {
        log::trace!("memfs lstat {}", name);
        self.lookup("lstat", name, false)
    }
}

impl SymlinkFs for MemFs {
    fn symlink(&self, name: &str, target: &str) -> FsResult<()> {
        log::trace!("memfs symlink {} -> {}", name, target);
        let err = |cause: ErrorCause| PathError::new("symlink", name, cause);

        let mut tree = self.write_tree();
        let resolved = tree.resolve(name, false).map_err(err)?;
        match (resolved.node, resolved.leaf) {
            (None, Some(leaf)) => {
                tree.insert(resolved.parent, &leaf, Node::symlink(target))
                    .map_err(err)?;
                Ok(())
            }
            _ => Err(err(ErrorCause::AlreadyExists)),
        }
    }
}

impl ReadDirFs for MemFs {
    fn read_dir(&self, name: &str) -> FsResult<Vec<DirEntry>> {
        log::trace!("memfs read_dir {}", name);
        let err = |cause: ErrorCause| PathError::new("read_dir", name, cause);

        let tree = self.read_tree();
        let resolved = tree.resolve(name, true).map_err(err)?;
        let id = resolved.node.ok_or_else(|| err(ErrorCause::NotFound))?;
        tree.list(id).map_err(err)
    }
}

impl RemoveFs for MemFs {
    fn remove(&self, name: &str) -> FsResult<()> {
        log::trace!("memfs remove {}", name);
        let err = |cause: ErrorCause| PathError::new("remove", name, cause);

        let mut tree = self.write_tree();
        let resolved = tree.resolve(name, false).map_err(err)?;
        match (resolved.node, resolved.leaf) {
            (Some(_), Some(leaf)) => tree.remove(resolved.parent, &leaf).map_err(err),
            (None, _) => Err(err(ErrorCause::NotFound)),
            // The root, or a directory named through ".."
            (Some(_), None) => Err(err(ErrorCause::InvalidPath)),
        }
    }
}
