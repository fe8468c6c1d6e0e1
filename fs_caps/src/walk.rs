//! Directory listing and recursive walk

use crate::capability::Fs;
use crate::dispatch;
use crate::error::FsResult;
use crate::info::DirEntry;
use crate::path;

/// Lists a directory sorted by name
pub fn read_dir(fsys: &dyn Fs, name: &str) -> FsResult<Vec<DirEntry>> {
    let mut entries = dispatch::read_dir(fsys, name)?;
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// What [`walk_dir`] does after visiting an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkControl {
    /// Keep going, descending into directories
    Continue,
    /// Do not descend into this directory; ignored for non-directories
    SkipDir,
}

/// Walks the tree rooted at `root`, depth-first in lexical order
///
/// `visit` is called with each path (joined onto `root`) and its entry,
/// starting with `root` itself. Symlinks are reported but not followed. An
/// error from `visit` or from listing a directory stops the walk and is
/// returned.
pub fn walk_dir<F>(fsys: &dyn Fs, root: &str, mut visit: F) -> FsResult<()>
where
    F: FnMut(&str, &DirEntry) -> FsResult<WalkControl>,
{
    let info = dispatch::lstat(fsys, root)?;
    let entry = DirEntry::new(path::base_name(root), info.mode);
    walk_entry(fsys, root, &entry, &mut visit)
}

fn walk_entry<F>(fsys: &dyn Fs, name: &str, entry: &DirEntry, visit: &mut F) -> FsResult<()>
where
    F: FnMut(&str, &DirEntry) -> FsResult<WalkControl>,
{
    let control = visit(name, entry)?;
    if !entry.is_dir() || control == WalkControl::SkipDir {
        return Ok(());
    }

    for child in read_dir(fsys, name)? {
        let child_path = path::join(name, &child.name);
        walk_entry(fsys, &child_path, &child, visit)?;
    }
    Ok(())
}
