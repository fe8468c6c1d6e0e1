//! # Capability-layered filesystems
//!
//! This crate describes filesystems as a minimal read-only contract plus
//! optional capabilities that are detected at runtime.
//!
//! ## Philosophy
//!
//! - **Accept the least, ask for more**: every operation takes `&dyn Fs`, the
//!   read-only base, and narrows to the capability it needs at the point of use
//! - **Missing is not exceptional**: a handle without a capability produces an
//!   ordinary [`PathError`], or a defined fallback, never a panic
//! - **Errors carry context**: every failure names the operation, the path and
//!   the cause
//!
//! ## Layers
//!
//! - [`capability`]: the [`Fs`] base trait and one trait per capability
//! - [`dispatch`]: runtime narrowing, delegation and fallbacks
//! - [`mkdir_all`]: recursive, race-tolerant directory creation
//! - [`actions`]: whole-file read/write and path-type queries
//! - [`walk`]: sorted listing and recursive walk
//!
//! ## Example
//!
//! ```ignore
//! use fs_caps::FileMode;
//!
//! let fsys = fs_mem::MemFs::new();
//! fs_caps::mkdir_all(&fsys, "hello", FileMode::perm(0o777))?;
//! fs_caps::write_file(&fsys, "hello/world.txt", FileMode::perm(0o666), b"hello world!")?;
//! assert_eq!(fs_caps::read_file(&fsys, "hello/world.txt")?, b"hello world!");
//! ```

pub mod actions;
pub mod capability;
pub mod dispatch;
pub mod error;
pub mod file;
pub mod info;
pub mod mkdir_all;
pub mod mode;
pub mod path;
pub mod walk;

pub use actions::{is_path_dir, is_path_file, read_file, write_file};
pub use capability::{
    as_fs, Fs, ReadDirFs, ReadLinkFs, RemoveFs, StatFs, SymlinkFs, WriteFs,
};
pub use dispatch::{lstat, mkdir, open, open_file, read_link, remove, stat, symlink};
pub use error::{Capability, ErrorCause, FsResult, PathError};
pub use file::{File, FileGuard};
pub use info::{DirEntry, FileInfo};
pub use mkdir_all::mkdir_all;
pub use mode::{FileMode, OpenFlags};
pub use walk::{read_dir, walk_dir, WalkControl};
