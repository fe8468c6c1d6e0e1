//! # In-memory filesystem
//!
//! [`MemFs`] keeps a whole directory tree in memory and implements every
//! capability of [`fs_caps`]: stat, write, symlink read and creation,
//! directory listing and removal.
//!
//! ## Design
//!
//! - Nodes are identified by number; a directory maps entry names to node ids
//! - The root always exists and cannot be removed
//! - Paths are split on `/`; empty and `.` elements are skipped and `..`
//!   moves to the parent, stopping at the root
//! - Open files share their contents with the tree, so a write through one
//!   handle is visible to every other handle and to later opens
//! - A single lock guards the tree; file contents have their own lock

pub mod file;
pub mod fs;
mod tree;

pub use file::MemFile;
pub use fs::MemFs;
