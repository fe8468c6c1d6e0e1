//! # Host directory filesystem
//!
//! [`DirFs`] exposes a directory of the host filesystem through the
//! [`fs_caps`] capability traits. Names are `/`-separated and relative to
//! the root; `..` elements are rejected so a handle never names anything
//! above its root.
//!
//! ## Configuration
//!
//! A [`DirFsConfig`] can be loaded from JSON:
//!
//! ```json
//! { "root": "/srv/data", "create_root": true, "root_mode": 493 }
//! ```

pub mod config;
pub mod dir_fs;
pub mod file;
mod meta;

pub use config::{ConfigError, DirFsConfig};
pub use dir_fs::DirFs;
pub use file::OsFile;
