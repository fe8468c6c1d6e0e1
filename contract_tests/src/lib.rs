//! # Provider Contract Tests
//!
//! This crate provides "golden" tests for the filesystem contract to ensure
//! providers and the shared entry points don't drift accidentally over time.
//!
//! ## Philosophy
//!
//! - **Explicit over implicit**: The contract is written as code
//! - **One suite, every provider**: Each check takes `&dyn Fs` and runs
//!   against every provider in the workspace
//! - **Mechanism not policy**: Define what must be stable, not how to use it
//!
//! ## Structure
//!
//! Each module holds checks for one part of the contract:
//! - Base read contract (open, read, stat, close)
//! - Write capability (create, truncate, append, directories)
//! - Symlink capabilities
//! - Listing and removal
//! - Stable identifiers: mode bits, flag values, operation names

pub mod dir_contract;
pub mod identifiers;
pub mod link_contract;
pub mod read_contract;
pub mod write_contract;

/// Common test helpers for contract validation
pub mod test_helpers {
    use fs_caps::{File, Fs, FsResult, PathError};
    use fs_mem::MemFs;
    use fs_os::DirFs;
    use std::io;
    use tempfile::TempDir;

    /// Exposes only the base read contract of the wrapped handle
    pub struct ReadOnly<'a>(pub &'a dyn Fs);

    impl Fs for ReadOnly<'_> {
        fn open(&self, name: &str) -> FsResult<Box<dyn File>> {
            self.0.open(name)
        }
    }

    /// A disk provider over a fresh scratch directory
    ///
    /// The directory lives as long as the returned guard.
    pub fn scratch_dir_fs() -> (TempDir, DirFs) {
        let dir = tempfile::tempdir().expect("Failed to create scratch directory");
        let fsys = DirFs::new(dir.path());
        (dir, fsys)
    }

    /// Runs `check` against a fresh instance of every full provider
    pub fn for_each_provider(check: impl Fn(&dyn Fs)) {
        check(&MemFs::new());
        let (_dir, fsys) = scratch_dir_fs();
        check(&fsys);
    }

    /// Verifies an error names the expected operation and kind
    pub fn verify_error(err: &PathError, expected_op: &str, expected_kind: io::ErrorKind) {
        assert_eq!(
            err.op, expected_op,
            "Operation name changed: expected '{}', got '{}'",
            expected_op, err.op
        );
        assert_eq!(
            err.kind(),
            expected_kind,
            "Error kind changed for {}: expected {:?}, got {:?}",
            err,
            expected_kind,
            err.kind()
        );
    }
}
