//! Symlink capability contract
//!
//! Targets are stored verbatim and resolved relative to the link's directory.

use crate::test_helpers::{verify_error, ReadOnly};
use fs_caps::{
    lstat, mkdir_all, open_file, read_file, read_link, stat, symlink, write_file, FileMode, Fs,
    OpenFlags,
};
use std::io::ErrorKind;

/// `read_link` returns the target as given; `lstat` describes the link
pub fn verify_symlink_round_trip(fsys: &dyn Fs) {
    mkdir_all(fsys, "docs", FileMode::perm(0o755)).unwrap();
    write_file(fsys, "docs/readme", FileMode::perm(0o644), b"read me").unwrap();
    symlink(fsys, "docs/latest", "readme").unwrap();

    assert_eq!(read_link(fsys, "docs/latest").unwrap(), "readme");
    assert!(lstat(fsys, "docs/latest").unwrap().is_symlink());
    assert!(stat(fsys, "docs/latest").unwrap().is_file());
    assert_eq!(read_file(fsys, "docs/latest").unwrap(), b"read me");
}

/// Links to directories are traversed in the middle of a path
pub fn verify_directory_link(fsys: &dyn Fs) {
    mkdir_all(fsys, "real/inner", FileMode::perm(0o755)).unwrap();
    symlink(fsys, "alias", "real").unwrap();

    assert!(stat(fsys, "alias/inner").unwrap().is_dir());
    mkdir_all(fsys, "alias/inner/deeper", FileMode::perm(0o755)).unwrap();
    assert!(stat(fsys, "real/inner/deeper").unwrap().is_dir());
}

/// Link errors keep their kinds across providers
pub fn verify_link_errors(fsys: &dyn Fs) {
    write_file(fsys, "plain", FileMode::perm(0o644), b"").unwrap();

    let err = read_link(fsys, "plain").unwrap_err();
    verify_error(&err, "read_link", ErrorKind::InvalidInput);

    let err = read_link(fsys, "missing").unwrap_err();
    verify_error(&err, "read_link", ErrorKind::NotFound);

    let err = symlink(fsys, "plain", "elsewhere").unwrap_err();
    verify_error(&err, "symlink", ErrorKind::AlreadyExists);
}

/// A dangling link exists for `lstat` but not for `stat`
pub fn verify_dangling_link(fsys: &dyn Fs) {
    symlink(fsys, "dangling", "nowhere").unwrap();
    assert!(lstat(fsys, "dangling").unwrap().is_symlink());
    let err = stat(fsys, "dangling").unwrap_err();
    verify_error(&err, "stat", ErrorKind::NotFound);
}

/// An exclusive create refuses a dangling link and leaves its target alone
pub fn verify_exclusive_create_over_dangling_link(fsys: &dyn Fs) {
    symlink(fsys, "dangling", "target").unwrap();

    let flags = OpenFlags::WRITE_ONLY | OpenFlags::CREATE | OpenFlags::EXCLUSIVE;
    let err = open_file(fsys, "dangling", flags, FileMode::perm(0o644))
        .map(|_| ())
        .unwrap_err();
    verify_error(&err, "open", ErrorKind::AlreadyExists);
    assert!(lstat(fsys, "target").unwrap_err().is_not_found());
    assert!(lstat(fsys, "dangling").unwrap().is_symlink());
}

/// Without the read-link capability, `lstat` follows links like `stat`
pub fn verify_lstat_fallback_follows(fsys: &dyn Fs) {
    write_file(fsys, "target", FileMode::perm(0o644), b"abc").unwrap();
    symlink(fsys, "link", "target").unwrap();

    let info = lstat(&ReadOnly(fsys), "link").unwrap();
    assert!(info.is_file());
    assert_eq!(info.size, 3);
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::test_helpers::for_each_provider;

    #[test]
    fn test_symlink_round_trip_contract() {
        for_each_provider(verify_symlink_round_trip);
    }

    #[test]
    fn test_directory_link_contract() {
        for_each_provider(verify_directory_link);
    }

    #[test]
    fn test_link_errors_contract() {
        for_each_provider(verify_link_errors);
    }

    #[test]
    fn test_dangling_link_contract() {
        for_each_provider(verify_dangling_link);
    }

    #[test]
    fn test_exclusive_create_over_dangling_link_contract() {
        for_each_provider(verify_exclusive_create_over_dangling_link);
    }

    #[test]
    fn test_lstat_fallback_contract() {
        for_each_provider(verify_lstat_fallback_follows);
    }
}
