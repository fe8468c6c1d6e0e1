//! Base read contract
//!
//! Every handle can open a file by name and read it. Metadata is available
//! from the open handle even when the filesystem has no stat capability.

use crate::test_helpers::{verify_error, ReadOnly};
use fs_caps::{open, read_file, stat, write_file, FileMode, Fs};
use std::io::{ErrorKind, Read};

const BODY: &[u8] = b"hello world!";

/// Opening a missing name fails with `NotFound` under the `open` operation
pub fn verify_open_missing(fsys: &dyn Fs) {
    let err = open(fsys, "missing.txt").map(|_| ()).unwrap_err();
    verify_error(&err, "open", ErrorKind::NotFound);
}

/// Bytes written through the write capability read back unchanged
pub fn verify_read_back(fsys: &dyn Fs) {
    write_file(fsys, "greeting.txt", FileMode::perm(0o644), BODY).unwrap();

    let mut file = open(fsys, "greeting.txt").unwrap();
    let mut body = Vec::new();
    file.read_to_end(&mut body).unwrap();
    assert_eq!(body, BODY);

    let info = file.stat().unwrap();
    assert_eq!(info.name, "greeting.txt");
    assert_eq!(info.size, BODY.len() as u64);
    assert!(info.is_file());
    file.close().unwrap();

    assert_eq!(read_file(fsys, "greeting.txt").unwrap(), BODY);
}

/// A handle closes once; later reads and closes fail
pub fn verify_close_once(fsys: &dyn Fs) {
    write_file(fsys, "once.txt", FileMode::perm(0o644), BODY).unwrap();

    let mut file = open(fsys, "once.txt").unwrap();
    file.close().unwrap();
    assert!(file.close().is_err(), "second close must fail");

    let mut buf = [0u8; 4];
    assert!(file.read(&mut buf).is_err(), "read after close must fail");
}

/// The stat fallback through `open` agrees with the provider's own stat
pub fn verify_stat_fallback_agrees(fsys: &dyn Fs) {
    write_file(fsys, "same.txt", FileMode::perm(0o640), BODY).unwrap();

    let direct = stat(fsys, "same.txt").unwrap();
    let fallback = stat(&ReadOnly(fsys), "same.txt").unwrap();
    assert_eq!(direct.name, fallback.name);
    assert_eq!(direct.size, fallback.size);
    assert_eq!(direct.mode, fallback.mode);
}

/// Reading through a read-only view sees the same bytes
pub fn verify_read_only_view(fsys: &dyn Fs) {
    write_file(fsys, "shared.txt", FileMode::perm(0o644), BODY).unwrap();
    assert_eq!(read_file(&ReadOnly(fsys), "shared.txt").unwrap(), BODY);

    let err = read_file(&ReadOnly(fsys), "nothing.txt").unwrap_err();
    verify_error(&err, "open", ErrorKind::NotFound);
}
