//! Write capability contract

use crate::test_helpers::verify_error;
use fs_caps::{
    is_path_dir, mkdir, mkdir_all, open_file, read_file, stat, write_file, FileGuard, FileMode,
    Fs, OpenFlags,
};
use std::io::ErrorKind;

fn append_to(fsys: &dyn Fs, name: &str, body: &[u8]) {
    let flags = OpenFlags::WRITE_ONLY | OpenFlags::APPEND;
    let mut file = FileGuard::new(open_file(fsys, name, flags, FileMode::empty()).unwrap());
    file.as_writer()
        .expect("append handle must be writable")
        .write_all(body)
        .unwrap();
    file.close().unwrap();
}

/// `write_file` creates, then truncates on the next write
pub fn verify_create_and_truncate(fsys: &dyn Fs) {
    write_file(fsys, "note", FileMode::perm(0o644), b"a much longer first body").unwrap();
    write_file(fsys, "note", FileMode::perm(0o644), b"short").unwrap();
    assert_eq!(read_file(fsys, "note").unwrap(), b"short");
}

/// `APPEND` writes land after the existing contents
pub fn verify_append(fsys: &dyn Fs) {
    write_file(fsys, "log", FileMode::perm(0o644), b"one\n").unwrap();
    append_to(fsys, "log", b"two\n");
    append_to(fsys, "log", b"three\n");
    assert_eq!(read_file(fsys, "log").unwrap(), b"one\ntwo\nthree\n");
}

/// `CREATE|EXCLUSIVE` refuses an existing name
pub fn verify_exclusive_create(fsys: &dyn Fs) {
    let flags = OpenFlags::WRITE_ONLY | OpenFlags::CREATE | OpenFlags::EXCLUSIVE;
    let first = open_file(fsys, "lock", flags, FileMode::perm(0o600)).unwrap();
    FileGuard::new(first).close().unwrap();

    let err = open_file(fsys, "lock", flags, FileMode::perm(0o600))
        .map(|_| ())
        .unwrap_err();
    verify_error(&err, "open", ErrorKind::AlreadyExists);
}

/// `CREATE` without write access still creates, and hands back a reader
pub fn verify_create_without_write_access(fsys: &dyn Fs) {
    let file = open_file(fsys, "fresh", OpenFlags::CREATE, FileMode::perm(0o644)).unwrap();
    let mut file = FileGuard::new(file);
    assert!(file.as_writer().is_none());
    file.close().unwrap();
    let info = stat(fsys, "fresh").unwrap();
    assert!(info.is_file());
    assert_eq!(info.size, 0);

    let flags = OpenFlags::CREATE | OpenFlags::EXCLUSIVE;
    let err = open_file(fsys, "fresh", flags, FileMode::perm(0o644))
        .map(|_| ())
        .unwrap_err();
    verify_error(&err, "open", ErrorKind::AlreadyExists);

    mkdir(fsys, "existing", FileMode::perm(0o755)).unwrap();
    let dir = open_file(fsys, "existing", OpenFlags::CREATE, FileMode::empty()).unwrap();
    let dir = FileGuard::new(dir);
    assert!(dir.stat().unwrap().is_dir());
    dir.close().unwrap();
}

/// Without `CREATE` a missing name is not created
pub fn verify_open_without_create(fsys: &dyn Fs) {
    let err = open_file(fsys, "absent", OpenFlags::WRITE_ONLY, FileMode::perm(0o644))
        .map(|_| ())
        .unwrap_err();
    verify_error(&err, "open", ErrorKind::NotFound);
    assert!(stat(fsys, "absent").unwrap_err().is_not_found());
}

/// A read-only open never hands back a writer
pub fn verify_read_only_open_not_writable(fsys: &dyn Fs) {
    write_file(fsys, "ro", FileMode::perm(0o644), b"x").unwrap();
    let file = open_file(fsys, "ro", OpenFlags::READ_ONLY, FileMode::empty()).unwrap();
    let mut file = FileGuard::new(file);
    assert!(file.as_writer().is_none());
    file.close().unwrap();
}

/// Write access to a directory is refused
pub fn verify_directory_not_writable(fsys: &dyn Fs) {
    mkdir(fsys, "dir", FileMode::perm(0o755)).unwrap();
    let err = open_file(fsys, "dir", OpenFlags::WRITE_ONLY, FileMode::empty())
        .map(|_| ())
        .unwrap_err();
    verify_error(&err, "open", ErrorKind::IsADirectory);
}

/// Single-level `mkdir` semantics
pub fn verify_mkdir(fsys: &dyn Fs) {
    mkdir(fsys, "one", FileMode::perm(0o755)).unwrap();
    assert!(stat(fsys, "one").unwrap().is_dir());

    let err = mkdir(fsys, "one", FileMode::perm(0o755)).unwrap_err();
    verify_error(&err, "mkdir", ErrorKind::AlreadyExists);

    let err = mkdir(fsys, "two/three", FileMode::perm(0o755)).unwrap_err();
    verify_error(&err, "mkdir", ErrorKind::NotFound);
}

/// `mkdir_all` creates ancestors, is idempotent and never replaces a file
pub fn verify_mkdir_all(fsys: &dyn Fs) {
    mkdir_all(fsys, "a/b/c", FileMode::perm(0o755)).unwrap();
    for dir in ["a", "a/b", "a/b/c"] {
        assert!(is_path_dir(fsys, dir).unwrap(), "{} missing", dir);
    }
    mkdir_all(fsys, "a/b/c", FileMode::perm(0o755)).unwrap();
    mkdir_all(fsys, "a/b/c/", FileMode::perm(0o755)).unwrap();
    mkdir_all(fsys, "a/./b/d", FileMode::perm(0o755)).unwrap();
    assert!(is_path_dir(fsys, "a/b/d").unwrap());

    write_file(fsys, "a/file", FileMode::perm(0o644), b"keep").unwrap();
    let err = mkdir_all(fsys, "a/file", FileMode::perm(0o755)).unwrap_err();
    verify_error(&err, "mkdir", ErrorKind::NotADirectory);
    let err = mkdir_all(fsys, "a/file/below", FileMode::perm(0o755)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotADirectory);
    assert_eq!(read_file(fsys, "a/file").unwrap(), b"keep");
}
