//! Integration tests for DirFs against scratch directories

use fs_caps::{
    is_path_dir, is_path_file, lstat, mkdir_all, open_file, read_dir, read_file, read_link,
    remove, stat, symlink, write_file, ErrorCause, FileGuard, FileMode, OpenFlags,
};
use fs_os::{ConfigError, DirFs, DirFsConfig};
use std::io::ErrorKind;
use tempfile::tempdir;

#[test]
fn test_hello_world() {
    let dir = tempdir().unwrap();
    let fsys = DirFs::new(dir.path());

    mkdir_all(&fsys, "hello", FileMode::perm(0o777)).unwrap();
    write_file(&fsys, "hello/world.txt", FileMode::perm(0o666), b"hello world!").unwrap();

    assert_eq!(read_file(&fsys, "hello/world.txt").unwrap(), b"hello world!");
    assert_eq!(
        std::fs::read(dir.path().join("hello/world.txt")).unwrap(),
        b"hello world!"
    );
}

#[test]
fn test_mkdir_all_nested_and_idempotent() {
    let dir = tempdir().unwrap();
    let fsys = DirFs::new(dir.path());

    mkdir_all(&fsys, "a/b/c", FileMode::perm(0o755)).unwrap();
    mkdir_all(&fsys, "a/b/c", FileMode::perm(0o755)).unwrap();
    mkdir_all(&fsys, "a/./b/d/", FileMode::perm(0o755)).unwrap();

    assert!(dir.path().join("a/b/c").is_dir());
    assert!(dir.path().join("a/b/d").is_dir());
}

#[test]
fn test_mkdir_all_over_file() {
    let dir = tempdir().unwrap();
    let fsys = DirFs::new(dir.path());
    write_file(&fsys, "plain", FileMode::perm(0o644), b"x").unwrap();

    let err = mkdir_all(&fsys, "plain", FileMode::perm(0o755)).unwrap_err();
    assert!(matches!(err.cause, ErrorCause::NotADirectory));
    assert_eq!(read_file(&fsys, "plain").unwrap(), b"x");
}

#[cfg(unix)]
#[test]
fn test_permissions_are_applied() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let fsys = DirFs::new(dir.path());
    mkdir_all(&fsys, "private", FileMode::perm(0o700)).unwrap();
    write_file(&fsys, "private/key", FileMode::perm(0o600), b"secret").unwrap();

    let mode = std::fs::metadata(dir.path().join("private/key"))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
    assert_eq!(stat(&fsys, "private").unwrap().mode.permissions(), 0o700);
}

#[test]
fn test_open_flags() {
    let dir = tempdir().unwrap();
    let fsys = DirFs::new(dir.path());

    let exclusive = OpenFlags::WRITE_ONLY | OpenFlags::CREATE | OpenFlags::EXCLUSIVE;
    let file = open_file(&fsys, "once", exclusive, FileMode::perm(0o644)).unwrap();
    FileGuard::new(file).close().unwrap();
    let err = open_file(&fsys, "once", exclusive, FileMode::perm(0o644))
        .map(|_| ())
        .unwrap_err();
    assert!(err.is_already_exists());

    write_file(&fsys, "log", FileMode::perm(0o644), b"one\n").unwrap();
    let append = OpenFlags::WRITE_ONLY | OpenFlags::APPEND | OpenFlags::SYNC;
    let mut file = FileGuard::new(open_file(&fsys, "log", append, FileMode::empty()).unwrap());
    file.as_writer().unwrap().write_all(b"two\n").unwrap();
    file.close().unwrap();
    assert_eq!(read_file(&fsys, "log").unwrap(), b"one\ntwo\n");

    let err = open_file(&fsys, "absent", OpenFlags::READ_ONLY, FileMode::empty())
        .map(|_| ())
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_read_only_open_has_no_writer() {
    let dir = tempdir().unwrap();
    let fsys = DirFs::new(dir.path());
    write_file(&fsys, "f", FileMode::perm(0o644), b"data").unwrap();

    let mut file = FileGuard::new(fs_caps::open(&fsys, "f").unwrap());
    assert!(file.as_writer().is_none());
    assert_eq!(file.stat().unwrap().size, 4);
    file.close().unwrap();
}

#[test]
fn test_path_queries() {
    let dir = tempdir().unwrap();
    let fsys = DirFs::new(dir.path());
    mkdir_all(&fsys, "d", FileMode::perm(0o755)).unwrap();
    write_file(&fsys, "d/f", FileMode::perm(0o644), b"").unwrap();

    assert!(is_path_dir(&fsys, "d").unwrap());
    assert!(is_path_file(&fsys, "d/f").unwrap());
    assert!(!is_path_dir(&fsys, "d/f").unwrap());
    assert!(is_path_dir(&fsys, "d/missing").unwrap_err().is_not_found());
}

#[cfg(unix)]
#[test]
fn test_symlinks() {
    let dir = tempdir().unwrap();
    let fsys = DirFs::new(dir.path());
    write_file(&fsys, "target", FileMode::perm(0o644), b"linked").unwrap();
    symlink(&fsys, "link", "target").unwrap();

    assert_eq!(read_link(&fsys, "link").unwrap(), "target");
    assert!(lstat(&fsys, "link").unwrap().is_symlink());
    assert!(stat(&fsys, "link").unwrap().is_file());
    assert_eq!(read_file(&fsys, "link").unwrap(), b"linked");

    let err = read_link(&fsys, "target").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);

    remove(&fsys, "link").unwrap();
    assert!(is_path_file(&fsys, "target").unwrap());
}

#[test]
fn test_read_dir_and_remove() {
    let dir = tempdir().unwrap();
    let fsys = DirFs::new(dir.path());
    mkdir_all(&fsys, "tree/sub", FileMode::perm(0o755)).unwrap();
    write_file(&fsys, "tree/b.txt", FileMode::perm(0o644), b"").unwrap();
    write_file(&fsys, "tree/a.txt", FileMode::perm(0o644), b"").unwrap();

    let entries = read_dir(&fsys, "tree").unwrap();
    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["a.txt", "b.txt", "sub"]);
    assert!(entries[2].is_dir());

    assert!(remove(&fsys, "tree").is_err());
    remove(&fsys, "tree/sub").unwrap();
    remove(&fsys, "tree/a.txt").unwrap();
    remove(&fsys, "tree/b.txt").unwrap();
    remove(&fsys, "tree").unwrap();
    assert!(stat(&fsys, "tree").unwrap_err().is_not_found());
}

#[test]
fn test_parent_escape_is_rejected() {
    let outer = tempdir().unwrap();
    std::fs::create_dir(outer.path().join("inner")).unwrap();
    std::fs::write(outer.path().join("secret"), b"outside").unwrap();
    let fsys = DirFs::new(outer.path().join("inner"));

    let err = read_file(&fsys, "../secret").unwrap_err();
    assert!(matches!(err.cause, ErrorCause::InvalidPath));
    let err = mkdir_all(&fsys, "a/../../b", FileMode::perm(0o755)).unwrap_err();
    assert!(matches!(err.cause, ErrorCause::InvalidPath));
}

#[test]
fn test_refused_name_leaves_tree_untouched() {
    let dir = tempdir().unwrap();
    let fsys = DirFs::new(dir.path());

    let err = mkdir_all(&fsys, "a/..", FileMode::perm(0o755)).unwrap_err();
    assert!(matches!(err.cause, ErrorCause::InvalidPath));
    assert!(!dir.path().join("a").exists());
}

#[test]
fn test_from_config_creates_root() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("data/store");
    let config = DirFsConfig {
        create_root: true,
        ..DirFsConfig::new(&root)
    };

    let fsys = DirFs::from_config(&config).unwrap();
    assert_eq!(fsys.root(), root.as_path());
    assert!(root.is_dir());

    write_file(&fsys, "ok", FileMode::perm(0o644), b"1").unwrap();
    assert!(root.join("ok").is_file());
}

#[test]
fn test_from_config_missing_root() {
    let dir = tempdir().unwrap();
    let config = DirFsConfig::new(dir.path().join("absent"));
    assert!(matches!(
        DirFs::from_config(&config),
        Err(ConfigError::Io(_))
    ));
}

#[test]
fn test_from_config_root_is_file() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("file");
    std::fs::write(&file, b"").unwrap();
    assert!(matches!(
        DirFs::from_config(&DirFsConfig::new(&file)),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn test_from_config_loaded_from_json() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("from_json");
    let config_path = dir.path().join("dirfs.json");
    let json = serde_json::json!({ "root": root, "create_root": true, "root_mode": 0o700 });
    std::fs::write(&config_path, json.to_string()).unwrap();

    let config = DirFsConfig::load_from_path(&config_path).unwrap();
    let fsys = DirFs::from_config(&config).unwrap();
    assert!(is_path_dir(&fsys, ".").unwrap());
}
