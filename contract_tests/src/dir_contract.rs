//! Listing and removal contract

use crate::test_helpers::verify_error;
use fs_caps::{
    mkdir_all, read_dir, remove, stat, walk_dir, write_file, FileMode, Fs, WalkControl,
};
use std::io::ErrorKind;

fn build_tree(fsys: &dyn Fs) {
    mkdir_all(fsys, "tree/sub", FileMode::perm(0o755)).unwrap();
    write_file(fsys, "tree/b.txt", FileMode::perm(0o644), b"b").unwrap();
    write_file(fsys, "tree/a.txt", FileMode::perm(0o644), b"a").unwrap();
    write_file(fsys, "tree/sub/c.txt", FileMode::perm(0o644), b"c").unwrap();
}

/// Listings are sorted by name and carry entry types
pub fn verify_listing(fsys: &dyn Fs) {
    build_tree(fsys);

    let entries = read_dir(fsys, "tree").unwrap();
    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["a.txt", "b.txt", "sub"]);
    assert!(!entries[0].is_dir());
    assert!(entries[2].is_dir());

    assert!(read_dir(fsys, "tree/sub/c.txt").is_err());
    let err = read_dir(fsys, "nowhere").unwrap_err();
    verify_error(&err, "read_dir", ErrorKind::NotFound);
}

/// The walk is depth-first in name order and honours `SkipDir`
pub fn verify_walk(fsys: &dyn Fs) {
    build_tree(fsys);

    let mut seen = Vec::new();
    walk_dir(fsys, "tree", |path, _| {
        seen.push(path.to_string());
        Ok(WalkControl::Continue)
    })
    .unwrap();
    assert_eq!(
        seen,
        vec!["tree", "tree/a.txt", "tree/b.txt", "tree/sub", "tree/sub/c.txt"]
    );

    let mut seen = Vec::new();
    walk_dir(fsys, "tree", |path, entry| {
        seen.push(path.to_string());
        if entry.is_dir() && path != "tree" {
            return Ok(WalkControl::SkipDir);
        }
        Ok(WalkControl::Continue)
    })
    .unwrap();
    assert_eq!(seen, vec!["tree", "tree/a.txt", "tree/b.txt", "tree/sub"]);
}

/// Files and empty directories can be removed; populated ones cannot
pub fn verify_remove(fsys: &dyn Fs) {
    build_tree(fsys);

    let err = remove(fsys, "tree/sub").unwrap_err();
    verify_error(&err, "remove", ErrorKind::DirectoryNotEmpty);

    remove(fsys, "tree/sub/c.txt").unwrap();
    remove(fsys, "tree/sub").unwrap();
    assert!(stat(fsys, "tree/sub").unwrap_err().is_not_found());

    let err = remove(fsys, "tree/sub").unwrap_err();
    verify_error(&err, "remove", ErrorKind::NotFound);

    let names: Vec<String> = read_dir(fsys, "tree")
        .unwrap()
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(names, vec!["a.txt", "b.txt"]);
}
