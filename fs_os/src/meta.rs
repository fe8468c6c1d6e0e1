//! Host metadata to portable mode bits

use fs_caps::{FileInfo, FileMode};
use std::fs;

/// Type bits for a host file type
pub(crate) fn type_bits(file_type: fs::FileType) -> FileMode {
    if file_type.is_dir() {
        return FileMode::DIR;
    }
    if file_type.is_symlink() {
        return FileMode::SYMLINK;
    }
    if file_type.is_file() {
        return FileMode::empty();
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::FileTypeExt;
        if file_type.is_fifo() {
            return FileMode::NAMED_PIPE;
        }
        if file_type.is_socket() {
            return FileMode::SOCKET;
        }
        if file_type.is_char_device() {
            return FileMode::DEVICE | FileMode::CHAR_DEVICE;
        }
        if file_type.is_block_device() {
            return FileMode::DEVICE;
        }
    }

    FileMode::IRREGULAR
}

/// Full mode: type, permission and setuid/setgid/sticky bits
pub(crate) fn mode_of(metadata: &fs::Metadata) -> FileMode {
    let mut mode = type_bits(metadata.file_type());

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let raw = metadata.permissions().mode();
        mode |= FileMode::perm(raw);
        if raw & 0o4000 != 0 {
            mode |= FileMode::SETUID;
        }
        if raw & 0o2000 != 0 {
            mode |= FileMode::SETGID;
        }
        if raw & 0o1000 != 0 {
            mode |= FileMode::STICKY;
        }
    }

    #[cfg(not(unix))]
    {
        mode |= if metadata.permissions().readonly() {
            FileMode::perm(0o555)
        } else {
            FileMode::perm(0o777)
        };
    }

    mode
}

pub(crate) fn info_of(name: &str, metadata: &fs::Metadata) -> FileInfo {
    let info = FileInfo::new(name, metadata.len(), mode_of(metadata));
    match metadata.modified() {
        Ok(modified) => info.with_modified(modified),
        Err(_) => info,
    }
}
