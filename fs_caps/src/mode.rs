//! File mode bits and open flags
//!
//! [`FileMode`] packs file-type markers into the high bits and Unix-style
//! permission bits into the low nine. The two ranges never overlap.
//!
//! [`OpenFlags`] selects the access and creation semantics of
//! [`WriteFs::open_file`](crate::WriteFs::open_file). The numeric values are
//! local to this crate; providers translate them for their host.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

bitflags! {
    /// File type and permission bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct FileMode: u32 {
        /// Directory
        const DIR = 1 << 31;
        /// Append-only
        const APPEND = 1 << 30;
        /// Exclusive use
        const EXCLUSIVE = 1 << 29;
        /// Temporary file
        const TEMPORARY = 1 << 28;
        /// Symbolic link
        const SYMLINK = 1 << 27;
        /// Device file
        const DEVICE = 1 << 26;
        /// Named pipe (FIFO)
        const NAMED_PIPE = 1 << 25;
        /// Unix domain socket
        const SOCKET = 1 << 24;
        /// Setuid
        const SETUID = 1 << 23;
        /// Setgid
        const SETGID = 1 << 22;
        /// Character device, set together with `DEVICE`
        const CHAR_DEVICE = 1 << 21;
        /// Sticky
        const STICKY = 1 << 20;
        /// Non-regular file with no other known type
        const IRREGULAR = 1 << 19;

        /// Mask of the file-type bits
        const TYPE = Self::DIR.bits()
            | Self::SYMLINK.bits()
            | Self::NAMED_PIPE.bits()
            | Self::SOCKET.bits()
            | Self::DEVICE.bits()
            | Self::CHAR_DEVICE.bits()
            | Self::IRREGULAR.bits();

        /// Mask of the Unix permission bits
        const PERM = 0o777;
    }
}

impl FileMode {
    /// Builds a mode holding only permission bits
    ///
    /// Bits outside `0o777` are dropped.
    pub const fn perm(bits: u32) -> Self {
        Self::from_bits_truncate(bits & Self::PERM.bits())
    }

    /// Returns the file-type portion of the mode
    pub fn file_type(self) -> FileMode {
        self & FileMode::TYPE
    }

    /// Returns the permission portion of the mode
    pub fn permissions(self) -> u32 {
        (self & FileMode::PERM).bits()
    }

    /// True when no type bit is set
    pub fn is_regular(self) -> bool {
        self.file_type().is_empty()
    }

    pub fn is_dir(self) -> bool {
        self.contains(FileMode::DIR)
    }

    pub fn is_symlink(self) -> bool {
        self.contains(FileMode::SYMLINK)
    }
}

impl fmt::Display for FileMode {
    /// Renders like `ls -l`, e.g. `drwxr-xr-x` or `-rw-r--r--`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const TYPE_CHARS: [(FileMode, char); 13] = [
            (FileMode::DIR, 'd'),
            (FileMode::APPEND, 'a'),
            (FileMode::EXCLUSIVE, 'l'),
            (FileMode::TEMPORARY, 'T'),
            (FileMode::SYMLINK, 'L'),
            (FileMode::DEVICE, 'D'),
            (FileMode::NAMED_PIPE, 'p'),
            (FileMode::SOCKET, 'S'),
            (FileMode::SETUID, 'u'),
            (FileMode::SETGID, 'g'),
            (FileMode::CHAR_DEVICE, 'c'),
            (FileMode::STICKY, 't'),
            (FileMode::IRREGULAR, '?'),
        ];

        let mut wrote_type = false;
        for (flag, c) in TYPE_CHARS {
            if self.contains(flag) {
                write!(f, "{}", c)?;
                wrote_type = true;
            }
        }
        if !wrote_type {
            write!(f, "-")?;
        }

        let perm = self.permissions();
        for (i, c) in "rwxrwxrwx".chars().enumerate() {
            if perm & (1 << (8 - i)) != 0 {
                write!(f, "{}", c)?;
            } else {
                write!(f, "-")?;
            }
        }
        Ok(())
    }
}

bitflags! {
    /// Flags for opening a file
    ///
    /// Read-only access is the empty set, see [`OpenFlags::READ_ONLY`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct OpenFlags: u32 {
        /// Open write-only
        const WRITE_ONLY = 1 << 0;
        /// Open read-write
        const READ_WRITE = 1 << 1;
        /// Append on every write
        const APPEND = 1 << 2;
        /// Create the file if it does not exist
        const CREATE = 1 << 3;
        /// With `CREATE`, the file must not already exist
        const EXCLUSIVE = 1 << 4;
        /// Synchronous writes
        const SYNC = 1 << 5;
        /// Truncate a regular writable file on open
        const TRUNCATE = 1 << 6;
    }
}

impl OpenFlags {
    /// Read-only access, no creation semantics
    pub const READ_ONLY: OpenFlags = OpenFlags::empty();

    /// True for exactly [`OpenFlags::READ_ONLY`]
    pub fn is_read_only(self) -> bool {
        self.is_empty()
    }

    /// True when the flags grant write access
    pub fn is_writable(self) -> bool {
        self.intersects(OpenFlags::WRITE_ONLY | OpenFlags::READ_WRITE | OpenFlags::APPEND)
    }

    /// True when the flags grant read access
    pub fn is_readable(self) -> bool {
        !self.contains(OpenFlags::WRITE_ONLY) || self.contains(OpenFlags::READ_WRITE)
    }
}
