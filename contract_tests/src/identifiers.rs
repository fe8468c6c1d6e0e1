//! Stable identifiers
//!
//! Mode bits, flag sets and capability names are part of the public
//! contract: they are persisted by callers and appear in diagnostics.

use fs_caps::FileInfo;

// ===== Mode bit layout =====
#[allow(dead_code)]
const MODE_DIR: u32 = 1 << 31;
#[allow(dead_code)]
const MODE_SYMLINK: u32 = 1 << 27;
#[allow(dead_code)]
const MODE_IRREGULAR: u32 = 1 << 19;
#[allow(dead_code)]
const MODE_PERM: u32 = 0o777;

/// Decodes a persisted [`FileInfo`]
pub fn decode_info(json: &str) -> FileInfo {
    serde_json::from_str(json).expect("Failed to deserialize file info")
}
