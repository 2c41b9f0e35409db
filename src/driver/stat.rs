//! Fixed-layout structures crossing the driver boundary
//!
//! These structs are shared memory layouts between this crate and the
//! native driver: field order and `#[repr(C)]` are part of the contract
//! and must not be rearranged. They derive the zerocopy marker traits so
//! output arrays can be allocated zeroed without `unsafe`.

use zerocopy::{FromBytes, FromZeros, Immutable, IntoBytes, KnownLayout};

/// Maximum entry-name length the driver will report.
pub const NAME_MAX: usize = 256;

/// `valid` mask bit: apply `mode`.
pub const ATTR_MODE: u32 = 1 << 0;
/// `valid` mask bit: apply `uid`.
pub const ATTR_UID: u32 = 1 << 1;
/// `valid` mask bit: apply `gid`.
pub const ATTR_GID: u32 = 1 << 2;
/// `valid` mask bit: apply `mtime`.
pub const ATTR_MTIME: u32 = 1 << 3;
/// `valid` mask bit: apply `atime`.
pub const ATTR_ATIME: u32 = 1 << 4;
/// `valid` mask bit: apply `size` (truncate).
pub const ATTR_SIZE: u32 = 1 << 5;

/// Attribute record exchanged with the driver.
///
/// On a stat or listing result all fields are populated and `valid` is
/// advisory. On a setattr call the driver applies only the fields whose
/// bit is set in `valid`; everything else in the struct is ignored.
/// Timestamps are seconds since the Unix epoch. `name` holds `name_len`
/// bytes of UTF-8, not NUL-terminated.
///
/// Field order is fixed: ino, size, ctime, mtime, atime, mode, uid, gid,
/// valid, name_len, pad, name.
#[derive(Clone, Copy, FromBytes, IntoBytes, KnownLayout, Immutable)]
#[repr(C)]
pub struct StatInfo {
    pub ino: u64,
    pub size: u64,
    pub ctime: i64,
    pub mtime: i64,
    pub atime: i64,
    pub mode: u32,
    pub uid: u32,
    pub gid: u32,
    pub valid: u32,
    pub name_len: u32,
    _pad: u32,
    pub name: [u8; NAME_MAX],
}

impl StatInfo {
    /// A fully zeroed record: empty mask, empty name. The starting point
    /// for every setattr call and every driver output slot.
    pub fn zeroed() -> Self {
        Self::new_zeroed()
    }

    /// Decode the entry name from its reported length (never a NUL scan).
    pub fn name_str(&self) -> Result<&str, std::str::Utf8Error> {
        let len = (self.name_len as usize).min(NAME_MAX);
        std::str::from_utf8(&self.name[..len])
    }

    /// Store an entry name, truncated to [`NAME_MAX`] bytes.
    pub fn set_name(&mut self, name: &str) {
        let bytes = name.as_bytes();
        let len = bytes.len().min(NAME_MAX);
        self.name[..len].copy_from_slice(&bytes[..len]);
        self.name_len = len as u32;
    }
}

impl std::fmt::Debug for StatInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let len = (self.name_len as usize).min(NAME_MAX);
        f.debug_struct("StatInfo")
            .field("ino", &self.ino)
            .field("size", &self.size)
            .field("ctime", &self.ctime)
            .field("mtime", &self.mtime)
            .field("atime", &self.atime)
            .field("mode", &format_args!("{:#o}", self.mode))
            .field("uid", &self.uid)
            .field("gid", &self.gid)
            .field("valid", &format_args!("{:#b}", self.valid))
            .field("name", &String::from_utf8_lossy(&self.name[..len]))
            .finish()
    }
}

/// Result of an `open` call: the descriptor plus open metadata.
///
/// Field order is fixed: fd, size, pos.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, KnownLayout, Immutable)]
#[repr(C)]
pub struct OpenResult {
    /// Descriptor for subsequent I/O, scoped to the issuing session.
    pub fd: i64,
    /// File size at open time.
    pub size: u64,
    /// Initial position (end of file when opened for append).
    pub pos: u64,
}

/// Result of a `countdir` call: the directory inode and its child count.
///
/// Field order is fixed: inode, num, pad.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, KnownLayout, Immutable)]
#[repr(C)]
pub struct CountDirResult {
    pub inode: u64,
    pub num: u32,
    _pad: u32,
}
