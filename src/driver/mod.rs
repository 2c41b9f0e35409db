//! Native client driver boundary
//!
//! Everything below this crate (networking, the metadata service,
//! replication, caching) lives in the native client driver and is
//! reachable only through the [`Driver`] trait. The trait mirrors the
//! driver's exported call surface one to one, which keeps the facade
//! testable against an in-memory driver and keeps the real binding
//! ([`native`], behind the `native-driver` feature) a thin marshaling
//! layer.
//!
//! Every call takes the session handle (`cid`) as its first argument.
//! Status-returning calls use the code table in [`status`]; `write` and
//! `read` return a byte count or a negative code in the same table.

pub mod stat;
pub mod status;

#[cfg(feature = "native-driver")]
pub mod native;

pub use stat::{
    CountDirResult, OpenResult, StatInfo, ATTR_ATIME, ATTR_GID, ATTR_MODE, ATTR_MTIME, ATTR_SIZE,
    ATTR_UID, NAME_MAX,
};
pub use status::{Status, STATUS_EOF, STATUS_ERROR, STATUS_NOT_FOUND, STATUS_OK};

/// The native driver call surface.
///
/// Implementations must be safe to call from any number of threads
/// concurrently; the driver owns the thread safety of the underlying
/// handle and this crate adds no locking of its own.
pub trait Driver: Send + Sync {
    // Session lifecycle.

    /// Allocate a new client handle. Returns 0 on allocation failure.
    fn new_client(&self) -> u64;

    /// Apply one configuration option to a not-yet-started client.
    fn set_client(&self, cid: u64, key: &str, value: &str) -> i32;

    /// Finalize configuration and bring the client live.
    fn start_client(&self, cid: u64) -> i32;

    /// Release the handle. A no-op for handles that never started.
    fn close_client(&self, cid: u64);

    // File I/O.

    /// Open (or create, per `flags`) the file at `path`.
    fn open(
        &self,
        cid: u64,
        path: &str,
        flags: i32,
        mode: u32,
        uid: u32,
        gid: u32,
        res: &mut OpenResult,
    ) -> i32;

    fn flush(&self, cid: u64, fd: i64) -> i32;

    fn close(&self, cid: u64, fd: i64) -> i32;

    /// Write `data` at `offset`. Returns bytes written (possibly short)
    /// or a negative status code.
    fn write(&self, cid: u64, fd: i64, offset: i64, data: &[u8]) -> i64;

    /// Read into `buf` from `offset`. Returns bytes read or a negative
    /// status code; [`STATUS_EOF`] means read past end.
    fn read(&self, cid: u64, fd: i64, offset: i64, buf: &mut [u8]) -> i64;

    // Namespace.

    fn mkdirs(&self, cid: u64, path: &str, mode: u32, uid: u32, gid: u32) -> i32;

    fn unlink(&self, cid: u64, path: &str) -> i32;

    fn rmdir(&self, cid: u64, path: &str, recursive: bool) -> i32;

    fn rename(&self, cid: u64, from: &str, to: &str) -> i32;

    // Metadata.

    /// Stat `path` into `info`.
    fn getattr(&self, cid: u64, path: &str, info: &mut StatInfo) -> i32;

    /// Apply the fields selected by `info.valid` to `path`.
    fn setattr_by_path(&self, cid: u64, path: &str, info: &StatInfo) -> i32;

    /// Resolve a directory to its inode and child count.
    fn countdir(&self, cid: u64, path: &str, res: &mut CountDirResult) -> i32;

    /// Fill `infos` with the attributes of the directory's children.
    /// `infos.len()` is the count negotiated by [`Driver::countdir`].
    fn listattr(&self, cid: u64, ino: u64, infos: &mut [StatInfo]) -> i32;
}
