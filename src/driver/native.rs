//! Binding to the driver shared library
//!
//! The driver is a Go shared library; strings cross the boundary as a
//! borrowed `(ptr, len)` pair, never NUL-terminated. The exported symbols
//! below are the whole surface this crate uses. Only compiled with the
//! `native-driver` feature since linking requires the proprietary
//! `libdfsdriver` to be installed.

use std::os::raw::{c_char, c_int};

use super::{CountDirResult, Driver, OpenResult, StatInfo};

/// Borrowed string view in the layout the driver expects.
///
/// The pointed-at bytes must outlive the call; every use below borrows
/// from a `&str` argument that does.
#[repr(C)]
struct StrView {
    ptr: *const c_char,
    len: isize,
}

impl StrView {
    fn of(s: &str) -> Self {
        Self {
            ptr: s.as_ptr() as *const c_char,
            len: s.len() as isize,
        }
    }
}

#[link(name = "dfsdriver")]
extern "C" {
    fn dfs_new_client() -> u64;
    fn dfs_set_client(cid: u64, key: StrView, value: StrView) -> c_int;
    fn dfs_start_client(cid: u64) -> c_int;
    fn dfs_close_client(cid: u64);

    fn dfs_open(
        cid: u64,
        path: StrView,
        flags: c_int,
        mode: u32,
        uid: u32,
        gid: u32,
        res: *mut OpenResult,
    ) -> c_int;
    fn dfs_flush(cid: u64, fd: i64) -> c_int;
    fn dfs_close(cid: u64, fd: i64) -> c_int;
    fn dfs_write(cid: u64, fd: i64, offset: i64, data: *const u8, len: c_int) -> i64;
    fn dfs_read(cid: u64, fd: i64, offset: i64, buf: *mut u8, len: c_int) -> i64;

    fn dfs_mkdirs(cid: u64, path: StrView, mode: u32, uid: u32, gid: u32) -> c_int;
    fn dfs_unlink(cid: u64, path: StrView) -> c_int;
    fn dfs_rmdir(cid: u64, path: StrView, recursive: u8) -> c_int;
    fn dfs_rename(cid: u64, from: StrView, to: StrView) -> c_int;

    fn dfs_getattr(cid: u64, path: StrView, info: *mut StatInfo) -> c_int;
    fn dfs_setattr_by_path(cid: u64, path: StrView, info: *const StatInfo) -> c_int;
    fn dfs_countdir(cid: u64, path: StrView, res: *mut CountDirResult) -> c_int;
    fn dfs_listattr(cid: u64, ino: u64, num: c_int, infos: *mut StatInfo) -> c_int;
}

/// [`Driver`] implementation backed by the shared library.
///
/// Stateless; the driver keys everything off the session handle.
#[derive(Debug, Default)]
pub struct NativeDriver;

impl NativeDriver {
    pub fn new() -> Self {
        Self
    }
}

impl Driver for NativeDriver {
    fn new_client(&self) -> u64 {
        unsafe { dfs_new_client() }
    }

    fn set_client(&self, cid: u64, key: &str, value: &str) -> i32 {
        unsafe { dfs_set_client(cid, StrView::of(key), StrView::of(value)) }
    }

    fn start_client(&self, cid: u64) -> i32 {
        unsafe { dfs_start_client(cid) }
    }

    fn close_client(&self, cid: u64) {
        unsafe { dfs_close_client(cid) }
    }

    fn open(
        &self,
        cid: u64,
        path: &str,
        flags: i32,
        mode: u32,
        uid: u32,
        gid: u32,
        res: &mut OpenResult,
    ) -> i32 {
        unsafe { dfs_open(cid, StrView::of(path), flags, mode, uid, gid, res) }
    }

    fn flush(&self, cid: u64, fd: i64) -> i32 {
        unsafe { dfs_flush(cid, fd) }
    }

    fn close(&self, cid: u64, fd: i64) -> i32 {
        unsafe { dfs_close(cid, fd) }
    }

    fn write(&self, cid: u64, fd: i64, offset: i64, data: &[u8]) -> i64 {
        unsafe { dfs_write(cid, fd, offset, data.as_ptr(), data.len() as c_int) }
    }

    fn read(&self, cid: u64, fd: i64, offset: i64, buf: &mut [u8]) -> i64 {
        unsafe { dfs_read(cid, fd, offset, buf.as_mut_ptr(), buf.len() as c_int) }
    }

    fn mkdirs(&self, cid: u64, path: &str, mode: u32, uid: u32, gid: u32) -> i32 {
        unsafe { dfs_mkdirs(cid, StrView::of(path), mode, uid, gid) }
    }

    fn unlink(&self, cid: u64, path: &str) -> i32 {
        unsafe { dfs_unlink(cid, StrView::of(path)) }
    }

    fn rmdir(&self, cid: u64, path: &str, recursive: bool) -> i32 {
        unsafe { dfs_rmdir(cid, StrView::of(path), recursive as u8) }
    }

    fn rename(&self, cid: u64, from: &str, to: &str) -> i32 {
        unsafe { dfs_rename(cid, StrView::of(from), StrView::of(to)) }
    }

    fn getattr(&self, cid: u64, path: &str, info: &mut StatInfo) -> i32 {
        unsafe { dfs_getattr(cid, StrView::of(path), info) }
    }

    fn setattr_by_path(&self, cid: u64, path: &str, info: &StatInfo) -> i32 {
        unsafe { dfs_setattr_by_path(cid, StrView::of(path), info) }
    }

    fn countdir(&self, cid: u64, path: &str, res: &mut CountDirResult) -> i32 {
        unsafe { dfs_countdir(cid, StrView::of(path), res) }
    }

    fn listattr(&self, cid: u64, ino: u64, infos: &mut [StatInfo]) -> i32 {
        unsafe { dfs_listattr(cid, ino, infos.len() as c_int, infos.as_mut_ptr()) }
    }
}
