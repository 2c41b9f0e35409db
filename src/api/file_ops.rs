//! File operations facade
//!
//! [`DfsClient`] is the main entry point for filesystem operations. It is
//! stateless per call: everything lives in the driver, keyed by the
//! session handle. Any number of threads may share one client; no locking
//! happens at this layer, and every call blocks until the driver returns.
//! Descriptors are not tracked here: the caller matches every `open`
//! with a `close` and must not use a descriptor after closing it or the
//! owning session.

use std::sync::Arc;

use tracing::{debug, warn};
use zerocopy::FromZeros;

use crate::api::types::{FileStat, SdkError, SdkResult};
use crate::config::ClientConfig;
use crate::driver::{
    CountDirResult, Driver, OpenResult, StatInfo, Status, ATTR_ATIME, ATTR_GID, ATTR_MODE,
    ATTR_MTIME, ATTR_SIZE, ATTR_UID,
};
use crate::session::ClientSession;

/// Filesystem client: the operation facade over one started session.
pub struct DfsClient {
    session: Arc<ClientSession>,
}

impl DfsClient {
    /// Wrap a started session. Fails if `start` has not succeeded yet.
    pub fn new(session: Arc<ClientSession>) -> SdkResult<Self> {
        if !session.is_started() {
            return Err(SdkError::Session(
                "session must be started before issuing operations".to_string(),
            ));
        }
        Ok(Self { session })
    }

    /// Create, configure, and start a session from a mount configuration,
    /// returning a ready client. The usual way in.
    pub fn mount(driver: Arc<dyn Driver>, config: &ClientConfig) -> SdkResult<Self> {
        config
            .validate()
            .map_err(|e| SdkError::Session(e.to_string()))?;
        let session = ClientSession::create(driver)?;
        for (key, value) in config.options() {
            session.configure(key, &value)?;
        }
        session.start()?;
        debug!(cid = session.id(), "mounted");
        Self::new(Arc::new(session))
    }

    pub fn session(&self) -> &Arc<ClientSession> {
        &self.session
    }

    fn driver(&self) -> &dyn Driver {
        self.session.driver()
    }

    fn cid(&self) -> u64 {
        self.session.id()
    }

    /// Map a non-OK status to a driver error carrying full context.
    fn check(&self, op: &'static str, subject: &str, st: i32) -> SdkResult<()> {
        if Status::classify(st).is_ok() {
            Ok(())
        } else {
            Err(SdkError::Driver {
                op,
                subject: subject.to_string(),
                status: st as i64,
            })
        }
    }

    /// Open (or create, per `flags`) the file at `path`.
    ///
    /// `flags` and `mode` are passed through to the driver untranslated;
    /// the usual POSIX `O_*` and permission-bit values apply. Returns the
    /// descriptor and open metadata.
    pub fn open(
        &self,
        path: &str,
        flags: i32,
        mode: u32,
        uid: u32,
        gid: u32,
    ) -> SdkResult<OpenResult> {
        verify_path(path)?;
        let mut res = OpenResult::new_zeroed();
        let st = self
            .driver()
            .open(self.cid(), path, flags, mode, uid, gid, &mut res);
        self.check("open", path, st)?;
        Ok(res)
    }

    /// Flush buffered writes for `fd`.
    pub fn flush(&self, fd: i64) -> SdkResult<()> {
        verify_fd(fd)?;
        let st = self.driver().flush(self.cid(), fd);
        self.check("flush", &format!("fd {fd}"), st)
    }

    /// Close `fd`. The descriptor must not be used afterwards.
    pub fn close(&self, fd: i64) -> SdkResult<()> {
        verify_fd(fd)?;
        let st = self.driver().close(self.cid(), fd);
        self.check("close", &format!("fd {fd}"), st)
    }

    /// Write `data` at `offset`.
    ///
    /// Returns the driver's byte count, which may be less than
    /// `data.len()`: the facade does not retry short writes, callers that
    /// need the full buffer written must loop.
    pub fn write(&self, fd: i64, offset: i64, data: &[u8]) -> SdkResult<usize> {
        verify_fd(fd)?;
        verify_offset(offset)?;
        let n = self.driver().write(self.cid(), fd, offset, data);
        if n < 0 {
            return Err(SdkError::Driver {
                op: "write",
                subject: format!("fd {fd} at offset {offset}"),
                status: n,
            });
        }
        Ok(n as usize)
    }

    /// Read up to `buf.len()` bytes from `offset` into `buf`.
    ///
    /// Returns the number of bytes read. Reading past the end of the file
    /// fails with [`SdkError::EndOfStream`].
    pub fn read(&self, fd: i64, offset: i64, buf: &mut [u8]) -> SdkResult<usize> {
        verify_fd(fd)?;
        verify_offset(offset)?;
        let n = self.driver().read(self.cid(), fd, offset, buf);
        if n >= 0 {
            return Ok(n as usize);
        }
        match Status::classify(n as i32) {
            Status::Eof => Err(SdkError::EndOfStream { fd }),
            _ => Err(SdkError::Driver {
                op: "read",
                subject: format!("fd {fd} at offset {offset}"),
                status: n,
            }),
        }
    }

    /// Create the directory at `path`, including missing parents.
    pub fn mkdirs(&self, path: &str, mode: u32, uid: u32, gid: u32) -> SdkResult<()> {
        verify_path(path)?;
        let st = self.driver().mkdirs(self.cid(), path, mode, uid, gid);
        self.check("mkdirs", path, st)
    }

    /// Remove the directory at `path`.
    pub fn rmdir(&self, path: &str, recursive: bool) -> SdkResult<()> {
        verify_path(path)?;
        debug!(path, recursive, "rmdir");
        let st = self.driver().rmdir(self.cid(), path, recursive);
        self.check("rmdir", path, st)
    }

    /// Remove the file at `path`.
    pub fn unlink(&self, path: &str) -> SdkResult<()> {
        verify_path(path)?;
        debug!(path, "unlink");
        let st = self.driver().unlink(self.cid(), path);
        self.check("unlink", path, st)
    }

    /// Rename `from` to `to`.
    pub fn rename(&self, from: &str, to: &str) -> SdkResult<()> {
        verify_path(from)?;
        verify_path(to)?;
        let st = self.driver().rename(self.cid(), from, to);
        if !Status::classify(st).is_ok() {
            return Err(SdkError::Driver {
                op: "rename",
                subject: format!("{from} -> {to}"),
                status: st as i64,
            });
        }
        Ok(())
    }

    /// Truncate (or extend) the file at `path` to `new_len` bytes.
    pub fn truncate(&self, path: &str, new_len: i64) -> SdkResult<()> {
        if new_len < 0 {
            return Err(SdkError::InvalidArgument(format!(
                "negative truncate length {new_len}"
            )));
        }
        verify_path(path)?;
        let mut info = StatInfo::zeroed();
        info.size = new_len as u64;
        info.valid = ATTR_SIZE;
        self.setattr("truncate", path, &info)
    }

    /// Change the permission bits of `path`.
    pub fn chmod(&self, path: &str, mode: u32) -> SdkResult<()> {
        verify_path(path)?;
        let mut info = StatInfo::zeroed();
        info.mode = mode;
        info.valid = ATTR_MODE;
        self.setattr("chmod", path, &info)
    }

    /// Change the owner of `path`.
    pub fn chown(&self, path: &str, uid: u32, gid: u32) -> SdkResult<()> {
        verify_path(path)?;
        let mut info = StatInfo::zeroed();
        info.uid = uid;
        info.gid = gid;
        info.valid = ATTR_UID | ATTR_GID;
        self.setattr("chown", path, &info)
    }

    /// Update the timestamps of `path`.
    ///
    /// A timestamp ≤ 0 means "leave unchanged", not "set to epoch": its
    /// mask bit stays clear. Both inputs ≤ 0 still issues the (no-op)
    /// driver call.
    pub fn set_times(&self, path: &str, mtime: i64, atime: i64) -> SdkResult<()> {
        verify_path(path)?;
        let mut info = StatInfo::zeroed();
        if mtime > 0 {
            info.mtime = mtime;
            info.valid |= ATTR_MTIME;
        }
        if atime > 0 {
            info.atime = atime;
            info.valid |= ATTR_ATIME;
        }
        self.setattr("set_times", path, &info)
    }

    fn setattr(&self, op: &'static str, path: &str, info: &StatInfo) -> SdkResult<()> {
        let st = self.driver().setattr_by_path(self.cid(), path, info);
        self.check(op, path, st)
    }

    /// Stat `path`.
    ///
    /// Returns `Ok(None)` when the path does not exist, unlike
    /// [`DfsClient::list`], which treats a missing directory as an error.
    /// All record fields are populated on success; `valid` is advisory.
    pub fn get_attr(&self, path: &str) -> SdkResult<Option<StatInfo>> {
        verify_path(path)?;
        let mut info = StatInfo::zeroed();
        let st = self.driver().getattr(self.cid(), path, &mut info);
        match Status::classify(st) {
            Status::Ok => Ok(Some(info)),
            Status::NotFound => {
                debug!(path, status = st, "stat on missing path");
                Ok(None)
            }
            _ => Err(SdkError::Driver {
                op: "getattr",
                subject: path.to_string(),
                status: st as i64,
            }),
        }
    }

    /// List the children of the directory at `path`.
    ///
    /// Two driver calls: a count phase resolving the directory inode and
    /// child count, then a fetch phase into an array sized exactly to
    /// that count. The directory may change between the two calls; no
    /// atomicity is guaranteed across them. An entry whose name does not
    /// decode as UTF-8 is logged and omitted from the result. An empty
    /// directory yields an empty `Vec`, not an error.
    pub fn list(&self, path: &str) -> SdkResult<Vec<FileStat>> {
        verify_path(path)?;

        let mut count = CountDirResult::new_zeroed();
        let st = self.driver().countdir(self.cid(), path, &mut count);
        match Status::classify(st) {
            Status::Ok => {}
            Status::NotFound => {
                return Err(SdkError::NotFound {
                    path: path.to_string(),
                })
            }
            _ => {
                return Err(SdkError::Driver {
                    op: "countdir",
                    subject: path.to_string(),
                    status: st as i64,
                })
            }
        }

        if count.num == 0 {
            return Ok(Vec::new());
        }

        let mut infos = vec![StatInfo::zeroed(); count.num as usize];
        let st = self.driver().listattr(self.cid(), count.inode, &mut infos);
        if Status::classify(st) == Status::NotFound {
            return Err(SdkError::NotFound {
                path: path.to_string(),
            });
        }
        if st < 0 {
            return Err(SdkError::Driver {
                op: "listattr",
                subject: path.to_string(),
                status: st as i64,
            });
        }

        let mut entries = Vec::with_capacity(infos.len());
        for info in &infos {
            match FileStat::decode(info) {
                Ok(entry) => entries.push(entry),
                Err(err) => {
                    warn!(path, ino = info.ino, %err, "skipping entry with undecodable name");
                }
            }
        }
        Ok(entries)
    }
}

fn verify_path(path: &str) -> SdkResult<()> {
    if path.trim().is_empty() {
        return Err(SdkError::InvalidArgument(
            "path must not be blank".to_string(),
        ));
    }
    Ok(())
}

fn verify_fd(fd: i64) -> SdkResult<()> {
    if fd < 1 {
        return Err(SdkError::InvalidArgument(format!("invalid fd {fd}")));
    }
    Ok(())
}

fn verify_offset(offset: i64) -> SdkResult<()> {
    if offset < 0 {
        return Err(SdkError::InvalidArgument(format!(
            "negative offset {offset}"
        )));
    }
    Ok(())
}
