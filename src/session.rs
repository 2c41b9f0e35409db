//! Client session lifecycle
//!
//! A [`ClientSession`] owns exactly one opaque driver handle for the
//! lifetime of a logical mount: created once, configured with zero or
//! more key/value options, started once, closed once. The handle is
//! released at most once even if `close` races with `Drop`.
//!
//! Sessions are shared across threads without any lock of their own;
//! thread safety of the underlying handle is the driver's contract, and
//! adding a lock here would serialize what the native layer parallelizes.
//! Closing a session while other threads still use it (or still hold open
//! descriptors) is a caller hazard this layer does not detect.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;

use crate::api::types::{SdkError, SdkResult};
use crate::driver::{Driver, Status};

/// One logical connection to the filesystem, identified by an opaque
/// driver handle.
pub struct ClientSession {
    driver: Arc<dyn Driver>,
    id: u64,
    started: AtomicBool,
    closed: AtomicBool,
}

impl ClientSession {
    /// Ask the driver for a new client handle.
    pub fn create(driver: Arc<dyn Driver>) -> SdkResult<Self> {
        let id = driver.new_client();
        if id == 0 {
            return Err(SdkError::Session(
                "driver refused to allocate a client handle".to_string(),
            ));
        }
        debug!(cid = id, "created client session");
        Ok(Self {
            driver,
            id,
            started: AtomicBool::new(false),
            closed: AtomicBool::new(false),
        })
    }

    /// The opaque driver handle. Valid until [`ClientSession::close`].
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn driver(&self) -> &dyn Driver {
        self.driver.as_ref()
    }

    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::Acquire)
    }

    /// Apply one configuration option. Only valid before [`ClientSession::start`].
    pub fn configure(&self, key: &str, value: &str) -> SdkResult<()> {
        if key.trim().is_empty() {
            return Err(SdkError::InvalidArgument(
                "configuration key must not be blank".to_string(),
            ));
        }
        if self.is_started() {
            return Err(SdkError::Session(format!(
                "cannot set {key:?}: session already started"
            )));
        }
        let st = self.driver.set_client(self.id, key, value);
        if !Status::classify(st).is_ok() {
            return Err(SdkError::Session(format!(
                "driver rejected option {key:?}={value:?} (status {st})"
            )));
        }
        Ok(())
    }

    /// Finalize configuration and bring the session live. Calling twice
    /// is a caller error; this is not idempotent.
    pub fn start(&self) -> SdkResult<()> {
        if self.started.swap(true, Ordering::AcqRel) {
            return Err(SdkError::Session("session already started".to_string()));
        }
        let st = self.driver.start_client(self.id);
        if !Status::classify(st).is_ok() {
            // Allow reconfiguration and another start attempt.
            self.started.store(false, Ordering::Release);
            return Err(SdkError::Session(format!(
                "failed to start session {} (status {st})",
                self.id
            )));
        }
        debug!(cid = self.id, "session started");
        Ok(())
    }

    /// Release the driver handle. Safe to call whether or not `start`
    /// ever succeeded, and safe to call more than once; the handle is
    /// released exactly once.
    pub fn close(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            debug!(cid = self.id, "closing client session");
            self.driver.close_client(self.id);
        }
    }
}

impl Drop for ClientSession {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for ClientSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientSession")
            .field("id", &self.id)
            .field("started", &self.is_started())
            .field("closed", &self.closed.load(Ordering::Acquire))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    use crate::driver::{CountDirResult, OpenResult, StatInfo};

    /// Driver stub that accepts everything and counts closes.
    #[derive(Default)]
    struct StubDriver {
        refuse_handle: bool,
        closes: AtomicUsize,
    }

    impl Driver for StubDriver {
        fn new_client(&self) -> u64 {
            if self.refuse_handle {
                0
            } else {
                7
            }
        }
        fn set_client(&self, _cid: u64, _key: &str, _value: &str) -> i32 {
            0
        }
        fn start_client(&self, _cid: u64) -> i32 {
            0
        }
        fn close_client(&self, _cid: u64) {
            self.closes.fetch_add(1, Ordering::SeqCst);
        }
        fn open(
            &self,
            _cid: u64,
            _path: &str,
            _flags: i32,
            _mode: u32,
            _uid: u32,
            _gid: u32,
            _res: &mut OpenResult,
        ) -> i32 {
            0
        }
        fn flush(&self, _cid: u64, _fd: i64) -> i32 {
            0
        }
        fn close(&self, _cid: u64, _fd: i64) -> i32 {
            0
        }
        fn write(&self, _cid: u64, _fd: i64, _offset: i64, data: &[u8]) -> i64 {
            data.len() as i64
        }
        fn read(&self, _cid: u64, _fd: i64, _offset: i64, _buf: &mut [u8]) -> i64 {
            0
        }
        fn mkdirs(&self, _cid: u64, _path: &str, _mode: u32, _uid: u32, _gid: u32) -> i32 {
            0
        }
        fn unlink(&self, _cid: u64, _path: &str) -> i32 {
            0
        }
        fn rmdir(&self, _cid: u64, _path: &str, _recursive: bool) -> i32 {
            0
        }
        fn rename(&self, _cid: u64, _from: &str, _to: &str) -> i32 {
            0
        }
        fn getattr(&self, _cid: u64, _path: &str, _info: &mut StatInfo) -> i32 {
            0
        }
        fn setattr_by_path(&self, _cid: u64, _path: &str, _info: &StatInfo) -> i32 {
            0
        }
        fn countdir(&self, _cid: u64, _path: &str, _res: &mut CountDirResult) -> i32 {
            0
        }
        fn listattr(&self, _cid: u64, _ino: u64, _infos: &mut [StatInfo]) -> i32 {
            0
        }
    }

    #[test]
    fn test_create_rejects_zero_handle() {
        let driver = Arc::new(StubDriver {
            refuse_handle: true,
            ..Default::default()
        });
        assert!(matches!(
            ClientSession::create(driver),
            Err(SdkError::Session(_))
        ));
    }

    #[test]
    fn test_configure_after_start_fails() {
        let session = ClientSession::create(Arc::new(StubDriver::default())).unwrap();
        session.configure("volName", "vol1").unwrap();
        session.start().unwrap();
        assert!(matches!(
            session.configure("volName", "vol2"),
            Err(SdkError::Session(_))
        ));
    }

    #[test]
    fn test_configure_rejects_blank_key() {
        let session = ClientSession::create(Arc::new(StubDriver::default())).unwrap();
        assert!(matches!(
            session.configure("  ", "x"),
            Err(SdkError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_double_start_fails() {
        let session = ClientSession::create(Arc::new(StubDriver::default())).unwrap();
        session.start().unwrap();
        assert!(session.start().is_err());
    }

    #[test]
    fn test_handle_released_exactly_once() {
        let driver = Arc::new(StubDriver::default());
        let session = ClientSession::create(driver.clone()).unwrap();
        session.start().unwrap();
        session.close();
        session.close();
        drop(session);
        assert_eq!(driver.closes.load(Ordering::SeqCst), 1);
    }
}
