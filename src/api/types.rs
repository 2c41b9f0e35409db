//! Public API types for the operation facade

use thiserror::Error;

use crate::driver::StatInfo;

/// Errors surfaced by the SDK.
///
/// Every driver failure carries the operation name, the subject path or
/// descriptor, and the raw status code, so a native-layer failure is
/// diagnosable without native symbols.
#[derive(Debug, Error)]
pub enum SdkError {
    /// Caller-supplied value violates a stated precondition.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Session creation, configuration, or start failed.
    #[error("session error: {0}")]
    Session(String),

    /// The driver reported the missing-path sentinel on an operation
    /// that distinguishes it (directory count and listing).
    #[error("no such entry: {path}")]
    NotFound { path: String },

    /// Read past end of file.
    #[error("end of stream on fd {fd}")]
    EndOfStream { fd: i64 },

    /// Any other non-success driver status.
    #[error("{op} failed on {subject} (status {status})")]
    Driver {
        op: &'static str,
        subject: String,
        status: i64,
    },
}

pub type SdkResult<T> = Result<T, SdkError>;

/// Decoded directory entry: one child's name and attributes.
///
/// Produced by `list`; never passed back to the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStat {
    pub mode: u32,
    pub uid: u32,
    pub gid: u32,
    pub size: u64,
    pub ctime: i64,
    pub mtime: i64,
    pub atime: i64,
    pub name: String,
}

impl FileStat {
    /// Decode a raw attribute record. Fails if the entry name is not
    /// valid UTF-8 for its reported length.
    pub fn decode(info: &StatInfo) -> Result<Self, std::str::Utf8Error> {
        let name = info.name_str()?.to_string();
        Ok(Self {
            mode: info.mode,
            uid: info.uid,
            gid: info.gid,
            size: info.size,
            ctime: info.ctime,
            mtime: info.mtime,
            atime: info.atime,
            name,
        })
    }

    pub fn is_dir(&self) -> bool {
        // S_IFMT / S_IFDIR
        self.mode & 0o170000 == 0o040000
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::StatInfo;

    #[test]
    fn test_decode_entry() {
        let mut info = StatInfo::zeroed();
        info.mode = 0o040755;
        info.size = 42;
        info.set_name("logs");

        let stat = FileStat::decode(&info).unwrap();
        assert_eq!(stat.name, "logs");
        assert_eq!(stat.size, 42);
        assert!(stat.is_dir());
    }

    #[test]
    fn test_decode_rejects_invalid_utf8() {
        let mut info = StatInfo::zeroed();
        info.name[..2].copy_from_slice(&[0xff, 0xfe]);
        info.name_len = 2;
        assert!(FileStat::decode(&info).is_err());
    }
}
