/// Filesystem operation facade
///
/// POSIX-like operations against the remote filesystem. Every call
/// validates its arguments, delegates to the native driver through the
/// session, and translates the driver's status code into a typed error.
pub mod file_ops;
pub mod types;

// Re-export main types
pub use file_ops::*;
pub use types::*;
