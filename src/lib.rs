//! dfs-sdk - Client SDK for a distributed filesystem
//!
//! This crate exposes POSIX-like filesystem operations (open, read, write,
//! mkdirs, rename, stat, directory listing, ...) against a remote
//! distributed filesystem by delegating every operation to the native
//! client driver across a foreign-function boundary. It features:
//!
//! - **Session Abstraction**: one opaque driver handle per logical mount,
//!   with a create → configure → start → close lifecycle
//! - **Typed Errors**: native integer status codes are classified once and
//!   surfaced as a small error taxonomy carrying the failing path or
//!   descriptor and the raw code
//! - **Fixed-Layout Marshaling**: attribute records and open/count results
//!   are `#[repr(C)]` structs with documented field order, including the
//!   validity-mask protocol for partial metadata updates
//! - **Two-Phase Listing**: directory contents are fetched with a
//!   count-then-fetch protocol because the driver cannot return a
//!   variable-length result in one call
//!
//! # Architecture
//!
//! - **Driver Boundary** ([`driver`]): the native call surface as a trait,
//!   the status-code taxonomy, the fixed-layout structs, and (behind the
//!   `native-driver` feature) the binding to the shared library
//! - **Session** ([`session`]): client handle lifecycle
//! - **API Layer** ([`api`]): the [`api::file_ops::DfsClient`] operation
//!   facade and the public error/result types
//! - **Configuration** ([`config`]): TOML mount configuration, expanded
//!   into the driver's key/value options
//! - **Logging** ([`logging`]): `tracing` subscriber setup for processes
//!   that do not install their own
//!
//! The driver owns all networking, metadata, replication, and caching;
//! it also owns thread safety of the shared handle. This crate adds no
//! locks, no retries, and no timeouts: a hung driver call hangs the
//! caller, and retry policy belongs to the layer above.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use dfs_sdk::api::file_ops::DfsClient;
//! use dfs_sdk::api::types::SdkError;
//! use dfs_sdk::config::ClientConfig;
//! use dfs_sdk::driver::Driver;
//!
//! # fn example(driver: Arc<dyn Driver>) -> Result<(), SdkError> {
//! let config = ClientConfig::from_file("/etc/dfs/client.toml").unwrap();
//! let fs = DfsClient::mount(driver, &config)?;
//!
//! let open = fs.open("/data/report.csv", libc::O_RDONLY, 0o644, 0, 0)?;
//! let mut buf = vec![0u8; 4096];
//! let n = fs.read(open.fd, 0, &mut buf)?;
//! println!("read {n} bytes of {}", open.size);
//! fs.close(open.fd)?;
//!
//! for entry in fs.list("/data")? {
//!     println!("{} {} bytes", entry.name, entry.size);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod driver;
pub mod logging;
pub mod session;
