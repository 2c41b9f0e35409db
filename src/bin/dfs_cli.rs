//! Diagnostic CLI for the SDK
//!
//! Small smoke-test tool against a real driver build: stat, list, create
//! and remove entries, and dump file contents. Requires the
//! `native-driver` feature (and the driver shared library installed).
//!
//! Usage:
//!   dfs-cli --config /etc/dfs/client.toml ls /
//!   dfs-cli --config /etc/dfs/client.toml cat /data/report.csv

use std::io::Write;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use dfs_sdk::api::file_ops::DfsClient;
use dfs_sdk::api::types::{SdkError, SdkResult};
use dfs_sdk::config::ClientConfig;
use dfs_sdk::driver::native::NativeDriver;
use dfs_sdk::logging;

/// Diagnostic client for the distributed filesystem
#[derive(Parser)]
#[command(name = "dfs-cli")]
#[command(about = "Smoke-test client for the distributed filesystem")]
struct Args {
    /// Mount configuration (TOML)
    #[arg(long, default_value = "/etc/dfs/client.toml")]
    config: String,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Print the attributes of a path
    Stat { path: String },

    /// List a directory
    Ls { path: String },

    /// Create a directory, including missing parents
    Mkdirs {
        path: String,

        /// Permission bits, octal
        #[arg(long, default_value = "755", value_parser = parse_octal)]
        mode: u32,
    },

    /// Remove a file
    Rm { path: String },

    /// Remove a directory
    Rmdir {
        path: String,

        #[arg(long)]
        recursive: bool,
    },

    /// Dump a file to stdout
    Cat { path: String },
}

fn parse_octal(s: &str) -> Result<u32, String> {
    u32::from_str_radix(s.trim_start_matches("0o"), 8).map_err(|e| e.to_string())
}

fn main() {
    let args = Args::parse();

    let config = match ClientConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("dfs-cli: {e}");
            std::process::exit(1);
        }
    };
    logging::init(&config.log_level);

    let fs = match DfsClient::mount(Arc::new(NativeDriver::new()), &config) {
        Ok(fs) => fs,
        Err(e) => {
            eprintln!("dfs-cli: mount failed: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&fs, args.cmd) {
        eprintln!("dfs-cli: {e}");
        std::process::exit(1);
    }
}

fn run(fs: &DfsClient, cmd: Cmd) -> SdkResult<()> {
    match cmd {
        Cmd::Stat { path } => match fs.get_attr(&path)? {
            Some(info) => println!("{info:?}"),
            None => println!("{path}: no such entry"),
        },
        Cmd::Ls { path } => {
            for entry in fs.list(&path)? {
                println!(
                    "{:06o} {:>6} {:>6} {:>12} {}",
                    entry.mode, entry.uid, entry.gid, entry.size, entry.name
                );
            }
        }
        Cmd::Mkdirs { path, mode } => {
            let (uid, gid) = unsafe { (libc::getuid(), libc::getgid()) };
            fs.mkdirs(&path, mode, uid, gid)?;
        }
        Cmd::Rm { path } => fs.unlink(&path)?,
        Cmd::Rmdir { path, recursive } => fs.rmdir(&path, recursive)?,
        Cmd::Cat { path } => {
            let open = fs.open(&path, libc::O_RDONLY, 0, 0, 0)?;
            let mut offset: i64 = 0;
            let mut buf = vec![0u8; 64 * 1024];
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            loop {
                match fs.read(open.fd, offset, &mut buf) {
                    Ok(0) => break,
                    Ok(n) => {
                        out.write_all(&buf[..n]).expect("write to stdout");
                        offset += n as i64;
                    }
                    Err(SdkError::EndOfStream { .. }) => break,
                    Err(e) => {
                        let _ = fs.close(open.fd);
                        return Err(e);
                    }
                }
            }
            fs.close(open.fd)?;
        }
    }
    Ok(())
}
