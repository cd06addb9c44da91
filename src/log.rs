// src/log.rs
//! Logging front-end.
//!
//! The `logf!` / `logd!` / `loge!` macros emit `tracing` events. Nothing is
//! printed until a binary calls [`init`], which routes events to stderr and,
//! optionally, to a plain-text debug log.
use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing::Level;
use tracing::metadata::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt};

#[doc(hidden)]
pub use tracing as __tracing;

/// Install the global subscriber. Calling it again is a no-op.
///
/// The file layer always records at `DEBUG`; `level` only applies to stderr.
pub fn init(level: Level, log_file: Option<&Path>) {
    let stderr = fmt::layer()
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .with_filter(LevelFilter::from_level(level));

    // No subscriber exists yet, so a missing log file can only be reported on stderr
    let file = log_file
        .and_then(|path| match open_log(path) {
            Ok(f) => Some(f),
            Err(e) => {
                eprintln!("Debug log disabled, cannot open {}: {e}", path.display());
                None
            }
        })
        .map(|f| {
            fmt::layer()
                .with_writer(Mutex::new(f))
                .with_ansi(false)
                .with_filter(LevelFilter::DEBUG)
        });

    let _ = tracing_subscriber::registry()
        .with(stderr)
        .with(file)
        .try_init();
}

/// Open (creating parents) the debug log for appending.
pub fn open_log(path: &Path) -> io::Result<fs::File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        $crate::log::__tracing::info!($($arg)*)
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        $crate::log::__tracing::debug!($($arg)*)
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        $crate::log::__tracing::error!($($arg)*)
    };
}
