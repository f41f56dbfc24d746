// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Logging for the bucketfs workspace.
//!
//! Usage:
//! - Set BUCKETFS_LOG=off (default) - no logs
//! - Set BUCKETFS_LOG=info - basic operation logs
//! - Set BUCKETFS_LOG=debug - per-request backend logs

use std::sync::Once;

// Re-export emit so macros can use it
pub use emit;

/// Environment variable selecting the minimum log level.
pub const LOG_ENV: &str = "BUCKETFS_LOG";

static INIT: Once = Once::new();

/// Parse a `BUCKETFS_LOG` value. `None` means logging is off.
#[must_use]
pub fn parse_level(value: &str) -> Option<emit::Level> {
    match value {
        "off" => None,
        "debug" => Some(emit::Level::Debug),
        "warn" => Some(emit::Level::Warn),
        "error" => Some(emit::Level::Error),
        _ => Some(emit::Level::Info),
    }
}

/// Initialize diagnostics based on the BUCKETFS_LOG environment variable.
///
/// Safe to call more than once; only the first call has any effect.
pub fn init_diagnostics() {
    INIT.call_once(|| {
        let log_level = std::env::var(LOG_ENV).unwrap_or_else(|_| "off".to_string());

        let Some(level) = parse_level(&log_level) else {
            return;
        };

        let rt = emit::setup()
            .emit_to(emit_term::stderr())
            .emit_when(emit::level::min_filter(level))
            .init();

        if !matches!(log_level.as_str(), "debug" | "info" | "warn" | "error") {
            emit::warn!("unknown {env} value {value}, using info", env: LOG_ENV, value: log_level);
        }

        // The runtime lives for the rest of the process.
        std::mem::forget(rt);
    });
}

/// Log basic operations (opened a store, wrote a file).
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::emit::info!($($arg)*)
    };
}

/// Log detailed diagnostics (backend keys, listing counts).
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::emit::debug!($($arg)*)
    };
}

/// Log recoverable problems, e.g. a writer dropped without being closed.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::emit::warn!($($arg)*)
    };
}

/// Log failures that abort an operation.
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::emit::error!($($arg)*)
    };
}

pub use init_diagnostics as init;
