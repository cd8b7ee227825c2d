#![deny(missing_docs)]
//! Shared logging utilities for the busboard workspace.
//!
//! This crate provides the `board_*` logging macros used across the codebase,
//! the poll-cycle counter they tag each line with, and a minimal test
//! initializer for the global logger.

use std::sync::atomic::{AtomicU64, Ordering};

#[doc(hidden)]
pub use log;

/// Number of arrival requests issued since startup.
static POLL_CYCLE: AtomicU64 = AtomicU64::new(0);

/// Advances the poll-cycle counter and returns the new value.
/// The host calls this once per outbound arrivals request.
pub fn advance_poll_cycle() -> u64 {
    POLL_CYCLE.fetch_add(1, Ordering::Relaxed) + 1
}

/// Returns the current poll cycle, or 0 before the first request.
pub fn poll_cycle() -> u64 {
    POLL_CYCLE.load(Ordering::Relaxed)
}

/// Logs a trace-level message tagged with the current poll cycle.
#[macro_export]
macro_rules! board_trace {
    ($($arg:tt)*) => {{
        $crate::log::trace!("[poll {}] {}", $crate::poll_cycle(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message tagged with the current poll cycle.
#[macro_export]
macro_rules! board_info {
    ($($arg:tt)*) => {{
        $crate::log::info!("[poll {}] {}", $crate::poll_cycle(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message tagged with the current poll cycle.
#[macro_export]
macro_rules! board_debug {
    ($($arg:tt)*) => {{
        $crate::log::debug!("[poll {}] {}", $crate::poll_cycle(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message tagged with the current poll cycle.
#[macro_export]
macro_rules! board_warn {
    ($($arg:tt)*) => {{
        $crate::log::warn!("[poll {}] {}", $crate::poll_cycle(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message tagged with the current poll cycle.
#[macro_export]
macro_rules! board_error {
    ($($arg:tt)*) => {{
        $crate::log::error!("[poll {}] {}", $crate::poll_cycle(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

#[cfg(test)]
mod tests {
    use super::{advance_poll_cycle, poll_cycle};

    #[test]
    fn poll_cycle_only_moves_forward() {
        let before = poll_cycle();
        let advanced = advance_poll_cycle();
        assert!(advanced > before);
        assert!(poll_cycle() >= advanced);
    }

    #[test]
    fn macros_accept_format_arguments() {
        super::initialize_for_tests();
        board_info!("stop={} limit={}", "490008660N", 5);
        board_debug!("plain message");
    }
}
