// Rust guideline compliant 2026-10-16

//! Terminal helpers for the Adoptly CLI.

use std::env;

/// Determines if colored output should be used.
///
/// Respects the NO_COLOR environment variable and terminal capabilities.
///
/// # Returns
/// `true` if colored output should be used, `false` otherwise
pub fn should_use_color() -> bool {
    if env::var_os("NO_COLOR").is_some() {
        return false;
    }

    atty::is(atty::Stream::Stdout)
}

/// Returns true if stderr is attached to a terminal.
pub fn stderr_is_terminal() -> bool {
    atty::is(atty::Stream::Stderr)
}
