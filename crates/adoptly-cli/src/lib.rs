// Rust guideline compliant 2026-10-16

//! Adoptly CLI library.
//!
//! This library exposes the CLI modules for use in tests and the `adopt`
//! binary.

pub mod commands;
pub mod logging;
pub mod output;
pub mod terminal;

pub use commands::exit_code;
pub use logging::init_tracing;
pub use output::{create_formatter, OutputFormatter};
pub use terminal::should_use_color;
