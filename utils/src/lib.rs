//! Shared utilities for suiscope.

pub mod logging;

pub use logging::{init_logging, LogFormat, LogFormatParseError};
