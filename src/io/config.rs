//! Configuration for the Matrix Market readers

use crate::constants::MAX_LINE_LENGTH;

/// Limits applied while reading a Matrix Market stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Maximum number of bytes in one line, line terminator included.
    /// Longer lines are rejected with `LineTooLong`.
    pub max_line_length: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            max_line_length: MAX_LINE_LENGTH,
        }
    }
}

impl ReaderConfig {
    /// Create a config with a custom line limit
    pub fn with_max_line_length(max_line_length: usize) -> Self {
        Self { max_line_length }
    }
}
