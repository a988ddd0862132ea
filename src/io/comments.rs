//! Skipping the comment block between the header and the size line

use std::io::BufRead;

use log::debug;

use crate::constants::COMMENT_MARKER;
use crate::error::Result;
use crate::io::LineReader;

/// True for lines the pre-body scan skips: blank lines and `%` comments.
pub fn is_comment_or_blank(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.is_empty() || trimmed.starts_with(COMMENT_MARKER)
}

/// Advance past comment and blank lines following the header.
///
/// The first line that is neither is pushed back, so the next read returns
/// it. Returns the number of lines skipped. Running out of input before a
/// data line appears is a `ReadFailure`: there is no matrix body.
pub fn skip_comments<R: BufRead>(reader: &mut LineReader<R>) -> Result<usize> {
    let mut skipped = 0;
    while is_comment_or_blank(reader.require_line()?) {
        skipped += 1;
    }
    reader.unread();

    debug!("skipped {} comment or blank lines", skipped);
    Ok(skipped)
}
