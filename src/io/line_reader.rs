//! Bounded line reading with one-line pushback and mark/rewind
//!
//! All three readers share one [`LineReader`] over the input stream. It owns a
//! single line buffer that is reused for every line, never pulls more than
//! `max_line_length + 1` bytes for one line, and hands lines out as `&str`
//! with the terminator already removed.
//!
//! Two repositioning tools are offered:
//! - [`LineReader::unread`] pushes the last line back so the next reader sees
//!   it again. This needs nothing from the stream.
//! - [`LineReader::mark`] / [`LineReader::rewind`] record a byte position and
//!   return to it later. These need a `Seek` stream.

use std::io::{self, BufRead, Read, Seek, SeekFrom};

use crate::error::{MmError, Result};
use crate::io::ReaderConfig;

/// Position in the stream recorded by [`LineReader::mark`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamMark {
    offset: u64,
    line: usize,
}

impl StreamMark {
    /// Byte offset from the start of the stream
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Number of lines read before the mark
    pub fn line(&self) -> usize {
        self.line
    }
}

/// Line reader with a reusable bounded buffer
pub struct LineReader<R> {
    inner: R,
    /// Raw bytes of the current line, terminator included
    buffer: Vec<u8>,
    max_line_length: usize,
    has_line: bool,
    pushed_back: bool,
    lines_read: usize,
}

impl<R: BufRead> LineReader<R> {
    /// Wrap a stream using the default line limit
    pub fn new(inner: R) -> Result<Self> {
        Self::with_config(inner, &ReaderConfig::default())
    }

    /// Wrap a stream using the limits in `config`
    pub fn with_config(inner: R, config: &ReaderConfig) -> Result<Self> {
        let mut buffer = Vec::new();
        buffer.try_reserve_exact(config.max_line_length.saturating_add(1))?;

        Ok(Self {
            inner,
            buffer,
            max_line_length: config.max_line_length,
            has_line: false,
            pushed_back: false,
            lines_read: 0,
        })
    }

    /// The line limit in bytes
    pub fn max_line_length(&self) -> usize {
        self.max_line_length
    }

    /// 1-based number of the line most recently returned, 0 before the first
    pub fn line_number(&self) -> usize {
        self.lines_read
    }

    /// Read the next line with its terminator (`\n` or `\r\n`) removed.
    ///
    /// Returns `Ok(None)` once the stream is exhausted. A line longer than the
    /// limit fails with `LineTooLong` and is not otherwise processed.
    pub fn next_line(&mut self) -> Result<Option<&str>> {
        if self.pushed_back {
            self.pushed_back = false;
            self.lines_read += 1;
            return self.current().map(Some);
        }

        self.buffer.clear();
        self.has_line = false;

        let limit = self.max_line_length as u64 + 1;
        let read = (&mut self.inner)
            .take(limit)
            .read_until(b'\n', &mut self.buffer)?;

        if read == 0 {
            return Ok(None);
        }
        if read > self.max_line_length {
            return Err(MmError::LineTooLong {
                length: read,
                max: self.max_line_length,
            });
        }

        self.has_line = true;
        self.lines_read += 1;
        self.current().map(Some)
    }

    /// Like [`next_line`](Self::next_line), but stream exhaustion is a
    /// `ReadFailure`.
    pub fn require_line(&mut self) -> Result<&str> {
        match self.next_line()? {
            Some(line) => Ok(line),
            None => Err(MmError::end_of_stream()),
        }
    }

    /// Push the line just read back, so the next call to
    /// [`next_line`](Self::next_line) returns it again.
    pub fn unread(&mut self) {
        debug_assert!(self.has_line, "unread called with no line to push back");
        if self.has_line && !self.pushed_back {
            self.pushed_back = true;
            self.lines_read -= 1;
        }
    }

    /// Release the underlying stream
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn current(&self) -> Result<&str> {
        let line = std::str::from_utf8(&self.buffer)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let line = line.strip_suffix('\n').unwrap_or(line);
        Ok(line.strip_suffix('\r').unwrap_or(line))
    }
}

impl<R: BufRead + Seek> LineReader<R> {
    /// Record the position at which the next line starts.
    ///
    /// A pushed-back line counts as not yet read, so the mark lands before it.
    pub fn mark(&mut self) -> Result<StreamMark> {
        let position = self.inner.stream_position().map_err(MmError::SeekFailure)?;
        let pending = if self.pushed_back {
            self.buffer.len() as u64
        } else {
            0
        };
        Ok(StreamMark {
            offset: position - pending,
            line: self.lines_read,
        })
    }

    /// Return to a position recorded by [`mark`](Self::mark)
    pub fn rewind(&mut self, mark: StreamMark) -> Result<()> {
        self.inner
            .seek(SeekFrom::Start(mark.offset))
            .map_err(MmError::SeekFailure)?;
        self.buffer.clear();
        self.has_line = false;
        self.pushed_back = false;
        self.lines_read = mark.line;
        Ok(())
    }
}
