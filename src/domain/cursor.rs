//! Peekable row cursor over a buffered reader.

use crate::domain::error::StockfeedError;
use std::io::BufRead;

/// Reads a source one row at a time with single-row lookahead.
///
/// `peek_row` buffers the next row without consuming it, so a caller can
/// decide whether to accept a row before it disappears from the stream.
/// Line endings (`\n` and `\r\n`) are stripped.
pub struct RowCursor<R> {
    lines: std::io::Lines<R>,
    peeked: Option<String>,
}

impl<R: BufRead> RowCursor<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            peeked: None,
        }
    }

    /// Consume and return the next row, or `None` at end of source.
    pub fn next_row(&mut self) -> Result<Option<String>, StockfeedError> {
        if let Some(row) = self.peeked.take() {
            return Ok(Some(row));
        }
        Ok(self.lines.next().transpose()?)
    }

    /// Return the next row without consuming it.
    pub fn peek_row(&mut self) -> Result<Option<&str>, StockfeedError> {
        if self.peeked.is_none() {
            self.peeked = self.lines.next().transpose()?;
        }
        Ok(self.peeked.as_deref())
    }
}
