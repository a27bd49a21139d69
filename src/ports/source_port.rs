//! Source access port trait.

use crate::domain::error::StockfeedError;
use std::io::BufRead;

/// Where sources come from: the filesystem in production, memory in tests.
pub trait SourcePort {
    /// Open one source for reading. A source that cannot be opened is
    /// `SourceUnavailable`.
    fn open(&self, id: &str) -> Result<Box<dyn BufRead>, StockfeedError>;
}
