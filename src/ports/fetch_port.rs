//! Remote dataset provider port trait.

use crate::domain::error::StockfeedError;
use crate::domain::instant::Instant;

pub trait FetchPort {
    /// Download one symbol's dataset as CSV text, optionally windowed by a
    /// begin/end date.
    fn fetch_csv(
        &self,
        symbol: &str,
        begin: Option<Instant>,
        end: Option<Instant>,
    ) -> Result<String, StockfeedError>;
}
