//! Column extraction and numeric conversion for one data row.

use crate::domain::error::StockfeedError;
use crate::domain::header::DELIMITER;

/// Extract the text of column `index` from a delimited row.
///
/// The substring is bounded by the delimiters around it, or by line
/// start/end for the first and last columns. Whitespace inside the column
/// is preserved; callers that parse the text decide how much to tolerate.
pub fn column(row: &str, index: usize) -> Result<&str, StockfeedError> {
    row.split(DELIMITER)
        .nth(index)
        .ok_or_else(|| StockfeedError::ColumnOutOfRange {
            index,
            row: row.to_string(),
        })
}

/// Convert a price column to `f64`.
///
/// A token that parses to exactly 0.0 is a valid price; only a failed
/// conversion is `InvalidNumber`. Surrounding whitespace is tolerated.
pub fn parse_price(text: &str) -> Result<f64, StockfeedError> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| StockfeedError::InvalidNumber {
            text: text.trim().to_string(),
        })
}
