//! Field lookup within a delimited header line.

use crate::domain::error::StockfeedError;

/// Column delimiter shared by every source this crate reads. Fields
/// containing the delimiter are not supported (no quoting or escaping).
pub const DELIMITER: char = ',';

/// Find the 0-based column of `field` in a delimited header line.
///
/// Matching is case-insensitive and the first match wins. Tokens are
/// compared with surrounding whitespace trimmed, since headers arrive
/// loosely formatted. A header with no delimiter at all is a single-token
/// header: index 0 on match, `FieldNotFound` otherwise.
///
/// `field_index("Date,Open,High,Low,Close", "Low")` is `Ok(3)`.
pub fn field_index(header: &str, field: &str) -> Result<usize, StockfeedError> {
    for (index, token) in header.split(DELIMITER).enumerate() {
        if token.trim().eq_ignore_ascii_case(field) {
            return Ok(index);
        }
    }
    Err(StockfeedError::FieldNotFound {
        field: field.to_string(),
        header: header.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_field_position() {
        assert_eq!(field_index("Date,Open,High,Low,Close", "Low").unwrap(), 3);
        assert_eq!(field_index("Date,Open,High,Low,Close", "Date").unwrap(), 0);
        assert_eq!(field_index("Date,Open,High,Low,Close", "Close").unwrap(), 4);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(field_index("Date,Adj. Close", "date").unwrap(), 0);
        assert_eq!(field_index("date,ADJ. CLOSE", "Adj. Close").unwrap(), 1);
    }

    #[test]
    fn first_match_wins() {
        assert_eq!(field_index("close,Close,CLOSE", "close").unwrap(), 0);
    }

    #[test]
    fn tolerates_padded_tokens() {
        assert_eq!(field_index("Date, Open , Close", "Open").unwrap(), 1);
    }

    #[test]
    fn missing_field_fails() {
        let err = field_index("Date,Open,Close", "Volume").unwrap_err();
        assert!(matches!(
            err,
            StockfeedError::FieldNotFound { field, header }
                if field == "Volume" && header == "Date,Open,Close"
        ));
    }

    #[test]
    fn single_token_header() {
        assert_eq!(field_index("Date", "date").unwrap(), 0);
        assert!(field_index("Date", "Close").is_err());
    }

    #[test]
    fn token_prefix_is_not_a_match() {
        // "Adj" must not satisfy a lookup for "Adj. Close"
        assert!(field_index("Date,Adj", "Adj. Close").is_err());
    }
}
