//! Price series extraction and multi-source alignment.

use crate::domain::cursor::RowCursor;
use crate::domain::error::StockfeedError;
use crate::domain::header::field_index;
use crate::domain::row::{column, parse_price};
use crate::ports::source_port::SourcePort;
use std::io::BufRead;

/// Header field naming the value column.
pub const VALUE_FIELD: &str = "Adj. Close";

/// Ordered prices extracted from one source, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    pub source: String,
    pub prices: Vec<f64>,
}

/// Read every data row of one source into an ordered price sequence.
///
/// The header is consumed once to resolve `value_field`; each following row
/// contributes exactly one price. Rows are processed strictly in file order
/// with no reordering, deduplication or gap-filling. The first malformed
/// row aborts the whole extraction; no partial series is returned.
pub fn read_series<R: BufRead>(
    cursor: &mut RowCursor<R>,
    value_field: &str,
) -> Result<Vec<f64>, StockfeedError> {
    let header = cursor.next_row()?.ok_or(StockfeedError::EmptySource)?;
    let value_index = field_index(&header, value_field)?;

    let mut prices = Vec::new();
    while let Some(row) = cursor.next_row()? {
        prices.push(parse_price(column(&row, value_index)?)?);
    }
    Ok(prices)
}

/// Extract one price series per source, in the order given.
///
/// Sources are opened, fully consumed and released strictly one at a time.
/// The first failure, an unopenable source included, aborts the whole run;
/// series extracted before it are discarded, never returned. Errors from
/// inside a source are wrapped with that source's identifier.
pub fn read_price_data(
    sources: &dyn SourcePort,
    ids: &[String],
    value_field: &str,
) -> Result<Vec<PriceSeries>, StockfeedError> {
    let mut data = Vec::with_capacity(ids.len());
    for id in ids {
        let reader = sources.open(id)?;
        let mut cursor = RowCursor::new(reader);
        let prices =
            read_series(&mut cursor, value_field).map_err(|error| StockfeedError::InSource {
                name: id.clone(),
                error: Box::new(error),
            })?;
        data.push(PriceSeries {
            source: id.clone(),
            prices,
        });
    }
    Ok(data)
}
