//! Date synchronization: advance a source to a target begin date.

use crate::domain::cursor::RowCursor;
use crate::domain::error::StockfeedError;
use crate::domain::header::field_index;
use crate::domain::instant::Instant;
use crate::domain::row::column;
use std::io::BufRead;

/// Header field naming the date column.
pub const DATE_FIELD: &str = "date";

/// Advance `cursor` past every row dated before `begin`.
///
/// Consumes the header line, resolves the `date` column, then skips rows in
/// file order. The first row whose date is `>= begin` is left un-consumed,
/// so the next read still yields it, and its date is returned. `Ok(None)`
/// means the source holds no such row; that is a normal outcome the caller
/// must check, not an error. Any unparseable date is fatal.
///
/// This is a linear scan. On out-of-order input it stops at the first row
/// satisfying the test.
pub fn sync_to_date<R: BufRead>(
    cursor: &mut RowCursor<R>,
    begin: Instant,
) -> Result<Option<Instant>, StockfeedError> {
    let header = cursor.next_row()?.ok_or(StockfeedError::EmptySource)?;
    let date_index = field_index(&header, DATE_FIELD)?;

    while let Some(row) = cursor.peek_row()? {
        let date = Instant::parse(column(row, date_index)?)?;
        if date >= begin {
            return Ok(Some(date));
        }
        cursor.next_row()?;
    }
    Ok(None)
}
