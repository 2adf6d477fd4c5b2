//! Day label → attendance column.

use crate::error::{AttendanceError, AttendanceResult};
use crate::layout::{cell_text, ClassSheet, DayColumn};
use rollcall_sheets::RangeClient;
use serde_json::Value;

/// Position of the first header cell equal to `day_label`, both sides trimmed.
pub fn find_day_index(header: &[Value], day_label: &str) -> Option<usize> {
    let wanted = day_label.trim();
    header
        .iter()
        .position(|cell| cell_text(Some(cell)).trim() == wanted)
}

/// Read the header row of `sheet` and resolve `day_label` to its column.
///
/// A missing header row reads as empty and yields
/// [`AttendanceError::DayNotFound`].
pub async fn resolve_day_column(
    client: &dyn RangeClient,
    sheet: &ClassSheet,
    day_label: &str,
) -> AttendanceResult<DayColumn> {
    let range = sheet.header_range()?;
    let rows = client.read_range(&range).await?;
    let header = rows.into_iter().next().unwrap_or_default();

    match find_day_index(&header, day_label) {
        Some(index) => {
            let column = DayColumn::from_index(index)?;
            tracing::debug!(
                class = sheet.name(),
                day_label,
                column = %column.letter(),
                "resolved day column"
            );
            Ok(column)
        }
        None => Err(AttendanceError::DayNotFound {
            day_label: day_label.to_string(),
            range: range.range.to_a1(),
        }),
    }
}
