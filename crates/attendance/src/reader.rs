//! Attendance of one class for one day.

use crate::error::AttendanceResult;
use crate::layout::{cell_text, ClassSheet, FIRST_STUDENT_ROW};
use crate::resolver::resolve_day_column;
use rollcall_sheets::{RangeClient, Rows};
use serde::{Deserialize, Serialize};

/// One student's row in the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// 1-based sheet row.
    pub row: u32,
    pub name: String,
    pub status: String,
}

/// Attendance of a class on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayAttendance {
    pub class_name: String,
    pub day_label: String,
    /// Column letter the day resolved to.
    pub column: String,
    pub data: Vec<StudentRecord>,
}

/// Zip the name column with an attendance column by position.
///
/// The output has one record per name row returned, in sheet order. Rows
/// missing from `attendance` read as blank status.
pub fn zip_records(names: &Rows, attendance: &Rows) -> Vec<StudentRecord> {
    names
        .iter()
        .enumerate()
        .map(|(idx, row)| StudentRecord {
            row: FIRST_STUDENT_ROW + idx as u32,
            name: cell_text(row.first()),
            status: cell_text(attendance.get(idx).and_then(|r| r.first())),
        })
        .collect()
}

/// Read the attendance of `sheet` on `day_label`.
pub async fn read_day(
    client: &dyn RangeClient,
    sheet: &ClassSheet,
    day_label: &str,
) -> AttendanceResult<DayAttendance> {
    let column = resolve_day_column(client, sheet, day_label).await?;

    let name_range = sheet.name_range()?;
    let attendance_range = sheet.attendance_range(&column);
    let (names, attendance) = tokio::try_join!(
        client.read_range(&name_range),
        client.read_range(&attendance_range)
    )?;

    let data = zip_records(&names, &attendance);
    tracing::info!(
        class = sheet.name(),
        day_label,
        students = data.len(),
        "read attendance"
    );

    Ok(DayAttendance {
        class_name: sheet.name().to_string(),
        day_label: day_label.to_string(),
        column: column.letter(),
        data,
    })
}
