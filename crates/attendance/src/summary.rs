//! Summary row of a class sheet.
//!
//! Fields are picked by position in `A51:Y51`; no header is read to confirm
//! what a cell holds. Offset 25 (`dept`) lies one past `Y`, so it always
//! takes its default.

use crate::error::AttendanceResult;
use crate::layout::ClassSheet;
use rollcall_sheets::RangeClient;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const TOTAL_STUDENTS_OFFSET: usize = 0;
pub const PRESENT_COUNT_OFFSET: usize = 19;
pub const PAID_LESSONS_OFFSET: usize = 21;
pub const ATTENDANCE_RATE_OFFSET: usize = 23;
pub const REVENUE_OFFSET: usize = 24;
pub const DEPT_OFFSET: usize = 25;

/// Values of the summary row, passed through as the sheet returns them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub class_name: String,
    pub total_students: Value,
    pub present_count: Value,
    pub paid_lessons: Value,
    pub revenue: Value,
    pub dept: Value,
    pub attendance_rate: Value,
}

/// Pick summary fields out of `row`. Offsets past the end of the row yield
/// `0`, or `"0%"` for the attendance rate.
pub fn extract_summary(class_name: &str, row: &[Value]) -> Summary {
    let field = |offset: usize, default: Value| match row.get(offset) {
        Some(Value::Null) | None => default,
        Some(value) => value.clone(),
    };

    Summary {
        class_name: class_name.to_string(),
        total_students: field(TOTAL_STUDENTS_OFFSET, json!(0)),
        present_count: field(PRESENT_COUNT_OFFSET, json!(0)),
        paid_lessons: field(PAID_LESSONS_OFFSET, json!(0)),
        revenue: field(REVENUE_OFFSET, json!(0)),
        dept: field(DEPT_OFFSET, json!(0)),
        attendance_rate: field(ATTENDANCE_RATE_OFFSET, json!("0%")),
    }
}

/// Read the summary row of `sheet`.
pub async fn read_summary(
    client: &dyn RangeClient,
    sheet: &ClassSheet,
) -> AttendanceResult<Summary> {
    let rows = client.read_range(&sheet.summary_range()?).await?;
    let row = rows.into_iter().next().unwrap_or_default();
    tracing::debug!(class = sheet.name(), cells = row.len(), "read summary row");
    Ok(extract_summary(sheet.name(), &row))
}
