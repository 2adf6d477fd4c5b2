//! Fixed layout of a class sheet.
//!
//! ```text
//!          A ... B ......... H ........... S ... Y
//! row 3                      day labels (H..S)
//! row 5-50       names       attendance per day
//! row 51   summary fields by offset (A..Y)
//! ```

use crate::error::{AttendanceError, AttendanceResult};
use rollcall_primitives::{column_letter_to_index, CellAddress, CellRange, SheetRange};
use serde_json::Value;

/// Row holding the day labels.
pub const HEADER_ROW: u32 = 3;
/// First and last day columns.
pub const FIRST_DAY_COLUMN: &str = "H";
pub const LAST_DAY_COLUMN: &str = "S";
/// Number of day columns (H through S).
pub const DAY_COLUMN_COUNT: usize = 12;

/// Column holding student names.
pub const NAME_COLUMN: &str = "B";
pub const FIRST_STUDENT_ROW: u32 = 5;
pub const LAST_STUDENT_ROW: u32 = 50;

pub const SUMMARY_ROW: u32 = 51;
pub const SUMMARY_FIRST_COLUMN: &str = "A";
pub const SUMMARY_LAST_COLUMN: &str = "Y";

/// One class tab of the attendance document (e.g. `6A1`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSheet {
    name: String,
}

impl ClassSheet {
    pub fn new(name: impl Into<String>) -> AttendanceResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(AttendanceError::Validation("Missing className".to_string()));
        }
        Ok(Self { name })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn range(&self, range: CellRange) -> SheetRange {
        SheetRange::new(self.name.clone(), range)
    }

    /// `H3:S3`
    pub fn header_range(&self) -> AttendanceResult<SheetRange> {
        Ok(self.range(CellRange::row(
            HEADER_ROW,
            FIRST_DAY_COLUMN,
            LAST_DAY_COLUMN,
        )?))
    }

    /// `B5:B50`
    pub fn name_range(&self) -> AttendanceResult<SheetRange> {
        Ok(self.range(CellRange::column(
            NAME_COLUMN,
            FIRST_STUDENT_ROW,
            LAST_STUDENT_ROW,
        )?))
    }

    /// Student rows of one day column, e.g. `J5:J50`.
    pub fn attendance_range(&self, column: &DayColumn) -> SheetRange {
        let start = CellAddress::new(FIRST_STUDENT_ROW - 1, column.col);
        let end = CellAddress::new(LAST_STUDENT_ROW - 1, column.col);
        self.range(CellRange::new(start, end))
    }

    /// A single attendance cell, e.g. `J7`.
    pub fn attendance_cell(&self, column: &DayColumn, row_number: u32) -> SheetRange {
        self.range(CellRange::single(CellAddress::new(
            row_number - 1,
            column.col,
        )))
    }

    /// `A51:Y51`
    pub fn summary_range(&self) -> AttendanceResult<SheetRange> {
        Ok(self.range(CellRange::row(
            SUMMARY_ROW,
            SUMMARY_FIRST_COLUMN,
            SUMMARY_LAST_COLUMN,
        )?))
    }
}

/// The column a day label resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayColumn {
    /// Position within the header row (0 = H).
    pub index: usize,
    /// Zero-based sheet column.
    pub col: u32,
}

impl DayColumn {
    /// Map a header position to its column. Positions past `S` are rejected.
    pub fn from_index(index: usize) -> AttendanceResult<Self> {
        if index >= DAY_COLUMN_COUNT {
            return Err(AttendanceError::Layout(format!(
                "header position {index} is past column {LAST_DAY_COLUMN}"
            )));
        }
        let first = column_letter_to_index(FIRST_DAY_COLUMN)?;
        Ok(Self {
            index,
            col: first + index as u32,
        })
    }

    /// Column letter, e.g. `"J"`.
    pub fn letter(&self) -> String {
        rollcall_primitives::column_index_to_letter(self.col)
    }
}

/// Text of a cell as the sheet shows it. Missing cells read as `""`.
pub fn cell_text(cell: Option<&Value>) -> String {
    match cell {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
