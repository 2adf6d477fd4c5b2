use rollcall_primitives::AddressError;
use rollcall_sheets::SheetsError;
use thiserror::Error;

/// Result type for attendance operations.
pub type AttendanceResult<T> = Result<T, AttendanceError>;

/// Errors that can occur while reading or writing attendance.
#[derive(Debug, Error)]
pub enum AttendanceError {
    /// Request is missing or malformed input.
    #[error("{0}")]
    Validation(String),

    /// The day label is not in the header row.
    #[error("Day '{day_label}' not found in {range}")]
    DayNotFound { day_label: String, range: String },

    /// The spreadsheet backend failed.
    #[error(transparent)]
    Remote(#[from] SheetsError),

    /// A position fell outside the fixed sheet layout.
    #[error("Layout error: {0}")]
    Layout(String),
}

impl From<AddressError> for AttendanceError {
    fn from(err: AddressError) -> Self {
        Self::Layout(err.to_string())
    }
}
