//! # rollcall-attendance
//!
//! Attendance stored in a class sheet with a fixed layout: day labels in
//! `H3:S3`, student names in `B5:B50`, one status column per day, and a
//! summary row at `A51:Y51`.
//!
//! Every operation takes a [`RangeClient`](rollcall_sheets::RangeClient) and
//! holds no state between calls.

/// Error types and result aliases.
pub mod error;
/// Sheet layout constants and range builders.
pub mod layout;
/// Attendance reads.
pub mod reader;
/// Day label resolution.
pub mod resolver;
/// Summary row extraction.
pub mod summary;
/// Attendance writes.
pub mod writer;

pub use error::{AttendanceError, AttendanceResult};
pub use layout::{ClassSheet, DayColumn};
pub use reader::{read_day, DayAttendance, StudentRecord};
pub use resolver::{find_day_index, resolve_day_column};
pub use summary::{extract_summary, read_summary, Summary};
pub use writer::{
    plan_writes, validate_updates, write_day, AttendanceUpdate, WriteOutcome, WritePlan,
};
