//! In-memory [`RangeClient`] backed by a map of cells.
//!
//! Reads follow the values API's trimming rules: trailing empty cells of a
//! row and trailing empty rows of a range are left out. Every call is
//! recorded so callers can assert on the traffic a request produced.

use crate::client::{CellUpdate, RangeClient, Rows};
use crate::error::{SheetsError, SheetsResult};
use async_trait::async_trait;
use rollcall_primitives::{CellAddress, SheetRange};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

/// One call made against a [`MemoryRangeClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    Read(String),
    Write(Vec<(String, Value)>),
}

#[derive(Debug, Default)]
struct State {
    cells: HashMap<(String, CellAddress), String>,
    calls: Vec<RecordedCall>,
    failure: Option<String>,
}

#[derive(Debug, Default)]
pub struct MemoryRangeClient {
    state: Mutex<State>,
}

impl MemoryRangeClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one cell, addressed in A1 notation (e.g. `"B5"`).
    pub fn set(&self, sheet: &str, a1: &str, value: impl Into<String>) -> SheetsResult<()> {
        let cell = CellAddress::from_a1(a1)?;
        self.lock().cells.insert((sheet.to_string(), cell), value.into());
        Ok(())
    }

    /// Fill a column downward starting at `a1`.
    pub fn set_column<S: AsRef<str>>(
        &self,
        sheet: &str,
        a1: &str,
        values: &[S],
    ) -> SheetsResult<()> {
        let start = CellAddress::from_a1(a1)?;
        let mut state = self.lock();
        for (i, value) in values.iter().enumerate() {
            state.cells.insert(
                (sheet.to_string(), start.offset_rows(i as u32)),
                value.as_ref().to_string(),
            );
        }
        Ok(())
    }

    /// Fill a row rightward starting at `a1`.
    pub fn set_row<S: AsRef<str>>(
        &self,
        sheet: &str,
        a1: &str,
        values: &[S],
    ) -> SheetsResult<()> {
        let start = CellAddress::from_a1(a1)?;
        let mut state = self.lock();
        for (i, value) in values.iter().enumerate() {
            state.cells.insert(
                (sheet.to_string(), start.offset_cols(i as u32)),
                value.as_ref().to_string(),
            );
        }
        Ok(())
    }

    /// Current value of a cell, if any.
    pub fn get(&self, sheet: &str, a1: &str) -> Option<String> {
        let cell = CellAddress::from_a1(a1).ok()?;
        self.lock().cells.get(&(sheet.to_string(), cell)).cloned()
    }

    /// Make every following call fail with an API error carrying `message`.
    pub fn fail_with(&self, message: impl Into<String>) {
        self.lock().failure = Some(message.into());
    }

    /// Calls made so far, oldest first.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    /// Write calls made so far.
    pub fn writes(&self) -> Vec<Vec<(String, Value)>> {
        self.lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                RecordedCall::Write(cells) => Some(cells.clone()),
                RecordedCall::Read(_) => None,
            })
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        // A panic while holding the lock leaves the map consistent.
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl RangeClient for MemoryRangeClient {
    async fn read_range(&self, range: &SheetRange) -> SheetsResult<Rows> {
        let mut state = self.lock();
        state.calls.push(RecordedCall::Read(range.to_a1()));
        if let Some(message) = &state.failure {
            return Err(SheetsError::api(500, message.clone()));
        }

        let bounds = range.range.normalized();
        let mut rows: Rows = Vec::with_capacity(bounds.rows() as usize);
        for row in bounds.start.row..=bounds.end.row {
            let mut cells: Vec<Value> = (bounds.start.col..=bounds.end.col)
                .map(|col| {
                    state
                        .cells
                        .get(&(range.sheet.clone(), CellAddress::new(row, col)))
                        .map(|v| Value::String(v.clone()))
                        .unwrap_or_else(|| Value::String(String::new()))
                })
                .collect();
            while matches!(cells.last(), Some(Value::String(s)) if s.is_empty()) {
                cells.pop();
            }
            rows.push(cells);
        }
        while matches!(rows.last(), Some(row) if row.is_empty()) {
            rows.pop();
        }
        Ok(rows)
    }

    async fn batch_write(&self, updates: &[CellUpdate]) -> SheetsResult<usize> {
        let mut state = self.lock();
        state.calls.push(RecordedCall::Write(
            updates
                .iter()
                .map(|u| (u.range.to_a1(), u.value.clone()))
                .collect(),
        ));
        if let Some(message) = &state.failure {
            return Err(SheetsError::api(500, message.clone()));
        }

        for update in updates {
            // A null leaves the cell as it was.
            let text = match &update.value {
                Value::Null => continue,
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            for cell in update.range.range.normalized().cells() {
                state
                    .cells
                    .insert((update.range.sheet.clone(), cell), text.clone());
            }
        }
        Ok(updates.len())
    }
}
