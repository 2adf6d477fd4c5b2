//! Attendance updates for one class and day.

use crate::error::{AttendanceError, AttendanceResult};
use crate::layout::{cell_text, ClassSheet, DayColumn, FIRST_STUDENT_ROW};
use crate::resolver::resolve_day_column;
use rollcall_sheets::{CellUpdate, RangeClient, Rows};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A status to record for a student, matched by name.
///
/// The status is written as typed input: `"P"`, `1` and `true` all reach the
/// sheet unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceUpdate {
    pub name: String,
    pub status: Value,
}

impl AttendanceUpdate {
    pub fn new(name: impl Into<String>, status: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            status: status.into(),
        }
    }
}

/// Reject statuses that cannot go into a single cell (objects and arrays).
pub fn validate_updates(items: &[AttendanceUpdate]) -> AttendanceResult<()> {
    match items
        .iter()
        .find(|item| matches!(item.status, Value::Array(_) | Value::Object(_)))
    {
        Some(item) => Err(AttendanceError::Validation(format!(
            "Invalid items: status for '{}' must be a string, number or boolean",
            item.name
        ))),
        None => Ok(()),
    }
}

/// Cell writes derived from a list of updates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WritePlan {
    pub writes: Vec<CellUpdate>,
    /// Names with no matching row, as given in the request.
    pub unmatched: Vec<String>,
}

/// Result of applying updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteOutcome {
    pub updated_cells: usize,
    pub unmatched_names: Vec<String>,
}

/// Map each trimmed, non-blank name to its sheet row. A name appearing twice
/// maps to its last row.
pub fn name_rows(names: &Rows) -> HashMap<String, u32> {
    let mut rows = HashMap::with_capacity(names.len());
    for (idx, row) in names.iter().enumerate() {
        let name = cell_text(row.first());
        let name = name.trim();
        if !name.is_empty() {
            rows.insert(name.to_string(), FIRST_STUDENT_ROW + idx as u32);
        }
    }
    rows
}

/// Translate updates into single-cell writes in `column`, in input order.
pub fn plan_writes(
    sheet: &ClassSheet,
    column: &DayColumn,
    names: &Rows,
    items: &[AttendanceUpdate],
) -> WritePlan {
    let rows = name_rows(names);
    let mut plan = WritePlan::default();

    for item in items {
        match rows.get(item.name.trim()) {
            Some(&row) => plan.writes.push(CellUpdate::new(
                sheet.attendance_cell(column, row),
                item.status.clone(),
            )),
            None => plan.unmatched.push(item.name.clone()),
        }
    }
    plan
}

/// Record `items` for `sheet` on `day_label`.
///
/// Items are validated before any remote call. Items whose name is not in
/// the name column produce no write and are reported in
/// [`WriteOutcome::unmatched_names`]. When nothing matches no write request
/// is sent.
pub async fn write_day(
    client: &dyn RangeClient,
    sheet: &ClassSheet,
    day_label: &str,
    items: &[AttendanceUpdate],
) -> AttendanceResult<WriteOutcome> {
    validate_updates(items)?;
    let column = resolve_day_column(client, sheet, day_label).await?;
    let names = client.read_range(&sheet.name_range()?).await?;

    let plan = plan_writes(sheet, &column, &names, items);
    if !plan.unmatched.is_empty() {
        tracing::warn!(
            class = sheet.name(),
            day_label,
            unmatched = ?plan.unmatched,
            "names not found in sheet"
        );
    }

    if !plan.writes.is_empty() {
        client.batch_write(&plan.writes).await?;
    }
    tracing::info!(
        class = sheet.name(),
        day_label,
        cells = plan.writes.len(),
        "wrote attendance"
    );

    Ok(WriteOutcome {
        updated_cells: plan.writes.len(),
        unmatched_names: plan.unmatched,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sheet() -> ClassSheet {
        ClassSheet::new("6A1").unwrap()
    }

    #[test]
    fn test_name_rows_trims_and_skips_blanks() {
        let names = vec![vec![json!(" An ")], vec![], vec![json!("  ")], vec![json!("Chi")]];
        let rows = name_rows(&names);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows["An"], 5);
        assert_eq!(rows["Chi"], 8);
    }

    #[test]
    fn test_duplicate_names_map_to_last_row() {
        let names = vec![vec![json!("An")], vec![json!("An")]];
        assert_eq!(name_rows(&names)["An"], 6);
    }

    #[test]
    fn test_plan_drops_unknown_names() {
        let names = vec![vec![json!("An")]];
        let items = vec![
            AttendanceUpdate::new("An", "P"),
            AttendanceUpdate::new("Ghost", "A"),
        ];
        let column = DayColumn::from_index(2).unwrap();
        let plan = plan_writes(&sheet(), &column, &names, &items);

        assert_eq!(plan.writes.len(), 1);
        assert_eq!(plan.writes[0].range.to_a1(), "6A1!J5");
        assert_eq!(plan.writes[0].value, "P");
        assert_eq!(plan.unmatched, vec!["Ghost".to_string()]);
    }

    #[test]
    fn test_plan_matches_trimmed_item_names() {
        let names = vec![vec![json!("An")], vec![json!("Bình")]];
        let items = vec![AttendanceUpdate::new("  Bình ", "A")];
        let column = DayColumn::from_index(0).unwrap();
        let plan = plan_writes(&sheet(), &column, &names, &items);

        assert_eq!(plan.writes[0].range.to_a1(), "6A1!H6");
        assert!(plan.unmatched.is_empty());
    }

    #[test]
    fn test_plan_keeps_input_order() {
        let names = vec![vec![json!("An")], vec![json!("Bình")], vec![json!("Chi")]];
        let items = vec![
            AttendanceUpdate::new("Chi", "P"),
            AttendanceUpdate::new("An", "A"),
        ];
        let column = DayColumn::from_index(1).unwrap();
        let plan = plan_writes(&sheet(), &column, &names, &items);
        let targets: Vec<String> = plan.writes.iter().map(|w| w.range.to_a1()).collect();
        assert_eq!(targets, vec!["6A1!I7", "6A1!I5"]);
    }

    #[test]
    fn test_statuses_pass_through_unescaped() {
        let names = vec![vec![json!("An")]];
        let items = vec![AttendanceUpdate::new("An", "=1+1")];
        let column = DayColumn::from_index(0).unwrap();
        let plan = plan_writes(&sheet(), &column, &names, &items);
        assert_eq!(plan.writes[0].value, "=1+1");
    }

    #[test]
    fn test_numeric_status_is_written_as_number() {
        let names = vec![vec![json!("An")]];
        let items = vec![AttendanceUpdate::new("An", 1)];
        let column = DayColumn::from_index(0).unwrap();
        let plan = plan_writes(&sheet(), &column, &names, &items);
        assert_eq!(plan.writes[0].value, json!(1));
    }

    #[test]
    fn test_validate_updates() {
        let scalars = vec![
            AttendanceUpdate::new("An", "P"),
            AttendanceUpdate::new("Bình", 0),
            AttendanceUpdate::new("Chi", true),
        ];
        assert!(validate_updates(&scalars).is_ok());

        let nested = vec![AttendanceUpdate::new("An", json!({ "code": "P" }))];
        let err = validate_updates(&nested).unwrap_err();
        assert!(matches!(err, AttendanceError::Validation(_)));
        assert!(err.to_string().contains("'An'"));

        let list = vec![AttendanceUpdate::new("An", json!(["P"]))];
        assert!(validate_updates(&list).is_err());
    }

    #[test]
    fn test_outcome_serializes_camel_case() {
        let outcome = WriteOutcome {
            updated_cells: 1,
            unmatched_names: vec!["Ghost".to_string()],
        };
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({ "updatedCells": 1, "unmatchedNames": ["Ghost"] })
        );
    }
}
