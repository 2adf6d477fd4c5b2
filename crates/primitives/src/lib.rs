//! # Rollcall Primitives
//!
//! Cell addresses and ranges used to address the attendance spreadsheet.
//! Everything here is pure: a [`SheetRange`] renders to the A1 syntax the
//! values API expects, so callers never concatenate letters and numbers.

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod address;

pub use address::{
    cell_range_to_address, column_index_to_letter, column_letter_to_index, sanitize_sheet_name,
};

/// A cell address in the spreadsheet (e.g., A1, B2, etc.)
///
/// Both indices are zero-based: `B5` is `row: 4, col: 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellAddress {
    pub row: u32,
    pub col: u32,
}

impl CellAddress {
    /// Create a new cell address
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Build an address from a column letter and a 1-based row number, the
    /// way addresses are written in a sheet (`("B", 5)` is `B5`).
    pub fn at(column: &str, row_number: u32) -> Result<Self, AddressError> {
        if row_number == 0 {
            return Err(AddressError::InvalidRow(row_number.to_string()));
        }
        let col = column_letter_to_index(column)?;
        Ok(Self::new(row_number - 1, col))
    }

    /// Parse from A1 notation (e.g., "A1", "B2")
    pub fn from_a1(s: &str) -> Result<Self, AddressError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AddressError::InvalidRange("Empty A1 reference".to_string()));
        }

        let mut chars = trimmed.chars().peekable();

        // Optional $ for absolute column
        if matches!(chars.peek(), Some('$')) {
            chars.next();
        }

        let mut col_letters = String::new();
        while let Some(ch) = chars.peek().copied() {
            if ch.is_ascii_alphabetic() {
                col_letters.push(ch);
                chars.next();
            } else {
                break;
            }
        }

        if col_letters.is_empty() {
            return Err(AddressError::InvalidColumn(trimmed.to_string()));
        }

        if matches!(chars.peek(), Some('$')) {
            chars.next();
        }

        let mut row_digits = String::new();
        while let Some(ch) = chars.peek().copied() {
            if ch.is_ascii_digit() {
                row_digits.push(ch);
                chars.next();
            } else {
                break;
            }
        }

        if row_digits.is_empty() || chars.peek().is_some() {
            return Err(AddressError::InvalidRow(trimmed.to_string()));
        }

        let row_num: u32 = row_digits
            .parse()
            .map_err(|_| AddressError::InvalidRow(row_digits.clone()))?;

        Self::at(&col_letters, row_num)
    }

    /// 1-based row number as shown in the sheet.
    pub fn row_number(&self) -> u32 {
        self.row + 1
    }

    /// Column letters (e.g. `"H"`).
    pub fn column_letter(&self) -> String {
        column_index_to_letter(self.col)
    }

    /// Convert to A1 notation
    pub fn to_a1(&self) -> String {
        format!("{}{}", self.column_letter(), self.row_number())
    }

    /// Address shifted down by `rows`.
    pub fn offset_rows(&self, rows: u32) -> Self {
        Self::new(self.row + rows, self.col)
    }

    /// Address shifted right by `cols`.
    pub fn offset_cols(&self, cols: u32) -> Self {
        Self::new(self.row, self.col + cols)
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1())
    }
}

/// A range of cells (e.g., A1:B10)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRange {
    pub start: CellAddress,
    pub end: CellAddress,
}

impl CellRange {
    /// Create a new cell range
    pub fn new(start: CellAddress, end: CellAddress) -> Self {
        Self { start, end }
    }

    /// A range covering exactly one cell.
    pub fn single(cell: CellAddress) -> Self {
        Self::new(cell, cell)
    }

    /// One column spanning `first_row..=last_row` (1-based row numbers).
    pub fn column(column: &str, first_row: u32, last_row: u32) -> Result<Self, AddressError> {
        Ok(Self::new(
            CellAddress::at(column, first_row)?,
            CellAddress::at(column, last_row)?,
        )
        .normalized())
    }

    /// One row spanning `first_col..=last_col` (column letters).
    pub fn row(row_number: u32, first_col: &str, last_col: &str) -> Result<Self, AddressError> {
        Ok(Self::new(
            CellAddress::at(first_col, row_number)?,
            CellAddress::at(last_col, row_number)?,
        )
        .normalized())
    }

    /// Return a normalized range where start <= end
    pub fn normalized(&self) -> Self {
        let start_row = self.start.row.min(self.end.row);
        let end_row = self.start.row.max(self.end.row);
        let start_col = self.start.col.min(self.end.col);
        let end_col = self.start.col.max(self.end.col);
        Self {
            start: CellAddress::new(start_row, start_col),
            end: CellAddress::new(end_row, end_col),
        }
    }

    /// Number of rows in the range
    pub fn rows(&self) -> u32 {
        let range = self.normalized();
        range.end.row - range.start.row + 1
    }

    /// Number of columns in the range
    pub fn cols(&self) -> u32 {
        let range = self.normalized();
        range.end.col - range.start.col + 1
    }

    /// True when the range covers exactly one cell.
    pub fn is_single_cell(&self) -> bool {
        self.start == self.end
    }

    /// Iterate over all addresses in row-major order
    pub fn cells(&self) -> impl Iterator<Item = CellAddress> {
        let range = self.normalized();
        (range.start.row..=range.end.row).flat_map(move |row| {
            (range.start.col..=range.end.col).map(move |col| CellAddress::new(row, col))
        })
    }

    /// Convert to A1 notation without a sheet prefix (`H3:S3`, or `J7` for a
    /// single cell).
    pub fn to_a1(&self) -> String {
        let range = self.normalized();
        if range.is_single_cell() {
            range.start.to_a1()
        } else {
            format!("{}:{}", range.start.to_a1(), range.end.to_a1())
        }
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1())
    }
}

/// A cell range qualified by the sheet (tab) it lives on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SheetRange {
    pub sheet: String,
    pub range: CellRange,
}

impl SheetRange {
    pub fn new(sheet: impl Into<String>, range: CellRange) -> Self {
        Self {
            sheet: sheet.into(),
            range,
        }
    }

    /// Render as `Sheet!A1:B2`, quoting the sheet name when needed.
    pub fn to_a1(&self) -> String {
        cell_range_to_address(Some(&self.sheet), self.range)
    }
}

impl fmt::Display for SheetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    #[error("Invalid column: {0}")]
    InvalidColumn(String),
    #[error("Invalid row: {0}")]
    InvalidRow(String),
    #[error("Invalid range: {0}")]
    InvalidRange(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_a1() {
        assert_eq!(CellAddress::from_a1("B5").unwrap(), CellAddress::new(4, 1));
        assert_eq!(CellAddress::from_a1("$H$3").unwrap(), CellAddress::new(2, 7));
        assert!(CellAddress::from_a1("H0").is_err());
        assert!(CellAddress::from_a1("5B").is_err());
        assert!(CellAddress::from_a1("").is_err());
    }

    #[test]
    fn test_at_matches_sheet_notation() {
        let cell = CellAddress::at("J", 7).unwrap();
        assert_eq!(cell.to_a1(), "J7");
        assert_eq!(cell.row_number(), 7);
        assert_eq!(cell.column_letter(), "J");
    }

    #[test]
    fn test_column_range() {
        let range = CellRange::column("B", 5, 50).unwrap();
        assert_eq!(range.rows(), 46);
        assert_eq!(range.cols(), 1);
        assert_eq!(range.to_a1(), "B5:B50");
    }

    #[test]
    fn test_row_range() {
        let range = CellRange::row(3, "H", "S").unwrap();
        assert_eq!(range.cols(), 12);
        assert_eq!(range.to_a1(), "H3:S3");
    }

    #[test]
    fn test_single_cell_renders_without_colon() {
        let range = CellRange::single(CellAddress::at("J", 6).unwrap());
        assert!(range.is_single_cell());
        assert_eq!(range.to_string(), "J6");
    }

    #[test]
    fn test_cells_row_major() {
        let range = CellRange::new(
            CellAddress::at("A", 1).unwrap(),
            CellAddress::at("B", 2).unwrap(),
        );
        let cells: Vec<String> = range.cells().map(|c| c.to_a1()).collect();
        assert_eq!(cells, vec!["A1", "B1", "A2", "B2"]);
    }

    #[test]
    fn test_sheet_range_display() {
        let range = SheetRange::new("6A1", CellRange::row(51, "A", "Y").unwrap());
        assert_eq!(range.to_string(), "6A1!A51:Y51");
    }
}
