//! Address helpers for spreadsheet-style A1 references.

use crate::{AddressError, CellRange};

/// Convert a cell range to address, prefixed with the (quoted) sheet name.
pub fn cell_range_to_address(sheet_name: Option<&str>, range: CellRange) -> String {
    let sheet_prefix = sheet_name
        .map(|name| format!("{}!", sanitize_sheet_name(Some(name)).unwrap_or_default()))
        .unwrap_or_default();
    format!("{}{}", sheet_prefix, range.to_a1())
}

/// Sanitize sheet names with special characters.
///
/// Names containing anything but ASCII letters and digits are wrapped in
/// single quotes, with embedded quotes doubled.
pub fn sanitize_sheet_name(name: Option<&str>) -> Option<String> {
    let name = name?;
    if name
        .chars()
        .any(|c| c.is_whitespace() || !c.is_ascii_alphanumeric())
    {
        let escaped = name.replace('\'', "''");
        return Some(format!("'{}'", escaped));
    }
    Some(name.to_string())
}

/// Convert column index to letter (0 -> A, 1 -> B, 25 -> Z, 26 -> AA, etc.).
pub fn column_index_to_letter(index: u32) -> String {
    let mut n = index;
    let mut out = String::new();
    loop {
        let rem = (n % 26) as u8;
        out.push((b'A' + rem) as char);
        n /= 26;
        if n == 0 {
            break;
        }
        n -= 1;
    }
    out.chars().rev().collect()
}

/// Convert column letter to index (A -> 0, B -> 1, Z -> 25, AA -> 26, etc.).
pub fn column_letter_to_index(s: &str) -> Result<u32, AddressError> {
    let s = s.trim().trim_start_matches('$');
    if s.is_empty() {
        return Err(AddressError::InvalidColumn("Empty column".to_string()));
    }
    let mut result: u32 = 0;
    for ch in s.chars() {
        if !ch.is_ascii_alphabetic() {
            return Err(AddressError::InvalidColumn(s.to_string()));
        }
        let value = u32::from(ch.to_ascii_uppercase() as u8 - b'A' + 1);
        result = result
            .checked_mul(26)
            .and_then(|v| v.checked_add(value))
            .ok_or_else(|| AddressError::InvalidColumn(s.to_string()))?;
    }
    Ok(result - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_index_to_letter() {
        assert_eq!(column_index_to_letter(0), "A");
        assert_eq!(column_index_to_letter(7), "H");
        assert_eq!(column_index_to_letter(18), "S");
        assert_eq!(column_index_to_letter(25), "Z");
        assert_eq!(column_index_to_letter(26), "AA");
        assert_eq!(column_index_to_letter(27), "AB");
    }

    #[test]
    fn test_column_letter_to_index() {
        assert_eq!(column_letter_to_index("A").unwrap(), 0);
        assert_eq!(column_letter_to_index("h").unwrap(), 7);
        assert_eq!(column_letter_to_index("$Y").unwrap(), 24);
        assert_eq!(column_letter_to_index("AA").unwrap(), 26);
        assert!(column_letter_to_index("").is_err());
        assert!(column_letter_to_index("H1").is_err());
    }

    #[test]
    fn test_sanitize_sheet_name() {
        assert_eq!(sanitize_sheet_name(Some("6A1")), Some("6A1".to_string()));
        assert_eq!(
            sanitize_sheet_name(Some("Lớp 6")),
            Some("'Lớp 6'".to_string())
        );
        assert_eq!(
            sanitize_sheet_name(Some("Tom's")),
            Some("'Tom''s'".to_string())
        );
        assert_eq!(sanitize_sheet_name(None), None);
    }
}
