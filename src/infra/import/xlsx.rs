use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use tracing::debug;

use crate::error::{DashboardError, Result};

/// Opens workbook bytes (xlsx, xls, xlsb or ods) and returns one sheet.
pub fn open_sheet(bytes: &[u8], sheet_name: &str) -> Result<Range<Data>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|err| DashboardError::SchemaMismatch(format!("not a readable workbook: {err}")))?;

    let available = workbook.sheet_names().to_vec();
    if !available.iter().any(|name| name == sheet_name) {
        return Err(DashboardError::SchemaMismatch(format!(
            "sheet {sheet_name:?} not found (available: {})",
            available.join(", ")
        )));
    }

    let range = workbook.worksheet_range(sheet_name).map_err(|err| {
        DashboardError::SchemaMismatch(format!("failed to read sheet {sheet_name:?}: {err}"))
    })?;
    debug!(sheet = sheet_name, size = ?range.get_size(), "sheet loaded");
    Ok(range)
}

/// Numeric value of a cell. Text is accepted when it reads as a number once
/// the rupee sign and thousands separators are removed.
pub fn cell_number(cell: Option<&Data>) -> Option<f64> {
    match cell? {
        Data::Float(v) if v.is_finite() => Some(*v),
        Data::Int(v) => Some(*v as f64),
        Data::String(v) => parse_amount_text(v),
        _ => None,
    }
}

/// Trimmed text of a string cell; `None` for blanks and non-text cells.
pub fn cell_text(cell: Option<&Data>) -> Option<String> {
    match cell? {
        Data::String(v) => {
            let trimmed = v.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        _ => None,
    }
}

pub fn cell_is_blank(cell: Option<&Data>) -> bool {
    match cell {
        None | Some(Data::Empty) => true,
        Some(Data::String(v)) => v.trim().is_empty(),
        Some(_) => false,
    }
}

fn parse_amount_text(value: &str) -> Option<f64> {
    let cleaned: String = value
        .trim()
        .trim_start_matches('₹')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_from_numeric_and_text_cells() {
        assert_eq!(cell_number(Some(&Data::Float(12.5))), Some(12.5));
        assert_eq!(cell_number(Some(&Data::Int(7))), Some(7.0));
        assert_eq!(
            cell_number(Some(&Data::String("₹1,200".to_string()))),
            Some(1200.0)
        );
        assert_eq!(cell_number(Some(&Data::String("n/a".to_string()))), None);
        assert_eq!(cell_number(Some(&Data::Bool(true))), None);
        assert_eq!(cell_number(Some(&Data::Empty)), None);
        assert_eq!(cell_number(None), None);
    }

    #[test]
    fn text_only_from_string_cells() {
        assert_eq!(
            cell_text(Some(&Data::String("  Lift AMC ".to_string()))),
            Some("Lift AMC".to_string())
        );
        assert_eq!(cell_text(Some(&Data::String("   ".to_string()))), None);
        assert_eq!(cell_text(Some(&Data::Float(3.0))), None);
    }

    #[test]
    fn blank_cells() {
        assert!(cell_is_blank(None));
        assert!(cell_is_blank(Some(&Data::Empty)));
        assert!(cell_is_blank(Some(&Data::String(" ".to_string()))));
        assert!(!cell_is_blank(Some(&Data::Float(0.0))));
    }

    #[test]
    fn garbage_bytes_are_a_schema_mismatch() {
        let result = open_sheet(b"definitely not a workbook", "Sheet1");
        assert!(matches!(result, Err(DashboardError::SchemaMismatch(_))));
    }
}
