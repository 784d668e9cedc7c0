//! Declarative description of where each figure lives in the estate sheet.
//!
//! Rows in the TOML file are 1-based and columns are letters, the way they
//! read in a spreadsheet application. Everything is converted to the 0-based
//! `(row, col)` pairs calamine uses as soon as the layout is parsed.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Deserializer};

use crate::error::{DashboardError, Result};

const EMBEDDED_LAYOUT: &str = include_str!("../../../assets/default_layout.toml");

/// Last row of an xlsx worksheet.
pub const MAX_ROW: u32 = 1_048_576;

/// Column letters, `A` = 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct ColumnRef(pub u32);

impl TryFrom<String> for ColumnRef {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        parse_column(&value).map(ColumnRef)
    }
}

/// A single cell in A1 notation, stored 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct CellRef {
    pub row: u32,
    pub col: u32,
}

impl CellRef {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    pub fn position(&self) -> (u32, u32) {
        (self.row, self.col)
    }
}

impl TryFrom<String> for CellRef {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        parse_cell(&value)
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_name(self.col), self.row + 1)
    }
}

pub fn parse_column(text: &str) -> std::result::Result<u32, String> {
    let letters = text.trim();
    if letters.is_empty() || letters.len() > 3 {
        return Err(format!("invalid column reference: {text:?}"));
    }
    let mut col = 0_u32;
    for ch in letters.chars() {
        if !ch.is_ascii_alphabetic() {
            return Err(format!("invalid column reference: {text:?}"));
        }
        col = col * 26 + (ch.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
    }
    Ok(col - 1)
}

pub fn parse_cell(text: &str) -> std::result::Result<CellRef, String> {
    let trimmed = text.trim();
    let split = trimmed
        .find(|c: char| c.is_ascii_digit())
        .ok_or_else(|| format!("invalid cell reference: {text:?}"))?;
    let (letters, digits) = trimmed.split_at(split);
    let col = parse_column(letters).map_err(|_| format!("invalid cell reference: {text:?}"))?;
    let row = digits
        .parse::<u32>()
        .ok()
        .filter(|row| *row > 0)
        .ok_or_else(|| format!("invalid cell reference: {text:?}"))?;
    Ok(CellRef::new(row - 1, col))
}

pub fn column_name(col: u32) -> String {
    let mut n = col + 1;
    let mut name = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        name.push((b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    name.iter().rev().collect()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VendorColumns {
    pub name: ColumnRef,
    /// `amount = "D"` or `amount = ["D", "E", "F"]`; every positive value
    /// in these columns is one line item.
    #[serde(deserialize_with = "one_or_many")]
    pub amount: Vec<ColumnRef>,
}

fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<ColumnRef>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Columns {
        One(ColumnRef),
        Many(Vec<ColumnRef>),
    }

    Ok(match Columns::deserialize(deserializer)? {
        Columns::One(col) => vec![col],
        Columns::Many(cols) => cols,
    })
}

/// Wing `i` of [`SheetLayout::wings`] sits on row `start + i`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WingRows {
    pub start: u32,
    pub billed: ColumnRef,
    pub received: ColumnRef,
}

impl WingRows {
    pub fn cells(&self, index: usize) -> (CellRef, CellRef) {
        let row = self.start - 1 + index as u32;
        (
            CellRef::new(row, self.billed.0),
            CellRef::new(row, self.received.0),
        )
    }
}

/// Inclusive, 1-based row span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RowSpan {
    pub start: u32,
    pub end: u32,
}

impl RowSpan {
    /// 0-based, end exclusive.
    pub fn rows(&self) -> std::ops::Range<u32> {
        (self.start - 1)..self.end
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MonthLayout {
    pub label: String,
    pub billed: CellRef,
    pub received: CellRef,
    /// When absent the month's expense is the sum of its vendor bills.
    #[serde(default)]
    pub expense: Option<CellRef>,
    pub extra_income: CellRef,
    #[serde(default)]
    pub income: Vec<CellRef>,
    pub wing_rows: WingRows,
    /// When absent the vendor section is located through the vendor marker.
    #[serde(default)]
    pub vendor_rows: Option<RowSpan>,
}

impl MonthLayout {
    pub fn summary_cells(&self) -> Vec<CellRef> {
        let mut cells = vec![self.billed, self.received, self.extra_income];
        cells.extend(self.expense);
        cells
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SheetLayout {
    pub sheet: String,
    pub wings: Vec<String>,
    pub income_sources: Vec<String>,
    #[serde(default)]
    pub vendor_headers: Vec<String>,
    #[serde(default = "default_vendor_marker")]
    pub vendor_marker: String,
    pub vendor_columns: VendorColumns,
    pub months: Vec<MonthLayout>,
}

fn default_vendor_marker() -> String {
    "Vendor Bills".to_string()
}

impl SheetLayout {
    pub fn from_toml(text: &str) -> Result<Self> {
        let layout: SheetLayout =
            toml::from_str(text).map_err(|err| DashboardError::Config(err.to_string()))?;
        layout.validate()?;
        Ok(layout)
    }

    /// The sample layout shipped with the binary.
    pub fn embedded() -> Result<Self> {
        Self::from_toml(EMBEDDED_LAYOUT)
    }

    pub fn is_vendor_header(&self, name: &str) -> bool {
        let needle = name.trim();
        self.vendor_headers
            .iter()
            .any(|header| header.trim().eq_ignore_ascii_case(needle))
    }

    fn validate(&self) -> Result<()> {
        if self.sheet.trim().is_empty() {
            return Err(DashboardError::Config("sheet name is empty".to_string()));
        }
        if self.months.is_empty() {
            return Err(DashboardError::Config("no months configured".to_string()));
        }
        if self.vendor_marker.trim().is_empty() {
            return Err(DashboardError::Config("vendor marker is empty".to_string()));
        }
        if self.vendor_columns.amount.is_empty() {
            return Err(DashboardError::Config(
                "no vendor amount columns configured".to_string(),
            ));
        }
        unique_names("wing", &self.wings)?;
        unique_names("income source", &self.income_sources)?;

        let wing_count = self.wings.len() as u64;
        let mut seen = HashSet::new();
        for month in &self.months {
            if !seen.insert(month.label.as_str()) {
                return Err(DashboardError::Config(format!(
                    "month {} is configured twice",
                    month.label
                )));
            }
            if month.income.len() != self.income_sources.len() {
                return Err(DashboardError::Config(format!(
                    "month {} lists {} income cells for {} income sources",
                    month.label,
                    month.income.len(),
                    self.income_sources.len()
                )));
            }
            let wing_start = u64::from(month.wing_rows.start);
            if wing_start == 0 || wing_start + wing_count.saturating_sub(1) > u64::from(MAX_ROW) {
                return Err(DashboardError::Config(format!(
                    "month {}: wing rows must lie within rows 1..={MAX_ROW}",
                    month.label
                )));
            }
            if let Some(span) = month.vendor_rows {
                if span.start == 0 || span.end < span.start || span.end > MAX_ROW {
                    return Err(DashboardError::Config(format!(
                        "month {}: invalid vendor rows {}..{}",
                        month.label, span.start, span.end
                    )));
                }
            }
        }
        Ok(())
    }
}

fn unique_names(kind: &str, names: &[String]) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name.trim()) {
            return Err(DashboardError::Config(format!(
                "{kind} {name:?} is configured twice"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a1_references() {
        assert_eq!(parse_cell("A1"), Ok(CellRef::new(0, 0)));
        assert_eq!(parse_cell("c12"), Ok(CellRef::new(11, 2)));
        assert_eq!(parse_cell("AA3"), Ok(CellRef::new(2, 26)));
        assert!(parse_cell("B0").is_err());
        assert!(parse_cell("12").is_err());
        assert!(parse_cell("B").is_err());
    }

    #[test]
    fn column_names_match_parser() {
        for col in [0, 1, 25, 26, 51, 52, 701, 702] {
            assert_eq!(parse_column(&column_name(col)), Ok(col));
        }
        assert_eq!(column_name(27), "AB");
        assert_eq!(CellRef::new(4, 1).to_string(), "B5");
    }

    #[test]
    fn embedded_layout_is_valid() {
        let layout = SheetLayout::embedded().expect("embedded layout should parse");
        assert_eq!(layout.sheet, "Sheet1");
        assert!(!layout.months.is_empty());
        assert!(layout.is_vendor_header("vendor name"));
        assert_eq!(layout.vendor_columns.amount, vec![ColumnRef(3)]);
    }

    #[test]
    fn rejects_income_cells_mismatch() {
        let text = r#"
            sheet = "Sheet1"
            wings = ["A Wing"]
            income_sources = ["Hall Booking", "Events"]
            vendor_columns = { name = "C", amount = "D" }

            [[months]]
            label = "Sep"
            billed = "B3"
            received = "C3"
            extra_income = "E3"
            income = ["H3"]
            wing_rows = { start = 11, billed = "B", received = "C" }
        "#;
        let err = SheetLayout::from_toml(text).expect_err("mismatch should be rejected");
        assert!(err.to_string().contains("income"), "{err}");
    }

    #[test]
    fn rejects_bad_cell_reference() {
        let text = r#"
            sheet = "Sheet1"
            wings = []
            income_sources = []
            vendor_columns = { name = "C", amount = "D" }

            [[months]]
            label = "Sep"
            billed = "3B"
            received = "C3"
            extra_income = "E3"
            wing_rows = { start = 11, billed = "B", received = "C" }
        "#;
        assert!(matches!(
            SheetLayout::from_toml(text),
            Err(DashboardError::Config(_))
        ));
    }

    #[test]
    fn wing_rows_follow_wing_order() {
        let rows = WingRows {
            start: 11,
            billed: ColumnRef(1),
            received: ColumnRef(2),
        };
        assert_eq!(rows.cells(0), (CellRef::new(10, 1), CellRef::new(10, 2)));
        assert_eq!(rows.cells(3), (CellRef::new(13, 1), CellRef::new(13, 2)));
    }

    const BASE: &str = r#"
        sheet = "Sheet1"
        wings = ["A Wing", "B Wing"]
        income_sources = ["Hall Booking", "Events"]
        vendor_columns = { name = "C", amount = ["D", "E"] }

        [[months]]
        label = "Sep"
        billed = "B3"
        received = "C3"
        extra_income = "E3"
        income = ["H3", "I3"]
        wing_rows = { start = 11, billed = "B", received = "C" }
    "#;

    fn config_error(text: &str) -> String {
        match SheetLayout::from_toml(text) {
            Err(DashboardError::Config(message)) => message,
            other => panic!("expected a config error, got {other:?}"),
        }
    }

    #[test]
    fn amount_columns_accept_a_list() {
        let layout = SheetLayout::from_toml(BASE).expect("layout should parse");
        assert_eq!(layout.vendor_columns.amount, vec![ColumnRef(3), ColumnRef(4)]);
    }

    #[test]
    fn rejects_duplicate_names() {
        let sources = BASE.replace(r#"["Hall Booking", "Events"]"#, r#"["Events", "Events"]"#);
        assert!(config_error(&sources).contains("income source \"Events\""));

        let wings = BASE.replace(r#"["A Wing", "B Wing"]"#, r#"["A Wing", "A Wing "]"#);
        assert!(config_error(&wings).contains("wing"));
    }

    #[test]
    fn rejects_rows_beyond_the_sheet() {
        let wings = BASE.replace("start = 11", "start = 4294967295");
        assert!(config_error(&wings).contains("wing rows"));

        let vendors = BASE.replace(
            "wing_rows = {",
            "vendor_rows = { start = 20, end = 4000000000 }\n        wing_rows = {",
        );
        assert!(config_error(&vendors).contains("vendor rows"));
    }

    #[test]
    fn rejects_blank_vendor_marker() {
        let text = BASE.replace(
            "vendor_columns =",
            "vendor_marker = \"  \"\n        vendor_columns =",
        );
        assert_eq!(config_error(&text), "vendor marker is empty");
    }
}
