//! Plain tables for widgets and CSV: ordered headers, rows of strings.
//! Amounts are written as plain decimals; currency formatting is left to
//! the UI.

use crate::domain::entities::dataset::EstateDataset;
use crate::domain::entities::records::{
    IncomeAmount, IncomeBreakdown, MonthlySummary, VendorLineItem, WingRecord,
};
use crate::error::{DashboardError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabularData {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TabularData {
    pub fn new(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| DashboardError::SchemaMismatch(format!("missing column {name:?}")))
    }

    fn text(&self, row: &[String], col: usize) -> String {
        row.get(col).cloned().unwrap_or_default()
    }

    fn amount(&self, row: &[String], row_idx: usize, col: usize) -> Result<f64> {
        let text = self.text(row, col);
        parse_amount(&text).ok_or_else(|| {
            DashboardError::SchemaMismatch(format!(
                "row {}: {:?} in column {:?} is not a number",
                row_idx + 1,
                text,
                self.columns[col]
            ))
        })
    }
}

/// Shortest decimal that reads back to the same value.
pub fn format_amount(value: f64) -> String {
    if value.is_finite() {
        format!("{value}")
    } else {
        String::new()
    }
}

fn parse_amount(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok()
}

pub trait Tabular: Sized {
    fn to_table(items: &[Self]) -> TabularData;
    fn from_table(table: &TabularData) -> Result<Vec<Self>>;
}

impl Tabular for MonthlySummary {
    fn to_table(items: &[Self]) -> TabularData {
        let mut table = TabularData::new(&[
            "Month",
            "To_Be",
            "Received",
            "Total_Expense",
            "Extra_Income",
            "Difference",
        ]);
        table.rows = items
            .iter()
            .map(|m| {
                vec![
                    m.month.clone(),
                    format_amount(m.billed),
                    format_amount(m.received),
                    format_amount(m.expense),
                    format_amount(m.extra_income),
                    format_amount(m.difference()),
                ]
            })
            .collect();
        table
    }

    fn from_table(table: &TabularData) -> Result<Vec<Self>> {
        let month = table.column_index("Month")?;
        let billed = table.column_index("To_Be")?;
        let received = table.column_index("Received")?;
        let expense = table.column_index("Total_Expense")?;
        let extra = table.column_index("Extra_Income")?;

        table
            .rows
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                Ok(MonthlySummary {
                    month: table.text(row, month),
                    billed: table.amount(row, idx, billed)?,
                    received: table.amount(row, idx, received)?,
                    expense: table.amount(row, idx, expense)?,
                    extra_income: table.amount(row, idx, extra)?,
                })
            })
            .collect()
    }
}

impl Tabular for WingRecord {
    fn to_table(items: &[Self]) -> TabularData {
        let mut table = TabularData::new(&["Month", "Wing", "To_Be", "Received", "Difference"]);
        table.rows = items
            .iter()
            .map(|w| {
                vec![
                    w.month.clone(),
                    w.wing.clone(),
                    format_amount(w.billed),
                    format_amount(w.received),
                    format_amount(w.difference),
                ]
            })
            .collect();
        table
    }

    fn from_table(table: &TabularData) -> Result<Vec<Self>> {
        let month = table.column_index("Month")?;
        let wing = table.column_index("Wing")?;
        let billed = table.column_index("To_Be")?;
        let received = table.column_index("Received")?;
        let difference = table.column_index("Difference")?;

        table
            .rows
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                Ok(WingRecord {
                    month: table.text(row, month),
                    wing: table.text(row, wing),
                    billed: table.amount(row, idx, billed)?,
                    received: table.amount(row, idx, received)?,
                    difference: table.amount(row, idx, difference)?,
                })
            })
            .collect()
    }
}

impl Tabular for VendorLineItem {
    fn to_table(items: &[Self]) -> TabularData {
        let mut table = TabularData::new(&["Vendor", "Amount", "Month"]);
        table.rows = items
            .iter()
            .map(|v| vec![v.vendor.clone(), format_amount(v.amount), v.month.clone()])
            .collect();
        table
    }

    fn from_table(table: &TabularData) -> Result<Vec<Self>> {
        let vendor = table.column_index("Vendor")?;
        let amount = table.column_index("Amount")?;
        let month = table.column_index("Month")?;

        table
            .rows
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                Ok(VendorLineItem {
                    vendor: table.text(row, vendor),
                    amount: table.amount(row, idx, amount)?,
                    month: table.text(row, month),
                })
            })
            .collect()
    }
}

/// `Month` followed by one column per income source, in the order of the
/// first record.
impl Tabular for IncomeBreakdown {
    fn to_table(items: &[Self]) -> TabularData {
        let mut columns = vec!["Month".to_string()];
        if let Some(first) = items.first() {
            columns.extend(first.sources.iter().map(|s| s.source.clone()));
        }

        let rows = items
            .iter()
            .map(|income| {
                let mut row = vec![income.month.clone()];
                row.extend(columns[1..].iter().map(|source| {
                    income
                        .amount_for(source)
                        .map(format_amount)
                        .unwrap_or_default()
                }));
                row
            })
            .collect();

        TabularData { columns, rows }
    }

    fn from_table(table: &TabularData) -> Result<Vec<Self>> {
        let month = table.column_index("Month")?;
        let sources: Vec<(usize, &String)> = table
            .columns
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != month)
            .collect();

        table
            .rows
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                let amounts = sources
                    .iter()
                    .map(|(col, source)| {
                        Ok(IncomeAmount {
                            source: (*source).clone(),
                            amount: table.amount(row, idx, *col)?,
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(IncomeBreakdown {
                    month: table.text(row, month),
                    sources: amounts,
                })
            })
            .collect()
    }
}

/// The four exportable sections of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Monthly,
    Wings,
    Vendors,
    Income,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Monthly,
        Section::Wings,
        Section::Vendors,
        Section::Income,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Section::Monthly => "Monthly Summary",
            Section::Wings => "Wing Collection",
            Section::Vendors => "Vendor Bills",
            Section::Income => "Extra Income",
        }
    }

    pub fn file_stem(self) -> &'static str {
        match self {
            Section::Monthly => "monthly-summary",
            Section::Wings => "wing-collection",
            Section::Vendors => "vendor-bills",
            Section::Income => "extra-income",
        }
    }

    pub fn table(self, dataset: &EstateDataset) -> TabularData {
        match self {
            Section::Monthly => MonthlySummary::to_table(&dataset.monthly),
            Section::Wings => WingRecord::to_table(&dataset.wings),
            Section::Vendors => VendorLineItem::to_table(&dataset.vendors),
            Section::Income => IncomeBreakdown::to_table(&dataset.income),
        }
    }

    pub fn is_empty(self, dataset: &EstateDataset) -> bool {
        match self {
            Section::Monthly => dataset.monthly.is_empty(),
            Section::Wings => dataset.wings.is_empty(),
            Section::Vendors => dataset.vendors.is_empty(),
            Section::Income => dataset.income.is_empty(),
        }
    }
}
