use std::ops::Range as Rows;

use calamine::{Data, Range};
use tracing::debug;

use crate::domain::entities::dataset::{EstateDataset, Notice, NoticeKind};
use crate::domain::entities::layout::{CellRef, MonthLayout, SheetLayout};
use crate::domain::entities::records::{
    IncomeAmount, IncomeBreakdown, MonthlySummary, VendorLineItem, WingRecord,
};
use crate::infra::import::xlsx::{cell_is_blank, cell_number, cell_text};

/// Reads every configured month out of `sheet`.
///
/// Never fails: structural problems come back as notices on a dataset whose
/// collections are empty.
pub fn extract(sheet: &Range<Data>, layout: &SheetLayout) -> EstateDataset {
    if sheet.is_empty() {
        return EstateDataset::failed(Notice::new(
            NoticeKind::SchemaMismatch,
            format!("sheet {:?} has no cells", layout.sheet),
        ));
    }

    let markers = vendor_markers(sheet, layout);
    let mut dataset = EstateDataset::default();

    let mut skipped = Vec::new();

    for month in &layout.months {
        let vendors = vendor_items(sheet, layout, month, &markers);
        if vendors.is_empty() && !has_summary_values(sheet, month) {
            debug!(month = %month.label, "month has no values, skipped");
            skipped.push(month.label.as_str());
            continue;
        }

        if vendors.is_empty() {
            dataset
                .notices
                .push(Notice::empty(format!("no vendor rows for {}", month.label)));
        }

        let expense = match month.expense {
            Some(cell) => number_at(sheet, cell),
            None => vendors.iter().map(|v| v.amount).sum(),
        };

        dataset.monthly.push(MonthlySummary {
            month: month.label.clone(),
            billed: number_at(sheet, month.billed),
            received: number_at(sheet, month.received),
            expense,
            extra_income: number_at(sheet, month.extra_income),
        });

        for (index, wing) in layout.wings.iter().enumerate() {
            let (billed, received) = month.wing_rows.cells(index);
            dataset.wings.push(WingRecord::new(
                month.label.clone(),
                wing.clone(),
                number_at(sheet, billed),
                number_at(sheet, received),
            ));
        }

        if !layout.income_sources.is_empty() {
            dataset.income.push(IncomeBreakdown {
                month: month.label.clone(),
                sources: layout
                    .income_sources
                    .iter()
                    .zip(&month.income)
                    .map(|(source, cell)| IncomeAmount {
                        source: source.clone(),
                        amount: number_at(sheet, *cell),
                    })
                    .collect(),
            });
        }

        dataset.vendors.extend(vendors);
    }

    if dataset.monthly.is_empty() {
        let labels: Vec<&str> = layout.months.iter().map(|m| m.label.as_str()).collect();
        return EstateDataset::failed(Notice::empty(format!(
            "none of the configured months ({}) have values in sheet {:?}",
            labels.join(", "),
            layout.sheet
        )));
    }
    if !skipped.is_empty() {
        dataset.notices.push(Notice::empty(format!(
            "no values for {}, skipped",
            skipped.join(", ")
        )));
    }
    if dataset.wings.is_empty() {
        dataset
            .notices
            .push(Notice::empty("no wings configured".to_string()));
    }
    if dataset.income.is_empty() {
        dataset
            .notices
            .push(Notice::empty("no income sources configured".to_string()));
    }

    dataset
}

fn number_at(sheet: &Range<Data>, cell: CellRef) -> f64 {
    cell_number(sheet.get_value(cell.position())).unwrap_or(0.0)
}

fn has_summary_values(sheet: &Range<Data>, month: &MonthLayout) -> bool {
    month
        .summary_cells()
        .iter()
        .any(|cell| !cell_is_blank(sheet.get_value(cell.position())))
}

/// Title rows of vendor sections: `(row, month label)` in sheet order.
fn vendor_markers(sheet: &Range<Data>, layout: &SheetLayout) -> Vec<(u32, Option<String>)> {
    let (Some(start), Some(end)) = (sheet.start(), sheet.end()) else {
        return Vec::new();
    };
    if start.1 > 0 {
        return Vec::new();
    }

    (start.0..=end.0)
        .filter_map(|row| {
            let text = cell_text(sheet.get_value((row, 0)))?;
            if !text.contains(&layout.vendor_marker) {
                return None;
            }
            let month = layout
                .months
                .iter()
                .find(|m| text.contains(&m.label))
                .map(|m| m.label.clone());
            Some((row, month))
        })
        .collect()
}

/// Rows of a month's vendor section: configured, or two rows below its title
/// row up to the row before the next section's title.
fn vendor_span(
    sheet: &Range<Data>,
    month: &MonthLayout,
    markers: &[(u32, Option<String>)],
) -> Option<Rows<u32>> {
    if let Some(span) = month.vendor_rows {
        return Some(span.rows());
    }

    let index = markers
        .iter()
        .position(|(_, label)| label.as_deref() == Some(month.label.as_str()))?;
    let start = markers[index].0 + 2;
    let end = match markers.get(index + 1) {
        Some((next, _)) => next.saturating_sub(1),
        None => sheet.end().map(|(row, _)| row + 1).unwrap_or(start),
    };
    Some(start..end.max(start))
}

fn vendor_items(
    sheet: &Range<Data>,
    layout: &SheetLayout,
    month: &MonthLayout,
    markers: &[(u32, Option<String>)],
) -> Vec<VendorLineItem> {
    let Some(rows) = vendor_span(sheet, month, markers) else {
        return Vec::new();
    };
    let columns = &layout.vendor_columns;

    let mut items = Vec::new();
    for row in rows {
        let Some(vendor) = cell_text(sheet.get_value((row, columns.name.0))) else {
            continue;
        };
        if layout.is_vendor_header(&vendor) {
            continue;
        }
        for amount_col in &columns.amount {
            let Some(amount) =
                cell_number(sheet.get_value((row, amount_col.0))).filter(|v| *v > 0.0)
            else {
                continue;
            };
            items.push(VendorLineItem {
                vendor: vendor.clone(),
                amount,
                month: month.label.clone(),
            });
        }
    }
    items
}
