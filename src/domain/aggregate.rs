//! Reductions over extracted records. All functions are pure; ordering of
//! the input only matters where a result is documented as ordered.

use std::collections::{HashMap, HashSet};

use crate::domain::entities::dataset::EstateDataset;
use crate::domain::entities::records::{IncomeBreakdown, MonthlySummary, VendorLineItem, WingRecord};

#[derive(Debug, Clone, PartialEq)]
pub struct VendorTotal {
    pub vendor: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Balance {
    /// Still owed by the wing.
    Pending,
    /// Paid more than billed.
    Excess,
    Settled,
}

impl Balance {
    pub fn of(difference: f64) -> Self {
        if difference > 0.0 {
            Balance::Pending
        } else if difference < 0.0 {
            Balance::Excess
        } else {
            Balance::Settled
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WingTotal {
    pub wing: String,
    pub difference: f64,
    pub balance: Balance,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthAmount {
    pub month: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceTotal {
    pub source: String,
    pub amount: f64,
}

pub fn total_expense(monthly: &[MonthlySummary]) -> f64 {
    monthly.iter().map(|m| m.expense).sum()
}

pub fn total_billed(monthly: &[MonthlySummary]) -> f64 {
    monthly.iter().map(|m| m.billed).sum()
}

pub fn total_received(monthly: &[MonthlySummary]) -> f64 {
    monthly.iter().map(|m| m.received).sum()
}

pub fn total_pending(monthly: &[MonthlySummary]) -> f64 {
    monthly.iter().map(MonthlySummary::difference).sum()
}

pub fn total_extra_income(monthly: &[MonthlySummary]) -> f64 {
    monthly.iter().map(|m| m.extra_income).sum()
}

/// Received over billed; 0 when nothing was billed.
pub fn collection_rate(monthly: &[MonthlySummary]) -> f64 {
    safe_div(total_received(monthly), total_billed(monthly))
}

fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator.abs() < f64::EPSILON {
        0.0
    } else {
        numerator / denominator
    }
}

/// Amount per vendor, largest first, ties by name.
pub fn vendor_totals(items: &[VendorLineItem]) -> Vec<VendorTotal> {
    let mut sums: HashMap<&str, f64> = HashMap::new();
    for item in items {
        *sums.entry(item.vendor.as_str()).or_insert(0.0) += item.amount;
    }

    let mut totals: Vec<VendorTotal> = sums
        .into_iter()
        .map(|(vendor, amount)| VendorTotal {
            vendor: vendor.to_string(),
            amount,
        })
        .collect();
    totals.sort_by(|a, b| {
        b.amount
            .total_cmp(&a.amount)
            .then_with(|| a.vendor.cmp(&b.vendor))
    });
    totals
}

pub fn top_vendors(items: &[VendorLineItem], n: usize) -> Vec<VendorTotal> {
    let mut totals = vendor_totals(items);
    totals.truncate(n);
    totals
}

pub fn unique_vendor_count(items: &[VendorLineItem]) -> usize {
    items
        .iter()
        .map(|item| item.vendor.as_str())
        .collect::<HashSet<_>>()
        .len()
}

/// Vendor spend per month, months in first-seen order.
pub fn vendor_spend_by_month(items: &[VendorLineItem]) -> Vec<MonthAmount> {
    let mut months: Vec<MonthAmount> = Vec::new();
    for item in items {
        match months.iter_mut().find(|m| m.month == item.month) {
            Some(entry) => entry.amount += item.amount,
            None => months.push(MonthAmount {
                month: item.month.clone(),
                amount: item.amount,
            }),
        }
    }
    months
}

/// Sum of differences per wing across months, wings in first-seen order.
pub fn wing_totals(records: &[WingRecord]) -> Vec<WingTotal> {
    let mut totals: Vec<WingTotal> = Vec::new();
    for record in records {
        match totals.iter_mut().find(|t| t.wing == record.wing) {
            Some(entry) => entry.difference += record.difference,
            None => totals.push(WingTotal {
                wing: record.wing.clone(),
                difference: record.difference,
                balance: Balance::Settled,
            }),
        }
    }
    for total in &mut totals {
        total.balance = Balance::of(total.difference);
    }
    totals
}

/// Per-source sums over all months, sources in first-seen order.
pub fn income_totals_by_source(income: &[IncomeBreakdown]) -> Vec<SourceTotal> {
    let mut totals: Vec<SourceTotal> = Vec::new();
    for entry in income.iter().flat_map(|month| &month.sources) {
        match totals.iter_mut().find(|t| t.source == entry.source) {
            Some(total) => total.amount += entry.amount,
            None => totals.push(SourceTotal {
                source: entry.source.clone(),
                amount: entry.amount,
            }),
        }
    }
    totals
}

/// Headline figures for one dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub month_count: usize,
    pub vendor_count: usize,
    pub total_billed: f64,
    pub total_received: f64,
    pub total_pending: f64,
    pub total_expense: f64,
    pub total_extra_income: f64,
    pub collection_rate: f64,
    pub top_vendors: Vec<VendorTotal>,
    pub vendor_spend_by_month: Vec<MonthAmount>,
    pub wing_totals: Vec<WingTotal>,
    pub income_by_source: Vec<SourceTotal>,
}

pub fn summarize(dataset: &EstateDataset, top_n: usize) -> DashboardSummary {
    DashboardSummary {
        month_count: dataset.monthly.len(),
        vendor_count: unique_vendor_count(&dataset.vendors),
        total_billed: total_billed(&dataset.monthly),
        total_received: total_received(&dataset.monthly),
        total_pending: total_pending(&dataset.monthly),
        total_expense: total_expense(&dataset.monthly),
        total_extra_income: total_extra_income(&dataset.monthly),
        collection_rate: collection_rate(&dataset.monthly),
        top_vendors: top_vendors(&dataset.vendors, top_n),
        vendor_spend_by_month: vendor_spend_by_month(&dataset.vendors),
        wing_totals: wing_totals(&dataset.wings),
        income_by_source: income_totals_by_source(&dataset.income),
    }
}
