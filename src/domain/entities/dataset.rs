use std::fmt;

use crate::domain::entities::records::{IncomeBreakdown, MonthlySummary, VendorLineItem, WingRecord};
use crate::error::DashboardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    SourceUnavailable,
    SchemaMismatch,
    EmptyResult,
}

/// A recovered extraction problem, shown to the user instead of failing the render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn empty(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::EmptyResult, message)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.kind {
            NoticeKind::SourceUnavailable => "source unavailable",
            NoticeKind::SchemaMismatch => "schema mismatch",
            NoticeKind::EmptyResult => "no data",
        };
        write!(f, "{label}: {}", self.message)
    }
}

impl From<&DashboardError> for Notice {
    fn from(err: &DashboardError) -> Self {
        match err {
            DashboardError::SourceUnavailable(message) => {
                Notice::new(NoticeKind::SourceUnavailable, message.clone())
            }
            DashboardError::Io(io) => Notice::new(NoticeKind::SourceUnavailable, io.to_string()),
            DashboardError::SchemaMismatch(message) => {
                Notice::new(NoticeKind::SchemaMismatch, message.clone())
            }
            DashboardError::EmptyResult(message) => {
                Notice::new(NoticeKind::EmptyResult, message.clone())
            }
            other => Notice::new(NoticeKind::SchemaMismatch, other.to_string()),
        }
    }
}

/// Everything one extraction pass produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EstateDataset {
    pub monthly: Vec<MonthlySummary>,
    pub wings: Vec<WingRecord>,
    pub vendors: Vec<VendorLineItem>,
    pub income: Vec<IncomeBreakdown>,
    pub notices: Vec<Notice>,
}

impl EstateDataset {
    /// Empty collections carrying a single notice.
    pub fn failed(notice: Notice) -> Self {
        Self {
            notices: vec![notice],
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.monthly.is_empty()
            && self.wings.is_empty()
            && self.vendors.is_empty()
            && self.income.is_empty()
    }

    /// Month labels in extraction order.
    pub fn months(&self) -> Vec<&str> {
        self.monthly.iter().map(|m| m.month.as_str()).collect()
    }
}
