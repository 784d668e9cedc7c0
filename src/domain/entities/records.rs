/// Month-level totals from the summary block of the sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySummary {
    pub month: String,
    /// Amount billed ("To Be").
    pub billed: f64,
    pub received: f64,
    pub expense: f64,
    pub extra_income: f64,
}

impl MonthlySummary {
    /// Positive means still pending, negative means collected in excess.
    pub fn difference(&self) -> f64 {
        self.billed - self.received
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WingRecord {
    pub month: String,
    pub wing: String,
    pub billed: f64,
    pub received: f64,
    pub difference: f64,
}

impl WingRecord {
    pub fn new(month: impl Into<String>, wing: impl Into<String>, billed: f64, received: f64) -> Self {
        Self {
            month: month.into(),
            wing: wing.into(),
            billed,
            received,
            difference: billed - received,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VendorLineItem {
    pub vendor: String,
    pub amount: f64,
    pub month: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IncomeAmount {
    pub source: String,
    pub amount: f64,
}

/// Extra income of one month, one entry per configured income source.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomeBreakdown {
    pub month: String,
    pub sources: Vec<IncomeAmount>,
}

impl IncomeBreakdown {
    pub fn total(&self) -> f64 {
        self.sources.iter().map(|s| s.amount).sum()
    }

    pub fn amount_for(&self, source: &str) -> Option<f64> {
        self.sources
            .iter()
            .find(|s| s.source == source)
            .map(|s| s.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monthly_difference_is_billed_minus_received() {
        let summary = MonthlySummary {
            month: "Sep".to_string(),
            billed: 1000.0,
            received: 800.0,
            expense: 0.0,
            extra_income: 0.0,
        };
        assert_eq!(summary.difference(), 200.0);
    }

    #[test]
    fn wing_record_computes_difference() {
        let record = WingRecord::new("Oct", "A Wing", 500.0, 650.0);
        assert_eq!(record.difference, -150.0);
    }

    #[test]
    fn income_total_sums_sources() {
        let income = IncomeBreakdown {
            month: "Nov".to_string(),
            sources: vec![
                IncomeAmount {
                    source: "Hall Booking".to_string(),
                    amount: 1200.0,
                },
                IncomeAmount {
                    source: "Scrap Sale".to_string(),
                    amount: 300.0,
                },
            ],
        };
        assert_eq!(income.total(), 1500.0);
        assert_eq!(income.amount_for("Scrap Sale"), Some(300.0));
        assert_eq!(income.amount_for("Events"), None);
    }
}
