use std::path::{Path, PathBuf};

use chrono::Local;

use crate::domain::entities::dataset::EstateDataset;
use crate::domain::tabular::Section;
use crate::error::{DashboardError, Result};
use crate::infra::export::csv::write_csv_file;

pub struct ExportService;

impl ExportService {
    /// Writes one section as CSV; returns the number of data rows.
    pub fn export(dataset: &EstateDataset, section: Section, path: &Path) -> Result<usize> {
        if section.is_empty(dataset) {
            return Err(DashboardError::EmptyResult(format!(
                "{} has no rows to export",
                section.title()
            )));
        }
        write_csv_file(path, &section.table(dataset))
    }

    /// Exports every non-empty section into `dir` with default file names.
    pub fn export_all(dataset: &EstateDataset, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        for section in Section::ALL {
            if section.is_empty(dataset) {
                continue;
            }
            let path = dir.join(default_file_name(section));
            Self::export(dataset, section, &path)?;
            written.push(path);
        }
        Ok(written)
    }
}

pub fn default_file_name(section: Section) -> String {
    format!(
        "zen-estate-{}-{}.csv",
        section.file_stem(),
        Local::now().format("%m%d")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::records::{MonthlySummary, VendorLineItem};
    use crate::infra::export::csv::read_csv_file;

    fn dataset() -> EstateDataset {
        EstateDataset {
            monthly: vec![MonthlySummary {
                month: "Sep".to_string(),
                billed: 1000.0,
                received: 800.0,
                expense: 400.0,
                extra_income: 50.0,
            }],
            vendors: vec![VendorLineItem {
                vendor: "Security".to_string(),
                amount: 400.0,
                month: "Sep".to_string(),
            }],
            ..EstateDataset::default()
        }
    }

    #[test]
    fn empty_section_is_not_exported() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let err = ExportService::export(&dataset(), Section::Wings, &dir.path().join("w.csv"))
            .expect_err("no wing rows");
        assert!(matches!(err, DashboardError::EmptyResult(_)));
    }

    #[test]
    fn export_all_skips_empty_sections() {
        let dir = tempfile::tempdir().expect("should create temp dir");

        let written = ExportService::export_all(&dataset(), dir.path()).expect("should export");

        assert_eq!(written.len(), 2);
        let monthly = read_csv_file(&written[0]).expect("should read back");
        assert_eq!(monthly.rows[0][5], "200");
    }

    #[test]
    fn default_names_carry_section() {
        let name = default_file_name(Section::Vendors);
        assert!(name.starts_with("zen-estate-vendor-bills-"));
        assert!(name.ends_with(".csv"));
    }
}
