use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use tracing::info;

use crate::domain::tabular::TabularData;
use crate::error::{DashboardError, Result};

pub fn write_csv<W: Write>(writer: W, table: &TabularData) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(&table.columns)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes `table` to `path` and returns the number of data rows.
pub fn write_csv_file(path: &Path, table: &TabularData) -> Result<usize> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    write_csv(file, table)?;
    info!(path = %path.display(), rows = table.rows.len(), "csv written");
    Ok(table.rows.len())
}

pub fn read_csv<R: Read>(reader: R) -> Result<TabularData> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers()?.clone();

    if headers.is_empty() {
        return Err(DashboardError::SchemaMismatch(
            "csv header is required".to_string(),
        ));
    }

    let header_len = headers.len();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(
            (0..header_len)
                .map(|col_idx| record.get(col_idx).unwrap_or("").to_string())
                .collect(),
        );
    }

    Ok(TabularData {
        columns: headers.iter().map(|h| h.to_string()).collect(),
        rows,
    })
}

pub fn read_csv_file(path: &Path) -> Result<TabularData> {
    let file = File::open(path)?;
    read_csv(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::records::{MonthlySummary, VendorLineItem, WingRecord};
    use crate::domain::tabular::Tabular;
    use pretty_assertions::assert_eq;

    fn to_csv_string(table: &TabularData) -> String {
        let mut buffer = Vec::new();
        write_csv(&mut buffer, table).expect("should serialize");
        String::from_utf8(buffer).expect("csv output should be utf-8")
    }

    #[test]
    fn writes_header_and_plain_numbers() {
        let table = VendorLineItem::to_table(&[VendorLineItem {
            vendor: "Pest Control, Quarterly".to_string(),
            amount: 1850.75,
            month: "Nov".to_string(),
        }]);

        let text = to_csv_string(&table);

        assert_eq!(
            text,
            "Vendor,Amount,Month\n\"Pest Control, Quarterly\",1850.75,Nov\n"
        );
    }

    #[test]
    fn monthly_csv_round_trips() {
        let monthly = vec![
            MonthlySummary {
                month: "Sep".to_string(),
                billed: 245000.0,
                received: 198500.5,
                expense: 87000.0,
                extra_income: 12000.0,
            },
            MonthlySummary {
                month: "Oct".to_string(),
                billed: 245000.0,
                received: 251000.0,
                expense: 91000.25,
                extra_income: 0.0,
            },
        ];

        let text = to_csv_string(&MonthlySummary::to_table(&monthly));
        let parsed = read_csv(text.as_bytes()).expect("should parse");

        assert_eq!(parsed.rows.len(), monthly.len());
        assert_eq!(MonthlySummary::from_table(&parsed).expect("should map"), monthly);
    }

    #[test]
    fn wing_csv_round_trips_through_file() {
        let wings = vec![
            WingRecord::new("Sep", "A Wing", 64000.0, 60000.0),
            WingRecord::new("Sep", "Shops", 18000.0, 21000.0),
        ];
        let dir = tempfile::tempdir().expect("should create temp dir");
        let path = dir.path().join("exports").join("wings.csv");

        let written =
            write_csv_file(&path, &WingRecord::to_table(&wings)).expect("should write csv");
        let parsed = read_csv_file(&path).expect("should read csv");

        assert_eq!(written, 2);
        assert_eq!(WingRecord::from_table(&parsed).expect("should map"), wings);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let parsed = read_csv("Vendor,Amount,Month\nSecurity,100\n".as_bytes());
        assert!(matches!(parsed, Err(DashboardError::Csv(_))));
    }

    #[test]
    fn empty_input_has_no_header() {
        let parsed = read_csv("".as_bytes());
        assert!(matches!(parsed, Err(DashboardError::SchemaMismatch(_))));
    }
}
