use serde::Serialize;

use super::loan::AmortizationRow;

/// Fixed name the form offers the downloaded schedule under.
pub const SCHEDULE_FILENAME: &str = "amortization_schedule.csv";

/// Schedule rendered as a downloadable document. Returned in lieu of
/// the decision body when the caller asks for the CSV export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleExport {
    pub csv_data: String,
    pub filename: String,
}

impl ScheduleExport {
    pub fn new(rows: &[AmortizationRow]) -> Result<Self, ExportError> {
        Ok(Self {
            csv_data: schedule_csv(rows)?,
            filename: SCHEDULE_FILENAME.to_string(),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("csv buffer error: {0}")]
    Buffer(String),
}

/// Encode the schedule as delimited text: a fixed header followed by
/// one row per month, monetary values with two fraction digits.
pub fn schedule_csv(rows: &[AmortizationRow]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Month", "Payment", "Principal", "Interest", "Balance"])?;

    for row in rows {
        writer.write_record([
            row.month.to_string(),
            format!("{:.2}", row.payment),
            format!("{:.2}", row.principal),
            format!("{:.2}", row.interest),
            format!("{:.2}", row.balance),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Buffer(err.to_string()))?;
    String::from_utf8(bytes).map_err(|err| ExportError::Buffer(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advance::loan::amortize;

    #[test]
    fn renders_header_and_one_line_per_month() {
        let rows = amortize(1200.0, 0.0, 3).expect("valid schedule");
        let csv = schedule_csv(&rows).expect("schedule encodes");
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Month,Payment,Principal,Interest,Balance");
        assert_eq!(lines[1], "1,400.00,400.00,0.00,800.00");
        assert_eq!(lines[3], "3,400.00,400.00,0.00,0.00");
    }

    #[test]
    fn export_carries_the_fixed_filename() {
        let rows = amortize(1000.0, 12.0, 12).expect("valid schedule");
        let export = ScheduleExport::new(&rows).expect("schedule encodes");
        assert_eq!(export.filename, SCHEDULE_FILENAME);
        assert_eq!(export.csv_data.lines().count(), 13);
    }
}
