//! CSV parser for the EV population dataset.

use anyhow::{Context, Result};

use crate::record::VehicleRecord;

/// Decodes the dataset from CSV text with a header row.
///
/// Numeric columns that fail to parse become `None` on the record (handled
/// by the record's deserializers, never an error here).
///
/// # Errors
///
/// Returns an error if a row is structurally malformed, e.g. has a field
/// count that disagrees with the header.
pub fn parse_records(csv_text: &str) -> Result<Vec<VehicleRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv_text.as_bytes());

    let mut records = Vec::new();
    for (i, row) in reader.deserialize().enumerate() {
        let record: VehicleRecord =
            row.with_context(|| format!("malformed CSV row {}", i + 1))?;
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::VehicleType;

    const SAMPLE: &str = "\
Make,Model,Model Year,Electric Vehicle Type,Electric Range,City,County
Tesla,Model 3,2022,Battery Electric Vehicle (BEV),272,Seattle,King
Toyota,Prius Prime,2020,Plug-in Hybrid Electric Vehicle (PHEV),25,Tacoma,Pierce
";

    #[test]
    fn test_parse_header_only() {
        let records = parse_records("Make,Model Year\n").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_parse_sample_rows() {
        let records = parse_records(SAMPLE).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].make, "Tesla");
        assert_eq!(records[0].model_year, Some(2022));
        assert_eq!(records[0].vehicle_type, Some(VehicleType::BatteryElectric));
        assert_eq!(records[0].electric_range, Some(272));
        assert_eq!(records[1].vehicle_type, Some(VehicleType::PluginHybrid));
        assert_eq!(records[1].county, "Pierce");
    }

    #[test]
    fn test_parse_coerces_bad_numerics_to_none() {
        let csv = "\
Make,Model Year,Electric Range
Nissan,not-a-year,
";
        let records = parse_records(csv).unwrap();

        assert_eq!(records[0].make, "Nissan");
        assert_eq!(records[0].model_year, None);
        assert_eq!(records[0].electric_range, None);
    }

    #[test]
    fn test_parse_missing_columns_default() {
        // Columns absent from the header deserialize to their defaults
        let records = parse_records("Make\nChevrolet\n").unwrap();

        assert_eq!(records[0].make, "Chevrolet");
        assert_eq!(records[0].model, "");
        assert_eq!(records[0].vehicle_type, None);
        assert_eq!(records[0].model_year, None);
    }

    #[test]
    fn test_parse_unbalanced_row_is_error() {
        let csv = "Make,Model Year\nTesla,2022,extra-field\n";
        assert!(parse_records(csv).is_err());
    }
}
