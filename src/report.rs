//! Chart-ready projection bundle.
//!
//! Everything the dashboard views render, recomputed fresh from the
//! snapshot on every build and serialized as one JSON document.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::record::{VehicleRecord, VehicleType};
use crate::stats::{self, MakeFrequency, SummaryStats, YearFrequency};

/// One slice of the BEV/PHEV breakdown pie.
#[derive(Debug, Serialize)]
pub struct VehicleTypeSlice {
    pub name: &'static str,
    pub count: usize,
    /// Share of the full snapshot, in percent.
    pub share_pct: f64,
}

/// Complete derived view of a dataset snapshot.
#[derive(Debug, Serialize)]
pub struct DashboardReport {
    pub schema_version: u8,
    pub generated_at: DateTime<Utc>,
    pub summary: SummaryStats,
    pub vehicle_types: Vec<VehicleTypeSlice>,
    pub top_makes: Vec<MakeFrequency>,
    pub year_distribution: Vec<YearFrequency>,
}

impl DashboardReport {
    pub fn build(records: &[VehicleRecord], make_limit: usize) -> Self {
        let summary = SummaryStats::from_records(records);

        let vehicle_types = vec![
            VehicleTypeSlice {
                name: VehicleType::BatteryElectric.label(),
                count: summary.bev_count,
                share_pct: summary.bev_pct(),
            },
            VehicleTypeSlice {
                name: VehicleType::PluginHybrid.label(),
                count: summary.phev_count,
                share_pct: summary.phev_pct(),
            },
        ];

        DashboardReport {
            schema_version: 1,
            generated_at: Utc::now(),
            summary,
            vehicle_types,
            top_makes: stats::top_makes(records, make_limit),
            year_distribution: stats::year_distribution(records),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(make: &str, year: u16, vehicle_type: &str) -> VehicleRecord {
        VehicleRecord {
            make: make.to_string(),
            model_year: Some(year),
            vehicle_type: VehicleType::from_source(vehicle_type),
            ..Default::default()
        }
    }

    #[test]
    fn test_build_on_empty_snapshot() {
        let report = DashboardReport::build(&[], 5);

        assert_eq!(report.summary.total_vehicles, 0);
        assert!(report.top_makes.is_empty());
        assert!(report.year_distribution.is_empty());
        assert_eq!(report.vehicle_types.len(), 2);
        assert_eq!(report.vehicle_types[0].share_pct, 0.0);
    }

    #[test]
    fn test_build_populates_all_views() {
        let records = vec![
            record("Tesla", 2022, "Battery Electric Vehicle (BEV)"),
            record("Tesla", 2021, "Battery Electric Vehicle (BEV)"),
            record("Toyota", 2020, "Plug-in Hybrid Electric Vehicle (PHEV)"),
            record("Jeep", 2023, "Plug-in Hybrid Electric Vehicle (PHEV)"),
        ];

        let report = DashboardReport::build(&records, 2);

        assert_eq!(report.summary.total_vehicles, 4);
        assert_eq!(report.top_makes.len(), 2);
        assert_eq!(report.top_makes[0].make, "Tesla");
        assert_eq!(report.vehicle_types[0].count, 2);
        assert_eq!(report.vehicle_types[0].share_pct, 50.0);
        assert_eq!(report.vehicle_types[1].share_pct, 50.0);
        // 2020 falls below the chart cutoff
        let years: Vec<u16> = report.year_distribution.iter().map(|f| f.year).collect();
        assert_eq!(years, vec![2021, 2022, 2023]);
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report = DashboardReport::build(&[], 5);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["schema_version"], 1);
        assert!(json["summary"]["total_vehicles"].is_number());
        assert!(json["vehicle_types"].as_array().unwrap().len() == 2);
    }
}
