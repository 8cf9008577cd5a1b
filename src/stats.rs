//! Pure aggregation over an in-memory record snapshot.
//!
//! Every function here recomputes from the full slice it is handed. Nothing
//! is cached or incrementally maintained, and nothing in this module
//! performs I/O or fails: malformed rows degrade by exclusion.

use indexmap::IndexMap;
use serde::Serialize;

use crate::record::{VehicleRecord, VehicleType};

/// Model years at or below this are dropped from the year histogram.
pub const MIN_CHART_YEAR: u16 = 2010;

/// Headline numbers for the overview cards.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    pub total_vehicles: usize,
    pub bev_count: usize,
    pub phev_count: usize,
    pub most_popular_make: String,
    pub most_common_model_year: u16,
}

impl SummaryStats {
    /// Single pass over the snapshot: type tallies plus make/year frequency
    /// maps for the two mode computations.
    ///
    /// Records whose type matches neither known literal count toward
    /// `total_vehicles` only. An empty make or an unknown model year keeps
    /// that record out of the corresponding frequency map.
    pub fn from_records(records: &[VehicleRecord]) -> Self {
        let mut s = SummaryStats {
            total_vehicles: records.len(),
            ..Default::default()
        };

        let mut make_counts: IndexMap<&str, usize> = IndexMap::new();
        let mut year_counts: IndexMap<u16, usize> = IndexMap::new();

        for r in records {
            match r.vehicle_type {
                Some(VehicleType::BatteryElectric) => s.bev_count += 1,
                Some(VehicleType::PluginHybrid) => s.phev_count += 1,
                None => {}
            }

            if !r.make.is_empty() {
                *make_counts.entry(r.make.as_str()).or_default() += 1;
            }

            if let Some(year) = r.model_year {
                *year_counts.entry(year).or_default() += 1;
            }
        }

        s.most_popular_make = mode(&make_counts)
            .map(|m| (*m).to_string())
            .unwrap_or_default();
        s.most_common_model_year = mode(&year_counts).copied().unwrap_or(0);

        s
    }

    pub fn pct(part: usize, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            (part as f64 / total as f64) * 100.0
        }
    }

    pub fn bev_pct(&self) -> f64 {
        Self::pct(self.bev_count, self.total_vehicles)
    }

    pub fn phev_pct(&self) -> f64 {
        Self::pct(self.phev_count, self.total_vehicles)
    }
}

/// One bar of the top-makes chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MakeFrequency {
    pub make: String,
    pub count: usize,
}

/// One bar of the model-year histogram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearFrequency {
    pub year: u16,
    pub count: usize,
}

/// Selects the key with the highest count. Ties resolve to the key seen
/// first: `IndexMap` iterates in insertion order and the current best is
/// only replaced by a strictly greater count.
fn mode<K>(counts: &IndexMap<K, usize>) -> Option<&K>
where
    K: std::hash::Hash + Eq,
{
    let mut best: Option<(&K, usize)> = None;
    for (key, &count) in counts {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((key, count)),
        }
    }
    best.map(|(key, _)| key)
}

/// Ranks makes by occurrence count, descending, truncated to `limit`.
///
/// The sort is stable, so makes with equal counts keep their first-seen
/// order for a fixed input. A `limit` of 0 yields an empty vector; a limit
/// beyond the distinct-make count yields all of them.
pub fn top_makes(records: &[VehicleRecord], limit: usize) -> Vec<MakeFrequency> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for r in records {
        if !r.make.is_empty() {
            *counts.entry(r.make.as_str()).or_default() += 1;
        }
    }

    let mut ranked: Vec<MakeFrequency> = counts
        .into_iter()
        .map(|(make, count)| MakeFrequency {
            make: make.to_string(),
            count,
        })
        .collect();

    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(limit);
    ranked
}

/// Counts records per model year, restricted to known years after
/// [`MIN_CHART_YEAR`], ordered ascending by year.
pub fn year_distribution(records: &[VehicleRecord]) -> Vec<YearFrequency> {
    let mut counts: IndexMap<u16, usize> = IndexMap::new();
    for r in records {
        if let Some(year) = r.model_year {
            if year > MIN_CHART_YEAR {
                *counts.entry(year).or_default() += 1;
            }
        }
    }

    let mut histogram: Vec<YearFrequency> = counts
        .into_iter()
        .map(|(year, count)| YearFrequency { year, count })
        .collect();

    histogram.sort_unstable_by_key(|f| f.year);
    histogram
}
