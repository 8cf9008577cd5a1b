//! Searchable, filterable, paginated view over the raw records.
//!
//! Plain slicing over the loaded snapshot; no derived state is kept
//! between calls.

use crate::record::VehicleRecord;

pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Cutoff for the year filter dropdown; older years are noise in this
/// dataset.
const MIN_FILTER_YEAR: u16 = 2000;

/// Filter and pagination parameters for the table view.
#[derive(Debug, Clone)]
pub struct TableQuery {
    /// Case-insensitive substring match against make, model, city, county.
    pub search: Option<String>,
    /// Exact model-year filter.
    pub year: Option<u16>,
    /// 1-based page index.
    pub page: usize,
    pub page_size: usize,
}

impl Default for TableQuery {
    fn default() -> Self {
        TableQuery {
            search: None,
            year: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl TableQuery {
    fn matches(&self, record: &VehicleRecord) -> bool {
        let matches_search = match &self.search {
            Some(term) => {
                let term = term.to_lowercase();
                record.make.to_lowercase().contains(&term)
                    || record.model.to_lowercase().contains(&term)
                    || record.city.to_lowercase().contains(&term)
                    || record.county.to_lowercase().contains(&term)
            }
            None => true,
        };

        let matches_year = match self.year {
            Some(year) => record.model_year == Some(year),
            None => true,
        };

        matches_search && matches_year
    }
}

/// One page of filtered records plus the counts the view needs.
#[derive(Debug)]
pub struct TablePage<'a> {
    pub rows: Vec<&'a VehicleRecord>,
    /// Records matching the filters, across all pages.
    pub matched: usize,
    /// Size of the unfiltered snapshot.
    pub total: usize,
    pub total_pages: usize,
    pub page: usize,
}

/// Filters the snapshot and slices out the requested page.
///
/// A page past the end yields an empty row set, never a panic.
pub fn query<'a>(records: &'a [VehicleRecord], q: &TableQuery) -> TablePage<'a> {
    let filtered: Vec<&VehicleRecord> = records.iter().filter(|r| q.matches(r)).collect();
    let matched = filtered.len();

    let page_size = q.page_size.max(1);
    let page = q.page.max(1);
    let start = (page - 1).saturating_mul(page_size);

    let rows = filtered.into_iter().skip(start).take(page_size).collect();

    TablePage {
        rows,
        matched,
        total: records.len(),
        total_pages: matched.div_ceil(page_size),
        page,
    }
}

/// Distinct known model years after 2000, newest first, for the year
/// filter dropdown.
pub fn distinct_years(records: &[VehicleRecord]) -> Vec<u16> {
    let mut years: Vec<u16> = records
        .iter()
        .filter_map(|r| r.model_year)
        .filter(|&y| y > MIN_FILTER_YEAR)
        .collect();

    years.sort_unstable();
    years.dedup();
    years.reverse();
    years
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(make: &str, model: &str, city: &str, year: u16) -> VehicleRecord {
        VehicleRecord {
            make: make.to_string(),
            model: model.to_string(),
            city: city.to_string(),
            county: "King".to_string(),
            model_year: Some(year),
            ..Default::default()
        }
    }

    fn sample() -> Vec<VehicleRecord> {
        vec![
            record("Tesla", "Model 3", "Seattle", 2022),
            record("Tesla", "Model Y", "Bellevue", 2023),
            record("Nissan", "Leaf", "Tacoma", 2019),
            record("Chevrolet", "Bolt", "Seattle", 2022),
        ]
    }

    #[test]
    fn test_no_filters_returns_everything() {
        let records = sample();
        let page = query(&records, &TableQuery::default());

        assert_eq!(page.matched, 4);
        assert_eq!(page.total, 4);
        assert_eq!(page.rows.len(), 4);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let records = sample();

        let by_make = query(
            &records,
            &TableQuery {
                search: Some("tesla".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(by_make.matched, 2);

        let by_city = query(
            &records,
            &TableQuery {
                search: Some("SEATTLE".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(by_city.matched, 2);

        let by_model = query(
            &records,
            &TableQuery {
                search: Some("leaf".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(by_model.matched, 1);
        assert_eq!(by_model.rows[0].make, "Nissan");
    }

    #[test]
    fn test_year_filter_is_exact() {
        let records = sample();
        let page = query(
            &records,
            &TableQuery {
                year: Some(2022),
                ..Default::default()
            },
        );

        assert_eq!(page.matched, 2);
        assert!(page.rows.iter().all(|r| r.model_year == Some(2022)));
    }

    #[test]
    fn test_search_and_year_combine() {
        let records = sample();
        let page = query(
            &records,
            &TableQuery {
                search: Some("seattle".to_string()),
                year: Some(2022),
                ..Default::default()
            },
        );

        assert_eq!(page.matched, 2);
    }

    #[test]
    fn test_pagination_slices_and_counts() {
        let records = sample();
        let q = TableQuery {
            page: 2,
            page_size: 3,
            ..Default::default()
        };
        let page = query(&records, &q);

        assert_eq!(page.rows.len(), 1);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.rows[0].make, "Chevrolet");
    }

    #[test]
    fn test_page_past_the_end_is_empty() {
        let records = sample();
        let q = TableQuery {
            page: 99,
            ..Default::default()
        };
        let page = query(&records, &q);

        assert!(page.rows.is_empty());
        assert_eq!(page.matched, 4);
    }

    #[test]
    fn test_distinct_years_newest_first() {
        let mut records = sample();
        records.push(record("Ford", "Ranger EV", "Spokane", 1999));

        assert_eq!(distinct_years(&records), vec![2023, 2022, 2019]);
    }
}
