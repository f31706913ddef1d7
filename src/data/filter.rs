use std::collections::{BTreeMap, HashSet};

use super::model::{AnnualRow, RegionRow};

// ---------------------------------------------------------------------------
// Region selection
// ---------------------------------------------------------------------------

/// Rows belonging to `region`. An unknown region yields an empty table.
pub fn by_region<R: RegionRow + Clone>(rows: &[R], region: &str) -> Vec<R> {
    rows.iter().filter(|r| r.region() == region).cloned().collect()
}

/// Distinct regions in order of first appearance.
///
/// The annual table is sorted by region, so this comes out ascending.
pub fn regions<R: RegionRow>(rows: &[R]) -> Vec<String> {
    let mut seen = HashSet::new();
    rows.iter()
        .filter(|r| seen.insert(r.region()))
        .map(|r| r.region().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Per-year means
// ---------------------------------------------------------------------------

/// Annual rows averaged per year.
#[derive(Debug, Clone, PartialEq)]
pub struct YearPoint {
    pub year: i32,
    pub precipitation_mm: f64,
    /// Mean over the rows that carry a value; `None` when none does.
    pub lagged_co2: Option<f64>,
}

#[derive(Default)]
struct MeanAcc {
    precip_sum: f64,
    precip_n: usize,
    co2_sum: f64,
    co2_n: usize,
}

/// Collapse rows to one point per year (ascending), averaging precipitation
/// and lagged CO₂. Missing CO₂ values are skipped rather than counted.
///
/// Applied to one region's rows this is the trend/correlation series; applied
/// to the whole annual table it is the national emissions context.
pub fn collapse_by_year(rows: &[AnnualRow]) -> Vec<YearPoint> {
    let mut by_year: BTreeMap<i32, MeanAcc> = BTreeMap::new();
    for row in rows {
        let acc = by_year.entry(row.year).or_default();
        acc.precip_sum += row.precipitation_mm;
        acc.precip_n += 1;
        if let Some(co2) = row.lagged_co2 {
            acc.co2_sum += co2;
            acc.co2_n += 1;
        }
    }

    by_year
        .into_iter()
        .map(|(year, acc)| YearPoint {
            year,
            precipitation_mm: acc.precip_sum / acc.precip_n as f64,
            lagged_co2: (acc.co2_n > 0).then(|| acc.co2_sum / acc.co2_n as f64),
        })
        .collect()
}
