use std::collections::BTreeMap;

use super::model::{LaggedRecord, SourceRecord};

// ---------------------------------------------------------------------------
// EmissionsByYear – year → national emissions lookup
// ---------------------------------------------------------------------------

/// National emissions per year, deduplicated from the source rows.
///
/// Exactly one value per year. When the source disagrees with itself the
/// first value in input order is kept and the conflict is logged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmissionsByYear {
    by_year: BTreeMap<i32, f64>,
}

impl EmissionsByYear {
    /// Build the lookup from source rows. Rows with an empty emissions cell
    /// are skipped.
    pub fn from_records(records: &[SourceRecord]) -> Self {
        let mut by_year = BTreeMap::new();
        for rec in records {
            let Some(value) = rec.national_co2 else {
                continue;
            };
            match by_year.get(&rec.year) {
                None => {
                    by_year.insert(rec.year, value);
                }
                Some(kept) if *kept != value => {
                    log::warn!(
                        "Year {} has more than one emissions value (kept {kept}, also saw {value})",
                        rec.year
                    );
                }
                Some(_) => {}
            }
        }
        EmissionsByYear { by_year }
    }

    pub fn get(&self, year: i32) -> Option<f64> {
        self.by_year.get(&year).copied()
    }

    pub fn len(&self) -> usize {
        self.by_year.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_year.is_empty()
    }
}

impl FromIterator<(i32, f64)> for EmissionsByYear {
    /// Collect (year, emissions) pairs; the first pair for a year wins.
    fn from_iter<T: IntoIterator<Item = (i32, f64)>>(iter: T) -> Self {
        let mut by_year = BTreeMap::new();
        for (year, value) in iter {
            by_year.entry(year).or_insert(value);
        }
        EmissionsByYear { by_year }
    }
}

// ---------------------------------------------------------------------------
// Lag transform
// ---------------------------------------------------------------------------

/// Attach the previous year's emissions to every record.
///
/// Years without a predecessor in `emissions` get `None`, which flows through
/// aggregation and shows up as a gap in the charts.
pub fn apply_lag(records: Vec<SourceRecord>, emissions: &EmissionsByYear) -> Vec<LaggedRecord> {
    records
        .into_iter()
        .map(|record| {
            let lagged_co2 = emissions.get(record.year - 1);
            LaggedRecord { record, lagged_co2 }
        })
        .collect()
}
