use std::collections::BTreeMap;

use super::columns;
use super::model::{AnnualRow, ConsistencyWarning, LaggedRecord, MonthlyRow};

// ---------------------------------------------------------------------------
// Grouped reduction
// ---------------------------------------------------------------------------

/// Output of [`aggregate`]: both tables plus any data-quality findings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregates {
    pub annual: Vec<AnnualRow>,
    pub monthly: Vec<MonthlyRow>,
    pub warnings: Vec<ConsistencyWarning>,
}

/// `month` is `None` for annual groups, so the derived `Ord` sorts by
/// (region, year, month) exactly like the output tables.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct GroupKey {
    region: String,
    year: i32,
    month: Option<u32>,
}

/// Running reduction of one group.
///
/// Policy for the columns that are assumed constant within a group:
/// * zone and latitude: first record in input order
/// * lagged CO₂: first non-missing value in input order
///
/// Missing precipitation is skipped, so an all-missing group sums to 0.
#[derive(Debug)]
struct GroupAcc {
    precipitation_mm: f64,
    geographic_zone: String,
    lagged_co2: Option<f64>,
    latitude: f64,
    /// Columns already reported for this group; each is reported once.
    warned: Vec<&'static str>,
}

impl GroupAcc {
    fn start(rec: &LaggedRecord) -> Self {
        GroupAcc {
            precipitation_mm: rec.record.precipitation_mm.unwrap_or(0.0),
            geographic_zone: rec.record.geographic_zone.clone(),
            lagged_co2: rec.lagged_co2,
            latitude: rec.record.latitude,
            warned: Vec::new(),
        }
    }

    fn absorb(&mut self, rec: &LaggedRecord, key: &GroupKey, warnings: &mut Vec<ConsistencyWarning>) {
        if let Some(mm) = rec.record.precipitation_mm {
            self.precipitation_mm += mm;
        }

        let warned = &mut self.warned;
        let mut warn = |column: &'static str, kept: String, divergent: String| {
            if warned.contains(&column) {
                return;
            }
            warned.push(column);
            warnings.push(ConsistencyWarning {
                region: key.region.clone(),
                year: key.year,
                month: key.month,
                column,
                kept,
                divergent,
            });
        };

        if rec.record.geographic_zone != self.geographic_zone {
            warn(
                columns::label::GEOGRAPHIC_ZONE,
                self.geographic_zone.clone(),
                rec.record.geographic_zone.clone(),
            );
        }
        if rec.record.latitude != self.latitude {
            warn(
                columns::label::LATITUDE,
                self.latitude.to_string(),
                rec.record.latitude.to_string(),
            );
        }
        match (self.lagged_co2, rec.lagged_co2) {
            (None, Some(v)) => self.lagged_co2 = Some(v),
            (Some(kept), Some(v)) if kept != v => {
                warn(columns::label::LAGGED_CO2, kept.to_string(), v.to_string());
            }
            _ => {}
        }
    }
}

fn reduce(
    lagged: &[LaggedRecord],
    by_month: bool,
    warnings: &mut Vec<ConsistencyWarning>,
) -> BTreeMap<GroupKey, GroupAcc> {
    let mut groups: BTreeMap<GroupKey, GroupAcc> = BTreeMap::new();
    for rec in lagged {
        let key = GroupKey {
            region: rec.record.region.clone(),
            year: rec.record.year,
            month: by_month.then_some(rec.record.month),
        };
        match groups.get_mut(&key) {
            Some(acc) => acc.absorb(rec, &key, warnings),
            None => {
                groups.insert(key, GroupAcc::start(rec));
            }
        }
    }
    groups
}

/// Reduce the lagged table to one row per (region, year) and one row per
/// (region, year, month). Both outputs are sorted ascending by their keys.
pub fn aggregate(lagged: &[LaggedRecord]) -> Aggregates {
    let mut warnings = Vec::new();

    let annual: Vec<AnnualRow> = reduce(lagged, false, &mut warnings)
        .into_iter()
        .map(|(key, acc)| AnnualRow {
            region: key.region,
            year: key.year,
            precipitation_mm: acc.precipitation_mm,
            geographic_zone: acc.geographic_zone,
            lagged_co2: acc.lagged_co2,
            latitude: acc.latitude,
        })
        .collect();

    // Monthly groups are finer, so any divergence they see was already
    // reported at the annual level.
    let monthly: Vec<MonthlyRow> = reduce(lagged, true, &mut Vec::new())
        .into_iter()
        .map(|(key, acc)| MonthlyRow {
            region: key.region,
            year: key.year,
            month: key.month.unwrap_or_default(),
            precipitation_mm: acc.precipitation_mm,
            geographic_zone: acc.geographic_zone,
            lagged_co2: acc.lagged_co2,
            latitude: acc.latitude,
        })
        .collect();

    for w in &warnings {
        log::warn!("{w}");
    }

    Aggregates {
        annual,
        monthly,
        warnings,
    }
}
