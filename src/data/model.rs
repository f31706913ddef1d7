use std::fmt;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// SourceRecord – one row of the joined source file
// ---------------------------------------------------------------------------

/// One (region, year, month) observation as stored in the joined file.
///
/// `(region, year, month)` is expected to be unique but this is not enforced.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SourceRecord {
    #[serde(rename = "REGION")]
    pub region: String,
    #[serde(rename = "YEAR")]
    pub year: i32,
    #[serde(rename = "MONTH")]
    pub month: u32,
    /// Empty cells are missing values and contribute nothing to sums.
    #[serde(rename = "MM_TOTAL_PRECIP", default)]
    pub precipitation_mm: Option<f64>,
    #[serde(rename = "GEOGRAPHIC_ZONE")]
    pub geographic_zone: String,
    /// National emissions for `year`; repeated across months and regions.
    #[serde(rename = "ANNUAL_EMISSIONS_CHILE", default)]
    pub national_co2: Option<f64>,
    #[serde(rename = "LATITUDE")]
    pub latitude: f64,
}

// ---------------------------------------------------------------------------
// LaggedRecord – source row plus the previous year's emissions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct LaggedRecord {
    pub record: SourceRecord,
    /// Emissions recorded for `year - 1`, `None` when that year is unknown.
    pub lagged_co2: Option<f64>,
}

// ---------------------------------------------------------------------------
// Aggregated rows
// ---------------------------------------------------------------------------

/// One row per (region, year).
#[derive(Debug, Clone, PartialEq)]
pub struct AnnualRow {
    pub region: String,
    pub year: i32,
    /// Sum over every month of the group.
    pub precipitation_mm: f64,
    pub geographic_zone: String,
    pub lagged_co2: Option<f64>,
    pub latitude: f64,
}

/// One row per (region, year, month).
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyRow {
    pub region: String,
    pub year: i32,
    pub month: u32,
    pub precipitation_mm: f64,
    pub geographic_zone: String,
    pub lagged_co2: Option<f64>,
    pub latitude: f64,
}

/// Rows that can be narrowed down to a single region.
pub trait RegionRow {
    fn region(&self) -> &str;
}

impl RegionRow for AnnualRow {
    fn region(&self) -> &str {
        &self.region
    }
}

impl RegionRow for MonthlyRow {
    fn region(&self) -> &str {
        &self.region
    }
}

// ---------------------------------------------------------------------------
// Data-quality warnings
// ---------------------------------------------------------------------------

/// A group whose "assumed constant" column was not actually constant.
///
/// The first value (input order) is kept; the divergent one is reported here.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsistencyWarning {
    pub region: String,
    pub year: i32,
    /// `None` for annual groups.
    pub month: Option<u32>,
    pub column: &'static str,
    pub kept: String,
    pub divergent: String,
}

impl fmt::Display for ConsistencyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.region, self.year)?;
        if let Some(month) = self.month {
            write!(f, "-{month:02}")?;
        }
        write!(
            f,
            ": column '{}' is not constant within the group (kept {}, also saw {})",
            self.column, self.kept, self.divergent
        )
    }
}

// ---------------------------------------------------------------------------
// PreparedData – everything the dashboard derives from one file
// ---------------------------------------------------------------------------

/// The aggregated tables derived once from a source file.
#[derive(Debug, Clone, Default)]
pub struct PreparedData {
    /// Sorted by (region, year).
    pub annual: Vec<AnnualRow>,
    /// Sorted by (region, year, month).
    pub monthly: Vec<MonthlyRow>,
    /// Number of rows read from the source file.
    pub source_rows: usize,
    pub warnings: Vec<ConsistencyWarning>,
}

impl PreparedData {
    pub fn is_empty(&self) -> bool {
        self.annual.is_empty()
    }
}
