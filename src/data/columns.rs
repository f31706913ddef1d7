//! Column names of the joined source file and the labels shown in charts.

pub const YEAR: &str = "YEAR";
pub const MONTH: &str = "MONTH";
pub const REGION: &str = "REGION";
pub const PRECIPITATION: &str = "MM_TOTAL_PRECIP";
pub const GEOGRAPHIC_ZONE: &str = "GEOGRAPHIC_ZONE";
pub const EMISSIONS: &str = "ANNUAL_EMISSIONS_CHILE";
pub const LATITUDE: &str = "LATITUDE";

/// Columns every source file must carry (case-sensitive).
pub const REQUIRED: [&str; 7] = [
    YEAR,
    MONTH,
    REGION,
    PRECIPITATION,
    GEOGRAPHIC_ZONE,
    EMISSIONS,
    LATITUDE,
];

// ---------------------------------------------------------------------------
// Display labels of the aggregated tables
// ---------------------------------------------------------------------------

pub mod label {
    pub const YEAR: &str = "Year";
    pub const MONTH: &str = "Month";
    pub const REGION: &str = "Region";
    pub const PRECIPITATION: &str = "Precipitation_mm";
    pub const GEOGRAPHIC_ZONE: &str = "Geographic_zone";
    pub const LAGGED_CO2: &str = "Chile_CO2_ppm";
    pub const LATITUDE: &str = "Latitude";
}

/// Return the first required column missing from `headers`.
pub fn first_missing(headers: &[&str]) -> Option<&'static str> {
    REQUIRED
        .iter()
        .copied()
        .find(|required| !headers.contains(required))
}
