//! Data layer: core types, loading, lagging, aggregation and filtering.
//!
//! Architecture:
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → Vec<SourceRecord>
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │   lag     │  EmissionsByYear, attach year-1 emissions
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ aggregate  │  annual + monthly tables  ──►  cache (once per path)
//!   └───────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  rows of the selected region → charts
//!   └──────────┘
//! ```

use std::path::Path;

pub mod aggregate;
pub mod cache;
pub mod columns;
pub mod error;
pub mod filter;
pub mod lag;
pub mod loader;
pub mod model;

use aggregate::aggregate;
use error::DataError;
use lag::{apply_lag, EmissionsByYear};
use model::{PreparedData, SourceRecord};

/// Run the lag transform and both aggregations over loaded records.
pub fn prepare(records: Vec<SourceRecord>) -> PreparedData {
    let source_rows = records.len();
    let emissions = EmissionsByYear::from_records(&records);
    if emissions.is_empty() {
        log::warn!("No emissions values found; every lagged CO₂ value will be missing");
    } else {
        log::debug!("Emissions known for {} years", emissions.len());
    }

    let lagged = apply_lag(records, &emissions);
    let aggregates = aggregate(&lagged);
    log::info!(
        "Aggregated {} source rows into {} annual and {} monthly rows ({} data-quality warnings)",
        source_rows,
        aggregates.annual.len(),
        aggregates.monthly.len(),
        aggregates.warnings.len()
    );

    PreparedData {
        annual: aggregates.annual,
        monthly: aggregates.monthly,
        source_rows,
        warnings: aggregates.warnings,
    }
}

/// Load a file and prepare it. Uncached; see [`cache::DatasetCache`].
pub fn load_and_prepare(path: &Path) -> Result<PreparedData, DataError> {
    let records = loader::load_file(path)?;
    Ok(prepare(records))
}
