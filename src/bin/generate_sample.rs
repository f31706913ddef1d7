use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int32Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

const DEFAULT_OUTPUT: &str = "./data/processed/joined/joined_dataset.csv";
const FIRST_YEAR: i32 = 1980;
const LAST_YEAR: i32 = 2024;

/// Region name, latitude, geographic zone, mean annual precipitation (mm).
const REGIONS: [(&str, f64, &str, f64); 8] = [
    ("Arica y Parinacota", -18.48, "Norte Grande", 4.0),
    ("Antofagasta", -23.65, "Norte Grande", 2.5),
    ("Coquimbo", -29.95, "Norte Chico", 95.0),
    ("Valparaiso", -33.05, "Centro", 360.0),
    ("Metropolitana", -33.45, "Centro", 310.0),
    ("Biobio", -36.83, "Sur", 1100.0),
    ("Los Lagos", -41.47, "Sur", 1750.0),
    ("Magallanes", -53.16, "Austral", 420.0),
];

#[derive(Debug, Serialize)]
struct Row {
    #[serde(rename = "YEAR")]
    year: i32,
    #[serde(rename = "MONTH")]
    month: i32,
    #[serde(rename = "REGION")]
    region: String,
    #[serde(rename = "MM_TOTAL_PRECIP")]
    precipitation_mm: f64,
    #[serde(rename = "GEOGRAPHIC_ZONE")]
    zone: String,
    #[serde(rename = "ANNUAL_EMISSIONS_CHILE")]
    emissions: f64,
    #[serde(rename = "LATITUDE")]
    latitude: f64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Winter-peaked (June/July) share of the annual total for `month`.
fn seasonal_share(month: i32) -> f64 {
    let phase = 2.0 * std::f64::consts::PI * (month as f64 - 6.5) / 12.0;
    (1.0 + 0.8 * phase.cos()) / 12.0
}

fn generate(rng: &mut SimpleRng) -> Vec<Row> {
    let mut rows = Vec::new();
    for year in FIRST_YEAR..=LAST_YEAR {
        let elapsed = (year - FIRST_YEAR) as f64;
        let emissions = (25.0 + 1.4 * elapsed + rng.gauss(0.0, 0.8)).max(0.0);
        // Slow drying plus a year-wide wet/dry anomaly shared by all regions.
        let anomaly = (1.0 - 0.004 * elapsed) * rng.gauss(1.0, 0.2).max(0.2);

        for &(region, latitude, zone, annual_mm) in &REGIONS {
            for month in 1..=12 {
                let expected = annual_mm * seasonal_share(month) * anomaly;
                let precipitation_mm = (expected * rng.gauss(1.0, 0.35)).max(0.0);
                rows.push(Row {
                    year,
                    month,
                    region: region.to_string(),
                    precipitation_mm: (precipitation_mm * 10.0).round() / 10.0,
                    zone: zone.to_string(),
                    emissions: (emissions * 100.0).round() / 100.0,
                    latitude,
                });
            }
        }
    }
    rows
}

fn write_csv(rows: &[Row], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(rows: &[Row], path: &Path) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("YEAR", DataType::Int32, false),
        Field::new("MONTH", DataType::Int32, false),
        Field::new("REGION", DataType::Utf8, false),
        Field::new("MM_TOTAL_PRECIP", DataType::Float64, false),
        Field::new("GEOGRAPHIC_ZONE", DataType::Utf8, false),
        Field::new("ANNUAL_EMISSIONS_CHILE", DataType::Float64, true),
        Field::new("LATITUDE", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int32Array::from_iter_values(rows.iter().map(|r| r.year))),
            Arc::new(Int32Array::from_iter_values(rows.iter().map(|r| r.month))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.region.as_str()))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.precipitation_mm))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.zone.as_str()))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.emissions))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.latitude))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let output = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    let rows = generate(&mut SimpleRng::new(42));

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }

    let is_parquet = output
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| matches!(e.to_ascii_lowercase().as_str(), "parquet" | "pq"));
    if is_parquet {
        write_parquet(&rows, &output)?;
    } else {
        write_csv(&rows, &output)?;
    }

    log::info!("Wrote {} rows to {}", rows.len(), output.display());
    println!(
        "Wrote {} rows ({} regions, {FIRST_YEAR}-{LAST_YEAR}) to {}",
        rows.len(),
        REGIONS.len(),
        output.display()
    );
    Ok(())
}
