use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::columns;
use super::error::DataError;
use super::model::SourceRecord;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the joined precipitation/emissions table from a file. Dispatch by
/// extension.
///
/// Supported formats:
/// * `.csv`     – header row with the columns in [`columns::REQUIRED`]
/// * `.json`    – `[{ "YEAR": 2000, "MONTH": 1, "REGION": "...", ... }, ...]`
/// * `.parquet` – flat columns with the same names
pub fn load_file(path: &Path) -> Result<Vec<SourceRecord>, DataError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(DataError::UnsupportedExtension(other.to_string())),
    };

    validate(&records)?;
    log::info!("Loaded {} rows from {}", records.len(), path.display());
    Ok(records)
}

/// Row-level checks shared by every format.
fn validate(records: &[SourceRecord]) -> Result<(), DataError> {
    for (row, rec) in records.iter().enumerate() {
        if !(1..=12).contains(&rec.month) {
            return Err(DataError::InvalidValue {
                row,
                column: columns::MONTH.to_string(),
                message: format!("month {} is outside 1..=12", rec.month),
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with the required column names (case-sensitive).
/// Extra columns are ignored; an empty emissions cell is a missing value.
fn load_csv(path: &Path) -> Result<Vec<SourceRecord>, DataError> {
    let file = std::fs::File::open(path).map_err(|e| DataError::Io(path.to_path_buf(), e))?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader.headers()?.clone();
    let names: Vec<&str> = headers.iter().collect();
    if let Some(missing) = columns::first_missing(&names) {
        return Err(DataError::MissingColumn(missing.to_string()));
    }

    reader
        .deserialize::<SourceRecord>()
        .map(|row| row.map_err(DataError::from))
        .collect()
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "YEAR": 2000, "MONTH": 1, "REGION": "Metropolitana",
///     "MM_TOTAL_PRECIP": 3.2, "GEOGRAPHIC_ZONE": "Centro",
///     "ANNUAL_EMISSIONS_CHILE": 52.1, "LATITUDE": -33.45
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<SourceRecord>, DataError> {
    let text = std::fs::read_to_string(path).map_err(|e| DataError::Io(path.to_path_buf(), e))?;
    let root: Vec<JsonValue> = serde_json::from_str(&text)?;

    let mut records = Vec::with_capacity(root.len());
    for (row, value) in root.into_iter().enumerate() {
        let JsonValue::Object(obj) = value else {
            return Err(DataError::InvalidValue {
                row,
                column: String::new(),
                message: "row is not a JSON object".to_string(),
            });
        };
        let keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        if let Some(missing) = columns::first_missing(&keys) {
            return Err(DataError::MissingColumn(missing.to_string()));
        }
        records.push(serde_json::from_value(JsonValue::Object(obj))?);
    }

    Ok(records)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file holding the joined table.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`): integer columns may be Int32 or Int64,
/// numeric ones any of Float32/Float64/Int32/Int64, strings Utf8 or LargeUtf8.
fn load_parquet(path: &Path) -> Result<Vec<SourceRecord>, DataError> {
    let file = std::fs::File::open(path).map_err(|e| DataError::Io(path.to_path_buf(), e))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;

    let schema = builder.schema().clone();
    let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
    if let Some(missing) = columns::first_missing(&names) {
        return Err(DataError::MissingColumn(missing.to_string()));
    }

    let reader = builder.build()?;
    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        let offset = records.len();

        let year = BatchColumn::new(&batch, columns::YEAR, offset)?;
        let month = BatchColumn::new(&batch, columns::MONTH, offset)?;
        let region = BatchColumn::new(&batch, columns::REGION, offset)?;
        let precip = BatchColumn::new(&batch, columns::PRECIPITATION, offset)?;
        let zone = BatchColumn::new(&batch, columns::GEOGRAPHIC_ZONE, offset)?;
        let co2 = BatchColumn::new(&batch, columns::EMISSIONS, offset)?;
        let latitude = BatchColumn::new(&batch, columns::LATITUDE, offset)?;

        for row in 0..batch.num_rows() {
            let month_value = month.required_int(row)?;
            records.push(SourceRecord {
                region: region.required_str(row)?,
                year: i32::try_from(year.required_int(row)?)
                    .map_err(|_| year.invalid(row, "year out of range"))?,
                month: u32::try_from(month_value).map_err(|_| month.invalid(row, "negative month"))?,
                precipitation_mm: precip.f64_at(row)?,
                geographic_zone: zone.required_str(row)?,
                national_co2: co2.f64_at(row)?,
                latitude: latitude.required_f64(row)?,
            });
        }
    }

    Ok(records)
}

// -- Parquet / Arrow helpers --

/// One named column of a record batch; `offset` turns batch-local rows into
/// file rows for error messages.
struct BatchColumn<'a> {
    name: &'static str,
    array: &'a ArrayRef,
    offset: usize,
}

impl<'a> BatchColumn<'a> {
    fn new(batch: &'a RecordBatch, name: &'static str, offset: usize) -> Result<Self, DataError> {
        let array = batch
            .column_by_name(name)
            .ok_or_else(|| DataError::MissingColumn(name.to_string()))?;
        Ok(BatchColumn { name, array, offset })
    }

    fn invalid(&self, row: usize, message: &str) -> DataError {
        DataError::InvalidValue {
            row: self.offset + row,
            column: self.name.to_string(),
            message: message.to_string(),
        }
    }

    fn null(&self, row: usize) -> DataError {
        DataError::NullValue {
            row: self.offset + row,
            column: self.name.to_string(),
        }
    }

    fn int_at(&self, row: usize) -> Result<Option<i64>, DataError> {
        if self.array.is_null(row) {
            return Ok(None);
        }
        let value = match self.array.data_type() {
            DataType::Int32 => self.array.as_primitive::<Int32Type>().value(row) as i64,
            DataType::Int64 => self.array.as_primitive::<Int64Type>().value(row),
            other => return Err(self.invalid(row, &format!("expected an integer column, got {other:?}"))),
        };
        Ok(Some(value))
    }

    fn f64_at(&self, row: usize) -> Result<Option<f64>, DataError> {
        if self.array.is_null(row) {
            return Ok(None);
        }
        let value = match self.array.data_type() {
            DataType::Float64 => self.array.as_primitive::<Float64Type>().value(row),
            DataType::Float32 => self.array.as_primitive::<Float32Type>().value(row) as f64,
            DataType::Int32 => self.array.as_primitive::<Int32Type>().value(row) as f64,
            DataType::Int64 => self.array.as_primitive::<Int64Type>().value(row) as f64,
            other => return Err(self.invalid(row, &format!("expected a numeric column, got {other:?}"))),
        };
        Ok(Some(value))
    }

    fn str_at(&self, row: usize) -> Result<Option<String>, DataError> {
        if self.array.is_null(row) {
            return Ok(None);
        }
        let value = match self.array.data_type() {
            DataType::Utf8 => self.array.as_string::<i32>().value(row).to_string(),
            DataType::LargeUtf8 => self.array.as_string::<i64>().value(row).to_string(),
            other => return Err(self.invalid(row, &format!("expected a string column, got {other:?}"))),
        };
        Ok(Some(value))
    }

    fn required_int(&self, row: usize) -> Result<i64, DataError> {
        self.int_at(row)?.ok_or_else(|| self.null(row))
    }

    fn required_f64(&self, row: usize) -> Result<f64, DataError> {
        self.f64_at(row)?.ok_or_else(|| self.null(row))
    }

    fn required_str(&self, row: usize) -> Result<String, DataError> {
        self.str_at(row)?.ok_or_else(|| self.null(row))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{Float64Array, Int32Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;

    use super::*;

    const HEADER: &str =
        "YEAR,MONTH,REGION,MM_TOTAL_PRECIP,GEOGRAPHIC_ZONE,ANNUAL_EMISSIONS_CHILE,LATITUDE";

    fn write_file(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_csv_rows() {
        let file = write_file(
            ".csv",
            &format!(
                "{HEADER}\n2000,1,Maule,12.5,Centro,100.0,-35.4\n2000,2,Maule,3.0,Centro,,-35.4\n"
            ),
        );
        let records = load_file(file.path()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].region, "Maule");
        assert_eq!(records[0].precipitation_mm, Some(12.5));
        assert_eq!(records[0].national_co2, Some(100.0));
        assert_eq!(records[1].national_co2, None);
        assert_eq!(records[1].month, 2);
    }

    #[test]
    fn csv_ignores_extra_columns_in_any_order() {
        let file = write_file(
            ".csv",
            "LATITUDE,EXTRA,REGION,YEAR,MONTH,MM_TOTAL_PRECIP,GEOGRAPHIC_ZONE,ANNUAL_EMISSIONS_CHILE\n\
             -20.2,x,Tarapaca,1999,12,0.4,Norte,80\n",
        );
        let records = load_file(file.path()).unwrap();
        assert_eq!(records[0].year, 1999);
        assert_eq!(records[0].latitude, -20.2);
    }

    #[test]
    fn header_only_csv_is_an_empty_table() {
        let file = write_file(".csv", &format!("{HEADER}\n"));
        assert!(load_file(file.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let file = write_file(
            ".csv",
            "YEAR,MONTH,REGION,MM_TOTAL_PRECIP,GEOGRAPHIC_ZONE,LATITUDE\n2000,1,A,1,Z,-1\n",
        );
        match load_file(file.path()) {
            Err(DataError::MissingColumn(col)) => assert_eq!(col, "ANNUAL_EMISSIONS_CHILE"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn malformed_number_fails() {
        let file = write_file(".csv", &format!("{HEADER}\n2000,1,A,lots,Z,1,-1\n"));
        assert!(matches!(load_file(file.path()), Err(DataError::Csv(_))));
    }

    #[test]
    fn month_out_of_range_fails() {
        let file = write_file(".csv", &format!("{HEADER}\n2000,13,A,1,Z,1,-1\n"));
        assert!(matches!(
            load_file(file.path()),
            Err(DataError::InvalidValue { row: 0, .. })
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_file(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, DataError::Io(..)));
    }

    #[test]
    fn unsupported_extension_fails() {
        let file = write_file(".xlsx", "");
        assert!(matches!(
            load_file(file.path()),
            Err(DataError::UnsupportedExtension(ext)) if ext == "xlsx"
        ));
    }

    #[test]
    fn loads_json_records_with_null_emissions() {
        let file = write_file(
            ".json",
            r#"[
                {"YEAR": 2001, "MONTH": 3, "REGION": "Biobio", "MM_TOTAL_PRECIP": 80.0,
                 "GEOGRAPHIC_ZONE": "Sur", "ANNUAL_EMISSIONS_CHILE": null, "LATITUDE": -37.0}
            ]"#,
        );
        let records = load_file(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].region, "Biobio");
        assert_eq!(records[0].national_co2, None);
    }

    #[test]
    fn json_row_without_column_fails() {
        let file = write_file(".json", r#"[{"YEAR": 2001, "MONTH": 3}]"#);
        assert!(matches!(load_file(file.path()), Err(DataError::MissingColumn(_))));
    }

    /// Parquet file with Int64 years, Int32 months and nullable numbers.
    fn parquet_file(
        years: Vec<i64>,
        precip: Vec<Option<f64>>,
        co2: Vec<Option<f64>>,
    ) -> tempfile::NamedTempFile {
        let n = years.len();
        let schema = Arc::new(Schema::new(vec![
            Field::new("YEAR", DataType::Int64, false),
            Field::new("MONTH", DataType::Int32, false),
            Field::new("REGION", DataType::Utf8, false),
            Field::new("MM_TOTAL_PRECIP", DataType::Float64, true),
            Field::new("GEOGRAPHIC_ZONE", DataType::Utf8, false),
            Field::new("ANNUAL_EMISSIONS_CHILE", DataType::Float64, true),
            Field::new("LATITUDE", DataType::Float64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Int64Array::from(years)),
                Arc::new(Int32Array::from_iter_values((0..n as i32).map(|i| 6 + i))),
                Arc::new(StringArray::from(vec!["Los Lagos"; n])),
                Arc::new(Float64Array::from(precip)),
                Arc::new(StringArray::from(vec!["Sur"; n])),
                Arc::new(Float64Array::from(co2)),
                Arc::new(Float64Array::from(vec![-41.5; n])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();
        file
    }

    #[test]
    fn loads_parquet_with_mixed_integer_widths() {
        let file = parquet_file(
            vec![2010, 2011],
            vec![Some(210.0), Some(180.5)],
            vec![Some(70.0), None],
        );

        let records = load_file(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].year, 2010);
        assert_eq!(records[1].month, 7);
        assert_eq!(records[0].precipitation_mm, Some(210.0));
        assert_eq!(records[0].national_co2, Some(70.0));
        assert_eq!(records[1].national_co2, None);
    }

    #[test]
    fn parquet_null_precipitation_is_missing() {
        let file = parquet_file(vec![2010, 2010], vec![None, Some(3.0)], vec![None, None]);
        let records = load_file(file.path()).unwrap();
        assert_eq!(records[0].precipitation_mm, None);
        assert_eq!(records[1].precipitation_mm, Some(3.0));
    }

    #[test]
    fn parquet_year_outside_i32_fails() {
        let too_big = i64::from(i32::MAX) + 1;
        let file = parquet_file(vec![2010, too_big], vec![Some(1.0); 2], vec![None; 2]);
        match load_file(file.path()) {
            Err(DataError::InvalidValue { row, column, .. }) => {
                assert_eq!(row, 1);
                assert_eq!(column, "YEAR");
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn empty_precipitation_cell_is_missing_not_an_error() {
        let file = write_file(
            ".csv",
            &format!("{HEADER}\n2000,1,A,,Z,1,-1\n2000,2,A,4.0,Z,1,-1\n2001,1,A,,Z,2,-1\n"),
        );
        let records = load_file(file.path()).unwrap();
        assert_eq!(records[0].precipitation_mm, None);
        assert_eq!(records[1].precipitation_mm, Some(4.0));

        let prepared = crate::data::prepare(records);
        let sums: Vec<(i32, f64)> = prepared
            .annual
            .iter()
            .map(|r| (r.year, r.precipitation_mm))
            .collect();
        assert_eq!(sums, vec![(2000, 4.0), (2001, 0.0)]);
        assert_eq!(prepared.monthly.len(), 3);
    }
}
