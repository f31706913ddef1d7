use eframe::egui::Color32;

use crate::color;
use crate::data::columns::label;
use crate::data::filter::collapse_by_year;
use crate::data::model::AnnualRow;

#[derive(Debug, Clone)]
pub struct EmissionsChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub name: String,
    pub color: Color32,
    /// Contiguous runs of years with a value; a missing year splits the area.
    pub segments: Vec<Vec<[f64; 2]>>,
}

impl EmissionsChart {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// National (region-independent) mean lagged CO₂ per year, drawn as an area.
pub fn render(annual: &[AnnualRow]) -> EmissionsChart {
    let mut segments: Vec<Vec<[f64; 2]>> = Vec::new();
    let mut current: Vec<[f64; 2]> = Vec::new();
    let mut prev_year: Option<i32> = None;

    for point in collapse_by_year(annual) {
        let contiguous = prev_year.is_some_and(|y| y + 1 == point.year);
        match point.lagged_co2 {
            Some(co2) if contiguous || current.is_empty() => {
                current.push([point.year as f64, co2]);
            }
            Some(co2) => {
                segments.push(std::mem::take(&mut current));
                current.push([point.year as f64, co2]);
            }
            None => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
        }
        prev_year = Some(point.year);
    }
    if !current.is_empty() {
        segments.push(current);
    }

    let span = segments
        .first()
        .and_then(|s| s.first())
        .zip(segments.last().and_then(|s| s.last()))
        .map(|(first, last)| format!(" {}-{}", first[0], last[0]))
        .unwrap_or_default();

    EmissionsChart {
        title: format!("Chile CO₂ Concentration (ppm){span}"),
        x_label: label::YEAR.to_string(),
        y_label: label::LAGGED_CO2.to_string(),
        name: "Emissions".to_string(),
        color: color::EMISSIONS,
        segments,
    }
}
