use eframe::egui::Color32;

use crate::color::ContinuousScale;
use crate::data::columns::label;
use crate::data::filter::collapse_by_year;
use crate::data::model::AnnualRow;

pub const TITLE: &str = "Does higher CO₂ imply more rain?";
pub const X_LABEL: &str = "Chile CO₂ (ppm)";
pub const Y_LABEL: &str = "Avg Precip (mm)";

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub co2: f64,
    pub precipitation_mm: f64,
    pub year: i32,
    pub color: Color32,
}

#[derive(Debug, Clone)]
pub struct CorrelationChart {
    pub title: String,
    pub region: String,
    pub x_label: String,
    pub y_label: String,
    pub color_label: String,
    pub points: Vec<ScatterPoint>,
    /// Domain of the year colour scale; `None` without points.
    pub scale: Option<ContinuousScale>,
}

/// Lagged CO₂ against precipitation for one region, one point per year,
/// coloured by year. Years without a lagged value are left out.
pub fn render(region: &str, region_annual: &[AnnualRow]) -> CorrelationChart {
    let present: Vec<(i32, f64, f64)> = collapse_by_year(region_annual)
        .into_iter()
        .filter_map(|p| p.lagged_co2.map(|co2| (p.year, co2, p.precipitation_mm)))
        .collect();

    // Years come out of `collapse_by_year` ascending.
    let scale = present
        .first()
        .zip(present.last())
        .map(|(first, last)| ContinuousScale::viridis(first.0 as f64, last.0 as f64));

    let points = present
        .into_iter()
        .map(|(year, co2, precipitation_mm)| ScatterPoint {
            co2,
            precipitation_mm,
            year,
            color: scale
                .as_ref()
                .map(|s| s.color_for(year as f64))
                .unwrap_or(Color32::GRAY),
        })
        .collect();

    CorrelationChart {
        title: TITLE.to_string(),
        region: region.to_string(),
        x_label: X_LABEL.to_string(),
        y_label: Y_LABEL.to_string(),
        color_label: label::YEAR.to_string(),
        points,
        scale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(year: i32, precip: f64, co2: Option<f64>) -> AnnualRow {
        AnnualRow {
            region: "R1".to_string(),
            year,
            precipitation_mm: precip,
            geographic_zone: "Sur".to_string(),
            lagged_co2: co2,
            latitude: -45.0,
        }
    }

    #[test]
    fn years_without_lag_are_omitted() {
        let rows = vec![row(2000, 10.0, None), row(2001, 20.0, Some(100.0)), row(2002, 30.0, Some(110.0))];
        let chart = render("R1", &rows);

        let years: Vec<i32> = chart.points.iter().map(|p| p.year).collect();
        assert_eq!(years, vec![2001, 2002]);
        assert_eq!(chart.points[0].co2, 100.0);
        assert_eq!(chart.points[0].precipitation_mm, 20.0);
        assert_eq!(chart.scale.unwrap().domain(), (2001.0, 2002.0));
    }

    #[test]
    fn colors_run_along_the_year_scale() {
        let rows = vec![row(1990, 1.0, Some(1.0)), row(2000, 1.0, Some(2.0)), row(2010, 1.0, Some(3.0))];
        let chart = render("R1", &rows);
        let scale = ContinuousScale::viridis(1990.0, 2010.0);
        assert_eq!(chart.points[0].color, scale.sample(0.0));
        assert_eq!(chart.points[2].color, scale.sample(1.0));
        assert_ne!(chart.points[0].color, chart.points[1].color);
    }

    #[test]
    fn empty_region_has_no_points() {
        let chart = render("R9", &[]);
        assert!(chart.points.is_empty());
        assert!(chart.scale.is_none());
        assert_eq!(chart.region, "R9");
    }
}
