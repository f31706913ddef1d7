use super::Series;
use crate::color;
use crate::data::columns::label;
use crate::data::filter::collapse_by_year;
use crate::data::model::AnnualRow;
use crate::stats::{fit_ols, LinearFit};

pub const TITLE: &str = "Avg Monthly Rainfall per Year";

#[derive(Debug, Clone)]
pub struct TrendChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Drawn as lines + markers.
    pub observed: Series,
    /// Absent when fewer than two distinct years are available.
    pub trend: Option<TrendLine>,
}

#[derive(Debug, Clone)]
pub struct TrendLine {
    pub series: Series,
    pub fit: LinearFit,
}

/// Precipitation per year for one region with an OLS trend overlaid.
pub fn render(region_annual: &[AnnualRow]) -> TrendChart {
    let points: Vec<[f64; 2]> = collapse_by_year(region_annual)
        .into_iter()
        .map(|p| [p.year as f64, p.precipitation_mm])
        .collect();

    let trend = fit_ols(&points).map(|fit| TrendLine {
        series: Series {
            name: format!("Trend (OLS), R² = {:.2}", fit.r_squared),
            points: points.iter().map(|&[x, _]| [x, fit.predict(x)]).collect(),
            color: color::TREND,
        },
        fit,
    });

    TrendChart {
        title: TITLE.to_string(),
        x_label: label::YEAR.to_string(),
        y_label: label::PRECIPITATION.to_string(),
        observed: Series {
            name: "Observed".to_string(),
            points,
            color: color::OBSERVED,
        },
        trend,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(year: i32, precip: f64) -> AnnualRow {
        AnnualRow {
            region: "R1".to_string(),
            year,
            precipitation_mm: precip,
            geographic_zone: "Centro".to_string(),
            lagged_co2: None,
            latitude: -33.0,
        }
    }

    #[test]
    fn trend_follows_observed_years() {
        let rows = vec![row(2000, 100.0), row(2001, 90.0), row(2002, 80.0)];
        let chart = render(&rows);

        assert_eq!(chart.observed.name, "Observed");
        assert_eq!(chart.observed.points.len(), 3);
        let trend = chart.trend.unwrap();
        assert!((trend.fit.slope + 10.0).abs() < 1e-9);
        assert_eq!(trend.series.points.len(), 3);
        assert!(trend.series.name.starts_with("Trend"));
        assert_eq!(trend.series.color, color::TREND);
    }

    #[test]
    fn duplicate_years_are_averaged() {
        let rows = vec![row(2000, 10.0), row(2000, 30.0), row(2001, 5.0)];
        let chart = render(&rows);
        assert_eq!(chart.observed.points, vec![[2000.0, 20.0], [2001.0, 5.0]]);
    }

    #[test]
    fn single_year_has_no_trend_line() {
        let chart = render(&[row(2000, 10.0)]);
        assert_eq!(chart.observed.points.len(), 1);
        assert!(chart.trend.is_none());
    }

    #[test]
    fn empty_input_is_an_empty_chart() {
        let chart = render(&[]);
        assert!(chart.observed.is_empty());
        assert!(chart.trend.is_none());
        assert_eq!(chart.title, TITLE);
    }
}
