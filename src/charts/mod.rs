//! Chart specifications: what to draw, computed from the aggregated tables.
//!
//! Every renderer here is a pure function of its input rows. Drawing the
//! result with egui happens in [`crate::ui::plot`].

pub mod correlation;
pub mod emissions;
pub mod seasonality;
pub mod trend;

use eframe::egui::Color32;

use crate::data::filter::by_region;
use crate::data::model::PreparedData;

pub use correlation::CorrelationChart;
pub use emissions::EmissionsChart;
pub use seasonality::HeatmapChart;
pub use trend::TrendChart;

/// A named polyline or point set.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub points: Vec<[f64; 2]>,
    pub color: Color32,
}

impl Series {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// The three charts that depend on the selected region.
#[derive(Debug, Clone)]
pub struct RegionCharts {
    pub region: String,
    pub trend: TrendChart,
    pub correlation: CorrelationChart,
    pub seasonality: HeatmapChart,
}

impl RegionCharts {
    /// Filter both tables to `region` and render its charts.
    pub fn build(data: &PreparedData, region: &str) -> Self {
        let annual = by_region(&data.annual, region);
        let monthly = by_region(&data.monthly, region);
        log::debug!(
            "Rendering region {region}: {} annual rows, {} monthly rows",
            annual.len(),
            monthly.len()
        );

        RegionCharts {
            region: region.to_string(),
            trend: trend::render(&annual),
            correlation: correlation::render(region, &annual),
            seasonality: seasonality::render(&monthly),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::lag::tests::record;
    use crate::data::prepare;

    #[test]
    fn unknown_region_renders_empty_charts() {
        let data = prepare(vec![record("R1", 2000, 1, 3.0, Some(1.0))]);
        let charts = RegionCharts::build(&data, "Nowhere");

        assert!(charts.trend.observed.is_empty());
        assert!(charts.trend.trend.is_none());
        assert!(charts.correlation.points.is_empty());
        assert!(charts.seasonality.years.is_empty());
    }

    #[test]
    fn charts_only_see_selected_region() {
        let data = prepare(vec![
            record("R1", 2000, 1, 3.0, Some(1.0)),
            record("R2", 2000, 1, 50.0, Some(1.0)),
            record("R2", 2001, 1, 60.0, Some(2.0)),
        ]);
        let charts = RegionCharts::build(&data, "R1");

        assert_eq!(charts.trend.observed.points, vec![[2000.0, 3.0]]);
        assert_eq!(charts.seasonality.years, vec![2000]);
    }
}
