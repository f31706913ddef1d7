use std::sync::Arc;

use crate::charts::{emissions, EmissionsChart, RegionCharts};
use crate::data::filter::regions;
use crate::data::model::PreparedData;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Prepared tables, shared with the process-wide cache.
    pub data: Arc<PreparedData>,

    /// Every region of the annual table, in table order.
    pub regions: Vec<String>,

    /// Charts of the selected region; `None` only when there are no regions.
    pub region_charts: Option<RegionCharts>,

    /// National emissions context; independent of the selection.
    pub emissions: EmissionsChart,
}

impl AppState {
    /// Derive the initial state, selecting the first region.
    pub fn new(data: Arc<PreparedData>) -> Self {
        let regions = regions(&data.annual);
        let emissions = emissions::render(&data.annual);
        let region_charts = regions.first().map(|r| RegionCharts::build(&data, r));

        if data.is_empty() {
            log::warn!("Dataset has no regions; charts will be empty");
        }

        Self {
            data,
            regions,
            region_charts,
            emissions,
        }
    }

    pub fn selected_region(&self) -> Option<&str> {
        self.region_charts.as_ref().map(|c| c.region.as_str())
    }

    /// Selection change handler: re-run filter → render for `region`.
    pub fn select_region(&mut self, region: &str) {
        if self.selected_region() == Some(region) {
            return;
        }
        log::info!("Region selected: {region}");
        self.region_charts = Some(RegionCharts::build(&self.data, region));
    }
}
