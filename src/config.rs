use std::path::PathBuf;

/// Root of the data directory, relative to the working directory.
pub const DATA_PATH: &str = "./data";

/// Compile-time settings of the dashboard. There is no runtime configuration
/// surface; `main` builds the default and hands it to the app.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// The joined precipitation/emissions table.
    pub data_file: PathBuf,
    pub window_title: String,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    pub side_panel_width: f32,
    pub headings: PanelHeadings,
}

/// Heading shown above each of the four chart panels.
#[derive(Debug, Clone)]
pub struct PanelHeadings {
    pub trend: String,
    pub emissions: String,
    /// Suffixed with " in <region>" once a region is selected.
    pub correlation: String,
    pub seasonality: String,
}

impl Default for PanelHeadings {
    fn default() -> Self {
        Self {
            trend: "Annual Precipitation Trend (with Trendline)".to_string(),
            emissions: "Chile CO₂ Emissions Context".to_string(),
            correlation: "Correlation: CO₂ vs. Rainfall".to_string(),
            seasonality: "Precipitation Heatmap (Seasonality)".to_string(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DATA_PATH).join("processed/joined/joined_dataset.csv"),
            window_title: "Climate & Precip Dashboard".to_string(),
            window_size: [1400.0, 900.0],
            min_window_size: [800.0, 600.0],
            side_panel_width: 240.0,
            headings: PanelHeadings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_joined_dataset() {
        let config = DashboardConfig::default();
        assert!(config.data_file.starts_with(DATA_PATH));
        assert!(config.data_file.ends_with("joined_dataset.csv"));
    }

    #[test]
    fn every_panel_has_a_heading() {
        let h = PanelHeadings::default();
        for heading in [&h.trend, &h.emissions, &h.correlation, &h.seasonality] {
            assert!(!heading.is_empty());
        }
    }
}
