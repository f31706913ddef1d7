use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;

use crate::color::ContinuousScale;
use crate::data::columns::label;
use crate::data::model::MonthlyRow;

/// Calendar order; index `m - 1` labels month `m`.
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub const COLOR_LABEL: &str = "Rain (mm)";

/// Year × month grid of precipitation.
///
/// Rows are always the twelve calendar months in order, whatever months the
/// data happens to contain, so labels can never drift out of step with values.
#[derive(Debug, Clone)]
pub struct HeatmapChart {
    pub x_label: String,
    pub y_label: String,
    pub color_label: String,
    /// Columns, ascending.
    pub years: Vec<i32>,
    /// `cells[month - 1][year_index]`; `None` is a blank cell.
    pub cells: [Vec<Option<f64>>; 12],
    /// `None` when no cell has a value.
    pub scale: Option<ContinuousScale>,
}

impl HeatmapChart {
    pub fn cell(&self, year: i32, month: u32) -> Option<f64> {
        let col = self.years.binary_search(&year).ok()?;
        let row = self.cells.get(month.checked_sub(1)? as usize)?;
        row[col]
    }

    pub fn color(&self, value: f64) -> Color32 {
        self.scale
            .as_ref()
            .map(|s| s.color_for(value))
            .unwrap_or(Color32::GRAY)
    }
}

/// Pivot one region's monthly rows into the seasonality grid.
pub fn render(region_monthly: &[MonthlyRow]) -> HeatmapChart {
    let years: Vec<i32> = region_monthly
        .iter()
        .map(|r| r.year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let column: BTreeMap<i32, usize> = years.iter().enumerate().map(|(i, &y)| (y, i)).collect();

    let mut cells: [Vec<Option<f64>>; 12] = std::array::from_fn(|_| vec![None; years.len()]);
    for row in region_monthly {
        let (Some(&col), Some(month_row)) = (
            column.get(&row.year),
            cells.get_mut((row.month as usize).wrapping_sub(1)),
        ) else {
            log::warn!("Skipping {} {}: month {} is not a calendar month", row.region, row.year, row.month);
            continue;
        };
        month_row[col] = Some(row.precipitation_mm);
    }

    let present = cells.iter().flatten().flatten().copied();
    let scale = present
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
        .map(|(lo, hi)| ContinuousScale::rd_bu(lo, hi));

    HeatmapChart {
        x_label: label::YEAR.to_string(),
        y_label: label::MONTH.to_string(),
        color_label: COLOR_LABEL.to_string(),
        years,
        cells,
        scale,
    }
}
