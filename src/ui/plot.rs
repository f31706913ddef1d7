use std::ops::RangeInclusive;

use eframe::egui::{self, Color32, RichText, Stroke, Ui};
use egui_plot::{
    uniform_grid_spacer, GridMark, Legend, Line, Plot, PlotPoint, PlotPoints, Points, Polygon,
};

use crate::charts::seasonality::MONTH_LABELS;
use crate::charts::{CorrelationChart, EmissionsChart, HeatmapChart, TrendChart};
use crate::color::ContinuousScale;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Panel frames
// ---------------------------------------------------------------------------

fn panel_heading(ui: &mut Ui, heading: &str, title: &str) {
    ui.strong(heading);
    ui.label(RichText::new(title).small().weak());
}

fn empty_note(ui: &mut Ui) {
    ui.label(RichText::new("No data for this selection").italics().weak());
}

/// Show whole years only; fractional grid marks stay unlabeled.
fn year_formatter(mark: GridMark, _range: &RangeInclusive<f64>) -> String {
    if mark.value.fract() == 0.0 {
        format!("{:.0}", mark.value)
    } else {
        String::new()
    }
}

// ---------------------------------------------------------------------------
// Top left: precipitation trend
// ---------------------------------------------------------------------------

pub fn trend_panel(ui: &mut Ui, state: &AppState, heading: &str) {
    ui.vertical(|ui: &mut Ui| {
        let Some(charts) = &state.region_charts else {
            panel_heading(ui, heading, "");
            empty_note(ui);
            return;
        };
        let chart = &charts.trend;
        panel_heading(ui, heading, &chart.title);
        match &chart.trend {
            Some(trend) => {
                ui.label(RichText::new(format!("{:+.2} mm per year", trend.fit.slope)).small());
            }
            None if chart.observed.is_empty() => empty_note(ui),
            None => {
                ui.label(RichText::new("Not enough years for a trend line").small().weak());
            }
        }
        draw_trend(ui, chart);
    });
}

fn draw_trend(ui: &mut Ui, chart: &TrendChart) {
    Plot::new("trend_plot")
        .legend(Legend::default())
        .x_axis_label(chart.x_label.as_str())
        .y_axis_label(chart.y_label.as_str())
        .x_axis_formatter(year_formatter)
        .show(ui, |plot_ui| {
            let observed = &chart.observed;
            plot_ui.line(
                Line::new(PlotPoints::from(observed.points.clone()))
                    .name(&observed.name)
                    .color(observed.color)
                    .width(2.0),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(observed.points.clone()))
                    .name(&observed.name)
                    .color(observed.color)
                    .radius(3.0),
            );

            if let Some(trend) = &chart.trend {
                plot_ui.line(
                    Line::new(PlotPoints::from(trend.series.points.clone()))
                        .name(&trend.series.name)
                        .color(trend.series.color)
                        .width(2.0),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Top right: national emissions context
// ---------------------------------------------------------------------------

pub fn emissions_panel(ui: &mut Ui, state: &AppState, heading: &str) {
    let chart = &state.emissions;
    ui.vertical(|ui: &mut Ui| {
        panel_heading(ui, heading, &chart.title);
        if chart.is_empty() {
            empty_note(ui);
        }
        draw_emissions(ui, chart);
    });
}

fn draw_emissions(ui: &mut Ui, chart: &EmissionsChart) {
    Plot::new("emissions_plot")
        .legend(Legend::default())
        .x_axis_label(chart.x_label.as_str())
        .y_axis_label(chart.y_label.as_str())
        .x_axis_formatter(year_formatter)
        .show(ui, |plot_ui| {
            // One filled line per contiguous run; all share a legend entry.
            for segment in &chart.segments {
                plot_ui.line(
                    Line::new(PlotPoints::from(segment.clone()))
                        .name(&chart.name)
                        .color(chart.color)
                        .fill(0.0_f32)
                        .width(1.5),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Bottom left: CO₂ vs rainfall
// ---------------------------------------------------------------------------

pub fn correlation_panel(ui: &mut Ui, state: &AppState, heading: &str) {
    ui.vertical(|ui: &mut Ui| {
        let Some(charts) = &state.region_charts else {
            panel_heading(ui, heading, "");
            empty_note(ui);
            return;
        };
        let chart = &charts.correlation;
        panel_heading(
            ui,
            &format!("{heading} in {}", chart.region),
            &chart.title,
        );
        if chart.points.is_empty() {
            empty_note(ui);
        }
        if let Some(scale) = &chart.scale {
            color_bar(ui, &chart.color_label, scale, |v| format!("{v:.0}"));
        }
        draw_correlation(ui, chart);
    });
}

fn draw_correlation(ui: &mut Ui, chart: &CorrelationChart) {
    Plot::new("correlation_plot")
        .x_axis_label(chart.x_label.as_str())
        .y_axis_label(chart.y_label.as_str())
        .show(ui, |plot_ui| {
            for point in &chart.points {
                plot_ui.points(
                    Points::new(PlotPoints::from(vec![[point.co2, point.precipitation_mm]]))
                        .name(format!("{}", point.year))
                        .color(point.color)
                        .filled(true)
                        .radius(5.0),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Bottom right: seasonality heatmap
// ---------------------------------------------------------------------------

pub fn seasonality_panel(ui: &mut Ui, state: &AppState, heading: &str) {
    ui.vertical(|ui: &mut Ui| {
        panel_heading(ui, heading, "");
        let Some(charts) = &state.region_charts else {
            empty_note(ui);
            return;
        };
        let chart = &charts.seasonality;
        match &chart.scale {
            Some(scale) => color_bar(ui, &chart.color_label, scale, |v| format!("{v:.1}")),
            None => empty_note(ui),
        }
        draw_heatmap(ui, chart);
    });
}

/// Plot row of calendar month `m`; January sits at the top.
fn month_row(month: usize) -> f64 {
    (12 - month) as f64
}

fn draw_heatmap(ui: &mut Ui, chart: &HeatmapChart) {
    let hover = chart.clone();
    Plot::new("seasonality_plot")
        .x_axis_label(chart.x_label.as_str())
        .y_axis_label(chart.y_label.as_str())
        .x_axis_formatter(year_formatter)
        .y_axis_formatter(|mark: GridMark, _range: &RangeInclusive<f64>| {
            let v = mark.value;
            if v.fract() != 0.0 || !(0.0..=11.0).contains(&v) {
                return String::new();
            }
            MONTH_LABELS[11 - v as usize].to_string()
        })
        .y_grid_spacer(uniform_grid_spacer(|_| [1.0, 3.0, 12.0]))
        .include_y(-0.5)
        .include_y(11.5)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_grid([false, true])
        .label_formatter(move |_name: &str, value: &PlotPoint| {
            let year = value.x.round() as i32;
            let row = value.y.round();
            if !(0.0..=11.0).contains(&row) {
                return String::new();
            }
            let month = 12 - row as u32;
            let label = MONTH_LABELS[month as usize - 1];
            match hover.cell(year, month) {
                Some(v) => format!("{label} {year}\n{v:.1} mm"),
                None => format!("{label} {year}\nno data"),
            }
        })
        .show(ui, |plot_ui| {
            for (m, row) in chart.cells.iter().enumerate() {
                let y = month_row(m + 1);
                for (col, cell) in row.iter().enumerate() {
                    let Some(value) = cell else {
                        continue;
                    };
                    let x = chart.years[col] as f64;
                    let rect = vec![
                        [x - 0.5, y - 0.5],
                        [x + 0.5, y - 0.5],
                        [x + 0.5, y + 0.5],
                        [x - 0.5, y + 0.5],
                    ];
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(rect))
                            .fill_color(chart.color(*value))
                            .stroke(Stroke::NONE),
                    );
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Colour bar legend
// ---------------------------------------------------------------------------

fn color_bar(ui: &mut Ui, label: &str, scale: &ContinuousScale, fmt: impl Fn(f64) -> String) {
    const STEPS: usize = 48;
    let (min, max) = scale.domain();

    ui.horizontal(|ui: &mut Ui| {
        ui.label(RichText::new(label).small());
        ui.label(RichText::new(fmt(min)).small());

        let width = (ui.available_width() - 60.0).clamp(40.0, 240.0);
        let (rect, _) = ui.allocate_exact_size(egui::vec2(width, 10.0), egui::Sense::hover());
        let painter = ui.painter();
        let step = rect.width() / STEPS as f32;
        for i in 0..STEPS {
            let t = (i as f32 + 0.5) / STEPS as f32;
            let slice = egui::Rect::from_min_size(
                egui::pos2(rect.left() + i as f32 * step, rect.top()),
                egui::vec2(step + 0.5, rect.height()),
            );
            painter.rect_filled(slice, 0.0, scale.sample(t));
        }
        painter.rect_stroke(rect, 0.0, Stroke::new(1.0, Color32::DARK_GRAY), egui::StrokeKind::Inside);

        ui.label(RichText::new(fmt(max)).small());
    });
}
