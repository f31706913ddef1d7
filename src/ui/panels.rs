use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::columns::label;
use crate::state::AppState;

const GUIDE: [&str; 4] = [
    "Top Left: Rainfall trends.",
    "Top Right: Chilean CO₂ emissions context.",
    "Bottom Left: Is higher CO₂ correlating with less rain?",
    "Bottom Right: Wet/dry months over time.",
];

// ---------------------------------------------------------------------------
// Left side panel – region selection and guide
// ---------------------------------------------------------------------------

/// Render the left configuration panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Configuration");
    ui.separator();

    ui.strong(format!("Select {}:", label::REGION));
    let current = state.selected_region().unwrap_or_default().to_string();
    let mut picked: Option<String> = None;
    egui::ComboBox::from_id_salt("region_select")
        .selected_text(&current)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for region in &state.regions {
                if ui.selectable_label(current == *region, region).clicked() {
                    picked = Some(region.clone());
                }
            }
        });
    if let Some(region) = picked {
        state.select_region(&region);
    }

    ui.separator();

    ui.strong("Dashboard Guide:");
    for line in GUIDE {
        ui.label(format!("• {line}"));
    }

    ui.separator();
    data_summary(ui, state);
}

/// Row counts plus any data-quality warnings found while aggregating.
fn data_summary(ui: &mut Ui, state: &AppState) {
    let data = &state.data;
    ui.label(
        RichText::new(format!(
            "{} source rows, {} regions, {} annual rows",
            data.source_rows,
            state.regions.len(),
            data.annual.len()
        ))
        .small(),
    );

    if data.warnings.is_empty() {
        return;
    }
    egui::CollapsingHeader::new(
        RichText::new(format!("Data quality ({})", data.warnings.len())).color(Color32::YELLOW),
    )
    .id_salt("data_quality")
    .default_open(false)
    .show(ui, |ui: &mut Ui| {
        ScrollArea::vertical()
            .max_height(200.0)
            .show(ui, |ui: &mut Ui| {
                for warning in &data.warnings {
                    ui.label(RichText::new(warning.to_string()).small());
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Central header
// ---------------------------------------------------------------------------

pub fn header(ui: &mut Ui, state: &AppState) {
    ui.heading("Precipitation & Climate Analysis");
    match state.selected_region() {
        Some(region) => ui.label(RichText::new(format!("Region {region}")).size(16.0)),
        None => ui.label(RichText::new("No regions in dataset").color(Color32::RED)),
    };
    ui.add_space(4.0);
}
