//! Milestone toast shown after a goal is completed.

use egui::{self, Align2, RichText, Vec2};
use crate::state::{UiAction, UiState};
use crate::theme::*;

/// Floating notification in the top-right corner, if one is active.
pub fn milestone_toast(ctx: &egui::Context, state: &UiState) -> Option<UiAction> {
    let milestone = state.milestone.as_ref()?;
    let mut action = None;

    egui::Area::new(egui::Id::new(("milestone", milestone.seq)))
        .anchor(Align2::RIGHT_TOP, Vec2::new(-16.0, 48.0))
        .show(ctx, |ui| {
            egui::Frame::default()
                .fill(BG_SECONDARY)
                .stroke(egui::Stroke::new(1.0, CELEBRATE))
                .corner_radius(PANEL_ROUNDING)
                .inner_margin(PANEL_PADDING)
                .show(ui, |ui| {
                    ui.set_max_width(280.0);
                    ui.horizontal(|ui| {
                        ui.label(RichText::new("★").color(CELEBRATE).size(20.0));
                        ui.label(RichText::new(&milestone.message).color(TEXT_PRIMARY));
                    });
                    if ui.small_button("Dismiss").clicked() {
                        action = Some(UiAction::DismissMilestone);
                    }
                });
        });

    action
}
