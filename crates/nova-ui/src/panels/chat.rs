//! Chat panel: career assistant transcript and question input.

use egui::{self, Align, Layout, RichText, ScrollArea, Vec2};
use nova_types::chat::{ChatMessage, Speaker};
use crate::state::{UiAction, UiState};
use crate::theme::*;

/// Render the chat panel. Returns an ask action when the user submits.
pub fn chat_panel(ui: &mut egui::Ui, state: &mut UiState) -> Option<UiAction> {
    let mut action = None;

    egui::Frame::default()
        .fill(BG_PRIMARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                // Header
                ui.horizontal(|ui| {
                    ui.heading(RichText::new("Career assistant").color(TEXT_PRIMARY).strong());
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        let (text, color) = if state.awaiting_answer {
                            ("Thinking...", WARNING)
                        } else {
                            ("Ready", SUCCESS)
                        };
                        ui.label(RichText::new(text).color(color).small());
                    });
                });

                ui.separator();

                let available_height = ui.available_height() - 60.0;
                ScrollArea::vertical()
                    .max_height(available_height)
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        if state.transcript.is_empty() {
                            ui.label(
                                RichText::new("Ask anything about your career plan.")
                                    .color(TEXT_SECONDARY)
                                    .italics(),
                            );
                        }
                        for msg in state.transcript.messages() {
                            render_message(ui, msg);
                            ui.add_space(4.0);
                        }
                    });

                ui.add_space(8.0);

                ui.horizontal(|ui| {
                    let input = egui::TextEdit::singleline(&mut state.chat_input)
                        .hint_text("Type a question...")
                        .desired_width(ui.available_width() - 70.0)
                        .font(egui::FontId::proportional(14.0));
                    let response = ui.add(input);

                    let send_enabled = !state.chat_input.trim().is_empty() && !state.awaiting_answer;
                    let send_btn = ui.add_enabled(
                        send_enabled,
                        egui::Button::new(RichText::new("Send").color(TEXT_PRIMARY))
                            .fill(if send_enabled { ACCENT } else { BG_SURFACE })
                            .corner_radius(PANEL_ROUNDING)
                            .min_size(Vec2::new(60.0, 0.0)),
                    );

                    let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if (enter && send_enabled) || send_btn.clicked() {
                        action = state.submit_question();
                        response.request_focus();
                    }
                });
            });
        });

    action
}

fn render_message(ui: &mut egui::Ui, msg: &ChatMessage) {
    let (label, label_color, bg) = match msg.from {
        Speaker::User => ("You", ACCENT, BG_SECONDARY),
        Speaker::Bot => ("Assistant", SUCCESS, BG_SURFACE),
    };

    egui::Frame::default()
        .fill(bg)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.label(RichText::new(label).color(label_color).strong().small());
            ui.label(RichText::new(&msg.text).color(TEXT_PRIMARY));
        });
}
