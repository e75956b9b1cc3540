//! Dashboard: goal stats, the goal form (create or edit) and the goal list.

use egui::{self, Align, Layout, RichText, ScrollArea, Vec2};
use nova_types::goal::{Goal, GoalCategory, GoalChanges, GoalStatus};
use crate::state::{GoalForm, UiAction, UiState};
use crate::theme::*;

pub fn goals_panel(ui: &mut egui::Ui, state: &mut UiState) -> Option<UiAction> {
    let mut action = None;

    egui::Frame::default()
        .fill(BG_PRIMARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                let name = state.user.as_ref().map(|u| u.name.as_str()).unwrap_or("");
                ui.heading(RichText::new(format!("Hello, {}", name)).color(TEXT_PRIMARY).strong());
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if ui.button("Refresh").clicked() {
                        action = Some(UiAction::RefreshGoals);
                    }
                });
            });
            if let Some(objective) = state.user.as_ref().map(|u| &u.career_objective) {
                if !objective.is_empty() {
                    ui.label(RichText::new(objective).color(TEXT_SECONDARY).italics());
                }
            }
            ui.separator();

            stats_row(ui, state);
            ui.add_space(8.0);

            if let Some(a) = goal_form(ui, state) {
                action = Some(a);
            }
            ui.add_space(8.0);

            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    if state.goals.is_empty() {
                        ui.label(
                            RichText::new("No goals yet. Add your first one above.")
                                .color(TEXT_SECONDARY),
                        );
                    }
                    for goal in &state.goals {
                        if let Some(a) = goal_row(ui, goal, &mut state.goal_form) {
                            action = Some(a);
                        }
                        ui.add_space(4.0);
                    }
                });
        });

    action
}

fn stats_row(ui: &mut egui::Ui, state: &UiState) {
    ui.horizontal(|ui| {
        stat_card(ui, "Total", state.stats.total, ACCENT);
        stat_card(ui, "In progress", state.stats.in_progress, WARNING);
        stat_card(ui, "Completed", state.stats.completed, SUCCESS);
    });
}

fn stat_card(ui: &mut egui::Ui, label: &str, value: usize, color: egui::Color32) {
    egui::Frame::default()
        .fill(BG_SECONDARY)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(Vec2::new(16.0, 8.0))
        .show(ui, |ui| {
            ui.vertical(|ui| {
                ui.label(RichText::new(value.to_string()).color(color).size(22.0).strong());
                ui.label(RichText::new(label).color(TEXT_SECONDARY).small());
            });
        });
}

fn goal_form(ui: &mut egui::Ui, state: &mut UiState) -> Option<UiAction> {
    let mut action = None;
    let editing = state.goal_form.editing_id().is_some();
    egui::Frame::default()
        .fill(BG_SECONDARY)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(8.0)
        .show(ui, |ui| {
            if editing {
                ui.label(RichText::new("Edit goal").color(ACCENT).small());
            }
            ui.horizontal(|ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut state.goal_form.title)
                        .hint_text("New goal")
                        .desired_width(220.0),
                );
                egui::ComboBox::from_id_salt("goal_category")
                    .selected_text(state.goal_form.category.label())
                    .show_ui(ui, |ui| {
                        for c in GoalCategory::all() {
                            ui.selectable_value(&mut state.goal_form.category, *c, c.label());
                        }
                    });
                let enabled = !state.goal_form.title.trim().is_empty() && !state.is_busy();
                let label = if editing { "Save" } else { "Add" };
                if ui.add_enabled(enabled, egui::Button::new(label).fill(ACCENT)).clicked() {
                    action = state.goal_form.submit();
                }
                if editing && ui.button("Cancel").clicked() {
                    state.goal_form.cancel();
                }
            });
            ui.add(
                egui::TextEdit::multiline(&mut state.goal_form.description)
                    .hint_text("Description (optional)")
                    .desired_rows(2)
                    .desired_width(f32::INFINITY),
            );
        });
    action
}

fn goal_row(ui: &mut egui::Ui, goal: &Goal, form: &mut GoalForm) -> Option<UiAction> {
    let mut action = None;
    egui::Frame::default()
        .fill(BG_SECONDARY)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                let status = egui::Button::new(
                    RichText::new(goal.status.label()).color(status_color(goal.status)),
                )
                .fill(BG_SURFACE);
                if ui
                    .add(status)
                    .on_hover_text(format!("Move to {}", goal.status.next().label()))
                    .clicked()
                {
                    action = Some(UiAction::ToggleGoal(goal.id.clone()));
                }

                ui.label(
                    RichText::new(goal.category.label())
                        .color(category_color(goal.category))
                        .small(),
                );
                let title = RichText::new(&goal.title).color(TEXT_PRIMARY);
                if goal.status == GoalStatus::Completed {
                    ui.label(title.strikethrough());
                } else {
                    ui.label(title.strong());
                }

                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if ui.button(RichText::new("Delete").color(ERROR)).clicked() {
                        action = Some(UiAction::DeleteGoal(goal.id.clone()));
                    }
                    let is_edited = form.editing_id() == Some(goal.id.as_str());
                    if ui.add_enabled(!is_edited, egui::Button::new("Edit")).clicked() {
                        form.edit(goal);
                    }
                    if goal.status != GoalStatus::Completed && ui.button("Complete").clicked() {
                        action = Some(UiAction::UpdateGoal {
                            id: goal.id.clone(),
                            changes: GoalChanges::status(GoalStatus::Completed),
                        });
                    }
                });
            });
            if !goal.description.is_empty() {
                ui.label(RichText::new(&goal.description).color(TEXT_SECONDARY).small());
            }
        });
    action
}
