//! Profile screen: name, career objective and skills.

use egui::{self, RichText};
use nova_types::user::{Skill, SkillType};
use crate::state::{UiAction, UiState};
use crate::theme::*;
use super::auth::error_banner;

pub fn profile_panel(ui: &mut egui::Ui, state: &mut UiState) -> Option<UiAction> {
    let mut action = None;
    let Some(user) = state.user.clone() else {
        return None;
    };

    egui::Frame::default()
        .fill(BG_PRIMARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.heading(RichText::new("Profile").color(TEXT_PRIMARY).strong());
            ui.label(RichText::new(&user.email).color(TEXT_SECONDARY).small());
            ui.separator();
            error_banner(ui, state);

            ui.label(RichText::new("Name").color(TEXT_SECONDARY).small());
            ui.text_edit_singleline(&mut state.profile.name);
            ui.add_space(4.0);

            ui.label(RichText::new("Career objective").color(TEXT_SECONDARY).small());
            ui.add(
                egui::TextEdit::multiline(&mut state.profile.career_objective)
                    .desired_rows(2)
                    .desired_width(f32::INFINITY),
            );
            ui.add_space(8.0);

            ui.label(RichText::new("Skills").color(ACCENT).strong());
            let mut remove = None;
            for (i, encoded) in state.profile.skills.iter().enumerate() {
                let skill = Skill::parse(encoded);
                ui.horizontal(|ui| {
                    ui.label(RichText::new(&skill.name).color(TEXT_PRIMARY));
                    ui.label(RichText::new(skill.kind.label()).color(TEXT_SECONDARY).small());
                    if ui.small_button("x").clicked() {
                        remove = Some(i);
                    }
                });
            }
            if let Some(i) = remove {
                state.profile.remove_skill(i);
            }

            ui.horizontal(|ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut state.profile.new_skill)
                        .hint_text("Add a skill")
                        .desired_width(180.0),
                );
                egui::ComboBox::from_id_salt("skill_kind")
                    .selected_text(state.profile.new_skill_kind.label())
                    .show_ui(ui, |ui| {
                        for kind in [SkillType::Hard, SkillType::Soft] {
                            ui.selectable_value(&mut state.profile.new_skill_kind, kind, kind.label());
                        }
                    });
                let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.button("Add").clicked() || enter {
                    state.profile.add_skill();
                }
            });

            ui.add_space(12.0);
            let update = state.profile.to_update(&user);
            let enabled = !update.is_empty() && !state.is_busy();
            if ui
                .add_enabled(enabled, egui::Button::new("Save profile").fill(ACCENT))
                .clicked()
            {
                state.clear_errors();
                action = Some(UiAction::SaveProfile(update));
            }
        });

    action
}
