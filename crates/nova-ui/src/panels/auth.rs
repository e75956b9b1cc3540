//! Login and registration screens.

use egui::{self, RichText, Vec2};
use nova_types::event::Route;
use crate::state::{UiAction, UiState};
use crate::theme::*;

/// Render the login form. Returns an action on submit or navigation.
pub fn login_panel(ui: &mut egui::Ui, state: &mut UiState) -> Option<UiAction> {
    let mut action = None;

    form_frame(ui, "Sign in", |ui| {
        error_banner(ui, state);

        text_field(ui, "Email", &mut state.login.email, false, None);
        let password = text_field(ui, "Password", &mut state.login.password, true, None);

        let enter = password.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        let ready = state.login.is_complete() && !state.is_busy();
        if primary_button(ui, "Sign in", ready).clicked() || (enter && ready) {
            state.clear_errors();
            action = state.login.submit();
        }

        ui.add_space(8.0);
        if ui.link("No account yet? Register").clicked() {
            state.clear_errors();
            action = Some(UiAction::Navigate(Route::Register));
        }
    });

    action
}

/// Render the registration form.
pub fn register_panel(ui: &mut egui::Ui, state: &mut UiState) -> Option<UiAction> {
    let mut action = None;

    form_frame(ui, "Create your account", |ui| {
        error_banner(ui, state);

        let errors = state.field_errors.clone();
        text_field(ui, "Name", &mut state.register.name, false, errors.get("name"));
        text_field(ui, "Email", &mut state.register.email, false, errors.get("email"));
        text_field(ui, "Password", &mut state.register.password, true, errors.get("password"));
        text_field(
            ui,
            "Career objective",
            &mut state.register.career_objective,
            false,
            errors.get("professionalGoal"),
        );

        let ready = state.register.is_complete() && !state.is_busy();
        if primary_button(ui, "Register", ready).clicked() {
            state.clear_errors();
            action = state.register.submit();
        }

        ui.add_space(8.0);
        if ui.link("Already registered? Sign in").clicked() {
            state.clear_errors();
            action = Some(UiAction::Navigate(Route::Login));
        }
    });

    action
}

fn form_frame(ui: &mut egui::Ui, title: &str, body: impl FnOnce(&mut egui::Ui)) {
    ui.vertical_centered(|ui| {
        ui.add_space(48.0);
        egui::Frame::default()
            .fill(BG_SECONDARY)
            .corner_radius(PANEL_ROUNDING)
            .inner_margin(PANEL_PADDING)
            .show(ui, |ui| {
                ui.set_max_width(FORM_WIDTH);
                ui.heading(RichText::new(title).color(TEXT_PRIMARY).strong());
                ui.separator();
                body(ui);
            });
    });
}

fn text_field(
    ui: &mut egui::Ui,
    label: &str,
    value: &mut String,
    password: bool,
    error: Option<&String>,
) -> egui::Response {
    ui.label(RichText::new(label).color(TEXT_SECONDARY).small());
    let response = ui.add(
        egui::TextEdit::singleline(value)
            .password(password)
            .desired_width(FORM_WIDTH),
    );
    if let Some(msg) = error {
        ui.label(RichText::new(msg).color(ERROR).small());
    }
    ui.add_space(4.0);
    response
}

fn primary_button(ui: &mut egui::Ui, text: &str, enabled: bool) -> egui::Response {
    ui.add_enabled(
        enabled,
        egui::Button::new(RichText::new(text).color(TEXT_PRIMARY))
            .fill(if enabled { ACCENT } else { BG_SURFACE })
            .corner_radius(PANEL_ROUNDING)
            .min_size(Vec2::new(FORM_WIDTH, 32.0)),
    )
}

pub(crate) fn error_banner(ui: &mut egui::Ui, state: &UiState) {
    if let Some(ref msg) = state.error_text {
        egui::Frame::default()
            .fill(ERROR.linear_multiply(0.2))
            .corner_radius(PANEL_ROUNDING)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.label(RichText::new(msg).color(TEXT_PRIMARY));
            });
        ui.add_space(4.0);
    }
}
