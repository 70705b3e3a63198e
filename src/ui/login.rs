// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Login form.

use crate::strings::Strings;

#[derive(Debug, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    /// Set after the first submit attempt so required-field hints appear.
    touched: bool,
    /// Error from the last login attempt.
    pub error: Option<String>,
}

impl LoginForm {
    /// Validation messages for the current input.
    pub fn validate(&self, strings: &Strings) -> Vec<&'static str> {
        let mut errors = Vec::new();
        if self.username.trim().is_empty() {
            errors.push(strings.username_required);
        }
        if self.password.is_empty() {
            errors.push(strings.password_required);
        }
        errors
    }

    /// Display the form. Returns true when a valid form was submitted.
    pub fn show(&mut self, ui: &mut egui::Ui, strings: &Strings, pending: bool) -> bool {
        let mut submitted = false;

        ui.vertical_centered(|ui| {
            ui.set_max_width(320.0);
            ui.add_space(40.0);
            ui.heading(egui::RichText::new(strings.app_title).size(32.0));
            ui.add_space(20.0);
            ui.label(egui::RichText::new(strings.login_heading).size(18.0));
            ui.add_space(10.0);

            ui.label(strings.username);
            let username = ui.add(egui::TextEdit::singleline(&mut self.username).hint_text(strings.username));
            ui.label(strings.password);
            let password = ui.add(
                egui::TextEdit::singleline(&mut self.password)
                    .password(true)
                    .hint_text(strings.password),
            );

            let enter = (username.lost_focus() || password.lost_focus())
                && ui.input(|i| i.key_pressed(egui::Key::Enter));

            if self.touched {
                for message in self.validate(strings) {
                    ui.colored_label(egui::Color32::from_rgb(220, 60, 60), message);
                }
            }
            if let Some(error) = &self.error {
                ui.colored_label(egui::Color32::from_rgb(220, 60, 60), error.as_str());
            }

            ui.add_space(10.0);
            let clicked = ui
                .add_enabled(!pending, egui::Button::new(strings.login_button))
                .clicked();
            if pending {
                ui.spinner();
            }

            if (clicked || enter) && !pending {
                self.touched = true;
                self.error = None;
                submitted = self.validate(strings).is_empty();
            }
        });

        submitted
    }
}
