// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Header bar with navigation.

use crate::app::Screen;
use crate::strings::Strings;

/// Result of toolbar interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    None,
    Navigate(Screen),
    SignOut,
}

/// Display the header with the app title, screen switcher and sign-out button.
pub fn show(ui: &mut egui::Ui, strings: &Strings, current: Screen, username: &str) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        if ui
            .selectable_label(current == Screen::Feed, egui::RichText::new(strings.app_title).strong())
            .clicked()
            && current != Screen::Feed
        {
            action = ToolbarAction::Navigate(Screen::Feed);
        }

        ui.separator();

        if ui
            .selectable_label(current == Screen::Create, format!("+ {}", strings.create_meme))
            .clicked()
            && current != Screen::Create
        {
            action = ToolbarAction::Navigate(Screen::Create);
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button(strings.sign_out).clicked() {
                action = ToolbarAction::SignOut;
            }
            ui.label(egui::RichText::new(username).weak());
        });
    });

    action
}
