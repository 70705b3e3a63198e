// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Caption sidebar.
//!
//! Lists the captions as editable text fields with a delete button each,
//! plus add, cancel and submit controls.

use crate::models::caption::Caption;
use crate::strings::Strings;

/// Result of sidebar interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum SidebarAction {
    None,
    AddCaption,
    DeleteCaption(usize),
    EditCaption(usize, String),
    /// A caption field lost focus.
    EndEdit,
    Cancel,
    Submit,
}

/// Display the caption sidebar.
///
/// `has_picture` enables adding captions and submitting; `submitting`
/// disables submit while an upload is in flight.
pub fn show(
    ui: &mut egui::Ui,
    strings: &Strings,
    texts: &[Caption],
    has_picture: bool,
    submitting: bool,
) -> SidebarAction {
    let mut action = SidebarAction::None;

    ui.add_space(8.0);
    ui.heading(strings.add_captions);
    ui.separator();

    // Leave room for the button row at the bottom.
    let list_height = (ui.available_height() - 48.0).max(0.0);
    egui::ScrollArea::vertical()
        .max_height(list_height)
        .auto_shrink([false, true])
        .show(ui, |ui| {
            for (index, text) in texts.iter().enumerate() {
                ui.horizontal(|ui| {
                    let mut content = text.content.clone();
                    let field_width = (ui.available_width() - 32.0).max(40.0);
                    let response = ui.add(egui::TextEdit::singleline(&mut content).desired_width(field_width));
                    if response.changed() {
                        action = SidebarAction::EditCaption(index, content);
                    } else if response.lost_focus() {
                        action = SidebarAction::EndEdit;
                    }
                    if ui
                        .button("🗑")
                        .on_hover_text(strings.delete_caption)
                        .clicked()
                    {
                        action = SidebarAction::DeleteCaption(index);
                    }
                });
            }

            ui.add_space(4.0);
            let add = egui::Button::new(format!("+ {}", strings.add_caption)).frame(false);
            if ui.add_enabled(has_picture, add).clicked() {
                action = SidebarAction::AddCaption;
            }
        });

    ui.with_layout(egui::Layout::bottom_up(egui::Align::Min), |ui| {
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui.button(strings.cancel).clicked() {
                action = SidebarAction::Cancel;
            }
            let submit = egui::Button::new(strings.submit);
            if ui.add_enabled(has_picture && !submitting, submit).clicked() {
                action = SidebarAction::Submit;
            }
            if submitting {
                ui.spinner();
            }
        });
    });

    action
}
