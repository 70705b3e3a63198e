// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Meme picture canvas.
//!
//! Draws a picture with its captions scaled to the available width. In
//! read-only mode captions are plain text; in editing mode each caption can
//! be dragged around within the picture and the final render-space position
//! is reported back to the caller.

use crate::models::picture::MemePicture;
use crate::strings::Strings;
use crate::util::geometry::{self, Point, RenderProjection};

/// Result of canvas interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasAction {
    None,
    /// A caption drag finished at `position` (render space, relative to the picture).
    DragStopped {
        index: usize,
        position: Point,
        scale_factor: Option<f32>,
    },
}

/// A caption currently being dragged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptionDrag {
    pub index: usize,
    /// Top-left of the caption relative to the picture, in render space.
    pub position: egui::Vec2,
}

/// Pointer activity on one caption during a frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct DragInput {
    started: bool,
    /// Movement this frame while dragged.
    delta: Option<egui::Vec2>,
    stopped: bool,
}

impl DragInput {
    fn from_response(response: &egui::Response) -> Self {
        Self {
            started: response.drag_started(),
            delta: response.dragged().then(|| response.drag_delta()),
            stopped: response.drag_stopped(),
        }
    }
}

/// Advance the drag of caption `index` by one frame.
///
/// `resting` is where the caption sits when not dragged, `caption` its size
/// and `container` the picture size, all in render space. Returns where to
/// draw the caption this frame and the action to report.
fn step_drag(
    state: &mut Option<CaptionDrag>,
    index: usize,
    resting: egui::Vec2,
    input: DragInput,
    caption: egui::Vec2,
    container: egui::Vec2,
    scale_factor: Option<f32>,
) -> (egui::Vec2, CanvasAction) {
    let mut offset = match &*state {
        Some(active) if active.index == index => active.position,
        _ => resting,
    };
    let mut action = CanvasAction::None;

    if input.started {
        *state = Some(CaptionDrag { index, position: offset });
    }
    if let Some(delta) = input.delta {
        if let Some(active) = state.as_mut().filter(|d| d.index == index) {
            active.position = clamp_to_container(active.position + delta, caption, container);
            offset = active.position;
        }
    }
    if input.stopped {
        if let Some(active) = state.take_if(|d| d.index == index) {
            offset = active.position;
            action = CanvasAction::DragStopped {
                index,
                position: Point::new(active.position.x, active.position.y),
                scale_factor,
            };
        }
    }

    (offset, action)
}

/// Display a meme picture.
///
/// Pass `drag` to make the captions draggable; `None` renders read-only.
pub fn show(
    ui: &mut egui::Ui,
    meme: &MemePicture,
    texture: Option<&egui::TextureHandle>,
    mut drag: Option<&mut Option<CaptionDrag>>,
) -> CanvasAction {
    let mut action = CanvasAction::None;

    let width = ui.available_width();
    let projection = geometry::project(&meme.texts, Some(width));
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, projection.height), egui::Sense::hover());
    let painter = ui.painter_at(rect);

    painter.rect_filled(rect, 8.0, egui::Color32::from_gray(230));
    match texture {
        Some(texture) => {
            painter.image(
                texture.id(),
                contain_rect(rect, texture.size_vec2()),
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }
        None => {
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "…",
                egui::FontId::proportional(24.0),
                egui::Color32::from_gray(120),
            );
        }
    }

    // Nothing sensible to draw until the container has a width.
    if projection.scale_factor.is_none() {
        return action;
    }

    for (index, text) in projection.texts.iter().enumerate() {
        let layout = CaptionLayout::new(&painter, &text.content, &projection);
        let mut offset = egui::vec2(text.x, text.y);

        if let Some(state) = &mut drag {
            let state: &mut Option<CaptionDrag> = state;
            let shown = match &*state {
                Some(active) if active.index == index => active.position,
                _ => offset,
            };

            let id = ui.id().with(("caption", index));
            let response = ui.interact(
                egui::Rect::from_min_size(rect.min + shown, layout.size),
                id,
                egui::Sense::drag(),
            );
            if response.hovered() || response.dragged() {
                ui.ctx().set_cursor_icon(egui::CursorIcon::Move);
            }

            let (next, step) = step_drag(
                state,
                index,
                offset,
                DragInput::from_response(&response),
                layout.size,
                rect.size(),
                projection.scale_factor,
            );
            offset = next;
            if step != CanvasAction::None {
                action = step;
            }
        }

        layout.paint(&painter, rect.min + offset);
    }

    action
}

/// Empty editor area shown before a picture is chosen. Clicking it opens the picker.
pub fn show_placeholder(ui: &mut egui::Ui, strings: &Strings) -> egui::Response {
    let width = ui.available_width();
    let height = width * geometry::REF_HEIGHT / geometry::REF_WIDTH;
    let (rect, response) = ui.allocate_exact_size(egui::vec2(width, height), egui::Sense::click());

    let painter = ui.painter_at(rect);
    let stroke_color = if response.hovered() {
        egui::Color32::from_rgb(0, 170, 200)
    } else {
        egui::Color32::from_gray(170)
    };
    painter.rect_stroke(rect.shrink(1.0), 9.0, egui::Stroke::new(1.0, stroke_color));
    painter.text(
        rect.center() - egui::vec2(0.0, 12.0),
        egui::Align2::CENTER_CENTER,
        strings.select_picture,
        egui::FontId::proportional(18.0),
        ui.visuals().text_color(),
    );
    painter.text(
        rect.center() + egui::vec2(0.0, 12.0),
        egui::Align2::CENTER_CENTER,
        strings.drop_picture,
        egui::FontId::proportional(13.0),
        egui::Color32::from_gray(140),
    );

    response.on_hover_cursor(egui::CursorIcon::PointingHand)
}

/// Laid-out caption text: white fill with a thin black outline.
struct CaptionLayout {
    fill: std::sync::Arc<egui::Galley>,
    outline: std::sync::Arc<egui::Galley>,
    size: egui::Vec2,
}

impl CaptionLayout {
    fn new(painter: &egui::Painter, content: &str, projection: &RenderProjection) -> Self {
        let font = egui::FontId::proportional(projection.font_size);
        let label = content.to_uppercase();
        let fill = painter.layout_no_wrap(label.clone(), font.clone(), egui::Color32::WHITE);
        let outline = painter.layout_no_wrap(label, font, egui::Color32::BLACK);
        let size = fill.size();
        Self { fill, outline, size }
    }

    fn paint(&self, painter: &egui::Painter, pos: egui::Pos2) {
        for (dx, dy) in [(-1.0, 0.0), (1.0, 0.0), (0.0, -1.0), (0.0, 1.0)] {
            painter.galley(pos + egui::vec2(dx, dy), self.outline.clone(), egui::Color32::BLACK);
        }
        painter.galley(pos, self.fill.clone(), egui::Color32::WHITE);
    }
}

/// Keep an item of `size` fully inside a container of `container` size.
pub fn clamp_to_container(position: egui::Vec2, size: egui::Vec2, container: egui::Vec2) -> egui::Vec2 {
    let max_x = (container.x - size.x).max(0.0);
    let max_y = (container.y - size.y).max(0.0);
    egui::vec2(position.x.clamp(0.0, max_x), position.y.clamp(0.0, max_y))
}

/// Largest rect with the image's aspect ratio that fits centered in `container`.
pub fn contain_rect(container: egui::Rect, image_size: egui::Vec2) -> egui::Rect {
    if image_size.x <= 0.0 || image_size.y <= 0.0 || container.height() <= 0.0 {
        return container;
    }

    let img_aspect = image_size.x / image_size.y;
    let available_aspect = container.width() / container.height();

    let (display_width, display_height) = if img_aspect > available_aspect {
        // Image is wider - fit to width
        (container.width(), container.width() / img_aspect)
    } else {
        // Image is taller - fit to height
        (container.height() * img_aspect, container.height())
    };

    egui::Rect::from_center_size(container.center(), egui::vec2(display_width, display_height))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAPTION: egui::Vec2 = egui::vec2(100.0, 20.0);
    const PICTURE: egui::Vec2 = egui::vec2(400.0, 225.0);

    fn drag(delta: egui::Vec2) -> DragInput {
        DragInput {
            delta: Some(delta),
            ..DragInput::default()
        }
    }

    #[test]
    fn test_drag_reports_render_position_and_scale() {
        let mut state = None;
        let resting = egui::vec2(50.0, 25.0);

        let start = DragInput {
            started: true,
            delta: Some(egui::vec2(0.0, 0.0)),
            ..DragInput::default()
        };
        let (offset, action) = step_drag(&mut state, 0, resting, start, CAPTION, PICTURE, Some(0.5));
        assert_eq!(offset, resting);
        assert_eq!(action, CanvasAction::None);
        assert_eq!(state, Some(CaptionDrag { index: 0, position: resting }));

        let (offset, _) = step_drag(&mut state, 0, resting, drag(egui::vec2(10.0, 5.0)), CAPTION, PICTURE, Some(0.5));
        assert_eq!(offset, egui::vec2(60.0, 30.0));

        let stop = DragInput {
            stopped: true,
            ..DragInput::default()
        };
        let (offset, action) = step_drag(&mut state, 0, resting, stop, CAPTION, PICTURE, Some(0.5));
        assert_eq!(offset, egui::vec2(60.0, 30.0));
        assert_eq!(
            action,
            CanvasAction::DragStopped {
                index: 0,
                position: Point::new(60.0, 30.0),
                scale_factor: Some(0.5),
            }
        );
        assert_eq!(state, None);
    }

    #[test]
    fn test_drag_is_clamped_to_picture() {
        let mut state = Some(CaptionDrag {
            index: 1,
            position: egui::vec2(290.0, 200.0),
        });
        let (offset, _) = step_drag(
            &mut state,
            1,
            egui::vec2(0.0, 0.0),
            drag(egui::vec2(50.0, 50.0)),
            CAPTION,
            PICTURE,
            Some(0.5),
        );
        assert_eq!(offset, egui::vec2(300.0, 205.0));

        let (_, _) = step_drag(&mut state, 1, egui::vec2(0.0, 0.0), drag(egui::vec2(-900.0, -900.0)), CAPTION, PICTURE, Some(0.5));
        assert_eq!(state.map(|d| d.position), Some(egui::vec2(0.0, 0.0)));
    }

    #[test]
    fn test_other_caption_ignores_active_drag() {
        let mut state = Some(CaptionDrag {
            index: 0,
            position: egui::vec2(80.0, 40.0),
        });
        let resting = egui::vec2(10.0, 10.0);
        let stop = DragInput {
            stopped: true,
            delta: Some(egui::vec2(5.0, 5.0)),
            ..DragInput::default()
        };

        let (offset, action) = step_drag(&mut state, 2, resting, stop, CAPTION, PICTURE, Some(1.0));
        assert_eq!(offset, resting);
        assert_eq!(action, CanvasAction::None);
        assert_eq!(state.map(|d| d.index), Some(0));
    }

    #[test]
    fn test_stop_without_start_reports_nothing() {
        let mut state = None;
        let stop = DragInput {
            stopped: true,
            ..DragInput::default()
        };
        let (_, action) = step_drag(&mut state, 0, egui::vec2(1.0, 2.0), stop, CAPTION, PICTURE, None);
        assert_eq!(action, CanvasAction::None);
    }

    #[test]
    fn test_unknown_scale_is_passed_through() {
        let mut state = Some(CaptionDrag {
            index: 0,
            position: egui::vec2(5.0, 5.0),
        });
        let stop = DragInput {
            stopped: true,
            ..DragInput::default()
        };
        let (_, action) = step_drag(&mut state, 0, egui::vec2(0.0, 0.0), stop, CAPTION, PICTURE, None);
        assert_eq!(
            action,
            CanvasAction::DragStopped {
                index: 0,
                position: Point::new(5.0, 5.0),
                scale_factor: None,
            }
        );
    }

    #[test]
    fn test_clamp_to_container() {
        let container = egui::vec2(400.0, 225.0);
        let size = egui::vec2(100.0, 20.0);

        assert_eq!(clamp_to_container(egui::vec2(50.0, 50.0), size, container), egui::vec2(50.0, 50.0));
        assert_eq!(clamp_to_container(egui::vec2(-5.0, -1.0), size, container), egui::vec2(0.0, 0.0));
        assert_eq!(clamp_to_container(egui::vec2(390.0, 300.0), size, container), egui::vec2(300.0, 205.0));
    }

    #[test]
    fn test_clamp_item_larger_than_container() {
        let clamped = clamp_to_container(egui::vec2(30.0, 30.0), egui::vec2(500.0, 300.0), egui::vec2(400.0, 225.0));
        assert_eq!(clamped, egui::vec2(0.0, 0.0));
    }

    #[test]
    fn test_contain_wide_image() {
        let container = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(800.0, 450.0));
        let rect = contain_rect(container, egui::vec2(1000.0, 250.0));
        assert!((rect.width() - 800.0).abs() < 0.001);
        assert!((rect.height() - 200.0).abs() < 0.001);
        assert!((rect.min.y - 125.0).abs() < 0.001);
    }

    #[test]
    fn test_contain_tall_image() {
        let container = egui::Rect::from_min_size(egui::pos2(10.0, 20.0), egui::vec2(800.0, 450.0));
        let rect = contain_rect(container, egui::vec2(300.0, 900.0));
        assert!((rect.height() - 450.0).abs() < 0.001);
        assert!((rect.width() - 150.0).abs() < 0.001);
        assert!((rect.center().x - 410.0).abs() < 0.001);
    }

    #[test]
    fn test_contain_degenerate_image() {
        let container = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(800.0, 450.0));
        assert_eq!(contain_rect(container, egui::vec2(0.0, 10.0)), container);
    }
}
