// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Caption drag handling.
//!
//! The canvas reports where a dragged caption ended up as an absolute
//! render-space position (its top-left corner relative to the picture's
//! top-left). That position is divided by the scale factor and stored as the
//! caption's reference-space position. Nothing is clamped here: the canvas
//! keeps the caption inside the visible picture while dragging, and whatever
//! reference coordinate that maps to is stored as is.

use crate::models::caption::{self, Caption};
use crate::util::geometry::{to_reference_space, Point};

/// Apply the end of a drag to the caption at `index`.
///
/// Returns the list unchanged if the scale factor is unknown.
pub fn on_drag_end(
    texts: &[Caption],
    index: usize,
    render_position: Point,
    scale_factor: Option<f32>,
) -> Vec<Caption> {
    match to_reference_space(render_position, scale_factor) {
        Some(reference) => {
            log::debug!(
                "Caption {} dropped at ({:.1}, {:.1}) -> reference ({:.1}, {:.1})",
                index,
                render_position.x,
                render_position.y,
                reference.x,
                reference.y
            );
            caption::reposition(texts, index, reference.x, reference.y)
        }
        None => {
            log::debug!("Ignoring drag of caption {} before layout", index);
            texts.to_vec()
        }
    }
}
