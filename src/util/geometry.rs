// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! Caption positions are authored on a fixed 800x450 reference canvas.
//! This module maps them to the on-screen (render) coordinate system of a
//! picture whose width is only known once it has been laid out, and back.

use crate::models::caption::Caption;

/// Width of the reference canvas captions are authored on.
pub const REF_WIDTH: f32 = 800.0;
/// Height of the reference canvas captions are authored on.
pub const REF_HEIGHT: f32 = 450.0;
/// Caption font size on the reference canvas.
pub const REF_FONT_SIZE: f32 = 36.0;

/// A 2D point, in whichever space the caller says it is in.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Render-space view of a caption list, derived from a measured width.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderProjection {
    /// `None` until the container has a usable width.
    pub scale_factor: Option<f32>,
    pub height: f32,
    pub font_size: f32,
    pub texts: Vec<Caption>,
}

/// Scale factor for a rendered width, or `None` if the width is not usable yet.
pub fn scale_factor(rendered_width: Option<f32>) -> Option<f32> {
    rendered_width
        .filter(|w| w.is_finite() && *w > 0.0)
        .map(|w| w / REF_WIDTH)
}

/// Project reference-space captions into render space.
///
/// An absent or zero width yields a zero-sized projection with the captions
/// passed through untouched, so callers can render before layout settles.
pub fn project(reference_texts: &[Caption], rendered_width: Option<f32>) -> RenderProjection {
    let Some(scale) = scale_factor(rendered_width) else {
        return RenderProjection {
            scale_factor: None,
            height: 0.0,
            font_size: 0.0,
            texts: reference_texts.to_vec(),
        };
    };

    RenderProjection {
        scale_factor: Some(scale),
        height: scale * REF_HEIGHT,
        font_size: scale * REF_FONT_SIZE,
        texts: reference_texts
            .iter()
            .map(|text| Caption {
                content: text.content.clone(),
                x: scale * text.x,
                y: scale * text.y,
            })
            .collect(),
    }
}

/// Convert a render-space point back to reference space.
pub fn to_reference_space(point: Point, scale_factor: Option<f32>) -> Option<Point> {
    let scale = scale_factor.filter(|s| s.is_finite() && *s > 0.0)?;
    Some(Point {
        x: point.x / scale,
        y: point.y / scale,
    })
}
