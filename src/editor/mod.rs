// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Meme editor: caption editing, dragging and submission.

pub mod drag;
pub mod history;
pub mod surface;

pub use surface::EditorSurface;
