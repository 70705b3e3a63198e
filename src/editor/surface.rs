// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Meme editor state.
//!
//! Holds the selected picture, the description and the caption list, and
//! routes every user edit through the caption operations so positions stay
//! in reference space. Submission runs in the background; at most one is in
//! flight, and a failed one leaves the editor state untouched for a retry.

use super::drag;
use super::history::History;
use crate::io::api::MemeCreator;
use crate::io::task::BackgroundTask;
use crate::models::caption::{self, Caption};
use crate::models::meme::Meme;
use crate::models::picture::{compose, MemePicture, Picture, PictureFile};
use crate::util::geometry::Point;
use std::sync::Arc;

#[derive(Default)]
pub struct EditorSurface {
    picture: Option<Picture>,
    description: String,
    texts: Vec<Caption>,
    history: History,
    /// Caption whose text is being typed, so consecutive keystrokes share one undo step.
    editing: Option<usize>,
    submission: Option<BackgroundTask<Meme>>,
}

impl EditorSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn picture(&self) -> Option<&Picture> {
        self.picture.as_ref()
    }

    pub fn texts(&self) -> &[Caption] {
        &self.texts
    }

    #[cfg(test)]
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn description_mut(&mut self) -> &mut String {
        &mut self.description
    }

    /// The picture with its captions, or `None` before a picture is chosen.
    pub fn composite(&self) -> Option<MemePicture> {
        compose(self.picture.as_ref(), &self.texts)
    }

    /// Select a new picture. Captions are kept.
    ///
    /// Returns the preview URL of the replaced picture so the caller can
    /// release whatever it cached for it.
    pub fn on_drop(&mut self, file: PictureFile) -> Option<String> {
        let picture = Picture::from_file(file);
        log::info!("Selected picture {} as {}", picture.file.name, picture.url);
        self.picture.replace(picture).map(|old| old.url)
    }

    fn record(&mut self) {
        self.history.push(self.texts.clone());
        self.editing = None;
    }

    pub fn add_caption(&mut self, label: impl FnOnce(usize) -> String) {
        self.record();
        self.texts = caption::add(&self.texts, label);
        log::info!("Added caption, total: {}", self.texts.len());
    }

    pub fn delete_caption(&mut self, index: usize) {
        if index >= self.texts.len() {
            return;
        }
        self.record();
        self.texts = caption::remove(&self.texts, index);
        log::info!("Deleted caption {}, total: {}", index, self.texts.len());
    }

    pub fn edit_caption(&mut self, index: usize, content: &str) {
        let Some(current) = self.texts.get(index) else {
            return;
        };
        if current.content == content {
            return;
        }
        if self.editing != Some(index) {
            self.record();
            self.editing = Some(index);
        }
        self.texts = caption::edit_content(&self.texts, index, content);
    }

    /// Close the current typing session so the next edit starts a new undo step.
    pub fn end_edit(&mut self) {
        self.editing = None;
    }

    /// Apply the end of a drag reported in render space.
    pub fn drag_caption(&mut self, index: usize, render_position: Point, scale_factor: Option<f32>) {
        let next = drag::on_drag_end(&self.texts, index, render_position, scale_factor);
        if next != self.texts {
            self.record();
            self.texts = next;
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo(&mut self) {
        if let Some(previous) = self.history.undo(self.texts.clone()) {
            self.texts = previous;
            self.editing = None;
            log::info!("Undo");
        }
    }

    pub fn redo(&mut self) {
        if let Some(next) = self.history.redo(self.texts.clone()) {
            self.texts = next;
            self.editing = None;
            log::info!("Redo");
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submission.is_some()
    }

    /// Start uploading the meme.
    ///
    /// Does nothing and returns `false` without a picture or while a previous
    /// submission is still pending.
    pub fn submit(&mut self, token: &str, creator: Arc<dyn MemeCreator>) -> bool {
        if self.submission.is_some() {
            return false;
        }
        let Some(picture) = self.picture.clone() else {
            log::warn!("Submit ignored: no picture selected");
            return false;
        };

        let token = token.to_string();
        let texts = self.texts.clone();
        let description = self.description.clone();
        self.submission = Some(BackgroundTask::spawn(move || {
            creator
                .create_meme(&token, &picture, &texts, &description)
                .map_err(|e| e.to_string())
        }));
        true
    }

    /// Result of the pending submission, once it has finished.
    pub fn poll_submission(&mut self) -> Option<Result<Meme, String>> {
        let result = self.submission.as_ref()?.try_take()?;
        self.submission = None;
        match &result {
            Ok(meme) => log::info!("Meme {} created", meme.id),
            Err(e) => log::error!("Failed to create meme: {}", e),
        }
        Some(result)
    }

    /// Clear everything. Returns the preview URL that is no longer in use.
    pub fn reset(&mut self) -> Option<String> {
        let old = self.picture.take().map(|p| p.url);
        *self = Self::default();
        old
    }

    #[cfg(test)]
    fn wait_submission(&mut self) -> Option<Result<Meme, String>> {
        let task = self.submission.take()?;
        Some(task.wait())
    }
}
