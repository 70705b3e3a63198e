// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Meme feed.
//!
//! Shows the paginated list of memes with their captions drawn through the
//! read-only canvas, and lets the user open a meme's comments and post one.
//! Every network call runs as a background task polled once per frame.
//! Author avatars share the picture cache with the memes.

use super::canvas;
use crate::io::api::{ApiClient, ApiError};
use crate::io::media::{self, LoadedImage};
use crate::io::task::BackgroundTask;
use crate::models::meme::{Comment, Meme, Page, User};
use crate::models::picture::MemePicture;
use crate::strings::Strings;
use crate::util::time::relative_age;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

const AVATAR_SIZE: f32 = 24.0;

/// Result of feed interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedAction {
    None,
    LoadMore,
    ToggleComments(String),
    LoadMoreComments(String),
    PostComment(String),
}

/// Items accumulated from consecutive pages of a listing.
#[derive(Debug)]
struct Paged<T> {
    items: Vec<T>,
    total: u64,
    pages_loaded: u64,
}

impl<T> Default for Paged<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            pages_loaded: 0,
        }
    }
}

impl<T> Paged<T> {
    fn apply(&mut self, page: Page<T>) {
        self.total = page.total;
        self.pages_loaded += 1;
        self.items.extend(page.results);
    }

    /// Like [`Paged::apply`], skipping items whose key is already listed.
    fn apply_unique<K, F>(&mut self, page: Page<T>, key: F)
    where
        K: PartialEq + ?Sized,
        F: Fn(&T) -> &K,
    {
        self.total = page.total;
        self.pages_loaded += 1;
        for item in page.results {
            if !self.items.iter().any(|existing| key(existing) == key(&item)) {
                self.items.push(item);
            }
        }
    }

    fn next_page(&self) -> u64 {
        self.pages_loaded + 1
    }

    fn has_more(&self) -> bool {
        self.pages_loaded == 0 || (self.items.len() as u64) < self.total
    }
}

enum PictureSlot {
    Loading,
    Ready(egui::TextureHandle),
    Failed,
}

#[derive(Default)]
struct CommentThread {
    open: bool,
    comments: Paged<Comment>,
    loading: Option<BackgroundTask<Page<Comment>, ApiError>>,
    draft: String,
    posting: Option<BackgroundTask<Comment, ApiError>>,
}

#[derive(Default)]
pub struct Feed {
    memes: Paged<Meme>,
    loading: Option<BackgroundTask<Page<Meme>, ApiError>>,
    pictures: HashMap<String, PictureSlot>,
    picture_tasks: Vec<(String, BackgroundTask<LoadedImage>)>,
    /// `None` while the author is being fetched.
    authors: HashMap<String, Option<User>>,
    author_tasks: Vec<(String, BackgroundTask<User, ApiError>)>,
    threads: HashMap<String, CommentThread>,
    /// The signed-in user, kept across refreshes.
    current_user: Option<User>,
    error: Option<String>,
}

impl Feed {
    /// Drop everything and load the first page again.
    pub fn refresh(&mut self, api: &ApiClient, token: &str) {
        let current_user = self.current_user.take();
        *self = Self::default();
        if let Some(user) = current_user {
            self.remember_user(api, user);
        }
        self.load_next(api, token);
    }

    /// Record the signed-in user so their comments and avatar show without a lookup.
    pub fn remember_user(&mut self, api: &ApiClient, user: User) {
        self.request_avatar(api, &user);
        self.authors.insert(user.id.clone(), Some(user.clone()));
        self.current_user = Some(user);
    }

    fn load_next(&mut self, api: &ApiClient, token: &str) {
        if self.loading.is_some() || !self.memes.has_more() {
            return;
        }
        let page = self.memes.next_page();
        log::info!("Loading memes page {}", page);
        let (api, token) = (api.clone(), token.to_string());
        self.loading = Some(BackgroundTask::spawn(move || api.get_memes(&token, page)));
    }

    fn request_author(&mut self, api: &ApiClient, token: &str, author_id: &str) {
        if self.authors.contains_key(author_id) {
            return;
        }
        self.authors.insert(author_id.to_string(), None);
        let (api, token, id) = (api.clone(), token.to_string(), author_id.to_string());
        let task = BackgroundTask::spawn(move || api.get_user(&token, &id));
        self.author_tasks.push((author_id.to_string(), task));
    }

    fn request_avatar(&mut self, api: &ApiClient, user: &User) {
        if !user.picture_url.is_empty() {
            self.request_picture(api, &user.picture_url);
        }
    }

    fn request_picture(&mut self, api: &ApiClient, url: &str) {
        if self.pictures.contains_key(url) {
            return;
        }
        self.pictures.insert(url.to_string(), PictureSlot::Loading);
        let (api, target) = (api.clone(), url.to_string());
        let task = BackgroundTask::spawn(move || {
            let bytes = api.fetch_bytes(&target).map_err(|e| e.to_string())?;
            media::decode_image(&bytes).map_err(|e| e.to_string())
        });
        self.picture_tasks.push((url.to_string(), task));
    }

    /// Collect finished background work.
    ///
    /// Returns `Err(ApiError::Unauthorized)` when the session is no longer valid.
    pub fn poll(&mut self, ctx: &egui::Context, api: &ApiClient, token: &str) -> Result<(), ApiError> {
        if let Some(result) = self.loading.as_ref().and_then(BackgroundTask::try_take) {
            self.loading = None;
            match result {
                Ok(page) => {
                    let memes = page.results.clone();
                    let page_count = page.page_count();
                    self.memes.apply(page);
                    log::info!(
                        "Loaded memes page {}/{}, {} of {} memes",
                        self.memes.pages_loaded,
                        page_count,
                        self.memes.items.len(),
                        self.memes.total
                    );
                    for meme in &memes {
                        self.request_author(api, token, &meme.author_id);
                        self.request_picture(api, &meme.picture_url);
                    }
                }
                Err(ApiError::Unauthorized) => return Err(ApiError::Unauthorized),
                Err(e) => {
                    log::error!("Failed to load memes: {}", e);
                    self.error = Some(e.to_string());
                }
            }
        }

        let mut pending = Vec::new();
        for (url, task) in self.picture_tasks.drain(..) {
            match task.try_take() {
                None => pending.push((url, task)),
                Some(Ok(image)) => {
                    let size = [image.width as usize, image.height as usize];
                    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &image.pixels);
                    let texture = ctx.load_texture(url.as_str(), color_image, egui::TextureOptions::LINEAR);
                    self.pictures.insert(url, PictureSlot::Ready(texture));
                }
                Some(Err(e)) => {
                    log::error!("Failed to load picture {}: {}", url, e);
                    self.pictures.insert(url, PictureSlot::Failed);
                }
            }
        }
        self.picture_tasks = pending;

        let mut pending = Vec::new();
        let mut unauthorized = false;
        for (id, task) in std::mem::take(&mut self.author_tasks) {
            match task.try_take() {
                None => pending.push((id, task)),
                Some(Ok(user)) => {
                    self.request_avatar(api, &user);
                    self.authors.insert(id, Some(user));
                }
                Some(Err(e)) => {
                    unauthorized |= matches!(e, ApiError::Unauthorized);
                    log::warn!("Failed to load user {}: {}", id, e);
                    // Forget the attempt so a later listing asks again.
                    self.authors.remove(&id);
                }
            }
        }
        self.author_tasks = pending;
        if unauthorized {
            return Err(ApiError::Unauthorized);
        }

        let mut new_authors = Vec::new();
        for (meme_id, thread) in &mut self.threads {
            if let Some(result) = thread.loading.as_ref().and_then(BackgroundTask::try_take) {
                thread.loading = None;
                match result {
                    Ok(page) => {
                        new_authors.extend(page.results.iter().map(|c| c.author_id.clone()));
                        thread.comments.apply_unique(page, |c| c.id.as_str());
                    }
                    Err(ApiError::Unauthorized) => return Err(ApiError::Unauthorized),
                    Err(e) => log::error!("Failed to load comments of {}: {}", meme_id, e),
                }
            }
            if let Some(result) = thread.posting.as_ref().and_then(BackgroundTask::try_take) {
                thread.posting = None;
                match result {
                    Ok(comment) => {
                        log::info!("Posted comment {} on {}", comment.id, meme_id);
                        new_authors.push(comment.author_id.clone());
                        thread.comments.items.insert(0, comment);
                        thread.comments.total += 1;
                        thread.draft.clear();
                        if let Some(meme) = self.memes.items.iter_mut().find(|m| &m.id == meme_id) {
                            meme.comments_count += 1;
                        }
                    }
                    Err(ApiError::Unauthorized) => return Err(ApiError::Unauthorized),
                    Err(e) => {
                        log::error!("Failed to post comment on {}: {}", meme_id, e);
                        self.error = Some(e.to_string());
                    }
                }
            }
        }
        for author_id in new_authors {
            self.request_author(api, token, &author_id);
        }

        if self.is_busy() {
            ctx.request_repaint();
        }
        Ok(())
    }

    fn is_busy(&self) -> bool {
        self.loading.is_some()
            || !self.picture_tasks.is_empty()
            || !self.author_tasks.is_empty()
            || self
                .threads
                .values()
                .any(|t| t.loading.is_some() || t.posting.is_some())
    }

    /// Apply an action returned by [`Feed::show`].
    pub fn handle(&mut self, action: FeedAction, api: &ApiClient, token: &str) {
        match action {
            FeedAction::None => {}
            FeedAction::LoadMore => self.load_next(api, token),
            FeedAction::ToggleComments(meme_id) => {
                let thread = self.threads.entry(meme_id.clone()).or_default();
                thread.open = !thread.open;
                if thread.open && thread.comments.pages_loaded == 0 {
                    Self::load_comments(thread, api, token, &meme_id);
                }
            }
            FeedAction::LoadMoreComments(meme_id) => {
                if let Some(thread) = self.threads.get_mut(&meme_id) {
                    Self::load_comments(thread, api, token, &meme_id);
                }
            }
            FeedAction::PostComment(meme_id) => {
                let Some(thread) = self.threads.get_mut(&meme_id) else {
                    return;
                };
                let content = thread.draft.trim().to_string();
                if content.is_empty() || thread.posting.is_some() {
                    return;
                }
                let (api, token) = (api.clone(), token.to_string());
                thread.posting = Some(BackgroundTask::spawn(move || {
                    api.create_meme_comment(&token, &meme_id, &content)
                }));
            }
        }
    }

    fn load_comments(thread: &mut CommentThread, api: &ApiClient, token: &str, meme_id: &str) {
        if thread.loading.is_some() || !thread.comments.has_more() {
            return;
        }
        let page = thread.comments.next_page();
        let (api, token, id) = (api.clone(), token.to_string(), meme_id.to_string());
        thread.loading = Some(BackgroundTask::spawn(move || api.get_meme_comments(&token, &id, page)));
    }

    /// Display the feed.
    pub fn show(&mut self, ui: &mut egui::Ui, strings: &Strings) -> FeedAction {
        let mut action = FeedAction::None;

        if let Some(error) = &self.error {
            ui.colored_label(egui::Color32::from_rgb(220, 60, 60), error.as_str());
        }

        if self.memes.items.is_empty() {
            ui.centered_and_justified(|ui| {
                if self.loading.is_some() {
                    ui.spinner();
                } else {
                    ui.label(egui::RichText::new(strings.no_meme).color(egui::Color32::from_gray(150)));
                }
            });
            return action;
        }

        let now = Utc::now();
        let current_user_id = self.current_user.as_ref().map(|u| u.id.as_str());
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.set_max_width(800.0);
                for meme in &self.memes.items {
                    egui::Frame::group(ui.style()).show(ui, |ui| {
                        let byline = Byline {
                            author_id: &meme.author_id,
                            created_at: &meme.created_at,
                            now,
                        };
                        byline.show(ui, strings, &self.authors, &self.pictures);

                        let composite = MemePicture {
                            picture_url: meme.picture_url.clone(),
                            texts: meme.texts.clone(),
                        };
                        match self.pictures.get(&meme.picture_url) {
                            Some(PictureSlot::Ready(texture)) => {
                                canvas::show(ui, &composite, Some(texture), None);
                            }
                            Some(PictureSlot::Failed) => {
                                ui.label(egui::RichText::new(strings.generic_error).weak());
                            }
                            Some(PictureSlot::Loading) | None => {
                                canvas::show(ui, &composite, None, None);
                            }
                        }

                        if !meme.description.is_empty() {
                            ui.label(meme.description.as_str());
                        }

                        let toggle = format!("💬 {} {}", meme.comments_count, strings.comments);
                        if ui.link(toggle).clicked() {
                            action = FeedAction::ToggleComments(meme.id.clone());
                        }

                        if let Some(thread) = self.threads.get_mut(&meme.id) {
                            if thread.open {
                                let known = Known {
                                    authors: &self.authors,
                                    pictures: &self.pictures,
                                    current_user_id,
                                    now,
                                };
                                if let Some(thread_action) = show_thread(ui, strings, thread, &meme.id, &known) {
                                    action = thread_action;
                                }
                            }
                        }
                    });
                    ui.add_space(12.0);
                }

                if self.loading.is_some() {
                    ui.spinner();
                } else if self.memes.has_more() && ui.button(strings.load_more).clicked() {
                    action = FeedAction::LoadMore;
                }
            });

        action
    }
}

/// Username for an author id, falling back to the id until it is known.
fn author_name<'a>(authors: &'a HashMap<String, Option<User>>, author_id: &'a str) -> &'a str {
    match authors.get(author_id) {
        Some(Some(user)) => user.username.as_str(),
        _ => author_id,
    }
}

/// Round avatar: the user's picture once downloaded, else their initial.
fn show_avatar(ui: &mut egui::Ui, pictures: &HashMap<String, PictureSlot>, user: Option<&User>, name: &str) {
    let size = egui::vec2(AVATAR_SIZE, AVATAR_SIZE);
    let texture = user.and_then(|u| match pictures.get(&u.picture_url) {
        Some(PictureSlot::Ready(texture)) => Some(texture),
        _ => None,
    });

    if let Some(texture) = texture {
        let sized = egui::load::SizedTexture::new(texture.id(), size);
        ui.add(egui::Image::from_texture(sized).rounding(AVATAR_SIZE / 2.0));
        return;
    }

    let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
    let painter = ui.painter_at(rect);
    painter.circle_filled(rect.center(), AVATAR_SIZE / 2.0, egui::Color32::from_gray(160));
    let initial = name.chars().next().map(|c| c.to_uppercase().to_string()).unwrap_or_default();
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        initial,
        egui::FontId::proportional(AVATAR_SIZE * 0.5),
        egui::Color32::WHITE,
    );
}

/// Author avatar, name and age of a meme or comment.
struct Byline<'a> {
    author_id: &'a str,
    created_at: &'a str,
    now: DateTime<Utc>,
}

impl Byline<'_> {
    fn show(
        &self,
        ui: &mut egui::Ui,
        strings: &Strings,
        authors: &HashMap<String, Option<User>>,
        pictures: &HashMap<String, PictureSlot>,
    ) {
        let user = authors.get(self.author_id).and_then(Option::as_ref);
        let name = author_name(authors, self.author_id);
        ui.horizontal(|ui| {
            show_avatar(ui, pictures, user, name);
            ui.strong(name);
            ui.label(egui::RichText::new(relative_age(self.created_at, self.now, strings)).italics().weak());
        });
    }
}

/// What the comment threads need from the rest of the feed.
struct Known<'a> {
    authors: &'a HashMap<String, Option<User>>,
    pictures: &'a HashMap<String, PictureSlot>,
    current_user_id: Option<&'a str>,
    now: DateTime<Utc>,
}

fn show_thread(
    ui: &mut egui::Ui,
    strings: &Strings,
    thread: &mut CommentThread,
    meme_id: &str,
    known: &Known,
) -> Option<FeedAction> {
    let mut action = None;

    ui.horizontal(|ui| {
        if let Some(id) = known.current_user_id {
            let user = known.authors.get(id).and_then(Option::as_ref);
            show_avatar(ui, known.pictures, user, author_name(known.authors, id));
        }
        let response = ui.add(
            egui::TextEdit::singleline(&mut thread.draft)
                .hint_text(strings.comment_placeholder)
                .desired_width((ui.available_width() - 80.0).max(40.0)),
        );
        let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        let can_post = thread.posting.is_none() && !thread.draft.trim().is_empty();
        if ui.add_enabled(can_post, egui::Button::new(strings.submit)).clicked() || (enter && can_post) {
            action = Some(FeedAction::PostComment(meme_id.to_string()));
        }
    });

    for comment in &thread.comments.items {
        let byline = Byline {
            author_id: &comment.author_id,
            created_at: &comment.created_at,
            now: known.now,
        };
        byline.show(ui, strings, known.authors, known.pictures);
        ui.indent(("comment", comment.id.as_str()), |ui| {
            ui.label(egui::RichText::new(comment.content.as_str()).color(egui::Color32::from_gray(120)));
        });
    }

    if thread.loading.is_some() {
        ui.spinner();
    } else if thread.comments.has_more() && ui.small_button(strings.load_more).clicked() {
        action = Some(FeedAction::LoadMoreComments(meme_id.to_string()));
    }

    action
}
