// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the eframe::App trait. It owns the session, the feed and the meme
//! editor, polls their background work once per frame, and routes the
//! actions returned by the UI components back into them. A saved session is
//! restored on start and signed out when its token expires.

use crate::config::AppConfig;
use crate::editor::EditorSurface;
use crate::io::api::{ApiClient, ApiError, MemeCreator};
use crate::io::media::{self, LoadedImage, PICTURE_EXTENSIONS};
use crate::io::task::BackgroundTask;
use crate::models::meme::{LoginResponse, User};
use crate::models::picture::PictureFile;
use crate::session::{Session, SessionStatus, TokenStore, EXPIRY_WARNING_MINUTES};
use crate::strings::Strings;
use crate::ui::canvas::{self, CanvasAction, CaptionDrag};
use crate::ui::feed::Feed;
use crate::ui::login::LoginForm;
use crate::ui::sidebar::{self, SidebarAction};
use crate::ui::toolbar::{self, ToolbarAction};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;

/// How long a notification stays on screen, in seconds.
const NOTIFICATION_SECONDS: f64 = 4.0;

/// Screens available once signed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Feed,
    Create,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NotificationKind {
    Success,
    Warning,
    Error,
}

struct Notification {
    text: String,
    kind: NotificationKind,
    expires_at: f64,
}

/// Main application state.
pub struct MemeFactoryApp {
    strings: &'static Strings,
    api: ApiClient,
    creator: Arc<dyn MemeCreator>,

    session: Option<Session>,
    token_store: TokenStore,
    /// Profile of the signed-in user, once fetched
    current_user: Option<User>,
    user_task: Option<BackgroundTask<User, ApiError>>,
    /// The expiry warning was shown for the current session
    expiry_warned: bool,
    screen: Screen,

    login: LoginForm,
    login_task: Option<BackgroundTask<LoginResponse, ApiError>>,

    feed: Feed,

    editor: EditorSurface,
    /// Caption being dragged on the editor canvas
    caption_drag: Option<CaptionDrag>,
    /// Picture previews keyed by their local URL
    previews: HashMap<String, egui::TextureHandle>,
    /// Pending preview decode with the URL it belongs to
    preview_task: Option<(String, BackgroundTask<LoadedImage>)>,

    notification: Option<Notification>,
}

impl MemeFactoryApp {
    /// Create a new application instance.
    pub fn new(config: &AppConfig) -> Self {
        let api = ApiClient::new(&config.api_base_url).with_default_description(&config.default_description);
        log::info!("Using API at {}", config.api_base_url);

        let mut app = Self {
            strings: config.language().strings(),
            creator: Arc::new(api.clone()),
            api,
            session: None,
            token_store: config.token_store(),
            current_user: None,
            user_task: None,
            expiry_warned: false,
            screen: Screen::Feed,
            login: LoginForm::default(),
            login_task: None,
            feed: Feed::default(),
            editor: EditorSurface::new(),
            caption_drag: None,
            previews: HashMap::new(),
            preview_task: None,
            notification: None,
        };
        app.restore_session();
        app
    }

    fn notify(&mut self, ctx: &egui::Context, text: &str, kind: NotificationKind) {
        let now = ctx.input(|i| i.time);
        self.notification = Some(Notification {
            text: text.to_string(),
            kind,
            expires_at: now + NOTIFICATION_SECONDS,
        });
    }

    /// Resume the session saved by a previous run, if it is still valid.
    fn restore_session(&mut self) {
        let Some(token) = self.token_store.load() else {
            return;
        };
        match Session::from_token(token) {
            Ok(session) if session.status(Utc::now()) != SessionStatus::Expired => {
                log::info!("Restored session of user {}", session.user_id);
                self.begin_session(session);
            }
            Ok(_) => {
                log::info!("Saved session has expired");
                self.token_store.clear();
            }
            Err(e) => {
                log::warn!("Discarding saved session: {:#}", e);
                self.token_store.clear();
            }
        }
    }

    fn start_login(&mut self) {
        let username = self.login.username.trim().to_string();
        let password = self.login.password.clone();
        let api = self.api.clone();
        self.login_task = Some(BackgroundTask::spawn(move || api.login(&username, &password)));
    }

    fn begin_session(&mut self, session: Session) {
        self.token_store.save(&session.token);
        let (api, token, id) = (self.api.clone(), session.token.clone(), session.user_id.clone());
        self.user_task = Some(BackgroundTask::spawn(move || api.get_user(&token, &id)));
        self.session = Some(session);
        self.current_user = None;
        self.expiry_warned = false;
        self.login = LoginForm::default();
        self.navigate(Screen::Feed);
    }

    fn sign_out(&mut self) {
        if let Some(session) = self.session.take() {
            log::info!("Signed out user {}", session.user_id);
        }
        self.token_store.clear();
        self.current_user = None;
        self.user_task = None;
        self.leave_editor();
        self.feed = Feed::default();
        self.login = LoginForm::default();
        self.screen = Screen::Feed;
    }

    /// Warn shortly before the token expires and sign out once it has.
    fn check_expiry(&mut self, ctx: &egui::Context) {
        let Some(session) = &self.session else {
            return;
        };
        let now = Utc::now();
        let next_change = session.next_change(now);
        match session.status(now) {
            SessionStatus::Expired => {
                log::info!("Session expired");
                self.sign_out();
                self.notify(ctx, self.strings.session_expired, NotificationKind::Warning);
                return;
            }
            SessionStatus::ExpiringSoon if !self.expiry_warned => {
                self.expiry_warned = true;
                let text = self.strings.session_expiring_in(EXPIRY_WARNING_MINUTES);
                self.notify(ctx, &text, NotificationKind::Warning);
            }
            _ => {}
        }
        if let Some(wait) = next_change {
            ctx.request_repaint_after(wait);
        }
    }

    fn navigate(&mut self, screen: Screen) {
        if self.screen == Screen::Create && screen != Screen::Create {
            self.leave_editor();
        }
        if screen == Screen::Feed {
            if let Some(session) = &self.session {
                self.feed.refresh(&self.api, &session.token);
            }
        }
        self.screen = screen;
    }

    /// Discard the editor and release its picture preview.
    fn leave_editor(&mut self) {
        if let Some(url) = self.editor.reset() {
            self.previews.remove(&url);
        }
        self.preview_task = None;
        self.caption_drag = None;
    }

    /// Put a new picture in the editor and start decoding its preview.
    fn select_picture(&mut self, file: PictureFile) {
        if let Some(old_url) = self.editor.on_drop(file) {
            self.previews.remove(&old_url);
        }
        let Some(picture) = self.editor.picture() else {
            return;
        };
        let bytes = picture.file.bytes.clone();
        self.preview_task = Some((
            picture.url.clone(),
            BackgroundTask::spawn(move || media::decode_image(&bytes).map_err(|e| e.to_string())),
        ));
    }

    fn open_picture_dialog(&mut self, ctx: &egui::Context) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", PICTURE_EXTENSIONS)
            .pick_file()
        else {
            return;
        };
        match media::load_picture(&path) {
            Ok(file) => self.select_picture(file),
            Err(e) => {
                log::warn!("Rejected picture {}: {:#}", path.display(), e);
                self.notify(ctx, self.strings.unsupported_picture, NotificationKind::Error);
            }
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let Some(file) = dropped.into_iter().next() else {
            return;
        };

        let result = match (&file.bytes, &file.path) {
            (Some(bytes), _) => media::picture_from_bytes(&file.name, bytes.clone()),
            (None, Some(path)) => media::load_picture(path),
            (None, None) => Err(anyhow::anyhow!("Dropped file has no content")),
        };
        match result {
            Ok(picture) => self.select_picture(picture),
            Err(e) => {
                log::warn!("Rejected dropped file: {:#}", e);
                self.notify(ctx, self.strings.unsupported_picture, NotificationKind::Error);
            }
        }
    }

    /// Pick up results of background work.
    fn poll_tasks(&mut self, ctx: &egui::Context) {
        if let Some(result) = self.login_task.as_ref().and_then(BackgroundTask::try_take) {
            self.login_task = None;
            match result.map(|response| Session::from_token(response.jwt)) {
                Ok(Ok(session)) => {
                    log::info!("Signed in as user {}", session.user_id);
                    self.begin_session(session);
                }
                Ok(Err(e)) => {
                    log::error!("Login returned an unusable token: {:#}", e);
                    self.login.error = Some(self.strings.generic_error.to_string());
                }
                Err(ApiError::Unauthorized) => {
                    self.login.error = Some(self.strings.wrong_credentials.to_string());
                }
                Err(e) => {
                    log::error!("Login failed: {}", e);
                    self.login.error = Some(self.strings.generic_error.to_string());
                }
            }
        }

        if let Some(result) = self.user_task.as_ref().and_then(BackgroundTask::try_take) {
            self.user_task = None;
            match result {
                Ok(user) => {
                    log::info!("Signed in user is {}", user.username);
                    self.feed.remember_user(&self.api, user.clone());
                    self.current_user = Some(user);
                }
                Err(ApiError::Unauthorized) => {
                    log::warn!("Session rejected by the API");
                    self.sign_out();
                    return;
                }
                Err(e) => log::warn!("Failed to load the signed-in user: {}", e),
            }
        }

        if let Some(session) = &self.session {
            if let Err(e) = self.feed.poll(ctx, &self.api, &session.token) {
                log::warn!("Session rejected by the API: {}", e);
                self.sign_out();
                return;
            }
        }

        if let Some(result) = self.editor.poll_submission() {
            match result {
                Ok(_) => {
                    self.notify(ctx, self.strings.created, NotificationKind::Success);
                    self.navigate(Screen::Feed);
                }
                Err(_) => self.notify(ctx, self.strings.generic_error, NotificationKind::Error),
            }
        }

        if let Some(result) = self.preview_task.as_ref().and_then(|(_, task)| task.try_take()) {
            let url = self.preview_task.take().map(|(url, _)| url).unwrap_or_default();
            let current = self.editor.picture().is_some_and(|p| p.url == url);
            match result {
                Ok(image) if current => {
                    let size = [image.width as usize, image.height as usize];
                    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &image.pixels);
                    let texture = ctx.load_texture(url.as_str(), color_image, egui::TextureOptions::LINEAR);
                    log::info!("Loaded picture preview ({}x{})", image.width, image.height);
                    self.previews.insert(url, texture);
                }
                Ok(_) => log::debug!("Dropping preview of replaced picture {}", url),
                Err(e) => {
                    log::error!("Failed to decode picture: {}", e);
                    self.notify(ctx, self.strings.unsupported_picture, NotificationKind::Error);
                }
            }
        }

        if self.login_task.is_some()
            || self.user_task.is_some()
            || self.preview_task.is_some()
            || self.editor.is_submitting()
        {
            ctx.request_repaint();
        }
    }

    fn show_editor(&mut self, ctx: &egui::Context) {
        let strings = self.strings;

        let sidebar_action = egui::SidePanel::right("captions")
            .default_width(280.0)
            .min_width(250.0)
            .show(ctx, |ui| {
                sidebar::show(
                    ui,
                    strings,
                    self.editor.texts(),
                    self.editor.picture().is_some(),
                    self.editor.is_submitting(),
                )
            })
            .inner;

        match sidebar_action {
            SidebarAction::AddCaption => {
                self.editor.add_caption(|n| strings.default_caption(n));
            }
            SidebarAction::DeleteCaption(index) => {
                self.caption_drag = None;
                self.editor.delete_caption(index);
            }
            SidebarAction::EditCaption(index, content) => self.editor.edit_caption(index, &content),
            SidebarAction::EndEdit => self.editor.end_edit(),
            SidebarAction::Cancel => self.navigate(Screen::Feed),
            SidebarAction::Submit => {
                if let Some(session) = &self.session {
                    self.editor.submit(&session.token, self.creator.clone());
                }
            }
            SidebarAction::None => {}
        }

        let mut open_dialog = false;
        let canvas_action = egui::CentralPanel::default()
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        ui.heading(strings.upload_picture);
                        ui.add_space(8.0);

                        let action = match self.editor.composite() {
                            Some(meme) => {
                                let texture = self.previews.get(&meme.picture_url);
                                let action = canvas::show(ui, &meme, texture, Some(&mut self.caption_drag));
                                if ui.button(strings.change_picture).clicked() {
                                    open_dialog = true;
                                }
                                action
                            }
                            None => {
                                if canvas::show_placeholder(ui, strings).clicked() {
                                    open_dialog = true;
                                }
                                CanvasAction::None
                            }
                        };

                        ui.add_space(16.0);
                        ui.heading(strings.describe_meme);
                        ui.add_space(8.0);
                        ui.add(
                            egui::TextEdit::multiline(self.editor.description_mut())
                                .hint_text(strings.describe_meme_placeholder)
                                .desired_width(f32::INFINITY)
                                .desired_rows(4),
                        );

                        action
                    })
                    .inner
            })
            .inner;

        if let CanvasAction::DragStopped {
            index,
            position,
            scale_factor,
        } = canvas_action
        {
            self.editor.drag_caption(index, position, scale_factor);
        }

        if open_dialog {
            self.open_picture_dialog(ctx);
        }
    }

    fn handle_editor_shortcuts(&mut self, ctx: &egui::Context) {
        // Leave text fields their own undo.
        if ctx.wants_keyboard_input() {
            return;
        }
        if ctx.input(|i| {
            (i.modifiers.command && i.modifiers.shift && i.key_pressed(egui::Key::Z))
                || (i.modifiers.command && i.key_pressed(egui::Key::Y))
        }) {
            if self.editor.can_redo() {
                self.editor.redo();
            }
        } else if ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::Z)) && self.editor.can_undo() {
            self.editor.undo();
        }
    }

    fn show_notification(&mut self, ctx: &egui::Context) {
        let now = ctx.input(|i| i.time);
        if self.notification.as_ref().is_some_and(|n| n.expires_at <= now) {
            self.notification = None;
        }
        let Some(notification) = &self.notification else {
            return;
        };

        egui::TopBottomPanel::bottom("notification").show(ctx, |ui| {
            let color = match notification.kind {
                NotificationKind::Success => egui::Color32::from_rgb(40, 170, 90),
                NotificationKind::Warning => egui::Color32::from_rgb(220, 150, 30),
                NotificationKind::Error => egui::Color32::from_rgb(220, 60, 60),
            };
            ui.colored_label(color, notification.text.as_str());
        });
        ctx.request_repaint_after(std::time::Duration::from_secs_f64((notification.expires_at - now).max(0.0)));
    }
}

impl eframe::App for MemeFactoryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_tasks(ctx);
        self.check_expiry(ctx);
        self.show_notification(ctx);

        if self.session.is_none() {
            let pending = self.login_task.is_some();
            let submitted = egui::CentralPanel::default()
                .show(ctx, |ui| self.login.show(ui, self.strings, pending))
                .inner;
            if submitted {
                self.start_login();
            }
            return;
        }
        let username = self.current_user.as_ref().map(|u| u.username.clone()).unwrap_or_default();

        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| toolbar::show(ui, self.strings, self.screen, &username))
            .inner;
        match toolbar_action {
            ToolbarAction::Navigate(screen) => self.navigate(screen),
            ToolbarAction::SignOut => {
                self.sign_out();
                return;
            }
            ToolbarAction::None => {}
        }

        match self.screen {
            Screen::Feed => {
                let feed_action = egui::CentralPanel::default()
                    .show(ctx, |ui| self.feed.show(ui, self.strings))
                    .inner;
                if let Some(session) = &self.session {
                    self.feed.handle(feed_action, &self.api, &session.token);
                }
            }
            Screen::Create => {
                self.handle_dropped_files(ctx);
                self.handle_editor_shortcuts(ctx);
                self.show_editor(ctx);
            }
        }
    }
}
