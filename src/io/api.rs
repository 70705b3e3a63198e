// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! REST client for the meme backend.
//!
//! All calls are blocking and are meant to be run inside a
//! [`BackgroundTask`](super::task::BackgroundTask).

use crate::models::caption::Caption;
use crate::models::meme::{Comment, LoginResponse, Meme, Page, User};
use crate::models::picture::Picture;
use reqwest::blocking::{multipart, Client, RequestBuilder, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;

/// Description sent when the user leaves it empty.
pub const DEFAULT_DESCRIPTION: &str = "Super Meme";

/// Errors returned by the meme API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not Found")]
    NotFound,

    #[error("Unexpected status: {0}")]
    Status(u16),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The worker running the request failed before returning.
    #[error("{0}")]
    Background(String),
}

impl From<String> for ApiError {
    fn from(message: String) -> Self {
        ApiError::Background(message)
    }
}

/// Creates memes on behalf of the editor.
pub trait MemeCreator: Send + Sync {
    fn create_meme(
        &self,
        token: &str,
        picture: &Picture,
        texts: &[Caption],
        description: &str,
    ) -> Result<Meme, ApiError>;
}

/// Blocking client bound to one API base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    default_description: String,
    http: Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            default_description: DEFAULT_DESCRIPTION.to_string(),
            http: Client::new(),
        }
    }

    /// Override the description used when the user leaves it empty.
    pub fn with_default_description(mut self, description: &str) -> Self {
        self.default_description = description.to_string();
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, builder: RequestBuilder, token: &str) -> RequestBuilder {
        builder.header(reqwest::header::AUTHORIZATION, format!("Bearer {token}"))
    }

    /// Authenticate and return the JWT.
    pub fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let response = self
            .http
            .post(self.url("/authentication/login"))
            .json(&json!({ "username": username, "password": password }))
            .send()?;
        read_json(response)
    }

    pub fn get_user(&self, token: &str, id: &str) -> Result<User, ApiError> {
        let request = self.http.get(self.url(&format!("/users/{id}")));
        read_json(self.authorized(request, token).send()?)
    }

    /// Fetch one page of the meme feed (pages start at 1).
    pub fn get_memes(&self, token: &str, page: u64) -> Result<Page<Meme>, ApiError> {
        let request = self.http.get(self.url(&format!("/memes?page={page}")));
        read_json(self.authorized(request, token).send()?)
    }

    pub fn get_meme_comments(&self, token: &str, meme_id: &str, page: u64) -> Result<Page<Comment>, ApiError> {
        let request = self
            .http
            .get(self.url(&format!("/memes/{meme_id}/comments?page={page}")));
        read_json(self.authorized(request, token).send()?)
    }

    pub fn create_meme_comment(&self, token: &str, meme_id: &str, content: &str) -> Result<Comment, ApiError> {
        let request = self
            .http
            .post(self.url(&format!("/memes/{meme_id}/comments")))
            .json(&json!({ "content": content }));
        read_json(self.authorized(request, token).send()?)
    }

    /// Download raw bytes, typically a meme picture.
    pub fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let response = check_status(self.http.get(url).send()?)?;
        Ok(response.bytes()?.to_vec())
    }
}

impl MemeCreator for ApiClient {
    fn create_meme(
        &self,
        token: &str,
        picture: &Picture,
        texts: &[Caption],
        description: &str,
    ) -> Result<Meme, ApiError> {
        let file = &picture.file;
        let picture_part = multipart::Part::bytes(file.bytes.to_vec())
            .file_name(file.name.clone())
            .mime_str(&file.mime)?;

        let mut form = multipart::Form::new().part("Picture", picture_part).text(
            "Description",
            description_or_default(description, &self.default_description).to_string(),
        );
        for (name, value) in caption_form_fields(texts) {
            form = form.text(name, value);
        }

        log::info!("Uploading meme with {} captions", texts.len());
        let request = self.http.post(self.url("/memes")).multipart(form);
        read_json(self.authorized(request, token).send()?)
    }
}

/// Map a status code to the error it stands for, if any.
pub fn status_error(status: StatusCode) -> Option<ApiError> {
    match status {
        StatusCode::UNAUTHORIZED => Some(ApiError::Unauthorized),
        StatusCode::NOT_FOUND => Some(ApiError::NotFound),
        s if !s.is_success() => Some(ApiError::Status(s.as_u16())),
        _ => None,
    }
}

fn check_status(response: Response) -> Result<Response, ApiError> {
    match status_error(response.status()) {
        Some(err) => Err(err),
        None => Ok(response),
    }
}

fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    Ok(check_status(response)?.json()?)
}

fn description_or_default<'a>(description: &'a str, default: &'a str) -> &'a str {
    if description.is_empty() {
        default
    } else {
        description
    }
}

/// Multipart text fields for the captions, with floored integer positions.
pub fn caption_form_fields(texts: &[Caption]) -> Vec<(String, String)> {
    texts
        .iter()
        .enumerate()
        .flat_map(|(i, text)| {
            [
                (format!("Texts[{i}][Content]"), text.content.clone()),
                (format!("Texts[{i}][X]"), (text.x.floor() as i64).to_string()),
                (format!("Texts[{i}][Y]"), (text.y.floor() as i64).to_string()),
            ]
        })
        .collect()
}
