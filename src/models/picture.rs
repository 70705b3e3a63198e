// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Pictures and the picture-with-captions composite.
//!
//! A [`Picture`] pairs the raw file to upload with a locally generated
//! preview URL. A [`MemePicture`] binds a picture URL to its captions and is
//! what both the viewer and the editor render.

use super::caption::Caption;
use std::sync::Arc;

/// Raw picture file as selected or dropped by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PictureFile {
    pub name: String,
    pub mime: String,
    pub bytes: Arc<[u8]>,
}

impl PictureFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes: bytes.into(),
        }
    }
}

/// A selected picture and its process-local preview URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picture {
    pub url: String,
    pub file: PictureFile,
}

impl Picture {
    /// Wrap a file, generating a fresh preview URL for it.
    pub fn from_file(file: PictureFile) -> Self {
        Self {
            url: format!("blob:memefactory/{}", uuid::Uuid::new_v4()),
            file,
        }
    }
}

/// A picture URL with the captions drawn on top of it.
#[derive(Debug, Clone, PartialEq)]
pub struct MemePicture {
    pub picture_url: String,
    pub texts: Vec<Caption>,
}

/// Bind the current picture to the captions, if a picture is selected.
pub fn compose(picture: Option<&Picture>, texts: &[Caption]) -> Option<MemePicture> {
    picture.map(|picture| MemePicture {
        picture_url: picture.url.clone(),
        texts: texts.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png() -> PictureFile {
        PictureFile::new("cat.png", "image/png", vec![0x89, b'P', b'N', b'G'])
    }

    #[test]
    fn test_compose_without_picture() {
        let texts = vec![Caption::new("Hi", 1.0, 2.0)];
        assert_eq!(compose(None, &texts), None);
    }

    #[test]
    fn test_compose_with_picture() {
        let picture = Picture::from_file(png());
        let texts = vec![Caption::new("Hi", 1.0, 2.0)];

        let composite = compose(Some(&picture), &texts).unwrap();
        assert_eq!(composite.picture_url, picture.url);
        assert_eq!(composite.texts, texts);
    }

    #[test]
    fn test_preview_urls_are_unique() {
        let a = Picture::from_file(png());
        let b = Picture::from_file(png());
        assert!(a.url.starts_with("blob:memefactory/"));
        assert_ne!(a.url, b.url);
        assert_eq!(a.file, b.file);
    }
}
