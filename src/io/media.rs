// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Picture file loading.
//!
//! This module reads picture files picked from disk or dropped onto the
//! window, and decodes picture bytes into RGBA pixels suitable for display
//! in egui.

use crate::models::picture::PictureFile;
use anyhow::{bail, Context, Result};
use std::path::Path;
use std::sync::Arc;

/// File extensions accepted by the editor.
pub const PICTURE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Decoded picture ready to be uploaded as a texture.
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// MIME type for a picture file name, if it is a supported format.
pub fn picture_mime(name: &str) -> Option<&'static str> {
    let extension = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        _ => None,
    }
}

/// Build a picture file from a name and its bytes.
pub fn picture_from_bytes(name: &str, bytes: Arc<[u8]>) -> Result<PictureFile> {
    let Some(mime) = picture_mime(name) else {
        bail!("Unsupported picture format: {}", name);
    };
    if bytes.is_empty() {
        bail!("Picture file is empty: {}", name);
    }
    Ok(PictureFile::new(name, mime, bytes))
}

/// Read a picture file from disk.
pub fn load_picture(path: &Path) -> Result<PictureFile> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    picture_from_bytes(&name, bytes.into())
}

/// Decode picture bytes to RGBA8.
pub fn decode_image(bytes: &[u8]) -> Result<LoadedImage> {
    let img = image::load_from_memory(bytes).context("Failed to decode picture")?.to_rgba8();
    let (width, height) = img.dimensions();
    Ok(LoadedImage {
        width,
        height,
        pixels: img.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn tiny_png() -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(3, 2, image::Rgba([255, 0, 0, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_picture_mime() {
        assert_eq!(picture_mime("cat.png"), Some("image/png"));
        assert_eq!(picture_mime("CAT.JPG"), Some("image/jpeg"));
        assert_eq!(picture_mime("cat.jpeg"), Some("image/jpeg"));
        assert_eq!(picture_mime("cat.gif"), None);
        assert_eq!(picture_mime("cat"), None);
    }

    #[test]
    fn test_picture_from_bytes_rejects_unsupported() {
        assert!(picture_from_bytes("notes.txt", Arc::from(&b"hello"[..])).is_err());
        assert!(picture_from_bytes("empty.png", Arc::from(&b""[..])).is_err());
    }

    #[test]
    fn test_decode_image() {
        let bytes = tiny_png();
        let file = picture_from_bytes("red.png", bytes.clone().into()).unwrap();
        assert_eq!(file.mime, "image/png");

        let loaded = decode_image(&file.bytes).unwrap();
        assert_eq!((loaded.width, loaded.height), (3, 2));
        assert_eq!(loaded.pixels.len(), 3 * 2 * 4);
        assert_eq!(&loaded.pixels[..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(decode_image(b"definitely not a picture").is_err());
    }

    #[test]
    fn test_load_picture_from_disk() {
        let path = std::env::temp_dir().join(format!("memefactory-{}.png", std::process::id()));
        std::fs::write(&path, tiny_png()).unwrap();
        let file = load_picture(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(file.name.ends_with(".png"));
        assert_eq!(file.mime, "image/png");
        assert!(!file.bytes.is_empty());
    }
}
