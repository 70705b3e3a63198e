// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model: captions, pictures and API payloads.

pub mod caption;
pub mod meme;
pub mod picture;
