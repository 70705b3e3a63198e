// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the MemeFactory application.

pub mod canvas;
pub mod feed;
pub mod login;
pub mod sidebar;
pub mod toolbar;
