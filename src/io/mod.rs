// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations: REST API, picture files and background work.

pub mod api;
pub mod media;
pub mod task;
