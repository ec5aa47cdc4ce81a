// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model for coordinate groups and history.

pub mod group;
pub mod history;
