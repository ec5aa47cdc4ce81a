// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the rosemark application.

pub mod canvas;
pub mod sidebar;
pub mod toolbar;
