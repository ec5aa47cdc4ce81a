// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Display/original coordinate mapping.
//!
//! This module provides the view state (zoom, pan, scale ratios) and the
//! transforms between on-screen display space and original-image pixel
//! space.

use crate::models::group::Point;

pub const MIN_ZOOM: f32 = 0.1;
pub const MAX_ZOOM: f32 = 3.0;

const ZOOM_IN_STEP: f32 = 1.1;
const ZOOM_OUT_STEP: f32 = 0.9;

/// Current view of the loaded image: zoom factor, pan offset in screen
/// space, and the displayed dimensions with their scale ratios back to
/// the original image. Derived state, recomputed whenever the image,
/// canvas size, or zoom changes; never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    /// Zoom factor, clamped to `[MIN_ZOOM, MAX_ZOOM]`.
    pub zoom: f32,
    /// Top-left corner of the displayed image in screen space.
    pub pan: (f32, f32),
    /// Displayed image dimensions in screen pixels.
    pub display_size: (f32, f32),
    /// Original pixels per displayed pixel (x, y).
    pub scale: (f32, f32),
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: (0.0, 0.0),
            display_size: (0.0, 0.0),
            scale: (1.0, 1.0),
        }
    }
}

impl ViewState {
    /// Recompute displayed dimensions and scale ratios.
    ///
    /// The displayed size is always derived from the original image
    /// dimensions: an aspect-preserving fit into `available * zoom`,
    /// capped at 1:1 (thumbnail semantics, never upscaled past the
    /// original resolution). Deriving from the original each time keeps
    /// repeated zooming free of compounding rounding error.
    pub fn recompute(&mut self, original: (u32, u32), available: (f32, f32)) {
        let (orig_w, orig_h) = (original.0 as f32, original.1 as f32);
        if orig_w <= 0.0 || orig_h <= 0.0 {
            return;
        }

        let box_w = (available.0 * self.zoom).max(1.0);
        let box_h = (available.1 * self.zoom).max(1.0);
        let fit = (box_w / orig_w).min(box_h / orig_h).min(1.0);

        let display_w = (orig_w * fit).max(1.0);
        let display_h = (orig_h * fit).max(1.0);
        self.display_size = (display_w, display_h);
        self.scale = (orig_w / display_w, orig_h / display_h);
    }

    /// Map a screen position to an original-image pixel.
    ///
    /// Returns `None` when the position falls outside the displayed
    /// image. That is a routine boundary state meaning "ignore this
    /// input", not an error.
    pub fn to_original(&self, screen_x: f32, screen_y: f32) -> Option<Point> {
        let px = screen_x - self.pan.0;
        let py = screen_y - self.pan.1;
        if px < 0.0 || py < 0.0 || px >= self.display_size.0 || py >= self.display_size.1 {
            return None;
        }
        Some(Point::new(
            (px * self.scale.0) as i32,
            (py * self.scale.1) as i32,
        ))
    }

    /// Map an original-image pixel back to screen space.
    ///
    /// Inverse of [`to_original`](Self::to_original) up to integer
    /// truncation; callers must tolerate ±1 px drift on round trips.
    pub fn to_display(&self, point: Point) -> (f32, f32) {
        (
            (point.x as f32 / self.scale.0).trunc() + self.pan.0,
            (point.y as f32 / self.scale.1).trunc() + self.pan.1,
        )
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * ZOOM_IN_STEP).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom * ZOOM_OUT_STEP).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Accumulate a drag delta into the pan offset. Unclamped; the
    /// image may be dragged fully out of view.
    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        self.pan.0 += dx;
        self.pan.1 += dy;
    }

    /// Center the displayed image in the available area.
    pub fn center(&mut self, available: (f32, f32)) {
        self.pan = (
            (available.0 - self.display_size.0) / 2.0,
            (available.1 - self.display_size.1) / 2.0,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(pan: (f32, f32), display_size: (f32, f32), scale: (f32, f32)) -> ViewState {
        ViewState {
            zoom: 1.0,
            pan,
            display_size,
            scale,
        }
    }

    #[test]
    fn test_click_maps_to_original_pixel() {
        // Screen (150,150) minus pan (50,50) is displayed (100,100);
        // at 2.0 scale that is original pixel (200,200).
        let v = view((50.0, 50.0), (400.0, 400.0), (2.0, 2.0));
        assert_eq!(v.to_original(150.0, 150.0), Some(Point::new(200, 200)));

        // With the image displayed at twice its original size the
        // ratio is 0.5 and the same click lands on original (50,50).
        let v = view((50.0, 50.0), (400.0, 400.0), (0.5, 0.5));
        assert_eq!(v.to_original(150.0, 150.0), Some(Point::new(50, 50)));
    }

    #[test]
    fn test_outside_display_is_none() {
        let v = view((50.0, 50.0), (200.0, 200.0), (1.0, 1.0));
        assert_eq!(v.to_original(49.0, 100.0), None);
        assert_eq!(v.to_original(100.0, 49.0), None);
        assert_eq!(v.to_original(250.0, 100.0), None);
        assert_eq!(v.to_original(100.0, 250.0), None);
        assert!(v.to_original(50.0, 50.0).is_some());
        assert!(v.to_original(249.9, 249.9).is_some());
    }

    #[test]
    fn test_round_trip_exact_at_one_to_one() {
        let mut v = ViewState::default();
        v.recompute((400, 300), (800.0, 600.0));
        assert_eq!(v.scale, (1.0, 1.0));
        v.pan_by(120.0, 40.0);

        for &(x, y) in &[(0, 0), (1, 1), (200, 150), (399, 299)] {
            let p = Point::new(x, y);
            let (sx, sy) = v.to_display(p);
            assert_eq!(v.to_original(sx, sy), Some(p));
        }
    }

    #[test]
    fn test_round_trip_bounded_drift_across_zooms() {
        let original = (1920u32, 1080u32);
        let available = (800.0f32, 500.0f32);

        for step in 0..30 {
            let mut v = ViewState {
                zoom: (MIN_ZOOM + step as f32 * 0.1).clamp(MIN_ZOOM, MAX_ZOOM),
                ..ViewState::default()
            };
            v.recompute(original, available);
            v.pan_by(33.0, -17.0);

            for &(x, y) in &[(0, 0), (17, 23), (960, 540), (1919, 1079)] {
                let p = Point::new(x, y);
                let (sx, sy) = v.to_display(p);
                let back = match v.to_original(sx, sy) {
                    Some(b) => b,
                    // Edge pixels can truncate just outside the display
                    // rect at extreme shrink factors; that is the
                    // routine out-of-bounds case, not a mapping error.
                    None => continue,
                };
                // Truncation loses sub-displayed-pixel position, so the
                // drift bound is one displayed pixel in original units.
                assert!(
                    (back.x - p.x).abs() <= v.scale.0.ceil() as i32
                        && (back.y - p.y).abs() <= v.scale.1.ceil() as i32,
                    "round trip drifted at zoom {}: {:?} -> {:?}",
                    v.zoom,
                    p,
                    back
                );
            }
        }
    }

    #[test]
    fn test_zoom_stays_clamped() {
        let mut v = ViewState::default();
        for _ in 0..100 {
            v.zoom_in();
        }
        assert!(v.zoom <= MAX_ZOOM);
        assert!((v.zoom - MAX_ZOOM).abs() < 1e-5);

        for _ in 0..200 {
            v.zoom_out();
        }
        assert!(v.zoom >= MIN_ZOOM);
        assert!((v.zoom - MIN_ZOOM).abs() < 1e-5);
    }

    #[test]
    fn test_display_size_derived_from_original() {
        // Zoom excursions do not leave residue: once the factor is back
        // to its starting value, the displayed size matches exactly,
        // because dimensions derive from the original image each time.
        let mut v = ViewState::default();
        v.recompute((1000, 800), (500.0, 500.0));
        let initial = v.display_size;

        for _ in 0..5 {
            v.zoom_out();
        }
        v.recompute((1000, 800), (500.0, 500.0));
        v.zoom = 1.0;
        v.recompute((1000, 800), (500.0, 500.0));
        assert_eq!(v.display_size, initial);
    }

    #[test]
    fn test_never_upscales_past_original() {
        let mut v = ViewState {
            zoom: MAX_ZOOM,
            ..ViewState::default()
        };
        v.recompute((100, 100), (2000.0, 2000.0));
        assert_eq!(v.display_size, (100.0, 100.0));
        assert_eq!(v.scale, (1.0, 1.0));
    }

    #[test]
    fn test_pan_accumulates_unclamped() {
        let mut v = ViewState::default();
        v.recompute((100, 100), (200.0, 200.0));
        v.pan_by(-500.0, -500.0);
        v.pan_by(-500.0, -500.0);
        assert_eq!(v.pan, (-1000.0, -1000.0));
        // Fully dragged out of view: positions over the canvas miss.
        assert_eq!(v.to_original(100.0, 100.0), None);
    }

    #[test]
    fn test_center_positions_image() {
        let mut v = ViewState::default();
        v.recompute((100, 50), (300.0, 300.0));
        v.center((300.0, 300.0));
        assert_eq!(v.pan, (100.0, 125.0));
    }
}
