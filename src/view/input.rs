// input.rs - Host signals normalized for the frame loop
//
// Scroll, pointer and viewport changes arrive between ticks. They only
// ever touch these values, never scene geometry.

use glam::Vec2;

use crate::config::CameraConfig;

/// How far through the page the viewer is, always in [0, 1].
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct ScrollProgress(f32);

impl ScrollProgress {
    pub const TOP: ScrollProgress = ScrollProgress(0.0);
    pub const BOTTOM: ScrollProgress = ScrollProgress(1.0);

    /// Clamp into [0, 1]; NaN reads as the top of the page.
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self::TOP;
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// `offset / max_extent` clamped, or 0 when the page cannot scroll.
    /// An infinite offset clamps like any other; a NaN one reads as the top.
    pub fn from_offset(offset: f32, max_extent: f32) -> Self {
        if !max_extent.is_finite() || max_extent <= 0.0 {
            return Self::TOP;
        }
        Self::new(offset / max_extent)
    }

    #[inline]
    pub fn get(self) -> f32 {
        self.0
    }
}

/// Pointer position relative to the viewport center, roughly [-0.5, 0.5].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerOffset(pub Vec2);

impl PointerOffset {
    pub fn from_client(x: f32, y: f32, viewport_w: f32, viewport_h: f32) -> Self {
        let axis = |v: f32, extent: f32| {
            if extent > 0.0 && v.is_finite() { v / extent - 0.5 } else { 0.0 }
        };
        Self(Vec2::new(axis(x, viewport_w), axis(y, viewport_h)))
    }

    #[inline]
    pub fn x(self) -> f32 {
        self.0.x
    }

    #[inline]
    pub fn y(self) -> f32 {
        self.0.y
    }
}

/// Perspective projection and drawing-buffer scale.
#[derive(Clone, Debug, PartialEq)]
pub struct Projection {
    pub fov_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub pixel_ratio: f32,
    pub width: u32,
    pub height: u32,
    max_pixel_ratio: f32,
}

impl Projection {
    pub fn new(config: &CameraConfig, width: u32, height: u32) -> Self {
        let mut p = Self {
            fov_deg: config.fov_deg,
            aspect: 1.0,
            near: config.near,
            far: config.far,
            pixel_ratio: 1.0,
            width: 0,
            height: 0,
            max_pixel_ratio: config.max_pixel_ratio,
        };
        p.resize(width, height, 1.0);
        p
    }

    /// Recompute aspect and pixel ratio for a new viewport.
    pub fn resize(&mut self, width: u32, height: u32, device_pixel_ratio: f32) {
        self.width = width;
        self.height = height;
        if height > 0 && width > 0 {
            self.aspect = width as f32 / height as f32;
        }
        self.pixel_ratio = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio.min(self.max_pixel_ratio)
        } else {
            1.0
        };
        log::debug!(
            "Viewport {width}x{height}, aspect {:.3}, pixel ratio {}",
            self.aspect,
            self.pixel_ratio
        );
    }
}
