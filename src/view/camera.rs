// camera.rs - Scroll-driven camera journey
//
// Scroll progress picks a target on the line from the surface viewpoint
// to the seabed viewpoint; the camera chases it with a one-pole low-pass
// so abrupt scrolls never make it jump.

use glam::Vec3;

use super::input::{PointerOffset, ScrollProgress};
use crate::config::CameraConfig;

#[derive(Clone, Debug)]
pub struct CameraRig {
    /// Smoothed position actually rendered
    pub position: Vec3,
    /// Where the current inputs want the camera to be
    pub target: Vec3,
    /// Rotation about x, radians
    pub pitch: f32,
    config: CameraConfig,
}

impl CameraRig {
    pub fn new(config: &CameraConfig) -> Self {
        let start = Vec3::new(0.0, config.surface_y, config.surface_z);
        Self {
            position: start,
            target: start,
            pitch: 0.0,
            config: config.clone(),
        }
    }

    /// Target height and depth-axis position for a scroll progress.
    pub fn target_yz(&self, progress: ScrollProgress) -> (f32, f32) {
        let p = progress.get();
        (
            self.config.surface_y - p * self.config.depth_range,
            self.config.surface_z - p * self.config.forward_range,
        )
    }

    pub fn update(&mut self, progress: ScrollProgress, pointer: PointerOffset) {
        let (y, z) = self.target_yz(progress);
        self.target = Vec3::new(pointer.x() * self.config.parallax_gain, y, z);
        self.position += (self.target - self.position) * self.config.smoothing_factor;
    }

    /// Pitch is set directly, not smoothed.
    pub fn apply_pitch(&mut self, base_pitch: f32, pointer: PointerOffset) {
        self.pitch = base_pitch + pointer.y() * self.config.tilt_gain;
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }
}
