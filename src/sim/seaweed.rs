// seaweed.rs - Swaying seaweed
//
// Rotation is a pure function of time and each blade's fixed phase and
// speed, so re-evaluating any frame gives the same pose.

use glam::Vec3;

use crate::config::SeaweedConfig;

#[derive(Clone, Debug)]
pub struct Seaweed {
    pub base: Vec3,
    pub phase: f32,
    /// Multiplies both sway frequencies so neighbours drift out of step
    pub sway_speed: f32,
    pub rotation_x: f32,
    pub rotation_z: f32,
}

impl Seaweed {
    pub fn new(base: Vec3, phase: f32, sway_speed: f32) -> Self {
        Self { base, phase, sway_speed, rotation_x: 0.0, rotation_z: 0.0 }
    }
}

pub fn update_all(weeds: &mut [Seaweed], elapsed: f32, sway: &SeaweedConfig) {
    for w in weeds {
        let t = elapsed * w.sway_speed;
        w.rotation_z = (t * sway.freq_z + w.phase).sin() * sway.amp_z;
        w.rotation_x = (t * sway.freq_x + w.phase).cos() * sway.amp_x;
    }
}

#[derive(Clone, Debug)]
pub struct SeaweedField {
    pub weeds: Vec<Seaweed>,
    pub sway: SeaweedConfig,
}

impl SeaweedField {
    pub fn update(&mut self, elapsed: f32) {
        update_all(&mut self.weeds, elapsed, &self.sway);
    }
}
