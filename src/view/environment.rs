// environment.rs - Above/below surface state machine
//
// State is re-derived from camera height every frame with no hysteresis,
// so a camera hovering exactly at the threshold can flicker.
// Fog color eases toward the active preset; density and sun visibility
// switch immediately.

use crate::config::{EnvironmentConfig, EnvironmentPreset};
use crate::world::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum EnvironmentState {
    AboveSurface = 0,
    Underwater = 1,
}

impl EnvironmentState {
    #[inline]
    pub fn classify(camera_y: f32, depth_threshold: f32) -> Self {
        if camera_y < depth_threshold {
            EnvironmentState::Underwater
        } else {
            EnvironmentState::AboveSurface
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fog {
    pub color: Color,
    pub density: f32,
}

#[derive(Clone, Debug)]
pub struct EnvironmentController {
    state: EnvironmentState,
    fog: Fog,
    sun_visible: bool,
    config: EnvironmentConfig,
}

impl EnvironmentController {
    pub fn new(config: &EnvironmentConfig) -> Self {
        Self {
            state: EnvironmentState::AboveSurface,
            fog: Fog {
                color: config.surface.fog_color,
                density: config.initial_density,
            },
            sun_visible: true,
            config: config.clone(),
        }
    }

    /// Re-evaluate state for this frame and step the fog toward its preset.
    pub fn update(&mut self, camera_y: f32) -> EnvironmentState {
        let state = EnvironmentState::classify(camera_y, self.config.depth_threshold);
        if state != self.state {
            log::debug!("Environment {:?} -> {:?} at camera y {camera_y:.2}", self.state, state);
            self.state = state;
        }

        let preset = self.preset(state);
        let (target, density) = (preset.fog_color, preset.fog_density);
        self.fog.color = self.fog.color.lerp(target, self.config.fog_blend);
        self.fog.density = density;
        self.sun_visible = state == EnvironmentState::AboveSurface;
        state
    }

    pub fn preset(&self, state: EnvironmentState) -> &EnvironmentPreset {
        match state {
            EnvironmentState::AboveSurface => &self.config.surface,
            EnvironmentState::Underwater => &self.config.underwater,
        }
    }

    pub fn state(&self) -> EnvironmentState {
        self.state
    }

    pub fn fog(&self) -> Fog {
        self.fog
    }

    pub fn sun_visible(&self) -> bool {
        self.sun_visible
    }

    /// Camera pitch for the current state.
    pub fn camera_pitch(&self) -> f32 {
        self.preset(self.state).camera_pitch
    }
}
