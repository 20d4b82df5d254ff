//! Tunable scene parameters with RON persistence.
//!
//! Every count, range and preset the engine uses lives here so a page can
//! retune the journey without touching code. All structs are
//! `#[serde(default)]`: a config file only needs the values it changes.

use std::path::Path;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::world::{Color, MAX_SEGMENTS};

/// Top-level scene configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Seed for every random draw (placement, jitter, texture splats).
    pub seed: u64,
    /// One-time scene composition.
    pub composer: ComposerConfig,
    /// Seabed sand raster.
    pub texture: TextureConfig,
    /// Water surface mesh and wave shape.
    pub water: WaterConfig,
    /// Fish swimming and tail wiggle.
    pub fish: FishConfig,
    /// Seaweed sway.
    pub seaweed: SeaweedConfig,
    /// Scroll-driven camera journey.
    pub camera: CameraConfig,
    /// Above/below surface fog and lighting presets.
    pub environment: EnvironmentConfig,
}

/// Half-open sampling range `[min, max)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SampleRange {
    pub min: f32,
    pub max: f32,
}

impl SampleRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Uniform draw; a collapsed range always yields `min`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.max > self.min {
            rng.random_range(self.min..self.max)
        } else {
            self.min
        }
    }

    pub fn contains(&self, v: f32) -> bool {
        if self.max > self.min {
            v >= self.min && v < self.max
        } else {
            v == self.min
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ComposerConfig {
    pub coral_count: u32,
    pub seaweed_count: u32,
    pub fish_count: u32,
    /// World height of the seabed plane.
    pub seabed_y: f32,
    /// Side length of the square terrain plane.
    pub terrain_size: f32,
    pub terrain_segments: u32,
    /// Coral ellipse center on the (x, z) plane.
    pub coral_center: Vec2,
    /// Coral ellipse semi-axes along x and z.
    pub coral_radii: Vec2,
    /// Corals sit this far above `seabed_y`.
    pub coral_lift: f32,
    /// Seaweed spreads over `[-e, e)` on both x and z.
    pub seaweed_half_extent: f32,
    /// Fish spawn over `[-e, e)` on x (first) and z (second).
    pub fish_half_extent: Vec2,
    /// Fish spawn heights.
    pub fish_depth: SampleRange,
    pub fish_speed: SampleRange,
    pub fish_turn_rate: SampleRange,
    pub seaweed_phase: SampleRange,
    pub seaweed_speed: SampleRange,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TextureConfig {
    pub width: u32,
    pub height: u32,
    pub base: Color,
    pub accents: Vec<Color>,
    pub splat_count: u32,
    /// Splat block edge in pixels.
    pub splat_size: u32,
    /// Tiling factor on both axes.
    pub repeat: f32,
    /// Edge of the square sun glow sprite.
    pub glow_size: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WaterConfig {
    /// Side length of the square water plane.
    pub size: f32,
    /// Segments per side of the water grid.
    pub grid_resolution: u32,
    pub freq1: f32,
    pub amp1: f32,
    pub freq2: f32,
    pub rate_mul: f32,
    pub amp2: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FishConfig {
    /// Planar distance from the origin that triggers a turnaround.
    pub boundary_radius: f32,
    pub wiggle_freq: f32,
    pub wiggle_amplitude: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SeaweedConfig {
    pub freq_z: f32,
    pub amp_z: f32,
    pub freq_x: f32,
    pub amp_x: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub surface_y: f32,
    /// Total descent from `surface_y` at full scroll.
    pub depth_range: f32,
    pub surface_z: f32,
    /// Total forward travel from `surface_z` at full scroll.
    pub forward_range: f32,
    /// Fraction of the remaining distance covered per frame, in (0, 1).
    pub smoothing_factor: f32,
    pub parallax_gain: f32,
    pub tilt_gain: f32,
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    pub max_pixel_ratio: f32,
}

/// Fog and camera attitude for one environment state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EnvironmentPreset {
    pub fog_color: Color,
    pub fog_density: f32,
    pub camera_pitch: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EnvironmentConfig {
    /// Camera heights below this are underwater.
    pub depth_threshold: f32,
    /// Fraction of the remaining fog color distance covered per frame.
    pub fog_blend: f32,
    /// Fog density before the first frame runs.
    pub initial_density: f32,
    pub surface: EnvironmentPreset,
    pub underwater: EnvironmentPreset,
}

// --- Default implementations ---

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: 0x5EA_F10E,
            composer: ComposerConfig::default(),
            texture: TextureConfig::default(),
            water: WaterConfig::default(),
            fish: FishConfig::default(),
            seaweed: SeaweedConfig::default(),
            camera: CameraConfig::default(),
            environment: EnvironmentConfig::default(),
        }
    }
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            coral_count: 60,
            seaweed_count: 100,
            fish_count: 50,
            seabed_y: -30.0,
            terrain_size: 300.0,
            terrain_segments: 64,
            coral_center: Vec2::new(0.0, -10.0),
            coral_radii: Vec2::new(40.0, 30.0),
            coral_lift: 2.0,
            seaweed_half_extent: 40.0,
            fish_half_extent: Vec2::new(30.0, 20.0),
            fish_depth: SampleRange::new(-25.0, -10.0),
            fish_speed: SampleRange::new(0.05, 0.10),
            fish_turn_rate: SampleRange::new(0.03, 0.07),
            seaweed_phase: SampleRange::new(0.0, 100.0),
            seaweed_speed: SampleRange::new(0.5, 1.0),
        }
    }
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            base: Color::from_hex(0xe6ccb3),
            accents: vec![Color::from_hex(0xdcb38e), Color::from_hex(0xf0e0d0)],
            splat_count: 50_000,
            splat_size: 2,
            repeat: 8.0,
            glow_size: 128,
        }
    }
}

impl Default for WaterConfig {
    fn default() -> Self {
        Self {
            size: 300.0,
            grid_resolution: 128,
            freq1: 0.5,
            amp1: 0.5,
            freq2: 0.3,
            rate_mul: 0.8,
            amp2: 0.5,
        }
    }
}

impl Default for FishConfig {
    fn default() -> Self {
        Self {
            boundary_radius: 50.0,
            wiggle_freq: 15.0,
            wiggle_amplitude: 0.3,
        }
    }
}

impl Default for SeaweedConfig {
    fn default() -> Self {
        Self {
            freq_z: 2.0,
            amp_z: 0.1,
            freq_x: 1.5,
            amp_x: 0.1,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            surface_y: 3.0,
            depth_range: 28.0,
            surface_z: 15.0,
            forward_range: 5.0,
            smoothing_factor: 0.05,
            parallax_gain: 2.0,
            tilt_gain: 0.05,
            fov_deg: 75.0,
            near: 0.1,
            far: 200.0,
            max_pixel_ratio: 2.0,
        }
    }
}

impl Default for EnvironmentPreset {
    fn default() -> Self {
        EnvironmentConfig::default().surface
    }
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            depth_threshold: -5.0,
            fog_blend: 0.05,
            initial_density: 0.015,
            surface: EnvironmentPreset {
                fog_color: Color::from_hex(0xfeb47b),
                fog_density: 0.01,
                camera_pitch: -0.05,
            },
            underwater: EnvironmentPreset {
                fog_color: Color::from_hex(0x001e4d),
                fog_density: 0.025,
                camera_pitch: 0.1,
            },
        }
    }
}

// --- Load / Save / Validate ---

impl SceneConfig {
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = ron::from_str(text).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        let pretty = ron::ser::PrettyConfig::new().depth_limit(3);
        ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)
    }

    /// Load and validate a RON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        let config = Self::from_ron_str(&contents)?;
        log::info!("Loaded scene config from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(ConfigError::Write)?;
        }
        std::fs::write(path, self.to_ron_string()?).map_err(ConfigError::Write)
    }

    /// Reject values the per-frame math cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        let s = self.camera.smoothing_factor;
        if !(s > 0.0 && s < 1.0) {
            return invalid(format!("camera.smoothing_factor must be in (0, 1), got {s}"));
        }
        let k = self.environment.fog_blend;
        if !(k > 0.0 && k <= 1.0) {
            return invalid(format!("environment.fog_blend must be in (0, 1], got {k}"));
        }
        for (name, n) in [
            ("water.grid_resolution", self.water.grid_resolution),
            ("composer.terrain_segments", self.composer.terrain_segments),
        ] {
            if !(1..=MAX_SEGMENTS).contains(&n) {
                return invalid(format!("{name} must be in 1..={MAX_SEGMENTS}, got {n}"));
            }
        }
        if !(self.fish.boundary_radius > 0.0) {
            return invalid(format!(
                "fish.boundary_radius must be positive, got {}",
                self.fish.boundary_radius
            ));
        }
        if !(self.camera.near > 0.0 && self.camera.far > self.camera.near) {
            return invalid(format!(
                "camera clip planes need 0 < near < far, got near={} far={}",
                self.camera.near, self.camera.far
            ));
        }

        let c = &self.composer;
        for (name, r) in [
            ("fish_depth", c.fish_depth),
            ("fish_speed", c.fish_speed),
            ("fish_turn_rate", c.fish_turn_rate),
            ("seaweed_phase", c.seaweed_phase),
            ("seaweed_speed", c.seaweed_speed),
        ] {
            if r.min > r.max {
                return invalid(format!("composer.{name} has min {} > max {}", r.min, r.max));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SceneConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip() {
        let config = SceneConfig::default();
        let text = config.to_ron_string().unwrap();
        let back = SceneConfig::from_ron_str(&text).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = SceneConfig::from_ron_str("(fish: (boundary_radius: 20.0))").unwrap();
        assert_eq!(config.fish.boundary_radius, 20.0);
        assert_eq!(config.fish.wiggle_freq, FishConfig::default().wiggle_freq);
        assert_eq!(config.camera, CameraConfig::default());
    }

    #[test]
    fn test_colors_read_as_hex() {
        let config = SceneConfig::from_ron_str(
            "(environment: (underwater: (fog_color: 0x102030, fog_density: 0.5)))",
        )
        .unwrap();
        assert_eq!(config.environment.underwater.fog_color.to_hex(), 0x102030);
        assert_eq!(config.environment.underwater.fog_density, 0.5);
    }

    #[test]
    fn test_smoothing_factor_out_of_range_rejected() {
        for bad in ["0.0", "1.0", "1.5", "-0.1"] {
            let text = format!("(camera: (smoothing_factor: {bad}))");
            let err = SceneConfig::from_ron_str(&text).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_grid_resolution_too_large_rejected() {
        let mut config = SceneConfig::default();
        config.water.grid_resolution = 65_536;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("water.grid_resolution"));

        let mut config = SceneConfig::default();
        config.composer.terrain_segments = MAX_SEGMENTS + 1;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("composer.terrain_segments"));

        config.composer.terrain_segments = MAX_SEGMENTS;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_grid_rejected() {
        let err = SceneConfig::from_ron_str("(water: (grid_resolution: 0))").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = SceneConfig::from_ron_str("(composer: (fish_speed: (min: 0.2, max: 0.1)))")
            .unwrap_err();
        assert!(err.to_string().contains("fish_speed"));
    }

    #[test]
    fn test_invalid_ron_produces_parse_error() {
        let err = SceneConfig::from_ron_str("{{not valid}}").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.ron");
        let mut config = SceneConfig::default();
        config.composer.fish_count = 7;
        config.environment.depth_threshold = -8.0;

        config.save(&path).unwrap();
        let loaded = SceneConfig::load(&path).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SceneConfig::load(&dir.path().join("absent.ron")).unwrap_err();
        assert!(matches!(err, ConfigError::Read(_)));
    }

    #[test]
    fn test_sample_range_collapsed_and_bounds() {
        use rand::SeedableRng;
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(11);
        let r = SampleRange::new(0.05, 0.10);
        for _ in 0..1000 {
            assert!(r.contains(r.sample(&mut rng)));
        }
        assert_eq!(SampleRange::new(2.0, 2.0).sample(&mut rng), 2.0);
    }
}
