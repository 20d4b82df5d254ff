// compose.rs - One-time scene construction
//
// Every placement draw comes from the injected RNG, so a fixed seed
// reproduces the same reef.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use rand::Rng;

use super::{
    Coral, CoralKind, FishShape, LightingRig, Material, Primitive, SceneGraph, Seabed, SunMarker,
};
use crate::config::{ComposerConfig, SampleRange, SceneConfig, TextureConfig};
use crate::error::SceneError;
use crate::sim::{Fish, FishBody, FishColor, FishSwarm, Seaweed, SeaweedField, TailFin, WaveField, Wiggle};
use crate::world::{Color, TiledTexture, terrain, texture};

const SUN_POSITION: Vec3 = Vec3::new(0.0, 10.0, -80.0);
const SUN_RADIUS: f32 = 20.0;
const SUN_GLOW_SCALE: f32 = 100.0;

/// Build the whole scene. Fails only if a raster cannot be acquired.
pub fn build_scene<R: Rng + ?Sized>(config: &SceneConfig, rng: &mut R) -> Result<SceneGraph, SceneError> {
    config.validate()?;
    let c = &config.composer;

    let seabed = Seabed {
        mesh: terrain::dune_mesh(c.terrain_size, c.terrain_size, c.terrain_segments),
        y: c.seabed_y,
        texture: seabed_texture(&config.texture, rng)?,
        material: Material::matte(Color::from_hex(0xddccbb), 1.0),
    };

    let sun = SunMarker {
        position: SUN_POSITION,
        shape: Primitive::Sphere { radius: SUN_RADIUS, segments: 32 },
        color: Color::from_hex(0xffaa00),
        glow: texture::radial_glow(config.texture.glow_size, &texture::SUN_GLOW_STOPS)?,
        glow_scale: SUN_GLOW_SCALE,
        visible: true,
    };

    let scene = SceneGraph {
        seabed,
        water: WaveField::new(&config.water),
        water_material: Material {
            color: Color::from_hex(0x0077be),
            roughness: 0.2,
            metalness: 0.1,
            opacity: 0.8,
        },
        corals: compose_corals(c, rng),
        seaweed: SeaweedField {
            weeds: compose_seaweed(c, rng),
            sway: config.seaweed.clone(),
        },
        seaweed_shape: Primitive::Stalk {
            top_radius: 0.05,
            bottom_radius: 0.1,
            height: 3.0,
            radial_segments: 4,
        },
        seaweed_material: Material::matte(Color::from_hex(0x2ab7ca), 1.0),
        fish: FishSwarm {
            fish: compose_fish(c, rng),
            boundary_radius: config.fish.boundary_radius,
            wiggle: Wiggle {
                freq: config.fish.wiggle_freq,
                amplitude: config.fish.wiggle_amplitude,
            },
        },
        fish_shape: FishShape::default(),
        lights: LightingRig::default(),
        sun,
    };

    log::info!(
        "Composed scene: {} corals, {} seaweed, {} fish, water grid {}x{}",
        scene.corals.len(),
        scene.seaweed.weeds.len(),
        scene.fish.len(),
        scene.water.mesh.seg_w,
        scene.water.mesh.seg_h,
    );

    Ok(scene)
}

/// Sand raster wrapped as a repeating texture.
pub fn seabed_texture<R: Rng + ?Sized>(
    config: &TextureConfig,
    rng: &mut R,
) -> Result<TiledTexture, SceneError> {
    let image = texture::synthesize_sized(
        config.width,
        config.height,
        config.base,
        &config.accents,
        config.splat_count,
        config.splat_size,
        rng,
    )?;
    Ok(TiledTexture { image, repeat: config.repeat })
}

/// Corals spread uniformly over an ellipse on the seabed.
pub fn compose_corals<R: Rng + ?Sized>(c: &ComposerConfig, rng: &mut R) -> Vec<Coral> {
    (0..c.coral_count)
        .map(|_| {
            // sqrt keeps the density uniform over the ellipse area
            let r = rng.random::<f32>().sqrt();
            let a = rng.random::<f32>() * TAU;
            let x = c.coral_center.x + c.coral_radii.x * r * a.cos();
            let z = c.coral_center.y + c.coral_radii.y * r * a.sin();

            let kind = CoralKind::ALL[rng.random_range(0..CoralKind::ALL.len())];
            let rotation = Vec3::new(
                rng.random::<f32>() * PI,
                rng.random::<f32>() * PI,
                rng.random::<f32>() * PI,
            );
            let scale = rng.random_range(0.5..1.5);

            Coral {
                kind,
                position: Vec3::new(x, c.seabed_y + c.coral_lift, z),
                rotation,
                scale,
            }
        })
        .collect()
}

pub fn compose_seaweed<R: Rng + ?Sized>(c: &ComposerConfig, rng: &mut R) -> Vec<Seaweed> {
    let spread = SampleRange::new(-c.seaweed_half_extent, c.seaweed_half_extent);
    (0..c.seaweed_count)
        .map(|_| {
            let base = Vec3::new(spread.sample(rng), c.seabed_y, spread.sample(rng));
            Seaweed::new(base, c.seaweed_phase.sample(rng), c.seaweed_speed.sample(rng))
        })
        .collect()
}

pub fn compose_fish<R: Rng + ?Sized>(c: &ComposerConfig, rng: &mut R) -> Vec<Fish> {
    let spread_x = SampleRange::new(-c.fish_half_extent.x, c.fish_half_extent.x);
    let spread_z = SampleRange::new(-c.fish_half_extent.y, c.fish_half_extent.y);
    (0..c.fish_count)
        .map(|_| {
            let position = Vec3::new(
                spread_x.sample(rng),
                c.fish_depth.sample(rng),
                spread_z.sample(rng),
            );
            let color = if rng.random_bool(0.5) { FishColor::Gold } else { FishColor::Red };
            Fish {
                body: FishBody {
                    position,
                    heading: rng.random_range(0.0..TAU),
                    speed: c.fish_speed.sample(rng),
                    turn_rate: c.fish_turn_rate.sample(rng),
                    color,
                },
                tail: TailFin::default(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TextureError;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn small_config() -> SceneConfig {
        let mut config = SceneConfig::default();
        config.texture.width = 64;
        config.texture.height = 64;
        config.texture.splat_count = 300;
        config.texture.glow_size = 32;
        config.water.grid_resolution = 16;
        config.composer.terrain_segments = 8;
        config
    }

    #[test]
    fn test_counts_follow_config() {
        let mut config = small_config();
        config.composer.coral_count = 12;
        config.composer.seaweed_count = 7;
        config.composer.fish_count = 3;
        let scene = build_scene(&config, &mut ChaCha8Rng::seed_from_u64(1)).unwrap();
        assert_eq!(scene.corals.len(), 12);
        assert_eq!(scene.seaweed.weeds.len(), 7);
        assert_eq!(scene.fish.len(), 3);
        assert_eq!(scene.water.mesh.vertex_count(), 17 * 17);
        assert!(scene.sun.visible);
    }

    #[test]
    fn test_corals_inside_ellipse_with_valid_transforms() {
        let c = ComposerConfig { coral_count: 500, ..Default::default() };
        let corals = compose_corals(&c, &mut ChaCha8Rng::seed_from_u64(2));
        for coral in &corals {
            let dx = (coral.position.x - c.coral_center.x) / c.coral_radii.x;
            let dz = (coral.position.z - c.coral_center.y) / c.coral_radii.y;
            assert!(dx * dx + dz * dz <= 1.0 + 1e-5, "coral outside ellipse: {:?}", coral.position);
            assert_eq!(coral.position.y, c.seabed_y + c.coral_lift);
            assert!((0.5..1.5).contains(&coral.scale));
            for angle in coral.rotation.to_array() {
                assert!((0.0..=PI).contains(&angle));
            }
        }
        for kind in CoralKind::ALL {
            assert!(corals.iter().any(|c| c.kind == kind), "{kind:?} never chosen");
        }
    }

    #[test]
    fn test_fish_spawn_within_volume_and_ranges() {
        let c = ComposerConfig { fish_count: 300, ..Default::default() };
        let fish = compose_fish(&c, &mut ChaCha8Rng::seed_from_u64(3));
        for f in &fish {
            let b = &f.body;
            assert!(b.position.x.abs() <= c.fish_half_extent.x);
            assert!(b.position.z.abs() <= c.fish_half_extent.y);
            assert!(c.fish_depth.contains(b.position.y));
            assert!(b.position.y > c.seabed_y, "fish spawned below the seabed");
            assert!((0.0..TAU).contains(&b.heading));
            assert!(c.fish_speed.contains(b.speed));
            assert!(c.fish_turn_rate.contains(b.turn_rate));
        }
        assert!(fish.iter().any(|f| f.body.color == FishColor::Gold));
        assert!(fish.iter().any(|f| f.body.color == FishColor::Red));
    }

    #[test]
    fn test_seaweed_rooted_on_seabed_with_distinct_phases() {
        let c = ComposerConfig::default();
        let weeds = compose_seaweed(&c, &mut ChaCha8Rng::seed_from_u64(4));
        for w in &weeds {
            assert_eq!(w.base.y, c.seabed_y);
            assert!(w.base.x.abs() <= c.seaweed_half_extent && w.base.z.abs() <= c.seaweed_half_extent);
            assert!(c.seaweed_speed.contains(w.sway_speed));
        }
        let first = weeds[0].phase;
        assert!(weeds.iter().any(|w| w.phase != first), "phases should differ");
    }

    #[test]
    fn test_same_seed_same_scene() {
        let config = small_config();
        let a = build_scene(&config, &mut ChaCha8Rng::seed_from_u64(99)).unwrap();
        let b = build_scene(&config, &mut ChaCha8Rng::seed_from_u64(99)).unwrap();
        assert_eq!(a.seabed.texture.bytes(), b.seabed.texture.bytes());
        for (x, y) in a.fish.fish.iter().zip(&b.fish.fish) {
            assert_eq!(x.body.position, y.body.position);
            assert_eq!(x.body.heading, y.body.heading);
        }
    }

    #[test]
    fn test_texture_failure_aborts_scene() {
        let mut config = small_config();
        config.texture.width = 0;
        let err = build_scene(&config, &mut ChaCha8Rng::seed_from_u64(0)).unwrap_err();
        assert!(matches!(
            err,
            SceneError::Texture(TextureError::EmptyRaster { width: 0, .. })
        ));
    }

    #[test]
    fn test_terrain_uses_dune_elevation() {
        let scene = build_scene(&small_config(), &mut ChaCha8Rng::seed_from_u64(5)).unwrap();
        let mesh = &scene.seabed.mesh;
        for i in 0..mesh.vertex_count() {
            let p = mesh.position(i);
            assert!((p.z - terrain::elevation(p.x, p.y)).abs() < 1e-5);
        }
        assert_eq!(scene.seabed.y, -30.0);
        assert_eq!(scene.seabed.texture.repeat, 8.0);
    }
}
