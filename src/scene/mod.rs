// scene/ - Static scene graph
//
// Built once by `compose::build_scene`. Terrain, corals, lights and the
// sun marker never move; water, seaweed and fish are owned here but
// mutated only by their simulators in `sim/`.

mod compose;

pub use compose::{build_scene, compose_corals, compose_fish, compose_seaweed, seabed_texture};

use glam::Vec3;
use image::RgbaImage;

use crate::sim::{FishColor, FishSwarm, SeaweedField, WaveField};
use crate::world::{Color, PlaneMesh, TiledTexture};

/// Rotation about x that lays a local xy plane flat on world xz.
pub const PLANE_TILT: f32 = -std::f32::consts::FRAC_PI_2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub color: Color,
    pub roughness: f32,
    pub metalness: f32,
    pub opacity: f32,
}

impl Material {
    pub const fn matte(color: Color, roughness: f32) -> Self {
        Self { color, roughness, metalness: 0.0, opacity: 1.0 }
    }
}

/// Geometry the host instantiates for a primitive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Primitive {
    TorusKnot { radius: f32, tube: f32, tubular_segments: u32, radial_segments: u32 },
    Dodecahedron { radius: f32, detail: u32 },
    Cone { radius: f32, height: f32, radial_segments: u32 },
    Sphere { radius: f32, segments: u32 },
    /// Tapered stalk with its pivot at the base
    Stalk { top_radius: f32, bottom_radius: f32, height: f32, radial_segments: u32 },
}

impl Primitive {
    /// `[kind, p0, p1, p2, p3]`, parameters in declaration order, unused ones 0.
    pub fn params(&self) -> [f32; 5] {
        match *self {
            Primitive::TorusKnot { radius, tube, tubular_segments, radial_segments } => {
                [0.0, radius, tube, tubular_segments as f32, radial_segments as f32]
            }
            Primitive::Dodecahedron { radius, detail } => [1.0, radius, detail as f32, 0.0, 0.0],
            Primitive::Cone { radius, height, radial_segments } => {
                [2.0, radius, height, radial_segments as f32, 0.0]
            }
            Primitive::Sphere { radius, segments } => [3.0, radius, segments as f32, 0.0, 0.0],
            Primitive::Stalk { top_radius, bottom_radius, height, radial_segments } => {
                [4.0, top_radius, bottom_radius, height, radial_segments as f32]
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum CoralKind {
    Brain = 0,
    Sponge = 1,
    Branching = 2,
}

impl CoralKind {
    pub const ALL: [CoralKind; 3] = [CoralKind::Brain, CoralKind::Sponge, CoralKind::Branching];

    pub fn primitive(self) -> Primitive {
        match self {
            CoralKind::Brain => Primitive::TorusKnot {
                radius: 1.0,
                tube: 0.3,
                tubular_segments: 100,
                radial_segments: 16,
            },
            CoralKind::Sponge => Primitive::Dodecahedron { radius: 1.5, detail: 1 },
            CoralKind::Branching => Primitive::Cone { radius: 0.5, height: 3.0, radial_segments: 8 },
        }
    }

    pub fn material(self) -> Material {
        let hex = match self {
            CoralKind::Brain => 0xff6b6b,
            CoralKind::Sponge => 0x4ecdc4,
            CoralKind::Branching => 0xa8e6cf,
        };
        Material::matte(Color::from_hex(hex), 0.8)
    }
}

#[derive(Clone, Debug)]
pub struct Coral {
    pub kind: CoralKind,
    pub position: Vec3,
    /// Euler angles in radians, applied xyz
    pub rotation: Vec3,
    pub scale: f32,
}

#[derive(Clone, Debug)]
pub struct Seabed {
    pub mesh: PlaneMesh,
    /// World height the plane is lowered to
    pub y: f32,
    pub texture: TiledTexture,
    pub material: Material,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LightKind {
    Ambient,
    Directional { cast_shadow: bool },
    Point { range: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub color: Color,
    pub intensity: f32,
    pub position: Vec3,
}

#[derive(Clone, Debug)]
pub struct LightingRig {
    pub ambient: Light,
    pub sun: Light,
    /// Cyan bounce light from below the surface
    pub water_glow: Light,
}

impl Default for LightingRig {
    fn default() -> Self {
        Self {
            ambient: Light {
                kind: LightKind::Ambient,
                color: Color::from_hex(0x404040),
                intensity: 2.0,
                position: Vec3::ZERO,
            },
            sun: Light {
                kind: LightKind::Directional { cast_shadow: true },
                color: Color::from_hex(0xffaa00),
                intensity: 1.5,
                position: Vec3::new(0.0, 10.0, -50.0),
            },
            water_glow: Light {
                kind: LightKind::Point { range: 100.0 },
                color: Color::from_hex(0x00ffff),
                intensity: 1.0,
                position: Vec3::new(0.0, -10.0, 10.0),
            },
        }
    }
}

/// Body sphere squashed into a fish silhouette plus a flat triangular tail.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FishShape {
    pub body: Primitive,
    pub body_scale: Vec3,
    /// Tail triangle in body space: root, top tip, bottom tip
    pub tail: [Vec3; 3],
    pub roughness: f32,
    pub metalness: f32,
}

impl FishShape {
    /// Shiny body material in the fish's color. The tail shares the color.
    pub fn material(&self, color: FishColor) -> Material {
        Material {
            color: color.color(),
            roughness: self.roughness,
            metalness: self.metalness,
            opacity: 1.0,
        }
    }
}

impl Default for FishShape {
    fn default() -> Self {
        Self {
            body: Primitive::Sphere { radius: 0.5, segments: 16 },
            body_scale: Vec3::new(1.0, 0.4, 0.2),
            tail: [
                Vec3::new(-0.5, 0.0, 0.0),
                Vec3::new(-1.0, 0.3, 0.0),
                Vec3::new(-1.0, -0.3, 0.0),
            ],
            roughness: 0.4,
            metalness: 0.5,
        }
    }
}

/// Glowing sun far behind the scene. Hidden while underwater.
#[derive(Clone, Debug)]
pub struct SunMarker {
    pub position: Vec3,
    pub shape: Primitive,
    pub color: Color,
    pub glow: RgbaImage,
    pub glow_scale: f32,
    pub visible: bool,
}

#[derive(Clone, Debug)]
pub struct SceneGraph {
    pub seabed: Seabed,
    pub water: WaveField,
    pub water_material: Material,
    pub corals: Vec<Coral>,
    pub seaweed: SeaweedField,
    pub seaweed_shape: Primitive,
    pub seaweed_material: Material,
    pub fish: FishSwarm,
    pub fish_shape: FishShape,
    pub lights: LightingRig,
    pub sun: SunMarker,
}
