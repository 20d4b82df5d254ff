// render.rs - Encode frame state to flat output buffers
//
// Output encoding (f32 unless noted, read by the canvas host):
//   camera     = [x, y, z, pitch, fov_deg, aspect, near, far]
//   environment= [fog_r, fog_g, fog_b, fog_density, sun_visible, state]
//   fish       = stride 5: [x, y, z, body_yaw, tail_yaw]
//   seaweed    = stride 2: [rot_x, rot_z]
//   water      = live plane positions, stride 3 in plane space
// Static, written once at construction:
//   corals     = stride 8: [archetype, x, y, z, rot_x, rot_y, rot_z, scale]
//   bases      = stride 3: seaweed root [x, y, z]
//   fish_slots = u8 material slot per fish
//   terrain    = positions / normals (stride 3), indices (u32)
//   water_mesh = normals (stride 3), indices (u32)
//   planes     = [plane_tilt, seabed_y]
//   lights     = stride 9: [kind, r, g, b, intensity, x, y, z, extra]
//                kind 0 ambient, 1 directional (extra = casts shadow),
//                2 point (extra = range)
//   materials  = stride 6: [r, g, b, roughness, metalness, opacity], by slot
//   shapes     = stride 5: Primitive::params, by slot
//   fish_form  = [body_scale xyz, tail root xyz, tail top xyz, tail bottom xyz]
//   sun        = [x, y, z, r, g, b, glow_scale]
//   texture    = seabed RGBA8, glow = sun sprite RGBA8 (u8, read from the scene)

use crate::frame::{FrameView, Renderer};
use crate::scene::{CoralKind, Light, LightKind, Material, PLANE_TILT, SceneGraph};
use crate::sim::FishColor;

pub const CAMERA_LEN: usize = 8;
pub const ENV_LEN: usize = 6;
pub const FISH_STRIDE: usize = 5;
pub const SEAWEED_STRIDE: usize = 2;
pub const CORAL_STRIDE: usize = 8;
pub const BASE_STRIDE: usize = 3;
pub const LIGHT_STRIDE: usize = 9;
pub const MATERIAL_STRIDE: usize = 6;
pub const SHAPE_STRIDE: usize = 5;
pub const PLANES_LEN: usize = 2;
pub const FISH_FORM_LEN: usize = 12;
pub const SUN_LEN: usize = 7;

// Material slots
pub const MAT_SEABED: usize = 0;
pub const MAT_WATER: usize = 1;
/// Corals use `MAT_CORAL + archetype`
pub const MAT_CORAL: usize = 2;
pub const MAT_SEAWEED: usize = 5;
pub const MAT_FISH_GOLD: usize = 6;
pub const MAT_FISH_RED: usize = 7;
pub const MATERIAL_SLOTS: usize = 8;

// Shape slots
/// Corals use `SHAPE_CORAL + archetype`
pub const SHAPE_CORAL: usize = 0;
pub const SHAPE_SEAWEED: usize = 3;
pub const SHAPE_FISH_BODY: usize = 4;
pub const SHAPE_SUN: usize = 5;
pub const SHAPE_SLOTS: usize = 6;

pub struct FrameEncoder {
    camera: [f32; CAMERA_LEN],
    env: [f32; ENV_LEN],
    fish: Vec<f32>,
    seaweed: Vec<f32>,
    water: Vec<f32>,
    corals: Vec<f32>,
    bases: Vec<f32>,
    fish_slots: Vec<u8>,
    terrain_positions: Vec<f32>,
    terrain_normals: Vec<f32>,
    terrain_indices: Vec<u32>,
    water_normals: Vec<f32>,
    water_indices: Vec<u32>,
    planes: [f32; PLANES_LEN],
    lights: Vec<f32>,
    materials: Vec<f32>,
    shapes: Vec<f32>,
    fish_form: [f32; FISH_FORM_LEN],
    sun: [f32; SUN_LEN],
    draws: u64,
}

impl FrameEncoder {
    /// Size the per-frame buffers and write the static ones.
    pub fn new(scene: &SceneGraph) -> Self {
        let mut corals = Vec::with_capacity(scene.corals.len() * CORAL_STRIDE);
        for c in &scene.corals {
            corals.extend_from_slice(&[
                c.kind as u8 as f32,
                c.position.x,
                c.position.y,
                c.position.z,
                c.rotation.x,
                c.rotation.y,
                c.rotation.z,
                c.scale,
            ]);
        }

        let bases = scene
            .seaweed
            .weeds
            .iter()
            .flat_map(|w| w.base.to_array())
            .collect();

        let fish_slots = scene
            .fish
            .fish
            .iter()
            .map(|f| match f.body.color {
                FishColor::Gold => MAT_FISH_GOLD as u8,
                FishColor::Red => MAT_FISH_RED as u8,
            })
            .collect();

        let lights = [&scene.lights.ambient, &scene.lights.sun, &scene.lights.water_glow]
            .into_iter()
            .flat_map(encode_light)
            .collect();

        let seabed = &scene.seabed;
        let water = &scene.water.mesh;
        let sun = &scene.sun;
        let form = &scene.fish_shape;
        let mut fish_form = [0.0; FISH_FORM_LEN];
        fish_form[..3].copy_from_slice(&form.body_scale.to_array());
        for (dst, v) in fish_form[3..].chunks_exact_mut(3).zip(form.tail) {
            dst.copy_from_slice(&v.to_array());
        }

        Self {
            camera: [0.0; CAMERA_LEN],
            env: [0.0; ENV_LEN],
            fish: vec![0.0; scene.fish.len() * FISH_STRIDE],
            seaweed: vec![0.0; scene.seaweed.weeds.len() * SEAWEED_STRIDE],
            water: water.positions.clone(),
            corals,
            bases,
            fish_slots,
            terrain_positions: seabed.mesh.positions.clone(),
            terrain_normals: seabed.mesh.normals.clone(),
            terrain_indices: seabed.mesh.indices.clone(),
            water_normals: water.normals.clone(),
            water_indices: water.indices.clone(),
            planes: [PLANE_TILT, seabed.y],
            lights,
            materials: material_table(scene),
            shapes: shape_table(scene),
            fish_form,
            sun: [
                sun.position.x,
                sun.position.y,
                sun.position.z,
                sun.color.r,
                sun.color.g,
                sun.color.b,
                sun.glow_scale,
            ],
            draws: 0,
        }
    }

    pub fn camera(&self) -> &[f32] {
        &self.camera
    }

    pub fn env(&self) -> &[f32] {
        &self.env
    }

    pub fn fish(&self) -> &[f32] {
        &self.fish
    }

    pub fn seaweed(&self) -> &[f32] {
        &self.seaweed
    }

    pub fn water(&self) -> &[f32] {
        &self.water
    }

    pub fn corals(&self) -> &[f32] {
        &self.corals
    }

    pub fn bases(&self) -> &[f32] {
        &self.bases
    }

    pub fn fish_slots(&self) -> &[u8] {
        &self.fish_slots
    }

    pub fn terrain_positions(&self) -> &[f32] {
        &self.terrain_positions
    }

    pub fn terrain_normals(&self) -> &[f32] {
        &self.terrain_normals
    }

    pub fn terrain_indices(&self) -> &[u32] {
        &self.terrain_indices
    }

    pub fn water_normals(&self) -> &[f32] {
        &self.water_normals
    }

    pub fn water_indices(&self) -> &[u32] {
        &self.water_indices
    }

    pub fn planes(&self) -> &[f32] {
        &self.planes
    }

    pub fn lights(&self) -> &[f32] {
        &self.lights
    }

    pub fn materials(&self) -> &[f32] {
        &self.materials
    }

    pub fn shapes(&self) -> &[f32] {
        &self.shapes
    }

    pub fn fish_form(&self) -> &[f32] {
        &self.fish_form
    }

    pub fn sun(&self) -> &[f32] {
        &self.sun
    }

    pub fn draws(&self) -> u64 {
        self.draws
    }

    fn encode_fish(&mut self, scene: &SceneGraph) {
        for (out, f) in self.fish.chunks_exact_mut(FISH_STRIDE).zip(&scene.fish.fish) {
            let p = f.body.position;
            out.copy_from_slice(&[p.x, p.y, p.z, f.body.yaw(), f.tail.rotation_y]);
        }
    }

    fn encode_seaweed(&mut self, scene: &SceneGraph) {
        for (out, w) in self.seaweed.chunks_exact_mut(SEAWEED_STRIDE).zip(&scene.seaweed.weeds) {
            out[0] = w.rotation_x;
            out[1] = w.rotation_z;
        }
    }
}

fn encode_light(light: &Light) -> [f32; LIGHT_STRIDE] {
    let (kind, extra) = match light.kind {
        LightKind::Ambient => (0.0, 0.0),
        LightKind::Directional { cast_shadow } => (1.0, if cast_shadow { 1.0 } else { 0.0 }),
        LightKind::Point { range } => (2.0, range),
    };
    let [r, g, b] = light.color.to_array();
    let p = light.position;
    [kind, r, g, b, light.intensity, p.x, p.y, p.z, extra]
}

fn encode_material(m: &Material) -> [f32; MATERIAL_STRIDE] {
    let [r, g, b] = m.color.to_array();
    [r, g, b, m.roughness, m.metalness, m.opacity]
}

fn material_table(scene: &SceneGraph) -> Vec<f32> {
    let mut slots = [Material::matte(crate::world::Color::BLACK, 1.0); MATERIAL_SLOTS];
    slots[MAT_SEABED] = scene.seabed.material;
    slots[MAT_WATER] = scene.water_material;
    for kind in CoralKind::ALL {
        slots[MAT_CORAL + kind as usize] = kind.material();
    }
    slots[MAT_SEAWEED] = scene.seaweed_material;
    slots[MAT_FISH_GOLD] = scene.fish_shape.material(FishColor::Gold);
    slots[MAT_FISH_RED] = scene.fish_shape.material(FishColor::Red);
    slots.iter().flat_map(encode_material).collect()
}

fn shape_table(scene: &SceneGraph) -> Vec<f32> {
    let mut slots = [[0.0; SHAPE_STRIDE]; SHAPE_SLOTS];
    for kind in CoralKind::ALL {
        slots[SHAPE_CORAL + kind as usize] = kind.primitive().params();
    }
    slots[SHAPE_SEAWEED] = scene.seaweed_shape.params();
    slots[SHAPE_FISH_BODY] = scene.fish_shape.body.params();
    slots[SHAPE_SUN] = scene.sun.shape.params();
    slots.concat()
}

impl Renderer for FrameEncoder {
    fn draw(&mut self, frame: &FrameView<'_>) {
        let cam = frame.camera;
        let proj = frame.projection;
        self.camera = [
            cam.position.x,
            cam.position.y,
            cam.position.z,
            cam.pitch,
            proj.fov_deg,
            proj.aspect,
            proj.near,
            proj.far,
        ];

        let fog = frame.environment.fog();
        self.env = [
            fog.color.r,
            fog.color.g,
            fog.color.b,
            fog.density,
            if frame.scene.sun.visible { 1.0 } else { 0.0 },
            frame.environment.state() as u8 as f32,
        ];

        self.encode_fish(frame.scene);
        self.encode_seaweed(frame.scene);
        self.water.copy_from_slice(&frame.scene.water.mesh.positions);
        self.draws += 1;
    }
}
