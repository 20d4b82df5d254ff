use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod frame;
pub mod render;
pub mod scene;
pub mod sim;
pub mod view;
pub mod world;

pub use config::SceneConfig;
pub use error::{ConfigError, SceneError, TextureError};
pub use frame::{Clock, FrameLoop, FrameView, ManualClock, Renderer, SceneContext};
pub use render::FrameEncoder;

use view::PointerOffset;

// ============================================================================
// REEF WORLD - Scroll-driven ocean scene, state packed for a canvas host
// ============================================================================

#[cfg(target_arch = "wasm32")]
pub type HostClock = frame::DateClock;
#[cfg(not(target_arch = "wasm32"))]
pub type HostClock = frame::InstantClock;

#[wasm_bindgen]
pub struct ReefWorld {
    frames: FrameLoop<HostClock>,
    out: FrameEncoder,
    w: u32,
    h: u32,
}

#[wasm_bindgen]
impl ReefWorld {
    /// Default scene, composed from `seed`.
    #[wasm_bindgen(constructor)]
    pub fn new(w: u32, h: u32, seed: u64) -> Result<ReefWorld, JsError> {
        let config = SceneConfig { seed, ..SceneConfig::default() };
        Self::build(&config, w, h).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Scene from a RON config string.
    pub fn with_config(ron: &str, w: u32, h: u32) -> Result<ReefWorld, JsError> {
        let config = SceneConfig::from_ron_str(ron).map_err(|e| JsError::new(&e.to_string()))?;
        Self::build(&config, w, h).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Advance one frame on the wall clock. Returns false once stopped.
    pub fn tick(&mut self) -> bool {
        self.frames.frame(&mut self.out)
    }

    /// Advance one frame at an explicit time in seconds.
    pub fn tick_at(&mut self, elapsed: f32) -> bool {
        self.frames.tick(elapsed, &mut self.out)
    }

    pub fn stop(&mut self) {
        self.frames.stop();
    }

    pub fn is_running(&self) -> bool {
        self.frames.is_running()
    }

    pub fn set_scroll(&mut self, offset: f32, max_extent: f32) {
        self.frames.set_scroll(offset, max_extent);
    }

    pub fn set_pointer(&mut self, client_x: f32, client_y: f32) {
        let pointer = PointerOffset::from_client(client_x, client_y, self.w as f32, self.h as f32);
        self.frames.set_pointer(pointer);
    }

    pub fn resize(&mut self, w: u32, h: u32, device_pixel_ratio: f32) {
        self.w = w;
        self.h = h;
        self.frames.resize(w, h, device_pixel_ratio);
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.frames.context().projection.pixel_ratio
    }

    pub fn camera_ptr(&self) -> *const f32 { self.out.camera().as_ptr() }
    pub fn env_ptr(&self) -> *const f32 { self.out.env().as_ptr() }
    pub fn fish_ptr(&self) -> *const f32 { self.out.fish().as_ptr() }
    pub fn fish_len(&self) -> usize { self.out.fish().len() }
    pub fn seaweed_ptr(&self) -> *const f32 { self.out.seaweed().as_ptr() }
    pub fn seaweed_len(&self) -> usize { self.out.seaweed().len() }
    pub fn water_ptr(&self) -> *const f32 { self.out.water().as_ptr() }
    pub fn water_len(&self) -> usize { self.out.water().len() }
    pub fn coral_ptr(&self) -> *const f32 { self.out.corals().as_ptr() }
    pub fn coral_len(&self) -> usize { self.out.corals().len() }
    pub fn seaweed_base_ptr(&self) -> *const f32 { self.out.bases().as_ptr() }
    pub fn seaweed_base_len(&self) -> usize { self.out.bases().len() }
    pub fn fish_slot_ptr(&self) -> *const u8 { self.out.fish_slots().as_ptr() }
    pub fn fish_slot_len(&self) -> usize { self.out.fish_slots().len() }

    pub fn terrain_positions_ptr(&self) -> *const f32 { self.out.terrain_positions().as_ptr() }
    pub fn terrain_positions_len(&self) -> usize { self.out.terrain_positions().len() }
    pub fn terrain_normals_ptr(&self) -> *const f32 { self.out.terrain_normals().as_ptr() }
    pub fn terrain_normals_len(&self) -> usize { self.out.terrain_normals().len() }
    pub fn terrain_indices_ptr(&self) -> *const u32 { self.out.terrain_indices().as_ptr() }
    pub fn terrain_indices_len(&self) -> usize { self.out.terrain_indices().len() }
    pub fn water_normals_ptr(&self) -> *const f32 { self.out.water_normals().as_ptr() }
    pub fn water_normals_len(&self) -> usize { self.out.water_normals().len() }
    pub fn water_indices_ptr(&self) -> *const u32 { self.out.water_indices().as_ptr() }
    pub fn water_indices_len(&self) -> usize { self.out.water_indices().len() }

    pub fn planes_ptr(&self) -> *const f32 { self.out.planes().as_ptr() }
    pub fn lights_ptr(&self) -> *const f32 { self.out.lights().as_ptr() }
    pub fn lights_len(&self) -> usize { self.out.lights().len() }
    pub fn materials_ptr(&self) -> *const f32 { self.out.materials().as_ptr() }
    pub fn materials_len(&self) -> usize { self.out.materials().len() }
    pub fn shapes_ptr(&self) -> *const f32 { self.out.shapes().as_ptr() }
    pub fn shapes_len(&self) -> usize { self.out.shapes().len() }
    pub fn fish_form_ptr(&self) -> *const f32 { self.out.fish_form().as_ptr() }
    pub fn sun_ptr(&self) -> *const f32 { self.out.sun().as_ptr() }

    pub fn texture_ptr(&self) -> *const u8 { self.scene().seabed.texture.bytes().as_ptr() }
    pub fn texture_len(&self) -> usize { self.scene().seabed.texture.bytes().len() }
    pub fn texture_width(&self) -> u32 { self.scene().seabed.texture.width() }
    pub fn texture_height(&self) -> u32 { self.scene().seabed.texture.height() }
    pub fn texture_repeat(&self) -> f32 { self.scene().seabed.texture.repeat }
    pub fn glow_ptr(&self) -> *const u8 { self.scene().sun.glow.as_raw().as_ptr() }
    pub fn glow_len(&self) -> usize { self.scene().sun.glow.as_raw().len() }
    pub fn glow_size(&self) -> u32 { self.scene().sun.glow.width() }

    pub fn width(&self) -> u32 { self.w }
    pub fn height(&self) -> u32 { self.h }
}

impl ReefWorld {
    fn build(config: &SceneConfig, w: u32, h: u32) -> Result<Self, SceneError> {
        let ctx = SceneContext::new(config, w, h)?;
        let out = FrameEncoder::new(&ctx.scene);
        Ok(Self {
            frames: FrameLoop::new(ctx, HostClock::new()),
            out,
            w,
            h,
        })
    }

    fn scene(&self) -> &scene::SceneGraph {
        &self.frames.context().scene
    }

    pub fn encoder(&self) -> &FrameEncoder {
        &self.out
    }

    pub fn frame_loop(&self) -> &FrameLoop<HostClock> {
        &self.frames
    }
}
