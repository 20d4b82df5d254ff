// frame.rs - Per-frame scheduler
//
// One tick runs every simulator to completion in a fixed order and then
// hands the frame to a renderer:
//   waves -> fish -> seaweed -> camera -> environment -> draw
// Host events (scroll, pointer, resize) may land between ticks and only
// touch input and projection state.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::SceneConfig;
use crate::error::SceneError;
use crate::scene::{SceneGraph, build_scene};
use crate::view::{
    CameraRig, EnvironmentController, EnvironmentState, PointerOffset, Projection, ScrollProgress,
};

/// Seconds since the loop started.
pub trait Clock {
    fn elapsed(&mut self) -> f32;
}

/// Clock that only moves when told to.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: f32,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, seconds: f32) {
        self.now = seconds;
    }

    pub fn advance(&mut self, seconds: f32) {
        self.now += seconds;
    }
}

impl Clock for ManualClock {
    fn elapsed(&mut self) -> f32 {
        self.now
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub struct InstantClock {
    start: std::time::Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl InstantClock {
    pub fn new() -> Self {
        Self { start: std::time::Instant::now() }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for InstantClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Clock for InstantClock {
    fn elapsed(&mut self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}

/// Wall clock backed by `Date.now()` in the browser.
#[cfg(target_arch = "wasm32")]
pub struct DateClock {
    start_ms: f64,
}

#[cfg(target_arch = "wasm32")]
impl DateClock {
    pub fn new() -> Self {
        Self { start_ms: js_sys::Date::now() }
    }
}

#[cfg(target_arch = "wasm32")]
impl Default for DateClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
impl Clock for DateClock {
    fn elapsed(&mut self) -> f32 {
        ((js_sys::Date::now() - self.start_ms) / 1000.0) as f32
    }
}

/// Read-only snapshot handed to the renderer at the end of a tick.
pub struct FrameView<'a> {
    pub scene: &'a SceneGraph,
    pub camera: &'a CameraRig,
    pub environment: &'a EnvironmentController,
    pub projection: &'a Projection,
    pub elapsed: f32,
}

/// Issues the draw call for a finished frame.
pub trait Renderer {
    fn draw(&mut self, frame: &FrameView<'_>);
}

/// All mutable scene state, owned by the loop and lent to each component.
pub struct SceneContext {
    pub scene: SceneGraph,
    pub camera: CameraRig,
    pub environment: EnvironmentController,
    pub projection: Projection,
    pub scroll: ScrollProgress,
    pub pointer: PointerOffset,
    rng: ChaCha8Rng,
}

impl SceneContext {
    /// Compose the scene from `config.seed`.
    pub fn new(config: &SceneConfig, width: u32, height: u32) -> Result<Self, SceneError> {
        Self::with_rng(config, width, height, ChaCha8Rng::seed_from_u64(config.seed))
    }

    pub fn with_rng(
        config: &SceneConfig,
        width: u32,
        height: u32,
        mut rng: ChaCha8Rng,
    ) -> Result<Self, SceneError> {
        let scene = build_scene(config, &mut rng)?;
        Ok(Self {
            scene,
            camera: CameraRig::new(&config.camera),
            environment: EnvironmentController::new(&config.environment),
            projection: Projection::new(&config.camera, width, height),
            scroll: ScrollProgress::TOP,
            pointer: PointerOffset::default(),
            rng,
        })
    }
}

pub struct FrameLoop<C: Clock> {
    ctx: SceneContext,
    clock: C,
    running: bool,
    frames: u64,
}

impl<C: Clock> FrameLoop<C> {
    pub fn new(ctx: SceneContext, clock: C) -> Self {
        Self { ctx, clock, running: true, frames: 0 }
    }

    pub fn set_scroll(&mut self, offset: f32, max_extent: f32) {
        self.ctx.scroll = ScrollProgress::from_offset(offset, max_extent);
    }

    pub fn set_scroll_progress(&mut self, progress: ScrollProgress) {
        self.ctx.scroll = progress;
    }

    pub fn set_pointer(&mut self, pointer: PointerOffset) {
        self.ctx.pointer = pointer;
    }

    pub fn resize(&mut self, width: u32, height: u32, device_pixel_ratio: f32) {
        self.ctx.projection.resize(width, height, device_pixel_ratio);
    }

    /// Read the clock and run one tick. Returns false once stopped.
    pub fn frame(&mut self, renderer: &mut dyn Renderer) -> bool {
        if !self.running {
            return false;
        }
        let elapsed = self.clock.elapsed();
        self.tick(elapsed, renderer)
    }

    /// Run one full tick at `elapsed` seconds. Returns false once stopped.
    pub fn tick(&mut self, elapsed: f32, renderer: &mut dyn Renderer) -> bool {
        if !self.running {
            return false;
        }
        let ctx = &mut self.ctx;

        ctx.scene.water.update(elapsed);
        ctx.scene.fish.update(elapsed, &mut ctx.rng);
        ctx.scene.seaweed.update(elapsed);

        ctx.camera.update(ctx.scroll, ctx.pointer);
        ctx.environment.update(ctx.camera.position.y);
        ctx.camera.apply_pitch(ctx.environment.camera_pitch(), ctx.pointer);
        ctx.scene.sun.visible = ctx.environment.sun_visible();

        renderer.draw(&FrameView {
            scene: &ctx.scene,
            camera: &ctx.camera,
            environment: &ctx.environment,
            projection: &ctx.projection,
            elapsed,
        });

        self.frames += 1;
        true
    }

    /// Halt the loop; later ticks are no-ops and issue no draw.
    pub fn stop(&mut self) {
        if self.running {
            log::info!("Frame loop stopped after {} frames", self.frames);
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn state(&self) -> EnvironmentState {
        self.ctx.environment.state()
    }

    pub fn context(&self) -> &SceneContext {
        &self.ctx
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        draws: Vec<(f32, f32, bool, EnvironmentState)>,
    }

    impl Renderer for Recorder {
        fn draw(&mut self, frame: &FrameView<'_>) {
            self.draws.push((
                frame.elapsed,
                frame.camera.position.y,
                frame.scene.sun.visible,
                frame.environment.state(),
            ));
        }
    }

    fn small_loop() -> FrameLoop<ManualClock> {
        let mut config = SceneConfig::default();
        config.texture.width = 32;
        config.texture.height = 32;
        config.texture.splat_count = 50;
        config.texture.glow_size = 16;
        config.water.grid_resolution = 8;
        config.composer.terrain_segments = 4;
        config.composer.coral_count = 5;
        config.composer.seaweed_count = 5;
        config.composer.fish_count = 5;
        let ctx = SceneContext::new(&config, 640, 480).unwrap();
        FrameLoop::new(ctx, ManualClock::new())
    }

    #[test]
    fn test_frame_reads_clock_and_draws_once() {
        let mut lp = small_loop();
        let mut rec = Recorder::default();
        lp.clock_mut().set(1.25);
        assert!(lp.frame(&mut rec));
        lp.clock_mut().advance(0.5);
        assert!(lp.frame(&mut rec));
        assert_eq!(rec.draws.len(), 2);
        assert_eq!(rec.draws[0].0, 1.25);
        assert_eq!(rec.draws[1].0, 1.75);
        assert_eq!(lp.frames(), 2);
    }

    #[test]
    fn test_draw_sees_current_tick_camera() {
        let mut lp = small_loop();
        let mut rec = Recorder::default();
        lp.set_scroll(1.0, 1.0);
        lp.tick(0.0, &mut rec);
        let drawn_y = rec.draws[0].1;
        assert_eq!(drawn_y, lp.context().camera.position.y);
        assert!(drawn_y < 3.0, "camera should already have moved toward the seabed");
    }

    #[test]
    fn test_descent_hides_sun_on_crossing_tick() {
        let mut lp = small_loop();
        let mut rec = Recorder::default();
        lp.set_scroll_progress(ScrollProgress::BOTTOM);
        for i in 0..400 {
            lp.tick(i as f32 / 60.0, &mut rec);
        }
        let crossing = rec
            .draws
            .iter()
            .position(|d| d.3 == EnvironmentState::Underwater)
            .expect("camera never went underwater");
        assert!(crossing > 0);
        let (_, y, sun, _) = rec.draws[crossing];
        assert!(y < -5.0);
        assert!(!sun, "sun must hide on the tick the threshold is crossed");
        assert!(rec.draws[crossing - 1].2, "sun visible just before crossing");
    }

    #[test]
    fn test_instant_clock_starts_near_zero() {
        let mut clock = InstantClock::default();
        let t0 = clock.elapsed();
        assert!((0.0..1.0).contains(&t0));
        assert!(clock.elapsed() >= t0);
    }

    #[test]
    fn test_stop_halts_ticks() {
        let mut lp = small_loop();
        let mut rec = Recorder::default();
        lp.tick(0.0, &mut rec);
        lp.stop();
        assert!(!lp.is_running());
        assert!(!lp.tick(0.1, &mut rec));
        assert!(!lp.frame(&mut rec));
        assert_eq!(rec.draws.len(), 1);
        assert_eq!(lp.frames(), 1);
    }

    #[test]
    fn test_resize_and_pointer_leave_geometry_alone() {
        let mut lp = small_loop();
        let before = lp.context().scene.water.mesh.positions.clone();
        let fish_before: Vec<_> =
            lp.context().scene.fish.fish.iter().map(|f| f.body.position).collect();
        lp.resize(1920, 1080, 2.0);
        lp.set_pointer(PointerOffset::from_client(0.0, 0.0, 1920.0, 1080.0));
        lp.set_scroll(400.0, 0.0);
        assert_eq!(lp.context().scene.water.mesh.positions, before);
        let fish_after: Vec<_> =
            lp.context().scene.fish.fish.iter().map(|f| f.body.position).collect();
        assert_eq!(fish_after, fish_before);
        assert_eq!(lp.context().scroll, ScrollProgress::TOP);
        assert!((lp.context().projection.aspect - 16.0 / 9.0).abs() < 1e-6);
    }
}
