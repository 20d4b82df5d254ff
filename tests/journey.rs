use reef_engine::view::{EnvironmentState, PointerOffset, ScrollProgress};
use reef_engine::{FrameEncoder, FrameLoop, ManualClock, SceneConfig, SceneContext};

fn light_config(seed: u64) -> SceneConfig {
    let mut config = SceneConfig { seed, ..SceneConfig::default() };
    config.texture.width = 64;
    config.texture.height = 64;
    config.texture.splat_count = 500;
    config.texture.glow_size = 32;
    config.water.grid_resolution = 16;
    config.composer.terrain_segments = 8;
    config
}

fn start(config: &SceneConfig) -> (FrameLoop<ManualClock>, FrameEncoder) {
    let ctx = SceneContext::new(config, 1280, 720).unwrap();
    let enc = FrameEncoder::new(&ctx.scene);
    (FrameLoop::new(ctx, ManualClock::new()), enc)
}

fn run(frames: &mut FrameLoop<ManualClock>, enc: &mut FrameEncoder, n: u32) {
    for _ in 0..n {
        frames.clock_mut().advance(1.0 / 60.0);
        frames.frame(enc);
    }
}

#[test]
fn test_scroll_to_bottom_goes_underwater() {
    let (mut frames, mut enc) = start(&light_config(7));
    run(&mut frames, &mut enc, 10);
    assert_eq!(frames.state(), EnvironmentState::AboveSurface);
    assert_eq!(enc.env()[4], 1.0);

    frames.set_scroll(4000.0, 4000.0);
    let mut crossed_at = None;
    for i in 0..600 {
        frames.clock_mut().advance(1.0 / 60.0);
        frames.frame(&mut enc);
        if crossed_at.is_none() && frames.state() == EnvironmentState::Underwater {
            crossed_at = Some(i);
            assert!(enc.camera()[1] < -5.0);
            assert_eq!(enc.env()[4], 0.0, "sun hidden on the crossing frame");
            assert_eq!(enc.env()[3], 0.025, "density switches on the crossing frame");
        }
    }
    assert!(crossed_at.is_some());

    let y = frames.context().camera.position.y;
    assert!((y - -25.0).abs() < 0.01, "camera should settle near the seabed, got {y}");
    assert!((frames.context().camera.pitch - 0.1).abs() < 1e-6);
    assert_eq!(frames.frames(), 610);
    assert_eq!(enc.draws(), 610);
}

#[test]
fn test_scroll_back_up_resurfaces() {
    let (mut frames, mut enc) = start(&light_config(8));
    frames.set_scroll_progress(ScrollProgress::BOTTOM);
    run(&mut frames, &mut enc, 300);
    assert_eq!(frames.state(), EnvironmentState::Underwater);

    frames.set_scroll_progress(ScrollProgress::TOP);
    run(&mut frames, &mut enc, 300);
    assert_eq!(frames.state(), EnvironmentState::AboveSurface);
    assert!(frames.context().environment.sun_visible());
    assert!((frames.context().camera.pitch - -0.05).abs() < 1e-6);
}

#[test]
fn test_unscrollable_page_stays_at_surface() {
    let (mut frames, mut enc) = start(&light_config(9));
    frames.set_scroll(900.0, 0.0);
    run(&mut frames, &mut enc, 200);
    assert_eq!(frames.context().scroll, ScrollProgress::TOP);
    assert_eq!(frames.state(), EnvironmentState::AboveSurface);
    assert!((frames.context().camera.position.y - 3.0).abs() < 1e-4);
}

#[test]
fn test_fish_stay_near_boundary() {
    let (mut frames, mut enc) = start(&light_config(10));
    run(&mut frames, &mut enc, 3000);
    for f in &frames.context().scene.fish.fish {
        assert!(f.body.planar_distance() < 50.5, "fish escaped to {}", f.body.planar_distance());
        assert!((0.0..std::f32::consts::TAU).contains(&f.body.heading));
    }
}

#[test]
fn test_same_seed_same_journey() {
    let config = light_config(11);
    let (mut a, mut ea) = start(&config);
    let (mut b, mut eb) = start(&config);
    for frames in [&mut a, &mut b] {
        frames.set_pointer(PointerOffset::from_client(100.0, 600.0, 1280.0, 720.0));
        frames.set_scroll(250.0, 1000.0);
    }
    run(&mut a, &mut ea, 120);
    run(&mut b, &mut eb, 120);
    assert_eq!(ea.fish(), eb.fish());
    assert_eq!(ea.camera(), eb.camera());
    assert_eq!(ea.water(), eb.water());
}

#[test]
fn test_stop_freezes_output() {
    let (mut frames, mut enc) = start(&light_config(12));
    run(&mut frames, &mut enc, 5);
    let fish = enc.fish().to_vec();
    frames.stop();
    run(&mut frames, &mut enc, 5);
    assert!(!frames.is_running());
    assert_eq!(frames.frames(), 5);
    assert_eq!(enc.fish(), fish.as_slice());
}

#[test]
fn test_config_file_drives_scene() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reef.ron");
    let mut config = light_config(13);
    config.composer.fish_count = 4;
    config.composer.coral_count = 9;
    config.environment.depth_threshold = 0.0;
    config.save(&path).unwrap();

    let loaded = SceneConfig::load(&path).unwrap();
    let (mut frames, mut enc) = start(&loaded);
    assert_eq!(enc.fish().len(), 4 * 5);
    assert_eq!(enc.corals().len(), 9 * 8);

    frames.set_scroll_progress(ScrollProgress::new(0.2));
    run(&mut frames, &mut enc, 400);
    // target y = 3 - 0.2 * 28 = -2.6, below the raised threshold
    assert_eq!(frames.state(), EnvironmentState::Underwater);
}
