// reefgen - Compose a reef scene offline and replay the scroll journey
//
// Pipeline:
//   1. Load config (or defaults), override seed
//   2. Compose the scene and synthesize its textures
//   3. Sweep scroll progress 0 -> 1 over N frames at 60 fps
//   4. Log environment transitions and a summary
//   5. Optionally write seabed texture and sun glow as PNG
//
// Usage: cargo run --bin reefgen -- [--config scene.ron] [--seed N] [--frames N]
//        [--texture-out sand.png] [--glow-out glow.png] [--dump-config]

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use reef_engine::view::EnvironmentState;
use reef_engine::{FrameLoop, FrameView, ManualClock, Renderer, SceneConfig, SceneContext};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const FRAME_DT: f32 = 1.0 / 60.0;

#[derive(Parser, Debug)]
#[command(name = "reefgen", about = "Compose a reef scene and replay the scroll journey")]
struct Args {
    /// RON scene config; defaults are used when absent
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the config seed
    #[arg(long)]
    seed: Option<u64>,

    /// Frames to simulate while scrolling from top to bottom
    #[arg(long, default_value_t = 600)]
    frames: u32,

    /// Write the seabed sand texture as PNG
    #[arg(long)]
    texture_out: Option<PathBuf>,

    /// Write the sun glow sprite as PNG
    #[arg(long)]
    glow_out: Option<PathBuf>,

    /// Print the effective config as RON and exit
    #[arg(long)]
    dump_config: bool,
}

/// Watches drawn frames for environment changes.
struct JourneyLog {
    last: Option<EnvironmentState>,
    transitions: u32,
    deepest: f32,
}

impl Renderer for JourneyLog {
    fn draw(&mut self, frame: &FrameView<'_>) {
        let state = frame.environment.state();
        let y = frame.camera.position.y;
        if self.last.is_some_and(|s| s != state) {
            self.transitions += 1;
            log::info!("t={:.2}s camera y={y:.2}: {state:?}", frame.elapsed);
        }
        self.last = Some(state);
        self.deepest = self.deepest.min(y);
    }
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());
    tracing_subscriber::registry().with(env_filter).with(console_layer).init();
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    if args.dump_config {
        println!("{}", config.to_ron_string()?);
        return Ok(());
    }

    let ctx = SceneContext::new(&config, 1280, 720)?;
    if let Some(path) = &args.texture_out {
        write_png(path, &ctx.scene.seabed.texture.image)?;
    }
    if let Some(path) = &args.glow_out {
        write_png(path, &ctx.scene.sun.glow)?;
    }

    let mut frames = FrameLoop::new(ctx, ManualClock::new());
    let mut journey = JourneyLog { last: None, transitions: 0, deepest: f32::INFINITY };
    let last = args.frames.saturating_sub(1).max(1) as f32;
    for i in 0..args.frames {
        frames.set_scroll(i as f32, last);
        frames.clock_mut().advance(FRAME_DT);
        frames.frame(&mut journey);
    }
    frames.stop();

    summarize(&frames, &journey);
    Ok(())
}

fn write_png(path: &Path, image: &image::RgbaImage) -> Result<(), image::ImageError> {
    image.save(path)?;
    log::info!("Wrote {}x{} image to {}", image.width(), image.height(), path.display());
    Ok(())
}

fn summarize(frames: &FrameLoop<ManualClock>, journey: &JourneyLog) {
    let ctx = frames.context();
    let fog = ctx.environment.fog();
    let radii: Vec<f32> = ctx.scene.fish.fish.iter().map(|f| f.body.planar_distance()).collect();
    let max_radius = radii.iter().copied().fold(0.0f32, f32::max);
    let mean_radius = if radii.is_empty() { 0.0 } else { radii.iter().sum::<f32>() / radii.len() as f32 };

    log::info!(
        "{} frames, {} transitions, final state {:?}",
        frames.frames(),
        journey.transitions,
        frames.state()
    );
    log::info!(
        "Camera y={:.2} (deepest {:.2}), pitch {:.3}",
        ctx.camera.position.y,
        journey.deepest,
        ctx.camera.pitch
    );
    log::info!(
        "Fog #{:06x} density {}, sun visible: {}",
        fog.color.to_hex(),
        fog.density,
        ctx.environment.sun_visible()
    );
    log::info!("Fish radius mean {mean_radius:.2}, max {max_radius:.2}");
}
