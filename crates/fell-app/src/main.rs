//! The binary entry point for the Fell Engine sandbox.

use std::thread;
use std::time::Duration;

use clap::Parser;
use fell_app::demo::{demo_session, pipeline_config, synthetic_source};
use fell_app::frame_clock::FrameClock;
use fell_app::input::InputSample;
use fell_app::platform::PlatformDirs;
use fell_app::session::SessionError;
use fell_audio::NullAudio;
use fell_config::{CliArgs, Config};
use fell_scene::NullRenderer;
use fell_vision::{FrameDirSource, VideoSource, VisionPipeline};
use glam::Vec3;
use tracing::info;

/// Frames in the built-in feed when no frame directory is given.
const SYNTHETIC_FRAMES: usize = 300;
/// Sleep per loop iteration; the demo is paced, not busy.
const FRAME_PACING: Duration = Duration::from_millis(16);
/// Snapshot log cadence in frames.
const SNAPSHOT_EVERY: u64 = 60;

fn main() {
    let args = CliArgs::parse();
    if let Err(e) = run(args) {
        eprintln!("fatal: {e}");
        std::process::exit(1);
    }
}

fn run(args: CliArgs) -> Result<(), SessionError> {
    let dirs = match &args.config {
        Some(root) => PlatformDirs::resolve_with_root(root),
        None => PlatformDirs::resolve()?,
    };
    dirs.create_dirs()?;

    let mut config = Config::load_or_create(&dirs.config_dir)?;
    config.apply_cli_overrides(&args);
    fell_log::init_logging(Some(dirs.log_dir.as_path()), cfg!(debug_assertions), Some(&config));

    let source: Box<dyn VideoSource> = match &config.vision.frame_dir {
        Some(dir) => Box::new(FrameDirSource::open(dir)?),
        None => Box::new(synthetic_source(SYNTHETIC_FRAMES)),
    };
    let pipeline = VisionPipeline::start(source, pipeline_config(&config.vision))?;

    let mut session = demo_session(&config);
    session.attach_pipeline(pipeline);

    let mut clock = FrameClock::with_max_frame_time(config.sim.max_frame_time);
    let mut renderer = NullRenderer;
    let mut audio = NullAudio;

    info!("session started");
    loop {
        let dt = clock.tick();
        let input = scripted_input(clock.frame_count());
        let snapshot = session.step(dt, &input, &mut renderer, &mut audio);

        // Stand-in for a dragged UI slider: breathe the first glass cube.
        session.set_slider(0, 0.5 + 0.45 * (snapshot.sim_time * 0.5).sin());

        if config.debug.show_overlay && clock.frame_count() % SNAPSHOT_EVERY == 0 {
            info!(
                fps = snapshot.fps,
                sim_time = snapshot.sim_time,
                player = ?snapshot.player_position,
                detected = snapshot.target_detected,
                particles = snapshot.particle_count,
                draws = snapshot.draw_count,
                "frame"
            );
        }

        if session.pipeline_stopped() {
            info!("video stream ended, shutting down");
            break;
        }
        if config.sim.frame_budget > 0 && clock.frame_count() >= config.sim.frame_budget {
            info!(frames = clock.frame_count(), "frame budget reached");
            break;
        }
        thread::sleep(FRAME_PACING);
    }

    session.shutdown();
    info!("session ended");
    Ok(())
}

/// Keyboard stand-in: wander forward, hop and fire on fixed cycles so
/// every session subsystem gets exercised.
fn scripted_input(frame: u64) -> InputSample {
    InputSample {
        move_direction: Vec3::NEG_Z,
        sprint: false,
        jump: frame % 180 == 0,
        fire: frame % 240 == 120,
    }
}
