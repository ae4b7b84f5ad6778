//! The canonical demo scene and the built-in camera feed for the `fell`
//! binary, plus the config-to-params adapters the entry point needs.

use std::time::Duration;

use fell_config::{Config, PlayerConfig, TerrainConfig, VisionConfig};
use fell_physics::PlayerParams;
use fell_scene::{Entity, RenderableId};
use fell_terrain::TerrainParams;
use fell_vision::{DetectionParams, Frame, HueBand, PipelineConfig, ScriptedSource};
use glam::Vec3;

use crate::session::SimSession;

/// Renderables the demo scene submits. A real backend would key mesh and
/// material lookups off these ids.
pub const PLAYER_MESH: RenderableId = RenderableId(0);
pub const CRATE_MESH: RenderableId = RenderableId(1);
pub const BALL_MESH: RenderableId = RenderableId(2);
pub const ORBITER_MESH: RenderableId = RenderableId(3);
pub const PATROLLER_MESH: RenderableId = RenderableId(4);
pub const GLASS_MESH: RenderableId = RenderableId(5);
pub const SPARK_MESH: RenderableId = RenderableId(6);

const SYNTH_WIDTH: u32 = 64;
const SYNTH_HEIGHT: u32 = 48;
/// Pacing between synthetic frames, roughly 30 fps.
const SYNTH_FRAME_INTERVAL: Duration = Duration::from_millis(33);

pub fn terrain_params(config: &TerrainConfig) -> TerrainParams {
    TerrainParams {
        seed: config.seed,
        grid_size: config.grid_size,
        height_scale: config.height_scale,
        frequency: config.frequency,
        octaves: config.octaves,
        lacunarity: config.lacunarity,
        persistence: config.persistence,
    }
}

pub fn player_params(config: &PlayerConfig) -> PlayerParams {
    PlayerParams {
        height: config.height,
        radius: config.radius,
        movement_acceleration: config.movement_acceleration,
        jump_velocity: config.jump_velocity,
    }
}

pub fn pipeline_config(config: &VisionConfig) -> PipelineConfig {
    PipelineConfig {
        queue_capacity: config.queue_capacity,
        detection: DetectionParams {
            low_band: HueBand::new(config.hue_low_band.0, config.hue_low_band.1),
            high_band: HueBand::new(config.hue_high_band.0, config.hue_high_band.1),
            min_saturation: config.min_saturation,
            min_value: config.min_value,
        },
        encode: config.encode,
        encode_budget_ratio: config.encode_budget_ratio,
    }
}

/// Build the demo scene: an orbiting marker, a high patrol route, two
/// solid obstacles near spawn, and a pair of glass cubes bound to
/// transparency sliders.
pub fn demo_session(config: &Config) -> SimSession {
    let mut session = SimSession::new(
        terrain_params(&config.terrain),
        player_params(&config.player),
        config.sim.particle_seed,
    );
    session.set_player_renderable(PLAYER_MESH);
    session.set_particle_renderable(SPARK_MESH);

    let orbiter = session
        .add_entity(Entity::new(Vec3::new(10.0, 0.0, 0.0), Vec3::ONE).with_renderable(ORBITER_MESH));
    session.add_orbiter(orbiter, Vec3::ZERO, 10.0, 0.5);

    let patroller = session.add_entity(
        Entity::new(Vec3::new(10.0, 20.0, 10.0), Vec3::ONE).with_renderable(PATROLLER_MESH),
    );
    session.add_patrol(
        patroller,
        vec![
            Vec3::new(100.0, 20.0, 100.0),
            Vec3::new(100.0, 20.0, 0.0),
            Vec3::new(0.0, 20.0, 0.0),
            Vec3::new(0.0, 20.0, 100.0),
        ],
        25.0,
    );

    session.add_box_obstacle(
        Vec3::new(10.0, -2.0, 0.0),
        Vec3::splat(2.0),
        Some(CRATE_MESH),
        1.0,
    );
    session.add_sphere_obstacle(Vec3::new(10.0, -2.0, 2.0), 1.0, Some(BALL_MESH));

    for z in [20.0, 23.0] {
        let glass = session.add_box_obstacle(
            Vec3::new(10.0, 0.0, z),
            Vec3::splat(1.0),
            Some(GLASS_MESH),
            0.5,
        );
        session.bind_alpha_slider(glass, 0.5);
    }

    session
}

/// Built-in camera feed: solid frames cycling red, blue, gray so the
/// detection flag toggles while the stream plays.
pub fn synthetic_source(count: usize) -> ScriptedSource {
    let colors = [[200u8, 20, 20], [20, 20, 200], [120, 120, 120]];
    let frames: Vec<Frame> = (0..count)
        .map(|i| Frame::solid(SYNTH_WIDTH, SYNTH_HEIGHT, colors[i % colors.len()]))
        .collect();
    ScriptedSource::new(frames).with_frame_interval(SYNTH_FRAME_INTERVAL)
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use fell_audio::NullAudio;
    use fell_scene::NullRenderer;
    use fell_vision::{VideoSource, VisionPipeline};

    use super::*;
    use crate::input::InputSample;

    #[test]
    fn test_demo_scene_registers_expected_colliders() {
        let session = demo_session(&Config::default());
        // Player sphere, crate, ball, two glass cubes. The orbiter and
        // patroller fly and carry no collider.
        assert_eq!(session.collision_world().len(), 5);
    }

    #[test]
    fn test_synthetic_source_cycles_colors() {
        let mut source = synthetic_source(3);
        let expected = [[200u8, 20, 20], [20, 20, 200], [120, 120, 120]];
        for rgb in expected {
            let frame = source.read_frame();
            assert_eq!(frame.image().get_pixel(0, 0).0, rgb);
        }
        assert!(source.read_frame().is_empty());
        assert!(!source.is_open());
    }

    #[test]
    fn test_pipeline_config_carries_detection_params() {
        let pipeline = pipeline_config(&Config::default().vision);
        assert_eq!(pipeline.queue_capacity, 8);
        assert_eq!(pipeline.detection.low_band, HueBand::new(0.0, 20.0));
        assert_eq!(pipeline.detection.high_band, HueBand::new(340.0, 360.0));
        assert!(!pipeline.encode);
    }

    #[test]
    fn test_red_stream_boosts_demo_session() {
        let config = Config::default();
        let mut session = demo_session(&config);

        let frames = vec![Frame::solid(32, 32, [200, 20, 20]); 4];
        let pipeline = VisionPipeline::start(
            Box::new(ScriptedSource::new(frames)),
            pipeline_config(&config.vision),
        )
        .expect("pipeline start");
        session.attach_pipeline(pipeline);

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut renderer = NullRenderer;
        let mut audio = NullAudio;
        let mut detected = false;
        while Instant::now() < deadline {
            let snapshot = session.step(0.016, &InputSample::default(), &mut renderer, &mut audio);
            if snapshot.target_detected && session.pipeline_stopped() {
                detected = true;
                break;
            }
            std::thread::sleep(Duration::from_millis(2));
        }
        assert!(detected, "red stream never raised the detection flag");

        // The last classification outlives the stream.
        session.shutdown();
        assert!(session.detection_flag().get());
    }
}
