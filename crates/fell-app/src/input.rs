//! Per-frame input samples, decoupled from any windowing backend.

use fell_vision::DetectionFlag;
use glam::Vec3;

/// Movement speed multiplier applied while sprint is held or the vision
/// pipeline currently reports the target color.
pub const SPRINT_MULTIPLIER: f32 = 2.5;

/// One frame of player input, already resolved to world axes.
///
/// Key mapping belongs to the windowing collaborator; the simulation only
/// ever sees this sample, which makes input scriptable in tests and in
/// the headless demo.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSample {
    /// Requested movement direction. Need not be normalized; the vertical
    /// component is discarded by the player controller.
    pub move_direction: Vec3,
    /// Sprint modifier held this frame.
    pub sprint: bool,
    /// Jump requested this frame.
    pub jump: bool,
    /// Particle burst requested this frame.
    pub fire: bool,
}

/// Resolve this tick's movement speed multiplier.
///
/// The detection flag is read once per call and may be stale (the detect
/// worker publishes it relaxed); staleness only delays the boost by a
/// frame or two, which the gameplay rule tolerates.
pub fn speed_multiplier(sample: &InputSample, detection: &DetectionFlag) -> f32 {
    if sample.sprint || detection.get() {
        SPRINT_MULTIPLIER
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiplier_defaults_to_one() {
        let sample = InputSample::default();
        let flag = DetectionFlag::new();
        assert_eq!(speed_multiplier(&sample, &flag), 1.0);
    }

    #[test]
    fn test_sprint_boosts() {
        let sample = InputSample {
            sprint: true,
            ..InputSample::default()
        };
        let flag = DetectionFlag::new();
        assert_eq!(speed_multiplier(&sample, &flag), SPRINT_MULTIPLIER);
    }

    #[test]
    fn test_detection_boosts_without_sprint() {
        let sample = InputSample::default();
        let flag = DetectionFlag::new();
        flag.store(true);
        assert_eq!(speed_multiplier(&sample, &flag), SPRINT_MULTIPLIER);

        flag.store(false);
        assert_eq!(speed_multiplier(&sample, &flag), 1.0);
    }

    #[test]
    fn test_boosts_do_not_stack() {
        let sample = InputSample {
            sprint: true,
            ..InputSample::default()
        };
        let flag = DetectionFlag::new();
        flag.store(true);
        assert_eq!(speed_multiplier(&sample, &flag), SPRINT_MULTIPLIER);
    }
}
