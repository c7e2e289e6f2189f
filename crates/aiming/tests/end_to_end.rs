use std::collections::VecDeque;

use aiming::core::{PixelRect, RgbImage};
use aiming::{
    AimingConfig, AimingSystem, FixedRange, FrameError, FrameSource, HeadingSource, Stage,
    TargetClass, TickOutcome,
};
use approx::assert_relative_eq;

const TAPE: [u8; 3] = [10, 240, 210];

struct ScriptedSource {
    frames: VecDeque<RgbImage>,
}

impl ScriptedSource {
    fn new(frames: Vec<RgbImage>) -> Self {
        Self {
            frames: frames.into(),
        }
    }
}

impl FrameSource for ScriptedSource {
    fn get_frame(&mut self) -> Result<RgbImage, FrameError> {
        self.frames.pop_front().ok_or(FrameError::NoFrame)
    }
}

fn empty_frame() -> RgbImage {
    RgbImage::filled(320, 240, [0, 0, 0])
}

/// Hollow 124x40 goal outline, 4 px thick.
fn draw_goal(img: &mut RgbImage, left: usize, top: usize) {
    let (w, h, t) = (124, 40, 4);
    let bar = |left, top, width, height| PixelRect {
        top,
        left,
        height,
        width,
    };
    img.fill_rect(bar(left, top, w, t), TAPE);
    img.fill_rect(bar(left, top + h - t, w, t), TAPE);
    img.fill_rect(bar(left, top, t, h), TAPE);
    img.fill_rect(bar(left + w - t, top, t, h), TAPE);
}

fn goal_frame(left: usize, top: usize) -> RgbImage {
    let mut img = empty_frame();
    draw_goal(&mut img, left, top);
    img
}

fn high_goal_config() -> AimingConfig {
    AimingConfig {
        active_class: TargetClass::High,
        ..AimingConfig::default()
    }
}

fn expected_optical(width_px: f64) -> f64 {
    (62.0 * 320.0 / width_px) / (2.0 * 23.5_f64.to_radians().tan())
}

fn run_cycle<S: FrameSource>(system: &mut AimingSystem<S, FixedRange>) -> Vec<TickOutcome> {
    (0..5).map(|_| system.tick()).collect()
}

#[test]
fn one_cycle_locks_onto_the_high_goal() {
    let source = ScriptedSource::new(vec![goal_frame(100, 100)]);
    let mut system = AimingSystem::new(source, FixedRange(178.0), high_goal_config());
    assert!(!system.has_target());

    let outcomes = run_cycle(&mut system);
    assert!(outcomes[..4]
        .iter()
        .all(|o| matches!(o, TickOutcome::Advanced { .. })));
    assert!(matches!(outcomes[4], TickOutcome::Completed(_)));
    assert_eq!(system.pipeline().stage(), Stage::Fetch);
    assert!(system.pipeline().is_idle());

    let target = *system.selected_target().expect("goal selected");
    assert_eq!(target.target_class, TargetClass::High);
    assert_eq!(target.width_px, 124.0);
    assert_relative_eq!(target.centroid_x, 161.5, epsilon = 1e-9);
    assert!(target.aspect_ratio > 99.0);

    let optical = system.optical_distance_inches();
    assert_relative_eq!(optical, expected_optical(124.0), epsilon = 1e-9);
    assert_eq!(system.ranging_distance_inches(), 178.0);
    assert_relative_eq!(
        system.distance_inches(),
        (optical + 178.0) / 2.0,
        epsilon = 1e-9
    );

    // Centroid 1.5 px right of center, 62 in over 124 px.
    let offset_inches = 1.5 * 62.0 / 124.0;
    let bearing = system.bearing_degrees();
    assert_relative_eq!(
        bearing,
        (offset_inches / system.distance_inches()).atan().to_degrees(),
        epsilon = 1e-9
    );
    assert!(bearing > 0.0);
    assert!(system.is_aimed());

    let solution = system.aim_solution().expect("solution");
    assert!(solution.aimed);
    assert_eq!(solution.target, target);
    assert_relative_eq!(solution.bearing_degrees, bearing);

    let report = system.last_report().expect("report");
    assert_eq!(report.cycle, 1);
    assert_eq!(report.particle_count, 1);
    assert!(report.scored[0].accepted);
    let scores = report.scored[0].scores;
    assert_relative_eq!(scores.rectangularity, 100.0, epsilon = 1e-9);
    assert!(scores.x_edge > 40.0 && scores.y_edge > 60.0);
}

#[test]
fn middle_goal_class_rejects_a_high_goal() {
    let source = ScriptedSource::new(vec![goal_frame(100, 100)]);
    let mut system = AimingSystem::new(source, FixedRange(178.0), AimingConfig::default());
    run_cycle(&mut system);

    let report = system.last_report().expect("report");
    assert_eq!(report.active_class, TargetClass::Middle);
    assert_eq!(report.particle_count, 1);
    assert!(!report.scored[0].accepted);

    assert!(!system.has_target());
    assert!(system.aim_solution().is_none());
    assert_eq!(system.bearing_degrees(), 0.0);
    assert_eq!(system.optical_distance_inches(), 0.0);
    assert_eq!(system.distance_inches(), 178.0);
}

#[test]
fn goal_left_of_center_gives_negative_bearing() {
    let source = ScriptedSource::new(vec![goal_frame(10, 60)]);
    let mut system = AimingSystem::new(source, FixedRange(178.0), high_goal_config());
    run_cycle(&mut system);

    assert!(system.has_target());
    let bearing = system.bearing_degrees();
    assert!(bearing < -1.0, "bearing {bearing}");
    assert!(!system.is_aimed());
}

#[test]
fn rangefinder_disagreement_takes_the_larger_distance() {
    let source = ScriptedSource::new(vec![goal_frame(100, 100)]);
    let mut system = AimingSystem::new(source, FixedRange(250.0), high_goal_config());
    run_cycle(&mut system);

    assert!(system.has_target());
    assert_eq!(system.distance_inches(), 250.0);
}

#[test]
fn failed_fetch_after_a_lock_clears_the_target() {
    let source = ScriptedSource::new(vec![goal_frame(100, 100)]);
    let mut system = AimingSystem::new(source, FixedRange(178.0), high_goal_config());
    run_cycle(&mut system);
    assert!(system.has_target());

    // The source is now empty: the next tick abandons the cycle.
    let bearing = system.pid_get();
    assert_eq!(bearing, 0.0);
    assert!(!system.has_target());
    assert!(system.pipeline().is_idle());
    assert_eq!(system.pipeline().cycles_abandoned(), 1);
    assert_eq!(system.last_report().map(|r| r.cycle), Some(1));
}

#[test]
fn pid_get_ticks_once_per_call() {
    let source = ScriptedSource::new(vec![goal_frame(100, 100), goal_frame(100, 100)]);
    let mut system = AimingSystem::new(source, FixedRange(178.0), high_goal_config());

    let readings: Vec<f64> = (0..10).map(|_| system.pid_get()).collect();
    assert!(readings[..4].iter().all(|&b| b == 0.0));
    assert!(readings[4] > 0.0);
    assert_eq!(system.pipeline().cycles_completed(), 2);
    assert_relative_eq!(readings[9], readings[4], epsilon = 1e-12);
}

#[test]
fn cycle_without_a_goal_drops_the_previous_lock() {
    let source = ScriptedSource::new(vec![goal_frame(100, 100), empty_frame()]);
    let mut system = AimingSystem::new(source, FixedRange(178.0), high_goal_config());
    run_cycle(&mut system);
    assert!(system.has_target());
    assert!(system.bearing_degrees() > 0.0);

    let outcomes = run_cycle(&mut system);
    assert!(matches!(outcomes[4], TickOutcome::Completed(_)));
    assert_eq!(system.pipeline().cycles_abandoned(), 0);

    let report = system.last_report().expect("report");
    assert_eq!(report.cycle, 2);
    assert_eq!(report.particle_count, 0);
    assert!(report.selected.is_none());

    assert!(!system.has_target());
    assert!(system.aim_solution().is_none());
    assert_eq!(system.bearing_degrees(), 0.0);
    assert_eq!(system.optical_distance_inches(), 0.0);
}

#[test]
fn equal_goals_resolve_to_the_first_in_raster_order() {
    // The upper-right goal starts on an earlier row than the lower-left one.
    let mut frame = empty_frame();
    draw_goal(&mut frame, 180, 20);
    draw_goal(&mut frame, 10, 150);
    let source = ScriptedSource::new(vec![frame]);
    let mut system = AimingSystem::new(source, FixedRange(178.0), high_goal_config());
    run_cycle(&mut system);

    let report = system.last_report().expect("report");
    assert_eq!(report.particle_count, 2);
    assert!(report.scored.iter().all(|s| s.accepted));
    assert_eq!(report.scored[0].scores, report.scored[1].scores);

    let target = system.selected_target().expect("goal selected");
    assert_eq!(target.particle_index, 0);
    assert_relative_eq!(target.centroid_x, 241.5, epsilon = 1e-9);
}
