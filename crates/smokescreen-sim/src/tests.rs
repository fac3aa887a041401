use glam::DVec2;

use smokescreen_core::config::{OcclusionStrategy, SmokescreenConfig};
use smokescreen_core::scenario::{EvaluationWindow, Scenario};
use smokescreen_core::types::{Deployment, ParameterLayout, Vec3};
use smokescreen_geometry::Occluder;
use smokescreen_optim::Fitness;

use crate::coverage::CoverageEvaluator;
use crate::motion::{BallisticMotion, DroneFix, MotionModel};

fn reference_deployment() -> Deployment {
    Deployment::with_heading_degrees(120.0, 1.5, 3.6, 180.0)
}

fn default_motion() -> BallisticMotion {
    BallisticMotion::new(&Scenario::default()).unwrap()
}

fn short_window_config(occlusion: OcclusionStrategy) -> SmokescreenConfig {
    SmokescreenConfig {
        window: EvaluationWindow {
            start: 7.0,
            end: 11.0,
            samples: 400,
        },
        occlusion,
        ..Default::default()
    }
}

fn approx(a: Vec3, b: Vec3, tol: f64) -> bool {
    a.distance(b) < tol
}

// ---- Motion ----

#[test]
fn test_drop_and_explosion_positions() {
    let motion = default_motion();
    let fix = motion.drone_trajectory(&reference_deployment(), 0.0);
    assert!(
        approx(fix.drop_position, Vec3::new(17_620.0, 0.0, 1_800.0), 1e-9),
        "drop at {:?}",
        fix.drop_position
    );
    let fall = 0.5 * 9.81 * 3.6 * 3.6;
    assert!(
        approx(fix.explosion_position, Vec3::new(17_188.0, 0.0, 1_800.0 - fall), 1e-9),
        "explosion at {:?}",
        fix.explosion_position
    );
}

#[test]
fn test_smoke_exists_only_during_lifetime() {
    let motion = default_motion();
    let deployment = reference_deployment();
    assert!(motion.drone_trajectory(&deployment, 5.0).smoke_position.is_none());
    assert!(motion.drone_trajectory(&deployment, 25.2).smoke_position.is_none());

    let fix = motion.drone_trajectory(&deployment, 6.1);
    let smoke = fix.smoke_position.expect("cloud should exist one second after burst");
    assert!(approx(smoke, fix.explosion_position - Vec3::Z * 3.0, 1e-9));
    assert!(motion.smoke_active(&deployment, 5.2));
    assert!(motion.smoke_active(&deployment, 25.0));
}

#[test]
fn test_missile_flies_straight_at_constant_speed() {
    let motion = default_motion();
    let start = motion.missile_position(0.0);
    assert_eq!(start, Vec3::new(20_000.0, 0.0, 2_000.0));

    let later = motion.missile_position(2.0);
    assert!((start.distance(later) - 600.0).abs() < 1e-9);
    // Stays on the segment toward the aim point.
    let toward_aim = (Vec3::ZERO - start).normalize();
    let flown = (later - start).normalize();
    assert!(toward_aim.dot(flown) > 1.0 - 1e-12);
}

#[test]
fn test_zero_heading_falls_back_to_aim_direction() {
    let motion = default_motion();
    let degenerate = Deployment::new(120.0, 1.5, 3.6, DVec2::ZERO);
    assert!((motion.heading_for(&degenerate) - DVec2::NEG_X).length() < 1e-12);

    let a = motion.drone_trajectory(&degenerate, 10.0);
    let b = motion.drone_trajectory(&reference_deployment(), 10.0);
    assert!(approx(a.explosion_position, b.explosion_position, 1e-6));
}

#[test]
fn test_missile_path_must_have_length() {
    let scenario = Scenario {
        missile_aim: Scenario::default().missile_start,
        ..Default::default()
    };
    assert!(BallisticMotion::new(&scenario).is_err());
}

// ---- Coverage ----

#[test]
fn test_reference_deployment_coverage() {
    let evaluator = CoverageEvaluator::from_config(&SmokescreenConfig::default()).unwrap();
    let duration = evaluator.coverage_duration(&reference_deployment());
    assert!(
        duration > 0.5 && duration < 3.0,
        "reference deployment covered {duration} s"
    );
    // Pure: equal inputs, equal output.
    assert_eq!(duration, evaluator.coverage_duration(&reference_deployment()));
}

#[test]
fn test_report_intervals_match_samples() {
    let config = short_window_config(OcclusionStrategy::default());
    let evaluator = CoverageEvaluator::from_config(&config).unwrap();
    let report = evaluator.try_coverage_report(&reference_deployment()).unwrap();

    assert!(report.occluded_samples > 0);
    assert!((report.duration - report.occluded_samples as f64 * config.window.dt()).abs() < 1e-12);
    assert!(!report.intervals.is_empty());
    for interval in &report.intervals {
        assert!(interval.start <= interval.end);
        assert!(interval.start >= 7.0 && interval.end <= 11.0);
        assert!(evaluator.occluded_at(&reference_deployment(), interval.start));
        assert!(evaluator.occluded_at(&reference_deployment(), interval.end));
    }
    for pair in report.intervals.windows(2) {
        assert!(pair[0].end < pair[1].start);
    }
}

#[test]
fn test_cloud_off_the_sightline_covers_nothing() {
    let evaluator = CoverageEvaluator::from_config(&SmokescreenConfig::default()).unwrap();
    let sideways = Deployment::with_heading_degrees(120.0, 1.5, 3.6, 90.0);
    assert_eq!(evaluator.coverage_duration(&sideways), 0.0);
}

#[test]
fn test_faulty_candidates_score_zero() {
    let evaluator = CoverageEvaluator::from_config(&short_window_config(OcclusionStrategy::default())).unwrap();
    assert_eq!(evaluator.fitness(&[120.0, 1.5, 3.6]), 0.0);
    assert_eq!(evaluator.fitness(&[120.0, f64::NAN, 3.6, 180.0]), 0.0);
    assert_eq!(evaluator.fitness(&[-120.0, 1.5, 3.6, 180.0]), 0.0);
    assert!(evaluator
        .try_coverage_report(&Deployment::with_heading_degrees(120.0, -1.0, 3.6, 180.0))
        .is_err());

    let good = evaluator.fitness(&[120.0, 1.5, 3.6, 180.0]);
    assert_eq!(good, evaluator.coverage_duration(&reference_deployment()));
    assert!(good > 0.0);
}

#[test]
fn test_heading_vector_layout_zero_vector() {
    let config = SmokescreenConfig {
        layout: ParameterLayout::HeadingVector,
        ..short_window_config(OcclusionStrategy::default())
    };
    let evaluator = CoverageEvaluator::from_config(&config).unwrap();
    let zero = evaluator.fitness(&[120.0, 1.5, 3.6, 0.0, 0.0]);
    let explicit = evaluator.fitness(&[120.0, 1.5, 3.6, -2.0, 0.0]);
    // Same direction up to rounding; at most an edge sample may flip.
    assert!((zero - explicit).abs() <= 2.0 * config.window.dt() + 1e-12);
    assert!(zero > 0.0);
}

#[test]
fn test_heading_vector_layout_non_finite_direction() {
    let config = SmokescreenConfig {
        layout: ParameterLayout::HeadingVector,
        ..short_window_config(OcclusionStrategy::default())
    };
    let evaluator = CoverageEvaluator::from_config(&config).unwrap();
    let zero = evaluator.fitness(&[120.0, 1.5, 3.6, 0.0, 0.0]);
    assert!(zero > 0.0);
    assert_eq!(evaluator.fitness(&[120.0, 1.5, 3.6, f64::NAN, 0.0]), zero);
    assert_eq!(evaluator.fitness(&[120.0, 1.5, 3.6, 1.0, f64::INFINITY]), zero);
}

#[test]
fn test_evaluator_is_an_optimizer_fitness() {
    let config = short_window_config(OcclusionStrategy::default());
    let evaluator = CoverageEvaluator::from_config(&config).unwrap();
    assert_eq!(evaluator.layout(), ParameterLayout::HeadingAngle);
    assert_eq!(evaluator.window(), &config.window);
    assert_eq!(evaluator.scenario(), &config.scenario);

    let coords = [120.0, 1.5, 3.6, 180.0];
    let via_trait = Fitness::evaluate(&evaluator, &coords);
    assert_eq!(via_trait, evaluator.fitness(&coords));
    assert!(via_trait > 0.0);
    assert_eq!(Fitness::evaluate(&evaluator, &coords[..2]), 0.0);
}

#[test]
fn test_algebraic_agrees_with_sampling() {
    let sampling = CoverageEvaluator::from_config(&short_window_config(OcclusionStrategy::default()))
        .unwrap()
        .coverage_duration(&reference_deployment());
    let algebraic = CoverageEvaluator::from_config(&short_window_config(OcclusionStrategy::algebraic()))
        .unwrap()
        .coverage_duration(&reference_deployment());
    assert!(sampling > 0.5, "sampling covered {sampling} s");
    assert!(algebraic > 0.5, "algebraic covered {algebraic} s");
    assert!(
        (sampling - algebraic).abs() < 0.5,
        "sampling {sampling} s vs algebraic {algebraic} s"
    );
}

/// Cloud parked on the missile, so every live sample is occluded.
struct SmokeOnMissile;

impl MotionModel for SmokeOnMissile {
    fn drone_trajectory(&self, _deployment: &Deployment, t: f64) -> DroneFix {
        let here = self.missile_position(t);
        DroneFix {
            drop_position: here,
            explosion_position: here,
            smoke_position: Some(here),
        }
    }

    fn missile_position(&self, t: f64) -> Vec3 {
        Vec3::new(1_000.0 - t, 0.0, 10.0)
    }
}

#[test]
fn test_custom_motion_model_counts_live_samples() {
    let scenario = Scenario::default();
    let window = EvaluationWindow {
        start: 0.0,
        end: 10.0,
        samples: 1_000,
    };
    let occluder = Occluder::from_strategy(OcclusionStrategy::default(), scenario.target);
    let evaluator = CoverageEvaluator::new(
        scenario,
        window,
        ParameterLayout::HeadingAngle,
        SmokeOnMissile,
        occluder,
    );
    let report = evaluator
        .try_coverage_report(&Deployment::with_heading_degrees(100.0, 1.0, 1.0, 180.0))
        .unwrap();
    // Detonation at 2 s: samples 200..=999 are live.
    assert_eq!(report.occluded_samples, 800);
    assert!((report.duration - 8.0).abs() < 1e-9);
    assert_eq!(report.intervals.len(), 1);
    assert_eq!(report.intervals[0].start, window.time_at(200));
    assert_eq!(report.intervals[0].end, 10.0);
}

#[test]
fn test_report_serializes() {
    let evaluator = CoverageEvaluator::from_config(&short_window_config(OcclusionStrategy::default())).unwrap();
    let report = evaluator.coverage_report(&reference_deployment());
    let json = serde_json::to_value(&report).unwrap();
    assert!(json["duration"].as_f64().unwrap() > 0.0);
    assert!(json["intervals"].is_array());
}
