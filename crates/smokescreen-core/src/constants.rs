//! Scenario constants and tuning parameters.

// --- Kinematics ---

/// Gravitational acceleration (m/s²).
pub const GRAVITY: f64 = 9.81;

/// Missile closing speed (m/s).
pub const MISSILE_SPEED: f64 = 300.0;

/// Drone start position (m).
pub const DRONE_START: [f64; 3] = [17_800.0, 0.0, 1_800.0];

/// Missile start position (m).
pub const MISSILE_START: [f64; 3] = [20_000.0, 0.0, 2_000.0];

/// Point the missile flies at. Also the reference for the default drone heading.
pub const MISSILE_AIM: [f64; 3] = [0.0, 0.0, 0.0];

// --- Smoke cloud ---

/// Effective radius of the detonated smoke cloud (m).
pub const SMOKE_RADIUS: f64 = 10.0;

/// Seconds the cloud stays effective after detonation.
pub const SMOKE_LIFETIME_SECS: f64 = 20.0;

/// Constant sink rate of the cloud after detonation (m/s).
pub const SMOKE_SINK_SPEED: f64 = 3.0;

// --- Protected target ---

/// Centre of the target cylinder's base disc (m).
pub const TARGET_BASE_CENTER: [f64; 3] = [0.0, 200.0, 0.0];

/// Target cylinder radius (m).
pub const TARGET_RADIUS: f64 = 7.0;

/// Target cylinder height (m).
pub const TARGET_HEIGHT: f64 = 10.0;

// --- Evaluation window ---

/// Start of the evaluation window (s).
pub const WINDOW_START_SECS: f64 = 0.0;

/// End of the evaluation window (s).
pub const WINDOW_END_SECS: f64 = 50.0;

/// Number of evenly spaced time samples over the window.
pub const WINDOW_SAMPLES: usize = 50_000;

// --- Occlusion tests ---

/// Lateral-surface points drawn by the sampling test.
pub const OCCLUSION_SURFACE_SAMPLES: usize = 200;

/// Restart guesses for the algebraic boundary search.
pub const ALGEBRAIC_RESTARTS: usize = 10;

/// Residual below which a boundary root is accepted.
pub const ALGEBRAIC_TOLERANCE: f64 = 1e-8;

/// Gauss-Newton iterations per restart.
pub const ALGEBRAIC_MAX_ITERATIONS: usize = 50;

/// Default seed for geometry sample draws.
pub const GEOMETRY_SEED: u64 = 7;

// --- Hybrid optimizer ---

pub const SWARM_SIZE: usize = 30;
pub const MAX_ITERATIONS: usize = 100;

/// Starting annealing temperature.
pub const INITIAL_TEMPERATURE: f64 = 100.0;

/// Perturbation is skipped once the temperature drops to this floor.
pub const MIN_TEMPERATURE: f64 = 1e-8;

/// Geometric cooling factor applied once per iteration.
pub const COOLING_RATE: f64 = 0.95;

/// Annealing perturbation half-width as a fraction of each dimension's range.
pub const SA_STEP_FRACTION: f64 = 0.1;

/// Velocity clamp as a fraction of each dimension's range.
pub const VELOCITY_CLAMP_FRACTION: f64 = 0.2;

/// Initial velocity half-width as a fraction of each dimension's range.
pub const INITIAL_VELOCITY_FRACTION: f64 = 0.5;

/// Inertia weight schedule endpoints (start, end).
pub const INERTIA_SCHEDULE: (f64, f64) = (0.9, 0.2);

/// Cognitive coefficient schedule endpoints (start, end).
pub const COGNITIVE_SCHEDULE: (f64, f64) = (2.5, 1.0);

/// Social coefficient schedule endpoints (start, end).
pub const SOCIAL_SCHEDULE: (f64, f64) = (0.5, 2.0);

/// Maximum number of entries kept on the leaderboard.
pub const LEADERBOARD_CAPACITY: usize = 10;

/// Default optimizer seed.
pub const OPTIMIZER_SEED: u64 = 42;
