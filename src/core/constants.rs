// Board defaults
pub const DEFAULT_GRID_WIDTH: usize = 10;
pub const DEFAULT_GRID_HEIGHT: usize = 10;
pub const DEFAULT_MINE_DENSITY: f64 = 0.15;
pub const DEFAULT_TOTAL_LAYERS: u32 = 5;
pub const DEFAULT_SCANNER_CHARGES: u32 = 3;

// Scoring
pub const SAFE_REVEAL_POINTS: u64 = 10;
pub const DEFUSE_BONUS_POINTS: u64 = 50;
pub const LAYER_COMPLETE_BONUS: u64 = 100;
pub const VICTORY_BONUS: u64 = 500;

// Timing (milliseconds)
pub const CHALLENGE_TIME_LIMIT_MS: u64 = 5_000;
pub const CHALLENGE_GRACE_MS: u64 = 1_000;
pub const LAYER_TRANSITION_MS: u64 = 3_000;
pub const REALTIME_FRAME_MS: u64 = 16; // ~60 FPS

// Defuse problems
pub const DEFAULT_OPERAND_MIN: u32 = 1;
pub const DEFAULT_OPERAND_MAX: u32 = 25;
pub const MAX_PROBLEM_ATTEMPTS: u32 = 1_000;
pub const MAX_ANSWER_INPUT_LEN: usize = 5;

// Camera
pub const CAMERA_YAW_STEP_DEGREES: f64 = 15.0;
