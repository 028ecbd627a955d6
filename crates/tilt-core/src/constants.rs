// Shared motion and presentation tuning constants used by both web and native frontends.

// Viewport bounds (percent of each axis)
pub const POSITION_MIN: f64 = 0.0;
pub const POSITION_MAX: f64 = 100.0;
pub const START_POSITION: [f64; 2] = [50.0, 50.0]; // centered

// Motion
pub const IMPULSE_GAIN: f64 = 0.1; // velocity change per unit of acceleration
pub const VELOCITY_DAMPING: f64 = 0.7; // velocity retained per tick

// Timer
pub const TICK_INTERVAL_MS: u32 = 16; // ~60 ticks per second

// Ball marker
pub const BALL_DIAMETER_PX: f32 = 50.0;

// Palette, in cycling order
pub const DEFAULT_BALL_COLORS: [&str; 6] = [
    "#3498db", // blue
    "#e74c3c", // red
    "#2ecc71", // green
    "#f1c40f", // yellow
    "#9b59b6", // purple
    "#1abc9c", // teal
];

// Surface background
pub const BACKGROUND_HEX: &str = "#f0f0f0";

#[inline]
pub fn tick_interval() -> std::time::Duration {
    std::time::Duration::from_millis(TICK_INTERVAL_MS as u64)
}
