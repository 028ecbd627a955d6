//! Ball motion integrator.
//!
//! Position is kept in percent of the viewport on each axis. Accelerometer
//! samples add to the velocity, pointer samples overwrite the position, and a
//! fixed-period tick integrates, clamps and damps.

use crate::constants::{
    IMPULSE_GAIN, POSITION_MAX, POSITION_MIN, START_POSITION, VELOCITY_DAMPING,
};
use glam::DVec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionParams {
    pub impulse_gain: f64,
    pub damping: f64,
    pub min: f64,
    pub max: f64,
}

impl Default for MotionParams {
    fn default() -> Self {
        Self {
            impulse_gain: IMPULSE_GAIN,
            damping: VELOCITY_DAMPING,
            min: POSITION_MIN,
            max: POSITION_MAX,
        }
    }
}

/// Raw accelerometer reading, gravity included, in device-axis units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AccelSample {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Pointer position in host pixels together with the viewport it was measured in.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerSample {
    pub client_x: f64,
    pub client_y: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

impl PointerSample {
    /// Normalize to percent of the viewport.
    ///
    /// Returns `None` when the viewport has no usable extent. Pointer
    /// coordinates outside the viewport are passed through unclamped.
    pub fn to_percent(&self) -> Option<DVec2> {
        let w = self.viewport_width;
        let h = self.viewport_height;
        if !(w.is_finite() && h.is_finite()) || w <= 0.0 || h <= 0.0 {
            return None;
        }
        let p = DVec2::new(self.client_x / w * 100.0, self.client_y / h * 100.0);
        p.is_finite().then_some(p)
    }
}

#[derive(Clone, Debug)]
pub struct MotionState {
    position: DVec2,
    velocity: DVec2,
    params: MotionParams,
}

impl Default for MotionState {
    fn default() -> Self {
        Self::new(MotionParams::default())
    }
}

impl MotionState {
    pub fn new(params: MotionParams) -> Self {
        Self {
            position: DVec2::from(START_POSITION),
            velocity: DVec2::ZERO,
            params,
        }
    }

    /// Start from an arbitrary state. Used to set up boundary scenarios.
    pub fn with_state(position: DVec2, velocity: DVec2) -> Self {
        Self {
            position,
            velocity,
            params: MotionParams::default(),
        }
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn velocity(&self) -> DVec2 {
        self.velocity
    }

    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    pub fn is_at_rest(&self, epsilon: f64) -> bool {
        self.speed() <= epsilon
    }

    /// Add one accelerometer sample to the velocity.
    ///
    /// The x axis is inverted so that tilting the device moves the ball
    /// downhill on screen.
    pub fn apply_impulse(&mut self, ax: f64, ay: f64) {
        let gain = self.params.impulse_gain;
        self.velocity.x -= ax * gain;
        self.velocity.y += ay * gain;
    }

    /// Teleport to a pointer position already expressed in percent.
    /// Velocity is left alone and no clamping happens here.
    pub fn set_position_absolute(&mut self, px: f64, py: f64) {
        self.position = DVec2::new(px, py);
    }

    /// One integration step: move, clamp to the viewport, then damp.
    pub fn tick(&mut self) {
        let MotionParams {
            damping, min, max, ..
        } = self.params;
        let next = self.position + self.velocity;
        self.position = DVec2::new(next.x.clamp(min, max), next.y.clamp(min, max));
        self.velocity *= damping;
    }
}
