//! Ball scene state shared with the web and native frontends.
//!
//! These types avoid platform-specific APIs. Each frontend owns one
//! [`BallScene`] behind `Rc<RefCell<_>>`, feeds it from its input channels and
//! reads [`BallView`] snapshots to draw the marker.

use crate::channel::{CycleColor, Tick};
use crate::motion::{AccelSample, MotionState, PointerSample};
use crate::palette::{cycle_color, BallColor, Palette};

/// Render snapshot: where the marker sits (percent of the surface) and its fill.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BallView {
    pub x_percent: f64,
    pub y_percent: f64,
    pub color_index: usize,
    pub color: BallColor,
}

#[derive(Clone, Debug, Default)]
pub struct BallScene {
    pub motion: MotionState,
    palette: Palette,
    color_index: usize,
}

impl BallScene {
    pub fn new(motion: MotionState, palette: Palette) -> Self {
        Self {
            motion,
            palette,
            color_index: 0,
        }
    }

    pub fn color_index(&self) -> usize {
        self.color_index
    }

    /// Accelerometer sample. Only velocity changes, so nothing to redraw yet.
    pub fn on_accel(&mut self, sample: AccelSample) -> bool {
        self.motion.apply_impulse(sample.x, sample.y);
        false
    }

    /// Pointer sample. Degenerate viewports are ignored.
    pub fn on_pointer(&mut self, sample: PointerSample) -> bool {
        let Some(p) = sample.to_percent() else {
            log::debug!(
                "[pointer] dropped sample with viewport {}x{}",
                sample.viewport_width,
                sample.viewport_height
            );
            return false;
        };
        let before = self.motion.position();
        self.motion.set_position_absolute(p.x, p.y);
        before != p
    }

    pub fn on_tick(&mut self, _tick: Tick) -> bool {
        let before = self.motion.position();
        self.motion.tick();
        let after = self.motion.position();
        log::trace!("[timer] tick pos=({:.2},{:.2})", after.x, after.y);
        before != after
    }

    pub fn on_cycle_color(&mut self, _cmd: CycleColor) -> bool {
        self.color_index = cycle_color(self.color_index, self.palette.len());
        log::info!(
            "[color] now index {} ({})",
            self.color_index,
            self.palette.get(self.color_index).to_hex()
        );
        true
    }

    pub fn view(&self) -> BallView {
        let p = self.motion.position();
        BallView {
            x_percent: p.x,
            y_percent: p.y,
            color_index: self.color_index,
            color: self.palette.get(self.color_index),
        }
    }
}
