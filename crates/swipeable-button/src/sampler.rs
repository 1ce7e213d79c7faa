//! Pointer samples to handle offsets.
//!
//! [`DragSampler`] is stateless: every pointer-move carries the total
//! horizontal displacement since pointer-down, so one sample is enough to
//! place the handle. [`DragTracker`] produces that displacement for hosts that
//! only deliver absolute pointer positions.

use crate::travel::TravelRange;

/// One horizontal drag sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSample {
    /// Displacement since pointer-down in screen coordinates; may be negative.
    pub raw_delta_x: f32,
    pub is_rtl: bool,
}

impl DragSample {
    pub fn new(raw_delta_x: f32, is_rtl: bool) -> Self {
        Self {
            raw_delta_x,
            is_rtl,
        }
    }

    /// Displacement along the direction of travel. Mirrored layouts move the
    /// handle leftwards, so their raw delta is negated.
    pub fn corrected_delta_x(&self) -> f32 {
        if self.is_rtl {
            -self.raw_delta_x
        } else {
            self.raw_delta_x
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DragSampler;

impl DragSampler {
    /// Corrects `sample` for layout direction and clamps it into `range`.
    /// Total over every input, NaN included.
    pub fn sample(sample: DragSample, range: TravelRange) -> f32 {
        range.clamp(sample.corrected_delta_x())
    }
}

/// Tracks the pointer-down position so absolute pointer events can be turned
/// into [`DragSample`] displacements.
#[derive(Debug, Clone, Copy, Default)]
pub struct DragTracker {
    start_x: Option<f32>,
    last_x: Option<f32>,
}

impl DragTracker {
    pub fn start(&mut self, x: f32) {
        self.start_x = Some(x);
        self.last_x = Some(x);
    }

    /// Total displacement from the start position, `None` when not tracking.
    pub fn update(&mut self, x: f32) -> Option<f32> {
        let start_x = self.start_x?;
        self.last_x = Some(x);
        Some(x - start_x)
    }

    /// Displacement at the most recent update.
    pub fn total_delta(&self) -> Option<f32> {
        Some(self.last_x? - self.start_x?)
    }

    pub fn end(&mut self) {
        self.start_x = None;
        self.last_x = None;
    }

    pub fn is_tracking(&self) -> bool {
        self.start_x.is_some()
    }
}
