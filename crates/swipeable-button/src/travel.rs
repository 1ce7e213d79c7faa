//! Travel range derived from container layout.

/// Maximum distance the handle may move, `container_width - handle_width`.
///
/// Never negative: a container narrower than its handle yields a zero range,
/// on which every release cancels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TravelRange {
    length: f32,
}

impl TravelRange {
    pub const ZERO: Self = Self { length: 0.0 };

    /// Clamps negative and non-finite lengths to zero.
    pub fn new(length: f32) -> Self {
        if length.is_finite() && length > 0.0 {
            Self { length }
        } else {
            Self::ZERO
        }
    }

    /// Derives the range from a layout pass. A negative handle width counts as
    /// zero, so the handle can never travel further than the container.
    pub fn from_layout(container_width: f32, handle_width: f32) -> Self {
        let handle_width = if handle_width.is_finite() {
            handle_width.max(0.0)
        } else {
            0.0
        };
        Self::new(container_width - handle_width)
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    /// `true` when the handle cannot move at all.
    pub fn is_degenerate(&self) -> bool {
        self.length <= 0.0
    }

    /// Clamps `offset` into `[0, length]`; NaN maps to 0.
    pub fn clamp(&self, offset: f32) -> f32 {
        if offset.is_nan() {
            return 0.0;
        }
        offset.clamp(0.0, self.length)
    }

    /// Fraction of the range covered by `offset`, 0 on a degenerate range.
    pub fn progress(&self, offset: f32) -> f32 {
        if self.is_degenerate() {
            0.0
        } else {
            self.clamp(offset) / self.length
        }
    }
}
