//! Platform abstraction traits for the frame runtime.
//!
//! The host decides when frames actually happen. The runtime only tells it
//! that one is wanted, which keeps the control free of any windowing or
//! timer dependency.

/// Schedules work for the runtime.
///
/// Implementations are responsible for arranging a call to
/// [`RuntimeHandle::drain_frame_callbacks`](crate::RuntimeHandle::drain_frame_callbacks)
/// at the next display refresh.
pub trait RuntimeScheduler {
    /// Request that the host schedule a new frame.
    fn schedule_frame(&self);
}
