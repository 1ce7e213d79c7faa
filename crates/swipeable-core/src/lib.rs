#![doc = r"Frame runtime pieces shared by the swipeable control crates."]

pub mod frame_clock;
pub mod platform;
pub mod runtime;

pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use platform::RuntimeScheduler;
pub use runtime::{DefaultScheduler, Runtime, RuntimeHandle};

/// Identifier handed out for every registered frame callback.
pub type FrameCallbackId = u64;

/// Nanoseconds in one 60 Hz frame, used by hosts that step a virtual clock.
pub const FRAME_INTERVAL_NANOS: u64 = 16_666_667;
