//! Headless test harness for swipeable controls.

mod recording;
mod testing;

pub use recording::{RecordingSideEffects, StateLog};
pub use testing::{run_swipe_test, SwipeTestRule, MAX_SETTLE_FRAMES};
