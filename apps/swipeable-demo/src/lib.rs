//! Headless host for the slide-to-confirm controller.
//!
//! Gesture scripts stand in for a touch screen: each line is a pointer event,
//! a layout pass, a host call or an assertion about the resulting state.

pub mod runner;
pub mod script;

pub use runner::{Pacing, ScriptRunner, StepReport};
pub use script::{parse_script, Command, Script, ScriptError, ScriptErrorKind};

/// Scripts shipped with the demo, by name.
pub const BUNDLED_SCRIPTS: [(&str, &str); 6] = [
    ("commit", include_str!("../scripts/commit.swipe")),
    ("cancel", include_str!("../scripts/cancel.swipe")),
    ("rtl", include_str!("../scripts/rtl.swipe")),
    ("layout", include_str!("../scripts/layout.swipe")),
    ("instant", include_str!("../scripts/instant.swipe")),
    ("degenerate", include_str!("../scripts/degenerate.swipe")),
];

/// Looks up a bundled script by name.
pub fn bundled_script(name: &str) -> Option<&'static str> {
    BUNDLED_SCRIPTS
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, source)| *source)
}
