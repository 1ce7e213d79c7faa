//! Platform side effects fired on gesture transitions.
//!
//! The controller never looks up platform modules itself. Hosts inject one
//! [`SideEffectDispatcher`] per target environment, and anything the
//! dispatcher reports as failed is logged and dropped.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HapticKind {
    /// The handle was picked up.
    Grab,
    /// The action was confirmed.
    Commit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SideEffectError {
    /// No haptic engine on this device or platform.
    Unavailable,
    Platform(String),
}

impl fmt::Display for SideEffectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SideEffectError::Unavailable => write!(f, "haptic feedback unavailable"),
            SideEffectError::Platform(reason) => write!(f, "platform haptics failed: {reason}"),
        }
    }
}

impl std::error::Error for SideEffectError {}

pub trait SideEffectDispatcher {
    /// Best effort; an `Err` never changes the gesture outcome.
    fn trigger_haptic(&self, kind: HapticKind) -> Result<(), SideEffectError>;
}

impl<F> SideEffectDispatcher for F
where
    F: Fn(HapticKind) -> Result<(), SideEffectError>,
{
    fn trigger_haptic(&self, kind: HapticKind) -> Result<(), SideEffectError> {
        self(kind)
    }
}

/// Dispatcher for environments without haptics.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSideEffects;

impl SideEffectDispatcher for NoopSideEffects {
    fn trigger_haptic(&self, _kind: HapticKind) -> Result<(), SideEffectError> {
        Ok(())
    }
}

/// Dispatcher that only logs, handy for headless hosts.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSideEffects;

impl SideEffectDispatcher for LogSideEffects {
    fn trigger_haptic(&self, kind: HapticKind) -> Result<(), SideEffectError> {
        log::info!("haptic pulse: {kind:?}");
        Ok(())
    }
}

pub(crate) fn dispatch_haptic(dispatcher: &dyn SideEffectDispatcher, kind: HapticKind) {
    if let Err(err) = dispatcher.trigger_haptic(kind) {
        log::warn!("dropping {kind:?} haptic: {err}");
    }
}
