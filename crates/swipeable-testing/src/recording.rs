use std::cell::{Cell, RefCell};
use std::rc::Rc;

use swipeable_button::{ButtonState, HapticKind, SideEffectDispatcher, SideEffectError};

/// Side-effect dispatcher that remembers every haptic request.
///
/// A failing recorder still records the request before reporting an error,
/// so tests can assert both that the pulse was attempted and that the
/// gesture outcome did not depend on it.
#[derive(Debug, Default)]
pub struct RecordingSideEffects {
    haptics: RefCell<Vec<HapticKind>>,
    failure: RefCell<Option<SideEffectError>>,
}

impl RecordingSideEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every request from now on fails with `error`.
    pub fn failing(error: SideEffectError) -> Self {
        let recorder = Self::default();
        recorder.fail_with(Some(error));
        recorder
    }

    pub fn fail_with(&self, error: Option<SideEffectError>) {
        *self.failure.borrow_mut() = error;
    }

    pub fn haptics(&self) -> Vec<HapticKind> {
        self.haptics.borrow().clone()
    }

    pub fn count(&self, kind: HapticKind) -> usize {
        self.haptics
            .borrow()
            .iter()
            .filter(|recorded| **recorded == kind)
            .count()
    }

    pub fn clear(&self) {
        self.haptics.borrow_mut().clear();
    }
}

impl SideEffectDispatcher for RecordingSideEffects {
    fn trigger_haptic(&self, kind: HapticKind) -> Result<(), SideEffectError> {
        self.haptics.borrow_mut().push(kind);
        match self.failure.borrow().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

/// Host callback counters plus the ordered list of state changes.
#[derive(Debug, Default)]
pub struct StateLog {
    successes: Cell<u32>,
    failures: Cell<u32>,
    changes: RefCell<Vec<(ButtonState, ButtonState)>>,
}

impl StateLog {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn record_success(&self) {
        self.successes.set(self.successes.get() + 1);
    }

    pub fn record_failure(&self) {
        self.failures.set(self.failures.get() + 1);
    }

    pub fn record_change(&self, from: ButtonState, to: ButtonState) {
        self.changes.borrow_mut().push((from, to));
    }

    pub fn successes(&self) -> u32 {
        self.successes.get()
    }

    pub fn failures(&self) -> u32 {
        self.failures.get()
    }

    pub fn changes(&self) -> Vec<(ButtonState, ButtonState)> {
        self.changes.borrow().clone()
    }

    /// States entered, in order, without the starting state.
    pub fn visited(&self) -> Vec<ButtonState> {
        self.changes.borrow().iter().map(|(_, to)| *to).collect()
    }
}
