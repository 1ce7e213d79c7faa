//! Absolute pointer events for hosts that do not track drag displacement.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    /// The platform took the gesture away (scroll parent, system gesture).
    Cancel,
}

/// Single-pointer event in container coordinates. Only the horizontal
/// position matters to a slide control.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub x: f32,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, x: f32) -> Self {
        Self { kind, x }
    }

    pub fn down(x: f32) -> Self {
        Self::new(PointerEventKind::Down, x)
    }

    pub fn moved(x: f32) -> Self {
        Self::new(PointerEventKind::Move, x)
    }

    pub fn up(x: f32) -> Self {
        Self::new(PointerEventKind::Up, x)
    }

    pub fn cancel(x: f32) -> Self {
        Self::new(PointerEventKind::Cancel, x)
    }
}
