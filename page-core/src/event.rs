//! Pointer input for canvas interaction.

use serde::{Deserialize, Serialize};

use crate::ElementId;

/// Phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    /// Button pressed.
    Down,
    /// Pointer moved.
    Move,
    /// Button released.
    Up,
}

/// A 2D point in client (viewport) coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Point {
    /// Create a point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Whether both coordinates are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A pointer (mouse) event as delivered by the host UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Phase of this event.
    pub phase: PointerPhase,
    /// Client coordinates.
    pub point: Point,
    /// Element under the pointer, if any. Only meaningful on `Down`.
    #[serde(default)]
    pub target: Option<ElementId>,
}

impl PointerEvent {
    /// Pointer pressed over `target`.
    #[must_use]
    pub fn down(target: ElementId, x: f32, y: f32) -> Self {
        Self {
            phase: PointerPhase::Down,
            point: Point::new(x, y),
            target: Some(target),
        }
    }

    /// Pointer moved.
    #[must_use]
    pub fn moved(x: f32, y: f32) -> Self {
        Self {
            phase: PointerPhase::Move,
            point: Point::new(x, y),
            target: None,
        }
    }

    /// Pointer released.
    #[must_use]
    pub fn up(x: f32, y: f32) -> Self {
        Self {
            phase: PointerPhase::Up,
            point: Point::new(x, y),
            target: None,
        }
    }
}
