//! # Drag controller
//!
//! Turns a pointer gesture into element movement that costs exactly one
//! history step.
//!
//! ```text
//!            pointer_down(E)               pointer_up
//!   ┌──────┐ ──────────────> ┌──────────┐ ──────────> ┌──────┐
//!   │ Idle │                 │ Dragging │   commit    │ Idle │
//!   └──────┘ <────────────── └──────────┘             └──────┘
//!                            pointer_move: stage position on live doc
//! ```
//!
//! Intermediate frames are staged on the live document without touching
//! history. The whole gesture is folded into one commit on release.

use crate::{ElementId, HistoryStore, PageResult, Point, Position, Selection};

/// An in-flight drag gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct DragGesture {
    /// Element being moved.
    pub target: ElementId,
    /// Pointer position minus element position at pointer-down.
    pub offset: Point,
    /// Element position when the gesture started.
    pub origin: Position,
}

impl DragGesture {
    /// Element position for a pointer at `pointer`.
    #[must_use]
    pub fn position_at(&self, pointer: Point) -> Position {
        Position::new(pointer.x - self.offset.x, pointer.y - self.offset.y)
    }
}

/// Drag state machine.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A gesture is moving one element.
    Dragging(DragGesture),
}

/// Converts pointer events into staged moves and a single commit.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    /// Create an idle controller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Whether a gesture is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// The element being dragged, if any.
    #[must_use]
    pub fn target(&self) -> Option<&ElementId> {
        match &self.state {
            DragState::Dragging(gesture) => Some(&gesture.target),
            DragState::Idle => None,
        }
    }

    /// Start dragging `target` and select it.
    ///
    /// Returns `false` without changing anything if a gesture is already
    /// active or `target` is not in the live document.
    pub fn pointer_down(
        &mut self,
        history: &HistoryStore,
        selection: &mut Selection,
        target: &ElementId,
        pointer: Point,
    ) -> bool {
        if let DragState::Dragging(gesture) = &self.state {
            tracing::warn!(
                active = %gesture.target,
                ignored = %target,
                "Pointer down during an active drag ignored"
            );
            return false;
        }
        if !pointer.is_finite() {
            tracing::warn!(element = %target, "Pointer down at non-finite coordinates ignored");
            return false;
        }
        let Some(element) = history.current().get(target) else {
            tracing::warn!(element = %target, "Pointer down on unknown element ignored");
            return false;
        };

        let origin = element.position;
        let offset = Point::new(pointer.x - origin.x, pointer.y - origin.y);
        selection.select(Some(target.clone()));
        self.state = DragState::Dragging(DragGesture {
            target: target.clone(),
            offset,
            origin,
        });
        tracing::debug!(element = %target, x = origin.x, y = origin.y, "Drag started");
        true
    }

    /// Move the dragged element under the pointer without recording history.
    ///
    /// Returns `false` when idle, when the target has disappeared, or when
    /// the resulting position would not be finite.
    pub fn pointer_move(&mut self, history: &mut HistoryStore, pointer: Point) -> bool {
        let DragState::Dragging(gesture) = &self.state else {
            return false;
        };
        let position = gesture.position_at(pointer);
        if !position.is_finite() {
            tracing::warn!(element = %gesture.target, "Pointer move to non-finite position ignored");
            return false;
        }
        history.stage().set_position(&gesture.target, position)
    }

    /// Finish the gesture.
    ///
    /// Commits the live document once if the element moved, or always when
    /// `commit_zero_delta` is set. Returns whether a commit happened.
    ///
    /// # Errors
    ///
    /// Propagates a rejected commit; the controller is idle afterwards
    /// either way.
    pub fn pointer_up(
        &mut self,
        history: &mut HistoryStore,
        commit_zero_delta: bool,
    ) -> PageResult<bool> {
        let DragState::Dragging(gesture) = std::mem::take(&mut self.state) else {
            return Ok(false);
        };

        let moved = history.has_staged_changes();
        if !moved && !commit_zero_delta {
            tracing::debug!(element = %gesture.target, "Drag ended without movement");
            return Ok(false);
        }

        let finished = history.current().clone();
        let position = finished.get(&gesture.target).map(|e| e.position);
        history.commit(finished)?;
        tracing::debug!(
            element = %gesture.target,
            x = position.map(|p| p.x),
            y = position.map(|p| p.y),
            "Drag committed"
        );
        Ok(true)
    }
}
