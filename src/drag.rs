use eframe::egui::{Pos2, Vec2};

/// A single-pointer input event in screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Down(Pos2),
    Move(Pos2),
    Up(Pos2),
}

/// Lives from pointer-down to pointer-up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    last: Pos2,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging(_))
    }

    /// Advances the state machine and moves `offset` by the pointer's
    /// movement since the previous event of the same session.
    ///
    /// Returns the delta that was applied, if any.
    pub fn handle(&mut self, event: PointerEvent, offset: &mut Vec2) -> Option<Vec2> {
        match (*self, event) {
            (_, PointerEvent::Down(pos)) => {
                *self = DragState::Dragging(DragSession { last: pos });
                None
            }
            (DragState::Dragging(session), PointerEvent::Move(pos)) => {
                let delta = pos - session.last;
                *offset += delta;
                *self = DragState::Dragging(DragSession { last: pos });
                Some(delta)
            }
            (DragState::Dragging(_), PointerEvent::Up(_)) => {
                *self = DragState::Idle;
                None
            }
            (DragState::Idle, PointerEvent::Move(_) | PointerEvent::Up(_)) => None,
        }
    }
}
