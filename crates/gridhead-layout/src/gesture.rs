//! Header drag gesture lifecycle.
//!
//! ```text
//! Idle -> DragStarted -> Dragging -> Idle (drop)
//!    \          \-----------\-----> Idle (leave / cancel)
//!     \---------------------------> DragStarted (new drag supersedes)
//! ```
//!
//! The machine only tracks which gesture is active; the resize and reorder
//! engines compute the actual commands.

use serde::{Deserialize, Serialize};

/// The gesture a drag belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "gesture", rename_all = "snake_case")]
pub enum HeaderGesture {
    /// Column move started from the header text of `source_index`.
    Move { source_index: usize },
    /// Width drag started from the handle of the cell at `column_index`.
    Resize { column_index: usize },
}

/// Lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum HeaderDragState {
    #[default]
    Idle,
    DragStarted {
        gesture: HeaderGesture,
        started_sequence: u64,
    },
    Dragging {
        gesture: HeaderGesture,
        started_sequence: u64,
        samples: u32,
    },
}

impl HeaderDragState {
    /// Active gesture, if any.
    #[must_use]
    pub const fn gesture(&self) -> Option<HeaderGesture> {
        match self {
            Self::Idle => None,
            Self::DragStarted { gesture, .. } | Self::Dragging { gesture, .. } => Some(*gesture),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderCancelReason {
    /// Pointer left the header without dropping.
    LeftHeader,
    /// Host-initiated (escape key, focus loss, teardown).
    Programmatic,
    /// A new drag-start replaced the active gesture.
    Superseded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HeaderDragEventKind {
    DragStart { gesture: HeaderGesture },
    DragMove { cell_index: usize },
    Drop { target_index: usize },
    DragLeave,
    Cancel { reason: HeaderCancelReason },
}

/// One input event with its delivery sequence number (strictly increasing,
/// starting at 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderDragEvent {
    pub sequence: u64,
    pub kind: HeaderDragEventKind,
}

impl HeaderDragEvent {
    #[must_use]
    pub const fn new(sequence: u64, kind: HeaderDragEventKind) -> Self {
        Self { sequence, kind }
    }
}

/// Events that are safely ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderDragNoopReason {
    IdleWithoutActiveDrag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum HeaderDragEffect {
    Started {
        gesture: HeaderGesture,
    },
    Superseded {
        previous: HeaderGesture,
        gesture: HeaderGesture,
    },
    Sampled {
        gesture: HeaderGesture,
        cell_index: usize,
        samples: u32,
    },
    Dropped {
        gesture: HeaderGesture,
        target_index: usize,
    },
    Canceled {
        gesture: Option<HeaderGesture>,
        reason: HeaderCancelReason,
    },
    Noop {
        reason: HeaderDragNoopReason,
    },
}

/// One state-machine transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderDragTransition {
    pub transition_id: u64,
    pub sequence: u64,
    pub from: HeaderDragState,
    pub to: HeaderDragState,
    pub effect: HeaderDragEffect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HeaderDragError {
    #[error("event sequence must be > 0")]
    ZeroSequence,
    #[error("event sequence {sequence} is not after {last}")]
    NonMonotonicSequence { sequence: u64, last: u64 },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderDragMachine {
    state: HeaderDragState,
    last_sequence: u64,
    transition_counter: u64,
}

impl HeaderDragMachine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> HeaderDragState {
        self.state
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        !matches!(self.state, HeaderDragState::Idle)
    }

    #[must_use]
    pub const fn last_sequence(&self) -> u64 {
        self.last_sequence
    }

    /// Reset to Idle without an event. Returns `None` when already idle.
    ///
    /// The transition carries sequence 0 and
    /// [`HeaderCancelReason::Programmatic`].
    pub fn force_cancel(&mut self) -> Option<HeaderDragTransition> {
        let gesture = self.state.gesture()?;
        let from = self.state;
        self.state = HeaderDragState::Idle;
        Some(self.record(
            0,
            from,
            HeaderDragEffect::Canceled {
                gesture: Some(gesture),
                reason: HeaderCancelReason::Programmatic,
            },
        ))
    }

    /// Apply one event.
    pub fn apply_event(
        &mut self,
        event: &HeaderDragEvent,
    ) -> Result<HeaderDragTransition, HeaderDragError> {
        if event.sequence == 0 {
            return Err(HeaderDragError::ZeroSequence);
        }
        if event.sequence <= self.last_sequence {
            return Err(HeaderDragError::NonMonotonicSequence {
                sequence: event.sequence,
                last: self.last_sequence,
            });
        }
        self.last_sequence = event.sequence;

        let from = self.state;
        let effect = match (from, event.kind) {
            (HeaderDragState::Idle, HeaderDragEventKind::DragStart { gesture }) => {
                self.state = HeaderDragState::DragStarted {
                    gesture,
                    started_sequence: event.sequence,
                };
                HeaderDragEffect::Started { gesture }
            }
            (HeaderDragState::Idle, _) => HeaderDragEffect::Noop {
                reason: HeaderDragNoopReason::IdleWithoutActiveDrag,
            },
            (
                HeaderDragState::DragStarted {
                    gesture: previous, ..
                }
                | HeaderDragState::Dragging {
                    gesture: previous, ..
                },
                HeaderDragEventKind::DragStart { gesture },
            ) => {
                self.state = HeaderDragState::DragStarted {
                    gesture,
                    started_sequence: event.sequence,
                };
                HeaderDragEffect::Superseded { previous, gesture }
            }
            (
                HeaderDragState::DragStarted {
                    gesture,
                    started_sequence,
                },
                HeaderDragEventKind::DragMove { cell_index },
            ) => {
                self.state = HeaderDragState::Dragging {
                    gesture,
                    started_sequence,
                    samples: 1,
                };
                HeaderDragEffect::Sampled {
                    gesture,
                    cell_index,
                    samples: 1,
                }
            }
            (
                HeaderDragState::Dragging {
                    gesture,
                    started_sequence,
                    samples,
                },
                HeaderDragEventKind::DragMove { cell_index },
            ) => {
                let samples = samples.saturating_add(1);
                self.state = HeaderDragState::Dragging {
                    gesture,
                    started_sequence,
                    samples,
                };
                HeaderDragEffect::Sampled {
                    gesture,
                    cell_index,
                    samples,
                }
            }
            (
                HeaderDragState::DragStarted { gesture, .. }
                | HeaderDragState::Dragging { gesture, .. },
                HeaderDragEventKind::Drop { target_index },
            ) => {
                self.state = HeaderDragState::Idle;
                HeaderDragEffect::Dropped {
                    gesture,
                    target_index,
                }
            }
            (
                HeaderDragState::DragStarted { gesture, .. }
                | HeaderDragState::Dragging { gesture, .. },
                HeaderDragEventKind::DragLeave,
            ) => {
                self.state = HeaderDragState::Idle;
                HeaderDragEffect::Canceled {
                    gesture: Some(gesture),
                    reason: HeaderCancelReason::LeftHeader,
                }
            }
            (
                HeaderDragState::DragStarted { gesture, .. }
                | HeaderDragState::Dragging { gesture, .. },
                HeaderDragEventKind::Cancel { reason },
            ) => {
                self.state = HeaderDragState::Idle;
                HeaderDragEffect::Canceled {
                    gesture: Some(gesture),
                    reason,
                }
            }
        };

        Ok(self.record(event.sequence, from, effect))
    }

    fn record(
        &mut self,
        sequence: u64,
        from: HeaderDragState,
        effect: HeaderDragEffect,
    ) -> HeaderDragTransition {
        self.transition_counter = self.transition_counter.saturating_add(1);
        let transition = HeaderDragTransition {
            transition_id: self.transition_counter,
            sequence,
            from,
            to: self.state,
            effect,
        };
        tracing::debug!(
            message = "header.gesture.transition",
            transition_id = transition.transition_id,
            sequence,
            from = ?transition.from,
            to = ?transition.to,
            effect = ?transition.effect,
        );
        transition
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOVE: HeaderGesture = HeaderGesture::Move { source_index: 0 };
    const RESIZE: HeaderGesture = HeaderGesture::Resize { column_index: 1 };

    fn event(sequence: u64, kind: HeaderDragEventKind) -> HeaderDragEvent {
        HeaderDragEvent::new(sequence, kind)
    }

    #[test]
    fn full_move_lifecycle() {
        let mut machine = HeaderDragMachine::new();
        let started = machine
            .apply_event(&event(1, HeaderDragEventKind::DragStart { gesture: MOVE }))
            .unwrap();
        assert_eq!(started.effect, HeaderDragEffect::Started { gesture: MOVE });
        assert!(machine.is_active());

        let sampled = machine
            .apply_event(&event(2, HeaderDragEventKind::DragMove { cell_index: 2 }))
            .unwrap();
        assert!(matches!(
            sampled.to,
            HeaderDragState::Dragging { samples: 1, .. }
        ));
        let sampled = machine
            .apply_event(&event(3, HeaderDragEventKind::DragMove { cell_index: 2 }))
            .unwrap();
        assert!(matches!(
            sampled.effect,
            HeaderDragEffect::Sampled { samples: 2, .. }
        ));

        let dropped = machine
            .apply_event(&event(4, HeaderDragEventKind::Drop { target_index: 2 }))
            .unwrap();
        assert_eq!(
            dropped.effect,
            HeaderDragEffect::Dropped {
                gesture: MOVE,
                target_index: 2
            }
        );
        assert_eq!(machine.state(), HeaderDragState::Idle);
        assert_eq!(dropped.transition_id, 4);
    }

    #[test]
    fn leaving_header_cancels_without_drop() {
        let mut machine = HeaderDragMachine::new();
        machine
            .apply_event(&event(1, HeaderDragEventKind::DragStart { gesture: RESIZE }))
            .unwrap();
        let left = machine
            .apply_event(&event(2, HeaderDragEventKind::DragLeave))
            .unwrap();
        assert_eq!(
            left.effect,
            HeaderDragEffect::Canceled {
                gesture: Some(RESIZE),
                reason: HeaderCancelReason::LeftHeader
            }
        );
        assert!(!machine.is_active());
    }

    #[test]
    fn new_drag_supersedes_active_gesture() {
        let mut machine = HeaderDragMachine::new();
        machine
            .apply_event(&event(1, HeaderDragEventKind::DragStart { gesture: RESIZE }))
            .unwrap();
        let superseded = machine
            .apply_event(&event(2, HeaderDragEventKind::DragStart { gesture: MOVE }))
            .unwrap();
        assert_eq!(
            superseded.effect,
            HeaderDragEffect::Superseded {
                previous: RESIZE,
                gesture: MOVE
            }
        );
        assert_eq!(machine.state().gesture(), Some(MOVE));
    }

    #[test]
    fn idle_events_are_noops() {
        let mut machine = HeaderDragMachine::new();
        let noop = machine
            .apply_event(&event(1, HeaderDragEventKind::Drop { target_index: 0 }))
            .unwrap();
        assert_eq!(
            noop.effect,
            HeaderDragEffect::Noop {
                reason: HeaderDragNoopReason::IdleWithoutActiveDrag
            }
        );
        assert_eq!(noop.from, noop.to);
    }

    #[test]
    fn sequence_must_increase() {
        let mut machine = HeaderDragMachine::new();
        assert_eq!(
            machine.apply_event(&event(0, HeaderDragEventKind::DragLeave)),
            Err(HeaderDragError::ZeroSequence)
        );
        machine
            .apply_event(&event(5, HeaderDragEventKind::DragLeave))
            .unwrap();
        assert_eq!(
            machine.apply_event(&event(5, HeaderDragEventKind::DragLeave)),
            Err(HeaderDragError::NonMonotonicSequence {
                sequence: 5,
                last: 5
            })
        );
    }

    #[test]
    fn force_cancel_only_when_active() {
        let mut machine = HeaderDragMachine::new();
        assert!(machine.force_cancel().is_none());
        machine
            .apply_event(&event(1, HeaderDragEventKind::DragStart { gesture: MOVE }))
            .unwrap();
        let canceled = machine.force_cancel().expect("active machine cancels");
        assert_eq!(canceled.sequence, 0);
        assert_eq!(
            canceled.effect,
            HeaderDragEffect::Canceled {
                gesture: Some(MOVE),
                reason: HeaderCancelReason::Programmatic
            }
        );
    }

    #[test]
    fn transition_serializes_with_tags() {
        let mut machine = HeaderDragMachine::new();
        let transition = machine
            .apply_event(&event(1, HeaderDragEventKind::DragStart { gesture: MOVE }))
            .unwrap();
        let json = serde_json::to_value(transition).unwrap();
        assert_eq!(json["effect"]["effect"], "started");
        assert_eq!(json["to"]["state"], "drag_started");
    }
}
