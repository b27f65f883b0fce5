use std::fmt;

use serde::Serialize;

use crate::graph::VertexId;

/// Progress of an origin/destination pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SelectionState {
    #[default]
    Idle,
    OriginSet { origin: VertexId },
    PairSet { origin: VertexId, destination: VertexId },
}

impl SelectionState {
    pub fn origin(&self) -> Option<VertexId> {
        match *self {
            SelectionState::Idle => None,
            SelectionState::OriginSet { origin } | SelectionState::PairSet { origin, .. } => {
                Some(origin)
            }
        }
    }

    pub fn destination(&self) -> Option<VertexId> {
        match *self {
            SelectionState::PairSet { destination, .. } => Some(destination),
            _ => None,
        }
    }
}

impl fmt::Display for SelectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionState::Idle => f.write_str("idle"),
            SelectionState::OriginSet { origin } => write!(f, "origin {origin}"),
            SelectionState::PairSet {
                origin,
                destination,
            } => write!(f, "origin {origin}, destination {destination}"),
        }
    }
}

/// What a click or reset did to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum SelectionChange {
    /// Click on empty space; nothing changed.
    Ignored,
    /// A new origin was chosen. `restarted` is set when this discarded a
    /// completed pair.
    OriginSet { origin: VertexId, restarted: bool },
    /// The origin was clicked again and the selection went back to idle.
    OriginCleared { origin: VertexId },
    /// Both ends are known; the caller should run the query.
    PairCompleted { origin: VertexId, destination: VertexId },
    /// Explicit reset.
    Reset,
}

impl SelectionChange {
    /// Whether any previously computed path is now stale.
    pub fn discards_path(&self) -> bool {
        matches!(
            self,
            SelectionChange::OriginSet { restarted: true, .. }
                | SelectionChange::OriginCleared { .. }
                | SelectionChange::Reset
        )
    }
}

/// State machine collecting an origin and a destination from vertex clicks.
///
/// Clicking a third vertex after a completed pair starts a fresh selection
/// with that vertex as the new origin.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    state: SelectionState,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// Feed a click. `None` means the pointer was not over a vertex.
    pub fn click(&mut self, vertex: Option<VertexId>) -> SelectionChange {
        let Some(vertex) = vertex else {
            return SelectionChange::Ignored;
        };

        let (next, change) = match self.state {
            SelectionState::Idle => (
                SelectionState::OriginSet { origin: vertex },
                SelectionChange::OriginSet {
                    origin: vertex,
                    restarted: false,
                },
            ),
            SelectionState::OriginSet { origin } if origin == vertex => (
                SelectionState::Idle,
                SelectionChange::OriginCleared { origin },
            ),
            SelectionState::OriginSet { origin } => (
                SelectionState::PairSet {
                    origin,
                    destination: vertex,
                },
                SelectionChange::PairCompleted {
                    origin,
                    destination: vertex,
                },
            ),
            SelectionState::PairSet { .. } => (
                SelectionState::OriginSet { origin: vertex },
                SelectionChange::OriginSet {
                    origin: vertex,
                    restarted: true,
                },
            ),
        };

        self.state = next;
        change
    }

    pub fn reset(&mut self) -> SelectionChange {
        self.state = SelectionState::Idle;
        SelectionChange::Reset
    }
}
