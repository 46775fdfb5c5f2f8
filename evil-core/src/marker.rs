//! Marker state and the marker search used by the jump instructions.

use serde::{Deserialize, Serialize};

use crate::isa::{MARKER_ALTERNATE, MARKER_NORMAL};

/// Which marker byte the jump instructions look for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerState {
    /// Jumps target `m`.
    #[default]
    Normal,
    /// Jumps target `j`.
    Alternate,
}

impl MarkerState {
    /// The marker byte for this state.
    pub fn marker(self) -> u8 {
        match self {
            MarkerState::Normal => MARKER_NORMAL,
            MarkerState::Alternate => MARKER_ALTERNATE,
        }
    }

    /// The other state.
    pub fn toggled(self) -> Self {
        match self {
            MarkerState::Normal => MarkerState::Alternate,
            MarkerState::Alternate => MarkerState::Normal,
        }
    }
}

/// Search direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward index 0.
    Backward,
    /// Toward the end of the pool.
    Forward,
}

/// Scan `cells` from `start` for `marker`, one index per step.
///
/// Returns the index of the first match, the cell at `start` included. A
/// backward scan with no match stops at 0. A forward scan with no match stops
/// at `cells.len()`, one past the last cell, so the run ends on the next
/// advance. `start` past the end is clamped before scanning.
pub fn seek(cells: &[u8], start: usize, direction: Direction, marker: u8) -> usize {
    if cells.is_empty() {
        return 0;
    }
    let start = start.min(cells.len() - 1);
    match direction {
        Direction::Forward => cells[start..]
            .iter()
            .position(|&b| b == marker)
            .map_or(cells.len(), |offset| start + offset),
        Direction::Backward => cells[..=start]
            .iter()
            .rposition(|&b| b == marker)
            .unwrap_or(0),
    }
}
