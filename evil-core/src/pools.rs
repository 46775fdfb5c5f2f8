//! Memory pools.
//!
//! The source and wheel pools share one representation, [`Pool`], because the
//! swap instruction exchanges them wholesale: after a swap the old wheel is
//! executed as code and the old program is scratch memory. The source pool
//! uses its cursor linearly; the wheel treats the same storage as a ring.

use serde::{Deserialize, Serialize};

/// Number of cells in the pental pool.
pub const PENTAL_SIZE: usize = 5;

/// A byte buffer with a cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    cells: Vec<u8>,
    cursor: usize,
}

impl Pool {
    /// Pool over `cells` with the cursor at 0.
    pub fn new(cells: Vec<u8>) -> Self {
        Self { cells, cursor: 0 }
    }

    /// A fresh wheel: one zero cell.
    pub fn wheel() -> Self {
        Self::new(vec![0])
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when the pool holds no cells. Only a source pool loaded from an
    /// empty program can be empty.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Current cursor position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Cell contents.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Byte at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<u8> {
        self.cells.get(index).copied()
    }

    // Source-side operations. The cursor may run past the end; that is how a
    // run terminates.

    /// Byte under the cursor, or `None` once the cursor has run off the end.
    pub fn fetch(&self) -> Option<u8> {
        self.get(self.cursor)
    }

    /// Move the cursor forward by one without bounds checks. Saturates rather
    /// than wrapping so an exhausted pool stays exhausted.
    pub fn advance(&mut self) {
        self.cursor = self.cursor.saturating_add(1);
    }

    /// True once the cursor is at or past the end.
    pub fn exhausted(&self) -> bool {
        self.cursor >= self.cells.len()
    }

    pub(crate) fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor;
    }

    // Wheel-side operations. These assume the pool is non-empty and the
    // cursor is in range, which holds for every pool reachable as a wheel.

    /// The cell under the cursor.
    pub fn current(&self) -> u8 {
        self.cells[self.cursor]
    }

    /// Overwrite the cell under the cursor.
    pub fn set_current(&mut self, value: u8) {
        self.cells[self.cursor] = value;
    }

    /// Exchange `value` with the cell under the cursor, returning the old cell.
    pub fn exchange_current(&mut self, value: u8) -> u8 {
        std::mem::replace(&mut self.cells[self.cursor], value)
    }

    /// Step the cursor forward, wrapping at the end.
    pub fn rotate_forward(&mut self) {
        self.cursor = (self.cursor + 1) % self.cells.len();
    }

    /// Step the cursor backward, wrapping at the start.
    pub fn rotate_backward(&mut self) {
        let len = self.cells.len();
        self.cursor = (self.cursor + len - 1) % len;
    }

    /// Insert a zero cell before the current one. The cursor stays at the
    /// same index and so addresses the new cell.
    pub fn insert_cell(&mut self) {
        self.cells.insert(self.cursor, 0);
    }

    /// Remove the current cell. The following cell slides under the cursor;
    /// removing the highest cell wraps the cursor to 0. A single-cell pool is
    /// left untouched. Returns whether a cell was removed.
    pub fn delete_cell(&mut self) -> bool {
        if self.cells.len() <= 1 {
            return false;
        }
        self.cells.remove(self.cursor);
        if self.cursor >= self.cells.len() {
            self.cursor = 0;
        }
        true
    }
}

/// The fixed five-cell ring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pental {
    cells: [u8; PENTAL_SIZE],
    cursor: usize,
}

impl Pental {
    /// All cells zero, cursor at 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current cursor position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Cell contents.
    pub fn cells(&self) -> &[u8; PENTAL_SIZE] {
        &self.cells
    }

    /// The cell under the cursor.
    pub fn current(&self) -> u8 {
        self.cells[self.cursor]
    }

    /// Overwrite the cell under the cursor.
    pub fn set_current(&mut self, value: u8) {
        self.cells[self.cursor] = value;
    }

    /// Exchange `value` with the cell under the cursor, returning the old cell.
    pub fn exchange_current(&mut self, value: u8) -> u8 {
        std::mem::replace(&mut self.cells[self.cursor], value)
    }

    /// Step the cursor forward, wrapping 4 -> 0.
    pub fn rotate_forward(&mut self) {
        self.cursor = (self.cursor + 1) % PENTAL_SIZE;
    }

    /// Step the cursor backward, wrapping 0 -> 4.
    pub fn rotate_backward(&mut self) {
        self.cursor = (self.cursor + PENTAL_SIZE - 1) % PENTAL_SIZE;
    }
}
