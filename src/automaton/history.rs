//! Append-only record of completed automaton rows.
//!
//! Renderers draw each generation one row below the previous one and never
//! redraw. The history keeps those rows until the visible area is full, then
//! restarts from the top.

/// Rows reserved up front; larger histories grow on demand.
const PREALLOC_ROWS: usize = 1024;

pub struct History {
    width: usize,
    capacity: usize,
    rows: Vec<u8>,
    /// Times the history wrapped back to the top.
    pub restarts: u64,
}

impl History {
    pub fn new(width: usize, capacity: usize) -> Self {
        History {
            width,
            capacity: capacity.max(1),
            rows: Vec::with_capacity(width.saturating_mul(capacity.clamp(1, PREALLOC_ROWS))),
            restarts: 0,
        }
    }

    /// Append a row. Returns the vertical position it was placed at.
    /// Rows of the wrong width are truncated or zero-padded.
    pub fn push(&mut self, row: &[u8]) -> usize {
        if self.len() == self.capacity {
            self.rows.clear();
            self.restarts += 1;
        }

        let position = self.len();
        let take = row.len().min(self.width);
        self.rows.extend_from_slice(&row[..take]);
        self.rows.resize(self.rows.len() + (self.width - take), 0);
        position
    }

    pub fn len(&self) -> usize {
        if self.width == 0 {
            0
        } else {
            self.rows.len() / self.width
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Row at vertical position `y`, oldest first.
    pub fn row(&self, y: usize) -> Option<&[u8]> {
        if y >= self.len() {
            return None;
        }
        Some(&self.rows[y * self.width..(y + 1) * self.width])
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }
}
