//! Auto-extending tape with a head cursor
//!
//! The tape is logically unbounded in both directions: cells materialize
//! lazily with the blank value as the head reaches them, and position 0
//! stays fixed at the first input cell no matter how far the tape grows
//! leftward. Generic over the cell type because the history tape stores
//! intermediate-state identities rather than alphabet symbols.

use crate::machine::Direction;

/// An unbounded symbol sequence with a head cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape<T> {
    /// Materialized cells; `cells[0]` sits at position `origin`
    cells: Vec<T>,

    /// Tape position of the first materialized cell
    origin: i64,

    /// Head position (may lie outside the materialized range)
    head: i64,

    /// Value of every unmaterialized cell
    blank: T,
}

impl<T: Clone + PartialEq> Tape<T> {
    /// Create an empty tape with head at position 0
    pub fn new(blank: T) -> Self {
        Self {
            cells: Vec::new(),
            origin: 0,
            head: 0,
            blank,
        }
    }

    /// Create a tape holding `content` starting at position 0
    pub fn with_content(content: impl IntoIterator<Item = T>, blank: T) -> Self {
        Self {
            cells: content.into_iter().collect(),
            origin: 0,
            head: 0,
            blank,
        }
    }

    /// Current head position
    pub fn head(&self) -> i64 {
        self.head
    }

    /// Reposition the head without materializing anything; used for the
    /// explicit head handoffs between phases
    pub fn set_head(&mut self, position: i64) {
        self.head = position;
    }

    /// The blank cell value
    pub fn blank(&self) -> &T {
        &self.blank
    }

    /// Read the cell under the head; blank outside the materialized range
    pub fn read(&self) -> T {
        self.read_at(self.head)
    }

    /// Read the cell at an arbitrary position
    pub fn read_at(&self, position: i64) -> T {
        let index = position - self.origin;
        if index < 0 || index >= self.cells.len() as i64 {
            self.blank.clone()
        } else {
            self.cells[index as usize].clone()
        }
    }

    /// Write a value at the head, materializing the cell (and any blanks
    /// between it and the previous extent)
    pub fn write(&mut self, value: T) {
        let index = self.materialize(self.head);
        self.cells[index] = value;
    }

    /// Shift the head one cell, extending the tape with blank if the new
    /// position lies outside the materialized range
    pub fn shift(&mut self, direction: Direction) {
        self.head = direction.apply(self.head);
        self.materialize(self.head);
    }

    /// Materialized cells, leftmost first
    pub fn materialized(&self) -> &[T] {
        &self.cells
    }

    /// Position of the leftmost materialized cell
    pub fn origin(&self) -> i64 {
        self.origin
    }

    /// Content from position 0 up to (not including) the first blank cell
    pub fn scan_from_start(&self) -> Vec<T> {
        let mut out = Vec::new();
        let mut position = 0;
        loop {
            let value = self.read_at(position);
            if value == self.blank {
                return out;
            }
            out.push(value);
            position += 1;
        }
    }

    /// Whether both tapes read the same value at every position, ignoring
    /// how far each happens to have materialized
    pub fn same_content(&self, other: &Tape<T>) -> bool {
        let lo = self.origin.min(other.origin);
        let hi = (self.origin + self.cells.len() as i64)
            .max(other.origin + other.cells.len() as i64);
        (lo..hi).all(|pos| self.read_at(pos) == other.read_at(pos))
    }

    /// Ensure the cell at `position` exists; returns its index into `cells`
    fn materialize(&mut self, position: i64) -> usize {
        if self.cells.is_empty() {
            self.origin = position;
            self.cells.push(self.blank.clone());
            return 0;
        }
        if position < self.origin {
            let missing = (self.origin - position) as usize;
            let mut grown = vec![self.blank.clone(); missing];
            grown.append(&mut self.cells);
            self.cells = grown;
            self.origin = position;
            return 0;
        }
        let index = (position - self.origin) as usize;
        if index >= self.cells.len() {
            self.cells.resize(index + 1, self.blank.clone());
        }
        index
    }
}
