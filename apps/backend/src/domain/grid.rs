//! Board geometry: dimensions, linear addressing and Moore neighborhoods.
//!
//! Cells are addressed by a single linear index `i = y * columns + x`.
//! Every other module (generator, propagator, board) works in that space.

use crate::errors::domain::{DomainError, ValidationKind};

/// Smallest side length the engine accepts.
pub const MIN_DIMENSION: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    rows: u16,
    columns: u16,
}

impl GridSpec {
    /// Rejects boards with fewer than two rows or columns.
    pub fn new(rows: u16, columns: u16) -> Result<Self, DomainError> {
        if rows < MIN_DIMENSION || columns < MIN_DIMENSION {
            return Err(DomainError::validation(
                ValidationKind::InvalidDimensions,
                format!(
                    "rows and columns must be at least {MIN_DIMENSION} (got {rows}x{columns})"
                ),
            ));
        }
        Ok(Self { rows, columns })
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn columns(&self) -> u16 {
        self.columns
    }

    pub fn total_cells(&self) -> usize {
        usize::from(self.rows) * usize::from(self.columns)
    }

    /// Whether signed coordinates fall inside `[0, columns) x [0, rows)`.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        (0..i64::from(self.columns)).contains(&x) && (0..i64::from(self.rows)).contains(&y)
    }

    /// Linear index of in-bounds coordinates.
    pub fn index(&self, x: u16, y: u16) -> usize {
        debug_assert!(x < self.columns && y < self.rows);
        usize::from(y) * usize::from(self.columns) + usize::from(x)
    }

    /// Linear index of signed coordinates, or `None` when out of bounds.
    pub fn checked_index(&self, x: i64, y: i64) -> Option<usize> {
        if !self.contains(x, y) {
            return None;
        }
        // contains() bounds both to u16 range
        Some(self.index(x as u16, y as u16))
    }

    /// `(x, y)` of a linear index.
    pub fn coords(&self, index: usize) -> (u16, u16) {
        let columns = usize::from(self.columns);
        ((index % columns) as u16, (index / columns) as u16)
    }

    /// In-bounds Moore neighbors of `index`, excluding itself.
    pub fn neighbors(&self, index: usize) -> Neighbors {
        let (x, y) = self.coords(index);
        Neighbors {
            spec: *self,
            x: i64::from(x),
            y: i64::from(y),
            next: 0,
        }
    }
}

const DISPLACEMENTS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Iterator over the linear indices of a cell's neighbors.
#[derive(Debug, Clone)]
pub struct Neighbors {
    spec: GridSpec,
    x: i64,
    y: i64,
    next: usize,
}

impl Iterator for Neighbors {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&(dx, dy)) = DISPLACEMENTS.get(self.next) {
            self.next += 1;
            if let Some(index) = self.spec.checked_index(self.x + dx, self.y + dy) {
                return Some(index);
            }
        }
        None
    }
}
