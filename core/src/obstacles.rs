use std::collections::BTreeSet;

use crate::types::Cell;

/// Sparse set of blocked cells. Ordered so iteration is reproducible.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Obstacles {
    blocks: BTreeSet<Cell>,
}

impl Obstacles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idempotent.
    pub fn add(&mut self, x: i32, y: i32) {
        self.blocks.insert(Cell::new(x, y));
    }

    pub fn collides(&self, cell: Cell) -> bool {
        self.blocks.contains(&cell)
    }

    /// Drop every block with `y >= threshold`.
    pub fn cleanup(&mut self, threshold: i32) {
        self.blocks.retain(|c| c.y < threshold);
    }

    pub fn blocks(&self) -> impl Iterator<Item = Cell> + '_ {
        self.blocks.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
