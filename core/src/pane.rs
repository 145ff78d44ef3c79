use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::EMPTY_CELL_ATTEMPTS;
use crate::error::ConfigError;
use crate::types::{Cell, PaneBounds};

/// One player's lane: an inclusive column range. Rows are unbounded.
/// Deserializes through `PaneBounds`, so inverted bounds are rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PaneBounds")]
pub struct Pane {
    x0: i32,
    x1: i32,
}

impl Pane {
    /// Returns `None` when `x0 > x1`.
    pub fn new(x0: i32, x1: i32) -> Option<Self> {
        (x0 <= x1).then_some(Self { x0, x1 })
    }

    pub fn x0(&self) -> i32 {
        self.x0
    }

    pub fn x1(&self) -> i32 {
        self.x1
    }

    pub fn width(&self) -> i32 {
        self.x1 - self.x0 + 1
    }

    /// Column of the lane's centre, rounded toward negative infinity.
    pub fn center_x(&self) -> i32 {
        (self.x0 + self.x1).div_euclid(2)
    }

    pub fn inside(&self, x: i32) -> bool {
        self.x0 <= x && x <= self.x1
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.inside(cell.x)
    }

    pub fn rand_x<R: Rng + ?Sized>(&self, rng: &mut R) -> i32 {
        rng.gen_range(self.x0..=self.x1)
    }

    /// Rejection-samples a cell in `[x0, x1] x [y_min, y_max]` not in `occupied`.
    /// Gives up after `EMPTY_CELL_ATTEMPTS` collisions.
    pub fn get_empty_cell<R: Rng + ?Sized>(
        &self,
        occupied: &HashSet<Cell>,
        y_min: i32,
        y_max: i32,
        rng: &mut R,
    ) -> Option<Cell> {
        if y_min > y_max {
            return None;
        }
        (0..EMPTY_CELL_ATTEMPTS)
            .map(|_| Cell::new(self.rand_x(rng), rng.gen_range(y_min..=y_max)))
            .find(|cell| !occupied.contains(cell))
    }
}

impl TryFrom<PaneBounds> for Pane {
    type Error = ConfigError;

    fn try_from(b: PaneBounds) -> Result<Self, Self::Error> {
        Pane::new(b.x0, b.x1).ok_or(ConfigError::InvertedRange {
            name: "pane",
            min: b.x0,
            max: b.x1,
        })
    }
}
