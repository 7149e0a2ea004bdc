//! Geometric primitives shared by the queue, trajectory and backends

use serde::{Deserialize, Serialize};

/// A point in host screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Position displaced by a relative vector
    pub fn offset(self, vector: MovementVector) -> Self {
        Self {
            x: self.x.saturating_add(vector.dx),
            y: self.y.saturating_add(vector.dy),
        }
    }

    /// Vector that moves `self` onto `target`
    pub fn delta_to(self, target: Position) -> MovementVector {
        MovementVector::new(
            target.x.saturating_sub(self.x),
            target.y.saturating_sub(self.y),
        )
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl From<Position> for (i32, i32) {
    fn from(position: Position) -> Self {
        (position.x, position.y)
    }
}

/// A requested relative displacement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MovementVector {
    pub dx: i32,
    pub dy: i32,
}

impl MovementVector {
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Replace each component by its sign scaled to `step`
    ///
    /// `quantize(1)` yields components in {-1, 0, 1}.
    pub fn quantize(self, step: i32) -> Self {
        Self {
            dx: self.dx.signum() * step,
            dy: self.dy.signum() * step,
        }
    }

    /// Both components within `limit` of zero
    pub fn within(self, limit: i32) -> bool {
        self.dx.unsigned_abs() <= limit as u32 && self.dy.unsigned_abs() <= limit as u32
    }

    /// Manhattan length
    pub fn manhattan(self) -> i64 {
        self.dx.unsigned_abs() as i64 + self.dy.unsigned_abs() as i64
    }
}
