//! Grid topology for the 3×3 lock screen
//!
//! Points are numbered in row-major order:
//!
//! ```text
//! 0 1 2
//! 3 4 5
//! 6 7 8
//! ```
//!
//! Every point has a fixed geometric role. The main diagonal runs from the
//! upper left to the lower right, the anti diagonal from the upper right to
//! the lower left. The center sits on both, corners on exactly one, and side
//! points on neither.

use std::fmt;

/// Number of points on the grid
pub const GRID_POINTS: usize = 9;

/// Points per row
const GRID_WIDTH: u8 = 3;

/// The center point, the only point on both diagonals
pub const CENTER: Point = Point(4);

/// Geometric role of a grid point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DotRole {
    /// On both diagonals (point 4)
    Center,
    /// On exactly one diagonal (points 0, 2, 6, 8)
    Corner,
    /// On neither diagonal (points 1, 3, 5, 7)
    Side,
}

/// Roles of all points, indexed by point id
const ROLES: [DotRole; GRID_POINTS] = {
    let mut roles = [DotRole::Side; GRID_POINTS];
    let mut id = 0;
    while id < GRID_POINTS {
        roles[id] = role_of(id as u8);
        id += 1;
    }
    roles
};

const fn role_of(id: u8) -> DotRole {
    let row = id / GRID_WIDTH;
    let col = id % GRID_WIDTH;
    let on_main = row == col;
    let on_anti = row + col == GRID_WIDTH - 1;

    match (on_main, on_anti) {
        (true, true) => DotRole::Center,
        (true, false) | (false, true) => DotRole::Corner,
        (false, false) => DotRole::Side,
    }
}

/// One of the nine grid dots
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point(u8);

impl Point {
    /// All nine points in ascending order
    pub const ALL: [Point; GRID_POINTS] = [
        Point(0),
        Point(1),
        Point(2),
        Point(3),
        Point(4),
        Point(5),
        Point(6),
        Point(7),
        Point(8),
    ];

    /// Create a point, returning `None` when `id` is off the grid
    pub fn new(id: u8) -> Option<Self> {
        ((id as usize) < GRID_POINTS).then_some(Self(id))
    }

    /// Point id in `0..9`
    pub fn id(self) -> u8 {
        self.0
    }

    /// Zero-based row
    pub fn row(self) -> u8 {
        self.0 / GRID_WIDTH
    }

    /// Zero-based column
    pub fn col(self) -> u8 {
        self.0 % GRID_WIDTH
    }

    /// Bit used for this point in a visited mask
    pub(crate) fn bit(self) -> u16 {
        1 << self.0
    }

    /// Geometric role of this point
    pub fn role(self) -> DotRole {
        classify(self)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Classify a point by its geometric role
pub fn classify(point: Point) -> DotRole {
    ROLES[point.0 as usize]
}

/// Point lying between `a` and `b`
///
/// Only meaningful when `a` and `b` are two corners, or two opposite sides,
/// of a straight line through a third grid point. This is not a general
/// collinearity test.
pub fn midpoint(a: Point, b: Point) -> Point {
    let (low, high) = if a.0 <= b.0 { (a.0, b.0) } else { (b.0, a.0) };
    Point(low + (high - low) / 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(id: u8) -> Point {
        Point::new(id).unwrap()
    }

    #[test]
    fn test_role_partition() {
        let count = |role| Point::ALL.iter().filter(|&&pt| classify(pt) == role).count();

        assert_eq!(count(DotRole::Center), 1);
        assert_eq!(count(DotRole::Corner), 4);
        assert_eq!(count(DotRole::Side), 4);
    }

    #[test]
    fn test_specific_roles() {
        assert_eq!(classify(p(4)), DotRole::Center);
        for id in [0, 2, 6, 8] {
            assert_eq!(classify(p(id)), DotRole::Corner, "point {}", id);
        }
        for id in [1, 3, 5, 7] {
            assert_eq!(classify(p(id)), DotRole::Side, "point {}", id);
        }
    }

    #[test]
    fn test_point_bounds() {
        assert!(Point::new(8).is_some());
        assert!(Point::new(9).is_none());
        assert_eq!(p(7).row(), 2);
        assert_eq!(p(7).col(), 1);
    }

    #[test]
    fn test_midpoint_corners() {
        assert_eq!(midpoint(p(0), p(2)), p(1));
        assert_eq!(midpoint(p(0), p(6)), p(3));
        assert_eq!(midpoint(p(0), p(8)), CENTER);
        assert_eq!(midpoint(p(2), p(6)), CENTER);
        assert_eq!(midpoint(p(8), p(2)), p(5));
        assert_eq!(midpoint(p(8), p(6)), p(7));
    }

    #[test]
    fn test_midpoint_opposite_sides() {
        assert_eq!(midpoint(p(1), p(7)), CENTER);
        assert_eq!(midpoint(p(5), p(3)), CENTER);
    }
}
