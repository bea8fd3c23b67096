//! Pattern paths
//!
//! A `Path` is owned outright by the task extending it. Extending never
//! touches the parent: `extended` builds a fresh path, so concurrent children
//! cannot observe each other's points.

use crate::grid::{Point, GRID_POINTS};
use std::fmt;

/// Patterns shorter than this are never emitted
pub const MIN_PATTERN_LEN: usize = 4;

/// An ordered, duplicate-free sequence of grid points
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    /// Points in visiting order
    points: Vec<Point>,

    /// Bitmask of visited points
    visited: u16,
}

impl Path {
    /// Start a path at `start`
    pub fn seed(start: Point) -> Self {
        let mut points = Vec::with_capacity(GRID_POINTS);
        points.push(start);

        Self {
            points,
            visited: start.bit(),
        }
    }

    /// Build a path from a point sequence, rejecting empty or repeating input
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let (&first, rest) = points.split_first()?;
        let mut path = Self::seed(first);
        for &point in rest {
            if path.contains(point) {
                return None;
            }
            path = path.extended(point);
        }
        Some(path)
    }

    /// New path with `next` appended; `self` is left untouched
    pub fn extended(&self, next: Point) -> Self {
        debug_assert!(!self.contains(next), "point {} already visited", next);

        let mut points = Vec::with_capacity(GRID_POINTS);
        points.extend_from_slice(&self.points);
        points.push(next);

        Self {
            points,
            visited: self.visited | next.bit(),
        }
    }

    /// Whether `point` is already on the path
    pub fn contains(&self, point: Point) -> bool {
        self.visited & point.bit() != 0
    }

    /// Most recently visited point
    pub fn last(&self) -> Point {
        // Paths are built from a seed and only grow
        self.points[self.points.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the path has no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Whether the path is long enough to be emitted
    pub fn qualifies(&self) -> bool {
        self.points.len() >= MIN_PATTERN_LEN
    }

    /// Snapshot this path as an emitted pattern
    pub fn to_pattern(&self) -> Option<CompletedPattern> {
        self.qualifies().then(|| CompletedPattern {
            points: self.points.clone(),
        })
    }
}

/// A path of qualifying length, as pushed to the result sink
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompletedPattern {
    points: Vec<Point>,
}

impl CompletedPattern {
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point ids, mainly for comparisons in tests and tools
    pub fn ids(&self) -> Vec<u8> {
        self.points.iter().map(|p| p.id()).collect()
    }
}

/// Formats as `[0 3 6 7 8]`
impl fmt::Display for CompletedPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, point) in self.points.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", point)?;
        }
        f.write_str("]")
    }
}
