//! Move legality (the skip rule)
//!
//! A line between two points may not jump over an unvisited point. On a 3×3
//! grid only two kinds of moves can pass through a third point:
//!
//! - corner to corner, through a side point or the center
//! - side to opposite side, through the center
//!
//! Everything else (knight moves, moves to or from the center, adjacent
//! points) is always legal as long as the target is unvisited.

use crate::grid::{classify, midpoint, DotRole, Point, CENTER, GRID_POINTS};
use crate::walker::path::Path;

/// Opposite side points sum to this id
const OPPOSITE_SIDE_SUM: u8 = (GRID_POINTS - 1) as u8;

/// Decide whether moving from the end of `path` to `candidate` is legal
pub fn is_legal_move(path: &Path, candidate: Point) -> bool {
    if path.contains(candidate) {
        return false;
    }

    let last = path.last();
    match classify(last) {
        DotRole::Corner => {
            classify(candidate) != DotRole::Corner || path.contains(midpoint(last, candidate))
        }
        DotRole::Side => {
            if classify(candidate) != DotRole::Side {
                true
            } else if last.id() + candidate.id() == OPPOSITE_SIDE_SUM {
                path.contains(CENTER)
            } else {
                true
            }
        }
        DotRole::Center => true,
    }
}

/// Legal next points for `path`, in ascending order
pub fn legal_moves(path: &Path) -> impl Iterator<Item = Point> + '_ {
    Point::ALL
        .into_iter()
        .filter(move |&candidate| is_legal_move(path, candidate))
}

/// Whether every transition in `points` is legal relative to its prefix
pub fn is_valid_pattern(points: &[Point]) -> bool {
    let Some((&first, rest)) = points.split_first() else {
        return false;
    };

    let mut path = Path::seed(first);
    for &next in rest {
        if !is_legal_move(&path, next) {
            return false;
        }
        path = path.extended(next);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(id: u8) -> Point {
        Point::new(id).unwrap()
    }

    fn path(ids: &[u8]) -> Path {
        let points: Vec<Point> = ids.iter().map(|&id| p(id)).collect();
        Path::from_points(&points).unwrap()
    }

    #[test]
    fn test_corner_to_corner_needs_center() {
        assert!(!is_legal_move(&path(&[0]), p(8)));
        assert!(is_legal_move(&path(&[4, 0]), p(8)));
        assert!(!is_legal_move(&path(&[1, 0]), p(8)));
    }

    #[test]
    fn test_corner_to_corner_along_edge() {
        assert!(!is_legal_move(&path(&[0]), p(2)));
        assert!(is_legal_move(&path(&[1, 0]), p(2)));
        assert!(!is_legal_move(&path(&[6]), p(0)));
        assert!(is_legal_move(&path(&[3, 6]), p(0)));
    }

    #[test]
    fn test_corner_to_non_corner() {
        for target in [1, 3, 4, 5, 7] {
            assert!(is_legal_move(&path(&[0]), p(target)), "0 -> {}", target);
        }
    }

    #[test]
    fn test_opposite_sides_need_center() {
        assert!(!is_legal_move(&path(&[1]), p(7)));
        assert!(is_legal_move(&path(&[4, 1]), p(7)));
        assert!(!is_legal_move(&path(&[5]), p(3)));
        assert!(is_legal_move(&path(&[4, 5]), p(3)));
    }

    #[test]
    fn test_adjacent_sides_always_legal() {
        assert!(is_legal_move(&path(&[1]), p(3)));
        assert!(is_legal_move(&path(&[1]), p(5)));
        assert!(is_legal_move(&path(&[7]), p(3)));
    }

    #[test]
    fn test_side_to_corner_knight_moves() {
        assert!(is_legal_move(&path(&[1]), p(6)));
        assert!(is_legal_move(&path(&[1]), p(8)));
    }

    #[test]
    fn test_center_reaches_everything() {
        let from_center: Vec<u8> = legal_moves(&path(&[4])).map(Point::id).collect();
        assert_eq!(from_center, vec![0, 1, 2, 3, 5, 6, 7, 8]);
    }

    #[test]
    fn test_visited_points_are_illegal() {
        assert!(!is_legal_move(&path(&[4, 0]), p(4)));
        assert!(!is_legal_move(&path(&[0, 1]), p(0)));
    }

    #[test]
    fn test_first_move_counts() {
        // Corners reach 5 points, sides 7, the center 8
        assert_eq!(legal_moves(&path(&[0])).count(), 5);
        assert_eq!(legal_moves(&path(&[1])).count(), 7);
        assert_eq!(legal_moves(&path(&[4])).count(), 8);
    }

    #[test]
    fn test_valid_pattern() {
        let ids = |ids: &[u8]| ids.iter().map(|&id| p(id)).collect::<Vec<_>>();
        assert!(is_valid_pattern(&ids(&[0, 3, 6, 7, 8])));
        assert!(is_valid_pattern(&ids(&[4, 0, 8, 7, 6])));
        assert!(is_valid_pattern(&ids(&[1, 0, 2, 5])));
        assert!(!is_valid_pattern(&ids(&[0, 8, 4, 2])));
        assert!(!is_valid_pattern(&[]));
    }
}
