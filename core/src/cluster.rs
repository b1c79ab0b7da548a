use alloc::collections::BTreeSet;
use alloc::vec;
use alloc::vec::Vec;

use ndarray::Array2;

use crate::*;

/// Deduplicated coordinates of every cell that belongs to a qualifying cluster.
///
/// Ordered so that consuming it draws random numbers in a stable sequence.
pub type MatchSet = BTreeSet<Coord2>;

/// Finds every four-connected same-color region with at least [`MIN_CLUSTER`] cells.
///
/// Regions may have any shape. Empty cells never match. The board is not modified, and an empty
/// set means nothing on the board can be cleared.
pub fn find_matches(board: &Board) -> MatchSet {
    find_clusters(board).into_iter().flatten().collect()
}

pub fn has_matches(board: &Board) -> bool {
    !find_clusters(board).is_empty()
}

/// Qualifying regions, each listed in discovery order.
pub fn find_clusters(board: &Board) -> Vec<Vec<Coord2>> {
    let mut visited: Array2<bool> = Array2::default(board.size().to_nd_index());
    let mut clusters = Vec::new();

    for start in board.iter_coords() {
        if visited[start.to_nd_index()] {
            continue;
        }
        let Some(color) = board.cell(start).color() else {
            continue;
        };

        visited[start.to_nd_index()] = true;
        let mut cluster = vec![start];
        let mut stack = vec![start];

        while let Some(coords) = stack.pop() {
            for pos in board.iter_neighbors(coords) {
                if visited[pos.to_nd_index()] || board.cell(pos).color() != Some(color) {
                    continue;
                }
                visited[pos.to_nd_index()] = true;
                stack.push(pos);
                cluster.push(pos);
            }
        }

        if cluster.len() >= MIN_CLUSTER {
            clusters.push(cluster);
        }
    }

    clusters
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn l_shape_of_four_is_found_exactly() {
        let board = Board::from_rows(&[[0, 1, 2], [0, 2, 1], [0, 0, 2]]).unwrap();

        let matches = find_matches(&board);

        assert_eq!(
            matches,
            MatchSet::from([(0, 0), (1, 0), (2, 0), (2, 1)])
        );
    }

    #[test]
    fn pairs_do_not_match() {
        let board = Board::from_rows(&[[0, 0, 1], [1, 2, 2], [0, 1, 0]]).unwrap();

        assert!(find_matches(&board).is_empty());
        assert!(!has_matches(&board));
    }

    #[test]
    fn diagonal_cells_are_not_connected() {
        let board = Board::from_rows(&[[0, 1, 0], [1, 0, 1], [0, 1, 0]]).unwrap();

        assert!(find_matches(&board).is_empty());
    }

    #[test]
    fn several_clusters_are_merged_and_detection_is_idempotent() {
        let board = Board::from_rows(&[[0, 0, 0, 1], [2, 2, 3, 1], [2, 3, 3, 0]]).unwrap();

        let first = find_matches(&board);
        let second = find_matches(&board);

        assert_eq!(first.len(), 9);
        assert_eq!(first, second);
        assert_eq!(find_clusters(&board).len(), 3);
    }

    #[test]
    fn empty_cells_are_skipped() {
        let mut board = Board::from_rows(&[[0, 0, 0]]).unwrap();
        board.clear((0, 1));

        assert!(find_matches(&board).is_empty());
    }
}
