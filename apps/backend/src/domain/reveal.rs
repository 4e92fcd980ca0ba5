//! Flood-fill reveal propagation.
//!
//! Starting from a safe cell, reveals it and, through zero-count cells,
//! every connected zero region plus its numbered border. Uses an explicit
//! worklist so board size never turns into stack depth.

use std::collections::VecDeque;

use super::grid::GridSpec;

/// Cells uncovered by revealing `(start_x, start_y)`.
///
/// Returns an all-false mask when the start is out of bounds or a mine;
/// detonation is the caller's branch. Mines are never marked.
pub fn reveal_mask(
    spec: GridSpec,
    is_mine: &[bool],
    neighbor_counts: &[u8],
    start_x: i64,
    start_y: i64,
) -> Vec<bool> {
    let total = spec.total_cells();
    let mut revealed = vec![false; total];

    let Some(start) = spec.checked_index(start_x, start_y) else {
        return revealed;
    };
    if is_mine[start] {
        return revealed;
    }

    let mut queue = VecDeque::from([start]);
    revealed[start] = true;

    while let Some(index) = queue.pop_front() {
        if neighbor_counts[index] != 0 {
            continue;
        }
        for neighbor in spec.neighbors(index) {
            if revealed[neighbor] || is_mine[neighbor] {
                continue;
            }
            revealed[neighbor] = true;
            queue.push_back(neighbor);
        }
    }

    revealed
}
