//! Mine placement and neighbor-count precomputation.
//!
//! Placement is a uniform selection without replacement (partial
//! Fisher-Yates over linear indices). Neighbor counts are built by walking
//! the mines and bumping their neighbors, so the cost scales with the mine
//! count rather than the board area.
//!
//! Randomness is injected through [`MineSource`]: production uses
//! [`OsRandomMines`], tests use [`SeededMines`] or [`FixedMines`].

use std::fmt;

use parking_lot::Mutex;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use super::grid::GridSpec;

/// Fraction of cells that become mines when the caller doesn't ask for a count.
pub const DEFAULT_MINE_RATIO: f64 = 0.15;

/// Resolve how many mines a board gets.
///
/// - `requested` is clamped to `[0, total_cells - 1]`.
/// - Otherwise `floor(total_cells * ratio)` clamped to `[1, total_cells - 1]`.
///
/// Boards with a single cell (or none) get no mines.
pub fn compute_mine_count(total_cells: usize, requested: Option<u32>, ratio: f64) -> usize {
    if total_cells <= 1 {
        return 0;
    }
    let max = total_cells - 1;

    match requested {
        Some(n) => {
            let n = usize::try_from(n).unwrap_or(usize::MAX);
            if n > max {
                debug!(requested = n, max, "mine count clamped");
            }
            n.min(max)
        }
        None => {
            let ratio = if ratio.is_finite() { ratio.max(0.0) } else { 0.0 };
            let derived = (total_cells as f64 * ratio).floor() as usize;
            derived.clamp(1, max)
        }
    }
}

/// Pick `count` distinct indices out of `0..total`, uniformly.
pub fn sample_mine_indices<R: Rng + ?Sized>(rng: &mut R, total: usize, count: usize) -> Vec<usize> {
    let count = count.min(total);
    let mut pool: Vec<usize> = (0..total).collect();
    for i in 0..count {
        let j = rng.random_range(i..total);
        pool.swap(i, j);
    }
    pool.truncate(count);
    pool
}

/// Immutable mine layout with precomputed neighbor counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MineLayout {
    spec: GridSpec,
    is_mine: Vec<bool>,
    neighbor_counts: Vec<u8>,
    mine_count: usize,
}

impl MineLayout {
    /// Build a layout from linear mine indices. Duplicates and out-of-range
    /// indices are ignored.
    pub fn from_mine_indices<I>(spec: GridSpec, mines: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let total = spec.total_cells();
        let mut is_mine = vec![false; total];
        let mut placed = Vec::new();
        for index in mines {
            if index < total && !is_mine[index] {
                is_mine[index] = true;
                placed.push(index);
            }
        }

        // mine cells keep a count of 0
        let mut neighbor_counts = vec![0u8; total];
        for &mine in &placed {
            for neighbor in spec.neighbors(mine) {
                if !is_mine[neighbor] {
                    neighbor_counts[neighbor] += 1;
                }
            }
        }

        Self {
            spec,
            is_mine,
            neighbor_counts,
            mine_count: placed.len(),
        }
    }

    pub fn spec(&self) -> GridSpec {
        self.spec
    }

    pub fn mine_count(&self) -> usize {
        self.mine_count
    }

    pub fn is_mine(&self, index: usize) -> bool {
        self.is_mine.get(index).copied().unwrap_or(false)
    }

    pub fn neighbor_count(&self, index: usize) -> u8 {
        self.neighbor_counts.get(index).copied().unwrap_or(0)
    }

    pub fn mines(&self) -> &[bool] {
        &self.is_mine
    }

    pub fn neighbor_counts(&self) -> &[u8] {
        &self.neighbor_counts
    }

    /// Mine indices in ascending order.
    pub fn mine_indices(&self) -> Vec<usize> {
        self.is_mine
            .iter()
            .enumerate()
            .filter_map(|(i, &m)| m.then_some(i))
            .collect()
    }

    /// Count mines around `(x, y)` by scanning its neighborhood directly.
    pub fn count_neighboring_mines(&self, x: u16, y: u16) -> u8 {
        let index = self.spec.index(x, y);
        self.spec
            .neighbors(index)
            .filter(|&n| self.is_mine[n])
            .count() as u8
    }
}

/// Generate a layout for `spec` using `rng`.
pub fn generate<R: Rng + ?Sized>(
    spec: GridSpec,
    requested: Option<u32>,
    ratio: f64,
    rng: &mut R,
) -> MineLayout {
    let total = spec.total_cells();
    let count = compute_mine_count(total, requested, ratio);
    let mines = sample_mine_indices(rng, total, count);
    MineLayout::from_mine_indices(spec, mines)
}

/// Injectable source of mine layouts.
pub trait MineSource: Send + Sync + fmt::Debug {
    fn layout(&self, spec: GridSpec, requested: Option<u32>, ratio: f64) -> MineLayout;
}

/// Production source: the thread-local CSPRNG, seeded from the OS.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRandomMines;

impl MineSource for OsRandomMines {
    fn layout(&self, spec: GridSpec, requested: Option<u32>, ratio: f64) -> MineLayout {
        let mut rng = rand::rng();
        generate(spec, requested, ratio, &mut rng)
    }
}

/// Deterministic source for reproducible boards.
pub struct SeededMines {
    rng: Mutex<ChaCha8Rng>,
}

impl SeededMines {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }
}

impl fmt::Debug for SeededMines {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeededMines").finish_non_exhaustive()
    }
}

impl MineSource for SeededMines {
    fn layout(&self, spec: GridSpec, requested: Option<u32>, ratio: f64) -> MineLayout {
        let mut rng = self.rng.lock();
        generate(spec, requested, ratio, &mut *rng)
    }
}

/// Places mines at fixed linear indices regardless of the requested count.
#[derive(Debug, Clone, Default)]
pub struct FixedMines {
    indices: Vec<usize>,
}

impl FixedMines {
    pub fn new(indices: impl Into<Vec<usize>>) -> Self {
        Self {
            indices: indices.into(),
        }
    }
}

impl MineSource for FixedMines {
    fn layout(&self, spec: GridSpec, _requested: Option<u32>, _ratio: f64) -> MineLayout {
        MineLayout::from_mine_indices(spec, self.indices.iter().copied())
    }
}
