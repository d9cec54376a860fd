//! Remaps grid values onto a dense index range for color-mapped display.

use std::hash::Hash;

use indexmap::IndexMap;

use crate::grid::{Grid, WeightGrid};

/// Replaces every cell with the index of its value among the distinct values
/// of `grid`.
///
/// Indices are assigned `0, 1, 2, ...` in row-major first-seen order, so equal
/// cells share an index and distinct cells never do.
pub fn normalize<T: Hash + Eq>(grid: &Grid<T>) -> Grid<usize> {
    normalize_by(grid, |value| value)
}

/// Like [`normalize`] but compares cells through `key`.
pub fn normalize_by<'g, T, K, F>(grid: &'g Grid<T>, mut key: F) -> Grid<usize>
where
    K: Hash + Eq,
    F: FnMut(&'g T) -> K,
{
    let mut indices: IndexMap<K, usize> = IndexMap::new();
    let cells = grid
        .cells()
        .iter()
        .map(|value| {
            let next = indices.len();
            *indices.entry(key(value)).or_insert(next)
        })
        .collect();
    grid.with_cells(cells)
}

/// [`normalize`] for weight grids. `-0.0` and `0.0` count as one value.
pub fn normalize_weights(grid: &WeightGrid) -> Grid<usize> {
    normalize_by(grid, |&w| if w == 0.0 { 0u64 } else { w.to_bits() })
}

/// Number of distinct indices in a normalized grid.
pub fn index_count(normalized: &Grid<usize>) -> usize {
    normalized.cells().iter().max().map_or(0, |&max| max + 1)
}
