use std::ops::Index;

use crate::error::{Error, Result};
use crate::pixel::Rgb8;

/// Dense row-major 2-D grid.
///
/// Used both for decoded images (`Grid<Rgb8>`) and for weight grids
/// (`Grid<f64>`). Cells are addressed as `(row, col)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    cells: Vec<T>,
    rows: usize,
    cols: usize,
}

/// Per-cell mass, the common input of the centroid calculation.
pub type WeightGrid = Grid<f64>;

impl<T> Grid<T> {
    pub fn from_vec(rows: usize, cols: usize, cells: Vec<T>) -> Result<Self> {
        if rows.checked_mul(cols) != Some(cells.len()) {
            return Err(Error::Shape {
                rows,
                cols,
                len: cells.len(),
            });
        }
        Ok(Self { cells, rows, cols })
    }

    /// Builds a grid from rows of possibly different lengths, padding short
    /// rows with `fill` up to the widest one.
    pub fn from_ragged_rows(rows: Vec<Vec<T>>, fill: T) -> Self
    where
        T: Clone,
    {
        let cols = rows.iter().map(Vec::len).max().unwrap_or(0);
        let n_rows = rows.len();
        let mut cells = Vec::with_capacity(n_rows * cols);
        for mut row in rows {
            row.resize(cols, fill.clone());
            cells.extend(row);
        }
        Self {
            cells,
            rows: n_rows,
            cols,
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> {
        // chunks_exact panics on a zero chunk size
        let width = self.cols.max(1);
        self.cells.chunks_exact(width).take(self.rows)
    }

    /// Cells together with their `(row, col)` position, row-major.
    pub fn iter_indexed(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (i / cols, i % cols, cell))
    }

    /// Applies `f` to every cell, keeping the shape.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            cells: self.cells.iter().map(f).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Grid of this shape holding `cells`.
    pub(crate) fn with_cells<U>(&self, cells: Vec<U>) -> Grid<U> {
        debug_assert_eq!(self.cells.len(), cells.len());
        Grid {
            cells,
            rows: self.rows,
            cols: self.cols,
        }
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        assert!(
            row < self.rows && col < self.cols,
            "cell ({row}, {col}) outside a {}x{} grid",
            self.rows,
            self.cols
        );
        &self.cells[col + row * self.cols]
    }
}

impl Grid<Rgb8> {
    /// Wraps an interleaved RGB8 buffer, `width` pixels per row.
    pub fn from_rgb_bytes(bytes: &[u8], width: usize, height: usize) -> Result<Self> {
        check_buffer(bytes, width, height, 3)?;
        let pixels: &[Rgb8] = bytemuck::cast_slice(bytes);
        Self::from_vec(height, width, pixels.to_vec())
    }

    /// Wraps an interleaved RGBA8 buffer, discarding the alpha channel.
    pub fn from_rgba_bytes(bytes: &[u8], width: usize, height: usize) -> Result<Self> {
        check_buffer(bytes, width, height, 4)?;
        let quads: &[[u8; 4]] = bytemuck::cast_slice(bytes);
        Self::from_vec(height, width, quads.iter().copied().map(Rgb8::from).collect())
    }
}

fn check_buffer(bytes: &[u8], width: usize, height: usize, channels: usize) -> Result<()> {
    let expected = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(channels));
    if expected != Some(bytes.len()) {
        return Err(Error::BufferSize {
            actual: bytes.len(),
            width,
            height,
            channels,
        });
    }
    Ok(())
}
