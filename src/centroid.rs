use std::fmt::{Display, Formatter};

use tracing::info;

use crate::error::{Error, Result};
use crate::grid::WeightGrid;
use crate::scale::ScaleRatio;

/// Mass-weighted mean position, `(row, col)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Centroid {
    pub row: f64,
    pub col: f64,
}

impl Centroid {
    /// Centroid of `grid` in grid units, each cell being a point mass at its
    /// `(row, col)` index.
    ///
    /// The grid must hold non-negative finite weights with a non-zero total;
    /// anything else is rejected instead of producing NaN coordinates.
    pub fn of(grid: &WeightGrid) -> Result<Self> {
        // Weighted running mean: the first massive cell sets the mean to its
        // own indices exactly.
        let mut total = 0.0f64;
        let mut row_mean = 0.0f64;
        let mut col_mean = 0.0f64;

        for (row, col, &weight) in grid.iter_indexed() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(Error::InvalidWeight {
                    row,
                    col,
                    value: weight,
                });
            }
            if weight == 0.0 {
                continue;
            }
            total += weight;
            let share = weight / total;
            row_mean += share * (row as f64 - row_mean);
            col_mean += share * (col as f64 - col_mean);
        }

        if total == 0.0 {
            return Err(Error::ZeroTotalMass);
        }
        Ok(Self {
            row: row_mean,
            col: col_mean,
        })
    }

    /// Converts grid units to physical units.
    pub fn scaled(self, scale: ScaleRatio) -> Self {
        let s = scale.value();
        Self {
            row: self.row / s,
            col: self.col / s,
        }
    }
}

impl Display for Centroid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.row, self.col)
    }
}

/// Grid-unit centroid of `grid`, converted by `scale`.
pub fn centroid(grid: &WeightGrid, scale: ScaleRatio) -> Result<Centroid> {
    let raw = Centroid::of(grid)?;
    let scaled = raw.scaled(scale);
    info!(
        raw_row = raw.row,
        raw_col = raw.col,
        %scale,
        "computed center of mass"
    );
    Ok(scaled)
}
