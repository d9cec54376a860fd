//! Center of mass of planar objects.
//!
//! The input is either a numeric weight grid, or a raster image in which each
//! color stands for a material. Image colors are classified against the CSS3
//! named colors, the operator is asked once for the mass of every distinct
//! non-white color, and the resulting weight grid goes through the same
//! weighted-centroid calculation as a numeric grid.
//!
//! ```
//! use comfig::{centroid, rasterize, Grid, Rgb8, ScaleRatio};
//!
//! let red = Rgb8::from_parts(255, 0, 0);
//! let image = Grid::from_vec(1, 3, vec![Rgb8::WHITE, Rgb8::WHITE, red])?;
//! let (_, weights) = rasterize(&image, &mut |_: &str| -> comfig::Result<f64> { Ok(2.0) })?;
//! let c = centroid(&weights, ScaleRatio::UNIT)?;
//! assert_eq!((0.0, 2.0), (c.row, c.col));
//! # Ok::<(), comfig::Error>(())
//! ```

use tracing::debug;

pub use crate::centroid::{centroid, Centroid};
pub use crate::classifier::classify;
pub use crate::error::{Error, Result};
pub use crate::grid::{Grid, WeightGrid};
pub use crate::memo::Memo;
pub use crate::normalize::{index_count, normalize, normalize_by, normalize_weights};
pub use crate::palette::{NamedColor, Palette, BACKGROUND};
pub use crate::pixel::Rgb8;
pub use crate::prompt::{parse_mass, Console, ConsoleIo, ConsoleMassSource, Prompt, PromptState};
pub use crate::raster::build as build_weight_grid;
pub use crate::resolver::{resolve, resolve_with, MassMap, MassSource};
pub use crate::scale::ScaleRatio;

mod centroid;
mod classifier;
mod error;
mod grid;
mod memo;
mod normalize;
mod palette;
mod pixel;
mod prompt;
mod raster;
mod resolver;
mod scale;

/// Turns a color image into a weight grid.
///
/// Masses are resolved once per distinct color through `source`, then
/// substituted into every pixel. The resolved map is returned alongside the
/// grid.
pub fn rasterize<S>(image: &Grid<Rgb8>, source: &mut S) -> Result<(MassMap, WeightGrid)>
where
    S: MassSource + ?Sized,
{
    let (rows, cols) = image.shape();
    debug!(rows, cols, "rasterizing image");
    let masses = resolve(image.cells().iter().copied(), source)?;
    let weights = raster::build(image, &masses);
    Ok((masses, weights))
}
