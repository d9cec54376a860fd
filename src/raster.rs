use tracing::debug;

use crate::grid::{Grid, WeightGrid};
use crate::pixel::Rgb8;
use crate::resolver::MassMap;

/// Substitutes every pixel of `image` with its resolved mass.
///
/// The result has the same shape as `image`.
///
/// # Panics
///
/// Panics if a pixel color is missing from `masses`. A map produced by
/// [`resolve`](crate::resolve) over the same image always covers
/// every pixel.
pub fn build(image: &Grid<Rgb8>, masses: &MassMap) -> WeightGrid {
    let (rows, cols) = image.shape();
    debug!(rows, cols, colors = masses.len(), "building weight grid");
    image.map(|color| match masses.get(color) {
        Some(mass) => mass,
        None => panic!("color {color} has no resolved mass"),
    })
}
