//! Color to mass assignment.
//!
//! Every distinct pixel color is classified against the palette. Colors
//! classified as the background are massless; every other color is looked up
//! through a [`MassSource`], at most once per distinct triplet regardless of
//! how many pixels share it.

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::memo::Memo;
use crate::palette::{Palette, BACKGROUND};
use crate::pixel::Rgb8;

/// Supplies the mass of a classified color, usually by asking the operator.
pub trait MassSource {
    fn mass_for(&mut self, color_name: &str) -> Result<f64>;
}

impl<F> MassSource for F
where
    F: FnMut(&str) -> Result<f64>,
{
    fn mass_for(&mut self, color_name: &str) -> Result<f64> {
        self(color_name)
    }
}

/// Mass of every distinct color of one image, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MassMap {
    masses: IndexMap<Rgb8, f64>,
}

impl MassMap {
    pub fn get(&self, color: &Rgb8) -> Option<f64> {
        self.masses.get(color).copied()
    }

    pub fn len(&self) -> usize {
        self.masses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Rgb8, f64)> + '_ {
        self.masses.iter().map(|(color, mass)| (*color, *mass))
    }
}

impl FromIterator<(Rgb8, f64)> for MassMap {
    fn from_iter<I: IntoIterator<Item = (Rgb8, f64)>>(iter: I) -> Self {
        Self {
            masses: iter.into_iter().collect(),
        }
    }
}

/// Resolves masses for `colors` against the CSS3 palette.
///
/// `colors` may be the full pixel stream; duplicates never reach `source`.
pub fn resolve<I, S>(colors: I, source: &mut S) -> Result<MassMap>
where
    I: IntoIterator<Item = Rgb8>,
    S: MassSource + ?Sized,
{
    resolve_with(Palette::css3(), colors, source)
}

/// Same as [`resolve`] with an explicit palette.
pub fn resolve_with<I, S>(palette: &Palette, colors: I, source: &mut S) -> Result<MassMap>
where
    I: IntoIterator<Item = Rgb8>,
    S: MassSource + ?Sized,
{
    let mut memo = Memo::new();
    let mut prompted = 0usize;
    for color in colors {
        memo.get_or_try_insert_with(color, |&color| -> Result<f64> {
            let name = palette.classify(color);
            debug!(%color, color_name = name, "classified color");
            if name == BACKGROUND {
                return Ok(0.0);
            }
            prompted += 1;
            let mass = source.mass_for(name)?;
            if !mass.is_finite() || mass < 0.0 {
                return Err(Error::InvalidMass {
                    color: name.to_owned(),
                    value: mass,
                });
            }
            Ok(mass)
        })?;
    }
    info!(distinct = memo.len(), prompted, "resolved color masses");
    Ok(MassMap {
        masses: memo.into_inner(),
    })
}
