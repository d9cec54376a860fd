use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::Error;

/// Physical units per grid unit, written `numerator:denominator`.
///
/// Reported coordinates are grid coordinates divided by [`ScaleRatio::value`],
/// so `2:1` halves them.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScaleRatio {
    numerator: f64,
    denominator: f64,
}

impl ScaleRatio {
    pub const UNIT: ScaleRatio = ScaleRatio {
        numerator: 1.0,
        denominator: 1.0,
    };

    /// Returns `None` unless the ratio is positive and finite.
    pub fn new(numerator: f64, denominator: f64) -> Option<Self> {
        let value = numerator / denominator;
        (value.is_finite() && value > 0.0).then_some(Self {
            numerator,
            denominator,
        })
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.numerator / self.denominator
    }
}

impl Default for ScaleRatio {
    fn default() -> Self {
        Self::UNIT
    }
}

impl FromStr for ScaleRatio {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidScale(s.to_owned());
        let (numerator, denominator) = s.trim().split_once(':').ok_or_else(invalid)?;
        let numerator: f64 = numerator.trim().parse().map_err(|_| invalid())?;
        let denominator: f64 = denominator.trim().parse().map_err(|_| invalid())?;
        Self::new(numerator, denominator).ok_or_else(invalid)
    }
}

impl Display for ScaleRatio {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.numerator, self.denominator)
    }
}
