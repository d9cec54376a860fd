use crate::palette::{NamedColor, Palette};
use crate::pixel::Rgb8;

impl Palette {
    /// Entry nearest to `color` by squared channel distance.
    ///
    /// Ties go to the entry listed first.
    pub fn closest(&self, color: Rgb8) -> &'static NamedColor {
        let entries = self.entries();
        let mut best = &entries[0];
        let mut best_d = u32::MAX;
        for entry in entries {
            let d = color.dist_sq(entry.rgb);
            if d < best_d {
                best_d = d;
                best = entry;
                if d == 0 {
                    break;
                }
            }
        }
        best
    }

    /// Name of the entry nearest to `color`.
    #[inline]
    pub fn classify(&self, color: Rgb8) -> &'static str {
        self.closest(color).name
    }
}

/// Classifies `color` against the CSS3 palette.
pub fn classify(color: Rgb8) -> &'static str {
    Palette::css3().classify(color)
}
