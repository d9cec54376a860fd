use std::fmt::{Debug, Display, Formatter};

use bytemuck::{Pod, Zeroable};

/// An 8-bit RGB triplet. Identity is exact channel equality.
#[repr(C)]
#[derive(Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Pod, Zeroable)]
pub struct Rgb8([u8; 3]);

impl Rgb8 {
    pub const WHITE: Rgb8 = Rgb8([0xFF, 0xFF, 0xFF]);
    pub const BLACK: Rgb8 = Rgb8([0, 0, 0]);

    pub const fn from_parts(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Builds a color from a `0xRRGGBB` literal.
    pub const fn from_hex(hex: u32) -> Self {
        Self([
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        ])
    }

    pub const fn to_parts(self) -> (u8, u8, u8) {
        (self.0[0], self.0[1], self.0[2])
    }

    /// Squared euclidean distance in raw channel space.
    #[inline]
    pub const fn dist_sq(self, other: Self) -> u32 {
        let dr = self.0[0] as i32 - other.0[0] as i32;
        let dg = self.0[1] as i32 - other.0[1] as i32;
        let db = self.0[2] as i32 - other.0[2] as i32;
        (dr * dr + dg * dg + db * db) as u32
    }
}

impl Debug for Rgb8 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let (r, g, b) = self.to_parts();
        f.debug_struct("Rgb8")
            .field("r", &r)
            .field("g", &g)
            .field("b", &b)
            .finish()
    }
}

impl Display for Rgb8 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let (r, g, b) = self.to_parts();
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

impl From<[u8; 4]> for Rgb8 {
    /// Drops the alpha channel.
    fn from(value: [u8; 4]) -> Self {
        Self([value[0], value[1], value[2]])
    }
}
