//! Reference palette of named colors.
//!
//! The table holds the 147 CSS3 extended color keywords in ascending name
//! order. That order is the canonical iteration order: when two entries are
//! equally close to a pixel, the one listed first is reported. Aliases sharing
//! a triplet (`aqua`/`cyan`, `fuchsia`/`magenta` and the `gray`/`grey`
//! spellings) are all listed, so the alphabetically first alias wins.

use crate::pixel::Rgb8;

/// Name of the palette entry treated as massless background.
pub const BACKGROUND: &str = "white";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct NamedColor {
    pub name: &'static str,
    pub rgb: Rgb8,
}

impl NamedColor {
    pub const fn new(name: &'static str, hex: u32) -> Self {
        Self {
            name,
            rgb: Rgb8::from_hex(hex),
        }
    }
}

/// Immutable, non-empty table of named reference colors.
#[derive(Debug, Copy, Clone)]
pub struct Palette {
    entries: &'static [NamedColor],
}

static CSS3: Palette = Palette::new(&CSS3_ENTRIES);

impl Palette {
    /// # Panics
    ///
    /// Panics if `entries` is empty.
    pub const fn new(entries: &'static [NamedColor]) -> Self {
        assert!(!entries.is_empty(), "palette must not be empty");
        Self { entries }
    }

    /// The process-wide CSS3 palette.
    #[inline]
    pub fn css3() -> &'static Palette {
        &CSS3
    }

    pub fn entries(&self) -> &'static [NamedColor] {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

static CSS3_ENTRIES: [NamedColor; 147] = [
    NamedColor::new("aliceblue", 0xF0F8FF),
    NamedColor::new("antiquewhite", 0xFAEBD7),
    NamedColor::new("aqua", 0x00FFFF),
    NamedColor::new("aquamarine", 0x7FFFD4),
    NamedColor::new("azure", 0xF0FFFF),
    NamedColor::new("beige", 0xF5F5DC),
    NamedColor::new("bisque", 0xFFE4C4),
    NamedColor::new("black", 0x000000),
    NamedColor::new("blanchedalmond", 0xFFEBCD),
    NamedColor::new("blue", 0x0000FF),
    NamedColor::new("blueviolet", 0x8A2BE2),
    NamedColor::new("brown", 0xA52A2A),
    NamedColor::new("burlywood", 0xDEB887),
    NamedColor::new("cadetblue", 0x5F9EA0),
    NamedColor::new("chartreuse", 0x7FFF00),
    NamedColor::new("chocolate", 0xD2691E),
    NamedColor::new("coral", 0xFF7F50),
    NamedColor::new("cornflowerblue", 0x6495ED),
    NamedColor::new("cornsilk", 0xFFF8DC),
    NamedColor::new("crimson", 0xDC143C),
    NamedColor::new("cyan", 0x00FFFF),
    NamedColor::new("darkblue", 0x00008B),
    NamedColor::new("darkcyan", 0x008B8B),
    NamedColor::new("darkgoldenrod", 0xB8860B),
    NamedColor::new("darkgray", 0xA9A9A9),
    NamedColor::new("darkgreen", 0x006400),
    NamedColor::new("darkgrey", 0xA9A9A9),
    NamedColor::new("darkkhaki", 0xBDB76B),
    NamedColor::new("darkmagenta", 0x8B008B),
    NamedColor::new("darkolivegreen", 0x556B2F),
    NamedColor::new("darkorange", 0xFF8C00),
    NamedColor::new("darkorchid", 0x9932CC),
    NamedColor::new("darkred", 0x8B0000),
    NamedColor::new("darksalmon", 0xE9967A),
    NamedColor::new("darkseagreen", 0x8FBC8F),
    NamedColor::new("darkslateblue", 0x483D8B),
    NamedColor::new("darkslategray", 0x2F4F4F),
    NamedColor::new("darkslategrey", 0x2F4F4F),
    NamedColor::new("darkturquoise", 0x00CED1),
    NamedColor::new("darkviolet", 0x9400D3),
    NamedColor::new("deeppink", 0xFF1493),
    NamedColor::new("deepskyblue", 0x00BFFF),
    NamedColor::new("dimgray", 0x696969),
    NamedColor::new("dimgrey", 0x696969),
    NamedColor::new("dodgerblue", 0x1E90FF),
    NamedColor::new("firebrick", 0xB22222),
    NamedColor::new("floralwhite", 0xFFFAF0),
    NamedColor::new("forestgreen", 0x228B22),
    NamedColor::new("fuchsia", 0xFF00FF),
    NamedColor::new("gainsboro", 0xDCDCDC),
    NamedColor::new("ghostwhite", 0xF8F8FF),
    NamedColor::new("gold", 0xFFD700),
    NamedColor::new("goldenrod", 0xDAA520),
    NamedColor::new("gray", 0x808080),
    NamedColor::new("green", 0x008000),
    NamedColor::new("greenyellow", 0xADFF2F),
    NamedColor::new("grey", 0x808080),
    NamedColor::new("honeydew", 0xF0FFF0),
    NamedColor::new("hotpink", 0xFF69B4),
    NamedColor::new("indianred", 0xCD5C5C),
    NamedColor::new("indigo", 0x4B0082),
    NamedColor::new("ivory", 0xFFFFF0),
    NamedColor::new("khaki", 0xF0E68C),
    NamedColor::new("lavender", 0xE6E6FA),
    NamedColor::new("lavenderblush", 0xFFF0F5),
    NamedColor::new("lawngreen", 0x7CFC00),
    NamedColor::new("lemonchiffon", 0xFFFACD),
    NamedColor::new("lightblue", 0xADD8E6),
    NamedColor::new("lightcoral", 0xF08080),
    NamedColor::new("lightcyan", 0xE0FFFF),
    NamedColor::new("lightgoldenrodyellow", 0xFAFAD2),
    NamedColor::new("lightgray", 0xD3D3D3),
    NamedColor::new("lightgreen", 0x90EE90),
    NamedColor::new("lightgrey", 0xD3D3D3),
    NamedColor::new("lightpink", 0xFFB6C1),
    NamedColor::new("lightsalmon", 0xFFA07A),
    NamedColor::new("lightseagreen", 0x20B2AA),
    NamedColor::new("lightskyblue", 0x87CEFA),
    NamedColor::new("lightslategray", 0x778899),
    NamedColor::new("lightslategrey", 0x778899),
    NamedColor::new("lightsteelblue", 0xB0C4DE),
    NamedColor::new("lightyellow", 0xFFFFE0),
    NamedColor::new("lime", 0x00FF00),
    NamedColor::new("limegreen", 0x32CD32),
    NamedColor::new("linen", 0xFAF0E6),
    NamedColor::new("magenta", 0xFF00FF),
    NamedColor::new("maroon", 0x800000),
    NamedColor::new("mediumaquamarine", 0x66CDAA),
    NamedColor::new("mediumblue", 0x0000CD),
    NamedColor::new("mediumorchid", 0xBA55D3),
    NamedColor::new("mediumpurple", 0x9370DB),
    NamedColor::new("mediumseagreen", 0x3CB371),
    NamedColor::new("mediumslateblue", 0x7B68EE),
    NamedColor::new("mediumspringgreen", 0x00FA9A),
    NamedColor::new("mediumturquoise", 0x48D1CC),
    NamedColor::new("mediumvioletred", 0xC71585),
    NamedColor::new("midnightblue", 0x191970),
    NamedColor::new("mintcream", 0xF5FFFA),
    NamedColor::new("mistyrose", 0xFFE4E1),
    NamedColor::new("moccasin", 0xFFE4B5),
    NamedColor::new("navajowhite", 0xFFDEAD),
    NamedColor::new("navy", 0x000080),
    NamedColor::new("oldlace", 0xFDF5E6),
    NamedColor::new("olive", 0x808000),
    NamedColor::new("olivedrab", 0x6B8E23),
    NamedColor::new("orange", 0xFFA500),
    NamedColor::new("orangered", 0xFF4500),
    NamedColor::new("orchid", 0xDA70D6),
    NamedColor::new("palegoldenrod", 0xEEE8AA),
    NamedColor::new("palegreen", 0x98FB98),
    NamedColor::new("paleturquoise", 0xAFEEEE),
    NamedColor::new("palevioletred", 0xDB7093),
    NamedColor::new("papayawhip", 0xFFEFD5),
    NamedColor::new("peachpuff", 0xFFDAB9),
    NamedColor::new("peru", 0xCD853F),
    NamedColor::new("pink", 0xFFC0CB),
    NamedColor::new("plum", 0xDDA0DD),
    NamedColor::new("powderblue", 0xB0E0E6),
    NamedColor::new("purple", 0x800080),
    NamedColor::new("red", 0xFF0000),
    NamedColor::new("rosybrown", 0xBC8F8F),
    NamedColor::new("royalblue", 0x4169E1),
    NamedColor::new("saddlebrown", 0x8B4513),
    NamedColor::new("salmon", 0xFA8072),
    NamedColor::new("sandybrown", 0xF4A460),
    NamedColor::new("seagreen", 0x2E8B57),
    NamedColor::new("seashell", 0xFFF5EE),
    NamedColor::new("sienna", 0xA0522D),
    NamedColor::new("silver", 0xC0C0C0),
    NamedColor::new("skyblue", 0x87CEEB),
    NamedColor::new("slateblue", 0x6A5ACD),
    NamedColor::new("slategray", 0x708090),
    NamedColor::new("slategrey", 0x708090),
    NamedColor::new("snow", 0xFFFAFA),
    NamedColor::new("springgreen", 0x00FF7F),
    NamedColor::new("steelblue", 0x4682B4),
    NamedColor::new("tan", 0xD2B48C),
    NamedColor::new("teal", 0x008080),
    NamedColor::new("thistle", 0xD8BFD8),
    NamedColor::new("tomato", 0xFF6347),
    NamedColor::new("turquoise", 0x40E0D0),
    NamedColor::new("violet", 0xEE82EE),
    NamedColor::new("wheat", 0xF5DEB3),
    NamedColor::new("white", 0xFFFFFF),
    NamedColor::new("whitesmoke", 0xF5F5F5),
    NamedColor::new("yellow", 0xFFFF00),
    NamedColor::new("yellowgreen", 0x9ACD32),
];
