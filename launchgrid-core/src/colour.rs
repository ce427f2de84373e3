//! Colour model
//!
//! Callers ask for colours by name, palette index or RGB. Each variant
//! resolves those requests through its own palette table and channel depth:
//! RGB boards take 0-63 per channel, the original two-colour Mini takes
//! 0-3 for red and green and has no blue LED at all.

use core::fmt;

/// Highest palette index a device accepts
pub const PALETTE_MAX: u8 = 127;

/// Index into the device-resident colour table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PaletteIndex(u8);

impl PaletteIndex {
    /// Palette entry 0, every device shows it as unlit
    pub const OFF: Self = Self(0);

    /// Create an index, clamping to [`PALETTE_MAX`]
    pub const fn new(index: u8) -> Self {
        if index > PALETTE_MAX {
            Self(PALETTE_MAX)
        } else {
            Self(index)
        }
    }

    /// Create an index from any integer, clamping into 0..=127
    pub fn clamped(index: i32) -> Self {
        Self(index.clamp(0, i32::from(PALETTE_MAX)) as u8)
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

/// RGB triple in device brightness units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Pack into a 24-bit integer (`r << 16 | g << 8 | b`)
    pub const fn pack(self) -> u32 {
        (self.red as u32) << 16 | (self.green as u32) << 8 | self.blue as u32
    }

    /// Unpack a 24-bit integer; bits above 24 are ignored
    pub const fn unpack(packed: u32) -> Self {
        Self {
            red: ((packed >> 16) & 0xFF) as u8,
            green: ((packed >> 8) & 0xFF) as u8,
            blue: (packed & 0xFF) as u8,
        }
    }

    /// Check if every channel is zero
    pub const fn is_black(self) -> bool {
        self.red == 0 && self.green == 0 && self.blue == 0
    }
}

/// A resolved, transmittable colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Colour {
    /// Device palette lookup
    Palette(PaletteIndex),
    /// Direct channel values
    Rgb(Rgb),
}

impl Colour {
    pub const OFF: Self = Colour::Palette(PaletteIndex::OFF);
}

impl Default for Colour {
    fn default() -> Self {
        Self::OFF
    }
}

impl From<PaletteIndex> for Colour {
    fn from(index: PaletteIndex) -> Self {
        Colour::Palette(index)
    }
}

impl From<Rgb> for Colour {
    fn from(rgb: Rgb) -> Self {
        Colour::Rgb(rgb)
    }
}

/// Per-variant brightness range of each channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ColourDepth {
    pub red_max: u8,
    pub green_max: u8,
    /// `None` when the board has no blue LED
    pub blue_max: Option<u8>,
}

impl ColourDepth {
    /// Full RGB boards: 6 bits per channel
    pub const RGB_63: Self = Self {
        red_max: 63,
        green_max: 63,
        blue_max: Some(63),
    };

    /// Original Mini: 2 bits of red and green, no blue
    pub const RED_GREEN_3: Self = Self {
        red_max: 3,
        green_max: 3,
        blue_max: None,
    };

    /// Clamp each channel into this depth
    ///
    /// A missing blue channel always resolves to zero.
    pub fn clamp(&self, red: i32, green: i32, blue: i32) -> Rgb {
        Rgb {
            red: clamp_channel(red, self.red_max),
            green: clamp_channel(green, self.green_max),
            blue: self.blue_max.map_or(0, |max| clamp_channel(blue, max)),
        }
    }

    /// Returns true if the board renders arbitrary RGB
    pub const fn has_blue(&self) -> bool {
        self.blue_max.is_some()
    }
}

fn clamp_channel(value: i32, max: u8) -> u8 {
    value.clamp(0, i32::from(max)) as u8
}

/// Named palette entries for one variant
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    entries: &'static [(&'static str, u8)],
}

impl Palette {
    pub const fn new(entries: &'static [(&'static str, u8)]) -> Self {
        Self { entries }
    }

    /// Case-insensitive lookup by name
    pub fn lookup(&self, name: &str) -> Option<PaletteIndex> {
        self.entries
            .iter()
            .find(|(entry, _)| entry.eq_ignore_ascii_case(name))
            .map(|&(_, index)| PaletteIndex::new(index))
    }

    /// Names of entries that light the LED
    pub fn lit_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries
            .iter()
            .filter(|&&(_, index)| index != 0)
            .map(|&(name, _)| name)
    }
}

/// Palette of the RGB boards (Mk2, Mini MK3, Pro)
pub const RGB_PALETTE: Palette = Palette::new(&[
    ("black", 0),
    ("off", 0),
    ("white", 119),
    ("red", 5),
    ("green", 17),
    ("blue", 44),
    ("orange", 84),
    ("purple", 55),
    ("brown", 105),
    ("lime", 75),
    ("pink", 56),
    ("yellow", 108),
    ("grey", 117),
]);

/// Palette of the two-colour Mini (codes are `red | green << 4`)
pub const RED_GREEN_PALETTE: Palette = Palette::new(&[
    ("black", 0),
    ("off", 0),
    ("red", 3),
    ("yellow", 49),
    ("green", 48),
    ("orange", 51),
]);

/// Something a caller asks to be shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColourRequest<'a> {
    /// A palette entry name, e.g. "red"
    Named(&'a str),
    /// A raw palette index, clamped on resolution
    Index(i32),
    /// Channel values, clamped per variant on resolution
    Rgb(i32, i32, i32),
}

impl<'a> ColourRequest<'a> {
    /// Interpret a user string: decimal digits become a palette index,
    /// anything else a colour name
    pub fn parse(text: &'a str) -> Self {
        let trimmed = text.trim();
        match trimmed.parse::<i32>() {
            Ok(index) => ColourRequest::Index(index),
            Err(_) => ColourRequest::Named(trimmed),
        }
    }
}

impl<'a> From<&'a str> for ColourRequest<'a> {
    fn from(text: &'a str) -> Self {
        ColourRequest::parse(text)
    }
}

impl From<Rgb> for ColourRequest<'_> {
    fn from(rgb: Rgb) -> Self {
        ColourRequest::Rgb(rgb.red.into(), rgb.green.into(), rgb.blue.into())
    }
}

impl From<PaletteIndex> for ColourRequest<'_> {
    fn from(index: PaletteIndex) -> Self {
        ColourRequest::Index(index.value().into())
    }
}

/// Colour shown when a name is unknown
pub const FALLBACK_COLOUR: Colour = Colour::OFF;

/// Resolves colour requests for one variant
#[derive(Debug, Clone, Copy)]
pub struct ColorModel {
    palette: &'static Palette,
    depth: ColourDepth,
}

impl ColorModel {
    pub const fn new(palette: &'static Palette, depth: ColourDepth) -> Self {
        Self { palette, depth }
    }

    pub const fn palette(&self) -> &'static Palette {
        self.palette
    }

    pub const fn depth(&self) -> ColourDepth {
        self.depth
    }

    /// Resolve any request into a transmittable colour
    pub fn resolve(&self, request: ColourRequest<'_>) -> Colour {
        match request {
            ColourRequest::Named(name) => self.resolve_name(name),
            ColourRequest::Index(index) => Colour::Palette(PaletteIndex::clamped(index)),
            ColourRequest::Rgb(r, g, b) => Colour::Rgb(self.resolve_rgb(r, g, b)),
        }
    }

    /// Resolve a palette name, falling back to [`FALLBACK_COLOUR`]
    pub fn resolve_name(&self, name: &str) -> Colour {
        match self.palette.lookup(name) {
            Some(index) => Colour::Palette(index),
            None => {
                log::warn!("unknown colour {name:?}, showing off instead");
                FALLBACK_COLOUR
            }
        }
    }

    /// Clamp channels into this variant's depth
    pub fn resolve_rgb(&self, red: i32, green: i32, blue: i32) -> Rgb {
        self.depth.clamp(red, green, blue)
    }

    /// Re-clamp a colour built elsewhere (e.g. for another variant)
    pub fn clamp(&self, colour: Colour) -> Colour {
        match colour {
            Colour::Palette(index) => Colour::Palette(index),
            Colour::Rgb(rgb) => Colour::Rgb(self.resolve_rgb(
                rgb.red.into(),
                rgb.green.into(),
                rgb.blue.into(),
            )),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.red, self.green, self.blue)
    }
}
