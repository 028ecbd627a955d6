use crate::constants::DEFAULT_BALL_COLORS;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaletteError {
    #[error("palette must contain at least one color")]
    Empty,

    #[error("invalid hex color {0:?}, expected #rrggbb")]
    InvalidHex(String),
}

/// sRGB color with 8-bit channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BallColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl BallColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn from_hex(hex: &str) -> Result<Self, PaletteError> {
        let invalid = || PaletteError::InvalidHex(hex.to_string());
        let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Linear-light RGBA for sRGB render targets.
    pub fn to_linear_rgba(self) -> [f32; 4] {
        let lin = |c: u8| {
            let c = c as f32 / 255.0;
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        };
        [lin(self.r), lin(self.g), lin(self.b), 1.0]
    }
}

/// Next palette index, wrapping at the end. An empty palette always yields 0.
#[inline]
pub fn cycle_color(current_index: usize, palette_size: usize) -> usize {
    if palette_size == 0 {
        return 0;
    }
    (current_index + 1) % palette_size
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<BallColor>,
}

impl Palette {
    pub fn new(colors: Vec<BallColor>) -> Result<Self, PaletteError> {
        let palette = Self { colors };
        if palette.is_empty() {
            return Err(PaletteError::Empty);
        }
        Ok(palette)
    }

    pub fn from_hex_list<S: AsRef<str>>(hexes: &[S]) -> Result<Self, PaletteError> {
        let colors = hexes
            .iter()
            .map(|h| BallColor::from_hex(h.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(colors)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at `index`, wrapping past the end.
    pub fn get(&self, index: usize) -> BallColor {
        self.colors[index % self.colors.len()]
    }

    pub fn colors(&self) -> &[BallColor] {
        &self.colors
    }
}

impl Default for Palette {
    fn default() -> Self {
        let colors = DEFAULT_BALL_COLORS
            .iter()
            .filter_map(|h| BallColor::from_hex(h).ok())
            .collect();
        Self { colors }
    }
}
