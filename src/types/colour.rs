//! Colour type and pixel predicates.

/// An RGBA colour value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    /// Create a new colour from RGBA components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a new opaque colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Build from an RGBA byte quad.
    pub const fn from_rgba(rgba: [u8; 4]) -> Self {
        Self::new(rgba[0], rgba[1], rgba[2], rgba[3])
    }

    /// Convert to RGBA tuple.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Every channel within `tolerance` of 255.
    pub fn is_near_white(self, tolerance: u8) -> bool {
        let floor = 255 - tolerance;
        self.r >= floor && self.g >= floor && self.b >= floor
    }

    /// Every channel within `tolerance` of 0.
    pub fn is_near_black(self, tolerance: u8) -> bool {
        self.r <= tolerance && self.g <= tolerance && self.b <= tolerance
    }
}
