//! RGBA color used for material channels and light intensities

use serde::{Deserialize, Serialize};

/// Linear RGBA color with `f32` channels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color4 {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
    /// Alpha channel
    pub a: f32,
}

impl Color4 {
    /// Opaque black
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Opaque white
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    /// Create a color from all four channels
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Create an opaque gray with the same value on every color channel
    pub const fn gray(value: f32) -> Self {
        Self::new(value, value, value, 1.0)
    }

    /// Return a copy with a different alpha
    #[must_use]
    pub const fn with_alpha(mut self, a: f32) -> Self {
        self.a = a;
        self
    }

    /// True when the color channels sum to zero; alpha is not considered
    pub fn is_black(&self) -> bool {
        self.r + self.g + self.b <= 0.0
    }

    /// True when every color channel is below `epsilon`
    pub fn is_near_black(&self, epsilon: f32) -> bool {
        self.r < epsilon && self.g < epsilon && self.b < epsilon
    }

    /// Apply `f` to the three color channels, leaving alpha untouched
    #[must_use]
    pub fn map_rgb(self, f: impl Fn(f32) -> f32) -> Self {
        Self::new(f(self.r), f(self.g), f(self.b), self.a)
    }

    /// Channels as an `[r, g, b, a]` array, the layout GL parameter calls take
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[f32; 4]> for Color4 {
    fn from(c: [f32; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

impl From<Color4> for [f32; 4] {
    fn from(c: Color4) -> Self {
        c.to_array()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_black_ignores_alpha() {
        assert!(Color4::new(0.0, 0.0, 0.0, 0.3).is_black());
        assert!(!Color4::rgb(0.0, 0.0, 0.01).is_black());
    }

    #[test]
    fn test_near_black_threshold() {
        assert!(Color4::rgb(0.0005, 0.0, 0.0009).is_near_black(1e-3));
        assert!(!Color4::rgb(0.0005, 0.002, 0.0).is_near_black(1e-3));
    }

    #[test]
    fn test_map_rgb_keeps_alpha() {
        let c = Color4::new(0.2, 0.4, 0.6, 0.5).map_rgb(|v| v * 2.0);
        assert_eq!(c, Color4::new(0.4, 0.8, 1.2, 0.5));
    }
}
