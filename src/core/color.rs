// Display colors for entities

use std::fmt;

use rand::Rng;

/// A 24-bit RGB display color.
///
/// Colors are purely presentational; the renderer reads them when drawing
/// entity boxes and the game reassigns them on certain collisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const RED: Color = Color::rgb(0xFF, 0x00, 0x00);
    pub const GREEN: Color = Color::rgb(0x00, 0x80, 0x00);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    /// Wall yellow (#FFE300)
    pub const WALL: Color = Color::rgb(0xFF, 0xE3, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Draw a uniformly random color from the given RNG.
    ///
    /// All randomness flows through the caller's RNG so sessions stay
    /// reproducible from a seed.
    pub fn random(rng: &mut impl Rng) -> Self {
        let bits: u32 = rng.random();
        Self {
            r: (bits >> 16) as u8,
            g: (bits >> 8) as u8,
            b: bits as u8,
        }
    }
}

impl fmt::Display for Color {
    /// Formats as a `#RRGGBB` hex string for renderers that want CSS-style colors.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_hex_format() {
        assert_eq!(Color::rgb(0xFF, 0xE3, 0x00).to_string(), "#FFE300");
        assert_eq!(Color::BLACK.to_string(), "#000000");
    }

    #[test]
    fn test_random_is_deterministic_with_seed() {
        let mut a = Pcg32::seed_from_u64(7);
        let mut b = Pcg32::seed_from_u64(7);
        assert_eq!(Color::random(&mut a), Color::random(&mut b));
    }

    #[test]
    fn test_random_colors_vary() {
        let mut rng = Pcg32::seed_from_u64(7);
        let first = Color::random(&mut rng);
        let second = Color::random(&mut rng);
        assert_ne!(first, second);
    }
}
