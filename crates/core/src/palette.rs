//! Series color assignment.
//!
//! Known areas keep their fixed colors. Any other key (categories, new
//! areas) is mapped to a palette slot by hashing its name, so the same key
//! always gets the same color across refreshes and processes.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Fixed colors for the monitored areas.
const AREA_COLORS: &[(&str, Rgb)] = &[
    ("강남 MICE 관광특구", Rgb(255, 99, 132)),
    ("동대문 관광특구", Rgb(54, 162, 235)),
    ("명동 관광특구", Rgb(255, 206, 86)),
    ("이태원 관광특구", Rgb(75, 192, 192)),
    ("홍대 관광특구", Rgb(153, 102, 255)),
    ("광화문·덕수궁", Rgb(255, 159, 64)),
    ("관악 관광특구", Rgb(231, 233, 237)),
    ("잠실 관광특구", Rgb(102, 255, 102)),
];

/// Fallback palette for keys without a fixed color.
const FALLBACK_PALETTE: &[Rgb] = &[
    Rgb(230, 25, 75),
    Rgb(0, 130, 200),
    Rgb(60, 180, 75),
    Rgb(245, 130, 48),
    Rgb(145, 30, 180),
    Rgb(170, 110, 40),
    Rgb(0, 128, 128),
    Rgb(255, 215, 0),
    Rgb(64, 64, 64),
    Rgb(240, 50, 230),
];

/// Alpha used for area fills under a line.
const BACKGROUND_ALPHA: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rgb(u8, u8, u8);

/// Border and fill color of one series, as CSS color strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesColor {
    pub border: String,
    pub background: String,
}

impl Rgb {
    fn to_series_color(self) -> SeriesColor {
        let Rgb(r, g, b) = self;
        SeriesColor {
            border: format!("rgb({r}, {g}, {b})"),
            background: format!("rgba({r}, {g}, {b}, {BACKGROUND_ALPHA})"),
        }
    }
}

/// Color for a series key.
pub fn color_for(key: &str) -> SeriesColor {
    let rgb = AREA_COLORS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, rgb)| *rgb)
        .unwrap_or_else(|| FALLBACK_PALETTE[palette_index(key)]);
    rgb.to_series_color()
}

/// Palette slot for a key, derived from the first eight bytes of its
/// SHA-256 digest.
fn palette_index(key: &str) -> usize {
    let digest = Sha256::digest(key.as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    (u64::from_be_bytes(prefix) % FALLBACK_PALETTE.len() as u64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_area_gets_fixed_color() {
        let color = color_for("명동 관광특구");
        assert_eq!(color.border, "rgb(255, 206, 86)");
        assert_eq!(color.background, "rgba(255, 206, 86, 0.1)");
    }

    #[test]
    fn unknown_key_is_deterministic() {
        assert_eq!(color_for("소매"), color_for("소매"));
        assert_eq!(palette_index("소매"), palette_index("소매"));
    }

    #[test]
    fn unknown_key_lands_in_fallback_palette() {
        let color = color_for("some new category");
        let in_palette = FALLBACK_PALETTE
            .iter()
            .any(|rgb| rgb.to_series_color() == color);
        assert!(in_palette);
    }

    #[test]
    fn every_area_has_a_fixed_color() {
        for name in crate::areas::AREA_NAMES {
            assert!(
                AREA_COLORS.iter().any(|(n, _)| n == name),
                "{name} has no fixed color"
            );
        }
    }
}
