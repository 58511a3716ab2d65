//! Nearest-named-color classification.
//!
//! Matching uses plain Euclidean distance in RGB. The reference palette is
//! small and coarse, so a perceptual metric buys nothing here.

use serde::Serialize;

use super::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedColor {
    pub name: &'static str,
    pub rgb: Rgb,
}

/// Reference colors in declaration order. Ties resolve to the earlier entry.
pub const DEFAULT_PALETTE: &[NamedColor] = &[
    NamedColor { name: "red", rgb: Rgb::new(255, 0, 0) },
    NamedColor { name: "green", rgb: Rgb::new(0, 255, 0) },
    NamedColor { name: "blue", rgb: Rgb::new(0, 0, 255) },
    NamedColor { name: "yellow", rgb: Rgb::new(255, 255, 0) },
    NamedColor { name: "magenta", rgb: Rgb::new(255, 0, 255) },
    NamedColor { name: "cyan", rgb: Rgb::new(0, 255, 255) },
    NamedColor { name: "white", rgb: Rgb::new(255, 255, 255) },
    NamedColor { name: "black", rgb: Rgb::new(0, 0, 0) },
    NamedColor { name: "gray", rgb: Rgb::new(128, 128, 128) },
    NamedColor { name: "orange", rgb: Rgb::new(255, 165, 0) },
    NamedColor { name: "pink", rgb: Rgb::new(255, 192, 203) },
    NamedColor { name: "brown", rgb: Rgb::new(165, 42, 42) },
];

/// A non-empty list of reference colors.
#[derive(Debug, Clone)]
pub struct NamedPalette {
    entries: Vec<NamedColor>,
}

impl Default for NamedPalette {
    fn default() -> Self {
        Self {
            entries: DEFAULT_PALETTE.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PaletteEntry {
    pub name: &'static str,
    pub hex: String,
}

impl NamedPalette {
    /// Returns `None` for an empty list so classification stays total.
    pub fn new(entries: Vec<NamedColor>) -> Option<Self> {
        if entries.is_empty() {
            None
        } else {
            Some(Self { entries })
        }
    }

    pub fn entries(&self) -> &[NamedColor] {
        &self.entries
    }

    pub fn nearest(&self, rgb: Rgb) -> &NamedColor {
        let mut best = &self.entries[0];
        let mut best_distance = distance(rgb, best.rgb);
        for candidate in &self.entries[1..] {
            let d = distance(rgb, candidate.rgb);
            // Strict comparison keeps the first occurrence on ties.
            if d < best_distance {
                best = candidate;
                best_distance = d;
            }
        }
        best
    }

    pub fn describe(&self) -> Vec<PaletteEntry> {
        self.entries
            .iter()
            .map(|entry| PaletteEntry {
                name: entry.name,
                hex: entry.rgb.to_hex(),
            })
            .collect()
    }
}

pub fn distance(a: Rgb, b: Rgb) -> f64 {
    a.channels()
        .iter()
        .zip(b.channels().iter())
        .map(|(&x, &y)| {
            let d = f64::from(x) - f64::from(y);
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

pub fn nearest_name(rgb: Rgb, palette: &NamedPalette) -> &'static str {
    palette.nearest(rgb).name
}
