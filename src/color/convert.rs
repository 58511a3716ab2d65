//! RGB to HSL and CIE-LAB conversions.
//!
//! Both conversions are total over `[0, 255]^3` and round their components to
//! the nearest integer for display.

use palette::{FromColor, Lab, Srgb};
use serde::{Deserialize, Serialize};

use super::Rgb;

/// Hue in degrees `[0, 360)`, saturation and lightness in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HslColor {
    pub h: u16,
    pub s: u8,
    pub l: u8,
}

/// CIE-LAB under the D65 reference white.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabColor {
    pub l: i32,
    pub a: i32,
    pub b: i32,
}

pub fn to_hsl(rgb: Rgb) -> HslColor {
    let r = f64::from(rgb.red) / 255.0;
    let g = f64::from(rgb.green) / 255.0;
    let b = f64::from(rgb.blue) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let lightness = (max + min) / 2.0;

    // Achromatic: hue is undefined, report 0.
    if delta == 0.0 {
        return HslColor {
            h: 0,
            s: 0,
            l: percent(lightness),
        };
    }

    let saturation = delta / (1.0 - (2.0 * lightness - 1.0).abs());

    let sector = if max == r {
        ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    let hue = (sector * 60.0).round() as u16 % 360;

    HslColor {
        h: hue,
        s: percent(saturation),
        l: percent(lightness),
    }
}

pub fn to_lab(rgb: Rgb) -> LabColor {
    let srgb = Srgb::new(
        f32::from(rgb.red) / 255.0,
        f32::from(rgb.green) / 255.0,
        f32::from(rgb.blue) / 255.0,
    );
    let lab: Lab = Lab::from_color(srgb);

    LabColor {
        l: lab.l.round().clamp(0.0, 100.0) as i32,
        a: lab.a.round() as i32,
        b: lab.b.round() as i32,
    }
}

fn percent(fraction: f64) -> u8 {
    (fraction * 100.0).round().clamp(0.0, 100.0) as u8
}
