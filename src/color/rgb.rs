use serde::{Deserialize, Serialize};

use crate::error::{Result, ServiceError};

/// An 8-bit RGB triple as reported by the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    pub fn channels(&self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }

    /// Hex color string, e.g. `#FF0000`.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

/// Per-channel multiplicative sensor correction applied before clamping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationGains {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl Default for CalibrationGains {
    fn default() -> Self {
        Self {
            red: 1.0,
            green: 1.0,
            blue: 1.0,
        }
    }
}

impl CalibrationGains {
    pub fn validate(&self) -> Result<()> {
        for (name, gain) in [("red", self.red), ("green", self.green), ("blue", self.blue)] {
            if !gain.is_finite() || gain < 0.0 {
                return Err(ServiceError::validation(format!(
                    "{name} gain must be a finite, non-negative number"
                )));
            }
        }
        Ok(())
    }
}

/// Scale, clamp to [0, 255] and round one channel. NaN collapses to 0.
pub fn to_channel(value: f64) -> u8 {
    value.clamp(0.0, 255.0).round() as u8
}

/// Apply calibration gains. Output channels are always in range.
pub fn normalize(rgb: Rgb, calibration: &CalibrationGains) -> Rgb {
    Rgb {
        red: to_channel(f64::from(rgb.red) * calibration.red),
        green: to_channel(f64::from(rgb.green) * calibration.green),
        blue: to_channel(f64::from(rgb.blue) * calibration.blue),
    }
}
