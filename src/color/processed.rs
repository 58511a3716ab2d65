use serde::{Deserialize, Serialize};

use super::{
    convert::{to_hsl, to_lab, HslColor, LabColor},
    named::{nearest_name, NamedPalette},
    rgb::{normalize, CalibrationGains},
    Rgb,
};
use crate::error::{Result, ServiceError};

/// Which derived representations a caller wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorOutputs {
    pub hsl: bool,
    pub lab: bool,
    pub name: bool,
}

impl Default for ColorOutputs {
    fn default() -> Self {
        Self {
            hsl: true,
            lab: true,
            name: true,
        }
    }
}

impl ColorOutputs {
    /// Parse a comma-separated selection such as `hsl,name`.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut outputs = Self {
            hsl: false,
            lab: false,
            name: false,
        };
        for token in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            match token.to_ascii_lowercase().as_str() {
                "hsl" => outputs.hsl = true,
                "lab" => outputs.lab = true,
                "name" => outputs.name = true,
                "all" => outputs = Self::default(),
                other => {
                    return Err(ServiceError::validation(format!(
                        "unknown color output '{other}'"
                    )))
                }
            }
        }
        Ok(outputs)
    }
}

/// Derived description of a (smoothed, calibrated) reading. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedColor {
    pub rgb_averaged: Rgb,
    pub hex: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hsl: Option<HslColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lab: Option<LabColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nearest_name: Option<String>,
}

/// Calibration plus output selection: everything `process` depends on
/// besides the averaged triple itself.
#[derive(Debug, Clone, Default)]
pub struct ColorProcessor {
    pub calibration: CalibrationGains,
    pub outputs: ColorOutputs,
    pub palette: NamedPalette,
}

impl ColorProcessor {
    pub fn new(calibration: CalibrationGains, outputs: ColorOutputs) -> Self {
        Self {
            calibration,
            outputs,
            palette: NamedPalette::default(),
        }
    }

    pub fn process(&self, averaged: Rgb) -> ProcessedColor {
        let rgb = normalize(averaged, &self.calibration);
        ProcessedColor {
            rgb_averaged: rgb,
            hex: rgb.to_hex(),
            hsl: self.outputs.hsl.then(|| to_hsl(rgb)),
            lab: self.outputs.lab.then(|| to_lab(rgb)),
            nearest_name: self
                .outputs
                .name
                .then(|| nearest_name(rgb, &self.palette).to_string()),
        }
    }
}
