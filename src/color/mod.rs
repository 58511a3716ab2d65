//! Pure color math: calibration, HSL/LAB conversion and named-color lookup.
//! Nothing in here fails or holds state.

pub mod convert;
pub mod named;
pub mod processed;
pub mod rgb;

pub use convert::{to_hsl, to_lab, HslColor, LabColor};
pub use named::{distance, nearest_name, NamedColor, NamedPalette, PaletteEntry, DEFAULT_PALETTE};
pub use processed::{ColorOutputs, ColorProcessor, ProcessedColor};
pub use rgb::{normalize, CalibrationGains, Rgb};
