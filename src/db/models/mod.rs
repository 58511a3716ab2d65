pub mod measurement;

pub use measurement::RawMeasurement;
