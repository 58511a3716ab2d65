//! Stored sensor reading.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::color::Rgb;

/// One raw reading as persisted. Identifier and timestamp are assigned by the
/// store; a record never changes after insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMeasurement {
    pub id: i64,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub created_at: DateTime<Utc>,
}

impl RawMeasurement {
    pub fn rgb(&self) -> Rgb {
        Rgb::new(self.red, self.green, self.blue)
    }
}
