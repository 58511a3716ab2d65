use serde::Serialize;

use super::{MeasurementInput, MeasurementStore};
use crate::color::{ColorProcessor, ProcessedColor};
use crate::db::RawMeasurement;
use crate::error::Result;
use crate::sessions::SmoothingWindow;

/// A stored reading together with the descriptor computed for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedReading {
    pub measurement: RawMeasurement,
    pub color: ProcessedColor,
}

/// The write path. Only `ingest` persists anything.
#[derive(Clone)]
pub struct IngestionService {
    store: MeasurementStore,
}

impl IngestionService {
    pub fn new(store: MeasurementStore) -> Self {
        Self { store }
    }

    pub async fn ingest(&self, input: &MeasurementInput) -> Result<RawMeasurement> {
        self.store.append(input).await
    }

    /// Persist, then smooth the stored triple through the caller's window and
    /// describe it. The descriptor itself is not stored.
    pub async fn ingest_and_process(
        &self,
        input: &MeasurementInput,
        window: &mut SmoothingWindow,
        processor: &ColorProcessor,
    ) -> Result<ProcessedReading> {
        let measurement = self.ingest(input).await?;
        let averaged = window.push(measurement.rgb());
        Ok(ProcessedReading {
            color: processor.process(averaged),
            measurement,
        })
    }
}

/// Recompute the descriptor a live session would have produced after seeing
/// `history` (newest first, as listed by the store) through a fresh window.
pub fn replay(
    history: &[RawMeasurement],
    capacity: usize,
    processor: &ColorProcessor,
) -> Option<ProcessedColor> {
    let mut window = SmoothingWindow::new(capacity);
    let mut averaged = None;
    for measurement in history.iter().rev() {
        averaged = Some(window.push(measurement.rgb()));
    }
    averaged.map(|rgb| processor.process(rgb))
}
