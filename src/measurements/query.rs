use super::MeasurementStore;
use crate::color::{ColorProcessor, ProcessedColor};
use crate::db::RawMeasurement;
use crate::error::Result;

/// The read path. Callers poll; nothing is pushed.
#[derive(Clone)]
pub struct QueryService {
    store: MeasurementStore,
}

impl QueryService {
    pub fn new(store: MeasurementStore) -> Self {
        Self { store }
    }

    pub async fn latest(&self) -> Result<Option<RawMeasurement>> {
        self.store.latest().await
    }

    pub async fn history(&self) -> Result<Vec<RawMeasurement>> {
        self.store.list_descending().await
    }

    pub async fn page(&self, limit: u32, offset: u32) -> Result<Vec<RawMeasurement>> {
        self.store.list_page(limit, offset).await
    }

    pub async fn one(&self, id: i64) -> Result<RawMeasurement> {
        self.store.get_by_id(id).await
    }

    /// Describe a single stored reading, without smoothing.
    pub async fn color(&self, id: i64, processor: &ColorProcessor) -> Result<ProcessedColor> {
        let measurement = self.one(id).await?;
        Ok(processor.process(measurement.rgb()))
    }
}
