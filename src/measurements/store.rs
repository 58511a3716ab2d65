use log::{debug, error};

use super::MeasurementInput;
use crate::color::Rgb;
use crate::db::{Database, RawMeasurement};
use crate::error::{Result, ServiceError};

/// Append-only, ordered log of raw measurements.
#[derive(Clone)]
pub struct MeasurementStore {
    db: Database,
}

fn storage_failure(err: anyhow::Error) -> ServiceError {
    error!("Measurement store failure: {err:#}");
    ServiceError::store(err)
}

impl MeasurementStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn append(&self, input: &MeasurementInput) -> Result<RawMeasurement> {
        let rgb = input.validate().map_err(|err| {
            debug!("Rejected measurement {input:?}: {err}");
            err
        })?;
        self.append_rgb(rgb).await
    }

    pub async fn append_rgb(&self, rgb: Rgb) -> Result<RawMeasurement> {
        let stored = self
            .db
            .insert_measurement(rgb)
            .await
            .map_err(storage_failure)?;
        debug!(
            "Stored measurement {} ({}, {}, {})",
            stored.id, stored.red, stored.green, stored.blue
        );
        Ok(stored)
    }

    /// Fresh snapshot on every call, newest first.
    pub async fn list_descending(&self) -> Result<Vec<RawMeasurement>> {
        self.db.list_measurements().await.map_err(storage_failure)
    }

    pub async fn list_page(&self, limit: u32, offset: u32) -> Result<Vec<RawMeasurement>> {
        self.db
            .list_measurements_paginated(limit, offset)
            .await
            .map_err(storage_failure)
    }

    pub async fn latest(&self) -> Result<Option<RawMeasurement>> {
        self.db.latest_measurement().await.map_err(storage_failure)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<RawMeasurement> {
        self.db
            .get_measurement(id)
            .await
            .map_err(storage_failure)?
            .ok_or_else(|| ServiceError::measurement_not_found(id))
    }

    pub async fn count(&self) -> Result<u64> {
        self.db.count_measurements().await.map_err(storage_failure)
    }
}
