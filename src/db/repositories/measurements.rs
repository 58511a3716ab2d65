use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use rusqlite::{params, Row};

use crate::color::Rgb;
use crate::db::{
    helpers::{format_datetime, parse_datetime, to_channel},
    models::RawMeasurement,
    Database,
};

const SELECT_MEASUREMENT: &str = "SELECT id, red, green, blue, created_at FROM measurements";

fn row_to_measurement(row: &Row) -> Result<RawMeasurement> {
    let created_at: String = row.get("created_at")?;

    Ok(RawMeasurement {
        id: row.get("id")?,
        red: to_channel(row.get("red")?, "red")?,
        green: to_channel(row.get("green")?, "green")?,
        blue: to_channel(row.get("blue")?, "blue")?,
        created_at: parse_datetime(&created_at, "created_at")?,
    })
}

impl Database {
    /// Append a reading. Identifier and timestamp are issued inside the DB
    /// task, so concurrent inserts are serialized by the worker thread.
    ///
    /// The timestamp never goes below the newest stored one, so a clock
    /// stepping backwards cannot reorder history.
    pub async fn insert_measurement(&self, rgb: Rgb) -> Result<RawMeasurement> {
        self.execute(move |conn| {
            let newest: Option<String> = conn
                .query_row("SELECT MAX(created_at) FROM measurements", [], |row| row.get(0))
                .context("failed to read newest timestamp")?;
            let now = Utc::now();
            let created_at = match newest {
                Some(raw) => now.max(parse_datetime(&raw, "created_at")?),
                None => now,
            };

            conn.execute(
                "INSERT INTO measurements (red, green, blue, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![rgb.red, rgb.green, rgb.blue, format_datetime(&created_at)],
            )
            .context("failed to insert measurement")?;

            let id = conn.last_insert_rowid();

            let mut stmt = conn.prepare(&format!("{SELECT_MEASUREMENT} WHERE id = ?1"))?;
            let mut rows = stmt.query(params![id])?;
            let measurement = match rows.next()? {
                Some(row) => row_to_measurement(row)?,
                None => return Err(anyhow!("measurement {id} not found after insert")),
            };

            Ok(measurement)
        })
        .await
    }

    /// All measurements, most recent first; ties broken by identifier.
    pub async fn list_measurements(&self) -> Result<Vec<RawMeasurement>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(&format!(
                "{SELECT_MEASUREMENT} ORDER BY created_at DESC, id DESC"
            ))?;

            let mut rows = stmt.query([])?;
            let mut measurements = Vec::new();
            while let Some(row) = rows.next()? {
                measurements.push(row_to_measurement(row)?);
            }

            Ok(measurements)
        })
        .await
        .context("failed to list measurements")
    }

    pub async fn list_measurements_paginated(
        &self,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<RawMeasurement>> {
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "{SELECT_MEASUREMENT} ORDER BY created_at DESC, id DESC LIMIT ?1 OFFSET ?2"
            ))?;

            let mut rows = stmt.query(params![limit, offset])?;
            let mut measurements = Vec::new();
            while let Some(row) = rows.next()? {
                measurements.push(row_to_measurement(row)?);
            }

            Ok(measurements)
        })
        .await
        .context("failed to list measurement page")
    }

    pub async fn get_measurement(&self, id: i64) -> Result<Option<RawMeasurement>> {
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!("{SELECT_MEASUREMENT} WHERE id = ?1"))?;
            let mut rows = stmt.query(params![id])?;
            let measurement = match rows.next()? {
                Some(row) => Some(row_to_measurement(row)?),
                None => None,
            };
            Ok(measurement)
        })
        .await
    }

    pub async fn latest_measurement(&self) -> Result<Option<RawMeasurement>> {
        Ok(self.list_measurements_paginated(1, 0).await?.into_iter().next())
    }

    pub async fn count_measurements(&self) -> Result<u64> {
        self.execute(|conn| {
            let count: i64 =
                conn.query_row("SELECT COUNT(*) FROM measurements", [], |row| row.get(0))?;
            u64::try_from(count).map_err(|_| anyhow!("negative measurement count {count}"))
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_then_read_back() {
        let db = Database::in_memory().unwrap();
        let stored = db.insert_measurement(Rgb::new(10, 20, 30)).await.unwrap();

        let fetched = db.get_measurement(stored.id).await.unwrap().unwrap();
        assert_eq!(fetched, stored);
        assert_eq!(fetched.rgb(), Rgb::new(10, 20, 30));
        assert!(db.get_measurement(stored.id + 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let db = Database::in_memory().unwrap();
        for value in [1u8, 2, 3] {
            db.insert_measurement(Rgb::new(value, value, value)).await.unwrap();
        }

        let ids: Vec<i64> = db
            .list_measurements()
            .await
            .unwrap()
            .iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec![3, 2, 1]);

        let page = db.list_measurements_paginated(1, 1).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].id, 2);

        assert_eq!(db.latest_measurement().await.unwrap().unwrap().id, 3);
        assert_eq!(db.count_measurements().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn new_record_is_latest_even_when_clock_is_behind() {
        let db = Database::in_memory().unwrap();
        db.execute(|conn| {
            conn.execute(
                "INSERT INTO measurements (red, green, blue, created_at)
                 VALUES (1, 1, 1, '2999-01-01T00:00:00.000000Z')",
                [],
            )?;
            Ok(())
        })
        .await
        .unwrap();

        let appended = db.insert_measurement(Rgb::new(9, 9, 9)).await.unwrap();
        assert_eq!(appended.id, 2);
        assert_eq!(format_datetime(&appended.created_at), "2999-01-01T00:00:00.000000Z");
        assert_eq!(db.latest_measurement().await.unwrap(), Some(appended));

        let ids: Vec<i64> = db
            .list_measurements()
            .await
            .unwrap()
            .iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn empty_store() {
        let db = Database::in_memory().unwrap();
        assert!(db.list_measurements().await.unwrap().is_empty());
        assert!(db.latest_measurement().await.unwrap().is_none());
        assert_eq!(db.count_measurements().await.unwrap(), 0);
    }
}
