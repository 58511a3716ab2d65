pub mod ingestion;
pub mod input;
pub mod query;
pub mod store;

pub use ingestion::{replay, IngestionService, ProcessedReading};
pub use input::MeasurementInput;
pub use query::QueryService;
pub use store::MeasurementStore;
