use crate::model::ModelError;
use std::io;
use thiserror::Error;

pub mod file;

pub use file::{load_report_from_json, load_schedule_from_json, save_schedule_to_json};

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    /// The file parsed but does not describe a valid schedule.
    #[error("invalid schedule: {0}")]
    Model(#[from] ModelError),
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;
