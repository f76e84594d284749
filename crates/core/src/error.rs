use thiserror::Error;

use crate::geometry::GeometryError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error("unknown section: {0}")]
    UnknownSection(String),
    #[error("unknown dataset: {0}")]
    UnknownDataset(String),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}
