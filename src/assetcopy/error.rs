use crate::catalog::CatalogVersionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssetCopyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    CatalogVersion(#[from] CatalogVersionError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, AssetCopyError>;
