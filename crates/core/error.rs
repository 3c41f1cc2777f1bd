//! Error types for geoscan.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GeoScanError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeoScanError {
    /// A caller-supplied value is outside the domain of the operation.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl GeoScanError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}
