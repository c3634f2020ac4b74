use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::bar_series::BarSeries;

#[derive(Debug, Error)]
pub enum SinkError {
    /// A filesystem operation failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Rows could not be encoded into the destination format.
    #[error("Failed to write data: {0}")]
    Write(#[from] csv::Error),
}

#[async_trait]
pub trait DataSink: Send + Sync {
    /// The type of output returned after a successful write operation.
    ///
    /// A file sink returns the path it wrote, or `None` when there was
    /// nothing to write.
    type Output;

    /// Writes a `BarSeries` to the destination.
    async fn write(&self, data: &BarSeries) -> Result<Self::Output, SinkError>;
}
