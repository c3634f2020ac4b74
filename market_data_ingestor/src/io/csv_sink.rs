//! Timestamped CSV export of a [`BarSeries`].

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};

use crate::{
    io::sink::{DataSink, SinkError},
    models::bar_series::BarSeries,
};

/// Writes each series to `<dir>/latest_<YYYY-MM-DD_HH-MM-SS>.csv`.
#[derive(Debug, Clone)]
pub struct CsvExporter {
    dir: PathBuf,
}

impl CsvExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn file_name(stamp: NaiveDateTime) -> String {
        format!("latest_{}.csv", stamp.format("%Y-%m-%d_%H-%M-%S"))
    }

    /// Exports `series` with the current local time in the file name.
    pub fn export(&self, series: &BarSeries) -> Result<Option<PathBuf>, SinkError> {
        self.export_at(series, Local::now().naive_local())
    }

    /// Exports `series` using `stamp` for the file name.
    ///
    /// Returns `Ok(None)` without touching the filesystem when `series` is
    /// empty. A file written in the same second is replaced.
    pub fn export_at(
        &self,
        series: &BarSeries,
        stamp: NaiveDateTime,
    ) -> Result<Option<PathBuf>, SinkError> {
        if series.is_empty() {
            tracing::warn!("no data to export");
            return Ok(None);
        }

        std::fs::create_dir_all(&self.dir).map_err(|source| SinkError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.dir.join(Self::file_name(stamp));
        let mut writer = csv::Writer::from_path(&path)?;
        for bar in series {
            writer.serialize(bar)?;
        }
        writer.flush().map_err(|source| SinkError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::info!(path = %path.display(), rows = series.len(), "exported bars");
        Ok(Some(path))
    }
}

#[async_trait]
impl DataSink for CsvExporter {
    type Output = Option<PathBuf>;

    async fn write(&self, data: &BarSeries) -> Result<Self::Output, SinkError> {
        self.export(data)
    }
}
