//! YearUpdater - 1 年分を取得して書き出す
//!
//! fetch → serialize → truncate-write の順に実行する。
//! 内容が変わっていなくても必ず書き直す（変化の検出は git に任せる）。

use std::path::PathBuf;
use std::time::Duration;

use crate::codec::to_canonical_json;
use crate::domain::{StorageLocation, UpdateError, Year};
use crate::ports::{DataSource, FetchError};

/// Default upper bound for one fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

pub struct YearUpdater<S> {
    source: S,
    data_dir: PathBuf,
    fetch_timeout: Duration,
}

impl<S: DataSource> YearUpdater<S> {
    pub fn new(source: S, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            source,
            data_dir: data_dir.into(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch, encode and store the dataset for `year`.
    pub async fn update(&self, year: Year) -> Result<StorageLocation, UpdateError> {
        tracing::debug!(%year, "fetching holidays");

        let record = tokio::time::timeout(self.fetch_timeout, self.source.fetch(year))
            .await
            .unwrap_or(Err(FetchError::Timeout {
                after: self.fetch_timeout,
            }))
            .map_err(|source| UpdateError::Fetch { year, source })?;

        let text = to_canonical_json(&record)
            .map_err(|source| UpdateError::Serialization { year, source })?;

        let location = StorageLocation::for_year(&self.data_dir, year);
        let write_err = |source: std::io::Error| UpdateError::Write {
            year,
            path: location.path().to_path_buf(),
            source,
        };
        tokio::fs::create_dir_all(&self.data_dir)
            .await
            .map_err(write_err)?;
        tokio::fs::write(location.path(), text.as_bytes())
            .await
            .map_err(write_err)?;

        tracing::info!(%year, path = %location.path().display(), days = record.days.len(), "updated data");
        Ok(location)
    }
}
