//! StorageLocation - 年ごとの保存先

use std::path::{Path, PathBuf};

use super::year::Year;

/// Where the dataset for one year lives: `<data_dir>/<year>.json`.
///
/// Created or overwritten by the updater, never deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLocation {
    year: Year,
    path: PathBuf,
}

impl StorageLocation {
    pub fn for_year(data_dir: &Path, year: Year) -> Self {
        Self {
            year,
            path: data_dir.join(Self::file_name(year)),
        }
    }

    pub fn file_name(year: Year) -> String {
        format!("{year}.json")
    }

    pub fn year(&self) -> Year {
        self.year
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
