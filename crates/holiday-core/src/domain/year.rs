//! Year - データセットのキーとなる暦年
//!
//! 1 ファイル = 1 年。`Year` は newtype にして、ただの `i32` と混同できないようにしています。

use serde::{Deserialize, Serialize};
use std::fmt;

/// Earliest year included in a full backfill run.
pub const EPOCH_YEAR: Year = Year(2014);

/// A calendar year identifying one dataset file.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Year(i32);

impl Year {
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    pub const fn get(self) -> i32 {
        self.0
    }

    /// 翌年
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Inclusive ascending range `self..=last`. Empty when `last < self`.
    pub fn through(self, last: Year) -> impl Iterator<Item = Year> {
        (self.0..=last.0).map(Year)
    }
}

impl From<i32> for Year {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
