//! HolidayRecord - 1 年分の祝日データ
//!
//! DataSource が返し、codec がファイルへ書き出す値です。
//! フィールドの宣言順がそのまま JSON のキー順になります（決定性の前提）。

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::year::Year;

/// Holiday events for one calendar year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayRecord {
    pub year: i32,

    /// Announcement documents the days were taken from.
    #[serde(default)]
    pub papers: Vec<String>,

    #[serde(default)]
    pub days: Vec<HolidayDay>,
}

/// One dated entry: either a day off, or a make-up working day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayDay {
    pub name: String,

    #[serde(with = "crate::codec::iso_date")]
    pub date: NaiveDate,

    #[serde(rename = "isOffDay")]
    pub is_off_day: bool,
}

impl HolidayRecord {
    /// An empty record for `year` (no announcement published yet).
    pub fn empty(year: Year) -> Self {
        Self {
            year: year.get(),
            papers: Vec::new(),
            days: Vec::new(),
        }
    }

    pub fn with_paper(mut self, url: impl Into<String>) -> Self {
        self.papers.push(url.into());
        self
    }

    pub fn with_day(mut self, name: impl Into<String>, date: NaiveDate, is_off_day: bool) -> Self {
        self.days.push(HolidayDay {
            name: name.into(),
            date,
            is_off_day,
        });
        self
    }
}
