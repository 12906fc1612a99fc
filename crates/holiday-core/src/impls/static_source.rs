//! StaticDataSource - メモリ上の固定データを返す DataSource（開発用・テスト用）
//!
//! # 学習ポイント
//! - 失敗する年・遅延を差し込んで、更新ループの中断やタイムアウトを再現できる
//! - 取得した順序を記録するので、逐次・昇順であることを検証できる

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{HolidayRecord, Year};
use crate::ports::{DataSource, FetchError};

#[derive(Default)]
pub struct StaticDataSource {
    records: BTreeMap<Year, HolidayRecord>,
    failing: BTreeSet<Year>,
    delay: Option<Duration>,
    fetched: Mutex<Vec<Year>>,
}

impl StaticDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve an empty record for every year in `first..=last`.
    pub fn empty_years(first: Year, last: Year) -> Self {
        let mut source = Self::new();
        for year in first.through(last) {
            source.records.insert(year, HolidayRecord::empty(year));
        }
        source
    }

    pub fn with_record(mut self, year: Year, record: HolidayRecord) -> Self {
        self.records.insert(year, record);
        self
    }

    /// `fetch(year)` fails with a transport error.
    pub fn failing_on(mut self, year: Year) -> Self {
        self.failing.insert(year);
        self
    }

    /// Sleep before answering (to exercise fetch timeouts).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Years requested so far, in call order.
    pub fn fetched(&self) -> Vec<Year> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait]
impl DataSource for StaticDataSource {
    async fn fetch(&self, year: Year) -> Result<HolidayRecord, FetchError> {
        self.fetched.lock().unwrap().push(year);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.contains(&year) {
            return Err(FetchError::Transport(
                format!("injected failure for {year}").into(),
            ));
        }
        self.records
            .get(&year)
            .cloned()
            .ok_or(FetchError::Missing(year))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_records_and_records_order() {
        let source = StaticDataSource::empty_years(Year::new(2024), Year::new(2025));

        let a = source.fetch(Year::new(2025)).await.unwrap();
        let b = source.fetch(Year::new(2024)).await.unwrap();

        assert_eq!(a.year, 2025);
        assert_eq!(b.year, 2024);
        assert_eq!(source.fetched(), vec![Year::new(2025), Year::new(2024)]);
    }

    #[tokio::test]
    async fn unknown_and_failing_years_error() {
        let source = StaticDataSource::empty_years(Year::new(2024), Year::new(2024))
            .failing_on(Year::new(2024));

        assert!(matches!(
            source.fetch(Year::new(2024)).await,
            Err(FetchError::Transport(_))
        ));
        assert!(matches!(
            source.fetch(Year::new(1999)).await,
            Err(FetchError::Missing(y)) if y == Year::new(1999)
        ));
    }
}
