//! RangeOrchestrator - 更新する年の決定と逐次実行
//!
//! # 設計
//! - 「今年」は Clock から UTC+8 で決める（ホストのタイムゾーンに依存しない）
//! - 年は昇順に 1 つずつ処理する（書き込み順を固定して diff を再現可能にする）
//! - どれか 1 年でも失敗したらそこで中断し、以降の年は取得しない

use chrono::{DateTime, Datelike, FixedOffset};

use super::year_updater::YearUpdater;
use crate::domain::{EPOCH_YEAR, StorageLocation, UpdateError, Year};
use crate::ports::{Clock, DataSource};

/// Which years a run refreshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunScope {
    /// Current year and next year.
    #[default]
    Incremental,
    /// Every year from [`EPOCH_YEAR`] through next year.
    Full,
}

impl RunScope {
    pub fn from_all_flag(all: bool) -> Self {
        if all { RunScope::Full } else { RunScope::Incremental }
    }
}

/// Years to refresh, ascending, as seen at `now`.
pub fn plan(scope: RunScope, now: DateTime<FixedOffset>) -> Vec<Year> {
    let current = Year::new(now.year());
    let first = match scope {
        RunScope::Full => EPOCH_YEAR,
        RunScope::Incremental => current,
    };
    first.through(current.next()).collect()
}

pub struct RangeOrchestrator<S, C> {
    updater: YearUpdater<S>,
    clock: C,
}

impl<S: DataSource, C: Clock> RangeOrchestrator<S, C> {
    pub fn new(updater: YearUpdater<S>, clock: C) -> Self {
        Self { updater, clock }
    }

    pub fn updater(&self) -> &YearUpdater<S> {
        &self.updater
    }

    /// Plan the years for `scope` and update each of them in order.
    ///
    /// Returns the planned years and the written locations (same order).
    pub async fn run(
        &self,
        scope: RunScope,
    ) -> Result<(Vec<Year>, Vec<StorageLocation>), UpdateError> {
        let now = self.clock.civil_now();
        let years = plan(scope, now);
        tracing::info!(
            ?scope,
            first = %years.first().copied().unwrap_or(EPOCH_YEAR),
            count = years.len(),
            "planned years"
        );

        let mut locations = Vec::with_capacity(years.len());
        for &year in &years {
            tracing::info!(%year, "updating {year} data");
            locations.push(self.updater.update(year).await?);
        }
        Ok((years, locations))
    }
}
