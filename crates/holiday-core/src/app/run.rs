//! UpdateRun - 1 回分の更新（計画 → 年ごとの更新 → 公開）

use super::orchestrator::{RangeOrchestrator, RunScope};
use super::publisher::ChangePublisher;
use crate::domain::{PublishResult, RunState, StorageLocation, UpdateError, Year};
use crate::ports::{Clock, DataSource, VersionControl};

/// What one successful run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub scope: RunScope,
    pub years: Vec<Year>,
    pub locations: Vec<StorageLocation>,
    pub result: PublishResult,
}

impl RunReport {
    pub fn is_up_to_date(&self) -> bool {
        self.result == PublishResult::UpToDate
    }
}

pub struct UpdateRun<S, V, C1, C2> {
    orchestrator: RangeOrchestrator<S, C1>,
    publisher: ChangePublisher<V, C2>,
}

impl<S, V, C1, C2> UpdateRun<S, V, C1, C2>
where
    S: DataSource,
    V: VersionControl,
    C1: Clock,
    C2: Clock,
{
    pub fn new(orchestrator: RangeOrchestrator<S, C1>, publisher: ChangePublisher<V, C2>) -> Self {
        Self {
            orchestrator,
            publisher,
        }
    }

    /// Any error aborts the remaining steps and is returned as-is.
    pub async fn execute(&self, scope: RunScope) -> Result<RunReport, UpdateError> {
        tracing::debug!(state = %RunState::Planning, ?scope);
        let (years, locations) = self.orchestrator.run(scope).await?;

        let result = self.publisher.publish(&locations).await?;
        match &result {
            PublishResult::UpToDate => {
                tracing::info!(state = %RunState::UpToDate, years = years.len(), "already up to date")
            }
            PublishResult::Published { tag, .. } => {
                tracing::info!(state = %RunState::Done, %tag, years = years.len(), "published data update")
            }
        }

        Ok(RunReport {
            scope,
            years,
            locations,
            result,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::YearUpdater;
    use crate::domain::HolidayRecord;
    use crate::impls::{InMemoryVcs, StaticDataSource, VcsOp};
    use crate::ports::FixedClock;
    use chrono::{NaiveDate, TimeZone, Utc};
    use std::path::Path;
    use std::sync::Arc;
    use tempfile::TempDir;

    type TestRun = UpdateRun<Arc<StaticDataSource>, Arc<InMemoryVcs>, FixedClock, FixedClock>;

    fn clock_at(y: i32, m: u32, d: u32) -> FixedClock {
        // 12:00 UTC+8
        FixedClock::new(Utc.with_ymd_and_hms(y, m, d, 4, 0, 0).unwrap())
    }

    fn build(
        dir: &Path,
        source: Arc<StaticDataSource>,
        vcs: Arc<InMemoryVcs>,
        clock: FixedClock,
    ) -> TestRun {
        UpdateRun::new(
            RangeOrchestrator::new(YearUpdater::new(source, dir), clock),
            ChangePublisher::new(vcs, clock),
        )
    }

    #[tokio::test]
    async fn second_full_run_with_unchanged_source_is_up_to_date() {
        let dir = TempDir::new().unwrap();
        let source = Arc::new(StaticDataSource::empty_years(
            Year::new(2014),
            Year::new(2017),
        ));
        let vcs = Arc::new(InMemoryVcs::new());

        let first = build(dir.path(), source.clone(), vcs.clone(), clock_at(2016, 5, 1))
            .execute(RunScope::Full)
            .await
            .unwrap();
        assert!(!first.is_up_to_date());
        assert_eq!(first.locations.len(), 4);

        let calls_after_first = vcs.calls().len();
        let second = build(dir.path(), source.clone(), vcs.clone(), clock_at(2016, 5, 2))
            .execute(RunScope::Full)
            .await
            .unwrap();

        assert!(second.is_up_to_date());
        assert_eq!(
            &vcs.calls()[calls_after_first..],
            &[VcsOp::Stage, VcsOp::DiffStat]
        );
        assert_eq!(vcs.commits().len(), 1);
        assert_eq!(vcs.tags(), vec!["2016.05.01".to_string()]);
    }

    #[tokio::test]
    async fn changed_record_is_published_with_new_tag() {
        let dir = TempDir::new().unwrap();
        let vcs = Arc::new(InMemoryVcs::new());

        let source = Arc::new(StaticDataSource::empty_years(Year::new(2024), Year::new(2025)));
        build(dir.path(), source, vcs.clone(), clock_at(2024, 11, 1))
            .execute(RunScope::Incremental)
            .await
            .unwrap();

        // 翌年の祝日が発表された
        let announced = HolidayRecord::empty(Year::new(2025)).with_day(
            "元旦",
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            true,
        );
        let source = Arc::new(
            StaticDataSource::empty_years(Year::new(2024), Year::new(2025))
                .with_record(Year::new(2025), announced),
        );
        let report = build(dir.path(), source, vcs.clone(), clock_at(2024, 11, 12))
            .execute(RunScope::Incremental)
            .await
            .unwrap();

        let PublishResult::Published { tag, diff } = report.result else {
            panic!("expected a publish");
        };
        assert_eq!(tag.as_str(), "2024.11.12");
        assert!(diff.as_str().contains("2025.json"));
        assert!(!diff.as_str().contains("2024.json"));
        assert_eq!(vcs.commits().len(), 2);
    }

    #[tokio::test]
    async fn fetch_failure_publishes_nothing() {
        let dir = TempDir::new().unwrap();
        let source = Arc::new(
            StaticDataSource::empty_years(Year::new(2024), Year::new(2025))
                .failing_on(Year::new(2025)),
        );
        let vcs = Arc::new(InMemoryVcs::new());

        let err = build(dir.path(), source, vcs.clone(), clock_at(2024, 6, 1))
            .execute(RunScope::Incremental)
            .await
            .unwrap_err();

        assert_eq!(err.failed_in(), RunState::Updating(Year::new(2025)));
        assert!(vcs.calls().is_empty());
    }

    #[tokio::test]
    async fn rerun_on_same_day_with_changes_fails_on_tag() {
        let dir = TempDir::new().unwrap();
        let vcs = Arc::new(InMemoryVcs::new());
        let clock = clock_at(2024, 3, 5);

        let source = Arc::new(StaticDataSource::empty_years(Year::new(2024), Year::new(2025)));
        build(dir.path(), source, vcs.clone(), clock)
            .execute(RunScope::Incremental)
            .await
            .unwrap();

        let changed = HolidayRecord::empty(Year::new(2024)).with_paper("https://example.invalid/x");
        let source = Arc::new(
            StaticDataSource::empty_years(Year::new(2024), Year::new(2025))
                .with_record(Year::new(2024), changed),
        );
        let err = build(dir.path(), source, vcs.clone(), clock)
            .execute(RunScope::Incremental)
            .await
            .unwrap_err();

        assert!(matches!(err, UpdateError::Tag { .. }));
        assert_eq!(vcs.pushed_commits(), 1);
    }
}
