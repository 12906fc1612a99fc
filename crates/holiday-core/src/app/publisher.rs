//! ChangePublisher - 差分があるときだけ commit / tag / push する
//!
//! # 手順（それぞれが独立した失敗点）
//! 1. stage          → `UpdateError::Stage`
//! 2. diff --cached  → `UpdateError::Diff`
//! 3. 差分が空なら UpToDate を返して終了
//! 4. commit         → `UpdateError::Commit`
//! 5. tag YYYY.MM.DD → `UpdateError::Tag`
//! 6. push           → `UpdateError::Push { target: Branch }`
//! 7. push --tags    → `UpdateError::Push { target: Tags }`
//!
//! 途中で失敗しても巻き戻しはしない（commit 済みで tag だけ失敗、などはそのまま残る）。

use std::path::PathBuf;

use crate::domain::{
    DiffSummary, PublishResult, PushTarget, RunState, StorageLocation, TagName, UpdateError,
};
use crate::ports::{Clock, VersionControl};

pub struct ChangePublisher<V, C> {
    vcs: V,
    clock: C,
}

impl<V: VersionControl, C: Clock> ChangePublisher<V, C> {
    pub fn new(vcs: V, clock: C) -> Self {
        Self { vcs, clock }
    }

    /// Tag for a publish happening now (civil date).
    pub fn tag_for_now(&self) -> TagName {
        TagName::for_date(self.clock.civil_now().date_naive())
    }

    pub async fn publish(
        &self,
        locations: &[StorageLocation],
    ) -> Result<PublishResult, UpdateError> {
        let paths: Vec<PathBuf> = locations.iter().map(|l| l.path().to_path_buf()).collect();

        tracing::debug!(state = %RunState::Staging, files = paths.len());
        self.vcs.stage(&paths).await.map_err(UpdateError::Stage)?;

        tracing::debug!(state = %RunState::Diffing);
        let diff = DiffSummary::new(
            self.vcs
                .diff_stat_staged()
                .await
                .map_err(UpdateError::Diff)?,
        );
        if diff.is_empty() {
            tracing::info!(state = %RunState::UpToDate, "no staged changes");
            return Ok(PublishResult::UpToDate);
        }

        tracing::info!(state = %RunState::Committing, "{}", diff.as_str().trim_end());
        self.vcs
            .commit(&diff.commit_message())
            .await
            .map_err(UpdateError::Commit)?;

        let tag = self.tag_for_now();
        tracing::info!(state = %RunState::Tagging, %tag);
        self.vcs
            .tag(tag.as_str())
            .await
            .map_err(|source| UpdateError::Tag {
                tag: tag.clone(),
                source,
            })?;

        tracing::info!(state = %RunState::PushingBranch);
        self.vcs.push_branch().await.map_err(|source| UpdateError::Push {
            target: PushTarget::Branch,
            source,
        })?;

        tracing::info!(state = %RunState::PushingTags);
        self.vcs.push_tags().await.map_err(|source| UpdateError::Push {
            target: PushTarget::Tags,
            source,
        })?;

        Ok(PublishResult::Published { tag, diff })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{COMMIT_HEADER, Year};
    use crate::impls::{InMemoryVcs, VcsOp};
    use crate::ports::FixedClock;
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;
    use tempfile::TempDir;

    /// 2024-03-05 00:30 in UTC+8.
    fn clock() -> FixedClock {
        FixedClock::new(Utc.with_ymd_and_hms(2024, 3, 4, 16, 30, 0).unwrap())
    }

    fn write(dir: &TempDir, year: i32, content: &str) -> StorageLocation {
        let loc = StorageLocation::for_year(dir.path(), Year::new(year));
        std::fs::write(loc.path(), content).unwrap();
        loc
    }

    #[tokio::test]
    async fn publishes_commit_tag_and_pushes_in_order() {
        let dir = TempDir::new().unwrap();
        let vcs = Arc::new(InMemoryVcs::new());
        let publisher = ChangePublisher::new(vcs.clone(), clock());
        let locs = vec![write(&dir, 2024, "{\"year\": 2024}"), write(&dir, 2025, "{}")];

        let result = publisher.publish(&locs).await.unwrap();

        let PublishResult::Published { tag, diff } = result else {
            panic!("expected a publish");
        };
        assert_eq!(tag.as_str(), "2024.03.05");
        assert!(diff.as_str().contains("2024.json"));
        assert_eq!(
            vcs.calls(),
            vec![
                VcsOp::Stage,
                VcsOp::DiffStat,
                VcsOp::Commit,
                VcsOp::Tag,
                VcsOp::PushBranch,
                VcsOp::PushTags
            ]
        );
        let commits = vcs.commits();
        assert_eq!(commits.len(), 1);
        assert!(commits[0].starts_with(&format!("{COMMIT_HEADER}\n\n")));
        assert!(commits[0].ends_with(diff.as_str()));
        assert_eq!(vcs.pushed_tags(), vec!["2024.03.05".to_string()]);
        assert_eq!(vcs.pushed_commits(), 1);
    }

    #[tokio::test]
    async fn empty_diff_short_circuits() {
        let dir = TempDir::new().unwrap();
        let vcs = Arc::new(InMemoryVcs::new());
        let publisher = ChangePublisher::new(vcs.clone(), clock());
        let locs = vec![write(&dir, 2024, "{}")];

        publisher.publish(&locs).await.unwrap();
        let calls_after_first = vcs.calls().len();

        // 同じ内容のまま 2 回目
        let second = publisher.publish(&locs).await.unwrap();

        assert_eq!(second, PublishResult::UpToDate);
        assert_eq!(
            &vcs.calls()[calls_after_first..],
            &[VcsOp::Stage, VcsOp::DiffStat]
        );
        assert_eq!(vcs.commits().len(), 1);
    }

    #[tokio::test]
    async fn existing_tag_is_a_tag_error_and_nothing_is_pushed() {
        let dir = TempDir::new().unwrap();
        let vcs = Arc::new(InMemoryVcs::new().with_existing_tag("2024.03.05"));
        let publisher = ChangePublisher::new(vcs.clone(), clock());

        let err = publisher
            .publish(&[write(&dir, 2024, "{}")])
            .await
            .unwrap_err();

        assert!(matches!(&err, UpdateError::Tag { tag, .. } if tag.as_str() == "2024.03.05"));
        assert_eq!(err.failed_in(), RunState::Tagging);
        // commit は残ったまま（巻き戻さない）
        assert_eq!(vcs.commits().len(), 1);
        assert!(!vcs.calls().contains(&VcsOp::PushBranch));
        assert!(!vcs.calls().contains(&VcsOp::PushTags));
    }

    #[tokio::test]
    async fn stage_failure_aborts_before_diff() {
        let dir = TempDir::new().unwrap();
        let vcs = Arc::new(InMemoryVcs::new());
        vcs.fail_on(VcsOp::Stage);
        let publisher = ChangePublisher::new(vcs.clone(), clock());

        let err = publisher
            .publish(&[write(&dir, 2024, "{}")])
            .await
            .unwrap_err();

        assert!(matches!(err, UpdateError::Stage(_)));
        assert_eq!(vcs.calls(), vec![VcsOp::Stage]);
    }

    #[tokio::test]
    async fn diff_failure_is_a_diff_error() {
        let dir = TempDir::new().unwrap();
        let vcs = Arc::new(InMemoryVcs::new());
        vcs.fail_on(VcsOp::DiffStat);
        let publisher = ChangePublisher::new(vcs.clone(), clock());

        let err = publisher
            .publish(&[write(&dir, 2024, "{}")])
            .await
            .unwrap_err();
        assert!(matches!(err, UpdateError::Diff(_)));
        assert!(vcs.commits().is_empty());
    }

    #[tokio::test]
    async fn commit_failure_skips_tag_and_push() {
        let dir = TempDir::new().unwrap();
        let vcs = Arc::new(InMemoryVcs::new());
        vcs.fail_on(VcsOp::Commit);
        let publisher = ChangePublisher::new(vcs.clone(), clock());

        let err = publisher
            .publish(&[write(&dir, 2024, "{}")])
            .await
            .unwrap_err();

        assert!(matches!(err, UpdateError::Commit(_)));
        assert!(vcs.tags().is_empty());
        assert_eq!(vcs.calls().last(), Some(&VcsOp::Commit));
    }

    #[tokio::test]
    async fn push_failures_name_their_target() {
        let dir = TempDir::new().unwrap();

        let vcs = Arc::new(InMemoryVcs::new());
        vcs.fail_on(VcsOp::PushBranch);
        let err = ChangePublisher::new(vcs.clone(), clock())
            .publish(&[write(&dir, 2024, "{}")])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            UpdateError::Push {
                target: PushTarget::Branch,
                ..
            }
        ));
        assert!(!vcs.calls().contains(&VcsOp::PushTags));

        let vcs = Arc::new(InMemoryVcs::new());
        vcs.fail_on(VcsOp::PushTags);
        let err = ChangePublisher::new(vcs.clone(), clock())
            .publish(&[write(&dir, 2025, "{}")])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            UpdateError::Push {
                target: PushTarget::Tags,
                ..
            }
        ));
        assert_eq!(vcs.pushed_commits(), 1);
    }
}
