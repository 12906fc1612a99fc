//! Errors - 実行エラーの分類
//!
//! すべてのエラーは致命的で、リトライしない。
//! 発生した時点で実行を中断し、呼び出し元へそのまま返す。
//! どのステップで失敗したかは [`UpdateError::failed_in`] で分かる。

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use super::publish::TagName;
use super::state::RunState;
use super::year::Year;
use crate::codec::SerializationError;
use crate::ports::{FetchError, VcsError};

/// Which push failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushTarget {
    Branch,
    Tags,
}

impl fmt::Display for PushTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PushTarget::Branch => f.write_str("branch"),
            PushTarget::Tags => f.write_str("tags"),
        }
    }
}

/// UpdateError は 1 回の実行を中断させるエラー
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("failed to fetch holidays for {year}")]
    Fetch {
        year: Year,
        #[source]
        source: FetchError,
    },

    #[error("failed to serialize holidays for {year}")]
    Serialization {
        year: Year,
        #[source]
        source: SerializationError,
    },

    #[error("failed to write {year} data to {}", .path.display())]
    Write {
        year: Year,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to stage data files")]
    Stage(#[source] VcsError),

    #[error("failed to compute staged diff")]
    Diff(#[source] VcsError),

    #[error("failed to commit data update")]
    Commit(#[source] VcsError),

    /// 同じ日に 2 回目の更新があるとここに来る（上書きもサフィックス付与もしない）
    #[error("failed to create tag {tag}")]
    Tag {
        tag: TagName,
        #[source]
        source: VcsError,
    },

    #[error("failed to push {target}")]
    Push {
        target: PushTarget,
        #[source]
        source: VcsError,
    },
}

impl UpdateError {
    /// The step that was running when this error aborted the run.
    pub fn failed_in(&self) -> RunState {
        match self {
            UpdateError::Fetch { year, .. }
            | UpdateError::Serialization { year, .. }
            | UpdateError::Write { year, .. } => RunState::Updating(*year),
            UpdateError::Stage(_) => RunState::Staging,
            UpdateError::Diff(_) => RunState::Diffing,
            UpdateError::Commit(_) => RunState::Committing,
            UpdateError::Tag { .. } => RunState::Tagging,
            UpdateError::Push {
                target: PushTarget::Branch,
                ..
            } => RunState::PushingBranch,
            UpdateError::Push {
                target: PushTarget::Tags,
                ..
            } => RunState::PushingTags,
        }
    }
}
