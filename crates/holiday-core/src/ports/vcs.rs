//! VersionControl port - データリポジトリ操作の抽象化
//!
//! 公開処理に必要な最小の操作だけを持つ。
//! 各操作は失敗を個別に返し、呼び出し側（ChangePublisher）がエラー種別に対応付ける。
//!
//! # 実装
//! - **GitCli**: `git` サブプロセス（本番用）
//! - **InMemoryVcs**: 内容を追跡するフェイク（テスト用）

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VcsError {
    #[error("could not run `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {}: {stderr}", describe_status(.status))]
    Failed {
        command: String,
        status: Option<i32>,
        stderr: String,
    },

    #[error("`{command}` rejected: {reason}")]
    Rejected { command: String, reason: String },
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("status {code}"),
        None => "a signal".to_string(),
    }
}

/// VersionControl はデータファイルを置いた作業ツリーを操作する
///
/// 呼び出しは常に逐次。index（ステージ）が実行中に共有される唯一の可変状態。
#[async_trait]
pub trait VersionControl: Send + Sync {
    /// `git add`
    async fn stage(&self, paths: &[PathBuf]) -> Result<(), VcsError>;

    /// `git diff --stat --cached`
    async fn diff_stat_staged(&self) -> Result<String, VcsError>;

    async fn commit(&self, message: &str) -> Result<(), VcsError>;

    async fn tag(&self, name: &str) -> Result<(), VcsError>;

    /// Push the current branch to its default remote.
    async fn push_branch(&self) -> Result<(), VcsError>;

    async fn push_tags(&self) -> Result<(), VcsError>;
}

#[async_trait]
impl<V: VersionControl + ?Sized> VersionControl for std::sync::Arc<V> {
    async fn stage(&self, paths: &[PathBuf]) -> Result<(), VcsError> {
        (**self).stage(paths).await
    }

    async fn diff_stat_staged(&self) -> Result<String, VcsError> {
        (**self).diff_stat_staged().await
    }

    async fn commit(&self, message: &str) -> Result<(), VcsError> {
        (**self).commit(message).await
    }

    async fn tag(&self, name: &str) -> Result<(), VcsError> {
        (**self).tag(name).await
    }

    async fn push_branch(&self) -> Result<(), VcsError> {
        (**self).push_branch().await
    }

    async fn push_tags(&self) -> Result<(), VcsError> {
        (**self).push_tags().await
    }
}
