//! InMemoryVcs - 内容を追跡する VersionControl のフェイク（開発用・テスト用）
//!
//! # 実装詳細
//! - `head`: 最後にコミットされた各ファイルの内容
//! - `index`: stage 時点で読み込んだ内容
//! - diff は index と head の差分から stat 風のテキストを作る
//! - 操作ごとに失敗を差し込める（`fail_on`）
//!
//! 本物の git と同じく、同じ内容を書き直しただけなら差分は空になる。

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::ports::{VcsError, VersionControl};

/// Operations of the [`VersionControl`] port, for call tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VcsOp {
    Stage,
    DiffStat,
    Commit,
    Tag,
    PushBranch,
    PushTags,
}

impl VcsOp {
    fn command(self) -> &'static str {
        match self {
            VcsOp::Stage => "add",
            VcsOp::DiffStat => "diff --stat --cached",
            VcsOp::Commit => "commit",
            VcsOp::Tag => "tag",
            VcsOp::PushBranch => "push",
            VcsOp::PushTags => "push --tags",
        }
    }
}

#[derive(Default)]
struct VcsState {
    head: BTreeMap<PathBuf, String>,
    index: BTreeMap<PathBuf, String>,
    commits: Vec<String>,
    tags: BTreeSet<String>,
    pushed_commits: usize,
    pushed_tags: BTreeSet<String>,
    calls: Vec<VcsOp>,
    failures: BTreeSet<VcsOp>,
}

impl VcsState {
    fn changed(&self) -> Vec<(&PathBuf, &String)> {
        self.index
            .iter()
            .filter(|(path, content)| self.head.get(*path) != Some(*content))
            .collect()
    }

    fn check(&mut self, op: VcsOp) -> Result<(), VcsError> {
        self.calls.push(op);
        if self.failures.contains(&op) {
            return Err(VcsError::Rejected {
                command: op.command().to_string(),
                reason: "injected failure".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryVcs {
    state: Mutex<VcsState>,
}

impl InMemoryVcs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later call of `op` fail.
    pub fn fail_on(&self, op: VcsOp) {
        self.state.lock().unwrap().failures.insert(op);
    }

    /// Pretend `name` was tagged by an earlier run.
    pub fn with_existing_tag(self, name: &str) -> Self {
        self.state.lock().unwrap().tags.insert(name.to_string());
        self
    }

    pub fn calls(&self) -> Vec<VcsOp> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn commits(&self) -> Vec<String> {
        self.state.lock().unwrap().commits.clone()
    }

    pub fn tags(&self) -> Vec<String> {
        self.state.lock().unwrap().tags.iter().cloned().collect()
    }

    pub fn pushed_tags(&self) -> Vec<String> {
        self.state.lock().unwrap().pushed_tags.iter().cloned().collect()
    }

    pub fn pushed_commits(&self) -> usize {
        self.state.lock().unwrap().pushed_commits
    }
}

#[async_trait]
impl VersionControl for InMemoryVcs {
    async fn stage(&self, paths: &[PathBuf]) -> Result<(), VcsError> {
        self.state.lock().unwrap().check(VcsOp::Stage)?;

        // ロックを持ったまま await しない: 先に読み込んでから反映する
        let mut staged = Vec::with_capacity(paths.len());
        for path in paths {
            let content =
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| VcsError::Rejected {
                        command: VcsOp::Stage.command().to_string(),
                        reason: format!("pathspec '{}' did not match: {e}", path.display()),
                    })?;
            staged.push((path.clone(), content));
        }

        self.state.lock().unwrap().index.extend(staged);
        Ok(())
    }

    async fn diff_stat_staged(&self) -> Result<String, VcsError> {
        let mut state = self.state.lock().unwrap();
        state.check(VcsOp::DiffStat)?;

        let changed = state.changed();
        if changed.is_empty() {
            return Ok(String::new());
        }
        let mut out = String::new();
        for (path, content) in &changed {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            out.push_str(&format!(" {name} | {} lines\n", content.lines().count()));
        }
        out.push_str(&format!(" {} file(s) changed\n", changed.len()));
        Ok(out)
    }

    async fn commit(&self, message: &str) -> Result<(), VcsError> {
        let mut state = self.state.lock().unwrap();
        state.check(VcsOp::Commit)?;

        if state.changed().is_empty() {
            return Err(VcsError::Rejected {
                command: VcsOp::Commit.command().to_string(),
                reason: "nothing to commit, working tree clean".to_string(),
            });
        }
        let staged = state.index.clone();
        state.head.extend(staged);
        state.commits.push(message.to_string());
        Ok(())
    }

    async fn tag(&self, name: &str) -> Result<(), VcsError> {
        let mut state = self.state.lock().unwrap();
        state.check(VcsOp::Tag)?;

        if !state.tags.insert(name.to_string()) {
            return Err(VcsError::Rejected {
                command: VcsOp::Tag.command().to_string(),
                reason: format!("tag '{name}' already exists"),
            });
        }
        Ok(())
    }

    async fn push_branch(&self) -> Result<(), VcsError> {
        let mut state = self.state.lock().unwrap();
        state.check(VcsOp::PushBranch)?;
        state.pushed_commits = state.commits.len();
        Ok(())
    }

    async fn push_tags(&self) -> Result<(), VcsError> {
        let mut state = self.state.lock().unwrap();
        state.check(VcsOp::PushTags)?;
        let tags = state.tags.clone();
        state.pushed_tags = tags;
        Ok(())
    }
}
