//! GitCli - `git` サブプロセスによる VersionControl 実装
//!
//! 作業ディレクトリ（データディレクトリ）で git を実行し、
//! 非ゼロ終了を `VcsError::Failed` として返す。

use std::ffi::OsString;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::process::Command;

use crate::ports::{VcsError, VersionControl};

pub struct GitCli {
    program: OsString,
    work_dir: PathBuf,
}

impl GitCli {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self::with_program("git", work_dir)
    }

    /// Use a specific git executable.
    pub fn with_program(program: impl Into<OsString>, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            work_dir: work_dir.into(),
        }
    }

    /// Run git and return its stdout.
    async fn run(&self, args: &[OsString]) -> Result<String, VcsError> {
        let command = describe(args);
        tracing::debug!(command = %command, dir = %self.work_dir.display(), "running git");

        let output = Command::new(&self.program)
            .args(args)
            .current_dir(&self.work_dir)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| VcsError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(VcsError::Failed {
                command,
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

fn describe(args: &[OsString]) -> String {
    let mut out = String::from("git");
    for arg in args {
        out.push(' ');
        out.push_str(&arg.to_string_lossy());
    }
    out
}

fn args<const N: usize>(parts: [&str; N]) -> Vec<OsString> {
    parts.into_iter().map(OsString::from).collect()
}

fn add_args(paths: &[PathBuf]) -> Vec<OsString> {
    let mut out = args(["add", "--"]);
    out.extend(paths.iter().map(|p| p.as_os_str().to_owned()));
    out
}

#[async_trait]
impl VersionControl for GitCli {
    async fn stage(&self, paths: &[PathBuf]) -> Result<(), VcsError> {
        self.run(&add_args(paths)).await.map(|_| ())
    }

    async fn diff_stat_staged(&self) -> Result<String, VcsError> {
        self.run(&args(["diff", "--stat", "--cached"])).await
    }

    async fn commit(&self, message: &str) -> Result<(), VcsError> {
        self.run(&args(["commit", "-m", message])).await.map(|_| ())
    }

    async fn tag(&self, name: &str) -> Result<(), VcsError> {
        self.run(&args(["tag", name])).await.map(|_| ())
    }

    async fn push_branch(&self) -> Result<(), VcsError> {
        self.run(&args(["push"])).await.map(|_| ())
    }

    async fn push_tags(&self) -> Result<(), VcsError> {
        self.run(&args(["push", "--tags"])).await.map(|_| ())
    }
}
