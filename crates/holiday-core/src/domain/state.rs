//! State - 1 回の更新実行の状態
//!
//! # 状態遷移
//! ```text
//! Planning -> Updating(year)... -> Staging -> Diffing
//!     -> UpToDate
//!     -> Committing -> Tagging -> PushingBranch -> PushingTags -> Done
//! ```
//! どのステップで失敗しても残りは実行しない。失敗は `UpdateError` として返り、
//! `UpdateError::failed_in()` が失敗したステップ（状態）を示す。

use std::fmt;

use super::year::Year;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Planning,
    Updating(Year),
    Staging,
    Diffing,
    /// 終端: 差分なし
    UpToDate,
    Committing,
    Tagging,
    PushingBranch,
    PushingTags,
    /// 終端: commit/tag/push 完了
    Done,
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::UpToDate | RunState::Done)
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Planning => f.write_str("planning"),
            RunState::Updating(year) => write!(f, "updating({year})"),
            RunState::Staging => f.write_str("staging"),
            RunState::Diffing => f.write_str("diffing"),
            RunState::UpToDate => f.write_str("up_to_date"),
            RunState::Committing => f.write_str("committing"),
            RunState::Tagging => f.write_str("tagging"),
            RunState::PushingBranch => f.write_str("pushing_branch"),
            RunState::PushingTags => f.write_str("pushing_tags"),
            RunState::Done => f.write_str("done"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_up_to_date_and_done_are_terminal() {
        assert!(RunState::UpToDate.is_terminal());
        assert!(RunState::Done.is_terminal());
        assert!(!RunState::Tagging.is_terminal());
        assert!(!RunState::Updating(Year::new(2024)).is_terminal());
    }

    #[test]
    fn updating_shows_year() {
        assert_eq!(RunState::Updating(Year::new(2025)).to_string(), "updating(2025)");
    }
}
