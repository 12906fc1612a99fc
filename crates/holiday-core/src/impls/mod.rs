//! Impls - ports の実装
//!
//! # 本番用
//! - **HttpDataSource**: 年ごとの JSON を HTTP で取得
//! - **GitCli**: `git` サブプロセス
//!
//! # 開発用・テスト用
//! - **StaticDataSource**: 固定データ + 失敗・遅延の差し込み
//! - **InMemoryVcs**: 内容を追跡する git のフェイク

pub mod git_cli;
pub mod http_source;
pub mod memory_vcs;
pub mod static_source;

// 主要な型を再エクスポート
pub use self::git_cli::GitCli;
pub use self::http_source::{HttpDataSource, YEAR_PLACEHOLDER};
pub use self::memory_vcs::{InMemoryVcs, VcsOp};
pub use self::static_source::StaticDataSource;
