//! App - アプリケーション層
//!
//! ports を組み合わせて更新処理を実装します。
//!
//! # 主要コンポーネント
//! - **YearUpdater**: 1 年分の取得・シリアライズ・書き込み
//! - **RangeOrchestrator**: 対象年の決定と逐次更新
//! - **ChangePublisher**: 差分検出と commit / tag / push
//! - **UpdateRun**: 上記をつないだ 1 回分の実行

pub mod orchestrator;
pub mod publisher;
pub mod run;
pub mod year_updater;

// 主要な型を再エクスポート
pub use self::orchestrator::{RangeOrchestrator, RunScope, plan};
pub use self::publisher::ChangePublisher;
pub use self::run::{RunReport, UpdateRun};
pub use self::year_updater::{DEFAULT_FETCH_TIMEOUT, YearUpdater};
