//! holiday-core
//!
//! 年ごとの祝日データを取得して `<year>.json` に書き出し、
//! 差分があるときだけ日付タグ付きで commit / push する更新ツールの中核。
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（Year, HolidayRecord, StorageLocation, PublishResult, errors）
//! - **ports**: 抽象化レイヤー（Clock, DataSource, VersionControl）
//! - **impls**: ports の実装（HttpDataSource, GitCli, テスト用のフェイク）
//! - **app**: アプリケーションロジック（YearUpdater, RangeOrchestrator, ChangePublisher, UpdateRun）
//! - **codec**: データファイルの正規 JSON エンコード
//! - **config**: 環境変数からの設定読み込み

pub mod app;
pub mod codec;
pub mod config;
pub mod domain;
pub mod impls;
pub mod ports;

pub use app::{RunReport, RunScope, UpdateRun};
pub use config::{Config, ConfigError};
pub use domain::{PublishResult, UpdateError, Year};
