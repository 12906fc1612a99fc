//! Ports - 抽象化レイヤー
//!
//! このモジュールは Hexagonal Architecture の「ポート」を定義します。
//! 外部システム（データ取得元、Git リポジトリ、時計）への境界を trait にして、
//! 更新ロジックをフェイク実装でテストできるようにしています。

pub mod clock;
pub mod data_source;
pub mod vcs;

// 主要な trait を再エクスポート
pub use self::clock::{CIVIL_OFFSET_SECS, Clock, FixedClock, SystemClock, civil_offset};
pub use self::data_source::{BoxError, DataSource, FetchError};
pub use self::vcs::{VcsError, VersionControl};
