//! DataSource port - 祝日データの取得元
//!
//! 祝日の抽出ロジック自体はこのクレートの外側にある。
//! ここでは「年を渡すと HolidayRecord が返る」という境界だけを定義する。
//!
//! # 実装
//! - **HttpDataSource**: 年ごとの JSON を HTTP で取得（本番用）
//! - **StaticDataSource**: メモリ上の固定データ（テスト用）

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{HolidayRecord, Year};

/// 下位クレートのエラー（原因チェーンごと保持する）
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// FetchError は取得失敗（リトライはしない）
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("timed out after {after:?}")]
    Timeout { after: Duration },

    #[error("transport error")]
    Transport(#[source] BoxError),

    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("invalid holiday document")]
    Decode(#[source] BoxError),

    #[error("document at {url} describes {found}, expected {expected}")]
    WrongYear {
        url: String,
        expected: Year,
        found: i32,
    },

    #[error("no data available for {0}")]
    Missing(Year),
}

/// DataSource は 1 年分の HolidayRecord を返す
///
/// # Thread Safety
/// - `Send + Sync` を要求（tokio ランタイム上で使うため）
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch(&self, year: Year) -> Result<HolidayRecord, FetchError>;
}

#[async_trait]
impl<S: DataSource + ?Sized> DataSource for std::sync::Arc<S> {
    async fn fetch(&self, year: Year) -> Result<HolidayRecord, FetchError> {
        (**self).fetch(year).await
    }
}
