//! Clock port - 時刻の抽象化
//!
//! 「今年」とタグの日付は、ホストのタイムゾーンではなく固定の UTC+8（夏時間なし）で決める。
//! システム時刻を直接読まず Clock を注入することで、テストでは FixedClock を使える。

use chrono::{DateTime, FixedOffset, Utc};

/// UTC+8 in seconds.
pub const CIVIL_OFFSET_SECS: i32 = 8 * 3600;

/// The civil time zone every run is evaluated in.
pub fn civil_offset() -> FixedOffset {
    // CIVIL_OFFSET_SECS は ±24h の範囲内なので None にはならない
    FixedOffset::east_opt(CIVIL_OFFSET_SECS).expect("UTC+8 is a valid fixed offset")
}

/// Clock は現在時刻を提供
///
/// # テスト容易性
/// - trait により時刻を差し替え可能
/// - テストでは FixedClock を使用
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// `now()` seen from the civil zone.
    fn civil_now(&self) -> DateTime<FixedOffset> {
        self.now().with_timezone(&civil_offset())
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// 本番用
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// テスト用: 常に同じ時刻を返す
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }
}
