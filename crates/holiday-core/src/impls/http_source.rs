//! HttpDataSource - 年ごとの JSON ドキュメントを HTTP で取得する DataSource
//!
//! URL テンプレートの `{year}` を年で置き換えて GET する。
//! 2xx 以外は `FetchError::Status`、本文が HolidayRecord として読めなければ
//! `FetchError::Decode`、別の年のドキュメントなら `FetchError::WrongYear` になる。
//! reqwest のエラーは `#[source]` として保持する。タイムアウトは YearUpdater 側で掛ける。

use async_trait::async_trait;

use crate::domain::{HolidayRecord, Year};
use crate::ports::{DataSource, FetchError};

/// Placeholder replaced by the requested year.
pub const YEAR_PLACEHOLDER: &str = "{year}";

pub struct HttpDataSource {
    client: reqwest::Client,
    url_template: String,
}

impl HttpDataSource {
    pub fn new(url_template: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url_template: url_template.into(),
        }
    }

    pub fn url_for(&self, year: Year) -> String {
        self.url_template
            .replace(YEAR_PLACEHOLDER, &year.to_string())
    }
}

#[async_trait]
impl DataSource for HttpDataSource {
    async fn fetch(&self, year: Year) -> Result<HolidayRecord, FetchError> {
        let url = self.url_for(year);
        tracing::debug!(%year, %url, "requesting holiday document");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.into()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let record: HolidayRecord = response
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.into()))?;

        if record.year != year.get() {
            return Err(FetchError::WrongYear {
                url,
                expected: year,
                found: record.year,
            });
        }
        Ok(record)
    }
}
