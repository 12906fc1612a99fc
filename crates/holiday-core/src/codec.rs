//! Canonical JSON encoding for dataset files.
//!
//! Output is byte-stable for the same logical value, because change detection
//! is done by diffing the written files:
//! - keys in struct declaration order (maps: sorted, `preserve_order` is off)
//! - 4-space indentation, `\n` line endings, no trailing newline
//! - non-ASCII text written verbatim
//!
//! Date values go through [`iso_date`]; anything a `Serialize` impl refuses to
//! encode surfaces as [`SerializationError`].

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use thiserror::Error;

const INDENT: &[u8] = b"    ";

#[derive(Debug, Error)]
#[error("value cannot be encoded as JSON: {0}")]
pub struct SerializationError(serde_json::Error);

/// Encode `value` in the canonical dataset form.
pub fn to_canonical_json<T>(value: &T) -> Result<String, SerializationError>
where
    T: Serialize + ?Sized,
{
    let mut buf = Vec::with_capacity(1024);
    let formatter = PrettyFormatter::with_indent(INDENT);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser).map_err(SerializationError)?;

    // serde_json only ever writes valid UTF-8
    String::from_utf8(buf).map_err(|e| {
        SerializationError(serde::ser::Error::custom(format!("non UTF-8 output: {e}")))
    })
}

/// `NaiveDate` <-> `"YYYY-MM-DD"`.
///
/// Use with `#[serde(with = "crate::codec::iso_date")]`.
pub mod iso_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}
