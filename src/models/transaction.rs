use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

/// The only supported currency. Not user-settable.
pub(crate) const CURRENCY: &str = "USD";

/// A persisted expense record. Identity (`id`, `created_at`) is assigned
/// once by the store; the remaining fields are editable via patch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Transaction {
    pub(crate) id: String,
    pub(crate) occurred_at: String,
    pub(crate) amount_cents: i64,
    pub(crate) currency: String,
    pub(crate) merchant_raw: String,
    pub(crate) category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) note: Option<String>,
    pub(crate) created_at: String,
}

impl Transaction {
    /// Local calendar month bucket ("YYYY-MM"), `None` when `occurred_at`
    /// does not parse.
    pub(crate) fn month_key(&self) -> Option<String> {
        parse_timestamp(&self.occurred_at).map(|dt| dt.format("%Y-%m").to_string())
    }
}

/// Caller input for creating a transaction. Normalized and validated by
/// the store before anything is persisted.
#[derive(Debug, Clone)]
pub(crate) struct NewTransactionInput {
    pub(crate) occurred_at: String,
    pub(crate) amount_cents: i64,
    pub(crate) merchant_raw: String,
    pub(crate) category: String,
    pub(crate) note: Option<String>,
}

/// Editable fields for a patch update. `None` means "leave unchanged".
#[derive(Debug, Clone, Default)]
pub(crate) struct TransactionPatch {
    pub(crate) occurred_at: Option<String>,
    pub(crate) amount_cents: Option<i64>,
    pub(crate) merchant_raw: Option<String>,
    pub(crate) category: Option<String>,
    pub(crate) note: Option<String>,
}

/// Parse a caller-supplied timestamp, interpreted in local time. Accepts
/// RFC 3339 as well as naive `YYYY-MM-DDTHH:MM[:SS[.f]]` and bare
/// `YYYY-MM-DD` forms.
pub(crate) fn parse_timestamp(value: &str) -> Option<DateTime<Local>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Local));
    }

    let naive = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;

    Local.from_local_datetime(&naive).earliest()
}
