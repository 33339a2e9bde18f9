mod backend;

use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{StoreError, ValidationError};
use crate::models::{
    parse_timestamp, NewTransactionInput, Transaction, TransactionPatch, CURRENCY,
};

#[cfg(test)]
pub(crate) use backend::MemoryBackend;
pub(crate) use backend::{KvBackend, SqliteBackend};

/// Versioned storage key; the schema version is embedded in the name.
pub(crate) const STORAGE_KEY: &str = "money-diary:transactions:v1";

/// Owns the persisted transaction collection. Every operation is a
/// read-modify-write of the whole collection under [`STORAGE_KEY`].
///
/// A store without a backend degrades instead of failing: reads return
/// an empty collection and writes are silent no-ops.
pub(crate) struct TransactionStore<B: KvBackend> {
    backend: Option<B>,
}

impl<B: KvBackend> TransactionStore<B> {
    pub(crate) fn new(backend: B) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// A store with no persistence backend at all.
    pub(crate) fn unavailable() -> Self {
        Self { backend: None }
    }

    /// Read the persisted collection. A missing key or an unparseable
    /// payload degrades to empty rather than raising; every entry is
    /// re-validated and invalid ones are dropped.
    pub(crate) fn load(&self) -> Vec<Transaction> {
        let Some(backend) = &self.backend else {
            return Vec::new();
        };
        let serialized = match backend.get(STORAGE_KEY) {
            Ok(Some(serialized)) => serialized,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("transaction read failed: {e:#}");
                return Vec::new();
            }
        };
        match serde_json::from_str::<serde_json::Value>(&serialized) {
            Ok(value) => sanitize_transactions(value),
            Err(e) => {
                warn!("discarding unparseable transaction payload: {e}");
                Vec::new()
            }
        }
    }

    fn save(&mut self, txs: Vec<Transaction>) -> Result<(), StoreError> {
        let Some(backend) = &mut self.backend else {
            return Ok(());
        };
        let sanitized: Vec<Transaction> = txs.into_iter().filter_map(sanitize_transaction).collect();
        let serialized =
            serde_json::to_string(&sanitized).map_err(|e| StoreError::Storage(e.into()))?;
        backend.set(STORAGE_KEY, &serialized).map_err(StoreError::Storage)
    }

    /// Normalize, validate, and persist a new transaction. Assigns a
    /// fresh UUIDv4 id and a `created_at` of now.
    pub(crate) fn add(&mut self, input: NewTransactionInput) -> Result<Transaction, StoreError> {
        let tx = Transaction {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now().to_rfc3339(),
            occurred_at: normalize_occurred_at(&input.occurred_at)?,
            amount_cents: normalize_amount_cents(input.amount_cents)?,
            currency: CURRENCY.to_string(),
            merchant_raw: normalize_required_text(&input.merchant_raw, "merchantRaw")?,
            category: normalize_required_text(&input.category, "category")?,
            note: normalize_note(input.note.as_deref()),
        };

        let mut existing = self.load();
        existing.push(tx.clone());
        self.save(existing)?;
        Ok(tx)
    }

    /// Merge a patch onto an existing record. `id`, `created_at`, and
    /// `currency` are immutable. Returns `Ok(None)` when no record
    /// matches the id.
    pub(crate) fn update(
        &mut self,
        id: &str,
        patch: TransactionPatch,
    ) -> Result<Option<Transaction>, StoreError> {
        let id = id.trim();
        if id.is_empty() {
            return Ok(None);
        }

        // Validate the whole patch before touching stored state.
        let occurred_at = patch
            .occurred_at
            .as_deref()
            .map(normalize_occurred_at)
            .transpose()?;
        let amount_cents = patch
            .amount_cents
            .map(normalize_amount_cents)
            .transpose()?;
        let merchant_raw = patch
            .merchant_raw
            .as_deref()
            .map(|m| normalize_required_text(m, "merchantRaw"))
            .transpose()?;
        let category = patch
            .category
            .as_deref()
            .map(|c| normalize_required_text(c, "category"))
            .transpose()?;
        let patch_note = patch.note.as_deref().and_then(|n| normalize_note(Some(n)));

        let mut existing = self.load();
        let Some(index) = existing.iter().position(|t| t.id == id) else {
            return Ok(None);
        };

        let current = &existing[index];
        let updated = Transaction {
            id: current.id.clone(),
            created_at: current.created_at.clone(),
            currency: CURRENCY.to_string(),
            occurred_at: occurred_at.unwrap_or_else(|| current.occurred_at.clone()),
            amount_cents: amount_cents.unwrap_or(current.amount_cents),
            merchant_raw: merchant_raw.unwrap_or_else(|| current.merchant_raw.clone()),
            category: category.unwrap_or_else(|| current.category.clone()),
            // A blank patch note falls back to the current note; notes
            // are replaced, never cleared.
            note: patch_note.or_else(|| current.note.clone()),
        };

        existing[index] = updated.clone();
        self.save(existing)?;
        Ok(Some(updated))
    }

    /// Remove the record with the given id. Persists only when a record
    /// was actually removed.
    pub(crate) fn delete(&mut self, id: &str) -> Result<bool, StoreError> {
        let id = id.trim();
        if id.is_empty() {
            return Ok(false);
        }

        let existing = self.load();
        let before = existing.len();
        let next: Vec<Transaction> = existing.into_iter().filter(|t| t.id != id).collect();
        if next.len() == before {
            return Ok(false);
        }
        self.save(next)?;
        Ok(true)
    }

    /// Remove the entire persisted container.
    pub(crate) fn clear(&mut self) -> Result<(), StoreError> {
        let Some(backend) = &mut self.backend else {
            return Ok(());
        };
        backend.remove(STORAGE_KEY).map_err(StoreError::Storage)
    }
}

/// Re-validate a deserialized payload. A payload that is not an array,
/// and any entry that fails validation, is dropped without error so an
/// externally corrupted container never takes the app down.
fn sanitize_transactions(value: serde_json::Value) -> Vec<Transaction> {
    let serde_json::Value::Array(entries) = value else {
        warn!("stored transaction payload is not an array; discarding");
        return Vec::new();
    };
    entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<Transaction>(entry) {
            Ok(tx) => sanitize_transaction(tx),
            Err(e) => {
                debug!("dropping malformed stored entry: {e}");
                None
            }
        })
        .collect()
}

/// `None` when any invariant is violated; otherwise the record with its
/// whitespace re-canonicalized.
fn sanitize_transaction(tx: Transaction) -> Option<Transaction> {
    let id = tx.id.trim();
    if id.is_empty() {
        return None;
    }
    if parse_timestamp(&tx.occurred_at).is_none() || parse_timestamp(&tx.created_at).is_none() {
        return None;
    }
    if tx.amount_cents <= 0 {
        return None;
    }
    if tx.currency != CURRENCY {
        return None;
    }
    let merchant_raw = tx.merchant_raw.trim();
    let category = tx.category.trim();
    if merchant_raw.is_empty() || category.is_empty() {
        return None;
    }

    Some(Transaction {
        id: id.to_string(),
        occurred_at: tx.occurred_at.trim().to_string(),
        amount_cents: tx.amount_cents,
        currency: tx.currency,
        merchant_raw: merchant_raw.to_string(),
        category: category.to_string(),
        note: normalize_note(tx.note.as_deref()),
        created_at: tx.created_at,
    })
}

fn normalize_required_text(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}

fn normalize_note(note: Option<&str>) -> Option<String> {
    let trimmed = note?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn normalize_amount_cents(amount_cents: i64) -> Result<i64, ValidationError> {
    if amount_cents <= 0 {
        return Err(ValidationError::AmountNotPositive);
    }
    Ok(amount_cents)
}

fn normalize_occurred_at(value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if parse_timestamp(trimmed).is_none() {
        return Err(ValidationError::InvalidTimestamp("occurredAt"));
    }
    Ok(trimmed.to_string())
}
