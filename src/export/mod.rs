use anyhow::{Context, Result};
use std::path::Path;

use crate::models::Transaction;

/// Write transactions to a CSV file. Returns the number of data rows.
pub(crate) fn write_csv(path: &Path, txs: &[Transaction]) -> Result<usize> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;

    writer.write_record([
        "id",
        "occurredAt",
        "amountCents",
        "currency",
        "merchant",
        "category",
        "note",
        "createdAt",
    ])?;

    for tx in txs {
        writer.write_record([
            tx.id.as_str(),
            tx.occurred_at.as_str(),
            &tx.amount_cents.to_string(),
            tx.currency.as_str(),
            tx.merchant_raw.as_str(),
            tx.category.as_str(),
            tx.note.as_deref().unwrap_or(""),
            tx.created_at.as_str(),
        ])?;
    }

    writer.flush().context("Failed to write CSV file")?;
    Ok(txs.len())
}

#[cfg(test)]
mod tests;
