#![allow(clippy::unwrap_used)]

use super::*;

fn tx(merchant: &str, note: Option<&str>) -> Transaction {
    Transaction {
        id: format!("{merchant}-id"),
        occurred_at: "2024-03-05T12:00:00Z".into(),
        amount_cents: 450,
        currency: "USD".into(),
        merchant_raw: merchant.into(),
        category: "food".into(),
        note: note.map(str::to_string),
        created_at: "2024-03-05T12:00:00Z".into(),
    }
}

#[test]
fn test_write_csv() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("export.csv");

    let txs = vec![tx("Cafe", Some("lunch")), tx("Market", None)];
    let count = write_csv(&path, &txs).unwrap();
    assert_eq!(count, 2);

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("id,occurredAt,amountCents"));
    assert!(lines[1].contains("Cafe"));
    assert!(lines[1].contains("lunch"));
    assert!(lines[2].contains("Market"));
}

#[test]
fn test_write_csv_empty_collection() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");

    let count = write_csv(&path, &[]).unwrap();
    assert_eq!(count, 0);

    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().count(), 1);
}
