use anyhow::Result;
use chrono::{Local, Utc};

use crate::analytics;
use crate::export;
use crate::models::{Category, NewTransactionInput, TransactionPatch};
use crate::money;
use crate::store::{KvBackend, TransactionStore};

/// Dispatch one command. `args` is everything after the binary name;
/// empty args default to the monthly summary.
pub(crate) fn run<B: KvBackend>(args: &[String], store: &mut TransactionStore<B>) -> Result<()> {
    let command = args.first().map(String::as_str).unwrap_or("summary");
    match command {
        "add" => cli_add(&args[1..], store),
        "recent" | "list" | "ls" => cli_recent(&args[1..], store),
        "edit" => cli_edit(&args[1..], store),
        "delete" | "rm" => cli_delete(&args[1..], store),
        "summary" | "s" => cli_summary(&args[1..], store),
        "categories" => cli_categories(),
        "seed" => cli_seed(store),
        "export" => cli_export(&args[1..], store),
        "clear" => cli_clear(store),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("money-diary {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("money-diary — local-only personal expense diary");
    println!();
    println!("Usage: money-diary [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Monthly summary for the current month");
    println!("  add --amount <dollars> --merchant <name> --category <id>");
    println!("      [--note <text>] [--date <timestamp>]");
    println!("                                Record an expense");
    println!("  recent [--limit <n>]          Show the latest transactions");
    println!("  edit <id> [--amount <dollars>] [--merchant <name>]");
    println!("      [--category <id>] [--note <text>] [--date <timestamp>]");
    println!("                                Update fields of a transaction");
    println!("  delete <id>                   Delete a transaction");
    println!("  summary [YYYY-MM]             Monthly total, category breakdown, top merchants");
    println!("  categories                    List the category catalog");
    println!("  seed                          Add a demo transaction");
    println!("  export [path]                 Export transactions to CSV");
    println!("    --month <YYYY-MM>           Month to export (default: current)");
    println!("  clear                         Delete all transactions");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

fn flag_value<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == name)
        .map(|w| w[1].as_str())
}

fn cli_add<B: KvBackend>(args: &[String], store: &mut TransactionStore<B>) -> Result<()> {
    let amount = flag_value(args, "--amount").unwrap_or("");
    let amount_cents = money::parse_amount(amount)?;

    let input = NewTransactionInput {
        occurred_at: flag_value(args, "--date")
            .map(str::to_string)
            .unwrap_or_else(|| Utc::now().to_rfc3339()),
        amount_cents,
        merchant_raw: flag_value(args, "--merchant").unwrap_or("").to_string(),
        category: flag_value(args, "--category").unwrap_or("").to_string(),
        note: flag_value(args, "--note").map(str::to_string),
    };

    let tx = store.add(input)?;
    println!(
        "Added {} — {} ({})",
        tx.merchant_raw,
        money::format_money(tx.amount_cents),
        tx.id
    );
    Ok(())
}

fn cli_recent<B: KvBackend>(args: &[String], store: &mut TransactionStore<B>) -> Result<()> {
    let limit = flag_value(args, "--limit")
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(analytics::RECENT_WINDOW);

    let txs = store.load();
    let rows = analytics::recent(&txs, limit);
    if rows.is_empty() {
        println!("No transactions yet. Add your first expense with 'money-diary add'.");
        return Ok(());
    }

    println!(
        "{:<36} {:<12} {:<24} {:<16} {:>12}",
        "ID", "Date", "Merchant", "Category", "Amount"
    );
    println!("{}", "─".repeat(104));
    for tx in &rows {
        let date = crate::models::parse_timestamp(&tx.occurred_at)
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| tx.occurred_at.clone());
        println!(
            "{:<36} {:<12} {:<24} {:<16} {:>12}",
            tx.id,
            date,
            tx.merchant_raw,
            Category::label_for(&tx.category),
            money::format_money(tx.amount_cents),
        );
    }
    Ok(())
}

fn cli_edit<B: KvBackend>(args: &[String], store: &mut TransactionStore<B>) -> Result<()> {
    let Some(id) = args.first().filter(|a| !a.starts_with('-')) else {
        anyhow::bail!("Usage: money-diary edit <id> [--amount <dollars>] [--merchant <name>] [--category <id>] [--note <text>] [--date <timestamp>]");
    };

    let amount_cents = match flag_value(args, "--amount") {
        Some(raw) => Some(money::parse_amount(raw)?),
        None => None,
    };
    let patch = TransactionPatch {
        occurred_at: flag_value(args, "--date").map(str::to_string),
        amount_cents,
        merchant_raw: flag_value(args, "--merchant").map(str::to_string),
        category: flag_value(args, "--category").map(str::to_string),
        note: flag_value(args, "--note").map(str::to_string),
    };

    match store.update(id, patch)? {
        Some(tx) => {
            println!(
                "Updated {} — {} ({})",
                tx.merchant_raw,
                money::format_money(tx.amount_cents),
                tx.id
            );
            Ok(())
        }
        None => anyhow::bail!("Transaction not found: {id}"),
    }
}

fn cli_delete<B: KvBackend>(args: &[String], store: &mut TransactionStore<B>) -> Result<()> {
    let Some(id) = args.first() else {
        anyhow::bail!("Usage: money-diary delete <id>");
    };
    if store.delete(id)? {
        println!("Deleted {id}");
        Ok(())
    } else {
        anyhow::bail!("Transaction not found: {id}");
    }
}

fn cli_summary<B: KvBackend>(args: &[String], store: &mut TransactionStore<B>) -> Result<()> {
    let month = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .cloned()
        .unwrap_or_else(|| analytics::current_month_key(Local::now()));

    let txs = store.load();
    let month_txs = analytics::filter_by_month(&txs, &month);
    let total = analytics::sum_amount_cents(&month_txs);

    println!("money-diary — {month}");
    println!("{}", "─".repeat(40));
    println!("  Total spend:  {}", money::format_money(total));
    println!("  Transactions: {}", month_txs.len());

    if month_txs.is_empty() {
        return Ok(());
    }

    println!();
    println!("Category Breakdown:");
    for row in analytics::group_by_category(&month_txs) {
        println!(
            "  {:<24} {:>12}",
            Category::label_for(&row.category_id),
            money::format_money(row.total_cents)
        );
    }

    println!();
    println!("Top Merchants:");
    for row in analytics::group_by_merchant(&month_txs) {
        println!(
            "  {:<24} {:>12}",
            row.merchant,
            money::format_money(row.total_cents)
        );
    }

    Ok(())
}

fn cli_categories() -> Result<()> {
    println!("{:<16} Label", "ID");
    println!("{}", "─".repeat(34));
    for category in Category::all() {
        println!("{:<16} {}", category.id, category.label);
    }
    Ok(())
}

fn cli_seed<B: KvBackend>(store: &mut TransactionStore<B>) -> Result<()> {
    let tx = store.add(NewTransactionInput {
        occurred_at: Utc::now().to_rfc3339(),
        amount_cents: 1299,
        merchant_raw: "Demo Coffee Shop".into(),
        category: "food".into(),
        note: Some("Seed demo transaction".into()),
    })?;
    println!("Seeded transaction id: {}", tx.id);
    println!("Transactions in store: {}", store.load().len());
    Ok(())
}

fn cli_export<B: KvBackend>(args: &[String], store: &mut TransactionStore<B>) -> Result<()> {
    let month = flag_value(args, "--month")
        .map(str::to_string)
        .unwrap_or_else(|| analytics::current_month_key(Local::now()));

    // Output path is the first non-flag argument.
    let output_path = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| shellexpand(a))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            format!("{home}/money-diary-export-{month}.csv")
        });

    let txs = store.load();
    let month_txs = analytics::filter_by_month(&txs, &month);
    if month_txs.is_empty() {
        println!("No transactions for {month}");
        return Ok(());
    }

    let count = export::write_csv(std::path::Path::new(&output_path), &month_txs)?;
    println!("Exported {count} transactions to {output_path}");
    Ok(())
}

fn cli_clear<B: KvBackend>(store: &mut TransactionStore<B>) -> Result<()> {
    store.clear()?;
    println!("Cleared all transactions");
    Ok(())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
