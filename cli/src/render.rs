//! Terminal and JSON rendering of classified transactions.

use serde::Serialize;

use suiscope_types::ClassifiedTransaction;

const HEADERS: [&str; 7] = [
    "TIME",
    "CATEGORY",
    "OUTGOING",
    "INCOMING",
    "GAS (SUI)",
    "DIGEST",
    "EXPLORER",
];

const COLUMN_GAP: &str = "  ";

/// Render `transactions` as an aligned text table with a trailing count.
pub fn table(transactions: &[ClassifiedTransaction]) -> String {
    let rows: Vec<[String; 7]> = transactions
        .iter()
        .map(|tx| {
            [
                tx.timestamp.clone(),
                tx.category.to_string(),
                tx.outgoing_summary(),
                tx.incoming_summary(),
                tx.gas_cost.clone(),
                tx.digest.short(),
                tx.explorer_url(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, HEADERS, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, rule.iter().map(String::as_str), &widths);
    for row in &rows {
        push_row(&mut out, row.iter().map(String::as_str), &widths);
    }
    out.push_str(&format!("\n{} transactions\n", rows.len()));
    out
}

fn push_row<'a>(out: &mut String, cells: impl IntoIterator<Item = &'a str>, widths: &[usize]) {
    let line = cells
        .into_iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    out.push_str(line.trim_end());
    out.push('\n');
}

#[derive(Serialize)]
struct JsonRecord<'a> {
    #[serde(flatten)]
    transaction: &'a ClassifiedTransaction,
    explorer_url: String,
}

/// Render `transactions` as a pretty-printed JSON array.
pub fn json(transactions: &[ClassifiedTransaction]) -> serde_json::Result<String> {
    let records: Vec<JsonRecord<'_>> = transactions
        .iter()
        .map(|transaction| JsonRecord {
            transaction,
            explorer_url: transaction.explorer_url(),
        })
        .collect();
    serde_json::to_string_pretty(&records)
}
