use super::parser::RawRow;
use crate::normalize::soft_format;

/// Combines reference, type, category, account number and foreign currency info of a
/// row into a single description.
///
/// The output is part of the transaction id, so it must stay stable for identical input.
/// Example: `[NL00RABO0123456789] Ping Income; Miscellaneous; 1.0 USD 0.8821879`
pub fn synthesize(row: &RawRow) -> String {
    let transaction_type = labelled(&row.transaction_type);
    let category = labelled(&row.category);
    let extra = [
        transaction_type.as_str(),
        category.as_str(),
        row.amount_foreign.as_str(),
        row.currency_foreign.as_str(),
        row.exchange_rate.as_str(),
    ]
    .iter()
    .map(|part| part.trim())
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(" ");
    let extra = extra.trim();

    let mut description = String::new();
    if !row.account_number.is_empty() {
        description.push_str(&format!("[{}] ", row.account_number));
    }
    description.push_str(&row.payment_reference);
    if !extra.is_empty() {
        if !row.payment_reference.is_empty() {
            description.push(' ');
        }
        description.push_str(extra);
    }
    description
}

/// Same as [synthesize], but every cell is cleaned up with [soft_format] first, so
/// the `[`, `]` and `;` in the result are only the ones added here.
pub fn synthesize_for_display(row: &RawRow) -> String {
    let cleaned = RawRow {
        date: row.date.clone(),
        payee: soft_format(&row.payee),
        account_number: soft_format(&row.account_number),
        transaction_type: soft_format(&row.transaction_type),
        payment_reference: soft_format(&row.payment_reference),
        category: soft_format(&row.category),
        amount_eur: row.amount_eur.clone(),
        amount_foreign: soft_format(&row.amount_foreign),
        currency_foreign: soft_format(&row.currency_foreign),
        exchange_rate: soft_format(&row.exchange_rate),
    };
    synthesize(&cleaned).trim().to_string()
}

fn labelled(cell: &str) -> String {
    if cell.trim().is_empty() {
        String::new()
    } else {
        format!("{cell}; ")
    }
}
