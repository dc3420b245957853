use anyhow::{Context as _, Result};
use sha2::{Digest as _, Sha256};

mod description;
mod parser;

pub use parser::{
    parse_row, Column, CsvTokenizer, ParsedRow, QuotedCellTokenizer, RawRow, RowTokenizer,
    TokenizerKind, Violation,
};

use crate::config::Config;
use crate::ir::{LedgerEntry, Posting, TransactionId};
use crate::normalize::{format, reformat_date, soft_format};

/// A data line of the export, with its 1-based line number in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataLine<'a> {
    pub line_number: usize,
    pub content: &'a str,
}

/// All lines after the header row. Blank lines are skipped.
pub fn data_lines(content: &str) -> impl Iterator<Item = DataLine<'_>> {
    maybe_remove_byte_order_mark(content)
        .lines()
        .enumerate()
        .skip(1)
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, content)| DataLine {
            line_number: index + 1,
            content,
        })
}

fn maybe_remove_byte_order_mark(content: &str) -> &str {
    content.strip_prefix('\u{FEFF}').unwrap_or(content)
}

/// Builds the journal entry for a row.
///
/// Fails if the EUR amount isn't a number. Everything else is taken as it is, even
/// if the row had violations.
pub fn to_ir(row: &RawRow, config: &Config) -> Result<LedgerEntry> {
    let amount = parser::parse_amount(&row.amount_eur)
        .with_context(|| format!("AmountEUR: '{}' is not a number", row.amount_eur))?;

    let transaction_id = transaction_id(row);
    let category_account = category_account(config, row);
    if category_account.split(':').any(str::is_empty) {
        log::warn!(
            "Transaction {} has empty segments in account {category_account}",
            transaction_id.0
        );
    }

    Ok(LedgerEntry {
        date: reformat_date(&row.date),
        transaction_id,
        payee: soft_format(&row.payee),
        description: description::synthesize_for_display(row),
        asset_posting: Posting::with_source_text(
            config.asset_account_name(),
            amount,
            parser::amount_literal(&row.amount_eur),
        ),
        category_posting: Posting::new(category_account, parser::negate(amount)),
    })
}

/// sha-256 over date, payee and synthesized description, taken from the raw cells.
pub fn transaction_id(row: &RawRow) -> TransactionId {
    let description = description::synthesize(row);
    let mut hasher = Sha256::new();
    hasher.update(row.date.as_bytes());
    hasher.update(row.payee.as_bytes());
    hasher.update(description.as_bytes());
    TransactionId(hex::encode(hasher.finalize()))
}

/// Blank type or category give an empty segment, never one made of whitespace.
fn category_account(config: &Config, row: &RawRow) -> String {
    let transaction_type = format(&row.transaction_type);
    let category = format(&row.category);
    format!(
        "equity:import:{}:{}:{}",
        config.source_tag,
        transaction_type.trim(),
        category.trim(),
    )
}
