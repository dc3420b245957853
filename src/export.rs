use crate::ir::{LedgerEntry, Posting, TransactionId, LEDGER_CURRENCY};

/// Renders an entry as an hledger journal transaction, terminated by a blank line.
///
/// ```text
/// 2018/09/20 ! (<id>) Business Inc. | [NL00RABO0123456789] Ping Income; Miscellaneous; 1.0 USD 0.8821879
///   asset:checking (DE89370400440532013000)  EUR 0.88
///   equity:import:bank:income:miscellaneous  EUR -0.88
///
/// ```
pub fn render_entry(entry: &LedgerEntry) -> String {
    let mut rendered = render_header(entry);
    rendered.push('\n');
    rendered.push_str(&render_posting(&entry.asset_posting));
    rendered.push('\n');
    rendered.push_str(&render_posting(&entry.category_posting));
    rendered.push_str("\n\n");
    rendered
}

fn render_header(entry: &LedgerEntry) -> String {
    let TransactionId(id) = &entry.transaction_id;
    let mut header = format!("{} ! ({id}) {}", entry.date, entry.payee);
    if !entry.description.is_empty() {
        if !entry.payee.trim().is_empty() {
            header.push_str(" | ");
        }
        header.push_str(&entry.description);
    }
    header.trim_end().to_string()
}

fn render_posting(posting: &Posting) -> String {
    let account = &posting.account;
    let amount = &posting.amount_text;
    format!("  {account}  {LEDGER_CURRENCY} {amount}")
}
