use rust_decimal::Decimal;

pub const LEDGER_CURRENCY: &str = "EUR";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransactionId(pub String);

/// One journal entry, ready to be rendered. All text fields are already normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    /// `yyyy/mm/dd`
    pub date: String,
    pub transaction_id: TransactionId,
    pub payee: String,
    pub description: String,
    pub asset_posting: Posting,
    pub category_posting: Posting,
}

impl LedgerEntry {
    pub fn is_balanced(&self) -> bool {
        (self.asset_posting.amount + self.category_posting.amount).is_zero()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Posting {
    pub account: String,
    pub amount: Decimal,
    /// How the amount is written to the journal
    pub amount_text: String,
}

impl Posting {
    pub fn new(account: String, amount: Decimal) -> Self {
        Self {
            account,
            amount_text: amount.to_string(),
            amount,
        }
    }

    /// Keeps the amount text of the source instead of rendering the parsed value.
    pub fn with_source_text(account: String, amount: Decimal, source_text: &str) -> Self {
        Self {
            account,
            amount,
            amount_text: source_text.to_string(),
        }
    }
}
