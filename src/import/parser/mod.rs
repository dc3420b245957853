use std::fmt;

mod utils;

pub use utils::{
    amount_literal, negate, parse_amount, CsvTokenizer, QuotedCellTokenizer, RowTokenizer,
    TokenizerKind,
};

pub const NUM_COLUMNS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Date,
    Payee,
    AccountNumber,
    TransactionType,
    PaymentReference,
    Category,
    AmountEur,
    AmountForeign,
    CurrencyForeign,
    ExchangeRate,
}

impl Column {
    pub const ALL: [Column; NUM_COLUMNS] = [
        Column::Date,
        Column::Payee,
        Column::AccountNumber,
        Column::TransactionType,
        Column::PaymentReference,
        Column::Category,
        Column::AmountEur,
        Column::AmountForeign,
        Column::CurrencyForeign,
        Column::ExchangeRate,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Column::Date => "Date",
            Column::Payee => "Payee",
            Column::AccountNumber => "AccountNumber",
            Column::TransactionType => "TransactionType",
            Column::PaymentReference => "PaymentReference",
            Column::Category => "Category",
            Column::AmountEur => "AmountEUR",
            Column::AmountForeign => "AmountForeign",
            Column::CurrencyForeign => "CurrencyForeign",
            Column::ExchangeRate => "ExchangeRate",
        }
    }
}

/// One row of the bank export, cells in column order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawRow {
    pub date: String,
    pub payee: String,
    pub account_number: String,
    pub transaction_type: String,
    pub payment_reference: String,
    pub category: String,
    pub amount_eur: String,
    pub amount_foreign: String,
    pub currency_foreign: String,
    pub exchange_rate: String,
}

impl RawRow {
    /// Missing cells become empty strings, surplus cells are dropped.
    pub fn from_cells(cells: Vec<String>) -> Self {
        let mut cells = cells.into_iter();
        let mut next = || cells.next().unwrap_or_default();
        Self {
            date: next(),
            payee: next(),
            account_number: next(),
            transaction_type: next(),
            payment_reference: next(),
            category: next(),
            amount_eur: next(),
            amount_foreign: next(),
            currency_foreign: next(),
            exchange_rate: next(),
        }
    }

    pub fn get(&self, column: Column) -> &str {
        match column {
            Column::Date => &self.date,
            Column::Payee => &self.payee,
            Column::AccountNumber => &self.account_number,
            Column::TransactionType => &self.transaction_type,
            Column::PaymentReference => &self.payment_reference,
            Column::Category => &self.category,
            Column::AmountEur => &self.amount_eur,
            Column::AmountForeign => &self.amount_foreign,
            Column::CurrencyForeign => &self.currency_foreign,
            Column::ExchangeRate => &self.exchange_rate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    ColumnCount { found: usize },
    Column {
        column: Column,
        reason: &'static str,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::ColumnCount { found } => {
                write!(f, "Row: expected {NUM_COLUMNS} cells but found {found}")
            }
            Violation::Column { column, reason } => write!(f, "{}: {}", column.name(), reason),
        }
    }
}

/// A row together with everything that looked wrong about it. The row is usable
/// even if there are violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRow {
    pub row: RawRow,
    pub violations: Vec<Violation>,
}

impl ParsedRow {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

pub fn parse_row(line: &str, tokenizer: &dyn RowTokenizer) -> ParsedRow {
    let cells = tokenizer.tokenize(line);
    let mut violations = Vec::new();
    if cells.len() != NUM_COLUMNS {
        violations.push(Violation::ColumnCount { found: cells.len() });
    }
    let row = RawRow::from_cells(cells);
    for column in Column::ALL {
        if let Err(reason) = check_column(column, row.get(column)) {
            violations.push(Violation::Column { column, reason });
        }
    }
    ParsedRow { row, violations }
}

fn check_column(column: Column, content: &str) -> Result<(), &'static str> {
    match column {
        Column::Date => {
            utils::check_date(content)?;
            utils::check_calendar_date(content)
        }
        Column::AccountNumber => utils::check_account_number_opt(content),
        Column::AmountEur => utils::check_amount(content),
        Column::AmountForeign => utils::check_amount_opt(content),
        Column::ExchangeRate => utils::check_exchange_rate_opt(content),
        Column::Payee
        | Column::TransactionType
        | Column::PaymentReference
        | Column::Category
        | Column::CurrencyForeign => Ok(()),
    }
}
