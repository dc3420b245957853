mod account_number;
mod amount;
mod csv;
mod date;

pub use self::csv::{CsvTokenizer, QuotedCellTokenizer, RowTokenizer, TokenizerKind};
pub use account_number::check_account_number_opt;
pub use amount::{
    amount_literal, check_amount, check_amount_opt, check_exchange_rate_opt, negate, parse_amount,
};
pub use date::{check_calendar_date, check_date};
