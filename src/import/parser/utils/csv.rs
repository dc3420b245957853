use clap::ValueEnum;
use once_cell::sync::Lazy;
use regex::Regex;

static QUOTED_CELL: Lazy<Regex> = Lazy::new(|| Regex::new(r#""([^"]*)""#).expect("valid regex"));

/// Splits one line of a bank export into its cells.
pub trait RowTokenizer {
    fn tokenize(&self, line: &str) -> Vec<String>;
}

/// Collects the content of every `"..."` pair in the line, in order.
///
/// Anything outside of quotes (commas, unquoted cells) is ignored, and there is no
/// way to escape a quote inside a cell. The bank export always quotes every cell
/// and never contains quotes in its data, so this is sufficient for it.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuotedCellTokenizer;

impl RowTokenizer for QuotedCellTokenizer {
    fn tokenize(&self, line: &str) -> Vec<String> {
        QUOTED_CELL
            .captures_iter(line)
            .map(|captures| captures[1].to_string())
            .collect()
    }
}

/// RFC 4180 tokenizer. Handles unquoted cells and `""` escapes inside quoted cells.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvTokenizer;

impl RowTokenizer for CsvTokenizer {
    fn tokenize(&self, line: &str) -> Vec<String> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(line.as_bytes());
        match reader.records().next() {
            Some(Ok(record)) => record.iter().map(str::to_string).collect(),
            Some(Err(err)) => {
                log::warn!("Failed to tokenize line as csv: {err}");
                Vec::new()
            }
            None => Vec::new(),
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenizerKind {
    /// Take the content of every double-quoted cell
    #[default]
    Quoted,
    /// Full csv parsing, including `""` escapes
    Csv,
}

impl TokenizerKind {
    pub fn tokenizer(self) -> Box<dyn RowTokenizer> {
        match self {
            TokenizerKind::Quoted => Box::new(QuotedCellTokenizer),
            TokenizerKind::Csv => Box::new(CsvTokenizer),
        }
    }
}
