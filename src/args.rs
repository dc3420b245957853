use clap::Parser;
use std::path::PathBuf;

use crate::import::TokenizerKind;

/// Convert bank CSV exports into hledger journals.
///
/// For each input `<name>.csv`, the entries are written to `<name>#hledger.journal`.
/// A journal left over from an earlier run is replaced.
#[derive(Parser, Debug)]
#[clap(version, arg_required_else_help = true)]
pub struct Args {
    /// Bank CSV exports to convert
    #[clap(required = true)]
    pub inputs: Vec<PathBuf>,

    /// YAML file with asset_account, asset_iban and source_tag
    #[clap(short, long)]
    pub config: Option<PathBuf>,

    /// Directory the journals are written to
    #[clap(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// How rows are split into cells
    #[clap(long, value_enum, default_value_t = TokenizerKind::Quoted)]
    pub tokenizer: TokenizerKind,
}

pub fn parse() -> Args {
    Args::parse()
}
