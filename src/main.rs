use anyhow::Result;

fn main() -> Result<()> {
    env_logger::init();
    let args = bank_csv_hledger::args::parse();
    bank_csv_hledger::cli::main(args)
}
