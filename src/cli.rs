use anyhow::{anyhow, Context as _, Result};
use std::path::{Path, PathBuf};

use crate::args::Args;
use crate::config::load_config;
use crate::convert::{ConversionContext, Converter, FileReport};
use crate::terminal::{LineWriter, ListPrinter};

pub fn main(args: Args) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let output_dir = &args.output_dir;
    std::fs::create_dir_all(output_dir)
        .with_context(|| anyhow!("Failed to create {}", output_dir.display()))?;
    let tokenizer = args.tokenizer.tokenizer();
    let converter = Converter::new(&config, tokenizer.as_ref());
    let mut context = ConversionContext::new(output_dir);

    let num_failed = convert_all(
        &converter,
        &mut context,
        &args.inputs,
        &ListPrinter::new_stdout(),
    );
    if num_failed > 0 {
        log::warn!("{num_failed} of {} inputs failed", args.inputs.len());
    }
    Ok(())
}

/// Converts the inputs one after the other and prints a report for each.
/// A failing input doesn't stop the others. Returns the number of failed inputs.
pub fn convert_all<W: LineWriter + Clone>(
    converter: &Converter<'_>,
    context: &mut ConversionContext,
    inputs: &[PathBuf],
    printer: &ListPrinter<W>,
) -> usize {
    let mut num_failed = 0;
    for input in inputs {
        match converter.convert_file(context, input) {
            Ok(report) => print_report(printer, input, &report),
            Err(err) => {
                log::error!("{err:#}");
                printer.print_item(format!("{}: error: {err:#}", input.display()));
                num_failed += 1;
            }
        }
    }
    num_failed
}

fn print_report<W: LineWriter + Clone>(
    printer: &ListPrinter<W>,
    input: &Path,
    report: &FileReport,
) {
    for (line_number, diagnostic) in report.diagnostics() {
        printer.print_item(format!("{}:{line_number}: {diagnostic}", input.display()));
    }
    printer.print_item(format!("{}:", input.display()));
    let printer = printer.indent();
    for tag in &report.tags {
        printer.print_item(tag);
    }
}
