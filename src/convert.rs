use anyhow::{anyhow, Context as _, Result};
use std::collections::{BTreeSet, HashSet};
use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::export::render_entry;
use crate::import::{self, RowTokenizer, Violation};

/// Tag of the hledger journal output. It is also the suffix of the output file name.
pub const HLEDGER_TAG: &str = "hledger";

const KNOWN_EXTENSIONS: &[&str] = &["csv"];

/// State of one conversion run.
///
/// Remembers which output files were already written in this run. An output file that
/// exists from an earlier run is deleted the first time it is written to, and appended
/// to afterwards, so running twice doesn't duplicate entries.
pub struct ConversionContext {
    output_dir: PathBuf,
    touched_outputs: HashSet<PathBuf>,
}

impl ConversionContext {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            touched_outputs: HashSet::new(),
        }
    }

    /// `statement.csv` -> `<output_dir>/statement#hledger.journal`
    pub fn output_path(&self, input: &Path, tag: &str) -> Result<PathBuf> {
        let file_name = input
            .file_name()
            .ok_or_else(|| anyhow!("Path has no filename"))?
            .to_str()
            .ok_or_else(|| anyhow!("Filename isn't valid utf-8"))?;
        let stem = match input.extension().and_then(|extension| extension.to_str()) {
            Some(extension)
                if KNOWN_EXTENSIONS
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(extension)) =>
            {
                &file_name[..file_name.len() - extension.len() - 1]
            }
            _ => file_name,
        };
        Ok(self.output_dir.join(format!("{stem}#{tag}.journal")))
    }

    fn append(&mut self, path: &Path, content: &str) -> Result<()> {
        if self.touched_outputs.insert(path.to_path_buf()) && path.exists() {
            log::info!("Removing output from a previous run: {}", path.display());
            std::fs::remove_file(path)
                .with_context(|| anyhow!("Failed to remove {}", path.display()))?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| anyhow!("Failed to open {}", path.display()))?;
        file.write_all(content.as_bytes())
            .with_context(|| anyhow!("Failed to write to {}", path.display()))?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowViolations {
    pub line_number: usize,
    pub violations: Vec<Violation>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    pub line_number: usize,
    pub reason: String,
}

/// What happened while converting one input file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileReport {
    /// Tags of the outputs that were written to
    pub tags: BTreeSet<String>,
    pub entries_written: usize,
    pub violations: Vec<RowViolations>,
    pub skipped_rows: Vec<SkippedRow>,
}

impl FileReport {
    /// One line per problem, in the order of the rows in the file.
    pub fn diagnostics(&self) -> Vec<(usize, String)> {
        let mut diagnostics = Vec::new();
        for row in &self.violations {
            for violation in &row.violations {
                diagnostics.push((row.line_number, violation.to_string()));
            }
        }
        for skipped in &self.skipped_rows {
            let diagnostic = format!("skipped: {}", skipped.reason);
            diagnostics.push((skipped.line_number, diagnostic));
        }
        diagnostics.sort_by_key(|(line_number, _)| *line_number);
        diagnostics
    }
}

pub struct Converter<'a> {
    config: &'a Config,
    tokenizer: &'a dyn RowTokenizer,
}

impl<'a> Converter<'a> {
    pub fn new(config: &'a Config, tokenizer: &'a dyn RowTokenizer) -> Self {
        Self { config, tokenizer }
    }

    /// Converts a whole export file. Fails only if the input can't be read or the
    /// output can't be written. Problems with single rows end up in the report.
    pub fn convert_file(
        &self,
        context: &mut ConversionContext,
        input: &Path,
    ) -> Result<FileReport> {
        log::info!("Converting {}...", input.display());
        let content = std::fs::read_to_string(input)
            .with_context(|| anyhow!("Failed to read {}", input.display()))?;
        let output = context.output_path(input, HLEDGER_TAG)?;
        let report = self.convert_content(context, &content, &output)?;
        log::info!(
            "Converting {}...done, wrote {} entries to {}",
            input.display(),
            report.entries_written,
            output.display(),
        );
        Ok(report)
    }

    pub fn convert_content(
        &self,
        context: &mut ConversionContext,
        content: &str,
        output: &Path,
    ) -> Result<FileReport> {
        let mut report = FileReport::default();
        for line in import::data_lines(content) {
            let parsed = import::parse_row(line.content, self.tokenizer);
            if !parsed.is_valid() {
                for violation in &parsed.violations {
                    log::warn!("Line {}: {violation}", line.line_number);
                }
                report.violations.push(RowViolations {
                    line_number: line.line_number,
                    violations: parsed.violations.clone(),
                });
            }
            let entry = match import::to_ir(&parsed.row, self.config) {
                Ok(entry) => entry,
                Err(err) => {
                    log::error!("Line {}: skipping row: {err:#}", line.line_number);
                    report.skipped_rows.push(SkippedRow {
                        line_number: line.line_number,
                        reason: format!("{err:#}"),
                    });
                    continue;
                }
            };
            log::debug!(
                "Line {}: transaction {}",
                line.line_number,
                entry.transaction_id.0
            );
            context.append(output, &render_entry(&entry))?;
            report.tags.insert(HLEDGER_TAG.to_string());
            report.entries_written += 1;
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::{CsvTokenizer, QuotedCellTokenizer};

    const HEADER: &str = r#""Date","Payee","Account number","Transaction type","Payment reference","Category","Amount (EUR)","Amount (Foreign Currency)","Type Foreign Currency","Exchange Rate""#;
    const ROW_1: &str = r#""2018-09-20","Business Inc.","NL00RABO0123456789","Income","Ping","Miscellaneous","0.88","1.0","USD","0.8821879""#;
    const ROW_2: &str = r#""2018-09-21","Corner Shop","","MasterCard Payment","","Food & Groceries","-12.50","","","""#;
    const ENTRY_1: &str = "2018/09/20 ! (0f7775ef0bfe392338f33febd619eed573603b231ef0c1476ff0d675785fef48) Business Inc. | [NL00RABO0123456789] Ping Income; Miscellaneous; 1.0 USD 0.8821879\n  asset:checking (DE89370400440532013000)  EUR 0.88\n  equity:import:bank:income:miscellaneous  EUR -0.88\n\n";

    fn write_input(dir: &Path, name: &str, rows: &[&str]) -> PathBuf {
        let path = dir.join(name);
        let mut content = HEADER.to_string();
        for row in rows {
            content.push('\n');
            content.push_str(row);
        }
        content.push('\n');
        std::fs::write(&path, content).unwrap();
        path
    }

    fn convert(context: &mut ConversionContext, input: &Path) -> FileReport {
        let config = Config::default();
        Converter::new(&config, &QuotedCellTokenizer)
            .convert_file(context, input)
            .unwrap()
    }

    #[test]
    fn output_path_replaces_csv_extension() {
        let context = ConversionContext::new("out");
        assert_eq!(
            PathBuf::from("out/statement#hledger.journal"),
            context
                .output_path(Path::new("some/dir/statement.csv"), HLEDGER_TAG)
                .unwrap()
        );
        assert_eq!(
            PathBuf::from("out/statement#hledger.journal"),
            context
                .output_path(Path::new("statement.CSV"), HLEDGER_TAG)
                .unwrap()
        );
    }

    #[test]
    fn output_path_keeps_unknown_extension() {
        let context = ConversionContext::new("out");
        assert_eq!(
            PathBuf::from("out/statement.txt#hledger.journal"),
            context
                .output_path(Path::new("statement.txt"), HLEDGER_TAG)
                .unwrap()
        );
        assert_eq!(
            PathBuf::from("out/statement#hledger.journal"),
            context
                .output_path(Path::new("statement"), HLEDGER_TAG)
                .unwrap()
        );
    }

    #[test]
    fn output_path_without_filename() {
        let context = ConversionContext::new("out");
        assert!(context.output_path(Path::new(".."), HLEDGER_TAG).is_err());
    }

    #[test]
    fn end_to_end() {
        let tempdir = tempfile::tempdir().unwrap();
        let input = write_input(tempdir.path(), "export.csv", &[ROW_1]);
        let mut context = ConversionContext::new(tempdir.path());

        let report = convert(&mut context, &input);

        assert_eq!(
            FileReport {
                tags: [HLEDGER_TAG.to_string()].into_iter().collect(),
                entries_written: 1,
                violations: vec![],
                skipped_rows: vec![],
            },
            report
        );
        let output =
            std::fs::read_to_string(tempdir.path().join("export#hledger.journal")).unwrap();
        assert_eq!(ENTRY_1, output);
    }

    #[test]
    fn rows_are_appended_in_order() {
        let tempdir = tempfile::tempdir().unwrap();
        let input = write_input(tempdir.path(), "export.csv", &[ROW_1, ROW_2]);
        let mut context = ConversionContext::new(tempdir.path());

        let report = convert(&mut context, &input);

        assert_eq!(2, report.entries_written);
        let output =
            std::fs::read_to_string(tempdir.path().join("export#hledger.journal")).unwrap();
        assert!(output.starts_with(ENTRY_1));
        let second_entry = &output[ENTRY_1.len()..];
        assert!(second_entry.starts_with("2018/09/21 ! ("));
        assert!(second_entry.contains(") Corner Shop | MasterCard Payment; Food & Groceries;\n"));
        assert!(second_entry.contains(
            "\n  equity:import:bank:mastercard payment:food & groceries  EUR 12.50\n\n"
        ));
        assert!(second_entry.contains("\n  asset:checking (DE89370400440532013000)  EUR -12.50\n"));
    }

    #[test]
    fn second_run_replaces_output() {
        let tempdir = tempfile::tempdir().unwrap();
        let input = write_input(tempdir.path(), "export.csv", &[ROW_1]);
        let output = tempdir.path().join("export#hledger.journal");

        convert(&mut ConversionContext::new(tempdir.path()), &input);
        convert(&mut ConversionContext::new(tempdir.path()), &input);

        assert_eq!(ENTRY_1, std::fs::read_to_string(output).unwrap());
    }

    #[test]
    fn same_output_twice_in_one_run_appends() {
        let tempdir = tempfile::tempdir().unwrap();
        let input = write_input(tempdir.path(), "export.csv", &[ROW_1]);
        let output = tempdir.path().join("export#hledger.journal");
        let mut context = ConversionContext::new(tempdir.path());

        convert(&mut context, &input);
        convert(&mut context, &input);

        assert_eq!(
            format!("{ENTRY_1}{ENTRY_1}"),
            std::fs::read_to_string(output).unwrap()
        );
    }

    #[test]
    fn stale_output_is_removed_on_first_write() {
        let tempdir = tempfile::tempdir().unwrap();
        let input = write_input(tempdir.path(), "export.csv", &[ROW_1]);
        let output = tempdir.path().join("export#hledger.journal");
        std::fs::write(&output, "stale content\n").unwrap();

        convert(&mut ConversionContext::new(tempdir.path()), &input);

        assert_eq!(ENTRY_1, std::fs::read_to_string(output).unwrap());
    }

    #[test]
    fn header_only_file_writes_nothing() {
        let tempdir = tempfile::tempdir().unwrap();
        let input = write_input(tempdir.path(), "export.csv", &[]);

        let report = convert(&mut ConversionContext::new(tempdir.path()), &input);

        assert_eq!(FileReport::default(), report);
        assert!(!tempdir.path().join("export#hledger.journal").exists());
    }

    #[test]
    fn invalid_rows_are_converted_and_reported() {
        let tempdir = tempfile::tempdir().unwrap();
        let row = r#""2018-09-20","Shop","NL-00","","","","5.00""#;
        let input = write_input(tempdir.path(), "export.csv", &[row]);

        let report = convert(&mut ConversionContext::new(tempdir.path()), &input);

        assert_eq!(1, report.entries_written);
        assert_eq!(
            vec![
                (2, "Row: expected 10 cells but found 7".to_string()),
                (
                    2,
                    "AccountNumber: Expected an IBAN or BBAN account number".to_string()
                ),
            ],
            report.diagnostics()
        );
        let output =
            std::fs::read_to_string(tempdir.path().join("export#hledger.journal")).unwrap();
        assert!(output.contains("\n  equity:import:bank::  EUR -5.00\n"));
    }

    #[test]
    fn whitespace_type_and_category_keep_account_parsable() {
        let tempdir = tempfile::tempdir().unwrap();
        let row = r#""2018-09-20","Shop","","  ",""," ","5.00","","","""#;
        let input = write_input(tempdir.path(), "export.csv", &[row]);

        let report = convert(&mut ConversionContext::new(tempdir.path()), &input);

        assert_eq!(1, report.entries_written);
        assert!(report.diagnostics().is_empty());
        let output =
            std::fs::read_to_string(tempdir.path().join("export#hledger.journal")).unwrap();
        assert!(output.contains("\n  equity:import:bank::  EUR -5.00\n"));
    }

    #[test]
    fn non_numeric_amount_skips_row() {
        let tempdir = tempfile::tempdir().unwrap();
        let bad_row = ROW_2.replace("-12.50", "n/a");
        let input = write_input(tempdir.path(), "export.csv", &[&bad_row, ROW_1]);

        let report = convert(&mut ConversionContext::new(tempdir.path()), &input);

        assert_eq!(1, report.entries_written);
        assert_eq!(1, report.skipped_rows.len());
        assert_eq!(2, report.skipped_rows[0].line_number);
        assert!(report.skipped_rows[0]
            .reason
            .starts_with("AmountEUR: 'n/a' is not a number"));
        let output =
            std::fs::read_to_string(tempdir.path().join("export#hledger.journal")).unwrap();
        assert_eq!(ENTRY_1, output);
    }

    #[test]
    fn unreadable_input_fails() {
        let tempdir = tempfile::tempdir().unwrap();
        let mut context = ConversionContext::new(tempdir.path());
        let config = Config::default();
        let err = Converter::new(&config, &QuotedCellTokenizer)
            .convert_file(&mut context, &tempdir.path().join("missing.csv"))
            .unwrap_err();
        assert!(err.to_string().starts_with("Failed to read"));
    }

    #[test]
    fn csv_tokenizer_gives_same_output() {
        let tempdir = tempfile::tempdir().unwrap();
        let input = write_input(tempdir.path(), "export.csv", &[ROW_1]);
        let config = Config::default();
        let mut context = ConversionContext::new(tempdir.path());

        Converter::new(&config, &CsvTokenizer)
            .convert_file(&mut context, &input)
            .unwrap();

        let output =
            std::fs::read_to_string(tempdir.path().join("export#hledger.journal")).unwrap();
        assert_eq!(ENTRY_1, output);
    }

    #[test]
    fn transaction_ids_are_unique_per_row() {
        let tempdir = tempfile::tempdir().unwrap();
        let input = write_input(tempdir.path(), "export.csv", &[ROW_1, ROW_2]);
        convert(&mut ConversionContext::new(tempdir.path()), &input);

        let output =
            std::fs::read_to_string(tempdir.path().join("export#hledger.journal")).unwrap();
        let ids: Vec<&str> = output
            .lines()
            .filter_map(|line| line.split_once(" ! (")?.1.split_once(')'))
            .map(|(id, _)| id)
            .collect();
        assert_eq!(2, ids.len());
        assert_eq!(2, ids.iter().collect::<HashSet<_>>().len());
    }
}
