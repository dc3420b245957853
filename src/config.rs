use anyhow::{anyhow, ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Characters that would break the structure of a journal line if they appeared in
/// an account name.
const FORBIDDEN_CHARS: &[char] = &[';', '|', '[', ']', '\n', '\r', '\t'];

/// Identifies the account the export belongs to and where it was imported from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Label of the asset account, e.g. `checking` gives `asset:checking (<iban>)`
    pub asset_account: String,
    /// IBAN of the asset account, shown next to its label
    pub asset_iban: String,
    /// Segment under `equity:import:` that collects the counter postings
    pub source_tag: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            asset_account: "checking".to_string(),
            asset_iban: "DE89370400440532013000".to_string(),
            source_tag: "bank".to_string(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        validate_value("asset_account", &self.asset_account)?;
        validate_value("asset_iban", &self.asset_iban)?;
        validate_value("source_tag", &self.source_tag)?;
        ensure!(
            !self.source_tag.contains(':'),
            "source_tag must be a single account segment but was '{}'",
            self.source_tag,
        );
        ensure!(
            !self.asset_iban.contains(['(', ')', ' ']),
            "asset_iban must not contain parentheses or spaces but was '{}'",
            self.asset_iban,
        );
        Ok(())
    }

    /// The account name of the asset posting
    pub fn asset_account_name(&self) -> String {
        format!("asset:{} ({})", self.asset_account, self.asset_iban)
    }
}

fn validate_value(name: &str, value: &str) -> Result<()> {
    ensure!(!value.trim().is_empty(), "{name} must not be empty");
    ensure!(
        value.trim() == value,
        "{name} must not start or end with whitespace but was '{value}'"
    );
    ensure!(
        !value.contains(FORBIDDEN_CHARS),
        "{name} must not contain any of ; | [ ] or line breaks but was '{value}'"
    );
    ensure!(
        !value.contains("  "),
        "{name} must not contain two consecutive spaces but was '{value}'"
    );
    Ok(())
}

pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = serde_yaml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Loads the config file, or returns the default config if no file is given.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        log::debug!("No config file given, using defaults");
        return Ok(Config::default());
    };
    log::info!("Loading config from {}...", path.display());
    let content = std::fs::read_to_string(path)
        .with_context(|| anyhow!("Failed to read config file {}", path.display()))?;
    let config = parse_config(&content)
        .with_context(|| anyhow!("Invalid config file {}", path.display()))?;
    log::info!("Loading config from {}...done", path.display());
    Ok(config)
}
