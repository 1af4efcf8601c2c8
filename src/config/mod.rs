pub mod cli;
pub mod file_config;

use crate::utils::error::Result;
use crate::utils::validation::{validate_file_extension, validate_path, Validate};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_SLEEP_SECONDS: u64 = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Xlsx,
    Csv,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Xlsx => "xlsx",
            OutputFormat::Csv => "csv",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "apollonator")]
#[command(version, about = "Resolve names at an organization to emails and titles")]
pub struct CliConfig {
    /// Config file (YAML, or TOML when the extension is .toml)
    #[arg(short, long)]
    pub config: String,

    /// Names file, one "First Last" per line
    #[arg(short, long)]
    pub names: String,

    /// Seconds to wait after each successful lookup
    #[arg(short, long, default_value_t = DEFAULT_SLEEP_SECONDS)]
    pub sleep: u64,

    /// Save the results to apollonator_<organization>.<format>
    #[arg(short, long)]
    pub excel: bool,

    /// Save the results to this path instead of the derived name
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output file format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Xlsx)]
    pub format: OutputFormat,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliConfig {
    pub fn sleep_delay(&self) -> Duration {
        Duration::from_secs(self.sleep)
    }

    pub fn output_requested(&self) -> bool {
        self.excel || self.output.is_some()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("config", &self.config)?;
        validate_path("names", &self.names)?;

        if let Some(output) = &self.output {
            validate_path("output", output)?;
            validate_file_extension("output", output, &[self.format.extension()])?;
        }

        Ok(())
    }
}
