use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Jsonl,
    Csv,
}

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct CliOptions {
    /// Account whose browser history is read
    #[arg(short, long, required_unless_present = "database")]
    pub user: Option<String>,

    /// Browser profile folder (defaults to the config's default profile)
    #[arg(short, long)]
    pub profile: Option<String>,

    /// Maximum number of records, newest first (0 = all)
    #[arg(short = 'n', long)]
    pub limit: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Optional path to config file (YAML)
    #[arg(long)]
    pub config_path: Option<PathBuf>,

    /// Folder holding user home folders (overrides config and OS default)
    #[arg(long)]
    pub users_root: Option<PathBuf>,

    /// Read this history database directly instead of locating a profile
    #[arg(long, conflicts_with_all = ["user", "profile", "list_profiles"])]
    pub database: Option<PathBuf>,

    /// List the user's profiles that have a history database, then exit
    #[arg(long)]
    pub list_profiles: bool,

    /// Skip the running-browser warning
    #[arg(long)]
    pub skip_process_check: bool,
}

pub fn parse() -> CliOptions {
    CliOptions::parse()
}
