use std::io::Write;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use tracing::{error, info};

use chromelog::{
    HistoryError,
    cli::{self, OutputFormat},
    config,
    extract::{self, ExtractRequest},
    logging,
    output::{self, OutputFormatKind, Provenance},
    process,
    profile,
    query::QuerySpec,
};

fn main() -> ExitCode {
    logging::init_logging();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<HistoryError>() {
            Some(history_err) => {
                error!("{history_err} (kind={})", history_err.kind());
                if let Some(remedy) = history_err.remedy() {
                    eprintln!("hint: {remedy}");
                }
                ExitCode::from(history_err.exit_code() as u8)
            }
            None => {
                error!("{err:#}");
                ExitCode::FAILURE
            }
        },
    }
}

fn run() -> Result<()> {
    let cli_opts = cli::parse();
    let loaded = config::load_config(cli_opts.config_path.as_deref())
        .context("failed to load config")?;
    let cfg = loaded.config;
    let layout = cfg.layout(cli_opts.users_root.as_deref());
    let max_entries = cli_opts.limit.unwrap_or(cfg.max_entries);
    let tool_version = env!("CARGO_PKG_VERSION");

    if cli_opts.list_profiles {
        let Some(user) = cli_opts.user.as_deref() else {
            bail!("--list-profiles needs --user");
        };
        let profiles = profile::list_profiles(&layout, user)?;
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        for name in &profiles {
            writeln!(out, "{name}")?;
        }
        info!("found {} profiles for user={user}", profiles.len());
        return Ok(());
    }

    if !cli_opts.skip_process_check {
        process::warn_if_browser_running(&cfg.browser_processes);
    }

    info!(
        "starting users_root={} max_entries={}",
        layout.users_root.display(),
        max_entries
    );

    let (provenance, report) = if let Some(database) = cli_opts.database.as_deref() {
        let report = extract::extract_from_path(database, &QuerySpec::new(max_entries))?;
        (
            Provenance::new(tool_version, &loaded.config_hash, database),
            report,
        )
    } else {
        let Some(user) = cli_opts.user.clone() else {
            bail!("--user is required");
        };
        let mut request = ExtractRequest::new(user).with_max_entries(max_entries);
        request.profile_name = cli_opts.profile.clone();
        let (target, report) = extract::extract_history(&layout, &request)?;
        (
            Provenance::new(tool_version, &loaded.config_hash, target.database_path())
                .with_profile(target.user_name(), target.profile_name()),
            report,
        )
    };

    let kind = match cli_opts.format {
        OutputFormat::Table => OutputFormatKind::Table,
        OutputFormat::Jsonl => OutputFormatKind::Jsonl,
        OutputFormat::Csv => OutputFormatKind::Csv,
    };
    let stdout = std::io::stdout();
    let mut sink = output::build_sink(kind, &provenance, Box::new(stdout.lock()))?;
    output::write_report(sink.as_mut(), &report)?;

    info!("chromelog run finished records={}", report.count);
    Ok(())
}
