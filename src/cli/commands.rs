use crate::core::pattern::EntryMatcher;
use crate::core::scan::run_scan;
use crate::domain::models::{MatchMode, ScanConfig};
use crate::infra::file_system::fill_directory;
use crate::infra::logger::setup_logger;
use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    ExecutableCommand,
    style::{Color, ResetColor, SetForegroundColor},
};
use log::{debug, info};
use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

const DEFAULT_FILL_PREFIX: &str = "tmp_file_";

#[derive(Parser, Debug)]
#[command(name = "superls")]
#[command(version)]
#[command(about = "List huge directories one entry at a time", long_about = None)]
pub struct Cli {
    /// Directory to scan or fill (default: current working directory)
    pub directory: Option<PathBuf>,

    /// Filter pattern; every entry matches when omitted
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// Interpret the pattern as a basic regular expression
    #[arg(short = 'e', long = "regexp", conflicts_with = "eregexp")]
    pub regexp: bool,

    /// Interpret the pattern as an extended regular expression
    #[arg(short = 'E', long = "eregexp")]
    pub eregexp: bool,

    /// Delete matched entries, asking for confirmation one by one
    #[arg(short, long)]
    pub delete: bool,

    /// Delete without asking. Careful!
    #[arg(short, long)]
    pub force: bool,

    /// Maximum number of entries considered (or files created with --fill)
    #[arg(short, long, value_name = "N")]
    pub limit: Option<usize>,

    /// Fill the directory with empty files; the optional prefix must be
    /// attached with '=' (-F=prefix or --fill=prefix)
    #[arg(
        short = 'F',
        long = "fill",
        value_name = "PREFIX",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = DEFAULT_FILL_PREFIX
    )]
    pub fill: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

fn resolve_config(cli: Cli) -> Result<ScanConfig> {
    let directory = match cli.directory {
        Some(dir) => dir,
        None => env::current_dir().context("Failed to get current directory")?,
    };

    let match_mode = if cli.regexp {
        MatchMode::BasicRegex
    } else if cli.eregexp {
        MatchMode::ExtendedRegex
    } else {
        MatchMode::Wildcard
    };

    Ok(ScanConfig {
        directory,
        pattern: cli.pattern,
        match_mode,
        delete: cli.delete,
        force: cli.force,
        fill_prefix: cli.fill,
        limit: cli.limit.unwrap_or(usize::MAX),
    })
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    setup_logger(cli.verbose)?;

    let config = resolve_config(cli)?;
    debug!("Resolved configuration: {config:?}");

    if let Some(prefix) = config.fill_prefix.clone() {
        return run_fill(&config, &prefix);
    }

    // Compile eagerly so a bad pattern fails the run before any directory
    // work happens.
    let matcher = EntryMatcher::compile(config.pattern.as_deref(), config.match_mode)?;

    let mut stdout = io::stdout();
    if config.delete && config.force {
        stdout.execute(SetForegroundColor(Color::Yellow))?;
        writeln!(
            stdout,
            "Deleting matched entries in {} without confirmation",
            config.directory.display()
        )?;
        stdout.execute(ResetColor)?;
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let summary = run_scan(&config, &matcher, &mut input, &mut stdout)?;

    info!(
        "{} entries considered, {} matched, {} deleted",
        summary.considered, summary.matched, summary.deleted
    );
    Ok(())
}

fn run_fill(config: &ScanConfig, prefix: &str) -> Result<()> {
    info!(
        "Filling {} with up to {} files",
        config.directory.display(),
        config.limit
    );
    let created = fill_directory(&config.directory, prefix, config.limit);

    let mut stdout = io::stdout();
    stdout.execute(SetForegroundColor(Color::Green))?;
    writeln!(
        stdout,
        "Created {created} files with prefix '{prefix}' in {}",
        config.directory.display()
    )?;
    stdout.execute(ResetColor)?;
    Ok(())
}
