//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use extposts_core::{IngestReport, ProgressReporter, SourceStatus, ingest};
use extposts_fetch::Fetcher;
use extposts_shared::{AppConfig, CONFIG_FILE_NAME, SourceKind, init_config, load_config};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// extposts: external posts for static sites.
#[derive(Parser)]
#[command(
    name = "extposts",
    version,
    about = "Ingest external posts from RSS/Atom feeds and article URLs into a post collection.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path of the configuration file.
    #[arg(long, global = true, env = "EXTPOSTS_CONFIG", default_value = CONFIG_FILE_NAME)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Fetch every configured source and write the post documents.
    Ingest {
        /// Directory to write posts to (overrides `site.posts_dir`).
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Also write the posts search index here (overrides `site.search_index`).
        #[arg(long)]
        search_index: Option<PathBuf>,

        /// Print the ingest report as JSON instead of writing files.
        #[arg(long)]
        dry_run: bool,
    },

    /// List configured sources and how each one is classified.
    Sources,

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "extposts=info",
        1 => "extposts=debug",
        _ => "extposts=trace",
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Ingest {
            out,
            search_index,
            dry_run,
        } => cmd_ingest(&cli.config, out, search_index, dry_run).await,
        Command::Sources => cmd_sources(&cli.config),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(&cli.config),
            ConfigAction::Show => cmd_config_show(&cli.config),
        },
    }
}

// ---------------------------------------------------------------------------
// ingest
// ---------------------------------------------------------------------------

async fn cmd_ingest(
    config_path: &Path,
    out: Option<PathBuf>,
    search_index: Option<PathBuf>,
    dry_run: bool,
) -> Result<()> {
    let config = load_config(config_path)?;

    if config.external_sources.is_empty() && !dry_run {
        println!(
            "No external sources configured in {}.",
            config_path.display()
        );
        return Ok(());
    }

    info!(
        sources = config.external_sources.len(),
        dry_run,
        "ingesting external posts"
    );

    let start = Instant::now();
    let fetcher = Fetcher::new(&config.fetch)?;
    let reporter = CliProgress::new(LineOutput::for_ingest(dry_run));
    let report = ingest(&config.external_sources, &fetcher, &reporter).await?;

    if dry_run {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let posts_dir = out.unwrap_or_else(|| config.site.posts_dir.clone());
    let written =
        extposts_artifacts::write_posts(&posts_dir, &report.records, &config.site.fallback_category)?;

    let index_path = search_index.or_else(|| config.site.search_index.clone());
    let indexed = match &index_path {
        Some(path) => Some(extposts_artifacts::write_search_index(path, &report.records)?),
        None => None,
    };

    print_report(&report);
    println!("  Posts:      {} written to {}", written.written, written.dir.display());
    if !written.duplicate_slugs.is_empty() {
        println!(
            "  Duplicates: {} (last write won)",
            written.duplicate_slugs.join(", ")
        );
    }
    if let (Some(path), Some(count)) = (&index_path, indexed) {
        println!("  Index:      {count} entries in {}", path.display());
    }
    println!("  Time:       {:.1}s", start.elapsed().as_secs_f64());
    println!();

    Ok(())
}

fn print_report(report: &IngestReport) {
    println!();
    println!("  Sources:");
    for source in &report.sources {
        let detail = match &source.status {
            SourceStatus::Ingested { records } => format!("{records} posts"),
            SourceStatus::Failed { reason } => format!("failed: {reason}"),
            SourceStatus::Invalid { reason } => format!("invalid: {reason}"),
        };
        println!("    {} ({}): {detail}", source.name, source.kind);
    }
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// Where progress lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineOutput {
    Stdout,
    Stderr,
}

impl LineOutput {
    /// `--dry-run` owns stdout for the JSON report.
    fn for_ingest(dry_run: bool) -> Self {
        if dry_run { Self::Stderr } else { Self::Stdout }
    }
}

/// CLI progress reporter: a spinner plus one persistent line per source and
/// per fetched entry.
struct CliProgress {
    spinner: ProgressBar,
    output: LineOutput,
}

impl CliProgress {
    fn new(output: LineOutput) -> Self {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
        spinner.set_style(style);
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner, output }
    }

    fn line(&self, text: String) {
        self.spinner.suspend(|| match self.output {
            LineOutput::Stdout => println!("{text}"),
            LineOutput::Stderr => eprintln!("{text}"),
        });
    }
}

// `ingest` can return early with a fatal error before `done` runs.
impl Drop for CliProgress {
    fn drop(&mut self) {
        if !self.spinner.is_finished() {
            self.spinner.finish_and_clear();
        }
    }
}

impl ProgressReporter for CliProgress {
    fn source_started(&self, name: &str) {
        self.line(format!("Fetching external posts from {name}:"));
        self.spinner.set_message(name.to_string());
    }

    fn entry_fetching(&self, url: &str) {
        self.line(format!("...fetching {url}"));
    }

    fn source_failed(&self, _name: &str, reason: &str) {
        self.line(format!("   ERROR: {reason}"));
    }

    fn done(&self, _report: &IngestReport) {
        self.spinner.finish_and_clear();
    }
}

// ---------------------------------------------------------------------------
// sources / config
// ---------------------------------------------------------------------------

fn cmd_sources(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;

    if config.external_sources.is_empty() {
        println!(
            "No external sources configured in {}.",
            config_path.display()
        );
        return Ok(());
    }

    for source in &config.external_sources {
        let kind = source.kind();
        let detail = match kind {
            SourceKind::Feed { url } => url.to_string(),
            SourceKind::UrlList { posts } => format!("{} posts", posts.len()),
            SourceKind::Invalid { reason } => reason.to_string(),
        };
        println!("{:<9} {}  {detail}", kind.label(), source.name);
    }

    Ok(())
}

fn cmd_config_init(config_path: &Path) -> Result<()> {
    let path = init_config(config_path)?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config_path: &Path) -> Result<()> {
    if !config_path.exists() {
        return Err(eyre!(
            "no config file at '{}'; run `extposts config init` first",
            config_path.display()
        ));
    }

    let config: AppConfig = load_config(config_path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
