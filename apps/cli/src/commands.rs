//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use interplayer_parser::{ClassifyOptions, LineKind, classify};
use interplayer_report::{render_json, render_text};
use interplayer_shared::{
    AppConfig, Entry, KnowledgeBase, VisitRecord, VisitStatus, WalkConfig, WalkSummary,
    init_config, load_config,
};
use interplayer_walker::{FsSource, WalkObserver, Walker};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Interplayer — walk interplay documents into a knowledge base.
#[derive(Parser)]
#[command(
    name = "interplayer",
    version,
    about = "Walk chained interplay documents and report the accumulated knowledge base.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Report output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum ReportFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Walk the document graph from the entry document.
    Walk {
        /// Directory the document names resolve against.
        #[arg(short, long)]
        root: Option<PathBuf>,

        /// Entry-point document name.
        #[arg(short, long)]
        entry: Option<String>,

        /// Sentinel document name that triggers the final report.
        #[arg(short, long)]
        sentinel: Option<String>,

        /// Pacing delay in ms before each scheduled visit.
        #[arg(long)]
        pace_ms: Option<u64>,

        /// Report format.
        #[arg(short, long, default_value = "text")]
        format: ReportFormat,
    },

    /// Classify a single document without traversal.
    Parse {
        /// Path to the document.
        document: PathBuf,

        /// Report format.
        #[arg(short, long, default_value = "text")]
        format: ReportFormat,
    },

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
        0 => "interplayer=info",
        1 => "interplayer=debug",
        _ => "interplayer=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt().with_env_filter(env_filter).with_target(false).init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Walk {
            root,
            entry,
            sentinel,
            pace_ms,
            format,
        } => cmd_walk(root, entry, sentinel, pace_ms, format).await,
        Command::Parse { document, format } => cmd_parse(&document, format),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

// ---------------------------------------------------------------------------
// walk
// ---------------------------------------------------------------------------

async fn cmd_walk(
    root: Option<PathBuf>,
    entry: Option<String>,
    sentinel: Option<String>,
    pace_ms: Option<u64>,
    format: ReportFormat,
) -> Result<()> {
    let config = load_config()?;
    let mut walk_config = WalkConfig::from(&config);

    // CLI flags override config file values.
    if let Some(root) = root {
        walk_config.root = root;
    }
    if let Some(entry) = entry {
        walk_config.entry = entry;
    }
    if let Some(sentinel) = sentinel {
        walk_config.sentinel = sentinel;
    }
    if let Some(pace) = pace_ms {
        walk_config.pace_ms = pace;
    }

    info!(
        root = %walk_config.root.display(),
        entry = %walk_config.entry,
        sentinel = %walk_config.sentinel,
        "walking document graph"
    );

    let source = FsSource::new(&walk_config.root);
    let walker = Walker::new(walk_config);
    let observer = CliProgress::new(format);

    let outcome = walker.walk(&source, &observer).await?;

    // The report itself was printed by the observer the moment the sentinel
    // completed; here we only print the run summary.
    let summary = &outcome.summary;
    println!();
    println!("  Walk complete!");
    println!("  Run:      {}", summary.run_id);
    println!("  Entry:    {}", summary.entry);
    println!("  Visited:  {}", summary.visited);
    println!("  Missing:  {}", summary.missing);
    println!("  Faulted:  {}", summary.faulted);
    println!("  Skipped:  {}", summary.skipped);
    println!("  Entries:  {}", outcome.knowledge.len());
    println!(
        "  Sentinel: {}",
        if summary.sentinel_reached {
            "reached"
        } else {
            "not reached"
        }
    );
    println!("  Time:     {:.1}s", summary.elapsed.as_secs_f64());
    println!();

    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress observer
// ---------------------------------------------------------------------------

/// Walk observer using an indicatif spinner; prints the report when the
/// sentinel is reached.
struct CliProgress {
    spinner: ProgressBar,
    format: ReportFormat,
}

impl CliProgress {
    fn new(format: ReportFormat) -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner, format }
    }
}

impl WalkObserver for CliProgress {
    fn visit_started(&self, name: &str, position: usize) {
        self.spinner
            .set_message(format!("Visiting [{position}] {name}"));
    }

    fn visit_finished(&self, record: &VisitRecord) {
        if record.status != VisitStatus::Visited {
            self.spinner.suspend(|| {
                println!("  waiting: {} ({:?})", record.name, record.status);
            });
        }
    }

    fn sentinel_reached(&self, entries: &[Entry]) {
        let rendered = render_report(entries, self.format);
        self.spinner.suspend(|| print!("{rendered}"));
    }

    fn done(&self, _summary: &WalkSummary) {
        self.spinner.finish_and_clear();
    }
}

fn render_report(entries: &[Entry], format: ReportFormat) -> String {
    match format {
        ReportFormat::Text => render_text(entries),
        ReportFormat::Json => match render_json(entries) {
            Ok(json) => format!("{json}\n"),
            Err(e) => {
                tracing::warn!(error = %e, "failed to render JSON report");
                render_text(entries)
            }
        },
    }
}

// ---------------------------------------------------------------------------
// parse
// ---------------------------------------------------------------------------

fn cmd_parse(document: &Path, format: ReportFormat) -> Result<()> {
    let config = load_config()?;
    let opts = ClassifyOptions::from(&WalkConfig::from(&config));

    let content = std::fs::read_to_string(document)
        .map_err(|e| eyre!("cannot read '{}': {e}", document.display()))?;

    let mut kb = KnowledgeBase::new();
    let mut references: Vec<String> = Vec::new();

    for raw in content.lines() {
        match classify(raw, &opts) {
            LineKind::Blank => {}
            LineKind::Reference(target) => references.push(target),
            LineKind::Header(text) => kb.on_header(text),
            LineKind::Continuation(text) => kb.on_continuation(text),
        }
    }

    print!("{}", render_report(kb.entries(), format));

    if !references.is_empty() {
        println!();
        println!("  References (not followed):");
        for target in &references {
            println!("    {target}");
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
