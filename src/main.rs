use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use pixgallery::{
    config, GallerySession, ImageSource, NoticeLevel, Outcome, RecordingNotifier, SearchConfig,
    StaticSource,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "pixgallery",
    version,
    about = "Search images and page through the results as an HTML gallery"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Run a search and write the resulting gallery page
    Search(SearchArgs),
}

#[derive(Args)]
struct SearchArgs {
    /// Search terms
    query: String,

    /// Number of pages to load, the first one included
    #[arg(long, default_value_t = 1, conflicts_with = "all")]
    pages: u32,

    /// Keep loading pages until the results are exhausted
    #[arg(long)]
    all: bool,

    /// Page size (3..=200)
    #[arg(long)]
    per_page: Option<u32>,

    /// API key (defaults to $PIXABAY_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Search endpoint
    #[arg(long)]
    endpoint: Option<String>,

    /// Request timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Serve results from a saved API response instead of the network
    #[arg(long, value_name = "FILE")]
    fixture: Option<PathBuf>,

    /// Write the gallery page here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn,pixgallery=info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // Also bridges records from the `log` facade used by the library
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn build_config(args: &SearchArgs) -> anyhow::Result<SearchConfig> {
    let mut cfg = config::from_env().context("reading configuration from the environment")?;
    if let Some(key) = &args.api_key {
        cfg.api_key = key.clone();
    }
    if let Some(endpoint) = &args.endpoint {
        cfg.endpoint = endpoint.clone();
    }
    if let Some(per_page) = args.per_page {
        cfg.per_page = per_page;
    }
    if let Some(timeout) = args.timeout_ms {
        cfg.timeout_ms = timeout;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn print_notices(notifier: &RecordingNotifier) {
    for notice in notifier.notices() {
        match notice.level {
            NoticeLevel::Info => eprintln!("[info] {}", notice.message),
            NoticeLevel::Failure => eprintln!("[failure] {}", notice.message),
        }
    }
    notifier.clear();
}

async fn run<S: ImageSource>(source: S, cfg: &SearchConfig, args: &SearchArgs) -> anyhow::Result<()> {
    let notifier = Arc::new(RecordingNotifier::new());
    let session = GallerySession::new(source, Arc::clone(&notifier), cfg);

    let outcome = session.submit(&args.query).await;
    print_notices(&notifier);
    let mut more = match outcome.context("search failed")? {
        Outcome::Rendered { more, .. } => more,
        Outcome::Rejected | Outcome::NoResults | Outcome::Ignored => false,
    };

    let mut loaded = 1;
    while more && (args.all || loaded < args.pages) {
        let outcome = session.load_more().await;
        print_notices(&notifier);
        more = match outcome.with_context(|| format!("loading page {} failed", loaded + 1))? {
            Outcome::Rendered { more, .. } => more,
            _ => false,
        };
        loaded += 1;
    }

    let snap = session.snapshot().await;
    eprintln!(
        "{} cards rendered ({} of {} hits){}",
        snap.cards,
        snap.hits_seen,
        snap.total_hits.unwrap_or(0),
        if snap.load_more_visible { ", more available" } else { "" }
    );

    let html = session.render_page().await;
    match &args.output {
        Some(path) => std::fs::write(path, html)
            .with_context(|| format!("writing gallery to {}", path.display()))?,
        None => print!("{}", html),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Search(args) => {
            let cfg = build_config(&args)?;
            if let Some(path) = &args.fixture {
                let source = StaticSource::from_json_file(path)
                    .with_context(|| format!("loading fixture {}", path.display()))?;
                run(source, &cfg, &args).await
            } else {
                if cfg.api_key.is_empty() {
                    bail!("an API key is required: pass --api-key or set {}", config::ENV_API_KEY);
                }
                let source = pixgallery::new_source(&cfg)?;
                run(source, &cfg, &args).await
            }
        }
    }
}
