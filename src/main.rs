//! Command-line entry point.
//!
//! ```bash
//! session-designer 1800 poses.json transitions.json --memoize
//! ```

use clap::Parser;
use session_designer::catalog::load_catalog;
use session_designer::present::render;
use session_designer::search::{find_best_session, CacheMode};
use session_designer::{Catalog, SearchConfig, SearchReport};
use std::error::Error;
use std::path::PathBuf;
use std::thread;
use tracing_subscriber::EnvFilter;

/// Design a pose session that fits a target duration.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Target session length in seconds
    seconds: u32,

    /// JSON file with the pose catalog
    poses: PathBuf,

    /// JSON file with the transition catalog
    transitions: PathBuf,

    /// Cache resolved search states
    #[arg(long)]
    memoize: bool,

    /// How cached states are reused (implies --memoize)
    #[arg(long, value_enum)]
    cache_mode: Option<CacheMode>,

    /// Maximum number of poses in a session
    #[arg(long)]
    max_depth: Option<usize>,

    /// Optional JSON search config; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl Cli {
    fn search_config(&self) -> Result<SearchConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => SearchConfig::from_file(path)?,
            None => SearchConfig::default(),
        };

        if let Some(mode) = self.cache_mode {
            config = config.with_cache_mode(mode);
        } else if self.memoize && !config.cache_mode.is_enabled() {
            config = config.memoized();
        }
        if self.max_depth.is_some() {
            config = config.with_max_depth(self.max_depth);
        }
        Ok(config)
    }
}

/// Stack reserved for the search thread. Recursion depth follows the target
/// divided by the shortest catalog cycle, which outgrows the main thread's
/// stack long before memory runs out.
const SEARCH_STACK_BYTES: usize = 256 * 1024 * 1024;

/// Run the search on a dedicated thread with a large stack.
fn run_search(
    catalog: Catalog,
    target: u32,
    config: SearchConfig,
) -> Result<SearchReport, Box<dyn Error>> {
    let handle = thread::Builder::new()
        .name("search".into())
        .stack_size(SEARCH_STACK_BYTES)
        .spawn(move || find_best_session(&catalog, target, &config))?;
    handle
        .join()
        .map_err(|_| Box::<dyn Error>::from("search thread panicked"))
}

fn setup_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    setup_logging(&cli.log_level);

    if let Err(err) = try_main(&cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn try_main(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let config = cli.search_config()?;
    let catalog = load_catalog(&cli.poses, &cli.transitions)?;
    let report = run_search(catalog, cli.seconds, config)?;
    print!("{}", render(&report.session, report.target));
    Ok(())
}
