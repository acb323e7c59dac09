use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use perfily::AppError;
use perfily::api::{DEFAULT_BASE_URL, HttpScoringApi};
use perfily::store::SessionStore;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Base URL of the scoring API
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    api_base_url: String,

    /// Directory holding the persisted session and the log file
    #[arg(long)]
    state_dir: Option<PathBuf>,

    /// Initial route, e.g. "/carreira" to deep-link a test
    #[arg(long, default_value = "/")]
    start: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let store = SessionStore::new(
        args.state_dir
            .unwrap_or_else(SessionStore::default_dir),
    );
    init_tracing(&store);

    if let Err(e) = run(&args.api_base_url, store, &args.start).await {
        eprintln!("Error running perfily: {e}");
        std::process::exit(1);
    }
}

async fn run(base_url: &str, store: SessionStore, start: &str) -> Result<(), AppError> {
    let api = Arc::new(HttpScoringApi::new(base_url)?);
    perfily::run(api, store, start).await
}

/// The TUI owns the terminal, so logs go to a file next to the session.
fn init_tracing(store: &SessionStore) {
    let path = store.log_path();
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let Ok(file) = fs::File::options().create(true).append(true).open(&path) else {
        return;
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("perfily=info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
}
