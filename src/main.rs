use clap::Parser;
use medconsult::config::{Cli, Settings};
use medconsult::consult::Consultant;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Returns the file that was loaded, if any.
fn load_dotenv() -> Option<PathBuf> {
    // First try a .env in the working directory
    if let Ok(path) = dotenvy::dotenv() {
        return Some(path);
    }

    // Fall back to the per-user config file
    let path = dirs::config_dir()?.join("medconsult").join("config.env");
    dotenvy::from_path(&path).ok().map(|_| path)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("medconsult=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    // Both read process-wide state that is only safe before worker threads exist.
    medconsult::types::capture_local_offset();
    let env_file = load_dotenv();

    init_tracing();
    if let Some(path) = &env_file {
        tracing::debug!(path = %path.display(), "loaded environment file");
    }

    let cli = Cli::parse();
    let settings = Settings::from(&cli);

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async move {
            let consultant = Consultant::from_settings(settings);
            match cli.ask.as_deref() {
                Some(question) => medconsult::app::run_once(&consultant, question).await,
                None => medconsult::app::run_repl(consultant).await,
            }
        })
}
