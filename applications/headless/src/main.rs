/// Cadence Headless - drive a session from the terminal
mod app;
mod host;
mod library;

use app::App;
use cadence_library::MemoryGateway;
use cadence_session::{Session, SessionConfig};
use clap::Parser;
use host::LoggingHost;
use library::Library;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cadence-headless")]
#[command(about = "Drive a Cadence session from the terminal", long_about = None)]
struct Cli {
    /// Library file (JSON with `tracks` and `playlists`)
    #[arg(short, long)]
    library: PathBuf,

    /// Configuration file path
    #[arg(short, long, env = "CADENCE_CONFIG")]
    config: Option<PathBuf>,

    /// Make every library write fail
    #[arg(long)]
    offline: bool,

    /// Delay applied to every library write, in milliseconds
    #[arg(long, default_value_t = 0)]
    latency_ms: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cadence=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = SessionConfig::load(cli.config.as_deref())?;
    let library = Library::load(&cli.library).await?;
    tracing::info!(
        tracks = library.tracks.len(),
        playlists = library.playlists.len(),
        "Library loaded"
    );

    let gateway = Arc::new(MemoryGateway::new(
        library.playlists.clone(),
        library.tracks.clone(),
    ));
    gateway.set_failing(cli.offline);
    gateway.set_latency(Duration::from_millis(cli.latency_ms));

    let session = Session::new(
        config,
        Box::new(LoggingHost),
        gateway.clone(),
        library.playlists,
        library.tracks,
    );
    let mut app = App::new(session, gateway);

    println!("{}", app::HELP);
    println!("{}", app.render());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut tick = tokio::time::interval(Duration::from_millis(100));

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if app.handle_line(&line).is_break() {
                    break;
                }
                println!("{}", app.render());
            }
            _ = tick.tick() => app.pump(),
        }
    }

    app.shutdown();
    tracing::info!("Bye");

    Ok(())
}
