use archive_explorer::board::TextBoard;
use archive_explorer::config;
use archive_explorer::render;
use archive_explorer::session::Session;
use archive_explorer::shell;

use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    // Logs go to stderr so they don't interleave with the board
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let config = config::Config::from_env();
    tracing::info!(
        base_url = %config.api_base_url,
        platform = %config.platform,
        "Starting archive explorer"
    );
    if config.request_timeout.is_none() {
        tracing::debug!("No request timeout configured; a hung request stays pending");
    }

    // The board is built once and reused for every analysis
    let mut session = Session::from_config(&config, Box::new(TextBoard::stdout()))?;
    session.subscribe(|event| {
        if let Some(line) = render::event_line(event) {
            println!("{line}");
        }
    });

    let stdin = BufReader::new(tokio::io::stdin());
    shell::run(&session, stdin).await?;

    tracing::info!("Goodbye");
    Ok(())
}
