use color_eyre::eyre::Result;
use dotenv::dotenv;
use studiosync_viewer::{config::ViewerConfig, render::render_table, run_viewer};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL")
        .ok()
        .and_then(|level| level.parse::<Level>().ok())
        .unwrap_or(Level::INFO);

    // Logs go to stderr so the table stays readable on stdout
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = ViewerConfig::from_env();

    run_viewer(config, |snapshot| {
        println!("{}", render_table(snapshot));
    })
    .await?;

    Ok(())
}
