//! Novela terminal player entry point.

use std::error::Error;
use std::sync::Arc;

use novela_core::clock::SystemClock;
use novela_core::rng::{DeterministicRng, SeededRng};
use novela_core::surface::Screen;
use novela_narrative::application::navigator::{Game, GameOptions};
use novela_player::config::{DEFAULT_LOG_FILTER, LogFormat, PlayerConfig};
use novela_player::run::{load_or_report, run};
use novela_player::source::FileStorySource;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = PlayerConfig::from_env()?;

    // Initialize tracing subscriber. Frames go to stdout, logs to stderr.
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match config.log_format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Pretty => subscriber.pretty().init(),
    }

    tracing::info!(story_path = %config.story_path.display(), seed = ?config.seed, "Starting Novela player");

    let mut stdout = std::io::stdout();
    let source = FileStorySource::new(&config.story_path);
    let Some(loaded) = load_or_report(&source, &mut stdout).await? else {
        return Ok(());
    };

    let rng: Box<dyn DeterministicRng> = match config.seed {
        Some(seed) => Box::new(SeededRng::from_seed(seed)),
        None => Box::new(SeededRng::from_os()),
    };
    let options = GameOptions {
        show_final_score: config.show_final_score,
        ..GameOptions::default()
    };
    let mut game = Game::new(
        loaded.story,
        Screen::new(),
        Arc::new(SystemClock),
        rng,
        options,
    );
    game.start();

    let view = run(&mut game, BufReader::new(tokio::io::stdin()), &mut stdout).await?;
    tracing::info!(summary = %serde_json::to_string(&view)?, "Novela player finished");

    Ok(())
}
