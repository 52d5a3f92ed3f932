//! The player loop: one game, lines from a reader, frames to a writer.

use std::io::Write;
use std::time::Duration;

use chrono::{DateTime, Utc};
use novela_core::source::StorySource;
use novela_core::surface::{Screen, Surface};
use novela_narrative::application::navigator::Game;
use novela_narrative::application::query_handlers::SessionView;
use novela_narrative::domain::commands::PlayerCommand;
use novela_story::application::loader::{LOAD_FAILURE_MESSAGE, LoadedStory, load_story};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, error, info};

use crate::error::AppError;
use crate::terminal::{LineInput, parse_line, render_frame};

/// Loads the story. On failure the error message is drawn in the narrative
/// region and `None` is returned; the caller halts.
///
/// # Errors
///
/// Returns `AppError::Io` if the failure frame cannot be written.
pub async fn load_or_report<W: Write>(
    source: &dyn StorySource,
    output: &mut W,
) -> Result<Option<LoadedStory>, AppError> {
    match load_story(source).await {
        Ok(loaded) => Ok(Some(loaded)),
        Err(err) => {
            error!(error = %err, source = %source.describe(), "story load failed");
            let mut screen = Screen::new();
            screen.set_narrative(LOAD_FAILURE_MESSAGE);
            output.write_all(render_frame(&screen).as_bytes())?;
            output.flush()?;
            Ok(None)
        }
    }
}

/// Plays `game` until the ending, a quit word or the end of `input`. The
/// game must already be started. Returns the final session view.
///
/// # Errors
///
/// Returns `AppError::Io` if reading a line or writing a frame fails.
pub async fn run<R, W>(
    game: &mut Game<Screen>,
    input: R,
    output: &mut W,
) -> Result<SessionView, AppError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut shown: Option<Screen> = None;

    loop {
        game.poll_reveal();
        if shown.as_ref() != Some(game.surface()) {
            output.write_all(render_frame(game.surface()).as_bytes())?;
            output.flush()?;
            shown = Some(game.surface().clone());
        }
        if game.view().ending.is_some() {
            break;
        }

        let deadline = game.next_deadline();
        tokio::select! {
            biased;
            () = sleep_until(deadline) => {}
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_line(&line, game.surface()) {
                    LineInput::Quit => break,
                    LineInput::Command(command) => {
                        if let PlayerCommand::SubmitAnswer(submit) = &command {
                            game.surface_mut().type_input(&submit.input);
                        }
                        if let Err(err) = game.dispatch(&command) {
                            debug!(error = %err, "activation rejected");
                        }
                    }
                    LineInput::Unknown => debug!(line = %line, "input matches nothing on screen"),
                }
            }
        }
    }

    let view = game.view();
    info!(score = view.score, stage = view.stage, "session finished");
    Ok(view)
}

async fn sleep_until(deadline: Option<DateTime<Utc>>) {
    match deadline {
        Some(due_at) => {
            let remaining = (due_at - Utc::now()).to_std().unwrap_or(Duration::ZERO);
            tokio::time::sleep(remaining).await;
        }
        None => std::future::pending().await,
    }
}
