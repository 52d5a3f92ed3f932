//! Text rendering of the retained screen and mapping of typed lines to
//! player commands.

use novela_core::surface::Screen;
use novela_narrative::domain::commands::{Continue, PlayerCommand, SubmitAnswer};
use uuid::Uuid;

const RULE: &str = "────────────────────────────────────────";

/// Words that leave the player when no answer field is open.
pub const QUIT_WORDS: [&str; 2] = ["q", "salir"];

/// What a typed line means on the current screen.
#[derive(Debug, Clone)]
pub enum LineInput {
    /// Dispatch this command.
    Command(PlayerCommand),
    /// Leave the player.
    Quit,
    /// Nothing on screen matches.
    Unknown,
}

/// Draws every visible region of `screen`. Option controls are numbered from
/// one; disabled ones are shown in parentheses.
#[must_use]
pub fn render_frame(screen: &Screen) -> String {
    let mut lines = vec![RULE.to_owned()];
    if !screen.narrative.is_empty() {
        lines.push(screen.narrative.clone());
    }
    if !screen.question.is_empty() {
        lines.push(String::new());
        lines.push(screen.question.clone());
    }
    if !screen.options.is_empty() {
        lines.push(String::new());
        for (position, control) in screen.options.iter().enumerate() {
            let number = position + 1;
            if control.enabled {
                lines.push(format!("  {number}) {}", control.label));
            } else {
                lines.push(format!("  {number}) ({})", control.label));
            }
        }
    }
    if let Some(order) = &screen.order_display {
        lines.push(format!("  {order}"));
    }
    if screen.input_visible {
        lines.push(String::new());
        lines.push("> Escribí tu respuesta y presioná Enter.".to_owned());
    }
    if screen.next_visible {
        lines.push(String::new());
        lines.push("[Enter] Continuar".to_owned());
    }
    lines.push(String::new());
    lines.join("\n")
}

/// Maps a typed line to an input. An open answer field takes the whole line
/// verbatim; otherwise an empty line follows the continue control and a
/// number activates that option.
#[must_use]
pub fn parse_line(line: &str, screen: &Screen) -> LineInput {
    let correlation_id = Uuid::new_v4();
    if screen.input_visible && screen.input_enabled {
        return LineInput::Command(PlayerCommand::SubmitAnswer(SubmitAnswer {
            correlation_id,
            input: line.to_owned(),
        }));
    }

    let trimmed = line.trim();
    if QUIT_WORDS.contains(&trimmed) {
        return LineInput::Quit;
    }
    if trimmed.is_empty() && screen.next_visible {
        return LineInput::Command(PlayerCommand::Continue(Continue { correlation_id }));
    }
    trimmed
        .parse::<usize>()
        .ok()
        .and_then(|number| number.checked_sub(1))
        .and_then(|position| screen.options.get(position))
        .map_or(LineInput::Unknown, |control| {
            LineInput::Command(PlayerCommand::from_action(control.action, correlation_id))
        })
}
