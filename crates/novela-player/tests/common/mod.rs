//! Shared test helpers for player integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use chrono::TimeDelta;
use novela_core::clock::SystemClock;
use novela_core::surface::Screen;
use novela_narrative::application::navigator::{Game, GameOptions};
use novela_story::application::loader::parse_story;
use novela_test_support::IdentityShuffleRng;

/// Build a started game over `document` with no reveal delays, so every
/// continue control appears on the next loop turn.
pub fn started_game(document: &str) -> Game<Screen> {
    let loaded = parse_story(document.as_bytes()).unwrap();
    let options = GameOptions {
        answer_reveal_delay: TimeDelta::zero(),
        ordering_reveal_delay: TimeDelta::zero(),
        ..GameOptions::default()
    };
    let mut game = Game::new(
        loaded.story,
        Screen::new(),
        Arc::new(SystemClock),
        Box::new(IdentityShuffleRng),
        options,
    );
    game.start();
    game
}

/// Joins `lines` into stdin-like input.
pub fn typed(lines: &[&str]) -> Vec<u8> {
    let mut input = lines.join("\n");
    input.push('\n');
    input.into_bytes()
}
