//! Integration tests for the player loop.

mod common;

use novela_narrative::domain::ending::EndingTier;
use novela_player::run::{load_or_report, run};
use novela_story::application::loader::LOAD_FAILURE_MESSAGE;
use novela_test_support::fixtures::{MISSING_BRANCH_STORY, SAMPLE_STORY};
use novela_test_support::{FailingStorySource, StaticStorySource};

#[tokio::test]
async fn test_full_playthrough_reaches_ending() {
    // Arrange
    let mut game = common::started_game(SAMPLE_STORY);
    let input = common::typed(&["1", "eco", "", "", "3", "1", "2", "4", ""]);
    let mut output = Vec::new();

    // Act
    let view = run(&mut game, input.as_slice(), &mut output).await.unwrap();

    // Assert
    assert_eq!(view.score, 2);
    assert_eq!(view.ending, Some(EndingTier::Bad));
    let printed = String::from_utf8(output).unwrap();
    assert!(printed.contains("La voz se ríe."));
    assert!(printed.contains("El orden es correcto."));
    assert!(printed.ends_with("La calle te tragó.\n\n[Puntuación final: 2 puntos]\n\nNoche\n"));
}

#[tokio::test]
async fn test_quit_word_stops_before_ending() {
    let mut game = common::started_game(SAMPLE_STORY);
    let mut output = Vec::new();

    let view = run(&mut game, common::typed(&["q"]).as_slice(), &mut output)
        .await
        .unwrap();

    assert_eq!(view.ending, None);
    assert_eq!(view.stage, "choosing");
}

#[tokio::test]
async fn test_missing_branch_and_unknown_input_leave_intro() {
    // Arrange
    let mut game = common::started_game(MISSING_BRANCH_STORY);
    let mut output = Vec::new();

    // Act
    let view = run(&mut game, common::typed(&["1", "7", "hola"]).as_slice(), &mut output)
        .await
        .unwrap();

    // Assert
    assert_eq!(view.stage, "choosing");
    let printed = String::from_utf8(output).unwrap();
    assert_eq!(printed.matches("Una calle infinita.").count(), 1);
}

#[tokio::test]
async fn test_load_failure_shows_message_and_halts() {
    // Arrange
    let source = FailingStorySource;
    let mut output = Vec::new();

    // Act
    let loaded = load_or_report(&source, &mut output).await.unwrap();

    // Assert
    assert!(loaded.is_none());
    assert!(String::from_utf8(output).unwrap().contains(LOAD_FAILURE_MESSAGE));
}

#[tokio::test]
async fn test_invalid_document_shows_message_and_halts() {
    let source = StaticStorySource::new("{ not json");
    let mut output = Vec::new();

    let loaded = load_or_report(&source, &mut output).await.unwrap();

    assert!(loaded.is_none());
    assert!(String::from_utf8(output).unwrap().contains(LOAD_FAILURE_MESSAGE));
}

#[tokio::test]
async fn test_valid_document_loads_without_output() {
    let source = StaticStorySource::new(SAMPLE_STORY);
    let mut output = Vec::new();

    let loaded = load_or_report(&source, &mut output).await.unwrap();

    assert_eq!(loaded.unwrap().story.scenes().len(), 4);
    assert!(output.is_empty());
}

#[test]
fn test_bundled_story_loads_cleanly() {
    let loaded = novela_story::application::loader::parse_story(include_bytes!(
        "../../../story.json"
    ))
    .unwrap();

    assert!(loaded.diagnostics.is_empty(), "{:?}", loaded.diagnostics);
    assert_eq!(loaded.story.scenes().len(), 10);
}
