//! Novela — Narrative Orchestration.
//!
//! Responsible for scene rendering, the interaction strategies of each scene
//! kind (choice, free text, ordering puzzle, plain continue), scoring, delayed
//! reveal of the continue control and the score-banded endings.

pub mod application;
pub mod domain;
