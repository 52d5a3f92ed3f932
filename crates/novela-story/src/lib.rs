//! Novela — Story Store.
//!
//! Responsible for fetching the story document once, classifying every scene
//! into its interaction kind up front, and reporting authoring problems
//! (dangling transitions, malformed puzzles) as diagnostics.

pub mod application;
pub mod domain;
