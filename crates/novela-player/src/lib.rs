//! Novela — terminal player.
//!
//! Loads a story from disk and plays it on stdin/stdout, driving delayed
//! reveals from a tokio timer.

pub mod config;
pub mod error;
pub mod run;
pub mod source;
pub mod terminal;
