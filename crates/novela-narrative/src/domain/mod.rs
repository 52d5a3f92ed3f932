//! Narrative domain model.

pub mod aggregates;
pub mod commands;
pub mod ending;
pub mod events;
pub mod ordering;
