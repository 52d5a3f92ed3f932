//! Scene rendering, interaction strategies and navigation.

pub mod interactions;
pub mod navigator;
pub mod query_handlers;
pub(crate) mod renderer;
