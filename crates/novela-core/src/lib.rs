//! Novela Core — shared abstractions.
//!
//! This crate defines the fundamental traits and types that the story store,
//! the narrative state machine and the player depend on. It contains no
//! infrastructure code.

pub mod aggregate;
pub mod clock;
pub mod command;
pub mod error;
pub mod event;
pub mod rng;
pub mod source;
pub mod surface;
