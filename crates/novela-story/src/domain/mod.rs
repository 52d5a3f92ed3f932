//! Story graph domain types.

pub mod diagnostics;
pub mod raw;
pub mod scene;
pub mod story;
