//! Shared helpers for the packaging steps.

pub mod fs;
pub mod lookup;
pub mod path;
