//! CLI command implementations.

pub mod automap;
pub mod common;
pub mod effects;
pub mod export;
pub mod info;
pub mod presets;
pub mod settings;
pub mod validate;
