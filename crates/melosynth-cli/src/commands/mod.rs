//! CLI command implementations.

pub mod info;
pub mod presets;
pub mod synth;
