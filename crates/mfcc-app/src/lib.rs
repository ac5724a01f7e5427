//! The `melceps` command-line application: configuration, frame input, output formatting.

pub mod cli;
pub mod pipeline;
