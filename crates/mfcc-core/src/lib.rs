//! Shared value types for melceps: per-call parameters, TOML configuration and spectral frames.

pub mod config;
pub mod frame;
