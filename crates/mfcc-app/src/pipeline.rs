use anyhow::Result;
use mfcc_core::config::MfccConfig;
use mfcc_core::frame::SpectralFrame;

use crate::cli::Cli;

/// Result of one `melceps` run.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// A single checked coefficient.
    Single { m: usize, value: f64 },
    /// Coefficients `0..len`.
    Series(Vec<f64>),
}

/// Load the configuration file (if any), apply CLI overrides, validate.
///
/// # Errors
/// Returns an error if the file cannot be loaded or the result is invalid.
pub fn load_config(cli: &Cli) -> Result<MfccConfig> {
    let mut config = match &cli.config {
        Some(path) => MfccConfig::load(path)?,
        None => MfccConfig::default(),
    };
    cli.apply_overrides(&mut config);
    config.validate()?;
    Ok(config)
}

/// Compute the requested coefficients for one frame.
///
/// # Example
/// ```
/// use clap::Parser;
/// use mfcc_app::cli::Cli;
/// use mfcc_app::pipeline::{Output, compute, load_config};
/// use mfcc_core::frame::SpectralFrame;
///
/// let cli = Cli::parse_from(["melceps", "--spectrum", "-", "--count", "4"]);
/// let config = load_config(&cli).unwrap();
/// let frame = SpectralFrame::from(vec![1.0; 64]);
/// let output = compute(&cli, &config, &frame).unwrap();
/// assert!(matches!(output, Output::Series(ref v) if v.len() == 4));
/// ```
///
/// # Errors
/// Returns an error if a single coefficient was requested out of range or the
/// frame is shorter than the configured bin size allows.
pub fn compute(cli: &Cli, config: &MfccConfig, frame: &SpectralFrame) -> Result<Output> {
    let params = config.params(frame.len());
    if params.bin_size != frame.len() {
        log::warn!(
            "bin_size = {} but the frame holds {} magnitudes",
            params.bin_size,
            frame.len()
        );
    }

    if let Some(m) = cli.coefficient {
        let value = mfcc_dsp::checked_coefficient(frame.as_slice(), params, m)?;
        return Ok(Output::Single { m, value });
    }

    let count = config.coefficient_count();
    let values = if config.parallel {
        mfcc_dsp::par_coefficients(frame.as_slice(), params, count)
    } else {
        mfcc_dsp::coefficients(frame.as_slice(), params, count)
    };
    log::info!(
        "Computed {} coefficients ({} Hz, {} filters, {} bins)",
        values.len(),
        params.sampling_rate,
        params.num_filters,
        params.bin_size
    );
    Ok(Output::Series(values))
}

/// Format an [`Output`] as `m<TAB>value` lines.
#[must_use]
pub fn render(output: &Output) -> String {
    match output {
        Output::Single { value, .. } => format!("{value}\n"),
        Output::Series(values) => values
            .iter()
            .enumerate()
            .map(|(m, value)| format!("{m}\t{value}\n"))
            .collect(),
    }
}
