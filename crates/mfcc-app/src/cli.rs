use std::path::PathBuf;

use clap::Parser;
use mfcc_core::config::MfccConfig;

/// melceps — MFCCs from one magnitude-spectrum frame.
#[derive(Parser, Debug, Clone)]
#[command(name = "melceps", version, about)]
pub struct Cli {
    /// Spectral frame: magnitudes separated by whitespace or commas (`-` = stdin).
    #[arg(short, long)]
    pub spectrum: PathBuf,

    /// TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Sampling rate (Hz) of the original signal.
    #[arg(long)]
    pub sampling_rate: Option<u32>,

    /// Number of mel filter bands.
    #[arg(long)]
    pub num_filters: Option<usize>,

    /// Spectrum length; defaults to the number of magnitudes read.
    #[arg(long)]
    pub bin_size: Option<usize>,

    /// How many coefficients to print.
    #[arg(long)]
    pub count: Option<usize>,

    /// Print only coefficient M (errors if M is out of range).
    #[arg(short = 'm', long, value_name = "M", conflicts_with_all = ["count", "sequential"])]
    pub coefficient: Option<usize>,

    /// Compute on the calling thread instead of the rayon pool.
    #[arg(long)]
    pub sequential: bool,
}

impl Cli {
    /// Apply command-line overrides on top of a loaded configuration.
    pub fn apply_overrides(&self, config: &mut MfccConfig) {
        if let Some(rate) = self.sampling_rate {
            config.sampling_rate = rate;
        }
        if let Some(n) = self.num_filters {
            config.num_filters = n;
        }
        if self.bin_size.is_some() {
            config.bin_size = self.bin_size;
        }
        if self.count.is_some() {
            config.coefficients = self.count;
        }
        if self.sequential {
            config.parallel = false;
        }
    }
}
