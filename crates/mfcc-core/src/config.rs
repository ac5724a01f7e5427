//! Configuration layer: TOML file → validated [`MfccConfig`] → per-call [`Params`].

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Highest filter band with a defined magnitude factor.
pub const USABLE_BANDS: usize = 48;

/// Parameters of a single coefficient computation.
///
/// Supplied fresh per call, never persisted by the numeric core.
///
/// # Example
/// ```
/// use mfcc_core::config::Params;
/// let params = Params::new(16_000, 48, 32);
/// assert_eq!(params.num_filters, 48);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    /// Rate (Hz) at which the time-domain signal was sampled.
    pub sampling_rate: u32,
    /// Number of mel filter bands (48 is the supported bank).
    pub num_filters: usize,
    /// Length of the spectral frame produced by the transform.
    pub bin_size: usize,
}

impl Params {
    #[must_use]
    pub fn new(sampling_rate: u32, num_filters: usize, bin_size: usize) -> Self {
        Self {
            sampling_rate,
            num_filters,
            bin_size,
        }
    }
}

/// `melceps` configuration file; every key is optional.
///
/// # Example
/// ```
/// use mfcc_core::config::MfccConfig;
/// let config = MfccConfig::from_toml_str("sampling_rate = 16000").unwrap();
/// assert_eq!(config.sampling_rate, 16_000);
/// assert_eq!(config.num_filters, 48);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MfccConfig {
    pub sampling_rate: u32,
    pub num_filters: usize,
    /// Overrides the frame length when set.
    pub bin_size: Option<usize>,
    /// How many coefficients to emit; defaults to `num_filters`.
    pub coefficients: Option<usize>,
    /// Compute coefficients on the rayon pool.
    pub parallel: bool,
}

impl Default for MfccConfig {
    fn default() -> Self {
        Self {
            sampling_rate: 44_100,
            num_filters: USABLE_BANDS,
            bin_size: None,
            coefficients: None,
            parallel: true,
        }
    }
}

impl MfccConfig {
    /// Parse a configuration from TOML text.
    ///
    /// # Errors
    /// Returns an error if the text is not valid TOML or contains unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("Configuration TOML invalide")
    }

    /// Load a configuration file from disk.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Impossible de lire {}", path.display()))?;
        let config = Self::from_toml_str(&text)
            .with_context(|| format!("Erreur dans {}", path.display()))?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Check that the parameters describe a computable filter bank.
    ///
    /// # Errors
    /// Returns an error on a zero sampling rate, zero filters or a zero bin size.
    pub fn validate(&self) -> Result<()> {
        if self.sampling_rate == 0 {
            anyhow::bail!("sampling_rate must be positive");
        }
        if self.num_filters == 0 {
            anyhow::bail!("num_filters must be positive");
        }
        if self.bin_size == Some(0) {
            anyhow::bail!("bin_size must be positive");
        }
        if self.num_filters > USABLE_BANDS {
            log::warn!(
                "num_filters = {} exceeds the {USABLE_BANDS} usable bands; bands above {USABLE_BANDS} contribute nothing",
                self.num_filters
            );
        }
        Ok(())
    }

    /// Resolve per-call parameters for a frame of `frame_len` magnitudes.
    ///
    /// A configured `bin_size` wins over the frame length.
    #[must_use]
    pub fn params(&self, frame_len: usize) -> Params {
        Params::new(
            self.sampling_rate,
            self.num_filters,
            self.bin_size.unwrap_or(frame_len),
        )
    }

    /// Number of coefficients to emit, never more than `num_filters`.
    #[must_use]
    pub fn coefficient_count(&self) -> usize {
        self.coefficients
            .unwrap_or(self.num_filters)
            .min(self.num_filters)
    }
}
