//! Spectral frames read from text.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

/// One frame of magnitudes from an upstream real-valued FFT.
///
/// # Example
/// ```
/// use mfcc_core::frame::SpectralFrame;
/// let frame = SpectralFrame::parse("0.5, 1.0 2.0 # bin 2").unwrap();
/// assert_eq!(frame.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralFrame {
    pub magnitudes: Vec<f64>,
}

impl SpectralFrame {
    /// Parse magnitudes separated by whitespace and/or commas.
    ///
    /// `#` starts a comment running to the end of the line.
    ///
    /// # Errors
    /// Returns an error on a non-numeric token, a negative or non-finite value,
    /// or a frame with no values at all.
    pub fn parse(text: &str) -> Result<Self> {
        let mut magnitudes = Vec::new();
        for (line_no, line) in text.lines().enumerate() {
            let content = line.split('#').next().unwrap_or_default();
            for token in content
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|t| !t.is_empty())
            {
                let value: f64 = token.parse().with_context(|| {
                    format!("ligne {}: valeur non numérique {token:?}", line_no + 1)
                })?;
                if !value.is_finite() || value < 0.0 {
                    anyhow::bail!(
                        "line {}: magnitude must be finite and non-negative, got {token:?}",
                        line_no + 1
                    );
                }
                magnitudes.push(value);
            }
        }
        if magnitudes.is_empty() {
            anyhow::bail!("spectral frame is empty");
        }
        Ok(Self { magnitudes })
    }

    /// Read a frame from a file, or from stdin when `path` is `-`.
    ///
    /// # Errors
    /// Returns an error if the source cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_or_read(path, std::io::stdin())
    }

    /// [`SpectralFrame::load`] with `stdin` standing in for the `-` path.
    fn load_or_read(path: &Path, mut stdin: impl Read) -> Result<Self> {
        let text = if path.as_os_str() == "-" {
            let mut buf = String::new();
            stdin
                .read_to_string(&mut buf)
                .context("Impossible de lire stdin")?;
            buf
        } else {
            std::fs::read_to_string(path)
                .with_context(|| format!("Impossible de lire {}", path.display()))?
        };
        let frame =
            Self::parse(&text).with_context(|| format!("Trame invalide: {}", path.display()))?;
        log::debug!("Read {} magnitudes from {}", frame.len(), path.display());
        Ok(frame)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.magnitudes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.magnitudes.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.magnitudes
    }
}

impl From<Vec<f64>> for SpectralFrame {
    fn from(magnitudes: Vec<f64>) -> Self {
        Self { magnitudes }
    }
}
