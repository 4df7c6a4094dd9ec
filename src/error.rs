//! Error types for filter design.
//!
//! All failures happen at the design boundary: parameters are validated
//! before any coefficient is computed, and a degenerate normalization
//! (`a0` zero or non-finite) is rejected rather than returned as a
//! NaN/infinity coefficient set. Processing itself has no error path.

use thiserror::Error;

/// Errors that can occur while designing a filter.
#[derive(Debug, Error)]
pub enum FilterError {
    /// Center frequency is invalid (must be strictly between 0 and the
    /// Nyquist fraction 0.5).
    #[error("invalid frequency: {freq} (must be in (0, 0.5) as a fraction of the sample rate)")]
    InvalidFrequency {
        /// The rejected frequency, as a fraction of the sample rate
        freq: f64,
    },

    /// Width parameter (Q, bandwidth in octaves, or shelf slope) is
    /// invalid (must be finite and > 0).
    #[error("invalid width parameter: {width} (must be finite and > 0)")]
    InvalidWidth {
        /// The rejected Q / bandwidth / slope value
        width: f64,
    },

    /// Gain value is invalid (non-finite).
    #[error("invalid gain: {gain_db} dB (must be finite)")]
    InvalidGain {
        /// The rejected gain value
        gain_db: f64,
    },

    /// The cookbook equations produced an unusable `a0` term, so the
    /// coefficients cannot be normalized.
    #[error("degenerate coefficients: a0 = {a0} (must be finite and nonzero)")]
    DegenerateCoefficients {
        /// The unusable `a0` value
        a0: f64,
    },
}

/// A specialized `Result` type for filter design.
pub type Result<T> = std::result::Result<T, FilterError>;

impl FilterError {
    /// Returns `true` if this is a frequency-domain error.
    pub fn is_frequency_error(&self) -> bool {
        matches!(self, FilterError::InvalidFrequency { .. })
    }

    /// Returns `true` if this is a width-parameter error.
    pub fn is_width_error(&self) -> bool {
        matches!(self, FilterError::InvalidWidth { .. })
    }

    /// Returns `true` if this is a gain error.
    pub fn is_gain_error(&self) -> bool {
        matches!(self, FilterError::InvalidGain { .. })
    }

    /// Returns `true` if the design produced an unnormalizable `a0`.
    pub fn is_degenerate(&self) -> bool {
        matches!(self, FilterError::DegenerateCoefficients { .. })
    }
}
