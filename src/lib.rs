//! Biquad filter design and processing for audio equalization.
//!
//! This crate implements the RBJ Audio-EQ-Cookbook biquad filters: a pure
//! coefficient designer covering the full cookbook family (peaking EQ,
//! low/high pass, band-pass, notch, all-pass, shelves) and a Direct-Form-1
//! engine that applies the resulting recurrence one sample at a time with
//! no allocation.
//!
//! Frequencies are expressed as a fraction of the sample rate, so the
//! designable domain is `(0, 0.5)` (strictly below Nyquist). Coefficients
//! are immutable once designed and can be shared across threads; each
//! stream owns its own small [`FilterState`].
//!
//! # Example
//!
//! ```rust
//! use biquad_eq::{design, DesignParams, Filter, FilterType, FilterWidth};
//!
//! // +10 dB peaking filter centered at 1% of the sample rate
//! let coeffs = design(
//!     FilterType::Peak,
//!     &DesignParams::new(0.01, FilterWidth::Q(1.0), 10.0),
//! )
//! .expect("valid parameters");
//!
//! let mut filter = Filter::new(coeffs);
//! let filtered: Vec<f64> = (0..128)
//!     .map(|i| filter.process((i as f64 * 0.02).sin()))
//!     .collect();
//! assert!(filtered.iter().all(|y| y.is_finite()));
//!
//! // The magnitude response at the center is the designed gain.
//! assert!((coeffs.magnitude_db(0.01) - 10.0).abs() < 0.1);
//! ```
#![warn(missing_docs)]

// Module declarations
mod design;
mod df1;
mod error;
mod response;

// Re-export error types
pub use error::{FilterError, Result};

// Re-export designer types and the design entry point
pub use design::{BiquadCoeffs, DesignParams, Df1Coeffs, FilterType, FilterWidth, design};

// Re-export the processing engine
pub use df1::{Filter, FilterState};

// ============================================================================
// Common Helper Functions and Constants
// ============================================================================

/// Converts bandwidth in octaves to a Q factor.
pub fn bw2q(bw: f64) -> f64 {
    let two_pow_bw = 2.0_f64.powf(bw);
    two_pow_bw.sqrt() / (two_pow_bw - 1.0)
}

/// Converts a Q factor to bandwidth in octaves.
pub fn q2bw(q: f64) -> f64 {
    let q2 = (2.0 * q * q + 1.0) / (2.0 * q * q);
    (q2 + (q2 * q2 - 1.0).sqrt()).log(2.0)
}

/// Butterworth Q, the default width for pass filters.
pub const DEFAULT_Q: f64 = std::f64::consts::FRAC_1_SQRT_2;

// ============================================================================
// Tests for Common Functions
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn test_bw_q_roundtrip() {
        let qs = [0.5, 1.0, 2.0, 5.0];
        for &q in &qs {
            let bw = q2bw(q);
            let q2 = bw2q(bw);
            assert!(
                approx_eq(q, q2, 1e-9),
                "roundtrip failed: q={} -> bw={} -> q2={}",
                q,
                bw,
                q2
            );
        }
    }

    #[test]
    fn test_default_q_is_butterworth() {
        assert!(approx_eq(DEFAULT_Q, 0.7071067811865476, 1e-15));
    }
}
