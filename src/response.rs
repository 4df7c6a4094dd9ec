//! Frequency response magnitude, computed from the normalized
//! coefficients.
//!
//! Uses RBJ's `sin^2(w/2)` reformulation of the transfer function
//! magnitude, which is numerically better behaved near DC than evaluating
//! `H(e^{jw})` directly.

use ndarray::Array1;
use std::f64::consts::PI;

use crate::design::Df1Coeffs;

/// Floor returned by [`Df1Coeffs::magnitude_db`] for silence.
const SILENCE_DB: f64 = -200.0;

impl Df1Coeffs {
    fn response_polys(&self) -> ([f64; 3], [f64; 3]) {
        let up = [
            (self.b0 + self.b1 + self.b2).powi(2),
            -4.0 * (self.b0 * self.b1 + 4.0 * self.b0 * self.b2 + self.b1 * self.b2),
            16.0 * self.b0 * self.b2,
        ];
        // Denominator with a0 already normalized to 1
        let dw = [
            (1.0 + self.a1 + self.a2).powi(2),
            -4.0 * (self.a1 + 4.0 * self.a2 + self.a1 * self.a2),
            16.0 * self.a2,
        ];
        (up, dw)
    }

    /// Gain magnitude at `freq`, a frequency expressed as a fraction of
    /// the sample rate.
    pub fn magnitude(&self, freq: f64) -> f64 {
        let (up, dw) = self.response_polys();
        let phi = (PI * freq).sin().powi(2);
        let phi2 = phi * phi;

        let numerator = up[0] + up[1] * phi + up[2] * phi2;
        let denominator = dw[0] + dw[1] * phi + dw[2] * phi2;

        (numerator / denominator).max(0.0).sqrt()
    }

    /// Gain in dB at `freq`; returns a large negative floor for silence.
    pub fn magnitude_db(&self, freq: f64) -> f64 {
        let m = self.magnitude(freq);
        if m > 0.0 {
            20.0 * m.log10()
        } else {
            SILENCE_DB
        }
    }

    /// Vectorized dB response over a grid of sample-rate-relative
    /// frequencies.
    pub fn magnitude_grid(&self, freqs: &Array1<f64>) -> Array1<f64> {
        let (up, dw) = self.response_polys();
        let phi = (freqs * PI).mapv(f64::sin).mapv(|x| x.powi(2));
        let phi2 = &phi * &phi;

        let numerator = up[0] + up[1] * &phi + up[2] * &phi2;
        let denominator = dw[0] + dw[1] * &phi + dw[2] * &phi2;
        let r = numerator / denominator;

        // Clip to a minimum value to avoid log(0)
        let min_val = 1.0e-20;
        r.mapv(|val| val.max(min_val)).mapv(f64::sqrt).mapv(f64::log10) * 20.0
    }
}
