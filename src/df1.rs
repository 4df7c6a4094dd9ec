//! Direct-Form-1 processing engine.
//!
//! The recurrence is the canonical difference equation
//!
//! ```text
//! y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2] - a1*y[n-1] - a2*y[n-2]
//! ```
//!
//! Coefficients are immutable after design; the four-sample history lives
//! in a separate [`FilterState`] so one coefficient set can drive any
//! number of independent streams. `process` allocates nothing and has no
//! error path: a non-finite input sample simply propagates through the
//! recurrence (and poisons the history) per IEEE-754, which is the
//! documented behavior.

use crate::design::Df1Coeffs;

/// History state for one stream: the two most recent inputs and outputs.
///
/// Zero-initialized at creation, mutated exactly once per processed
/// sample. Each independent signal/channel needs its own state; states
/// are never shared between streams.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FilterState {
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
}

impl FilterState {
    /// Creates a fresh state with all four history slots at zero.
    pub fn new() -> Self {
        FilterState::default()
    }

    /// Clears the history back to zeros.
    pub fn reset(&mut self) {
        *self = FilterState::default();
    }
}

impl Df1Coeffs {
    /// Steps the recurrence by one sample, updating `state` in place.
    ///
    /// Calling this N times over a stream of N samples in order produces
    /// the standard biquad response; skipping or reordering samples
    /// changes the output because the state is history-dependent.
    #[inline]
    pub fn process(&self, state: &mut FilterState, x: f64) -> f64 {
        let y = self.b0 * x + self.b1 * state.x1 + self.b2 * state.x2
            - self.a1 * state.y1
            - self.a2 * state.y2;

        state.x2 = state.x1;
        state.x1 = x;
        state.y2 = state.y1;
        state.y1 = y;

        y
    }
}

/// A coefficient set paired with its own history, for the common
/// single-stream case.
#[derive(Debug, Clone, Copy)]
pub struct Filter {
    coeffs: Df1Coeffs,
    state: FilterState,
}

impl Filter {
    /// Creates a filter with zeroed history.
    pub fn new(coeffs: Df1Coeffs) -> Self {
        Filter {
            coeffs,
            state: FilterState::new(),
        }
    }

    /// The coefficients this filter runs.
    pub fn coeffs(&self) -> &Df1Coeffs {
        &self.coeffs
    }

    /// Processes a single sample through the filter.
    #[inline]
    pub fn process(&mut self, x: f64) -> f64 {
        self.coeffs.process(&mut self.state, x)
    }

    /// Processes a block of samples in place.
    pub fn process_block(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.coeffs.process(&mut self.state, *sample);
        }
    }

    /// Clears the history, keeping the coefficients.
    pub fn reset(&mut self) {
        self.state.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::{DesignParams, FilterType, FilterWidth, design};

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    fn peak_10db() -> Df1Coeffs {
        design(
            FilterType::Peak,
            &DesignParams::new(0.01, FilterWidth::Q(1.0), 10.0),
        )
        .unwrap()
    }

    #[test]
    fn test_zero_gain_peak_is_passthrough() {
        let cs = design(
            FilterType::Peak,
            &DesignParams::new(0.1, FilterWidth::Q(1.0), 0.0),
        )
        .unwrap();
        let mut state = FilterState::new();

        let input = [1.0, -0.5, 0.25, 0.0, 3.0, -2.0, 0.125];
        for &x in &input {
            let y = cs.process(&mut state, x);
            assert!(
                approx_eq(y, x, 1e-12),
                "passthrough broken: x={x} y={y}"
            );
        }
    }

    #[test]
    fn test_impulse_response_prefix() {
        // The first three impulse-response samples are fixed by the
        // coefficients and validate the state-update ordering.
        let cs = peak_10db();
        let mut state = FilterState::new();

        let y0 = cs.process(&mut state, 1.0);
        let y1 = cs.process(&mut state, 0.0);
        let y2 = cs.process(&mut state, 0.0);

        assert!(approx_eq(y0, cs.b0, 1e-15));
        assert!(approx_eq(y1, cs.b1 - cs.a1 * cs.b0, 1e-15));
        assert!(approx_eq(y2, cs.b2 - cs.a1 * y1 - cs.a2 * cs.b0, 1e-15));
    }

    #[test]
    fn test_impulse_response_decays() {
        let cs = peak_10db();
        let mut state = FilterState::new();

        let _ = cs.process(&mut state, 1.0);
        let mut tail = 0.0_f64;
        for i in 0..50_000 {
            let y = cs.process(&mut state, 0.0);
            if i >= 49_000 {
                tail = tail.max(y.abs());
            }
        }
        assert!(tail < 1e-6, "impulse response did not decay: {tail}");
    }

    #[test]
    fn test_determinism_bit_for_bit() {
        let cs = peak_10db();
        let input: Vec<f64> = (0..1000).map(|i| ((i * 7919) % 1000) as f64 / 500.0 - 1.0).collect();

        let mut s1 = FilterState::new();
        let mut s2 = FilterState::new();
        for &x in &input {
            let y1 = cs.process(&mut s1, x);
            let y2 = cs.process(&mut s2, x);
            assert_eq!(y1.to_bits(), y2.to_bits());
        }
        assert_eq!(s1, s2);
    }

    #[test]
    fn test_state_independence_between_streams() {
        let cs = peak_10db();
        let stream_a: Vec<f64> = (0..500).map(|i| (i as f64 * 0.01).sin()).collect();
        let stream_b: Vec<f64> = (0..500).map(|i| (i as f64 * 0.03).cos()).collect();

        // Filter each stream alone
        let mut state = FilterState::new();
        let alone_a: Vec<f64> = stream_a.iter().map(|&x| cs.process(&mut state, x)).collect();
        let mut state = FilterState::new();
        let alone_b: Vec<f64> = stream_b.iter().map(|&x| cs.process(&mut state, x)).collect();

        // Filter them interleaved through two separately-owned states
        let mut sa = FilterState::new();
        let mut sb = FilterState::new();
        for i in 0..500 {
            let ya = cs.process(&mut sa, stream_a[i]);
            let yb = cs.process(&mut sb, stream_b[i]);
            assert_eq!(ya.to_bits(), alone_a[i].to_bits(), "cross-talk in stream A at {i}");
            assert_eq!(yb.to_bits(), alone_b[i].to_bits(), "cross-talk in stream B at {i}");
        }
    }

    #[test]
    fn test_process_block_matches_per_sample() {
        let cs = peak_10db();
        let input: Vec<f64> = (0..256).map(|i| (i as f64 * 0.05).sin()).collect();

        let mut per_sample = Filter::new(cs);
        let expected: Vec<f64> = input.iter().map(|&x| per_sample.process(x)).collect();

        let mut block = Filter::new(cs);
        let mut buffer = input.clone();
        block.process_block(&mut buffer);

        for (i, (y, e)) in buffer.iter().zip(expected.iter()).enumerate() {
            assert_eq!(y.to_bits(), e.to_bits(), "mismatch at sample {i}");
        }
    }

    #[test]
    fn test_filter_reset_reproduces_fresh_output() {
        let cs = peak_10db();
        let mut filter = Filter::new(cs);

        let first: Vec<f64> = (0..64).map(|i| filter.process(i as f64 * 0.1)).collect();
        filter.reset();
        let second: Vec<f64> = (0..64).map(|i| filter.process(i as f64 * 0.1)).collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_chirp_matches_reference_recurrence() {
        // 10000-sample quadratic chirp (0 to 2500 Hz over the nominal
        // window), same waveform the sweep driver generates.
        use std::f64::consts::TAU;

        let cs = peak_10db();
        let n = 10_000;
        let input: Vec<f64> = (0..n)
            .map(|i| {
                let t = i as f64 / n as f64;
                (0.5 * 0.5 * n as f64 * TAU * t * t).sin()
            })
            .collect();

        // Reference: the difference equation written out longhand.
        let (mut x1, mut x2, mut y1, mut y2) = (0.0_f64, 0.0_f64, 0.0_f64, 0.0_f64);
        let mut state = FilterState::new();
        for &x in &input {
            let expected = cs.b0 * x + cs.b1 * x1 + cs.b2 * x2 - cs.a1 * y1 - cs.a2 * y2;
            x2 = x1;
            x1 = x;
            y2 = y1;
            y1 = expected;

            let y = cs.process(&mut state, x);
            let tol = 1e-9 * expected.abs().max(1.0);
            assert!(
                approx_eq(y, expected, tol),
                "chirp divergence: expected {expected}, got {y}"
            );
        }
    }

    #[test]
    fn test_nonfinite_input_propagates() {
        let cs = peak_10db();
        let mut state = FilterState::new();

        let y = cs.process(&mut state, f64::NAN);
        assert!(y.is_nan());
        // The poisoned history keeps propagating, as documented.
        let y = cs.process(&mut state, 0.0);
        assert!(y.is_nan());
    }
}
