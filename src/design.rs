//! Biquad coefficient design from the RBJ Audio-EQ-Cookbook closed forms.
//!
//! The designer is a pure function: a [`FilterType`] plus [`DesignParams`]
//! map to one set of raw [`BiquadCoeffs`], which normalize into the
//! [`Df1Coeffs`] the processing engine consumes. Frequencies are expressed
//! as a fraction of the sample rate, so the valid domain is `(0, 0.5)`
//! (strictly below Nyquist).

use std::f64::consts::PI;
use std::fmt;

use crate::error::{FilterError, Result};

/// Filter types from the RBJ cookbook family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum FilterType {
    /// Low-pass filter
    Lowpass,
    /// High-pass filter
    Highpass,
    /// Band-pass filter with constant skirt gain (peak gain = Q)
    BandpassSkirt,
    /// Band-pass filter with constant 0 dB peak gain
    BandpassPeak,
    /// Notch filter
    Notch,
    /// All-pass filter
    Allpass,
    /// Peaking (parametric) EQ filter
    Peak,
    /// Low-shelf filter
    Lowshelf,
    /// High-shelf filter
    Highshelf,
}

impl FilterType {
    /// Returns the short string representation of the filter type (e.g., "PK").
    pub fn short_name(&self) -> &'static str {
        match self {
            FilterType::Lowpass => "LP",
            FilterType::Highpass => "HP",
            FilterType::BandpassSkirt => "BPS",
            FilterType::BandpassPeak => "BP",
            FilterType::Notch => "NO",
            FilterType::Allpass => "AP",
            FilterType::Peak => "PK",
            FilterType::Lowshelf => "LS",
            FilterType::Highshelf => "HS",
        }
    }

    /// Returns the long string representation of the filter type (e.g., "Peak").
    pub fn long_name(&self) -> &'static str {
        match self {
            FilterType::Lowpass => "Lowpass",
            FilterType::Highpass => "Highpass",
            FilterType::BandpassSkirt => "BandpassSkirt",
            FilterType::BandpassPeak => "BandpassPeak",
            FilterType::Notch => "Notch",
            FilterType::Allpass => "Allpass",
            FilterType::Peak => "Peak",
            FilterType::Lowshelf => "Lowshelf",
            FilterType::Highshelf => "Highshelf",
        }
    }

    /// Returns `true` for the types whose response depends on `gain_db`
    /// (peaking and shelving filters).
    pub fn uses_gain(&self) -> bool {
        matches!(
            self,
            FilterType::Peak | FilterType::Lowshelf | FilterType::Highshelf
        )
    }
}

/// Width specification for a filter.
///
/// The cookbook expresses all three forms through the same intermediate
/// `alpha`; which form is natural depends on the filter type (Q for
/// resonant filters, bandwidth for peaking EQ, slope for shelves).
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum FilterWidth {
    /// Quality factor, dimensionless
    Q(f64),
    /// Bandwidth in octaves between the two half-gain points
    Bandwidth(f64),
    /// Shelf slope (1.0 is the steepest slope without ripple); shelving
    /// types only
    Slope(f64),
}

impl FilterWidth {
    /// The raw Q / bandwidth / slope value.
    pub fn value(&self) -> f64 {
        match *self {
            FilterWidth::Q(q) => q,
            FilterWidth::Bandwidth(bw) => bw,
            FilterWidth::Slope(s) => s,
        }
    }

    /// Translates the width into the cookbook's `alpha` parameter, given
    /// the angular frequency and the linear amplitude `A`.
    fn alpha(&self, w0: f64, sn: f64, a: f64) -> f64 {
        match *self {
            FilterWidth::Q(q) => sn / (2.0 * q),
            FilterWidth::Bandwidth(bw) => {
                sn * (0.5 * std::f64::consts::LN_2 * bw * w0 / sn).sinh()
            }
            FilterWidth::Slope(s) => {
                (sn / 2.0) * ((a + 1.0 / a) * (1.0 / s - 1.0) + 2.0).sqrt()
            }
        }
    }
}

/// Design parameters for a biquad filter.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DesignParams {
    /// Center/cutoff frequency as a fraction of the sample rate, in (0, 0.5)
    pub freq: f64,
    /// Width of the filter (Q, bandwidth, or shelf slope)
    pub width: FilterWidth,
    /// Gain in dB; used by peaking and shelving types, ignored by the others
    pub gain_db: f64,
}

impl DesignParams {
    /// Creates design parameters from a frequency already normalized by
    /// the sample rate.
    pub fn new(freq: f64, width: FilterWidth, gain_db: f64) -> Self {
        DesignParams {
            freq,
            width,
            gain_db,
        }
    }

    /// Creates design parameters from a frequency and sample rate in Hz.
    pub fn from_hz(freq_hz: f64, srate: f64, width: FilterWidth, gain_db: f64) -> Self {
        DesignParams {
            freq: freq_hz / srate,
            width,
            gain_db,
        }
    }

    /// Checks that the parameters lie in the designable domain.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidFrequency` if the frequency is outside
    /// `(0, 0.5)` or non-finite, `FilterError::InvalidWidth` if the width
    /// is non-positive or non-finite, and `FilterError::InvalidGain` if
    /// the gain is non-finite.
    pub fn validate(&self) -> Result<()> {
        if !self.freq.is_finite() || self.freq <= 0.0 || self.freq >= 0.5 {
            return Err(FilterError::InvalidFrequency { freq: self.freq });
        }

        let width = self.width.value();
        if !width.is_finite() || width <= 0.0 {
            return Err(FilterError::InvalidWidth { width });
        }

        if !self.gain_db.is_finite() {
            return Err(FilterError::InvalidGain {
                gain_db: self.gain_db,
            });
        }

        Ok(())
    }
}

impl fmt::Display for DesignParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Freq:{:.4},Width:{:?},Gain:{:.1}",
            self.freq, self.width, self.gain_db
        )
    }
}

/// Raw biquad coefficients, exactly as the cookbook equations produce
/// them, before normalization by `a0`.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BiquadCoeffs {
    /// Feed-forward (numerator) coefficients `b0, b1, b2`
    pub b: [f64; 3],
    /// Feedback (denominator) coefficients `a0, a1, a2`
    pub a: [f64; 3],
}

impl BiquadCoeffs {
    /// Evaluates the cookbook closed forms for the given type and
    /// parameters. Assumes the parameters have been validated.
    fn cookbook(filter_type: FilterType, params: &DesignParams) -> Self {
        // Intermediate variables. Gain only exists for peaking and
        // shelving types; forcing A = 1 elsewhere keeps it out of the
        // slope-alpha translation too.
        let a = if filter_type.uses_gain() {
            10.0_f64.powf(params.gain_db / 40.0)
        } else {
            1.0
        };
        let w0 = 2.0 * PI * params.freq;
        let sn = w0.sin();
        let cs = w0.cos();
        let alpha = params.width.alpha(w0, sn, a);

        let (b0, b1, b2, a0, a1, a2);

        match filter_type {
            FilterType::Lowpass => {
                b0 = (1.0 - cs) / 2.0;
                b1 = 1.0 - cs;
                b2 = (1.0 - cs) / 2.0;
                a0 = 1.0 + alpha;
                a1 = -2.0 * cs;
                a2 = 1.0 - alpha;
            }
            FilterType::Highpass => {
                b0 = (1.0 + cs) / 2.0;
                b1 = -(1.0 + cs);
                b2 = (1.0 + cs) / 2.0;
                a0 = 1.0 + alpha;
                a1 = -2.0 * cs;
                a2 = 1.0 - alpha;
            }
            FilterType::BandpassSkirt => {
                b0 = sn / 2.0;
                b1 = 0.0;
                b2 = -sn / 2.0;
                a0 = 1.0 + alpha;
                a1 = -2.0 * cs;
                a2 = 1.0 - alpha;
            }
            FilterType::BandpassPeak => {
                b0 = alpha;
                b1 = 0.0;
                b2 = -alpha;
                a0 = 1.0 + alpha;
                a1 = -2.0 * cs;
                a2 = 1.0 - alpha;
            }
            FilterType::Notch => {
                b0 = 1.0;
                b1 = -2.0 * cs;
                b2 = 1.0;
                a0 = 1.0 + alpha;
                a1 = -2.0 * cs;
                a2 = 1.0 - alpha;
            }
            FilterType::Allpass => {
                b0 = 1.0 - alpha;
                b1 = -2.0 * cs;
                b2 = 1.0 + alpha;
                a0 = 1.0 + alpha;
                a1 = -2.0 * cs;
                a2 = 1.0 - alpha;
            }
            FilterType::Peak => {
                b0 = 1.0 + (alpha * a);
                b1 = -2.0 * cs;
                b2 = 1.0 - (alpha * a);
                a0 = 1.0 + (alpha / a);
                a1 = -2.0 * cs;
                a2 = 1.0 - (alpha / a);
            }
            FilterType::Lowshelf => {
                let s2 = 2.0 * a.sqrt() * alpha;
                b0 = a * ((a + 1.0) - (a - 1.0) * cs + s2);
                b1 = 2.0 * a * ((a - 1.0) - (a + 1.0) * cs);
                b2 = a * ((a + 1.0) - (a - 1.0) * cs - s2);
                a0 = (a + 1.0) + (a - 1.0) * cs + s2;
                a1 = -2.0 * ((a - 1.0) + (a + 1.0) * cs);
                a2 = (a + 1.0) + (a - 1.0) * cs - s2;
            }
            FilterType::Highshelf => {
                let s2 = 2.0 * a.sqrt() * alpha;
                b0 = a * ((a + 1.0) + (a - 1.0) * cs + s2);
                b1 = -2.0 * a * ((a - 1.0) + (a + 1.0) * cs);
                b2 = a * ((a + 1.0) + (a - 1.0) * cs - s2);
                a0 = (a + 1.0) - (a - 1.0) * cs + s2;
                a1 = 2.0 * ((a - 1.0) - (a + 1.0) * cs);
                a2 = (a + 1.0) - (a - 1.0) * cs - s2;
            }
        }

        BiquadCoeffs {
            b: [b0, b1, b2],
            a: [a0, a1, a2],
        }
    }

    /// Divides the numerator and feedback terms through by `a0`, yielding
    /// the five-coefficient form the engine runs.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::DegenerateCoefficients` if `a0` is zero or
    /// non-finite.
    pub fn normalize(&self) -> Result<Df1Coeffs> {
        let a0 = self.a[0];
        if !a0.is_finite() || a0 == 0.0 {
            return Err(FilterError::DegenerateCoefficients { a0 });
        }

        Ok(Df1Coeffs {
            b0: self.b[0] / a0,
            b1: self.b[1] / a0,
            b2: self.b[2] / a0,
            a1: self.a[1] / a0,
            a2: self.a[2] / a0,
        })
    }
}

/// Normalized biquad coefficients, ready for the Direct-Form-1 recurrence.
///
/// Immutable once designed; share freely across threads and pair with one
/// [`FilterState`](crate::FilterState) per stream.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Df1Coeffs {
    /// Feed-forward coefficient on `x[n]`
    pub b0: f64,
    /// Feed-forward coefficient on `x[n-1]`
    pub b1: f64,
    /// Feed-forward coefficient on `x[n-2]`
    pub b2: f64,
    /// Feedback coefficient on `y[n-1]`
    pub a1: f64,
    /// Feedback coefficient on `y[n-2]`
    pub a2: f64,
}

/// Designs a filter: validates the parameters, evaluates the cookbook
/// equations for the given type, and normalizes the result.
///
/// Pure and deterministic; identical inputs always yield identical
/// coefficients.
///
/// # Errors
///
/// See [`DesignParams::validate`] and [`BiquadCoeffs::normalize`].
///
/// # Example
///
/// ```rust
/// use biquad_eq::{design, DesignParams, FilterType, FilterWidth};
///
/// let params = DesignParams::new(0.01, FilterWidth::Q(1.0), 10.0);
/// let coeffs = design(FilterType::Peak, &params).expect("valid parameters");
/// assert!(coeffs.b0.is_finite());
/// ```
pub fn design(filter_type: FilterType, params: &DesignParams) -> Result<Df1Coeffs> {
    params.validate()?;
    BiquadCoeffs::cookbook(filter_type, params).normalize()
}
