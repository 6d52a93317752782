use log::debug;

use crate::Error;

fn default_tolerance() -> f64 {
    1e-5
}

/// Parameters of a rational switching function (see [`SwitchingFunction`]).
#[derive(Debug, Clone, Copy)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RationalSwitchingParameters {
    /// Exponent of the rational decay, must be positive and different from
    /// `m`
    pub n: i32,
    /// Exponent controlling where the decay is considered negligible, must be
    /// different from `n`
    pub m: i32,
    /// Offset radius added to the calibrated cutoff
    pub d0: f64,
    /// Decay radius, must be positive
    pub r0: f64,
    /// Value under which the uncalibrated decay is considered to have reached
    /// zero, defining the calibrated cutoff `dmax`
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

impl RationalSwitchingParameters {
    /// Validate the parameters, returning `Error::InvalidParameter` naming
    /// the offending parameter if they can not define a switching function.
    pub fn validate(&self) -> Result<(), Error> {
        if self.n <= 0 {
            return Err(Error::InvalidParameter(format!(
                "expected a positive exponent n for the rational switching function, got n={}",
                self.n
            )));
        }

        if self.n == self.m {
            return Err(Error::InvalidParameter(format!(
                "the exponents of the rational switching function must differ, got n=m={}",
                self.n
            )));
        }

        if self.r0 <= 0.0 || !self.r0.is_finite() {
            return Err(Error::InvalidParameter(format!(
                "expected a positive decay radius r0 for the rational switching function, got r0={}",
                self.r0
            )));
        }

        if self.d0 < 0.0 || !self.d0.is_finite() {
            return Err(Error::InvalidParameter(format!(
                "expected a non-negative offset radius d0 for the rational switching function, got d0={}",
                self.d0
            )));
        }

        if !(self.tolerance > 0.0 && self.tolerance < 1.0) {
            return Err(Error::InvalidParameter(format!(
                "expected a tolerance between 0 and 1 for the rational switching function, got {}",
                self.tolerance
            )));
        }

        return Ok(());
    }

    /// Evaluate the uncalibrated rational decay `1 / (1 + (d/r0)^n)` at the
    /// distance `d`, without any cutoff.
    fn raw(&self, distance: f64) -> f64 {
        let rdist = distance / self.r0;
        let rndist = rdist.powi(self.n - 1);
        return 1.0 / (1.0 + rdist * rndist);
    }
}

/// A smooth, monotonically decaying weight function turning a hard distance
/// cutoff into a differentiable one.
///
/// The weight follows a rational decay `1 / (1 + (d/r0)^n)`, stretched and
/// shifted at construction time so that it is exactly 1 at distance 0 and
/// exactly 0 at the cutoff `dmax = d0 + r0 * tolerance^(1/(n - m))`, the
/// distance where the uncalibrated decay falls under `tolerance`. Beyond
/// `dmax` the weight is clamped to zero.
///
/// Construction is two-phase: the uncalibrated decay is probed at the two
/// distances 0 and `dmax`, and the resulting stretch and shift are frozen in
/// the returned function. No state changes after construction.
#[derive(Debug, Clone, Copy)]
pub struct SwitchingFunction {
    parameters: RationalSwitchingParameters,
    dmax: f64,
    stretch: f64,
    shift: f64,
}

impl SwitchingFunction {
    /// Calibrate a new `SwitchingFunction` from the given `parameters`.
    pub fn new(parameters: RationalSwitchingParameters) -> Result<SwitchingFunction, Error> {
        parameters.validate()?;

        let exponent = 1.0 / f64::from(parameters.n - parameters.m);
        let dmax = parameters.d0 + parameters.r0 * parameters.tolerance.powf(exponent);

        let s0 = parameters.raw(0.0);
        let s1 = parameters.raw(dmax);
        if s0 == s1 {
            return Err(Error::InvalidParameter(format!(
                "degenerate rational switching function: the decay takes the \
                same value {} at distance 0 and at the cutoff {}",
                s0, dmax
            )));
        }

        let stretch = 1.0 / (s0 - s1);
        let shift = -s1 * stretch;
        debug!(
            "calibrated rational switching function: dmax={}, stretch={}, shift={}",
            dmax, stretch, shift
        );

        return Ok(SwitchingFunction {
            parameters: parameters,
            dmax: dmax,
            stretch: stretch,
            shift: shift,
        });
    }

    /// Get the parameters used to calibrate this function
    pub fn parameters(&self) -> &RationalSwitchingParameters {
        &self.parameters
    }

    /// Get the calibrated cutoff distance, above which the weight is zero
    pub fn dmax(&self) -> f64 {
        self.dmax
    }

    /// Evaluate the switching function at the given `distance`.
    ///
    /// The result is in `[0, 1]`, with `compute(0) == 1` and
    /// `compute(d) == 0` for all `d >= dmax`.
    pub fn compute(&self, distance: f64) -> f64 {
        if distance > self.dmax {
            return 0.0;
        }
        return self.stretch * self.parameters.raw(distance) + self.shift;
    }

    /// Evaluate the derivative of the switching function with respect to the
    /// `distance`.
    pub fn gradient(&self, distance: f64) -> f64 {
        if distance <= 0.0 || distance > self.dmax {
            return 0.0;
        }

        let n = self.parameters.n;
        let rdist = distance / self.parameters.r0;
        let rndist = rdist.powi(n - 1);
        let denominator = 1.0 + rdist * rndist;
        return -self.stretch * f64::from(n) * rndist
            / (self.parameters.r0 * denominator * denominator);
    }
}
