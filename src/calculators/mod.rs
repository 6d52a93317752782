use crate::{Error, System, Vector3D};

mod switching;
pub use self::switching::{RationalSwitchingParameters, SwitchingFunction};

mod coordination;
pub use self::coordination::{CoordinationNumber, CoordinationParameters};

/// The result of one collective variable evaluation: the scalar value, and
/// when requested the gradient of that scalar with respect to every atom
/// position.
#[derive(Debug, Clone, PartialEq)]
pub struct CvOutput {
    /// Scalar value of the collective variable for this step
    pub value: f64,
    /// Gradient of `value` with respect to the atomic positions, one entry
    /// per atom. `None` if gradients were not requested.
    pub gradient: Option<Vec<Vector3D>>,
}

/// A `CalculatorBase` is a collective variable implementation: a pure
/// function from one step of host data to a [`CvOutput`].
///
/// Implementations own their configuration (frozen at construction) but no
/// per-step state: every call to `compute` only depends on the system passed
/// to it.
pub trait CalculatorBase: Send + Sync {
    /// Get the name of this Calculator
    fn name(&self) -> String;

    /// Get the parameters used to create this Calculator as a JSON string
    fn parameters(&self) -> String;

    /// Does this calculator compute gradients with respect to positions?
    fn supports_gradient(&self) -> bool;

    /// Core implementation of the collective variable.
    ///
    /// This function should validate the system's neighbor list before using
    /// it, and fill `CvOutput::gradient` if and only if `gradients` is true.
    fn compute(&mut self, system: &dyn System, gradients: bool) -> Result<CvOutput, Error>;
}
