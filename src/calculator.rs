use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use crate::{Error, System};
use crate::calculators::{CalculatorBase, CvOutput};

/// A `Calculator` is the host-facing front-end over a registered collective
/// variable implementation.
///
/// Hosts create calculators by name with JSON parameters (see
/// [`Calculator::new`]), and invoke [`Calculator::compute`] once per
/// simulation step with the current system data.
pub struct Calculator {
    implementation: Box<dyn CalculatorBase>,
    parameters: String,
}

impl std::fmt::Debug for Calculator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Calculator")
            .field("name", &self.implementation.name())
            .field("parameters", &self.parameters)
            .finish()
    }
}

/// Parameters specific to a single call to `compute`
#[derive(Debug, Clone, Copy)]
pub struct CalculationOptions {
    /// Should the gradient of the collective variable with respect to the
    /// atomic positions be computed as well?
    pub gradients: bool,
}

impl Default for CalculationOptions {
    fn default() -> CalculationOptions {
        CalculationOptions {
            gradients: false,
        }
    }
}

impl From<Box<dyn CalculatorBase>> for Calculator {
    fn from(implementation: Box<dyn CalculatorBase>) -> Calculator {
        let parameters = implementation.parameters();
        Calculator {
            implementation: implementation,
            parameters: parameters,
        }
    }
}

impl Calculator {
    /// Create a new calculator with the given `name` and `parameters`.
    ///
    /// The `parameters` should be formatted as JSON.
    ///
    /// # Errors
    ///
    /// This function returns an error if there is no registered calculator
    /// with the given `name`, or if the parameters are invalid for this
    /// calculator.
    pub fn new(name: &str, parameters: String) -> Result<Calculator, Error> {
        let creator = match REGISTERED_CALCULATORS.get(name) {
            Some(creator) => creator,
            None => {
                return Err(Error::InvalidParameter(
                    format!("unknown calculator with name '{}'", name)
                ));
            }
        };

        return Ok(Calculator {
            implementation: creator(&parameters)?,
            parameters: parameters,
        });
    }

    /// Get the name of this calculator
    pub fn name(&self) -> String {
        self.implementation.name()
    }

    /// Get the parameters used to create this calculator in a string,
    /// formatted as JSON.
    pub fn parameters(&self) -> &str {
        &self.parameters
    }

    /// Compute the collective variable for one step of host data.
    ///
    /// This is a pure function of the `system`: no state survives the call
    /// beyond the parameters frozen when the calculator was created.
    #[time_graph::instrument(name = "Calculator::compute")]
    pub fn compute(
        &mut self,
        system: &dyn System,
        options: CalculationOptions,
    ) -> Result<CvOutput, Error> {
        if options.gradients && !self.implementation.supports_gradient() {
            return Err(Error::InvalidParameter(format!(
                "the {} calculator does not support gradients with respect to positions",
                self.name()
            )));
        }

        return self.implementation.compute(system, options.gradients);
    }
}

// Registration of calculator implementations
use crate::calculators::{CoordinationNumber, CoordinationParameters};
type CalculatorCreator = fn(&str) -> Result<Box<dyn CalculatorBase>, Error>;

macro_rules! add_calculator {
    ($map :expr, $name :literal, $type :ty, $parameters :ty) => (
        $map.insert($name, (|json| {
            let parameters = serde_json::from_str::<$parameters>(json)?;
            Ok(Box::new(<$type>::new(parameters)?))
        }) as CalculatorCreator);
    );
}

static REGISTERED_CALCULATORS: Lazy<BTreeMap<&'static str, CalculatorCreator>> = Lazy::new(|| {
    let mut map = BTreeMap::new();
    add_calculator!(map, "coordination_number", CoordinationNumber, CoordinationParameters);
    return map;
});
