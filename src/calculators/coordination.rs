use log::warn;

use super::{CalculatorBase, CvOutput};
use super::switching::{RationalSwitchingParameters, SwitchingFunction};
use crate::{Error, System, Vector3D};

/// Parameters for the [`CoordinationNumber`] calculator.
#[derive(Debug, Clone, Copy)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CoordinationParameters {
    /// Switching function weighting every pair of the neighbor list
    pub switching: RationalSwitchingParameters,
}

/// Switching-function-based coordination number of a periodic point cloud.
///
/// This collective variable counts how many pairs of atoms are "close", using
/// the smoothly decaying weight of a calibrated [`SwitchingFunction`] instead
/// of a hard cutoff: every pair of the host neighbor list contributes the
/// weight of its minimum image distance, and the contributions are summed
/// into a single scalar. The result is a continuous, differentiable function
/// of the positions, usable as a biasing potential through its analytical
/// gradient.
#[derive(Debug, Clone)]
pub struct CoordinationNumber {
    parameters: CoordinationParameters,
    switching: SwitchingFunction,
}

impl CoordinationNumber {
    /// Create a new `CoordinationNumber` calculator, calibrating the
    /// switching function once for the whole run.
    pub fn new(parameters: CoordinationParameters) -> Result<CoordinationNumber, Error> {
        let switching = SwitchingFunction::new(parameters.switching)?;
        return Ok(CoordinationNumber {
            parameters: parameters,
            switching: switching,
        });
    }

    /// Distance above which a pair can not contribute to the coordination
    /// number. A host pruning its neighbor list below this cutoff does not
    /// change the result.
    pub fn cutoff(&self) -> f64 {
        self.switching.dmax()
    }
}

impl CalculatorBase for CoordinationNumber {
    fn name(&self) -> String {
        "coordination number".into()
    }

    fn parameters(&self) -> String {
        serde_json::to_string(&self.parameters).expect("failed to serialize to JSON")
    }

    fn supports_gradient(&self) -> bool {
        true
    }

    #[time_graph::instrument(name = "CoordinationNumber::compute")]
    fn compute(&mut self, system: &dyn System, gradients: bool) -> Result<CvOutput, Error> {
        let positions = system.positions()?;
        let cell = system.cell()?;
        let neighbors = system.neighbor_list()?;
        neighbors.validate(positions.len())?;

        if neighbors.is_empty() {
            warn!("computing a coordination number over an empty neighbor list");
        }

        let mut value = 0.0;
        let mut gradient = if gradients {
            Some(vec![Vector3D::zero(); positions.len()])
        } else {
            None
        };

        for pair in neighbors.pairs() {
            let mut displacement = positions[pair.first] - positions[pair.second];
            cell.apply(&mut displacement);
            let distance = displacement.norm();

            value += self.switching.compute(distance);

            if let Some(ref mut gradient) = gradient {
                // a zero distance pair has no well-defined direction, and the
                // switching function is flat at 0 anyway
                if distance > 0.0 {
                    let weight_gradient = self.switching.gradient(distance) / distance;
                    gradient[pair.first] += weight_gradient * displacement;
                    gradient[pair.second] -= weight_gradient * displacement;
                }
            }
        }

        return Ok(CvOutput {
            value: value,
            gradient: gradient,
        });
    }
}
