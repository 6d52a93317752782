use crate::{Error, Vector3D};

use super::{NeighborList, NeighborListMode, Pair, System, UnitCell};

/// A simple implementation of `System` to use when no other is available
#[derive(Clone, Debug)]
pub struct SimpleSystem {
    cell: UnitCell,
    positions: Vec<Vector3D>,
    neighbors: Option<NeighborList>,
}

impl SimpleSystem {
    /// Create a new empty system with the given unit cell
    pub fn new(cell: UnitCell) -> SimpleSystem {
        SimpleSystem {
            cell: cell,
            positions: Vec::new(),
            neighbors: None,
        }
    }

    /// Add an atom at the given position to this system
    pub fn add_atom(&mut self, position: Vector3D) {
        // any change to the positions invalidates the neighbor list
        self.neighbors = None;
        self.positions.push(position);
    }

    /// Build the exhaustive neighbor list containing all pairs of atoms in
    /// this system, and store it for later access with `neighbor_list`.
    pub fn compute_exhaustive_neighbors(&mut self) {
        self.neighbors = Some(NeighborList::exhaustive(self.positions.len()));
    }

    /// Build a neighbor list containing only the pairs closer than `cutoff`
    /// (using the minimum image distance), and store it for later access with
    /// `neighbor_list`.
    pub fn compute_neighbors(&mut self, cutoff: f64) -> Result<(), Error> {
        if cutoff <= 0.0 || !cutoff.is_finite() {
            return Err(Error::InvalidParameter(format!(
                "expected a positive cutoff when computing neighbors, got {}", cutoff
            )));
        }

        let mut pairs = Vec::new();
        for first in 0..self.positions.len() {
            for second in (first + 1)..self.positions.len() {
                let distance = self.cell.distance(
                    self.positions[first], self.positions[second]
                );
                if distance <= cutoff {
                    pairs.push(Pair { first, second });
                }
            }
        }

        self.neighbors = Some(NeighborList::new(NeighborListMode::Pruned, pairs));
        return Ok(());
    }

    /// Replace the neighbor list of this system with one built by the host.
    pub fn set_neighbor_list(&mut self, neighbors: NeighborList) {
        self.neighbors = Some(neighbors);
    }

    #[cfg(test)]
    pub(crate) fn positions_mut(&mut self) -> &mut [Vector3D] {
        // any position access invalidates the neighbor list
        self.neighbors = None;
        return &mut self.positions;
    }

    #[cfg(test)]
    pub(crate) fn set_cell(&mut self, cell: UnitCell) {
        // cell change invalidate the neighbor list
        self.neighbors = None;
        self.cell = cell;
    }
}

impl System for SimpleSystem {
    fn size(&self) -> Result<usize, Error> {
        Ok(self.positions.len())
    }

    fn positions(&self) -> Result<&[Vector3D], Error> {
        Ok(&self.positions)
    }

    fn cell(&self) -> Result<UnitCell, Error> {
        Ok(self.cell)
    }

    fn neighbor_list(&self) -> Result<&NeighborList, Error> {
        self.neighbors.as_ref().ok_or_else(|| Error::Internal(
            "neighbor list is not initialized".into()
        ))
    }
}
