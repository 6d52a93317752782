use std::collections::HashSet;

use crate::{Error, Vector3D};

mod cell;
pub use self::cell::{UnitCell, CellShape};

mod simple_system;
pub use self::simple_system::SimpleSystem;

#[cfg(test)]
pub(crate) mod test_utils;

/// Pair of atoms coming from a neighbor list.
///
/// A pair is unordered: `i-j` and `j-i` refer to the same pair, and a
/// neighbor list should only contain one of the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pair {
    /// index of the first atom in the pair
    pub first: usize,
    /// index of the second atom in the pair
    pub second: usize,
}

/// How a neighbor list relates to the full set of pairs in a system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeighborListMode {
    /// The list contains every pair in the system, i.e. exactly
    /// `n * (n - 1) / 2` pairs for `n` atoms
    Exhaustive,
    /// The list was pruned (typically with a distance cutoff) and contains at
    /// most `n * (n - 1) / 2` pairs
    Pruned,
}

/// List of candidate atom pairs to evaluate, produced by the host once per
/// simulation step.
///
/// The list declares whether it is exhaustive or pruned, and [`validate`]
/// checks the corresponding size bound together with the indices themselves
/// against a given number of atoms.
///
/// [`validate`]: NeighborList::validate
#[derive(Debug, Clone)]
pub struct NeighborList {
    mode: NeighborListMode,
    pairs: Vec<Pair>,
}

impl NeighborList {
    /// Create a new `NeighborList` with the given `mode` and `pairs`
    pub fn new(mode: NeighborListMode, pairs: Vec<Pair>) -> NeighborList {
        NeighborList { mode, pairs }
    }

    /// Create an exhaustive `NeighborList` over `n_atoms` atoms, containing
    /// all `n_atoms * (n_atoms - 1) / 2` pairs
    pub fn exhaustive(n_atoms: usize) -> NeighborList {
        let mut pairs = Vec::with_capacity(n_atoms * n_atoms.saturating_sub(1) / 2);
        for first in 0..n_atoms {
            for second in (first + 1)..n_atoms {
                pairs.push(Pair { first, second });
            }
        }
        NeighborList {
            mode: NeighborListMode::Exhaustive,
            pairs: pairs,
        }
    }

    /// Get the mode declared by this neighbor list
    pub fn mode(&self) -> NeighborListMode {
        self.mode
    }

    /// Get the pairs in this neighbor list
    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    /// Get the number of pairs in this neighbor list
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Check if this neighbor list contains no pairs
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Check that this neighbor list is consistent with a system containing
    /// `n_atoms` atoms.
    ///
    /// This verifies that all indices are in range, that the list contains no
    /// self pairs and no duplicated pairs, and that the number of pairs
    /// matches the declared mode. Any failure is reported as
    /// `Error::ContractViolation` naming the offending pair or count.
    pub fn validate(&self, n_atoms: usize) -> Result<(), Error> {
        let mut seen = HashSet::with_capacity(self.pairs.len());
        for pair in &self.pairs {
            if pair.first >= n_atoms || pair.second >= n_atoms {
                return Err(Error::ContractViolation(format!(
                    "neighbor list pair {}-{} is out of range for a system with {} atoms",
                    pair.first, pair.second, n_atoms
                )));
            }

            if pair.first == pair.second {
                return Err(Error::ContractViolation(format!(
                    "neighbor list contains the self pair {}-{}",
                    pair.first, pair.second
                )));
            }

            let canonical = (
                usize::min(pair.first, pair.second),
                usize::max(pair.first, pair.second),
            );
            if !seen.insert(canonical) {
                return Err(Error::ContractViolation(format!(
                    "neighbor list contains the pair {}-{} more than once",
                    canonical.0, canonical.1
                )));
            }
        }

        let bound = n_atoms * n_atoms.saturating_sub(1) / 2;
        match self.mode {
            NeighborListMode::Exhaustive => {
                if self.pairs.len() != bound {
                    return Err(Error::ContractViolation(format!(
                        "exhaustive neighbor list over {} atoms should contain {} pairs, got {}",
                        n_atoms, bound, self.pairs.len()
                    )));
                }
            }
            NeighborListMode::Pruned => {
                // uniqueness already guarantees len() <= bound, this is kept
                // as a sanity check
                debug_assert!(self.pairs.len() <= bound);
            }
        }

        return Ok(());
    }
}

/// A `System` is the read-only view of a simulation step handed over by the
/// host engine: current positions, the unit cell, and the candidate pairs to
/// evaluate.
///
/// Calculators only borrow this data for the duration of a single `compute`
/// call; the host is free to invalidate or reallocate everything between
/// steps.
pub trait System: Send + Sync {
    /// Get the number of atoms in this system
    fn size(&self) -> Result<usize, Error>;

    /// Get the positions for all atoms in this system. The returned value
    /// must be a slice of length `self.size()` containing the Cartesian
    /// coordinates of all atoms in the system.
    fn positions(&self) -> Result<&[Vector3D], Error>;

    /// Get the unit cell for this system
    fn cell(&self) -> Result<UnitCell, Error>;

    /// Get the neighbor list for the current step. The list should only
    /// contain each pair once (and not twice as `i-j` and `j-i`), and should
    /// not contain self pairs (`i-i`).
    fn neighbor_list(&self) -> Result<&NeighborList, Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhaustive_list() {
        let list = NeighborList::exhaustive(4);
        assert_eq!(list.mode(), NeighborListMode::Exhaustive);
        assert_eq!(list.len(), 6);
        assert_eq!(list.pairs()[0], Pair { first: 0, second: 1 });
        assert_eq!(list.pairs()[5], Pair { first: 2, second: 3 });
        list.validate(4).unwrap();

        let empty = NeighborList::exhaustive(0);
        assert!(empty.is_empty());
        empty.validate(0).unwrap();
    }

    #[test]
    fn validate_out_of_range() {
        let list = NeighborList::new(NeighborListMode::Pruned, vec![
            Pair { first: 0, second: 99 },
        ]);
        let error = list.validate(6).unwrap_err();
        assert_eq!(
            error.to_string(),
            "contract violation: neighbor list pair 0-99 is out of range for a system with 6 atoms"
        );
    }

    #[test]
    fn validate_self_pair() {
        let list = NeighborList::new(NeighborListMode::Pruned, vec![
            Pair { first: 2, second: 2 },
        ]);
        let error = list.validate(6).unwrap_err();
        assert_eq!(
            error.to_string(),
            "contract violation: neighbor list contains the self pair 2-2"
        );
    }

    #[test]
    fn validate_duplicate() {
        // the second pair is the same as the first one, in reversed order
        let list = NeighborList::new(NeighborListMode::Pruned, vec![
            Pair { first: 0, second: 1 },
            Pair { first: 1, second: 0 },
        ]);
        let error = list.validate(6).unwrap_err();
        assert_eq!(
            error.to_string(),
            "contract violation: neighbor list contains the pair 0-1 more than once"
        );
    }

    #[test]
    fn validate_exhaustive_count() {
        let list = NeighborList::new(NeighborListMode::Exhaustive, vec![
            Pair { first: 0, second: 1 },
        ]);
        let error = list.validate(3).unwrap_err();
        assert_eq!(
            error.to_string(),
            "contract violation: exhaustive neighbor list over 3 atoms should contain 3 pairs, got 1"
        );

        // the same list is fine when declared as pruned
        let list = NeighborList::new(NeighborListMode::Pruned, list.pairs().to_vec());
        list.validate(3).unwrap();
    }
}
