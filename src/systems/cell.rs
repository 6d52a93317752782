//! The `UnitCell` type represents the enclosing box of a simulated system,
//! with some type of periodic condition.
use crate::{Matrix3, Vector3D};

/// The shape of a cell determine how we will be able to compute the periodic
/// boundaries condition.
#[derive(Debug, Clone, Copy, PartialEq)]
#[allow(clippy::module_name_repetitions)]
pub enum CellShape {
    /// Infinite unit cell, with no boundaries
    Infinite,
    /// Orthorhombic unit cell, with cuboid shape
    Orthorhombic,
    /// Triclinic unit cell, with arbitrary parallelepiped shape
    Triclinic,
}

/// An `UnitCell` defines the system physical boundaries.
///
/// The shape of the cell can be any of the [`CellShape`][CellShape], and will
/// influence how periodic boundary conditions are applied. The cell exposes
/// exactly what a collective variable needs from the host box: its defining
/// matrix, and the mapping of a displacement vector to its minimum periodic
/// image.
///
/// [CellShape]: enum.CellShape.html
#[derive(Debug, Clone, Copy, PartialEq)]
#[allow(clippy::module_name_repetitions)]
pub struct UnitCell {
    /// Unit cell matrix
    matrix: Matrix3,
    /// Transpose of the unit cell matrix, cached from matrix
    transpose: Matrix3,
    /// Inverse of the transpose of the unit cell matrix, cached from matrix
    inverse: Matrix3,
    /// Unit cell shape
    shape: CellShape,
}

impl From<Matrix3> for UnitCell {
    fn from(matrix: Matrix3) -> UnitCell {
        assert!(matrix.determinant() > 1e-6, "matrix is not invertible");

        let is_diagonal = |matrix: Matrix3| {
            let mut off_diagonal = 0.0_f64;
            for i in 0..3 {
                for j in 0..3 {
                    if i != j {
                        off_diagonal = f64::max(off_diagonal, f64::abs(matrix[i][j]));
                    }
                }
            }
            approx::abs_diff_eq!(off_diagonal, 0.0, epsilon = 1e-6)
        };

        let shape = if is_diagonal(matrix) {
            CellShape::Orthorhombic
        } else {
            CellShape::Triclinic
        };

        return UnitCell {
            matrix: matrix,
            transpose: matrix.transposed(),
            inverse: matrix.transposed().inverse(),
            shape: shape,
        };
    }
}

impl UnitCell {
    /// Create an infinite unit cell
    pub fn infinite() -> UnitCell {
        UnitCell {
            matrix: Matrix3::zero(),
            transpose: Matrix3::zero(),
            inverse: Matrix3::zero(),
            shape: CellShape::Infinite,
        }
    }

    /// Create an orthorhombic unit cell, with side lengths `a, b, c`.
    pub fn orthorhombic(a: f64, b: f64, c: f64) -> UnitCell {
        assert!(a > 0.0 && b > 0.0 && c > 0.0, "Cell lengths must be positive");
        let matrix = Matrix3::new([
            [a, 0.0, 0.0],
            [0.0, b, 0.0],
            [0.0, 0.0, c],
        ]);
        UnitCell {
            matrix: matrix,
            transpose: matrix,
            inverse: matrix.inverse(),
            shape: CellShape::Orthorhombic,
        }
    }

    /// Create a cubic unit cell, with side lengths `length, length, length`.
    pub fn cubic(length: f64) -> UnitCell {
        UnitCell::orthorhombic(length, length, length)
    }

    /// Get the cell shape
    pub fn shape(&self) -> CellShape {
        self.shape
    }

    /// Check if this unit cell is infinite, *i.e.* if it does not have
    /// periodic boundary conditions.
    pub fn is_infinite(&self) -> bool {
        self.shape() == CellShape::Infinite
    }

    /// Get the matricial representation of the unit cell
    pub fn matrix(&self) -> Matrix3 {
        self.matrix
    }

    /// Get the first length of the cell
    pub fn a(&self) -> f64 {
        match self.shape {
            CellShape::Triclinic => Vector3D::from(self.matrix[0]).norm(),
            CellShape::Orthorhombic | CellShape::Infinite => self.matrix[0][0],
        }
    }

    /// Get the second length of the cell
    pub fn b(&self) -> f64 {
        match self.shape {
            CellShape::Triclinic => Vector3D::from(self.matrix[1]).norm(),
            CellShape::Orthorhombic | CellShape::Infinite => self.matrix[1][1],
        }
    }

    /// Get the third length of the cell
    pub fn c(&self) -> f64 {
        match self.shape {
            CellShape::Triclinic => Vector3D::from(self.matrix[2]).norm(),
            CellShape::Orthorhombic | CellShape::Infinite => self.matrix[2][2],
        }
    }

    /// Get the fractional representation of the `vector` in this cell
    pub fn fractional(&self, vector: Vector3D) -> Vector3D {
        // this needs to use the inverse of the transpose of the matrix, since
        // we only have code to multiply a vector by a matrix on the left
        return self.inverse * vector;
    }

    /// Get the Cartesian representation of the `fractional` vector in this
    /// cell
    pub fn cartesian(&self, fractional: Vector3D) -> Vector3D {
        // this needs to use the inverse of the transpose of the matrix, since
        // we only have code to multiply a vector by a matrix on the left
        return self.transpose * fractional;
    }

    /// Replace `vector` by its minimum periodic image, obeying the periodic
    /// boundary conditions. For a cubic cell of side length `L`, this produce
    /// a vector with all components in `[-L/2, L/2)`.
    pub fn apply(&self, vector: &mut Vector3D) {
        match self.shape {
            CellShape::Infinite => (),
            CellShape::Orthorhombic => {
                vector.x -= f64::round(vector.x / self.a()) * self.a();
                vector.y -= f64::round(vector.y / self.b()) * self.b();
                vector.z -= f64::round(vector.z / self.c()) * self.c();
            }
            CellShape::Triclinic => {
                let mut fractional = self.fractional(*vector);
                fractional.x -= f64::round(fractional.x);
                fractional.y -= f64::round(fractional.y);
                fractional.z -= f64::round(fractional.z);
                *vector = self.cartesian(fractional);
            }
        }
    }

    /// Periodic boundary conditions distance between the point `u` and the
    /// point `v`
    pub fn distance(&self, u: Vector3D, v: Vector3D) -> f64 {
        let mut d = v - u;
        self.apply(&mut d);
        return d.norm();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::{assert_ulps_eq, assert_relative_eq};

    #[test]
    #[should_panic(expected = "Cell lengths must be positive")]
    fn negative_cubic() {
        let _ = UnitCell::cubic(-4.0);
    }

    #[test]
    #[should_panic(expected = "Cell lengths must be positive")]
    fn negative_ortho() {
        let _ = UnitCell::orthorhombic(3.0, 0.0, -5.0);
    }

    #[test]
    fn infinite() {
        let cell = UnitCell::infinite();
        assert_eq!(cell.shape(), CellShape::Infinite);
        assert!(cell.is_infinite());
        assert_eq!(cell.matrix(), Matrix3::zero());
    }

    #[test]
    fn cubic() {
        let cell = UnitCell::cubic(3.0);
        assert_eq!(cell.shape(), CellShape::Orthorhombic);
        assert!(!cell.is_infinite());

        assert_eq!(cell.a(), 3.0);
        assert_eq!(cell.b(), 3.0);
        assert_eq!(cell.c(), 3.0);
    }

    #[test]
    fn shape_detection() {
        let cell = UnitCell::from(Matrix3::new([
            [3.0, 0.0, 0.0],
            [0.0, 4.0, 0.0],
            [0.0, 0.0, 5.0],
        ]));
        assert_eq!(cell.shape(), CellShape::Orthorhombic);

        let cell = UnitCell::from(Matrix3::new([
            [3.0, 0.0, 0.0],
            [1.5, 4.0, 0.0],
            [0.0, 0.0, 5.0],
        ]));
        assert_eq!(cell.shape(), CellShape::Triclinic);
        assert_eq!(cell.a(), 3.0);
        assert_relative_eq!(cell.b(), f64::sqrt(1.5 * 1.5 + 4.0 * 4.0));
    }

    #[test]
    fn apply() {
        // Cubic unit cell
        let cell = UnitCell::cubic(10.0);
        let mut v = Vector3D::new(9.0, 18.0, -6.0);
        cell.apply(&mut v);
        assert_eq!(v, Vector3D::new(-1.0, -2.0, 4.0));

        // Orthorhombic unit cell
        let cell = UnitCell::orthorhombic(3.0, 4.0, 5.0);
        let mut v = Vector3D::new(1.0, 1.5, 6.0);
        cell.apply(&mut v);
        assert_eq!(v, Vector3D::new(1.0, 1.5, 1.0));

        // Infinite unit cell
        let cell = UnitCell::infinite();
        let mut v = Vector3D::new(1.0, 1.5, 6.0);
        cell.apply(&mut v);
        assert_eq!(v, Vector3D::new(1.0, 1.5, 6.0));

        // Triclinic unit cell with a diagonal matrix behaves as the
        // orthorhombic one
        let cell = UnitCell::from(Matrix3::new([
            [3.0, 0.0, 0.0],
            [1e-3, 4.0, 0.0],
            [0.0, 0.0, 5.0],
        ]));
        assert_eq!(cell.shape(), CellShape::Triclinic);
        let mut v = Vector3D::new(1.0, 1.5, 6.0);
        cell.apply(&mut v);
        assert_ulps_eq!(v.z, 1.0, max_ulps = 5);
    }

    #[test]
    fn distances() {
        // Orthorhombic unit cell
        let cell = UnitCell::orthorhombic(3.0, 4.0, 5.0);
        let u = Vector3D::zero();
        let v = Vector3D::new(1.0, 2.0, 6.0);
        assert_eq!(cell.distance(u, v), f64::sqrt(6.0));

        // Infinite unit cell
        let cell = UnitCell::infinite();
        assert_eq!(cell.distance(u, v), v.norm());

        // Triclinic unit cell
        let u = Vector3D::new(7.86753, 10.4541, 13.0982);
        let v = Vector3D::new(9.13177, 3.87718, 6.55355);
        let cell = UnitCell::from(Matrix3::new([
            [7.84788, 0.0,     7.84791],
            [7.84788, 7.84787, 0.0    ],
            [0.0,     7.84787, 7.84791],
        ]));
        assert_relative_eq!(cell.distance(u, v), 2.216326534538627, epsilon = 1e-12);
    }

    #[test]
    fn fractional_cartesian() {
        let cell = UnitCell::cubic(5.0);

        assert_ulps_eq!(
            cell.fractional(Vector3D::new(0.0, 10.0, 4.0)),
            Vector3D::new(0.0, 2.0, 0.8),
            max_ulps = 5
        );
        assert_ulps_eq!(
            cell.cartesian(Vector3D::new(0.0, 2.0, 0.8)),
            Vector3D::new(0.0, 10.0, 4.0),
            max_ulps = 5
        );

        let cell = UnitCell::from(Matrix3::new([
            [5.0, 0.0, 0.0],
            [2.0, 6.0, 0.0],
            [1.2, 0.3, 3.6],
        ]));
        let tests = vec![
            Vector3D::new(0.0, 10.0, 4.0),
            Vector3D::new(-5.0, 12.0, 4.9),
        ];

        for test in tests {
            let transformed = cell.cartesian(cell.fractional(test));
            assert_ulps_eq!(test, transformed, epsilon = 1e-12);
        }
    }
}
