use std::ops::{Index, IndexMut, Mul};

use super::Vector3D;

/// A 3x3 matrix type, used to represent unit cells and related transforms.
///
/// The matrix is stored in row-major order, and indexing it with a single
/// `usize` returns the corresponding row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix3([[f64; 3]; 3]);

impl Matrix3 {
    /// Create a new `Matrix3` from the given data
    pub fn new(data: [[f64; 3]; 3]) -> Matrix3 {
        Matrix3(data)
    }

    /// Create a new null `Matrix3`
    pub fn zero() -> Matrix3 {
        Matrix3([[0.0; 3]; 3])
    }

    /// Create an identity `Matrix3`
    pub fn one() -> Matrix3 {
        Matrix3([
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ])
    }

    /// Compute the determinant of this matrix
    pub fn determinant(&self) -> f64 {
        self[0][0] * (self[1][1] * self[2][2] - self[2][1] * self[1][2])
            - self[0][1] * (self[1][0] * self[2][2] - self[1][2] * self[2][0])
            + self[0][2] * (self[1][0] * self[2][1] - self[1][1] * self[2][0])
    }

    /// Get the transpose of this matrix
    pub fn transposed(&self) -> Matrix3 {
        Matrix3([
            [self[0][0], self[1][0], self[2][0]],
            [self[0][1], self[1][1], self[2][1]],
            [self[0][2], self[1][2], self[2][2]],
        ])
    }

    /// Compute the inverse of this matrix.
    ///
    /// # Panics
    ///
    /// If the matrix is not invertible, i.e. if its determinant is zero.
    pub fn inverse(&self) -> Matrix3 {
        let determinant = self.determinant();
        assert!(determinant != 0.0, "this matrix is not invertible");

        let inv_det = 1.0 / determinant;
        let mut inverse = Matrix3::zero();
        inverse[0][0] = inv_det * (self[1][1] * self[2][2] - self[2][1] * self[1][2]);
        inverse[0][1] = inv_det * (self[0][2] * self[2][1] - self[0][1] * self[2][2]);
        inverse[0][2] = inv_det * (self[0][1] * self[1][2] - self[0][2] * self[1][1]);
        inverse[1][0] = inv_det * (self[1][2] * self[2][0] - self[1][0] * self[2][2]);
        inverse[1][1] = inv_det * (self[0][0] * self[2][2] - self[0][2] * self[2][0]);
        inverse[1][2] = inv_det * (self[1][0] * self[0][2] - self[0][0] * self[1][2]);
        inverse[2][0] = inv_det * (self[1][0] * self[2][1] - self[2][0] * self[1][1]);
        inverse[2][1] = inv_det * (self[2][0] * self[0][1] - self[0][0] * self[2][1]);
        inverse[2][2] = inv_det * (self[0][0] * self[1][1] - self[1][0] * self[0][1]);
        return inverse;
    }
}

impl Index<usize> for Matrix3 {
    type Output = [f64; 3];

    fn index(&self, index: usize) -> &[f64; 3] {
        &self.0[index]
    }
}

impl IndexMut<usize> for Matrix3 {
    fn index_mut(&mut self, index: usize) -> &mut [f64; 3] {
        &mut self.0[index]
    }
}

/// Matrix-vector product
impl Mul<Vector3D> for Matrix3 {
    type Output = Vector3D;

    fn mul(self, vector: Vector3D) -> Vector3D {
        Vector3D::new(
            self[0][0] * vector.x + self[0][1] * vector.y + self[0][2] * vector.z,
            self[1][0] * vector.x + self[1][1] * vector.y + self[1][2] * vector.z,
            self[2][0] * vector.x + self[2][1] * vector.y + self[2][2] * vector.z,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn determinant() {
        let matrix = Matrix3::new([
            [2.0, 0.0, 0.0],
            [0.0, 3.0, 0.0],
            [0.0, 0.0, 4.0],
        ]);
        assert_eq!(matrix.determinant(), 24.0);
        assert_eq!(Matrix3::one().determinant(), 1.0);
        assert_eq!(Matrix3::zero().determinant(), 0.0);
    }

    #[test]
    fn transposed() {
        let matrix = Matrix3::new([
            [1.0, 2.0, 3.0],
            [4.0, 5.0, 6.0],
            [7.0, 8.0, 9.0],
        ]);
        let transposed = matrix.transposed();
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(matrix[i][j], transposed[j][i]);
            }
        }
    }

    #[test]
    fn inverse() {
        let matrix = Matrix3::new([
            [2.0, 1.0, 0.0],
            [0.0, 3.0, 1.0],
            [1.0, 0.0, 4.0],
        ]);
        let inverse = matrix.inverse();
        let product = [
            matrix * Vector3D::new(inverse[0][0], inverse[1][0], inverse[2][0]),
            matrix * Vector3D::new(inverse[0][1], inverse[1][1], inverse[2][1]),
            matrix * Vector3D::new(inverse[0][2], inverse[1][2], inverse[2][2]),
        ];

        for (i, column) in product.iter().enumerate() {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_relative_eq!(column[j], expected, epsilon = 1e-12);
            }
        }
    }

    #[test]
    #[should_panic(expected = "this matrix is not invertible")]
    fn inverse_singular() {
        let _ = Matrix3::zero().inverse();
    }

    #[test]
    fn matrix_vector_product() {
        let matrix = Matrix3::new([
            [1.0, 2.0, 3.0],
            [4.0, 5.0, 6.0],
            [7.0, 8.0, 9.0],
        ]);
        let vector = Vector3D::new(1.0, -1.0, 2.0);
        assert_eq!(matrix * vector, Vector3D::new(5.0, 11.0, 17.0));
    }
}
