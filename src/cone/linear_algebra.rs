//! Exact linear algebra over integer matrices.
//!
//! Elimination is performed over `BigRational`; results are scaled back to integer vectors
//! in lowest terms.

use num::bigint::BigInt;
use num::integer::Integer;
use num::rational::BigRational;
use num::traits::{One, Signed, Zero};

/// Reduced row echelon form of `matrix` (with `cols` columns), together with the list of
/// pivot columns. Rows shorter than `cols` are padded with zeros.
pub(crate) fn reduced_row_echelon(
    matrix: &[Vec<BigInt>],
    cols: usize,
) -> (Vec<Vec<BigRational>>, Vec<usize>) {
    let mut rref = matrix
        .iter()
        .map(|row| {
            (0..cols)
                .map(|idx| {
                    BigRational::from_integer(row.get(idx).cloned().unwrap_or_else(BigInt::zero))
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    let rows = rref.len();

    let mut pivot_cols = Vec::new();
    let mut pivot_row = 0usize;
    for col in 0..cols {
        if pivot_row >= rows {
            break;
        }
        let Some(row_idx) = (pivot_row..rows).find(|row| !rref[*row][col].is_zero()) else {
            continue;
        };
        if row_idx != pivot_row {
            rref.swap(row_idx, pivot_row);
        }

        let pivot_value = rref[pivot_row][col].clone();
        for value in rref[pivot_row].iter_mut() {
            *value /= pivot_value.clone();
        }

        for row in 0..rows {
            if row == pivot_row {
                continue;
            }
            let factor = rref[row][col].clone();
            if factor.is_zero() {
                continue;
            }
            for inner_col in col..cols {
                let adjustment = rref[pivot_row][inner_col].clone() * factor.clone();
                rref[row][inner_col] -= adjustment;
            }
        }

        pivot_cols.push(col);
        pivot_row += 1;
    }

    rref.truncate(pivot_row);
    (rref, pivot_cols)
}

/// The rank of `matrix` (with `cols` columns).
pub(crate) fn rank(matrix: &[Vec<BigInt>], cols: usize) -> usize {
    reduced_row_echelon(matrix, cols).1.len()
}

/// An integer basis of `{x : matrix * x = 0}`. Each basis vector is in lowest terms.
pub(crate) fn nullspace(matrix: &[Vec<BigInt>], cols: usize) -> Vec<Vec<BigInt>> {
    let (rref, pivot_cols) = reduced_row_echelon(matrix, cols);

    let mut pivot_flags = vec![false; cols];
    for &col in &pivot_cols {
        pivot_flags[col] = true;
    }

    (0..cols)
        .filter(|col| !pivot_flags[*col])
        .map(|free_col| {
            let mut vector = vec![BigRational::zero(); cols];
            vector[free_col] = BigRational::one();
            for (pivot_index, &pivot_col) in pivot_cols.iter().enumerate() {
                let coeff = &rref[pivot_index][free_col];
                if !coeff.is_zero() {
                    vector[pivot_col] = -coeff.clone();
                }
            }
            normalize(rational_vector_to_integer(vector))
        })
        .collect()
}

pub(crate) fn dot(left: &[BigInt], right: &[BigInt]) -> BigInt {
    left.iter().zip(right).map(|(a, b)| a * b).sum()
}

/// Divide all entries by their greatest common divisor. The sign is preserved and the zero
/// vector is returned unchanged.
pub(crate) fn normalize(mut vector: Vec<BigInt>) -> Vec<BigInt> {
    let mut gcd = BigInt::zero();
    for value in &vector {
        if value.is_zero() {
            continue;
        }
        let abs = value.abs();
        gcd = if gcd.is_zero() { abs } else { gcd.gcd(&abs) };
    }

    if !gcd.is_zero() && !gcd.is_one() {
        for value in &mut vector {
            *value /= &gcd;
        }
    }

    vector
}

fn rational_vector_to_integer(vector: Vec<BigRational>) -> Vec<BigInt> {
    let lcm = vector
        .iter()
        .fold(BigInt::one(), |lcm, value| lcm.lcm(value.denom()));

    vector
        .into_iter()
        .map(|value| value.numer() * (&lcm / value.denom()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: &[i64]) -> Vec<BigInt> {
        values.iter().map(|it| BigInt::from(*it)).collect()
    }

    #[test]
    fn test_rank_and_nullspace() {
        let matrix = vec![row(&[1, 2, 3]), row(&[2, 4, 6]), row(&[0, 1, 1])];
        assert_eq!(rank(&matrix, 3), 2);

        let basis = nullspace(&matrix, 3);
        assert_eq!(basis, vec![row(&[-1, -1, 1])]);
        for vector in &basis {
            for r in &matrix {
                assert!(dot(r, vector).is_zero());
            }
        }
    }

    #[test]
    fn test_nullspace_of_empty_matrix() {
        assert_eq!(
            nullspace(&[], 2),
            vec![row(&[1, 0]), row(&[0, 1])],
            "Without constraints, the nullspace is the whole space"
        );
        assert!(nullspace(&[row(&[1, 0]), row(&[0, 3])], 2).is_empty());
    }

    #[test]
    fn test_nullspace_scales_fractions() {
        // 2x - 3y = 0 has the integer solution (3, 2).
        assert_eq!(nullspace(&[row(&[2, -3])], 2), vec![row(&[3, 2])]);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(row(&[4, -6, 0])), row(&[2, -3, 0]));
        assert_eq!(normalize(row(&[0, 0])), row(&[0, 0]));
        assert_eq!(normalize(row(&[-5])), row(&[-1]));
    }
}
