//! Rounding and sparse products over `Z[x] / Phi_{n+1}(x)`.
//!
//! A product with a sparse ternary secret adds or subtracts rotated copies of
//! a dense polynomial in `Z[x] / (x^{n+1} - 1)`; subtracting the top
//! coefficient afterwards reduces the result modulo
//! `Phi_{n+1}(x) = 1 + x + ... + x^n`. With `n == 1` every polynomial is a
//! single integer and the same code performs plain matrix arithmetic.

use alloc::vec;
use alloc::vec::Vec;

use super::matrix::PublicMatrix;
use super::params::Parameters;
use super::secret::SparseTernary;

/// `R_{from -> 2^to_bits}(x) = floor((x * 2^to_bits + from / 2) / from) mod 2^to_bits`.
///
/// Uses shifts when `from` is a power of two.
pub(crate) fn round(x: u32, from: u32, to_bits: u32) -> u16 {
    let to_mask = (1u64 << to_bits) - 1;
    if from.is_power_of_two() && from.trailing_zeros() >= to_bits {
        let shift = from.trailing_zeros() - to_bits;
        let rounded = if shift == 0 {
            u64::from(x)
        } else {
            (u64::from(x) + (1u64 << (shift - 1))) >> shift
        };
        return (rounded & to_mask) as u16;
    }
    let from = u64::from(from);
    (((u64::from(x) << to_bits) + from / 2) / from & to_mask) as u16
}

/// Add `sign * x^shift * poly` into `acc` (length `n + 1`) modulo `x^{n+1} - 1`.
///
/// Entries of `acc` only grow; the caller reduces modulo `modulus` at the end.
fn accumulate(acc: &mut [u64], poly: &[u16], shift: usize, negate: bool, modulus: u64) {
    let len = acc.len();
    for (i, &c) in poly.iter().enumerate() {
        let c = u64::from(c) % modulus;
        let term = if negate { modulus - c } else { c };
        let mut idx = i + shift;
        if idx >= len {
            idx -= len;
        }
        acc[idx] += term;
    }
}

/// Reduce an accumulator modulo `Phi_{n+1}` and `modulus` into `out` (length `n`).
fn reduce_into(acc: &[u64], modulus: u64, out: &mut [u32]) {
    let n = out.len();
    let top = acc[n] % modulus;
    for (o, &a) in out.iter_mut().zip(acc.iter()) {
        *o = ((a % modulus + modulus - top) % modulus) as u32;
    }
}

/// `A * S` (or `A^T * S` when `transpose` is set) modulo `modulus`.
///
/// The result has one entry of `d` coefficients per secret column:
/// entry `col` holds `k` polynomials at `out[col * d + row * n..][..n]`.
pub(crate) fn matrix_times_sparse(
    a: &PublicMatrix,
    secret: &SparseTernary,
    transpose: bool,
    params: &Parameters,
    modulus: u32,
) -> Vec<u32> {
    let (d, n, k) = (params.d, params.n, params.k());
    let modulus = u64::from(modulus);
    let mut out = vec![0u32; secret.columns() * d];
    let mut acc = vec![0u64; n + 1];

    for col in 0..secret.columns() {
        for row in 0..k {
            acc.iter_mut().for_each(|x| *x = 0);
            for (i, &pos) in secret.column(col).iter().enumerate() {
                let block = pos as usize / n;
                let shift = pos as usize % n;
                let poly = if transpose {
                    a.poly(block, row)
                } else {
                    a.poly(row, block)
                };
                accumulate(&mut acc, poly, shift, i % 2 == 1, modulus);
            }
            let start = col * d + row * n;
            reduce_into(&acc, modulus, &mut out[start..start + n]);
        }
    }
    out
}

/// Inner products `D_i^T * S_j` of dense columns with sparse columns modulo `modulus`.
///
/// `dense` holds `dense.len() / d` columns of `d` coefficients. The result for
/// the pair `(i, j)` is the polynomial at `out[(i * columns(S) + j) * n..][..n]`.
pub(crate) fn dense_times_sparse(
    dense: &[u16],
    secret: &SparseTernary,
    params: &Parameters,
    modulus: u32,
) -> Vec<u32> {
    let (d, n) = (params.d, params.n);
    let modulus = u64::from(modulus);
    let dense_columns = dense.len() / d;
    let mut out = vec![0u32; dense_columns * secret.columns() * n];
    let mut acc = vec![0u64; n + 1];

    for i in 0..dense_columns {
        let column = &dense[i * d..(i + 1) * d];
        for j in 0..secret.columns() {
            acc.iter_mut().for_each(|x| *x = 0);
            for (idx, &pos) in secret.column(j).iter().enumerate() {
                let block = pos as usize / n;
                let shift = pos as usize % n;
                let poly = &column[block * n..(block + 1) * n];
                accumulate(&mut acc, poly, shift, idx % 2 == 1, modulus);
            }
            let start = (i * secret.columns() + j) * n;
            reduce_into(&acc, modulus, &mut out[start..start + n]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_power_of_two() {
        // 2^14 -> 2^11: divide by 8 with rounding
        assert_eq!(round(0, 1 << 14, 11), 0);
        assert_eq!(round(3, 1 << 14, 11), 0);
        assert_eq!(round(4, 1 << 14, 11), 1);
        assert_eq!(round(12, 1 << 14, 11), 2);
        // wraps to zero at the top
        assert_eq!(round((1 << 14) - 1, 1 << 14, 11), 0);
        // identity when the widths match
        assert_eq!(round(77, 1 << 7, 7), 77);
    }

    #[test]
    fn test_round_general_matches_formula() {
        let q = 3329u32;
        for x in [0u32, 1, 812, 1664, 1665, 3000, 3328] {
            let expected = ((u64::from(x) * 1024 + 1664) / 3329 % 1024) as u16;
            assert_eq!(round(x, q, 10), expected);
        }
    }

    #[test]
    fn test_round_agrees_with_general_formula_for_powers_of_two() {
        for x in 0..512u32 {
            let expected = ((u64::from(x) * 8 + 256) / 512 % 8) as u16;
            assert_eq!(round(x, 512, 3), expected);
        }
    }

    #[test]
    fn test_accumulate_reduces_modulo_cyclotomic() {
        // n = 4: multiply (1 + 2x + 3x^2 + 4x^3) by x^2 modulo 1 + x + x^2 + x^3 + x^4
        let mut acc = vec![0u64; 5];
        accumulate(&mut acc, &[1, 2, 3, 4], 2, false, 97);
        // x^2 * p = x^2 + 2x^3 + 3x^4 + 4x^5 = 4 + x^2 + 2x^3 + 3x^4 (x^5 = 1)
        assert_eq!(acc, vec![4, 0, 1, 2, 3]);
        let mut out = [0u32; 4];
        reduce_into(&acc, 97, &mut out);
        // subtract 3 * Phi
        assert_eq!(out, [1, 94, 95, 96]);
    }

    #[test]
    fn test_accumulate_negation() {
        let mut acc = vec![0u64; 2];
        accumulate(&mut acc, &[5], 0, true, 17);
        let mut out = [0u32; 1];
        reduce_into(&acc, 17, &mut out);
        assert_eq!(out, [12]);
    }
}
