//! Sparse ternary secrets.
//!
//! A secret is a `d x columns` matrix with exactly `h` non-zero entries per
//! column. Only the positions are stored; entry `i` of a column has sign `+1`
//! when `i` is even and `-1` when `i` is odd.

use alloc::vec::Vec;

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::drng::{mask16, Drng};
use super::params::Parameters;
use crate::error::{validate, Result};
use round2_params::pqc::round2::ceil_log2;

/// Positions of the non-zero entries of a sparse ternary matrix.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub(crate) struct SparseTernary {
    columns: Vec<Vec<u16>>,
}

impl SparseTernary {
    pub(crate) fn columns(&self) -> usize {
        self.columns.len()
    }

    /// Non-zero positions of column `col`; even indices are `+1`, odd `-1`.
    pub(crate) fn column(&self, col: usize) -> &[u16] {
        &self.columns[col]
    }
}

/// Expand `seed` under `domain` into a sparse ternary `d x columns` matrix.
pub(crate) fn sparse_ternary(
    seed: &[u8],
    domain: &[u8],
    params: &Parameters,
    columns: usize,
) -> Result<SparseTernary> {
    validate::length("sparse_ternary seed", seed.len(), params.ss_size)?;

    let d = params.d;
    let mut drng = Drng::with_domain(seed, domain)?;
    let mut pool: Vec<u16> = Vec::with_capacity(d);
    let mut out = Vec::with_capacity(columns);

    for _ in 0..columns {
        // Partial Fisher-Yates: slot `i` takes a uniform pick from `pool[i..]`.
        pool.clear();
        pool.extend((0..d).map(|pos| pos as u16));
        let mut positions = Vec::with_capacity(params.h);
        for i in 0..params.h {
            let remaining = d - i;
            let mask = mask16(ceil_log2(remaining as u64));
            let j = i + usize::from(drng.next_below(mask, remaining as u32)?);
            pool.swap(i, j);
            positions.push(pool[i]);
        }
        out.push(positions);
    }

    pool.zeroize();
    Ok(SparseTernary { columns: out })
}
