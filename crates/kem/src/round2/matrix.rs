//! Public matrix / polynomial generation.
//!
//! `A` holds `k * k` polynomials of `n` coefficients each, stored row-major:
//! polynomial `(row, col)` occupies `coeffs[(row * k + col) * n..][..n]`.
//! For non-ring sets this is a plain `d x d` matrix, for ring sets a single
//! polynomial of `d` coefficients.

use alloc::vec::Vec;

use super::drng::{mask16, Drng, DOMAIN_MATRIX};
use super::params::{Parameters, Variant};
use crate::error::{validate, Error, Result};

/// The public matrix `A` together with the seed it was expanded from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicMatrix {
    seed: Vec<u8>,
    k: usize,
    n: usize,
    coeffs: Vec<u16>,
}

impl PublicMatrix {
    /// Seed the matrix was expanded from.
    pub fn seed(&self) -> &[u8] {
        &self.seed
    }

    /// All coefficients, row-major.
    pub fn coefficients(&self) -> &[u16] {
        &self.coeffs
    }

    /// Polynomial at `(row, col)`.
    pub(crate) fn poly(&self, row: usize, col: usize) -> &[u16] {
        let start = (row * self.k + col) * self.n;
        &self.coeffs[start..start + self.n]
    }

    /// Whether this matrix was expanded from `seed` for a set shaped like `params`.
    pub fn matches(&self, seed: &[u8], params: &Parameters) -> bool {
        self.seed == seed && self.k == params.k() && self.n == params.n
    }

    /// Restore a non-ring matrix from little-endian `u16` values.
    ///
    /// `seed` is recorded as the matrix seed; the values must all lie in `[0, q)`.
    pub fn from_fixed_bytes(seed: &[u8], bytes: &[u8], params: &Parameters) -> Result<Self> {
        validate::parameter(
            params.variant() == Variant::NonRing,
            "PublicMatrix::from_fixed_bytes",
            "fixed matrices exist only for non-ring sets",
        )?;
        validate::length("PublicMatrix seed", seed.len(), params.ss_size)?;

        let count = entry_count(params);
        validate::length("PublicMatrix::from_fixed_bytes", bytes.len(), 2 * count)?;

        let mut coeffs = reserve(count)?;
        for chunk in bytes.chunks_exact(2) {
            let value = u16::from_le_bytes([chunk[0], chunk[1]]);
            validate::serialization(
                u32::from(value) < params.q,
                "PublicMatrix::from_fixed_bytes",
                "coefficient not below q",
            )?;
            coeffs.push(value);
        }

        Ok(Self {
            seed: seed.to_vec(),
            k: params.k(),
            n: params.n,
            coeffs,
        })
    }
}

fn entry_count(params: &Parameters) -> usize {
    params.k() * params.k() * params.n
}

fn reserve(count: usize) -> Result<Vec<u16>> {
    let mut coeffs = Vec::new();
    coeffs
        .try_reserve_exact(count)
        .map_err(|_| Error::Allocation {
            context: "public matrix",
            requested: count,
        })?;
    Ok(coeffs)
}

/// Expand `seed` into the public matrix `A` for `params`.
///
/// Every coefficient is drawn as a little-endian 16-bit chunk masked to
/// `q_bits` bits and redrawn while it is not below `q`, so the entries are
/// uniform over `[0, q)`.
pub fn generate_a(seed: &[u8], params: &Parameters) -> Result<PublicMatrix> {
    validate::length("generate_a seed", seed.len(), params.ss_size)?;

    let count = entry_count(params);
    let mut coeffs = reserve(count)?;
    let mut drng = Drng::with_domain(seed, DOMAIN_MATRIX)?;
    let mask = mask16(params.q_bits());
    for _ in 0..count {
        coeffs.push(drng.next_below(mask, params.q)?);
    }

    Ok(PublicMatrix {
        seed: seed.to_vec(),
        k: params.k(),
        n: params.n,
        coeffs,
    })
}

/// Expand `seed` and serialize the resulting non-ring matrix as
/// little-endian `u16` values, row-major.
pub fn derive_fixed_matrix(seed: &[u8], params: &Parameters) -> Result<Vec<u8>> {
    validate::parameter(
        params.variant() == Variant::NonRing,
        "derive_fixed_matrix",
        "fixed matrices exist only for non-ring sets",
    )?;
    let matrix = generate_a(seed, params)?;

    let mut out = Vec::new();
    out.try_reserve_exact(2 * matrix.coeffs.len())
        .map_err(|_| Error::Allocation {
            context: "derive_fixed_matrix",
            requested: 2 * matrix.coeffs.len(),
        })?;
    for value in &matrix.coeffs {
        out.extend_from_slice(&value.to_le_bytes());
    }
    Ok(out)
}
