//! CPA-secure rounding-based public-key encryption.
//!
//! Stateless functions over explicit inputs:
//!
//! - key generation: `B = R_{q->p}(A S)`, `pk = sigma || pack_p(B)`, `sk` is
//!   the seed of `S`;
//! - encryption: `U = R_{q->p}(A^T R)`, `v = R_{p->t}(B^T R + m * p / 2^B)`
//!   on the first `mu` coefficients;
//! - decryption: `m = R_{p->2^B}((p/t) v - S^T U)`.

use alloc::sync::Arc;
use alloc::vec::Vec;

use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use super::arith::{dense_times_sparse, matrix_times_sparse, round};
use super::drng::{Drng, DOMAIN_EPHEMERAL, DOMAIN_KEYGEN, DOMAIN_SECRET};
use super::matrix::{generate_a, PublicMatrix};
use super::pack::{pack_bits, unpack_bits};
use super::params::Parameters;
use super::secret::sparse_ternary;
use crate::error::{validate, Error, Result};

/// Use the cached matrix when it belongs to `sigma`, otherwise expand it.
fn resolve_matrix(
    sigma: &[u8],
    params: &Parameters,
    cache: Option<&Arc<PublicMatrix>>,
) -> Result<Arc<PublicMatrix>> {
    match cache {
        Some(matrix) if matrix.matches(sigma, params) => Ok(Arc::clone(matrix)),
        _ => Ok(Arc::new(generate_a(sigma, params)?)),
    }
}

/// Fill `dest` from `rng`, reporting a failing source instead of panicking.
pub(crate) fn fill_random<R: RngCore + ?Sized>(
    rng: &mut R,
    dest: &mut [u8],
    context: &'static str,
) -> Result<()> {
    rng.try_fill_bytes(dest).map_err(|_| Error::Randomness {
        context,
        details: "randomness source failed",
    })
}

fn with_capacity(len: usize, context: &'static str) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    out.try_reserve_exact(len).map_err(|_| Error::Allocation {
        context,
        requested: len,
    })?;
    Ok(out)
}

/// Generate a CPA key pair `(pk, sk)`.
///
/// A cached matrix is used only if its seed equals the freshly drawn `sigma`.
pub(crate) fn keypair<R: RngCore + CryptoRng>(
    params: &Parameters,
    cache: Option<&Arc<PublicMatrix>>,
    rng: &mut R,
) -> Result<(Vec<u8>, Zeroizing<Vec<u8>>)> {
    let ss = params.ss_size;
    let mut master = Zeroizing::new(alloc::vec![0u8; ss]);
    fill_random(rng, &mut master, "cpa keypair")?;

    let mut sigma = alloc::vec![0u8; ss];
    let mut sk = Zeroizing::new(alloc::vec![0u8; ss]);
    let mut split = Drng::with_domain(&master, DOMAIN_KEYGEN)?;
    split.fill(&mut sigma);
    split.fill(&mut sk);

    let a = resolve_matrix(&sigma, params, cache)?;
    let s = sparse_ternary(&sk, DOMAIN_SECRET, params, params.n_bar)?;
    let b: Vec<u16> = matrix_times_sparse(&a, &s, false, params, params.q)
        .into_iter()
        .map(|x| round(x, params.q, params.p_bits))
        .collect();

    let mut pk = with_capacity(params.pk_size(), "cpa keypair")?;
    pk.extend_from_slice(&sigma);
    pack_bits(&b, params.p_bits, &mut pk);
    debug_assert_eq!(pk.len(), params.pk_size());

    Ok((pk, sk))
}

/// Encrypt the `payload_bytes`-byte message `m` under `pk` with coins `rho`.
pub(crate) fn encrypt(
    params: &Parameters,
    pk: &[u8],
    m: &[u8],
    rho: &[u8],
    cache: Option<&Arc<PublicMatrix>>,
) -> Result<Vec<u8>> {
    validate::length("Round2 public key", pk.len(), params.pk_size())?;
    validate::length("Round2 message", m.len(), params.payload_bytes())?;
    validate::length("Round2 encryption coins", rho.len(), params.ss_size)?;

    let (sigma, packed_b) = pk.split_at(params.ss_size);
    let b = unpack_bits(packed_b, params.d * params.n_bar, params.p_bits);
    let a = resolve_matrix(sigma, params, cache)?;
    let r = sparse_ternary(rho, DOMAIN_EPHEMERAL, params, params.m_bar)?;

    let u: Vec<u16> = matrix_times_sparse(&a, &r, true, params, params.q)
        .into_iter()
        .map(|x| round(x, params.q, params.p_bits))
        .collect();

    let p = params.p();
    let x = dense_times_sparse(&b, &r, params, p);
    let symbols = Zeroizing::new(unpack_bits(m, params.mu(), params.b_bits));
    let lift = params.p_bits - params.b_bits;
    let v: Vec<u16> = symbols
        .iter()
        .zip(x.iter())
        .map(|(&sym, &xi)| {
            let shifted = (xi + (u32::from(sym) << lift)) & (p - 1);
            round(shifted, p, params.t_bits)
        })
        .collect();

    let mut ct = with_capacity(params.ct_size(), "cpa encrypt")?;
    pack_bits(&u, params.p_bits, &mut ct);
    pack_bits(&v, params.t_bits, &mut ct);
    debug_assert_eq!(ct.len(), params.ct_size());
    Ok(ct)
}

/// Recover the `payload_bytes`-byte message from `ct` with the secret key `sk`.
pub(crate) fn decrypt(params: &Parameters, sk: &[u8], ct: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    validate::key(sk.len() == params.sk_size(), "Round2 secret", "wrong length")?;
    validate::length("Round2 ciphertext", ct.len(), params.ct_size())?;

    let s = sparse_ternary(sk, DOMAIN_SECRET, params, params.n_bar)?;
    let (packed_u, packed_v) = ct.split_at(params.u_bytes());
    let u = unpack_bits(packed_u, params.d * params.m_bar, params.p_bits);
    let v = unpack_bits(packed_v, params.mu(), params.t_bits);

    // S^T U is indexed by (U column, S column); symbols run over (S column, U column).
    let p = params.p();
    let x = Zeroizing::new(dense_times_sparse(&u, &s, params, p));
    let scale = params.p_bits - params.t_bits;
    let n = params.n;
    let mut symbols = Zeroizing::new(Vec::with_capacity(params.mu()));
    for (idx, &vi) in v.iter().enumerate() {
        let (pair, coeff) = (idx / n, idx % n);
        let (i, j) = (pair / params.m_bar, pair % params.m_bar);
        let xi = x[(j * params.n_bar + i) * n + coeff];
        let w = ((u32::from(vi) << scale) + p - xi) & (p - 1);
        symbols.push(round(w, p, params.b_bits));
    }

    let mut m = Zeroizing::new(Vec::with_capacity(params.payload_bytes()));
    pack_bits(&symbols, params.b_bits, &mut m);
    debug_assert_eq!(m.len(), params.payload_bytes());
    Ok(m)
}

/// Clear the bits of `m` above the `mu * B` payload bits.
pub(crate) fn mask_payload(params: &Parameters, m: &mut [u8]) {
    let bits = params.mu() * params.b_bits as usize;
    let rem = bits % 8;
    if rem != 0 {
        if let Some(last) = m.last_mut() {
            *last &= (1u8 << rem) - 1;
        }
    }
}
