//! Fujisaki-Okamoto transform with implicit rejection.
//!
//! Key generation: `sk' = sk || H(pk) || pk`.
//! Encapsulation: `rho = H(coins, m || H(pk))`, `c = Enc(pk, m; rho)`,
//! `g = H(confirm, m || rho)`, `K = H(key, m || c || g)`.
//! Decapsulation re-encrypts the decrypted message and compares in constant
//! time; on mismatch the key is `H(reject-key, H(reject, sk) || c || g)`.

use alloc::vec::Vec;

use rand::{CryptoRng, RngCore};
use round2_internal::constant_time::{ct_eq_concat, ct_select_into};
use round2_kem::error::validate;
use round2_kem::round2::hash::hash;
use round2_kem::{Round2, Round2Ciphertext, Round2PublicKey, Round2SecretKey, Round2SharedSecret};
use zeroize::Zeroizing;

use crate::error::Result;

const LABEL_PK_HASH: &[u8] = b"Round2 v1 cca public key";
const LABEL_COINS: &[u8] = b"Round2 v1 cca coins";
const LABEL_CONFIRM: &[u8] = b"Round2 v1 cca confirm";
const LABEL_KEY: &[u8] = b"Round2 v1 cca key";
const LABEL_REJECT: &[u8] = b"Round2 v1 cca reject";
const LABEL_REJECT_KEY: &[u8] = b"Round2 v1 cca reject key";

pub(crate) fn keypair<R: RngCore + CryptoRng>(
    r2: &Round2,
    rng: &mut R,
) -> Result<(Round2PublicKey, Round2SecretKey)> {
    let params = r2.params();
    let (pk, sk) = r2.cpa_keypair(rng)?;
    let pk_hash = hash(LABEL_PK_HASH, &[&pk[..]], params.ss_size)?;

    let mut full = Zeroizing::new(Vec::with_capacity(params.cca_sk_size()));
    full.extend_from_slice(&sk);
    full.extend_from_slice(&pk_hash);
    full.extend_from_slice(&pk);
    Ok((Round2PublicKey::new(pk), Round2SecretKey::new(full.to_vec())))
}

pub(crate) fn encapsulate<R: RngCore + CryptoRng>(
    r2: &Round2,
    pk: &Round2PublicKey,
    rng: &mut R,
) -> Result<(Round2Ciphertext, Round2SharedSecret)> {
    let params = r2.params();
    let ss = params.ss_size;
    validate::length("Round2 CCA public key", pk.len(), params.pk_size())?;

    let m = r2.random_payload(rng)?;
    let pk_hash = hash(LABEL_PK_HASH, &[pk.as_ref()], ss)?;
    let rho = hash(LABEL_COINS, &[&m[..], &pk_hash[..]], ss)?;

    let mut ct = r2.cpa_encrypt(pk.as_ref(), &m, &rho)?;
    let tag = hash(LABEL_CONFIRM, &[&m[..], &rho[..]], ss)?;
    ct.extend_from_slice(&tag);

    let key = hash(LABEL_KEY, &[&m[..], &ct[..]], ss)?;
    Ok((Round2Ciphertext::new(ct), Round2SharedSecret::new(key.to_vec())))
}

pub(crate) fn decapsulate(
    r2: &Round2,
    sk: &Round2SecretKey,
    ct: &Round2Ciphertext,
) -> Result<Round2SharedSecret> {
    let params = r2.params();
    let ss = params.ss_size;
    validate::key(
        sk.len() == params.cca_sk_size(),
        "Round2 CCA secret",
        "wrong length",
    )?;
    validate::length("Round2 CCA ciphertext", ct.len(), params.cca_ct_size())?;

    let (cpa_sk, rest) = sk.as_ref().split_at(params.sk_size());
    let (pk_hash, pk) = rest.split_at(ss);
    let received = ct.as_ref();
    let cpa_ct = &received[..params.ct_size()];

    let m = r2.cpa_decrypt(cpa_sk, cpa_ct)?;
    let rho = hash(LABEL_COINS, &[&m[..], pk_hash], ss)?;
    let reencrypted = r2.cpa_encrypt(pk, &m, &rho)?;
    let tag = hash(LABEL_CONFIRM, &[&m[..], &rho[..]], ss)?;
    let valid = ct_eq_concat(&reencrypted, &tag, received);

    let accept = hash(LABEL_KEY, &[&m[..], received], ss)?;
    let z = hash(LABEL_REJECT, &[cpa_sk], ss)?;
    let reject = hash(LABEL_REJECT_KEY, &[&z[..], received], ss)?;

    let mut key = Zeroizing::new(alloc::vec![0u8; ss]);
    ct_select_into(&mut key, &reject, &accept, valid);
    Ok(Round2SharedSecret::new(key.to_vec()))
}
