//! ChaCha20-Poly1305 data encapsulation.

use alloc::vec::Vec;

use chacha20poly1305::aead::{Aead, KeyInit, Payload};
use chacha20poly1305::{ChaCha20Poly1305, Nonce};
use round2_kem::round2::hash::hash;
use round2_params::pqc::round2::ROUND2_DEM_NONCE_BYTES;

use crate::error::{Error, Result};

const LABEL_DEM_KEY: &[u8] = b"Round2 v1 dem key";
const DEM_KEY_BYTES: usize = 32;

fn cipher(kem_key: &[u8]) -> Result<ChaCha20Poly1305> {
    let key = hash(LABEL_DEM_KEY, &[kem_key], DEM_KEY_BYTES)?;
    ChaCha20Poly1305::new_from_slice(&key).map_err(|_| Error::EncryptionFailed("bad DEM key length"))
}

/// Encrypt `msg` and return `body || tag`.
pub(crate) fn seal(
    kem_key: &[u8],
    nonce: &[u8; ROUND2_DEM_NONCE_BYTES],
    msg: &[u8],
    aad: &[u8],
) -> Result<Vec<u8>> {
    cipher(kem_key)?
        .encrypt(Nonce::from_slice(nonce), Payload { msg, aad })
        .map_err(|_| Error::EncryptionFailed("AEAD encryption failed"))
}

/// Authenticate and decrypt `body || tag`.
pub(crate) fn open(
    kem_key: &[u8],
    nonce: &[u8; ROUND2_DEM_NONCE_BYTES],
    sealed: &[u8],
    aad: &[u8],
) -> Result<Vec<u8>> {
    cipher(kem_key)?
        .decrypt(Nonce::from_slice(nonce), Payload { msg: sealed, aad })
        .map_err(|_| Error::DecryptionFailed("AEAD authentication failed"))
}
