//! CCA-secure Round2.
//!
//! - `cca`: key encapsulation with re-encryption check and implicit rejection;
//! - `dem`: ChaCha20-Poly1305 data encapsulation keyed from the KEM secret;
//! - `encrypt`: the runtime `Round2Encrypt` plus the typed `Round2Pke` and
//!   `Round2CcaKem` front ends.
//!
//! Ciphertext layout of the public key encryption:
//! `c || g || nonce (12) || body || tag (16)` where `c || g` is the CCA
//! KEM ciphertext.

mod cca;
mod dem;
mod encrypt;

pub use self::encrypt::{
    R2NonRingL1Cca, R2NonRingL1Pke, R2NonRingL3Cca, R2NonRingL3Pke, R2NonRingL5Cca,
    R2NonRingL5Pke, R2RingL1Cca, R2RingL1Pke, R2RingL3Cca, R2RingL3Pke, R2RingL5Cca, R2RingL5Pke,
    Round2CcaKem, Round2Encrypt, Round2Pke,
};

#[cfg(test)]
mod tests;
