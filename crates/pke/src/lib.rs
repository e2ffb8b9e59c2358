//! CCA-secure Round2 key encapsulation and public key encryption.
//!
//! The CPA core of `round2-kem` is wrapped in a Fujisaki-Okamoto style
//! transform with implicit rejection. Messages of any length are encrypted
//! by combining that KEM with ChaCha20-Poly1305.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod error;
pub mod round2;

// Re-export key items
pub use error::{Error, Result};
pub use round2::{
    R2NonRingL1Cca, R2NonRingL1Pke, R2NonRingL3Cca, R2NonRingL3Pke, R2NonRingL5Cca,
    R2NonRingL5Pke, R2RingL1Cca, R2RingL1Pke, R2RingL3Cca, R2RingL3Pke, R2RingL5Cca, R2RingL5Pke,
    Round2CcaKem, Round2Encrypt, Round2Pke,
};
