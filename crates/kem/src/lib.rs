//! Round2 key encapsulation
//!
//! This crate implements the Round2 rounding-based lattice scheme: parameter
//! configuration, deterministic seed expansion, public matrix generation, the
//! CPA-secure core and the CPA key encapsulation built on it. The CCA-secure
//! transform and public-key encryption live in `round2-pke`.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod error;
pub mod round2;

#[cfg(feature = "std")]
pub mod rng;

// Re-exports
pub use round2::{
    configure, derive_fixed_matrix, generate_a, ParameterSetId, Parameters, PublicMatrix,
    R2NonRingL1, R2NonRingL1Params, R2NonRingL3, R2NonRingL3Params, R2NonRingL5,
    R2NonRingL5Params, R2RingL1, R2RingL1Params, R2RingL3, R2RingL3Params, R2RingL5,
    R2RingL5Params, Round2,
    Round2Ciphertext, Round2Kem, Round2Params, Round2PublicKey, Round2SecretKey,
    Round2SharedSecret,
};

#[cfg(feature = "std")]
pub use rng::SystemRandom;
