// kem/src/round2/mod.rs

//! Round2 key encapsulation mechanism.
//!
//! Round2 is a lattice scheme based on rounding instead of added noise. The
//! polynomial degree `n` selects between a non-ring variant (`n == 1`), a
//! ring variant (`n == d`) and module variants in between.

mod arith;
mod cpa_pke;
mod pack;
mod secret;

pub mod drng;
pub mod hash;
pub mod kem;
pub mod matrix;
pub mod params;

pub use self::drng::Drng;
pub use self::kem::{
    R2NonRingL1, R2NonRingL3, R2NonRingL5, R2RingL1, R2RingL3, R2RingL5, Round2,
    Round2Ciphertext, Round2Kem, Round2PublicKey, Round2SecretKey, Round2SharedSecret,
};
pub use self::matrix::{derive_fixed_matrix, generate_a, PublicMatrix};
pub use self::params::{
    configure, ParameterSetId, Parameters, R2NonRingL1Params, R2NonRingL3Params,
    R2NonRingL5Params, R2RingL1Params, R2RingL3Params, R2RingL5Params, Round2Params, Variant,
};
