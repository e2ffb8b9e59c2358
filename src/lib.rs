//! # round2
//!
//! Round2 is a lattice-based key encapsulation mechanism whose security
//! rests on rounding instead of added noise. This crate is a facade that
//! re-exports the workspace crates.
//!
//! ## Usage
//!
//! ```toml
//! [dependencies]
//! round2 = "0.3"
//! ```
//!
//! ## Features
//!
//! - `kem` (default): the CPA-secure KEM, matrix generation and parameter handling
//! - `pke` (default): the CCA-secure KEM and public key encryption
//! - `serde`: serde support for parameter sets
//! - `full`: all features enabled
//!
//! ## Crate Structure
//!
//! - [`round2-api`]: error type and the `Kem` / `Pke` traits
//! - [`round2-params`]: parameter sets and derived sizes
//! - [`round2-internal`]: constant-time helpers
//! - [`round2-kem`]: seed expansion, public matrix, CPA core and CPA KEM
//! - [`round2-pke`]: CCA transform and hybrid encryption

#![cfg_attr(not(feature = "std"), no_std)]

// Core re-exports (always available)
pub use round2_api as api;
pub use round2_internal as internal;
pub use round2_params as params;

// Feature-gated re-exports
#[cfg(feature = "kem")]
pub use round2_kem as kem;

#[cfg(feature = "pke")]
pub use round2_pke as pke;

/// Common imports for round2 users
pub mod prelude {
    // Re-export error types
    pub use crate::api::{Error, Result};

    // Re-export core traits
    pub use crate::api::{Kem, Pke, Serialize, SerializeSecret};

    #[cfg(feature = "kem")]
    pub use crate::kem::{
        configure, ParameterSetId, Parameters, Round2, Round2Ciphertext, Round2PublicKey,
        Round2SecretKey, Round2SharedSecret,
    };

    #[cfg(feature = "pke")]
    pub use crate::pke::Round2Encrypt;

    #[cfg(all(feature = "kem", feature = "std"))]
    pub use crate::kem::SystemRandom;
}
