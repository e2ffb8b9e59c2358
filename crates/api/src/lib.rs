//! Public API traits and types for the Round2 library
//!
//! This crate provides the public API surface shared by the Round2 crates:
//! the error taxonomy, the `Kem` / `Pke` traits and the byte serialization
//! contracts implemented by keys and ciphertexts.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod error;
pub mod traits;

// Re-export commonly used items at the crate level for convenience
pub use error::{Error, Result};
pub use traits::{Kem, Pke, Serialize, SerializeSecret};

// Re-export trait modules for direct access
pub use traits::{kem, pke, serialize};
