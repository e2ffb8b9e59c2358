//! Constant values and size formulas for the Round2 library
//!
//! This crate holds the raw parameter sets of the scheme together with the
//! `const fn` formulas that derive key, ciphertext and payload sizes from them.
//! It has no dependencies besides the optional `serde` support and is always
//! `no_std`.

#![no_std]

pub mod pqc;
