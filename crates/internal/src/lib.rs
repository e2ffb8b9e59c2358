//! Internal utilities shared by the Round2 crates
//!
//! Not part of the public API; the helpers here may change between releases.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod constant_time;
