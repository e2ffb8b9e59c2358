//! Shared helpers for the Round2 integration tests.

use rand::SeedableRng;
use rand_chacha::ChaChaRng;
use round2_kem::{configure, Parameters};

/// Deterministic generator for reproducible test runs.
pub fn seeded_rng(seed: u64) -> ChaChaRng {
    ChaChaRng::seed_from_u64(seed)
}

/// Small non-ring set used as the worked example: `d = 8, q = 512, n = 1`.
///
/// The ciphertext packs eight 7-bit `u` entries and a single 6-bit `v` symbol.
pub fn scenario_parameters() -> Parameters {
    configure(16, 8, 1, 3, 512, 7, 6, 1, 1, 1).expect("scenario parameters are valid")
}

/// Module variant with `k = 3` polynomials of degree 4.
pub fn module_parameters() -> Parameters {
    configure(16, 12, 4, 4, 1 << 10, 8, 6, 2, 2, 1).expect("module parameters are valid")
}
