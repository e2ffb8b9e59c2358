//! Deterministic seed expansion.
//!
//! A seed and a domain label are turned into a ChaCha20 key with
//! HKDF-SHA256; the keystream of that key is the expanded byte stream. The
//! generator is buffered a block at a time so that successive draws of any
//! size continue the same byte stream.

use hkdf::Hkdf;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sha2::Sha256;
use zeroize::{Zeroize, Zeroizing};

use crate::error::{Error, Result};

/// Domain label for the public matrix `A`.
pub const DOMAIN_MATRIX: &[u8] = b"Round2 v1 matrix";
/// Domain label for the secret matrix `S`.
pub const DOMAIN_SECRET: &[u8] = b"Round2 v1 secret";
/// Domain label for the ephemeral matrix `R`.
pub const DOMAIN_EPHEMERAL: &[u8] = b"Round2 v1 ephemeral";
/// Domain label for splitting the key-generation seed.
pub const DOMAIN_KEYGEN: &[u8] = b"Round2 v1 keygen";

const BLOCK_BYTES: usize = 64;

/// Upper bound on draws for a single rejection-sampled value.
///
/// Callers pick `mask` as the smallest power of two minus one covering
/// `bound`, so each draw is accepted with probability above 1/2 and hitting
/// the bound means the stream is broken rather than unlucky.
pub const MAX_REJECTION_DRAWS: usize = 256;

/// Deterministic random byte generator expanded from a seed.
pub struct Drng {
    rng: ChaCha20Rng,
    block: [u8; BLOCK_BYTES],
    used: usize,
}

impl Drng {
    /// Expand `seed` with an empty domain label.
    pub fn new(seed: &[u8]) -> Result<Self> {
        Self::with_domain(seed, &[])
    }

    /// Expand `seed` under the domain `label`.
    pub fn with_domain(seed: &[u8], label: &[u8]) -> Result<Self> {
        let mut key = Zeroizing::new([0u8; 32]);
        Hkdf::<Sha256>::new(None, seed)
            .expand(label, &mut key[..])
            .map_err(|_| Error::Derivation {
                context: "Drng::with_domain",
                details: "HKDF expansion failed",
            })?;

        Ok(Self {
            rng: ChaCha20Rng::from_seed(*key),
            block: [0u8; BLOCK_BYTES],
            used: BLOCK_BYTES,
        })
    }

    /// Fill `out` with the next bytes of the stream.
    pub fn fill(&mut self, out: &mut [u8]) {
        let mut written = 0;
        while written < out.len() {
            if self.used == BLOCK_BYTES {
                self.rng.fill_bytes(&mut self.block);
                self.used = 0;
            }
            let take = (out.len() - written).min(BLOCK_BYTES - self.used);
            out[written..written + take].copy_from_slice(&self.block[self.used..self.used + take]);
            self.used += take;
            written += take;
        }
    }

    /// Next little-endian 16-bit chunk of the stream.
    pub fn next_u16(&mut self) -> u16 {
        let mut buf = [0u8; 2];
        self.fill(&mut buf);
        u16::from_le_bytes(buf)
    }

    /// Rejection-sample a value in `[0, bound)` from 16-bit chunks masked with `mask`.
    pub fn next_below(&mut self, mask: u16, bound: u32) -> Result<u16> {
        for _ in 0..MAX_REJECTION_DRAWS {
            let candidate = self.next_u16() & mask;
            if u32::from(candidate) < bound {
                return Ok(candidate);
            }
        }
        Err(Error::Derivation {
            context: "Drng::next_below",
            details: "rejection sampling did not terminate",
        })
    }
}

impl Drop for Drng {
    fn drop(&mut self) {
        self.block.zeroize();
    }
}

/// Mask keeping the low `bits` bits of a 16-bit chunk.
pub(crate) fn mask16(bits: u32) -> u16 {
    if bits >= 16 {
        u16::MAX
    } else {
        (1u16 << bits) - 1
    }
}
