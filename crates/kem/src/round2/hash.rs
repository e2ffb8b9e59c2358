//! Domain-separated hashing built on HKDF-SHA256.
//!
//! `H(label, parts, len)` extracts over the concatenation of `parts` and
//! expands `len` bytes under `label`.

use alloc::vec::Vec;

use hkdf::HkdfExtract;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::error::{Error, Result};

/// Hash the concatenation of `parts` under `label` into `out`.
pub fn hash_into(label: &[u8], parts: &[&[u8]], out: &mut [u8]) -> Result<()> {
    let mut extract = HkdfExtract::<Sha256>::new(None);
    for part in parts {
        extract.input_ikm(part);
    }
    let (_, hkdf) = extract.finalize();
    hkdf.expand(label, out).map_err(|_| Error::Derivation {
        context: "hash",
        details: "requested output too long",
    })
}

/// Hash the concatenation of `parts` under `label` into a fresh `len`-byte buffer.
pub fn hash(label: &[u8], parts: &[&[u8]], len: usize) -> Result<Zeroizing<Vec<u8>>> {
    let mut out = Zeroizing::new(alloc::vec![0u8; len]);
    hash_into(label, parts, &mut out)?;
    Ok(out)
}
