//! Constants for the Round2 rounding-based lattice scheme
//!
//! A parameter set is described by ten primitive fields. Every other size used
//! by the scheme is a pure function of those fields and is computed by the
//! `const fn` helpers below, so compile-time constants and runtime-validated
//! parameters always agree.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Length of the AEAD nonce appended by the public-key encryption scheme
pub const ROUND2_DEM_NONCE_BYTES: usize = 12;

/// Length of the AEAD authentication tag appended by the public-key encryption scheme
pub const ROUND2_DEM_TAG_BYTES: usize = 16;

/// Largest supported seed / shared secret length
pub const ROUND2_MAX_SS_BYTES: usize = 64;

/// Primitive fields of a Round2 parameter set
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParameterSet {
    /// Seed and shared secret length in bytes
    pub ss_size: usize,

    /// Lattice dimension
    pub d: usize,

    /// Polynomial degree (1 for non-ring, `d` for ring)
    pub n: usize,

    /// Number of non-zero entries per secret column
    pub h: usize,

    /// Large modulus
    pub q: u32,

    /// Bits of the rounding modulus `p`
    pub p_bits: u32,

    /// Bits of the ciphertext modulus `t`
    pub t_bits: u32,

    /// Columns of the secret matrix
    pub n_bar: usize,

    /// Columns of the ephemeral matrix
    pub m_bar: usize,

    /// Bits encoded per payload coefficient
    pub b_bits: u32,
}

/// Smallest `b` such that `2^b >= x`
pub const fn ceil_log2(x: u64) -> u32 {
    if x <= 1 {
        0
    } else {
        64 - (x - 1).leading_zeros()
    }
}

const fn ceil_div(a: usize, b: usize) -> usize {
    (a + b - 1) / b
}

impl ParameterSet {
    /// Number of polynomials per row/column of the public matrix
    pub const fn k(&self) -> usize {
        self.d / self.n
    }

    /// Bits needed to represent a value modulo `q`
    pub const fn q_bits(&self) -> u32 {
        ceil_log2(self.q as u64)
    }

    /// Number of key bits carried per encapsulation
    pub const fn kappa(&self) -> usize {
        8 * self.ss_size
    }

    /// Number of payload symbols, capped by the coefficients available in `B^T R`
    pub const fn mu(&self) -> usize {
        let wanted = ceil_div(self.kappa(), self.b_bits as usize);
        let available = self.n_bar * self.m_bar * self.n;
        if wanted < available {
            wanted
        } else {
            available
        }
    }

    /// Bytes of the packed payload
    pub const fn payload_bytes(&self) -> usize {
        ceil_div(self.mu() * self.b_bits as usize, 8)
    }

    /// CPA secret key length (the secret-matrix seed)
    pub const fn secret_key_bytes(&self) -> usize {
        self.ss_size
    }

    /// CPA public key length: seed of `A` followed by the packed `B`
    pub const fn public_key_bytes(&self) -> usize {
        self.ss_size + ceil_div(self.d * self.n_bar * self.p_bits as usize, 8)
    }

    /// CPA ciphertext length: packed `U` followed by packed `v`
    pub const fn ciphertext_bytes(&self) -> usize {
        ceil_div(self.d * self.m_bar * self.p_bits as usize, 8)
            + ceil_div(self.mu() * self.t_bits as usize, 8)
    }

    /// CCA secret key length: `sk || H(pk) || pk`
    pub const fn cca_secret_key_bytes(&self) -> usize {
        self.secret_key_bytes() + self.ss_size + self.public_key_bytes()
    }

    /// CCA ciphertext length: CPA ciphertext followed by the confirmation tag
    pub const fn cca_ciphertext_bytes(&self) -> usize {
        self.ciphertext_bytes() + self.ss_size
    }

    /// Fixed part of a PKE ciphertext; the message adds its own length on top
    pub const fn pke_overhead_bytes(&self) -> usize {
        self.cca_ciphertext_bytes() + ROUND2_DEM_NONCE_BYTES + ROUND2_DEM_TAG_BYTES
    }
}

/// Non-ring, NIST level 1
pub const R2_NONRING_L1: ParameterSet = ParameterSet {
    ss_size: 16,
    d: 640,
    n: 1,
    h: 128,
    q: 1 << 14,
    p_bits: 11,
    t_bits: 7,
    n_bar: 8,
    m_bar: 8,
    b_bits: 2,
};

/// Non-ring, NIST level 3
pub const R2_NONRING_L3: ParameterSet = ParameterSet {
    ss_size: 24,
    d: 896,
    n: 1,
    h: 192,
    q: 1 << 15,
    p_bits: 12,
    t_bits: 8,
    n_bar: 8,
    m_bar: 8,
    b_bits: 3,
};

/// Non-ring, NIST level 5
pub const R2_NONRING_L5: ParameterSet = ParameterSet {
    ss_size: 32,
    d: 1152,
    n: 1,
    h: 224,
    q: 1 << 15,
    p_bits: 13,
    t_bits: 9,
    n_bar: 8,
    m_bar: 8,
    b_bits: 4,
};

/// Ring, NIST level 1
pub const R2_RING_L1: ParameterSet = ParameterSet {
    ss_size: 16,
    d: 586,
    n: 586,
    h: 114,
    q: 1 << 12,
    p_bits: 10,
    t_bits: 6,
    n_bar: 1,
    m_bar: 1,
    b_bits: 1,
};

/// Ring, NIST level 3
pub const R2_RING_L3: ParameterSet = ParameterSet {
    ss_size: 24,
    d: 786,
    n: 786,
    h: 180,
    q: 1 << 13,
    p_bits: 11,
    t_bits: 7,
    n_bar: 1,
    m_bar: 1,
    b_bits: 1,
};

/// Ring, NIST level 5
pub const R2_RING_L5: ParameterSet = ParameterSet {
    ss_size: 32,
    d: 1018,
    n: 1018,
    h: 220,
    q: 1 << 14,
    p_bits: 12,
    t_bits: 7,
    n_bar: 1,
    m_bar: 1,
    b_bits: 1,
};
