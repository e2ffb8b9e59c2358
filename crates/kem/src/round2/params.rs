//! Round2 parameter configuration.
//!
//! `Parameters` is the validated form of a raw `ParameterSet`: construction
//! checks every structural constraint and the worst-case decryption bound,
//! and caches the derived sizes. Named sets are available both at runtime
//! through `ParameterSetId` and at compile time through `Round2Params`.

use core::fmt;
use core::ops::Deref;

use round2_params::pqc::round2::{
    self as global_params, ParameterSet, ROUND2_MAX_SS_BYTES,
};

use super::pack::packed_len;
use crate::error::{validate, Result};

/// Largest supported lattice dimension; secret positions are drawn from 16-bit chunks.
pub const ROUND2_MAX_D: usize = 65535;

/// Largest supported modulus `q`; coefficients are drawn from 16-bit chunks.
pub const ROUND2_MAX_Q: u32 = 1 << 16;

/// Structural variant selected by the polynomial degree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Variant {
    /// `n == 1`: plain integer matrices
    NonRing,
    /// `n == d`: a single polynomial
    Ring,
    /// `1 < n < d`: a `k x k` matrix of polynomials
    Module,
}

/// A validated Round2 parameter set together with its derived sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Parameters {
    set: ParameterSet,
    k: usize,
    q_bits: u32,
    mu: usize,
    payload_bytes: usize,
    sk_size: usize,
    pk_size: usize,
    ct_size: usize,
}

const fn is_prime(x: usize) -> bool {
    if x < 2 {
        return false;
    }
    let mut i = 2;
    while i * i <= x {
        if x % i == 0 {
            return false;
        }
        i += 1;
    }
    true
}

/// Build and validate a parameter set from its primitive fields.
#[allow(clippy::too_many_arguments)]
pub fn configure(
    ss_size: usize,
    d: usize,
    n: usize,
    h: usize,
    q: u32,
    p_bits: u32,
    t_bits: u32,
    n_bar: usize,
    m_bar: usize,
    b_bits: u32,
) -> Result<Parameters> {
    Parameters::new(ParameterSet {
        ss_size,
        d,
        n,
        h,
        q,
        p_bits,
        t_bits,
        n_bar,
        m_bar,
        b_bits,
    })
}

impl Parameters {
    /// Validate `set` and compute its derived sizes.
    pub fn new(set: ParameterSet) -> Result<Self> {
        const CTX: &str = "Round2 parameters";

        validate::parameter(
            set.ss_size != 0
                && set.d != 0
                && set.n != 0
                && set.h != 0
                && set.q != 0
                && set.p_bits != 0
                && set.t_bits != 0
                && set.n_bar != 0
                && set.m_bar != 0
                && set.b_bits != 0,
            CTX,
            "all fields must be non-zero",
        )?;
        validate::parameter(set.ss_size <= ROUND2_MAX_SS_BYTES, CTX, "ss_size exceeds 64 bytes")?;
        validate::parameter(set.d % set.n == 0, CTX, "n must divide d")?;
        validate::parameter(
            set.n == 1 || is_prime(set.n + 1),
            CTX,
            "n + 1 must be prime",
        )?;
        validate::parameter(set.h <= set.d, CTX, "h must not exceed d")?;
        validate::parameter(set.d <= ROUND2_MAX_D, CTX, "d exceeds 65535")?;
        validate::parameter(set.q >= 2 && set.q <= ROUND2_MAX_Q, CTX, "q must lie in [2, 65536]")?;
        validate::parameter(set.p_bits <= 16, CTX, "p_bits exceeds 16")?;

        let q_bits = set.q_bits();
        validate::parameter(
            set.b_bits <= set.t_bits && set.t_bits <= set.p_bits && set.p_bits <= q_bits,
            CTX,
            "require B <= t_bits <= p_bits <= q_bits",
        )?;
        validate::parameter(
            Self::within_error_bound(&set),
            CTX,
            "decryption error bound exceeded",
        )?;

        Ok(Self {
            set,
            k: set.k(),
            q_bits,
            mu: set.mu(),
            payload_bytes: set.payload_bytes(),
            sk_size: set.secret_key_bytes(),
            pk_size: set.public_key_bytes(),
            ct_size: set.ciphertext_bytes(),
        })
    }

    // Worst-case decryption error: rounding B and U each contributes at most
    // h/2 per coefficient (doubled by the reduction modulo Phi when n > 1) and
    // rounding v contributes p/(2t). It must stay below p/2^(B+1).
    fn within_error_bound(set: &ParameterSet) -> bool {
        let f: u64 = if set.n == 1 { 1 } else { 2 };
        let p = 1u64 << set.p_bits;
        let t = 1u64 << set.t_bits;
        let b = set.b_bits as u64;
        f * set.h as u64 * (1u64 << (b + 1)) + (1u64 << b) * p / t < p
    }

    /// Raw primitive fields.
    pub fn set(&self) -> &ParameterSet {
        &self.set
    }

    /// Structural variant of this set.
    pub fn variant(&self) -> Variant {
        if self.set.n == 1 {
            Variant::NonRing
        } else if self.set.n == self.set.d {
            Variant::Ring
        } else {
            Variant::Module
        }
    }

    /// Polynomials per row of the public matrix (`d / n`).
    pub fn k(&self) -> usize {
        self.k
    }

    /// Bits needed for a value modulo `q`.
    pub fn q_bits(&self) -> u32 {
        self.q_bits
    }

    /// Rounding modulus `p = 2^p_bits`.
    pub fn p(&self) -> u32 {
        1 << self.set.p_bits
    }

    /// Ciphertext modulus `t = 2^t_bits`.
    pub fn t(&self) -> u32 {
        1 << self.set.t_bits
    }

    /// Number of `B`-bit payload symbols per encryption.
    pub fn mu(&self) -> usize {
        self.mu
    }

    /// Length of the packed payload in bytes.
    pub fn payload_bytes(&self) -> usize {
        self.payload_bytes
    }

    /// CPA secret key length.
    pub fn sk_size(&self) -> usize {
        self.sk_size
    }

    /// Public key length.
    pub fn pk_size(&self) -> usize {
        self.pk_size
    }

    /// CPA ciphertext length.
    pub fn ct_size(&self) -> usize {
        self.ct_size
    }

    /// CCA secret key length (`sk || H(pk) || pk`).
    pub fn cca_sk_size(&self) -> usize {
        self.set.cca_secret_key_bytes()
    }

    /// CCA ciphertext length (ciphertext plus confirmation tag).
    pub fn cca_ct_size(&self) -> usize {
        self.set.cca_ciphertext_bytes()
    }

    /// Fixed part of a PKE ciphertext.
    pub fn pke_overhead(&self) -> usize {
        self.set.pke_overhead_bytes()
    }

    /// Length of packed `U` inside a ciphertext.
    pub(crate) fn u_bytes(&self) -> usize {
        packed_len(self.set.d * self.set.m_bar, self.set.p_bits)
    }
}

impl Deref for Parameters {
    type Target = ParameterSet;

    fn deref(&self) -> &ParameterSet {
        &self.set
    }
}

impl TryFrom<ParameterSet> for Parameters {
    type Error = crate::error::Error;

    fn try_from(set: ParameterSet) -> Result<Self> {
        Self::new(set)
    }
}

/// Named parameter sets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParameterSetId {
    NonRingL1,
    NonRingL3,
    NonRingL5,
    RingL1,
    RingL3,
    RingL5,
}

impl ParameterSetId {
    /// Every named set, non-ring first.
    pub const ALL: [ParameterSetId; 6] = [
        ParameterSetId::NonRingL1,
        ParameterSetId::NonRingL3,
        ParameterSetId::NonRingL5,
        ParameterSetId::RingL1,
        ParameterSetId::RingL3,
        ParameterSetId::RingL5,
    ];

    /// Raw fields of the named set.
    pub const fn parameter_set(self) -> ParameterSet {
        match self {
            ParameterSetId::NonRingL1 => global_params::R2_NONRING_L1,
            ParameterSetId::NonRingL3 => global_params::R2_NONRING_L3,
            ParameterSetId::NonRingL5 => global_params::R2_NONRING_L5,
            ParameterSetId::RingL1 => global_params::R2_RING_L1,
            ParameterSetId::RingL3 => global_params::R2_RING_L3,
            ParameterSetId::RingL5 => global_params::R2_RING_L5,
        }
    }

    /// Validated parameters of the named set.
    pub fn parameters(self) -> Result<Parameters> {
        Parameters::new(self.parameter_set())
    }

    /// Algorithm name.
    pub const fn name(self) -> &'static str {
        match self {
            ParameterSetId::NonRingL1 => "Round2-NonRing-L1",
            ParameterSetId::NonRingL3 => "Round2-NonRing-L3",
            ParameterSetId::NonRingL5 => "Round2-NonRing-L5",
            ParameterSetId::RingL1 => "Round2-Ring-L1",
            ParameterSetId::RingL3 => "Round2-Ring-L3",
            ParameterSetId::RingL5 => "Round2-Ring-L5",
        }
    }
}

impl fmt::Display for ParameterSetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Compile-time view of a named parameter set.
pub trait Round2Params: Send + Sync + 'static {
    /// Which named set this is.
    const ID: ParameterSetId;
    /// Raw fields.
    const SET: ParameterSet = Self::ID.parameter_set();
    /// Algorithm name string.
    const NAME: &'static str = Self::ID.name();
    /// Size of the public key in bytes.
    const PUBLIC_KEY_BYTES: usize = Self::SET.public_key_bytes();
    /// Size of the CPA secret key in bytes.
    const SECRET_KEY_BYTES: usize = Self::SET.secret_key_bytes();
    /// Size of the CPA ciphertext in bytes.
    const CIPHERTEXT_BYTES: usize = Self::SET.ciphertext_bytes();
    /// Size of the shared secret in bytes.
    const SHARED_SECRET_BYTES: usize = Self::SET.ss_size;
    /// Size of the CCA secret key in bytes.
    const CCA_SECRET_KEY_BYTES: usize = Self::SET.cca_secret_key_bytes();
    /// Size of the CCA ciphertext in bytes.
    const CCA_CIPHERTEXT_BYTES: usize = Self::SET.cca_ciphertext_bytes();

    /// Runtime parameters for this set.
    fn parameters() -> Result<Parameters> {
        Self::ID.parameters()
    }
}

macro_rules! named_params {
    ($($ty:ident => $id:ident),* $(,)?) => {
        $(
            #[doc = concat!("Marker type for the `", stringify!($id), "` parameter set.")]
            #[derive(Clone, Copy, Debug, Default)]
            pub struct $ty;

            impl Round2Params for $ty {
                const ID: ParameterSetId = ParameterSetId::$id;
            }
        )*
    };
}

named_params! {
    R2NonRingL1Params => NonRingL1,
    R2NonRingL3Params => NonRingL3,
    R2NonRingL5Params => NonRingL5,
    R2RingL1Params => RingL1,
    R2RingL3Params => RingL3,
    R2RingL5Params => RingL5,
}
