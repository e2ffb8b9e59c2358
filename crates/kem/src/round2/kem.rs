//! Round2 key encapsulation.
//!
//! `Round2` works with runtime-selected parameters and optionally a cached
//! public matrix. `Round2Kem<P>` fixes the parameters at compile time and
//! implements `round2_api::Kem`.

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use core::marker::PhantomData;

use rand::{CryptoRng, RngCore};
use round2_api::error::{Error as CoreError, Result as ApiResult};
use round2_api::{Kem, Serialize, SerializeSecret};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::cpa_pke;
use super::hash::hash;
use super::matrix::PublicMatrix;
use super::params::{
    ParameterSetId, Parameters, R2NonRingL1Params, R2NonRingL3Params, R2NonRingL5Params,
    R2RingL1Params, R2RingL3Params, R2RingL5Params, Round2Params,
};

/// Hash label of the CPA KEM shared secret.
const DOMAIN_SHARED: &[u8] = b"Round2 v1 shared secret";

/// Round2 public key: `sigma || pack_p(B)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Round2PublicKey(Vec<u8>);

/// Round2 secret key. For the CPA KEM this is the seed of `S`.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Round2SecretKey(Vec<u8>);

/// Round2 ciphertext.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Round2Ciphertext(Vec<u8>);

/// Round2 shared secret.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Round2SharedSecret(Vec<u8>);

macro_rules! byte_newtype {
    ($ty:ident) => {
        impl $ty {
            /// Wrap raw bytes without validation.
            pub fn new(bytes: Vec<u8>) -> Self {
                Self(bytes)
            }

            /// Length in bytes.
            pub fn len(&self) -> usize {
                self.0.len()
            }

            /// Whether the value is empty.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl AsRef<[u8]> for $ty {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl AsMut<[u8]> for $ty {
            fn as_mut(&mut self) -> &mut [u8] {
                &mut self.0
            }
        }
    };
}

byte_newtype!(Round2PublicKey);
byte_newtype!(Round2SecretKey);
byte_newtype!(Round2Ciphertext);
byte_newtype!(Round2SharedSecret);

impl fmt::Debug for Round2SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Round2SecretKey([REDACTED; {}])", self.0.len())
    }
}

impl fmt::Debug for Round2SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Round2SharedSecret([REDACTED; {}])", self.0.len())
    }
}

fn non_empty(bytes: &[u8], context: &'static str) -> ApiResult<()> {
    if bytes.is_empty() {
        return Err(CoreError::InvalidLength {
            context,
            expected: 1,
            actual: 0,
        });
    }
    Ok(())
}

impl Serialize for Round2PublicKey {
    fn from_bytes(bytes: &[u8]) -> ApiResult<Self> {
        non_empty(bytes, "Round2PublicKey::from_bytes")?;
        Ok(Self(bytes.to_vec()))
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.0.clone()
    }
}

impl Serialize for Round2Ciphertext {
    fn from_bytes(bytes: &[u8]) -> ApiResult<Self> {
        non_empty(bytes, "Round2Ciphertext::from_bytes")?;
        Ok(Self(bytes.to_vec()))
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.0.clone()
    }
}

impl SerializeSecret for Round2SecretKey {
    fn from_bytes(bytes: &[u8]) -> ApiResult<Self> {
        non_empty(bytes, "Round2SecretKey::from_bytes")?;
        Ok(Self(bytes.to_vec()))
    }

    fn to_bytes_zeroizing(&self) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(self.0.clone())
    }
}

impl SerializeSecret for Round2SharedSecret {
    fn from_bytes(bytes: &[u8]) -> ApiResult<Self> {
        non_empty(bytes, "Round2SharedSecret::from_bytes")?;
        Ok(Self(bytes.to_vec()))
    }

    fn to_bytes_zeroizing(&self) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(self.0.clone())
    }
}

/// Round2 with runtime-selected parameters.
#[derive(Clone, Debug)]
pub struct Round2 {
    params: Parameters,
    matrix: Option<Arc<PublicMatrix>>,
}

impl Round2 {
    /// Create an instance for validated parameters.
    pub fn new(params: Parameters) -> Self {
        Self {
            params,
            matrix: None,
        }
    }

    /// Create an instance for a named parameter set.
    pub fn from_id(id: ParameterSetId) -> ApiResult<Self> {
        Ok(Self::new(id.parameters()?))
    }

    /// Attach a cached public matrix.
    ///
    /// It is used whenever its seed equals the seed in a public key and
    /// ignored otherwise, so results never depend on it.
    pub fn with_matrix(mut self, matrix: Arc<PublicMatrix>) -> Self {
        self.matrix = Some(matrix);
        self
    }

    /// Parameters of this instance.
    pub fn params(&self) -> &Parameters {
        &self.params
    }

    /// Cached public matrix, if any.
    pub fn matrix(&self) -> Option<&Arc<PublicMatrix>> {
        self.matrix.as_ref()
    }

    /// CPA key generation returning raw `(pk, sk)` bytes.
    pub fn cpa_keypair<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
    ) -> ApiResult<(Vec<u8>, Zeroizing<Vec<u8>>)> {
        Ok(cpa_pke::keypair(&self.params, self.matrix.as_ref(), rng)?)
    }

    /// CPA encryption of a `payload_bytes` message with explicit coins `rho`.
    pub fn cpa_encrypt(&self, pk: &[u8], m: &[u8], rho: &[u8]) -> ApiResult<Vec<u8>> {
        Ok(cpa_pke::encrypt(&self.params, pk, m, rho, self.matrix.as_ref())?)
    }

    /// CPA decryption back to the `payload_bytes` message.
    pub fn cpa_decrypt(&self, sk: &[u8], ct: &[u8]) -> ApiResult<Zeroizing<Vec<u8>>> {
        Ok(cpa_pke::decrypt(&self.params, sk, ct)?)
    }

    /// Draw a random payload with the bits above `mu * B` cleared.
    pub fn random_payload<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
    ) -> ApiResult<Zeroizing<Vec<u8>>> {
        let mut m = Zeroizing::new(alloc::vec![0u8; self.params.payload_bytes()]);
        cpa_pke::fill_random(rng, &mut m, "Round2 payload")?;
        cpa_pke::mask_payload(&self.params, &mut m);
        Ok(m)
    }

    /// Generate a key pair.
    pub fn keypair<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
    ) -> ApiResult<(Round2PublicKey, Round2SecretKey)> {
        let (pk, sk) = self.cpa_keypair(rng)?;
        Ok((Round2PublicKey(pk), Round2SecretKey(sk.to_vec())))
    }

    /// Encapsulate a fresh shared secret to `pk`.
    pub fn encapsulate<R: RngCore + CryptoRng>(
        &self,
        pk: &Round2PublicKey,
        rng: &mut R,
    ) -> ApiResult<(Round2Ciphertext, Round2SharedSecret)> {
        let m = self.random_payload(rng)?;
        let mut rho = Zeroizing::new(alloc::vec![0u8; self.params.ss_size]);
        cpa_pke::fill_random(rng, &mut rho, "Round2 encapsulate")?;

        let ct = self.cpa_encrypt(&pk.0, &m, &rho)?;
        let ss = hash(DOMAIN_SHARED, &[&m[..], &ct[..]], self.params.ss_size)?;
        Ok((Round2Ciphertext(ct), Round2SharedSecret(ss.to_vec())))
    }

    /// Recover the shared secret from `ct`.
    pub fn decapsulate(
        &self,
        sk: &Round2SecretKey,
        ct: &Round2Ciphertext,
    ) -> ApiResult<Round2SharedSecret> {
        let m = self.cpa_decrypt(&sk.0, &ct.0)?;
        let ss = hash(DOMAIN_SHARED, &[&m[..], &ct.0[..]], self.params.ss_size)?;
        Ok(Round2SharedSecret(ss.to_vec()))
    }
}

/// Round2 KEM with compile-time parameters.
pub struct Round2Kem<P: Round2Params> {
    _params: PhantomData<P>,
}

impl<P: Round2Params> Round2Kem<P> {
    fn runtime() -> ApiResult<Round2> {
        Ok(Round2::new(P::parameters()?))
    }
}

impl<P: Round2Params> Kem for Round2Kem<P> {
    type PublicKey = Round2PublicKey;
    type SecretKey = Round2SecretKey;
    type SharedSecret = Round2SharedSecret;
    type Ciphertext = Round2Ciphertext;
    type KeyPair = (Self::PublicKey, Self::SecretKey);

    fn name() -> &'static str {
        P::NAME
    }

    fn keypair<R: CryptoRng + RngCore>(rng: &mut R) -> ApiResult<Self::KeyPair> {
        Self::runtime()?.keypair(rng)
    }

    fn public_key(keypair: &Self::KeyPair) -> Self::PublicKey {
        keypair.0.clone()
    }

    fn secret_key(keypair: &Self::KeyPair) -> Self::SecretKey {
        keypair.1.clone()
    }

    fn encapsulate<R: CryptoRng + RngCore>(
        rng: &mut R,
        public_key: &Self::PublicKey,
    ) -> ApiResult<(Self::Ciphertext, Self::SharedSecret)> {
        Self::runtime()?.encapsulate(public_key, rng)
    }

    fn decapsulate(
        secret_key: &Self::SecretKey,
        ciphertext: &Self::Ciphertext,
    ) -> ApiResult<Self::SharedSecret> {
        Self::runtime()?.decapsulate(secret_key, ciphertext)
    }
}

/// Non-ring Round2, NIST level 1.
pub type R2NonRingL1 = Round2Kem<R2NonRingL1Params>;
/// Non-ring Round2, NIST level 3.
pub type R2NonRingL3 = Round2Kem<R2NonRingL3Params>;
/// Non-ring Round2, NIST level 5.
pub type R2NonRingL5 = Round2Kem<R2NonRingL5Params>;
/// Ring Round2, NIST level 1.
pub type R2RingL1 = Round2Kem<R2RingL1Params>;
/// Ring Round2, NIST level 3.
pub type R2RingL3 = Round2Kem<R2RingL3Params>;
/// Ring Round2, NIST level 5.
pub type R2RingL5 = Round2Kem<R2RingL5Params>;
