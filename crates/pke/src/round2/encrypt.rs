//! Round2 CCA key encapsulation and hybrid public key encryption.

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::marker::PhantomData;

use rand::{CryptoRng, RngCore};
use round2_api::error::{Error as ApiError, Result as ApiResult};
use round2_api::{Kem, Pke};
use round2_kem::error::Error as KemError;
use round2_kem::{
    ParameterSetId, Parameters, PublicMatrix, R2NonRingL1Params, R2NonRingL3Params,
    R2NonRingL5Params, R2RingL1Params, R2RingL3Params, R2RingL5Params, Round2, Round2Ciphertext,
    Round2Params, Round2PublicKey, Round2SecretKey, Round2SharedSecret,
};
use round2_params::pqc::round2::ROUND2_DEM_NONCE_BYTES;

use super::{cca, dem};
use crate::error::{Error, Result};

/// CCA-secure Round2 with runtime-selected parameters.
///
/// Secret keys produced here have the layout `sk || H(pk) || pk` and are
/// not interchangeable with CPA secret keys.
#[derive(Clone, Debug)]
pub struct Round2Encrypt {
    inner: Round2,
}

impl Round2Encrypt {
    /// Create an instance for validated parameters.
    pub fn new(params: Parameters) -> Self {
        Self {
            inner: Round2::new(params),
        }
    }

    /// Create an instance for a named parameter set.
    pub fn from_id(id: ParameterSetId) -> Result<Self> {
        Ok(Self::new(id.parameters()?))
    }

    /// Attach a cached public matrix.
    pub fn with_matrix(self, matrix: Arc<PublicMatrix>) -> Self {
        Self {
            inner: self.inner.with_matrix(matrix),
        }
    }

    /// Parameters of this instance.
    pub fn params(&self) -> &Parameters {
        self.inner.params()
    }

    /// Generate a CCA key pair.
    pub fn keypair<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
    ) -> Result<(Round2PublicKey, Round2SecretKey)> {
        cca::keypair(&self.inner, rng)
    }

    /// Encapsulate a fresh shared secret to `pk`.
    pub fn encapsulate<R: RngCore + CryptoRng>(
        &self,
        pk: &Round2PublicKey,
        rng: &mut R,
    ) -> Result<(Round2Ciphertext, Round2SharedSecret)> {
        cca::encapsulate(&self.inner, pk, rng)
    }

    /// Recover the shared secret from `ct`.
    ///
    /// A well-formed but invalid ciphertext yields a pseudorandom secret
    /// derived from the secret key, never an error.
    pub fn decapsulate(
        &self,
        sk: &Round2SecretKey,
        ct: &Round2Ciphertext,
    ) -> Result<Round2SharedSecret> {
        cca::decapsulate(&self.inner, sk, ct)
    }

    /// Encrypt a message of any length under `pk`, authenticating `aad`.
    ///
    /// The output is `pke_overhead` bytes longer than `msg`.
    pub fn encrypt<R: RngCore + CryptoRng>(
        &self,
        pk: &Round2PublicKey,
        msg: &[u8],
        aad: &[u8],
        rng: &mut R,
    ) -> Result<Vec<u8>> {
        let (kem_ct, key) = self.encapsulate(pk, rng)?;

        let mut nonce = [0u8; ROUND2_DEM_NONCE_BYTES];
        rng.try_fill_bytes(&mut nonce).map_err(|_| KemError::Randomness {
            context: "Round2 PKE nonce",
            details: "randomness source failed",
        })?;
        let sealed = dem::seal(key.as_ref(), &nonce, msg, aad)?;

        let mut out = Vec::with_capacity(self.params().pke_overhead() + msg.len());
        out.extend_from_slice(kem_ct.as_ref());
        out.extend_from_slice(&nonce);
        out.extend_from_slice(&sealed);
        Ok(out)
    }

    /// Decrypt the output of [`Round2Encrypt::encrypt`].
    pub fn decrypt(&self, sk: &Round2SecretKey, ct: &[u8], aad: &[u8]) -> Result<Vec<u8>> {
        let params = self.params();
        if ct.len() < params.pke_overhead() {
            return Err(Error::InvalidCiphertextFormat("ciphertext too short"));
        }

        let (kem_ct, rest) = ct.split_at(params.cca_ct_size());
        let (nonce_bytes, sealed) = rest.split_at(ROUND2_DEM_NONCE_BYTES);
        let mut nonce = [0u8; ROUND2_DEM_NONCE_BYTES];
        nonce.copy_from_slice(nonce_bytes);

        let key = self.decapsulate(sk, &Round2Ciphertext::new(kem_ct.to_vec()))?;
        dem::open(key.as_ref(), &nonce, sealed, aad)
    }
}

/// CCA-secure Round2 KEM with compile-time parameters.
pub struct Round2CcaKem<P: Round2Params> {
    _params: PhantomData<P>,
}

/// Round2 public key encryption with compile-time parameters.
pub struct Round2Pke<P: Round2Params> {
    _params: PhantomData<P>,
}

fn runtime<P: Round2Params>() -> ApiResult<Round2Encrypt> {
    Ok(Round2Encrypt::new(P::parameters()?))
}

impl<P: Round2Params> Kem for Round2CcaKem<P> {
    type PublicKey = Round2PublicKey;
    type SecretKey = Round2SecretKey;
    type SharedSecret = Round2SharedSecret;
    type Ciphertext = Round2Ciphertext;
    type KeyPair = (Self::PublicKey, Self::SecretKey);

    fn name() -> &'static str {
        match P::ID {
            ParameterSetId::NonRingL1 => "Round2-NonRing-L1-CCA",
            ParameterSetId::NonRingL3 => "Round2-NonRing-L3-CCA",
            ParameterSetId::NonRingL5 => "Round2-NonRing-L5-CCA",
            ParameterSetId::RingL1 => "Round2-Ring-L1-CCA",
            ParameterSetId::RingL3 => "Round2-Ring-L3-CCA",
            ParameterSetId::RingL5 => "Round2-Ring-L5-CCA",
        }
    }

    fn keypair<R: CryptoRng + RngCore>(rng: &mut R) -> ApiResult<Self::KeyPair> {
        Ok(runtime::<P>()?.keypair(rng)?)
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
        Ok(runtime::<P>()?.encapsulate(public_key, rng)?)
    }

    fn decapsulate(
        secret_key: &Self::SecretKey,
        ciphertext: &Self::Ciphertext,
    ) -> ApiResult<Self::SharedSecret> {
        Ok(runtime::<P>()?.decapsulate(secret_key, ciphertext)?)
    }
}

impl<P: Round2Params> Pke for Round2Pke<P> {
    type PublicKey = Round2PublicKey;
    type SecretKey = Round2SecretKey;
    type Ciphertext = Vec<u8>;

    fn name() -> &'static str {
        match P::ID {
            ParameterSetId::NonRingL1 => "Round2-NonRing-L1-ChaCha20Poly1305",
            ParameterSetId::NonRingL3 => "Round2-NonRing-L3-ChaCha20Poly1305",
            ParameterSetId::NonRingL5 => "Round2-NonRing-L5-ChaCha20Poly1305",
            ParameterSetId::RingL1 => "Round2-Ring-L1-ChaCha20Poly1305",
            ParameterSetId::RingL3 => "Round2-Ring-L3-ChaCha20Poly1305",
            ParameterSetId::RingL5 => "Round2-Ring-L5-ChaCha20Poly1305",
        }
    }

    fn keypair<R: CryptoRng + RngCore>(rng: &mut R) -> ApiResult<(Self::PublicKey, Self::SecretKey)> {
        Ok(runtime::<P>()?.keypair(rng)?)
    }

    fn encrypt<R: RngCore + CryptoRng>(
        pk_recipient: &Self::PublicKey,
        plaintext: &[u8],
        aad: Option<&[u8]>,
        rng: &mut R,
    ) -> ApiResult<Self::Ciphertext> {
        runtime::<P>()?
            .encrypt(pk_recipient, plaintext, aad.unwrap_or(&[]), rng)
            .map_err(ApiError::from)
    }

    fn decrypt(
        sk_recipient: &Self::SecretKey,
        ciphertext: &Self::Ciphertext,
        aad: Option<&[u8]>,
    ) -> ApiResult<Vec<u8>> {
        runtime::<P>()?
            .decrypt(sk_recipient, ciphertext, aad.unwrap_or(&[]))
            .map_err(ApiError::from)
    }
}

/// CCA-secure non-ring Round2, NIST level 1.
pub type R2NonRingL1Cca = Round2CcaKem<R2NonRingL1Params>;
/// CCA-secure non-ring Round2, NIST level 3.
pub type R2NonRingL3Cca = Round2CcaKem<R2NonRingL3Params>;
/// CCA-secure non-ring Round2, NIST level 5.
pub type R2NonRingL5Cca = Round2CcaKem<R2NonRingL5Params>;
/// CCA-secure ring Round2, NIST level 1.
pub type R2RingL1Cca = Round2CcaKem<R2RingL1Params>;
/// CCA-secure ring Round2, NIST level 3.
pub type R2RingL3Cca = Round2CcaKem<R2RingL3Params>;
/// CCA-secure ring Round2, NIST level 5.
pub type R2RingL5Cca = Round2CcaKem<R2RingL5Params>;

/// Non-ring Round2 encryption, NIST level 1.
pub type R2NonRingL1Pke = Round2Pke<R2NonRingL1Params>;
/// Non-ring Round2 encryption, NIST level 3.
pub type R2NonRingL3Pke = Round2Pke<R2NonRingL3Params>;
/// Non-ring Round2 encryption, NIST level 5.
pub type R2NonRingL5Pke = Round2Pke<R2NonRingL5Params>;
/// Ring Round2 encryption, NIST level 1.
pub type R2RingL1Pke = Round2Pke<R2RingL1Params>;
/// Ring Round2 encryption, NIST level 3.
pub type R2RingL3Pke = Round2Pke<R2RingL3Params>;
/// Ring Round2 encryption, NIST level 5.
pub type R2RingL5Pke = Round2Pke<R2RingL5Params>;
