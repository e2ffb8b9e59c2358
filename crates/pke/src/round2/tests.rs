use super::*;
use alloc::sync::Arc;
use alloc::vec::Vec;
use crate::error::Error;
use rand::SeedableRng;
use rand_chacha::ChaChaRng;
use round2_internal::constant_time::ct_eq;
use round2_api::{Error as CoreError, Kem, Pke};
use round2_kem::{
    configure, generate_a, R2NonRingL1Params, R2RingL1Params, R2RingL3Params, R2RingL5Params,
    Round2Ciphertext, Round2Params,
};

fn ring_l1() -> Round2Encrypt {
    Round2Encrypt::from_id(round2_kem::ParameterSetId::RingL1).unwrap()
}

#[test]
fn test_cca_sizes() {
    let r2 = ring_l1();
    let mut rng = ChaChaRng::seed_from_u64(7);
    let (pk, sk) = r2.keypair(&mut rng).unwrap();
    assert_eq!(pk.len(), 749);
    assert_eq!(sk.len(), 781);
    assert_eq!(sk.len(), R2RingL1Params::CCA_SECRET_KEY_BYTES);

    let (ct, ss) = r2.encapsulate(&pk, &mut rng).unwrap();
    assert_eq!(ct.len(), 845);
    assert_eq!(ct.len(), R2RingL1Params::CCA_CIPHERTEXT_BYTES);
    assert_eq!(ss.len(), 16);
    assert_eq!(r2.params().pke_overhead(), 845 + 12 + 16);
}

#[test]
fn test_secret_key_embeds_public_key() {
    let r2 = ring_l1();
    let mut rng = ChaChaRng::seed_from_u64(8);
    let (pk, sk) = r2.keypair(&mut rng).unwrap();
    let tail = &sk.as_ref()[sk.len() - pk.len()..];
    assert_eq!(tail, pk.as_ref());
}

fn check_cca_kem<K: Kem>()
where
    K::SharedSecret: AsRef<[u8]>,
{
    let mut rng = ChaChaRng::seed_from_u64(99);
    let keypair = K::keypair(&mut rng).unwrap();
    let pk = K::public_key(&keypair);
    let sk = K::secret_key(&keypair);
    let (ct, ss1) = K::encapsulate(&mut rng, &pk).unwrap();
    let ss2 = K::decapsulate(&sk, &ct).unwrap();
    assert!(ct_eq(ss1, ss2));
}

#[test]
fn test_cca_kem_ring_sets() {
    check_cca_kem::<Round2CcaKem<R2RingL1Params>>();
    check_cca_kem::<Round2CcaKem<R2RingL3Params>>();
    check_cca_kem::<Round2CcaKem<R2RingL5Params>>();
}

#[test]
fn test_cca_kem_nonring_l1() {
    check_cca_kem::<Round2CcaKem<R2NonRingL1Params>>();
}

#[test]
fn test_names() {
    assert_eq!(Round2CcaKem::<R2RingL1Params>::name(), "Round2-Ring-L1-CCA");
    assert_eq!(
        Round2Pke::<R2NonRingL1Params>::name(),
        "Round2-NonRing-L1-ChaCha20Poly1305"
    );
}

#[test]
fn test_implicit_rejection() {
    let r2 = ring_l1();
    let mut rng = ChaChaRng::seed_from_u64(11);
    let (pk, sk) = r2.keypair(&mut rng).unwrap();
    let (ct, ss) = r2.encapsulate(&pk, &mut rng).unwrap();

    // Flip one bit in the CPA part and one in the confirmation tag.
    for pos in [0usize, ct.len() - 1] {
        let mut bytes = ct.as_ref().to_vec();
        bytes[pos] ^= 0x01;
        let tampered = Round2Ciphertext::new(bytes);

        let k1 = r2.decapsulate(&sk, &tampered).unwrap();
        let k2 = r2.decapsulate(&sk, &tampered).unwrap();
        assert_eq!(k1.len(), ss.len());
        assert_ne!(k1.as_ref(), ss.as_ref());
        // Rejection is deterministic in (sk, ct).
        assert_eq!(k1.as_ref(), k2.as_ref());
    }
}

#[test]
fn test_decapsulate_wrong_lengths() {
    let r2 = ring_l1();
    let mut rng = ChaChaRng::seed_from_u64(12);
    let (pk, sk) = r2.keypair(&mut rng).unwrap();
    let (ct, _) = r2.encapsulate(&pk, &mut rng).unwrap();

    let short = Round2Ciphertext::new(ct.as_ref()[..ct.len() - 1].to_vec());
    assert!(r2.decapsulate(&sk, &short).is_err());

    let cpa_sk = round2_kem::Round2SecretKey::new(sk.as_ref()[..16].to_vec());
    assert!(r2.decapsulate(&cpa_sk, &ct).is_err());
}

#[test]
fn test_encrypt_decrypt_lengths() {
    let r2 = ring_l1();
    let mut rng = ChaChaRng::seed_from_u64(21);
    let (pk, sk) = r2.keypair(&mut rng).unwrap();

    for len in [0usize, 1, 37, 4096] {
        let msg: Vec<u8> = (0..len).map(|i| (i * 7 + 3) as u8).collect();
        let ct = r2.encrypt(&pk, &msg, b"header", &mut rng).unwrap();
        assert_eq!(ct.len(), msg.len() + r2.params().pke_overhead());
        let pt = r2.decrypt(&sk, &ct, b"header").unwrap();
        assert_eq!(pt, msg);
    }
}

#[test]
fn test_encrypt_is_randomized() {
    let r2 = ring_l1();
    let mut rng = ChaChaRng::seed_from_u64(22);
    let (pk, _) = r2.keypair(&mut rng).unwrap();
    let a = r2.encrypt(&pk, b"same", &[], &mut rng).unwrap();
    let b = r2.encrypt(&pk, b"same", &[], &mut rng).unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_aad_mismatch() {
    let r2 = ring_l1();
    let mut rng = ChaChaRng::seed_from_u64(23);
    let (pk, sk) = r2.keypair(&mut rng).unwrap();
    let ct = r2.encrypt(&pk, b"attack at dawn", b"v1", &mut rng).unwrap();
    assert!(matches!(
        r2.decrypt(&sk, &ct, b"v2"),
        Err(Error::DecryptionFailed(_))
    ));
}

#[test]
fn test_tampered_ciphertext() {
    let r2 = ring_l1();
    let mut rng = ChaChaRng::seed_from_u64(24);
    let (pk, sk) = r2.keypair(&mut rng).unwrap();
    let ct = r2.encrypt(&pk, b"attack at dawn", &[], &mut rng).unwrap();

    // KEM part, nonce and body each get one flipped bit.
    let overhead = r2.params().pke_overhead();
    for pos in [3usize, overhead - 20, ct.len() - 1] {
        let mut bad = ct.clone();
        bad[pos] ^= 0x80;
        assert!(matches!(
            r2.decrypt(&sk, &bad, &[]),
            Err(Error::DecryptionFailed(_))
        ));
    }
}

#[test]
fn test_truncated_ciphertext() {
    let r2 = ring_l1();
    let mut rng = ChaChaRng::seed_from_u64(25);
    let (pk, sk) = r2.keypair(&mut rng).unwrap();
    let ct = r2.encrypt(&pk, &[], &[], &mut rng).unwrap();
    assert!(matches!(
        r2.decrypt(&sk, &ct[..ct.len() - 1], &[]),
        Err(Error::InvalidCiphertextFormat(_))
    ));

    let err: CoreError = r2.decrypt(&sk, &[], &[]).unwrap_err().into();
    assert!(matches!(err, CoreError::InvalidCiphertext { .. }));
}

#[test]
fn test_pke_trait() {
    type P = Round2Pke<R2RingL1Params>;
    let mut rng = ChaChaRng::seed_from_u64(26);
    let (pk, sk) = P::keypair(&mut rng).unwrap();
    let ct = P::encrypt(&pk, b"hello", Some(&b"aad"[..]), &mut rng).unwrap();
    assert_eq!(P::decrypt(&sk, &ct, Some(&b"aad"[..])).unwrap(), b"hello");

    let err = P::decrypt(&sk, &ct, None).unwrap_err();
    assert!(matches!(err, CoreError::DecryptionFailed { .. }));
}

#[test]
fn test_scenario_parameters() {
    let r2 = Round2Encrypt::new(configure(16, 8, 1, 3, 512, 7, 6, 1, 1, 1).unwrap());
    let mut rng = ChaChaRng::seed_from_u64(27);
    let (pk, sk) = r2.keypair(&mut rng).unwrap();
    assert_eq!(sk.len(), r2.params().cca_sk_size());
    for _ in 0..4 {
        let ct = r2.encrypt(&pk, b"tiny", &[], &mut rng).unwrap();
        assert_eq!(r2.decrypt(&sk, &ct, &[]).unwrap(), b"tiny");
    }
}

#[test]
fn test_cached_matrix_same_output() {
    let mut rng = ChaChaRng::seed_from_u64(28);
    let plain = ring_l1();
    let (pk, sk) = plain.keypair(&mut rng).unwrap();
    let sigma = &pk.as_ref()[..plain.params().ss_size];
    let matrix = Arc::new(generate_a(sigma, plain.params()).unwrap());
    let cached = ring_l1().with_matrix(matrix);

    let mut r1 = ChaChaRng::seed_from_u64(5);
    let mut r2 = ChaChaRng::seed_from_u64(5);
    let a = plain.encrypt(&pk, b"cache", &[], &mut r1).unwrap();
    let b = cached.encrypt(&pk, b"cache", &[], &mut r2).unwrap();
    assert_eq!(a, b);
    assert_eq!(cached.decrypt(&sk, &a, &[]).unwrap(), b"cache");
}

/// Serves `draws` fills from a seeded generator, then reports failure.
struct ExhaustingRng {
    inner: ChaChaRng,
    draws: usize,
}

impl rand::RngCore for ExhaustingRng {
    fn next_u32(&mut self) -> u32 {
        panic!("entropy unavailable")
    }

    fn next_u64(&mut self) -> u64 {
        panic!("entropy unavailable")
    }

    fn fill_bytes(&mut self, _dest: &mut [u8]) {
        panic!("entropy unavailable")
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> core::result::Result<(), rand::Error> {
        if self.draws == 0 {
            let code = core::num::NonZeroU32::new(rand::Error::CUSTOM_START).unwrap();
            return Err(rand::Error::from(code));
        }
        self.draws -= 1;
        rand::RngCore::try_fill_bytes(&mut self.inner, dest)
    }
}

impl rand::CryptoRng for ExhaustingRng {}

fn is_randomness_error(err: &Error) -> bool {
    matches!(err, Error::Api(CoreError::RandomGenerationError { .. }))
}

#[test]
fn test_unavailable_randomness_is_reported() {
    let r2 = scenario();
    let mut dead = ExhaustingRng {
        inner: ChaChaRng::seed_from_u64(40),
        draws: 0,
    };
    assert!(is_randomness_error(&r2.keypair(&mut dead).unwrap_err()));

    let mut rng = ChaChaRng::seed_from_u64(41);
    let (pk, _) = r2.keypair(&mut rng).unwrap();
    assert!(is_randomness_error(&r2.encapsulate(&pk, &mut dead).unwrap_err()));

    // The payload draw succeeds and the nonce draw fails.
    let mut one_draw = ExhaustingRng {
        inner: ChaChaRng::seed_from_u64(42),
        draws: 1,
    };
    assert!(is_randomness_error(
        &r2.encrypt(&pk, b"msg", &[], &mut one_draw).unwrap_err()
    ));
}

fn scenario() -> Round2Encrypt {
    Round2Encrypt::new(configure(16, 8, 1, 3, 512, 7, 6, 1, 1, 1).unwrap())
}

#[test]
fn test_every_single_bit_flip_is_rejected_by_decapsulate() {
    let r2 = scenario();
    let mut rng = ChaChaRng::seed_from_u64(43);
    let (pk, sk) = r2.keypair(&mut rng).unwrap();
    let (ct, ss) = r2.encapsulate(&pk, &mut rng).unwrap();
    assert_eq!(ct.len(), 24);
    assert_eq!(r2.decapsulate(&sk, &ct).unwrap().as_ref(), ss.as_ref());

    for bit in 0..ct.len() * 8 {
        let mut bytes = ct.as_ref().to_vec();
        bytes[bit / 8] ^= 1 << (bit % 8);
        let key = r2.decapsulate(&sk, &Round2Ciphertext::new(bytes)).unwrap();
        assert_ne!(key.as_ref(), ss.as_ref(), "bit {} was accepted", bit);
    }
}

#[test]
fn test_every_single_bit_flip_is_rejected_by_decrypt() {
    let r2 = scenario();
    let mut rng = ChaChaRng::seed_from_u64(44);
    let (pk, sk) = r2.keypair(&mut rng).unwrap();
    let ct = r2.encrypt(&pk, b"flip", b"aad", &mut rng).unwrap();
    assert_eq!(r2.decrypt(&sk, &ct, b"aad").unwrap(), b"flip");

    for bit in 0..ct.len() * 8 {
        let mut bad = ct.clone();
        bad[bit / 8] ^= 1 << (bit % 8);
        assert!(
            matches!(r2.decrypt(&sk, &bad, b"aad"), Err(Error::DecryptionFailed(_))),
            "bit {} was accepted",
            bit
        );
    }
}
