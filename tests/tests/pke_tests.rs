//! Integration tests for Round2 public key encryption

use round2::kem::ParameterSetId;
use round2::pke::{R2NonRingL1Pke, R2RingL3Pke, Round2Encrypt};
use round2::prelude::*;
use round2_tests::{module_parameters, seeded_rng};

fn pke_roundtrip<P: Pke>(seed: u64) {
    let mut rng = seeded_rng(seed);
    let (pk, sk) = P::keypair(&mut rng).unwrap();
    let msg = b"The quick brown fox jumps over the lazy dog";
    let ct = P::encrypt(&pk, msg, Some(&b"context"[..]), &mut rng).unwrap();
    let pt = P::decrypt(&sk, &ct, Some(&b"context"[..])).unwrap();
    assert_eq!(pt, msg);
}

#[test]
fn test_pke_ring_l3() {
    pke_roundtrip::<R2RingL3Pke>(1);
}

#[test]
fn test_pke_nonring_l1() {
    pke_roundtrip::<R2NonRingL1Pke>(2);
}

#[test]
fn test_pke_module_variant() {
    let pke = Round2Encrypt::new(module_parameters());
    let mut rng = seeded_rng(3);
    let (pk, sk) = pke.keypair(&mut rng).unwrap();
    let ct = pke.encrypt(&pk, b"module", &[], &mut rng).unwrap();
    assert_eq!(ct.len(), 6 + pke.params().pke_overhead());
    assert_eq!(pke.decrypt(&sk, &ct, &[]).unwrap(), b"module");
}

#[test]
fn test_wrong_recipient() {
    let pke = Round2Encrypt::from_id(ParameterSetId::RingL1).unwrap();
    let mut rng = seeded_rng(4);
    let (pk, _) = pke.keypair(&mut rng).unwrap();
    let (_, other_sk) = pke.keypair(&mut rng).unwrap();
    let ct = pke.encrypt(&pk, b"not for you", &[], &mut rng).unwrap();

    let err: Error = pke.decrypt(&other_sk, &ct, &[]).unwrap_err().into();
    assert!(matches!(err, Error::DecryptionFailed { .. }));
}

#[test]
fn test_cross_set_ciphertext_rejected() {
    let l1 = Round2Encrypt::from_id(ParameterSetId::RingL1).unwrap();
    let l3 = Round2Encrypt::from_id(ParameterSetId::RingL3).unwrap();
    let mut rng = seeded_rng(5);
    let (pk1, _) = l1.keypair(&mut rng).unwrap();
    let (_, sk3) = l3.keypair(&mut rng).unwrap();

    // An L1 ciphertext is shorter than the L3 overhead.
    let ct = l1.encrypt(&pk1, &[], &[], &mut rng).unwrap();
    assert!(l3.decrypt(&sk3, &ct, &[]).is_err());
}
