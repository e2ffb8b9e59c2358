//! Integration tests for the Round2 key encapsulation mechanisms

use round2::kem::{
    generate_a, ParameterSetId, R2NonRingL1, R2RingL1, R2RingL3, R2RingL5, Round2,
    Round2Ciphertext,
};
use round2::prelude::*;
use round2_tests::{module_parameters, scenario_parameters, seeded_rng};
use std::sync::Arc;

fn roundtrip<K: Kem>(seed: u64)
where
    K::SharedSecret: AsRef<[u8]>,
{
    let mut rng = seeded_rng(seed);

    // Generate keypair
    let keypair = K::keypair(&mut rng).unwrap();
    let public_key = K::public_key(&keypair);
    let secret_key = K::secret_key(&keypair);

    // Encapsulate
    let (ciphertext, shared_secret_sender) = K::encapsulate(&mut rng, &public_key).unwrap();

    // Decapsulate
    let shared_secret_recipient = K::decapsulate(&secret_key, &ciphertext).unwrap();

    // Verify shared secrets match
    assert_eq!(
        shared_secret_sender.as_ref(),
        shared_secret_recipient.as_ref()
    );
}

#[test]
fn test_ring_kems() {
    roundtrip::<R2RingL1>(1);
    roundtrip::<R2RingL3>(2);
    roundtrip::<R2RingL5>(3);
}

#[test]
fn test_nonring_kem() {
    roundtrip::<R2NonRingL1>(4);
}

#[test]
fn test_cca_kems() {
    roundtrip::<round2::pke::R2RingL1Cca>(5);
    roundtrip::<round2::pke::R2RingL5Cca>(6);
}

#[test]
fn test_scenario() {
    let params = scenario_parameters();
    let r2 = Round2::new(params);
    let mut rng = seeded_rng(7);

    let (pk, sk) = r2.keypair(&mut rng).unwrap();
    assert_eq!(pk.len(), params.pk_size());
    assert_eq!(sk.len(), params.sk_size());

    let (ct, ss_sender) = r2.encapsulate(&pk, &mut rng).unwrap();
    assert_eq!(ct.len(), params.ct_size());
    // Eight 7-bit u entries and one 6-bit v symbol.
    assert_eq!(ct.len(), 8);
    let ss_recipient = r2.decapsulate(&sk, &ct).unwrap();
    assert_eq!(ss_sender.as_ref(), ss_recipient.as_ref());
}

#[test]
fn test_module_variant() {
    let r2 = Round2::new(module_parameters());
    let mut rng = seeded_rng(8);
    for _ in 0..4 {
        let (pk, sk) = r2.keypair(&mut rng).unwrap();
        let (ct, ss1) = r2.encapsulate(&pk, &mut rng).unwrap();
        let ss2 = r2.decapsulate(&sk, &ct).unwrap();
        assert_eq!(ss1.as_ref(), ss2.as_ref());
    }
}

#[test]
fn test_named_sets_sizes() {
    let mut rng = seeded_rng(9);
    for id in [ParameterSetId::RingL1, ParameterSetId::RingL3, ParameterSetId::RingL5] {
        let r2 = Round2::from_id(id).unwrap();
        let (pk, sk) = r2.keypair(&mut rng).unwrap();
        let (ct, ss) = r2.encapsulate(&pk, &mut rng).unwrap();
        assert_eq!(pk.len(), r2.params().pk_size());
        assert_eq!(sk.len(), r2.params().sk_size());
        assert_eq!(ct.len(), r2.params().ct_size());
        assert_eq!(ss.len(), r2.params().ss_size);
    }
}

#[test]
fn test_matrix_cache_is_transparent() {
    let mut rng = seeded_rng(10);
    let plain = Round2::from_id(ParameterSetId::RingL1).unwrap();
    let (pk, sk) = plain.keypair(&mut rng).unwrap();

    let sigma = &pk.as_ref()[..plain.params().ss_size];
    let matrix = Arc::new(generate_a(sigma, plain.params()).unwrap());
    let cached = plain.clone().with_matrix(matrix);

    let (ct_a, ss_a) = plain.encapsulate(&pk, &mut seeded_rng(11)).unwrap();
    let (ct_b, ss_b) = cached.encapsulate(&pk, &mut seeded_rng(11)).unwrap();
    assert_eq!(ct_a, ct_b);
    assert_eq!(ss_a.as_ref(), ss_b.as_ref());
    assert_eq!(cached.decapsulate(&sk, &ct_b).unwrap().as_ref(), ss_a.as_ref());
}

#[test]
fn test_cpa_decapsulate_garbage_has_fixed_shape() {
    let r2 = Round2::from_id(ParameterSetId::RingL1).unwrap();
    let mut rng = seeded_rng(12);
    let (_, sk) = r2.keypair(&mut rng).unwrap();
    let garbage = Round2Ciphertext::new(vec![0xA5; r2.params().ct_size()]);
    let ss = r2.decapsulate(&sk, &garbage).unwrap();
    assert_eq!(ss.len(), r2.params().ss_size);
}

#[test]
fn test_system_random_roundtrip() {
    let mut rng = SystemRandom::global();
    let r2 = Round2::new(scenario_parameters());
    let (pk, sk) = r2.keypair(&mut rng).unwrap();
    let (ct, ss1) = r2.encapsulate(&pk, &mut rng).unwrap();
    let ss2 = r2.decapsulate(&sk, &ct).unwrap();
    assert_eq!(ss1.as_ref(), ss2.as_ref());
}
