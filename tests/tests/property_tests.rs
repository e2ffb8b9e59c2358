//! Property-based tests for Round2

use proptest::prelude::*;
use round2::kem::{configure, generate_a, ParameterSetId, Round2, Round2Params};
use round2::pke::Round2Encrypt;
use round2_params::pqc::round2::ParameterSet;
use round2_tests::{scenario_parameters, seeded_rng};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn matrix_entries_below_q(seed in any::<[u8; 16]>()) {
        let params = *Round2::from_id(ParameterSetId::RingL1).unwrap().params();
        let a = generate_a(&seed, &params).unwrap();
        prop_assert_eq!(a.coefficients().len(), params.d);
        prop_assert!(a.coefficients().iter().all(|&x| u32::from(x) < params.q));
    }

    #[test]
    fn matrix_is_deterministic(seed in any::<[u8; 16]>()) {
        let params = scenario_parameters();
        let a = generate_a(&seed, &params).unwrap();
        let b = generate_a(&seed, &params).unwrap();
        prop_assert_eq!(a.coefficients(), b.coefficients());
        prop_assert_eq!(a.coefficients().len(), params.d * params.d);
    }

    #[test]
    fn scenario_kem_roundtrip(seed in any::<u64>()) {
        let r2 = Round2::new(scenario_parameters());
        let mut rng = seeded_rng(seed);
        let (pk, sk) = r2.keypair(&mut rng).unwrap();
        let (ct, ss1) = r2.encapsulate(&pk, &mut rng).unwrap();
        let ss2 = r2.decapsulate(&sk, &ct).unwrap();
        prop_assert_eq!(ss1.as_ref(), ss2.as_ref());
    }

    #[test]
    fn ring_pke_roundtrip(
        seed in any::<u64>(),
        msg in prop::collection::vec(any::<u8>(), 0..512),
        aad in prop::collection::vec(any::<u8>(), 0..32),
    ) {
        let pke = Round2Encrypt::from_id(ParameterSetId::RingL1).unwrap();
        let mut rng = seeded_rng(seed);
        let (pk, sk) = pke.keypair(&mut rng).unwrap();
        let ct = pke.encrypt(&pk, &msg, &aad, &mut rng).unwrap();
        prop_assert_eq!(ct.len(), msg.len() + pke.params().pke_overhead());
        prop_assert_eq!(pke.decrypt(&sk, &ct, &aad).unwrap(), msg);
    }

    #[test]
    fn p_bits_above_log_q_rejected(extra in 1u32..4) {
        prop_assert!(configure(16, 8, 1, 3, 512, 9 + extra, 6, 1, 1, 1).is_err());
    }

    #[test]
    fn d_not_multiple_of_n_rejected(d in 9usize..64) {
        prop_assume!(d % 4 != 0);
        prop_assert!(configure(16, d, 4, 2, 1024, 8, 6, 1, 1, 1).is_err());
    }
}

#[test]
fn zero_parameters_rejected() {
    assert!(configure(0, 8, 1, 3, 512, 7, 6, 1, 1, 1).is_err());
    assert!(configure(16, 0, 1, 3, 512, 7, 6, 1, 1, 1).is_err());
    assert!(configure(16, 8, 1, 0, 512, 7, 6, 1, 1, 1).is_err());
    assert!(configure(16, 8, 1, 3, 512, 7, 6, 0, 1, 1).is_err());
    assert!(configure(16, 8, 1, 3, 512, 7, 6, 1, 1, 0).is_err());
}

#[test]
fn weight_above_dimension_rejected() {
    assert!(configure(16, 8, 1, 9, 512, 7, 6, 1, 1, 1).is_err());
}

#[test]
fn compile_time_sizes_match_runtime() {
    fn check<P: Round2Params>() {
        let params = P::parameters().unwrap();
        assert_eq!(P::PUBLIC_KEY_BYTES, params.pk_size());
        assert_eq!(P::SECRET_KEY_BYTES, params.sk_size());
        assert_eq!(P::CIPHERTEXT_BYTES, params.ct_size());
        assert_eq!(P::CCA_SECRET_KEY_BYTES, params.cca_sk_size());
        assert_eq!(P::CCA_CIPHERTEXT_BYTES, params.cca_ct_size());
        let set: ParameterSet = P::SET;
        assert_eq!(set.pke_overhead_bytes(), params.pke_overhead());
    }
    check::<round2::kem::R2NonRingL1Params>();
    check::<round2::kem::R2NonRingL3Params>();
    check::<round2::kem::R2NonRingL5Params>();
    check::<round2::kem::R2RingL1Params>();
    check::<round2::kem::R2RingL3Params>();
    check::<round2::kem::R2RingL5Params>();
}
