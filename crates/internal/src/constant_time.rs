//! Constant-time operations to prevent timing attacks
//!
//! Decapsulation compares a re-encrypted ciphertext against the received one
//! and picks either the real or the rejection key. Both steps go through these
//! helpers so neither the comparison nor the selection branches on secrets.

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

/// Constant-time comparison of two byte slices
///
/// Slices of different length compare unequal; length is treated as public.
pub fn ct_eq<A, B>(a: A, b: B) -> bool
where
    A: AsRef<[u8]>,
    B: AsRef<[u8]>,
{
    ct_eq_choice(a, b).into()
}

/// Constant-time equality check that returns a Choice (0 or 1)
pub fn ct_eq_choice<A, B>(a: A, b: B) -> Choice
where
    A: AsRef<[u8]>,
    B: AsRef<[u8]>,
{
    let a = a.as_ref();
    let b = b.as_ref();

    if a.len() != b.len() {
        return Choice::from(0);
    }

    a.ct_eq(b)
}

/// Constant-time equality of a split buffer against a contiguous one
///
/// Compares `head || tail` with `whole` without concatenating the parts.
pub fn ct_eq_concat(head: &[u8], tail: &[u8], whole: &[u8]) -> Choice {
    if head.len() + tail.len() != whole.len() {
        return Choice::from(0);
    }
    let (left, right) = whole.split_at(head.len());
    head.ct_eq(left) & tail.ct_eq(right)
}

/// Constant-time selection between two equally long buffers
///
/// Writes `on_true` into `out` when `choice` is set and `on_false` otherwise.
pub fn ct_select_into(out: &mut [u8], on_false: &[u8], on_true: &[u8], choice: Choice) {
    debug_assert_eq!(out.len(), on_false.len());
    debug_assert_eq!(out.len(), on_true.len());

    for ((o, f), t) in out.iter_mut().zip(on_false.iter()).zip(on_true.iter()) {
        *o = u8::conditional_select(f, t, choice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaChaRng;

    #[test]
    fn test_ct_eq() {
        assert!(ct_eq([1u8, 2, 3], [1u8, 2, 3]));
        assert!(!ct_eq([1u8, 2, 3], [1u8, 2, 4]));
        assert!(!ct_eq([1u8, 2, 3], [1u8, 2]));
        assert!(ct_eq([0u8; 0], [0u8; 0]));
    }

    #[test]
    fn test_ct_eq_concat() {
        let whole = [1u8, 2, 3, 4, 5];
        assert!(bool::from(ct_eq_concat(&whole[..2], &whole[2..], &whole)));
        assert!(bool::from(ct_eq_concat(&[], &whole, &whole)));
        assert!(!bool::from(ct_eq_concat(&[1, 2], &[3, 4, 6], &whole)));
        assert!(!bool::from(ct_eq_concat(&[1, 2], &[3, 4], &whole)));
    }

    #[test]
    fn test_ct_select_into() {
        let mut rng = ChaChaRng::seed_from_u64(42);
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        rng.fill_bytes(&mut a);
        rng.fill_bytes(&mut b);

        let mut out = [0u8; 32];
        ct_select_into(&mut out, &a, &b, Choice::from(0));
        assert_eq!(out, a);
        ct_select_into(&mut out, &a, &b, Choice::from(1));
        assert_eq!(out, b);
    }
}
