//! Little-endian bit packing of coefficient vectors.

use alloc::vec::Vec;

/// Bytes needed to pack `count` values of `bits` bits.
pub(crate) fn packed_len(count: usize, bits: u32) -> usize {
    (count * bits as usize + 7) / 8
}

/// Append the low `bits` bits of every value to `out`, least significant bit first.
pub(crate) fn pack_bits(values: &[u16], bits: u32, out: &mut Vec<u8>) {
    let mask = (1u32 << bits) - 1;
    let mut acc: u32 = 0;
    let mut filled = 0u32;

    for &value in values {
        acc |= (u32::from(value) & mask) << filled;
        filled += bits;
        while filled >= 8 {
            out.push(acc as u8);
            acc >>= 8;
            filled -= 8;
        }
    }
    if filled > 0 {
        out.push(acc as u8);
    }
}

/// Read `count` values of `bits` bits from `bytes`; the inverse of `pack_bits`.
pub(crate) fn unpack_bits(bytes: &[u8], count: usize, bits: u32) -> Vec<u16> {
    let mask = (1u32 << bits) - 1;
    let mut input = bytes.iter().copied();
    let mut acc: u32 = 0;
    let mut filled = 0u32;
    let mut out = Vec::with_capacity(count);

    for _ in 0..count {
        while filled < bits {
            acc |= u32::from(input.next().unwrap_or(0)) << filled;
            filled += 8;
        }
        out.push((acc & mask) as u16);
        acc >>= bits;
        filled -= bits;
    }
    out
}
