use super::Scalar;

// Booth recoding of a window of W+1 bits (W value bits, plus the top
// bit of the previous window). The output is (d << 1) | s, where the
// magnitude d is in 0..2^(W-1) (inclusive) and s is the sign bit
// (1 for negative): the window value is (-1)^s * d.
//
// Constant-time: no branch and no table access depends on the input.
#[inline(always)]
pub(crate) fn booth_recode<const W: u32>(w: u32) -> u32 {
    let s = !((w >> W).wrapping_sub(1));
    let d = (1u32 << (W + 1)).wrapping_sub(w).wrapping_sub(1);
    let d = (d & s) | (w & !s);
    let d = (d >> 1) + (d & 1);
    (d << 1) + (s & 1)
}

// Reduces k modulo n and returns it as 33 bytes, little-endian; the
// extra top byte is zero, so that windows may read past bit 255.
pub(crate) fn scalar_bytes(k: &Scalar) -> [u8; 33] {
    let be = k.reduce().to_bytes();
    let mut b = [0u8; 33];
    for (i, v) in be.iter().rev().enumerate() {
        b[i] = *v;
    }
    b
}

// Extracts the window of bits idx-1 .. idx+W-1 (masked by `mask`, which
// is 2^(W+1) - 1). idx MUST be at least 1 and at most 256.
#[inline(always)]
pub(crate) fn window(b: &[u8; 33], idx: usize, mask: u32) -> u32 {
    let off = (idx - 1) >> 3;
    let w = (b[off] as u32) | ((b[off + 1] as u32) << 8);
    (w >> ((idx - 1) & 7)) & mask
}

// First window: bits 0 .. W-1, with an implicit zero below bit 0.
#[inline(always)]
pub(crate) fn first_window(b: &[u8; 33], mask: u32) -> u32 {
    ((b[0] as u32) << 1) & mask
}

#[cfg(test)]
mod tests {

    use super::{booth_recode, first_window, scalar_bytes, window};
    use crate::secp256k1::Scalar;

    fn signed(d: u32) -> i32 {
        let m = (d >> 1) as i32;
        if (d & 1) != 0 { -m } else { m }
    }

    #[test]
    fn recode() {
        // Expected digit: floor(w/2) + (w&1) - 2^W*(w >> W).
        for w in 0..256u32 {
            let e = ((w >> 1) + (w & 1)) as i32 - (((w >> 7) as i32) << 7);
            let d = booth_recode::<7>(w);
            assert!(signed(d) == e);
            assert!((d >> 1) <= 64);
        }
        for w in 0..64u32 {
            let e = ((w >> 1) + (w & 1)) as i32 - (((w >> 5) as i32) << 5);
            let d = booth_recode::<5>(w);
            assert!(signed(d) == e);
            assert!((d >> 1) <= 16);
        }
        assert!(booth_recode::<7>(0) == 0);
        assert!(booth_recode::<7>(0x7F) == (64 << 1));
        assert!(booth_recode::<7>(0x80) == ((64 << 1) | 1));
        assert!(booth_recode::<7>(0xFF) == 1);
        assert!(booth_recode::<5>(0x3F) == 1);
        assert!(booth_recode::<5>(0x21) == ((15 << 1) | 1));
    }

    #[test]
    fn windows() {
        // n - 1 reduces to itself; n reduces to zero.
        let n = Scalar::from_limbs(Scalar::MODULUS);
        let b = scalar_bytes(&n);
        assert!(b.iter().all(|&x| x == 0));
        let b = scalar_bytes(&n.sub_word(1));
        assert!(b[0] == 0x40 && b[31] == 0xFF && b[32] == 0x00);

        let k = Scalar::w64le(0x8000000000000081, 0, 0, 0x8000000000000000);
        let b = scalar_bytes(&k);
        assert!(first_window(&b, 0xFF) == 0x02);
        assert!(window(&b, 7, 0xFF) == 0x02);
        assert!(window(&b, 63, 0xFF) == 0x02);
        assert!(window(&b, 255, 0x3F) == 0x02);
        assert!(window(&b, 252, 0xFF) == 0x10);

        // Sum of all recoded windows restores the scalar.
        let mut acc = [0i64; 40];
        acc[0] = signed(booth_recode::<7>(first_window(&b, 0xFF))) as i64;
        for i in 1..37 {
            acc[i] = signed(booth_recode::<7>(window(&b, 7 * i, 0xFF))) as i64;
        }
        // Propagate into base-2^7 digits and compare with the bytes.
        let mut bits = [0u8; 40 * 7];
        let mut carry = 0i64;
        for i in 0..37 {
            let v = acc[i] + carry;
            let r = v.rem_euclid(128);
            carry = (v - r) / 128;
            for j in 0..7 {
                bits[7 * i + j] = ((r >> j) & 1) as u8;
            }
        }
        assert!(carry == 0);
        for i in 0..256 {
            assert!(bits[i] == (b[i >> 3] >> (i & 7)) & 1);
        }
    }
}
