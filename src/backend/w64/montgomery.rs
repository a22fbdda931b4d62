use super::{addcarry_u64, subborrow_u64, umull, umull_add, umull_add2};
use crate::backend::GFsecp256k1;

// Montgomery arithmetic for the secp256k1 base field, with R = 2^256.
// A value x is represented by x*R mod p; products of representations
// are followed by a division by R (Montgomery reduction), which yields
// the representation of the product.

impl GFsecp256k1 {

    // -1/p mod 2^64
    pub(crate) const M0I: u64 = Self::make_m0i(Self::MODULUS[0]);

    /// R mod p, i.e. the Montgomery representation of 1.
    pub const MONT_ONE: Self = Self::w64le(0x00000001000003D1, 0, 0, 0);

    /// R^2 mod p = 2^512 mod p; multiplying by this value converts into
    /// the Montgomery domain.
    pub const R2: Self = Self::w64le(0x000007A2000E90A1, 1, 0, 0);

    // Product of two 256-bit values, over 512 bits.
    #[inline(always)]
    fn mul8(a: &Self, b: &Self) -> [u64; 8] {
        let (a0, a1, a2, a3) = (a.0[0], a.0[1], a.0[2], a.0[3]);
        let (b0, b1, b2, b3) = (b.0[0], b.0[1], b.0[2], b.0[3]);

        let (e0, e1) = umull(a0, b0);
        let (e2, e3) = umull(a1, b1);
        let (e4, e5) = umull(a2, b2);
        let (e6, e7) = umull(a3, b3);

        let (lo, hi) = umull(a0, b1);
        let (e1, cc) = addcarry_u64(e1, lo, 0);
        let (e2, cc) = addcarry_u64(e2, hi, cc);
        let (lo, hi) = umull(a0, b3);
        let (e3, cc) = addcarry_u64(e3, lo, cc);
        let (e4, cc) = addcarry_u64(e4, hi, cc);
        let (lo, hi) = umull(a2, b3);
        let (e5, cc) = addcarry_u64(e5, lo, cc);
        let (e6, cc) = addcarry_u64(e6, hi, cc);
        let (e7, _)  = addcarry_u64(e7, 0, cc);

        let (lo, hi) = umull(a1, b0);
        let (e1, cc) = addcarry_u64(e1, lo, 0);
        let (e2, cc) = addcarry_u64(e2, hi, cc);
        let (lo, hi) = umull(a3, b0);
        let (e3, cc) = addcarry_u64(e3, lo, cc);
        let (e4, cc) = addcarry_u64(e4, hi, cc);
        let (lo, hi) = umull(a3, b2);
        let (e5, cc) = addcarry_u64(e5, lo, cc);
        let (e6, cc) = addcarry_u64(e6, hi, cc);
        let (e7, _)  = addcarry_u64(e7, 0, cc);

        let (lo, hi) = umull(a0, b2);
        let (e2, cc) = addcarry_u64(e2, lo, 0);
        let (e3, cc) = addcarry_u64(e3, hi, cc);
        let (lo, hi) = umull(a1, b3);
        let (e4, cc) = addcarry_u64(e4, lo, cc);
        let (e5, cc) = addcarry_u64(e5, hi, cc);
        let (e6, cc) = addcarry_u64(e6, 0, cc);
        let (e7, _)  = addcarry_u64(e7, 0, cc);

        let (lo, hi) = umull(a2, b0);
        let (e2, cc) = addcarry_u64(e2, lo, 0);
        let (e3, cc) = addcarry_u64(e3, hi, cc);
        let (lo, hi) = umull(a3, b1);
        let (e4, cc) = addcarry_u64(e4, lo, cc);
        let (e5, cc) = addcarry_u64(e5, hi, cc);
        let (e6, cc) = addcarry_u64(e6, 0, cc);
        let (e7, _)  = addcarry_u64(e7, 0, cc);

        let (lo, hi) = umull(a1, b2);
        let (lo2, hi2) = umull(a2, b1);
        let (lo, cc) = addcarry_u64(lo, lo2, 0);
        let (hi, tt) = addcarry_u64(hi, hi2, cc);
        let (e3, cc) = addcarry_u64(e3, lo, 0);
        let (e4, cc) = addcarry_u64(e4, hi, cc);
        let (e5, cc) = addcarry_u64(e5, tt as u64, cc);
        let (e6, cc) = addcarry_u64(e6, 0, cc);
        let (e7, _)  = addcarry_u64(e7, 0, cc);

        [ e0, e1, e2, e3, e4, e5, e6, e7 ]
    }

    // Square of a 256-bit value, over 512 bits.
    #[inline(always)]
    fn sqr8(a: &Self) -> [u64; 8] {
        let (a0, a1, a2, a3) = (a.0[0], a.0[1], a.0[2], a.0[3]);

        // Cross products, slightly below 2^448 in total (e1..e6).
        let (e1, hi) = umull(a0, a1);
        let (e2, hi) = umull_add(a0, a2, hi);
        let (e3, e4) = umull_add(a0, a3, hi);
        let (e3, hi) = umull_add(a1, a2, e3);
        let (e4, e5) = umull_add2(a1, a3, e4, hi);
        let (e5, e6) = umull_add(a2, a3, e5);

        // Double, then add the squares.
        let e7 = e6 >> 63;
        let e6 = (e6 << 1) | (e5 >> 63);
        let e5 = (e5 << 1) | (e4 >> 63);
        let e4 = (e4 << 1) | (e3 >> 63);
        let e3 = (e3 << 1) | (e2 >> 63);
        let e2 = (e2 << 1) | (e1 >> 63);
        let e1 = e1 << 1;

        let (e0, hi) = umull(a0, a0);
        let (e1, cc) = addcarry_u64(e1, hi, 0);
        let (lo, hi) = umull(a1, a1);
        let (e2, cc) = addcarry_u64(e2, lo, cc);
        let (e3, cc) = addcarry_u64(e3, hi, cc);
        let (lo, hi) = umull(a2, a2);
        let (e4, cc) = addcarry_u64(e4, lo, cc);
        let (e5, cc) = addcarry_u64(e5, hi, cc);
        let (lo, hi) = umull(a3, a3);
        let (e6, cc) = addcarry_u64(e6, lo, cc);
        let (e7, _)  = addcarry_u64(e7, hi, cc);

        [ e0, e1, e2, e3, e4, e5, e6, e7 ]
    }

    // Set this element to t/R mod p, for t < p*R. Output is fully
    // reduced.
    #[inline(always)]
    fn set_montyred8(&mut self, t: [u64; 8]) {
        let mut t = t;
        let mut top = 0u8;
        for i in 0..4 {
            // Add f*p so that the low word becomes zero.
            let f = t[i].wrapping_mul(Self::M0I);
            let (_, hi) = umull_add(f, Self::MODULUS[0], t[i]);
            let (d, hi) = umull_add2(f, Self::MODULUS[1], t[i + 1], hi);
            t[i + 1] = d;
            let (d, hi) = umull_add2(f, Self::MODULUS[2], t[i + 2], hi);
            t[i + 2] = d;
            let (d, hi) = umull_add2(f, Self::MODULUS[3], t[i + 3], hi);
            t[i + 3] = d;
            let (d, cc) = addcarry_u64(t[i + 4], hi, top);
            t[i + 4] = d;
            top = cc;
        }

        // Value is top*2^256 + t[4..8], lower than 2*p; subtract p once
        // and add it back if that borrowed.
        let (d0, cc) = subborrow_u64(t[4], Self::MODULUS[0], 0);
        let (d1, cc) = subborrow_u64(t[5], Self::MODULUS[1], cc);
        let (d2, cc) = subborrow_u64(t[6], Self::MODULUS[2], cc);
        let (d3, cc) = subborrow_u64(t[7], Self::MODULUS[3], cc);
        let (_, cc)  = subborrow_u64(top as u64, 0, cc);
        let w = (cc as u64).wrapping_neg();
        let (d0, cc) = addcarry_u64(d0, w & Self::MODULUS[0], 0);
        let (d1, cc) = addcarry_u64(d1, w & Self::MODULUS[1], cc);
        let (d2, cc) = addcarry_u64(d2, w & Self::MODULUS[2], cc);
        let (d3, _)  = addcarry_u64(d3, w & Self::MODULUS[3], cc);

        self.0 = [ d0, d1, d2, d3 ];
    }

    /// Montgomery multiplication (in place): self <- self*rhs/R mod p.
    #[inline]
    pub fn set_mul_mont(&mut self, rhs: &Self) {
        let t = Self::mul8(self, rhs);
        self.set_montyred8(t);
    }

    /// Montgomery multiplication: returns self*rhs/R mod p.
    #[inline(always)]
    pub fn mul_mont(self, rhs: &Self) -> Self {
        let mut r = self;
        r.set_mul_mont(rhs);
        r
    }

    /// Montgomery squaring (in place): self <- self^2/R mod p.
    #[inline]
    pub fn set_sqr_mont(&mut self) {
        let t = Self::sqr8(self);
        self.set_montyred8(t);
    }

    /// Montgomery squaring: returns self^2/R mod p.
    #[inline(always)]
    pub fn sqr_mont(self) -> Self {
        let mut r = self;
        r.set_sqr_mont();
        r
    }

    /// Applies `n` successive Montgomery squarings (in place). With
    /// `n == 0`, the value is unchanged.
    #[inline]
    pub fn set_xsqr_mont(&mut self, n: u32) {
        for _ in 0..n {
            self.set_sqr_mont();
        }
    }

    /// Returns this value after `n` successive Montgomery squarings.
    #[inline(always)]
    pub fn xsqr_mont(self, n: u32) -> Self {
        let mut r = self;
        r.set_xsqr_mont(n);
        r
    }

    /// Converts this value into the Montgomery domain (in place).
    #[inline]
    pub fn set_to_mont(&mut self) {
        self.set_mul_mont(&Self::R2);
    }

    /// Returns the Montgomery representation of this value.
    #[inline(always)]
    pub fn to_mont(self) -> Self {
        let mut r = self;
        r.set_to_mont();
        r
    }

    /// Converts this value out of the Montgomery domain (in place).
    #[inline]
    pub fn set_from_mont(&mut self) {
        self.set_mul_mont(&Self::ONE);
    }

    /// Returns the plain value of this Montgomery representation.
    #[inline(always)]
    pub fn from_mont(self) -> Self {
        let mut r = self;
        r.set_from_mont();
        r
    }

    const fn make_m0i(m0: u64) -> u64 {
        let y = 2u64.wrapping_sub(m0);
        let y = y.wrapping_mul(2u64.wrapping_sub(y.wrapping_mul(m0)));
        let y = y.wrapping_mul(2u64.wrapping_sub(y.wrapping_mul(m0)));
        let y = y.wrapping_mul(2u64.wrapping_sub(y.wrapping_mul(m0)));
        let y = y.wrapping_mul(2u64.wrapping_sub(y.wrapping_mul(m0)));
        let y = y.wrapping_mul(2u64.wrapping_sub(y.wrapping_mul(m0)));
        y.wrapping_neg()
    }
}
