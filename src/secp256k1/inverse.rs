use super::GFp;

impl GFp {

    /// Inverts this element (in place), in the Montgomery domain: if
    /// this element is a*R mod p, then it becomes (1/a)*R mod p.
    ///
    /// This raises the value to the power p - 2 with a fixed addition
    /// chain (257 squarings, 19 multiplications). If this element is
    /// zero, then it remains zero.
    pub fn set_invert_mont(&mut self) {
        let x = *self;

        // p - 2 = 2^256 - 2^32 - 979; r accumulates 45 + (2^32 - 1024)
        // and then the shifted copies of 2^32 - 2 and 2^32.
        let a6 = x;
        let a1 = x.sqr_mont();                  // e = 2
        let a2 = a1.mul_mont(&x);               // e = 3
        let a3 = a2.xsqr_mont(2).mul_mont(&a2); // e = 15
        let a4 = a3.sqr_mont();                 // e = 30
        let mut r = a4.mul_mont(&a3);           // e = 45
        let a4 = a4.xsqr_mont(3).mul_mont(&a3); // e = 255
        let a5 = a4.xsqr_mont(8).mul_mont(&a4); // e = 2^16 - 1
        let a4 = a4.sqr_mont().mul_mont(&a6)    // e = 511
            .sqr_mont();                        // e = 1022

        let a6 = a5.xsqr_mont(4).mul_mont(&a3); // e = 2^20 - 1
        let a6 = a6.xsqr_mont(2).mul_mont(&a2); // e = 2^22 - 1
        let a6 = a6.xsqr_mont(10);              // e = 2^32 - 2^10
        r.set_mul_mont(&a6);                    // e = 2^32 - 979
        let a6 = a6.mul_mont(&a4);              // e = 2^32 - 2
        let a5 = a6.mul_mont(&a1);              // e = 2^32

        let mut a6 = a6.xsqr_mont(32);
        r.set_mul_mont(&a6);
        a6.set_mul_mont(&a5);                   // e = 2^64 - 2^32
        for _ in 0..6 {
            a6.set_xsqr_mont(32);
            r.set_mul_mont(&a6);
        }

        *self = r;
    }

    /// Returns the inverse of this element in the Montgomery domain
    /// (see `set_invert_mont()`).
    #[inline(always)]
    pub fn invert_mont(self) -> Self {
        let mut r = self;
        r.set_invert_mont();
        r
    }
}

#[cfg(test)]
mod tests {

    use super::GFp;
    use num_bigint::{BigInt, Sign};
    use sha2::{Sha256, Digest};

    #[test]
    fn invert() {
        assert!(GFp::ZERO.invert_mont().iszero() == 0xFFFFFFFF);
        assert!(GFp::MONT_ONE.invert_mont().equals(GFp::MONT_ONE) == 0xFFFFFFFF);

        let zp = BigInt::from_bytes_be(Sign::Plus,
            &GFp::from_limbs(GFp::MODULUS).to_bytes());
        let mut sh = Sha256::new();
        for i in 0..100 {
            sh.update((i as u64).to_le_bytes());
            let v = sh.finalize_reset();
            let a = GFp::from_bytes(&v).unwrap().reduce();
            let am = a.to_mont();
            let b = am.invert_mont();
            assert!(am.mul_mont(&b).equals(GFp::MONT_ONE) == 0xFFFFFFFF);

            let za = BigInt::from_bytes_be(Sign::Plus, &a.to_bytes());
            let zb = BigInt::from_bytes_be(Sign::Plus, &b.from_mont().to_bytes());
            assert!(zb == za.modpow(&(&zp - 2u32), &zp));
        }

        // p - 1 is its own inverse.
        let m1 = GFp::from_limbs(GFp::MODULUS).sub_word(1).to_mont();
        assert!(m1.invert_mont().equals(m1) == 0xFFFFFFFF);
    }
}
