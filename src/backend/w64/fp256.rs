use core::fmt;
use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use super::{addcarry_u64, subborrow_u64, umull, umull_add, umull_add2};
use crate::{CryptoRng, Error, RngCore};

/// An integer modulo `m`, held as four 64-bit limbs (low-to-high order).
///
/// The modulus is `M0 + M1*2^64 + M2*2^128 + M3*2^192`. It MUST be odd
/// and greater than 2^256 - 2^192 (i.e. `M3` is 0xFFFFFFFFFFFFFFFF), so
/// that any 256-bit integer is lower than twice the modulus.
///
/// The stored value is used as is: the type does not know whether it
/// holds a plain residue or a Montgomery representation. All operations
/// in this file are linear or exact, and thus work identically in both
/// domains. Every operation returns a fully reduced value (in 0..m-1)
/// when its operands are fully reduced.
#[derive(Clone, Copy, Debug)]
pub struct Fp256<const M0: u64, const M1: u64, const M2: u64, const M3: u64>(pub(crate) [u64; 4]);

impl<const M0: u64, const M1: u64, const M2: u64, const M3: u64> Fp256<M0, M1, M2, M3> {

    // Modulus must be odd, and its top limb must be all-ones. Word
    // multiplication relies on 2^256 - m being lower than 2^192.
    #[allow(dead_code)]
    const COMPILE_TIME_CHECKS: () = Self::compile_time_checks();
    const fn compile_time_checks() {
        static_assert!((M0 & 1) != 0);
        static_assert!(M3 == 0xFFFFFFFFFFFFFFFF);
    }

    /// Modulus, in base 2^64 (low-to-high order).
    pub const MODULUS: [u64; 4] = [ M0, M1, M2, M3 ];

    pub const ZERO: Self = Self([ 0, 0, 0, 0 ]);
    pub const ONE: Self = Self([ 1, 0, 0, 0 ]);

    // 2^256 - m, i.e. 2^256 mod m.
    const C: [u64; 4] = Self::make_c();

    // (m + 1)/2, i.e. 1/2 mod m.
    const HMP1: [u64; 4] = Self::make_hmp1();

    /// Creates an element from its four limbs, in little-endian order
    /// (least significant limb first). The value is NOT reduced.
    #[inline(always)]
    pub const fn w64le(x0: u64, x1: u64, x2: u64, x3: u64) -> Self {
        Self([ x0, x1, x2, x3 ])
    }

    /// Creates an element from its four limbs, in big-endian order
    /// (most significant limb first). The value is NOT reduced.
    #[inline(always)]
    pub const fn w64be(x3: u64, x2: u64, x1: u64, x0: u64) -> Self {
        Self([ x0, x1, x2, x3 ])
    }

    /// Creates an element from a limb array (low-to-high order). The
    /// value is NOT reduced.
    #[inline(always)]
    pub const fn from_limbs(x: [u64; 4]) -> Self {
        Self(x)
    }

    /// Returns the limbs of this element (low-to-high order).
    #[inline(always)]
    pub const fn to_limbs(self) -> [u64; 4] {
        self.0
    }

    /// Creates an element with value `w` (a single word).
    #[inline(always)]
    pub const fn from_word(w: u64) -> Self {
        Self([ w, 0, 0, 0 ])
    }

    /// Sets this element to the value `w` (a single word).
    #[inline(always)]
    pub fn set_word(&mut self, w: u64) {
        *self = Self::from_word(w);
    }

    /// Adds `rhs` to this element (in place).
    #[inline(always)]
    pub fn set_add(&mut self, rhs: &Self) {
        // Raw addition; final carry in d4.
        let (d0, cc) = addcarry_u64(self.0[0], rhs.0[0], 0);
        let (d1, cc) = addcarry_u64(self.0[1], rhs.0[1], cc);
        let (d2, cc) = addcarry_u64(self.0[2], rhs.0[2], cc);
        let (d3, cc) = addcarry_u64(self.0[3], rhs.0[3], cc);
        let d4 = cc as u64;

        // Subtract the modulus.
        let (e0, cc) = subborrow_u64(d0, M0, 0);
        let (e1, cc) = subborrow_u64(d1, M1, cc);
        let (e2, cc) = subborrow_u64(d2, M2, cc);
        let (e3, cc) = subborrow_u64(d3, M3, cc);
        let (e4, _)  = subborrow_u64(d4, 0, cc);

        // Add back the modulus in case the result was negative.
        let (d0, cc) = addcarry_u64(e0, e4 & M0, 0);
        let (d1, cc) = addcarry_u64(e1, e4 & M1, cc);
        let (d2, cc) = addcarry_u64(e2, e4 & M2, cc);
        let (d3, _)  = addcarry_u64(e3, e4 & M3, cc);

        self.0[0] = d0;
        self.0[1] = d1;
        self.0[2] = d2;
        self.0[3] = d3;
    }

    /// Subtracts `rhs` from this element (in place).
    #[inline(always)]
    pub fn set_sub(&mut self, rhs: &Self) {
        // Raw subtraction.
        let (d0, cc) = subborrow_u64(self.0[0], rhs.0[0], 0);
        let (d1, cc) = subborrow_u64(self.0[1], rhs.0[1], cc);
        let (d2, cc) = subborrow_u64(self.0[2], rhs.0[2], cc);
        let (d3, cc) = subborrow_u64(self.0[3], rhs.0[3], cc);

        // Add back the modulus if there was a borrow.
        let w = (cc as u64).wrapping_neg();
        let (d0, cc) = addcarry_u64(d0, w & M0, 0);
        let (d1, cc) = addcarry_u64(d1, w & M1, cc);
        let (d2, cc) = addcarry_u64(d2, w & M2, cc);
        let (d3, _)  = addcarry_u64(d3, w & M3, cc);

        self.0[0] = d0;
        self.0[1] = d1;
        self.0[2] = d2;
        self.0[3] = d3;
    }

    /// Negates this element (in place). Zero stays zero.
    #[inline(always)]
    pub fn set_neg(&mut self) {
        let (d0, cc) = subborrow_u64(0, self.0[0], 0);
        let (d1, cc) = subborrow_u64(0, self.0[1], cc);
        let (d2, cc) = subborrow_u64(0, self.0[2], cc);
        let (d3, cc) = subborrow_u64(0, self.0[3], cc);

        // Add back the modulus if there was a borrow.
        let w = (cc as u64).wrapping_neg();
        let (d0, cc) = addcarry_u64(d0, w & M0, 0);
        let (d1, cc) = addcarry_u64(d1, w & M1, cc);
        let (d2, cc) = addcarry_u64(d2, w & M2, cc);
        let (d3, _)  = addcarry_u64(d3, w & M3, cc);

        self.0[0] = d0;
        self.0[1] = d1;
        self.0[2] = d2;
        self.0[3] = d3;
    }

    /// Multiplies this element by 2 (in place).
    #[inline(always)]
    pub fn set_double(&mut self) {
        let r = *self;
        self.set_add(&r);
    }

    /// Returns twice this element.
    #[inline(always)]
    pub fn double(self) -> Self {
        let mut r = self;
        r.set_double();
        r
    }

    /// Multiplies this element by 3 (in place).
    #[inline(always)]
    pub fn set_triple(&mut self) {
        let r = *self;
        self.set_add(&r);
        self.set_add(&r);
    }

    /// Returns three times this element.
    #[inline(always)]
    pub fn triple(self) -> Self {
        let mut r = self;
        r.set_triple();
        r
    }

    /// Divides this element by 2 (in place).
    #[inline(always)]
    pub fn set_half(&mut self) {
        let (a0, a1, a2, a3) = (self.0[0], self.0[1], self.0[2], self.0[3]);

        // a/2 = floor(a/2) + (a mod 2)*(m+1)/2
        let d0 = (a0 >> 1) | (a1 << 63);
        let d1 = (a1 >> 1) | (a2 << 63);
        let d2 = (a2 >> 1) | (a3 << 63);
        let d3 = a3 >> 1;
        let w = (a0 & 1).wrapping_neg();
        let (d0, cc) = addcarry_u64(d0, w & Self::HMP1[0], 0);
        let (d1, cc) = addcarry_u64(d1, w & Self::HMP1[1], cc);
        let (d2, cc) = addcarry_u64(d2, w & Self::HMP1[2], cc);
        let (d3, _)  = addcarry_u64(d3, w & Self::HMP1[3], cc);

        self.0[0] = d0;
        self.0[1] = d1;
        self.0[2] = d2;
        self.0[3] = d3;
    }

    /// Returns this element divided by 2.
    #[inline(always)]
    pub fn half(self) -> Self {
        let mut r = self;
        r.set_half();
        r
    }

    /// Adds the word `w` to this element (in place).
    #[inline]
    pub fn set_add_word(&mut self, w: u64) {
        let (d0, cc) = addcarry_u64(self.0[0], w, 0);
        let (d1, cc) = addcarry_u64(self.0[1], 0, cc);
        let (d2, cc) = addcarry_u64(self.0[2], 0, cc);
        let (d3, cc) = addcarry_u64(self.0[3], 0, cc);
        self.set_fold([ d0, d1, d2, d3 ], cc as u64);
    }

    /// Returns this element plus the word `w`.
    #[inline(always)]
    pub fn add_word(self, w: u64) -> Self {
        let mut r = self;
        r.set_add_word(w);
        r
    }

    /// Subtracts the word `w` from this element (in place).
    #[inline]
    pub fn set_sub_word(&mut self, w: u64) {
        let (d0, cc) = subborrow_u64(self.0[0], w, 0);
        let (d1, cc) = subborrow_u64(self.0[1], 0, cc);
        let (d2, cc) = subborrow_u64(self.0[2], 0, cc);
        let (d3, cc) = subborrow_u64(self.0[3], 0, cc);

        // On borrow, the value is in -2^64..-1: adding m once suffices.
        let w = (cc as u64).wrapping_neg();
        let (d0, cc) = addcarry_u64(d0, w & M0, 0);
        let (d1, cc) = addcarry_u64(d1, w & M1, cc);
        let (d2, cc) = addcarry_u64(d2, w & M2, cc);
        let (d3, _)  = addcarry_u64(d3, w & M3, cc);

        self.0[0] = d0;
        self.0[1] = d1;
        self.0[2] = d2;
        self.0[3] = d3;
    }

    /// Returns this element minus the word `w`.
    #[inline(always)]
    pub fn sub_word(self, w: u64) -> Self {
        let mut r = self;
        r.set_sub_word(w);
        r
    }

    /// Multiplies this element by the word `w` (in place).
    #[inline]
    pub fn set_mul_word(&mut self, w: u64) {
        let (d0, hi) = umull(self.0[0], w);
        let (d1, hi) = umull_add(self.0[1], w, hi);
        let (d2, hi) = umull_add(self.0[2], w, hi);
        let (d3, d4) = umull_add(self.0[3], w, hi);
        self.set_fold([ d0, d1, d2, d3 ], d4);
    }

    /// Returns this element multiplied by the word `w`.
    #[inline(always)]
    pub fn mul_word(self, w: u64) -> Self {
        let mut r = self;
        r.set_mul_word(w);
        r
    }

    // Set this element to (d + h*2^256) mod m, for an arbitrary 256-bit
    // d and an arbitrary word h.
    #[inline(always)]
    fn set_fold(&mut self, d: [u64; 4], h: u64) {
        #[allow(clippy::let_unit_value)]
        let _ = Self::COMPILE_TIME_CHECKS;

        // 2^256 = c mod m, with c < 2^192; thus, t = d + h*c < 2^257.
        let (t0, hi) = umull_add(h, Self::C[0], d[0]);
        let (t1, hi) = umull_add2(h, Self::C[1], d[1], hi);
        let (t2, hi) = umull_add2(h, Self::C[2], d[2], hi);
        let (t3, cc) = addcarry_u64(d[3], hi, 0);

        // Fold the top bit again. If t >= 2^256, then t - 2^256 < h*c,
        // and h*c + c < 2^256: this second fold cannot overflow.
        let w = (cc as u64).wrapping_neg();
        let (t0, cc) = addcarry_u64(t0, w & Self::C[0], 0);
        let (t1, cc) = addcarry_u64(t1, w & Self::C[1], cc);
        let (t2, cc) = addcarry_u64(t2, w & Self::C[2], cc);
        let (t3, _)  = addcarry_u64(t3, w & Self::C[3], cc);

        self.0 = [ t0, t1, t2, t3 ];
        self.set_reduce();
    }

    /// Reduces this element modulo m (in place). Any 256-bit value is
    /// accepted; a single conditional subtraction is performed.
    #[inline]
    pub fn set_reduce(&mut self) {
        let (d0, cc) = subborrow_u64(self.0[0], M0, 0);
        let (d1, cc) = subborrow_u64(self.0[1], M1, cc);
        let (d2, cc) = subborrow_u64(self.0[2], M2, cc);
        let (d3, cc) = subborrow_u64(self.0[3], M3, cc);

        // Keep the original value if the subtraction borrowed.
        let w = (cc as u64).wrapping_neg();
        self.0[0] = d0 ^ (w & (d0 ^ self.0[0]));
        self.0[1] = d1 ^ (w & (d1 ^ self.0[1]));
        self.0[2] = d2 ^ (w & (d2 ^ self.0[2]));
        self.0[3] = d3 ^ (w & (d3 ^ self.0[3]));
    }

    /// Returns this element reduced modulo m.
    #[inline(always)]
    pub fn reduce(self) -> Self {
        let mut r = self;
        r.set_reduce();
        r
    }

    /// Compares the raw limbs of two elements (as plain 256-bit integers,
    /// not as residues). Returned value is -1, 0 or +1 when `self` is
    /// lower than, equal to, or greater than `rhs`, respectively.
    #[inline]
    pub fn cmp(&self, rhs: &Self) -> i32 {
        let (_, cc) = subborrow_u64(self.0[0], rhs.0[0], 0);
        let (_, cc) = subborrow_u64(self.0[1], rhs.0[1], cc);
        let (_, cc) = subborrow_u64(self.0[2], rhs.0[2], cc);
        let (_, lt) = subborrow_u64(self.0[3], rhs.0[3], cc);
        let (_, cc) = subborrow_u64(rhs.0[0], self.0[0], 0);
        let (_, cc) = subborrow_u64(rhs.0[1], self.0[1], cc);
        let (_, cc) = subborrow_u64(rhs.0[2], self.0[2], cc);
        let (_, gt) = subborrow_u64(rhs.0[3], self.0[3], cc);
        (gt as i32) - (lt as i32)
    }

    /// Equality check between two elements (constant-time, raw limbs);
    /// returned value is 0xFFFFFFFF on equality, 0 otherwise.
    #[inline]
    pub fn equals(self, rhs: Self) -> u32 {
        let r = (self.0[0] ^ rhs.0[0])
              | (self.0[1] ^ rhs.0[1])
              | (self.0[2] ^ rhs.0[2])
              | (self.0[3] ^ rhs.0[3]);
        ((r | r.wrapping_neg()) >> 63).wrapping_sub(1) as u32
    }

    /// Compares this value with zero (constant-time); returned value
    /// is 0xFFFFFFFF if this element is zero, 0 otherwise.
    #[inline]
    pub fn iszero(self) -> u32 {
        let r = self.0[0] | self.0[1] | self.0[2] | self.0[3];
        ((r | r.wrapping_neg()) >> 63).wrapping_sub(1) as u32
    }

    // Conditionally copy the provided value ('a') into self:
    //  - If ctl == 0xFFFFFFFF, then the value of 'a' is copied into self.
    //  - If ctl == 0, then the value of self is unchanged.
    // ctl MUST be equal to 0 or 0xFFFFFFFF.
    #[inline(always)]
    pub fn set_cond(&mut self, a: &Self, ctl: u32) {
        let cw = ((ctl as i32) as i64) as u64;
        self.0[0] ^= cw & (self.0[0] ^ a.0[0]);
        self.0[1] ^= cw & (self.0[1] ^ a.0[1]);
        self.0[2] ^= cw & (self.0[2] ^ a.0[2]);
        self.0[3] ^= cw & (self.0[3] ^ a.0[3]);
    }

    // Return a value equal to either a0 (if ctl == 0) or a1 (if
    // ctl == 0xFFFFFFFF). Value ctl MUST be either 0 or 0xFFFFFFFF.
    #[inline(always)]
    pub fn select(a0: &Self, a1: &Self, ctl: u32) -> Self {
        let mut r = *a0;
        r.set_cond(a1, ctl);
        r
    }

    // Conditionally swap two elements: values a and b are exchanged if
    // ctl == 0xFFFFFFFF, or not exchanged if ctl == 0x00000000. Value
    // ctl MUST be either 0x00000000 or 0xFFFFFFFF.
    #[inline(always)]
    pub fn cswap(a: &mut Self, b: &mut Self, ctl: u32) {
        let cw = ((ctl as i32) as i64) as u64;
        let t = cw & (a.0[0] ^ b.0[0]); a.0[0] ^= t; b.0[0] ^= t;
        let t = cw & (a.0[1] ^ b.0[1]); a.0[1] ^= t; b.0[1] ^= t;
        let t = cw & (a.0[2] ^ b.0[2]); a.0[2] ^= t; b.0[2] ^= t;
        let t = cw & (a.0[3] ^ b.0[3]); a.0[3] ^= t; b.0[3] ^= t;
    }

    /// Sets this element from unsigned big-endian bytes.
    ///
    /// The source may be shorter than 32 bytes (missing leading bytes
    /// are zeros); a longer source is rejected with `InvalidLength`. The
    /// value is NOT reduced. On error, this element is set to zero.
    pub fn set_bytes(&mut self, buf: &[u8]) -> Result<(), Error> {
        *self = Self::ZERO;
        let n = buf.len();
        if n > 32 {
            return Err(Error::InvalidLength { len: n, max: 32 });
        }
        let mut tmp = [0u8; 32];
        tmp[(32 - n)..].copy_from_slice(buf);
        for (i, chunk) in tmp.chunks_exact(8).enumerate() {
            let mut w = [0u8; 8];
            w.copy_from_slice(chunk);
            self.0[3 - i] = u64::from_be_bytes(w);
        }
        Ok(())
    }

    /// Decodes an element from unsigned big-endian bytes (see
    /// `set_bytes()`).
    pub fn from_bytes(buf: &[u8]) -> Result<Self, Error> {
        let mut r = Self::ZERO;
        r.set_bytes(buf)?;
        Ok(r)
    }

    /// Encodes this element over exactly 32 bytes, unsigned big-endian
    /// (most significant limb first). The raw limbs are encoded, without
    /// any reduction.
    pub fn to_bytes(self) -> [u8; 32] {
        let mut d = [0u8; 32];
        d[ 0.. 8].copy_from_slice(&self.0[3].to_be_bytes());
        d[ 8..16].copy_from_slice(&self.0[2].to_be_bytes());
        d[16..24].copy_from_slice(&self.0[1].to_be_bytes());
        d[24..32].copy_from_slice(&self.0[0].to_be_bytes());
        d
    }

    /// Sets this element from a big-endian hexadecimal string.
    ///
    /// Up to 64 digits are accepted (shorter strings are implicitly
    /// left-padded with zeros), in either case. More than 64 characters
    /// yield `InvalidLength`; a non-hexadecimal character yields
    /// `InvalidArgument`. On error, this element is set to zero.
    pub fn set_hex<T: AsRef<[u8]>>(&mut self, hex: T) -> Result<(), Error> {
        *self = Self::ZERO;
        let src = hex.as_ref();
        let n = src.len();
        if n > 64 {
            return Err(Error::InvalidLength { len: n, max: 64 });
        }
        let mut tmp = [b'0'; 64];
        tmp[(64 - n)..].copy_from_slice(src);
        let mut bb = [0u8; 32];
        hex::decode_to_slice(&tmp[..], &mut bb)
            .map_err(|_| Error::InvalidArgument)?;
        self.set_bytes(&bb)
    }

    /// Decodes an element from a big-endian hexadecimal string (see
    /// `set_hex()`).
    pub fn from_hex<T: AsRef<[u8]>>(hex: T) -> Result<Self, Error> {
        let mut r = Self::ZERO;
        r.set_hex(hex)?;
        Ok(r)
    }

    /// Writes this element as exactly 64 lowercase hexadecimal
    /// characters (big-endian) into `out`, which must have length 64.
    pub fn get_hex(self, out: &mut [u8]) -> Result<(), Error> {
        hex::encode_to_slice(self.to_bytes(), out)
            .map_err(|_| Error::InvalidLength { len: out.len(), max: 64 })
    }

    /// Sets this element to 256 random bits (not reduced).
    pub fn set_random<R: CryptoRng + RngCore + ?Sized>(&mut self, rng: &mut R)
        -> Result<(), Error>
    {
        let mut bb = [0u8; 32];
        crate::rand::fill(rng, &mut bb)?;
        for (i, chunk) in bb.chunks_exact(8).enumerate() {
            let mut w = [0u8; 8];
            w.copy_from_slice(chunk);
            self.0[i] = u64::from_le_bytes(w);
        }
        Ok(())
    }

    /// Returns 256 random bits (not reduced).
    pub fn random<R: CryptoRng + RngCore + ?Sized>(rng: &mut R)
        -> Result<Self, Error>
    {
        let mut r = Self::ZERO;
        r.set_random(rng)?;
        Ok(r)
    }

    // Compute 2^256 - m.
    const fn make_c() -> [u64; 4] {
        let (c0, cc) = (!M0).overflowing_add(1);
        let (c1, cc) = (!M1).overflowing_add(cc as u64);
        let (c2, cc) = (!M2).overflowing_add(cc as u64);
        let (c3, _)  = (!M3).overflowing_add(cc as u64);
        [ c0, c1, c2, c3 ]
    }

    // Compute (m+1)/2.
    const fn make_hmp1() -> [u64; 4] {
        let d0 = (M0 >> 1) | (M1 << 63);
        let d1 = (M1 >> 1) | (M2 << 63);
        let d2 = (M2 >> 1) | (M3 << 63);
        let d3 = M3 >> 1;
        let (d0, cc) = d0.overflowing_add(1);
        let (d1, cc) = d1.overflowing_add(cc as u64);
        let (d2, cc) = d2.overflowing_add(cc as u64);
        let d3 = d3.wrapping_add(cc as u64);
        [ d0, d1, d2, d3 ]
    }
}

impl<const M0: u64, const M1: u64, const M2: u64, const M3: u64>
    fmt::Display for Fp256<M0, M1, M2, M3>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.to_bytes().iter() {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

// ========================================================================
// Operators. Multiplication is deliberately absent: its meaning depends
// on the domain (plain or Montgomery) the caller uses.

impl<const M0: u64, const M1: u64, const M2: u64, const M3: u64>
    Add<Fp256<M0, M1, M2, M3>> for Fp256<M0, M1, M2, M3>
{
    type Output = Fp256<M0, M1, M2, M3>;

    #[inline(always)]
    fn add(self, other: Fp256<M0, M1, M2, M3>) -> Fp256<M0, M1, M2, M3> {
        let mut r = self;
        r.set_add(&other);
        r
    }
}

impl<const M0: u64, const M1: u64, const M2: u64, const M3: u64>
    Add<&Fp256<M0, M1, M2, M3>> for Fp256<M0, M1, M2, M3>
{
    type Output = Fp256<M0, M1, M2, M3>;

    #[inline(always)]
    fn add(self, other: &Fp256<M0, M1, M2, M3>) -> Fp256<M0, M1, M2, M3> {
        let mut r = self;
        r.set_add(other);
        r
    }
}

impl<const M0: u64, const M1: u64, const M2: u64, const M3: u64>
    AddAssign<Fp256<M0, M1, M2, M3>> for Fp256<M0, M1, M2, M3>
{
    #[inline(always)]
    fn add_assign(&mut self, other: Fp256<M0, M1, M2, M3>) {
        self.set_add(&other);
    }
}

impl<const M0: u64, const M1: u64, const M2: u64, const M3: u64>
    AddAssign<&Fp256<M0, M1, M2, M3>> for Fp256<M0, M1, M2, M3>
{
    #[inline(always)]
    fn add_assign(&mut self, other: &Fp256<M0, M1, M2, M3>) {
        self.set_add(other);
    }
}

impl<const M0: u64, const M1: u64, const M2: u64, const M3: u64>
    Neg for Fp256<M0, M1, M2, M3>
{
    type Output = Fp256<M0, M1, M2, M3>;

    #[inline(always)]
    fn neg(self) -> Fp256<M0, M1, M2, M3> {
        let mut r = self;
        r.set_neg();
        r
    }
}

impl<const M0: u64, const M1: u64, const M2: u64, const M3: u64>
    Neg for &Fp256<M0, M1, M2, M3>
{
    type Output = Fp256<M0, M1, M2, M3>;

    #[inline(always)]
    fn neg(self) -> Fp256<M0, M1, M2, M3> {
        let mut r = *self;
        r.set_neg();
        r
    }
}

impl<const M0: u64, const M1: u64, const M2: u64, const M3: u64>
    Sub<Fp256<M0, M1, M2, M3>> for Fp256<M0, M1, M2, M3>
{
    type Output = Fp256<M0, M1, M2, M3>;

    #[inline(always)]
    fn sub(self, other: Fp256<M0, M1, M2, M3>) -> Fp256<M0, M1, M2, M3> {
        let mut r = self;
        r.set_sub(&other);
        r
    }
}

impl<const M0: u64, const M1: u64, const M2: u64, const M3: u64>
    Sub<&Fp256<M0, M1, M2, M3>> for Fp256<M0, M1, M2, M3>
{
    type Output = Fp256<M0, M1, M2, M3>;

    #[inline(always)]
    fn sub(self, other: &Fp256<M0, M1, M2, M3>) -> Fp256<M0, M1, M2, M3> {
        let mut r = self;
        r.set_sub(other);
        r
    }
}

impl<const M0: u64, const M1: u64, const M2: u64, const M3: u64>
    SubAssign<Fp256<M0, M1, M2, M3>> for Fp256<M0, M1, M2, M3>
{
    #[inline(always)]
    fn sub_assign(&mut self, other: Fp256<M0, M1, M2, M3>) {
        self.set_sub(&other);
    }
}

impl<const M0: u64, const M1: u64, const M2: u64, const M3: u64>
    SubAssign<&Fp256<M0, M1, M2, M3>> for Fp256<M0, M1, M2, M3>
{
    #[inline(always)]
    fn sub_assign(&mut self, other: &Fp256<M0, M1, M2, M3>) {
        self.set_sub(other);
    }
}

// ========================================================================

#[cfg(test)]
mod tests {

    use super::Fp256;
    use crate::Error;
    use num_bigint::{BigInt, Sign};
    use sha2::{Sha256, Digest};

    fn zint<const M0: u64, const M1: u64, const M2: u64, const M3: u64>
        (x: Fp256<M0, M1, M2, M3>) -> BigInt
    {
        BigInt::from_bytes_be(Sign::Plus, &x.to_bytes())
    }

    // va and vb must be 32 bytes each in length
    fn check_ops<const M0: u64, const M1: u64, const M2: u64, const M3: u64>
        (va: &[u8], vb: &[u8], w: u64)
    {
        let zp = BigInt::from_slice(Sign::Plus, &[
            M0 as u32, (M0 >> 32) as u32,
            M1 as u32, (M1 >> 32) as u32,
            M2 as u32, (M2 >> 32) as u32,
            M3 as u32, (M3 >> 32) as u32,
        ]);

        let ra = Fp256::<M0, M1, M2, M3>::from_bytes(va).unwrap();
        let rb = Fp256::<M0, M1, M2, M3>::from_bytes(vb).unwrap();
        assert!(ra.to_bytes() == va);

        let a = ra.reduce();
        let b = rb.reduce();
        let za = zint(ra) % &zp;
        let zb = zint(rb) % &zp;
        assert!(zint(a) == za);
        assert!(zint(b) == zb);

        let c = a + b;
        assert!(zint(c) == (&za + &zb) % &zp);

        let c = a - b;
        assert!(zint(c) == ((&zp + &za) - &zb) % &zp);

        let c = -a;
        assert!(zint(c) == (&zp - &za) % &zp);

        let c = a.double();
        assert!(zint(c) == (&za << 1) % &zp);

        let c = a.triple();
        assert!(zint(c) == (&za * 3u32) % &zp);

        let c = a.half();
        assert!(zint(c.double()) == za);

        let c = a.add_word(w);
        assert!(zint(c) == (&za + w) % &zp);

        let c = a.sub_word(w);
        assert!(zint(c) == ((&zp << 64) + &za - w) % &zp);

        let c = a.mul_word(w);
        assert!(zint(c) == (&za * w) % &zp);

        let c = a.mul_word(u64::MAX);
        assert!(zint(c) == (&za * u64::MAX) % &zp);

        let x = zint(ra).cmp(&zint(rb)) as i32;
        assert!(ra.cmp(&rb) == x);
        assert!(rb.cmp(&ra) == -x);
        assert!(ra.cmp(&ra) == 0);
        assert!(ra.equals(ra) == 0xFFFFFFFF);
        assert!(ra.equals(rb) == (if x == 0 { 0xFFFFFFFF } else { 0 }));
    }

    fn check_field<const M0: u64, const M1: u64, const M2: u64, const M3: u64>() {
        let mut va = [0u8; 32];
        let mut vb = [0u8; 32];

        check_ops::<M0, M1, M2, M3>(&va, &vb, 0);
        va.copy_from_slice(
            &Fp256::<M0, M1, M2, M3>::from_limbs(Fp256::<M0, M1, M2, M3>::MODULUS).to_bytes());
        check_ops::<M0, M1, M2, M3>(&va, &vb, 1);
        vb.copy_from_slice(&va);
        vb[31] = vb[31].wrapping_sub(1);
        check_ops::<M0, M1, M2, M3>(&va, &vb, 3);
        va = [0xFFu8; 32];
        check_ops::<M0, M1, M2, M3>(&va, &vb, u64::MAX);

        let mut sh = Sha256::new();
        for i in 0..300 {
            sh.update(((3 * i + 0) as u64).to_le_bytes());
            let va = sh.finalize_reset();
            sh.update(((3 * i + 1) as u64).to_le_bytes());
            let vb = sh.finalize_reset();
            sh.update(((3 * i + 2) as u64).to_le_bytes());
            let vw = sh.finalize_reset();
            let mut w = [0u8; 8];
            w.copy_from_slice(&vw[..8]);
            let w = u64::from_le_bytes(w) >> (i % 64);
            check_ops::<M0, M1, M2, M3>(&va, &vb, w);
        }
    }

    #[test]
    fn fp256_ops_p() {
        check_field::<0xFFFFFFFEFFFFFC2F, 0xFFFFFFFFFFFFFFFF,
                      0xFFFFFFFFFFFFFFFF, 0xFFFFFFFFFFFFFFFF>();
    }

    #[test]
    fn fp256_ops_n() {
        check_field::<0xBFD25E8CD0364141, 0xBAAEDCE6AF48A03B,
                      0xFFFFFFFFFFFFFFFE, 0xFFFFFFFFFFFFFFFF>();
    }

    type F = Fp256<0xFFFFFFFEFFFFFC2F, 0xFFFFFFFFFFFFFFFF,
                   0xFFFFFFFFFFFFFFFF, 0xFFFFFFFFFFFFFFFF>;

    #[test]
    fn neg_and_half_edges() {
        assert!((-F::ZERO).iszero() == 0xFFFFFFFF);
        assert!(F::ZERO.half().iszero() == 0xFFFFFFFF);
        let m1 = F::from_limbs(F::MODULUS).sub_word(1);
        assert!(m1.cmp(&F::from_limbs(F::MODULUS)) == -1);
        assert!(m1.add_word(1).iszero() == 0xFFFFFFFF);
        assert!(F::ONE.half().double().equals(F::ONE) == 0xFFFFFFFF);
        assert!(F::ZERO.sub_word(5).add_word(5).iszero() == 0xFFFFFFFF);
    }

    #[test]
    fn cond_ops() {
        let a = F::w64le(1, 2, 3, 4);
        let b = F::w64be(5, 6, 7, 8);
        assert!(b.to_limbs() == [ 8, 7, 6, 5 ]);
        assert!(F::select(&a, &b, 0).equals(a) == 0xFFFFFFFF);
        assert!(F::select(&a, &b, 0xFFFFFFFF).equals(b) == 0xFFFFFFFF);
        let (mut x, mut y) = (a, b);
        F::cswap(&mut x, &mut y, 0);
        assert!(x.equals(a) == 0xFFFFFFFF && y.equals(b) == 0xFFFFFFFF);
        F::cswap(&mut x, &mut y, 0xFFFFFFFF);
        assert!(x.equals(b) == 0xFFFFFFFF && y.equals(a) == 0xFFFFFFFF);
        let mut z = F::ZERO;
        z.set_word(42);
        assert!(z.to_limbs() == [ 42, 0, 0, 0 ]);
    }

    #[test]
    fn bytes_and_hex() {
        let h = "79BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798";
        let x = F::from_hex(h).unwrap();
        assert!(x.to_limbs() == [
            0x59F2815B16F81798, 0x029BFCDB2DCE28D9,
            0x55A06295CE870B07, 0x79BE667EF9DCBBAC ]);
        let mut out = [0u8; 64];
        x.get_hex(&mut out).unwrap();
        assert!(&out[..] == h.to_ascii_lowercase().as_bytes());
        assert!(format!("{}", x) == h.to_ascii_lowercase());
        assert!(F::from_bytes(&x.to_bytes()).unwrap().equals(x) == 0xFFFFFFFF);

        // Short inputs are left-padded.
        let y = F::from_hex("abc").unwrap();
        assert!(y.to_limbs() == [ 0xABC, 0, 0, 0 ]);
        let y = F::from_bytes(&[ 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09 ]).unwrap();
        assert!(y.to_limbs() == [ 0x0203040506070809, 0x01, 0, 0 ]);
        assert!(F::from_bytes(&[]).unwrap().iszero() == 0xFFFFFFFF);
        assert!(F::from_hex("").unwrap().iszero() == 0xFFFFFFFF);

        // Failures zero the target.
        let mut z = x;
        assert!(z.set_bytes(&[1u8; 33]) == Err(Error::InvalidLength { len: 33, max: 32 }));
        assert!(z.iszero() == 0xFFFFFFFF);
        let mut z = x;
        let long = [b'1'; 65];
        assert!(z.set_hex(&long[..]) == Err(Error::InvalidLength { len: 65, max: 64 }));
        assert!(z.iszero() == 0xFFFFFFFF);
        let mut z = x;
        assert!(z.set_hex("12g4") == Err(Error::InvalidArgument));
        assert!(z.iszero() == 0xFFFFFFFF);

        let mut short = [0u8; 63];
        assert!(x.get_hex(&mut short[..]).is_err());
    }

    #[test]
    fn random_values() {
        struct Counter(u8);
        impl rand_core::RngCore for Counter {
            fn next_u32(&mut self) -> u32 { rand_core::impls::next_u32_via_fill(self) }
            fn next_u64(&mut self) -> u64 { rand_core::impls::next_u64_via_fill(self) }
            fn fill_bytes(&mut self, dest: &mut [u8]) {
                for b in dest.iter_mut() {
                    *b = self.0;
                    self.0 = self.0.wrapping_add(1);
                }
            }
            fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
                self.fill_bytes(dest);
                Ok(())
            }
        }
        impl rand_core::CryptoRng for Counter {}

        let mut rng = Counter(0);
        let x = F::random(&mut rng).unwrap();
        assert!(x.to_limbs()[0] == 0x0706050403020100);
        assert!(x.to_limbs()[3] == 0x1F1E1D1C1B1A1918);
    }
}
