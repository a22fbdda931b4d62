// Generic four-limb residues (any large odd modulus).
pub mod fp256;

// Montgomery multiplication, squaring and domain conversion, for the
// secp256k1 base field only.
mod montgomery;

// Limb primitives. Carries and borrows are u8 values, always 0 or 1.
// On x86-64 the intrinsics map to adc/sbb; elsewhere the portable
// versions compile to equivalent flag-based sequences.

// (x, y, c) -> (x + y + c mod 2^64, carry out)
#[cfg(target_arch = "x86_64")]
#[inline(always)]
pub(crate) fn addcarry_u64(x: u64, y: u64, c: u8) -> (u64, u8) {
    let mut d = 0u64;
    let cc = unsafe { core::arch::x86_64::_addcarry_u64(c, x, y, &mut d) };
    (d, cc)
}

#[cfg(not(target_arch = "x86_64"))]
#[inline(always)]
pub(crate) const fn addcarry_u64(x: u64, y: u64, c: u8) -> (u64, u8) {
    let (s, c1) = x.overflowing_add(y);
    let (s, c2) = s.overflowing_add(c as u64);
    (s, (c1 | c2) as u8)
}

// (x, y, c) -> (x - y - c mod 2^64, borrow out)
#[cfg(target_arch = "x86_64")]
#[inline(always)]
pub(crate) fn subborrow_u64(x: u64, y: u64, c: u8) -> (u64, u8) {
    let mut d = 0u64;
    let cc = unsafe { core::arch::x86_64::_subborrow_u64(c, x, y, &mut d) };
    (d, cc)
}

#[cfg(not(target_arch = "x86_64"))]
#[inline(always)]
pub(crate) const fn subborrow_u64(x: u64, y: u64, c: u8) -> (u64, u8) {
    let (s, b1) = x.overflowing_sub(y);
    let (s, b2) = s.overflowing_sub(c as u64);
    (s, (b1 | b2) as u8)
}

// 64x64->128 products, split as (lo, hi). The additive variants cannot
// overflow: (2^64-1)^2 + 2*(2^64-1) = 2^128 - 1.

#[inline(always)]
pub(crate) const fn umull(x: u64, y: u64) -> (u64, u64) {
    umull_add2(x, y, 0, 0)
}

#[inline(always)]
pub(crate) const fn umull_add(x: u64, y: u64, z: u64) -> (u64, u64) {
    umull_add2(x, y, z, 0)
}

#[inline(always)]
pub(crate) const fn umull_add2(x: u64, y: u64, z1: u64, z2: u64) -> (u64, u64) {
    let t = (x as u128) * (y as u128) + (z1 as u128) + (z2 as u128);
    (t as u64, (t >> 64) as u64)
}
