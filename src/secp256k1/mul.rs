use core::ops::{Mul, MulAssign};

use super::point::Point;
use super::recode::{booth_recode, first_window, scalar_bytes, window};
use super::table::PointTable;
use super::Scalar;

#[cfg(feature = "alloc")]
use super::table::{GeneratorTable, GEN_ROWS};

impl Point {

    /// Multiplies this point by a scalar (in place).
    ///
    /// The scalar is reduced modulo n. This operation is constant-time
    /// with regard to both the point and the scalar value.
    pub fn set_mul(&mut self, k: &Scalar) {
        let tab = PointTable::new(self);
        let b = scalar_bytes(k);

        // Signed 5-bit digits, from the top window (bits 254..259) down
        // to the bottom window (bits 0..4, with an implicit zero below).
        let lookup = |w: u32| -> Point {
            let d = booth_recode::<5>(w);
            let mut P = tab.lookup(d >> 1);
            P.set_condneg((d & 1).wrapping_neg());
            P
        };

        let mut idx = 255;
        *self = lookup(window(&b, idx, 0x3F));
        self.set_xdouble(5);
        idx -= 5;
        while idx >= 5 {
            self.set_add(&lookup(window(&b, idx, 0x3F)));
            idx -= 5;
            self.set_xdouble(5);
        }
        self.set_add(&lookup(first_window(&b, 0x3F)));
    }

    /// Returns this point multiplied by a scalar (see `set_mul()`).
    #[inline(always)]
    pub fn mul(self, k: &Scalar) -> Self {
        let mut r = self;
        r.set_mul(k);
        r
    }

    /// Sets this point to `k*G`, using the precomputed generator table.
    ///
    /// The scalar is reduced modulo n. This operation is constant-time.
    /// It is considerably faster than `Point::BASE.mul(k)`.
    #[cfg(feature = "alloc")]
    pub fn set_mulgen(&mut self, table: &GeneratorTable, k: &Scalar) {
        let b = scalar_bytes(k);

        // 37 signed 7-bit digits; digit i selects from row i.
        let d = booth_recode::<7>(first_window(&b, 0xFF));
        let mut P = table.lookup(0, d >> 1);
        P.set_condneg((d & 1).wrapping_neg());
        *self = Point::from_affine_mont(&P);

        for i in 1..GEN_ROWS {
            let d = booth_recode::<7>(window(&b, 7 * i, 0xFF));
            let mut P = table.lookup(i, d >> 1);
            P.set_condneg((d & 1).wrapping_neg());
            self.set_add_affine(&P);
        }
    }

    /// Returns `k*G` (see `set_mulgen()`).
    #[cfg(feature = "alloc")]
    #[inline]
    pub fn mulgen(table: &GeneratorTable, k: &Scalar) -> Self {
        let mut P = Point::NEUTRAL;
        P.set_mulgen(table, k);
        P
    }
}

impl Mul<Scalar> for Point {
    type Output = Point;

    #[inline(always)]
    fn mul(self, other: Scalar) -> Point {
        let mut r = self;
        r.set_mul(&other);
        r
    }
}

impl Mul<&Scalar> for Point {
    type Output = Point;

    #[inline(always)]
    fn mul(self, other: &Scalar) -> Point {
        let mut r = self;
        r.set_mul(other);
        r
    }
}

impl Mul<&Scalar> for &Point {
    type Output = Point;

    #[inline(always)]
    fn mul(self, other: &Scalar) -> Point {
        let mut r = *self;
        r.set_mul(other);
        r
    }
}

impl MulAssign<Scalar> for Point {
    #[inline(always)]
    fn mul_assign(&mut self, other: Scalar) {
        self.set_mul(&other);
    }
}

impl MulAssign<&Scalar> for Point {
    #[inline(always)]
    fn mul_assign(&mut self, other: &Scalar) {
        self.set_mul(other);
    }
}
