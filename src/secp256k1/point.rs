use core::fmt;
use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use super::GFp;
use crate::Error;

/// A point on secp256k1, in Jacobian coordinates.
///
/// Coordinates are kept in the Montgomery domain. The point (X:Y:Z)
/// stands for the affine point (X/Z^2, Y/Z^3); the point-at-infinity
/// is any triple with Z = 0.
#[derive(Clone, Copy, Debug)]
pub struct Point {
    pub(crate) X: GFp,
    pub(crate) Y: GFp,
    pub(crate) Z: GFp,
}

/// A point in affine coordinates.
///
/// When stored in precomputed tables, coordinates are in the Montgomery
/// domain and (0, 0) stands for the point-at-infinity ((0, 0) is not on
/// the curve, so there is no ambiguity).
#[derive(Clone, Copy, Debug)]
pub struct PointAffine {
    pub(crate) x: GFp,
    pub(crate) y: GFp,
}

impl PointAffine {

    /// The all-zero entry (stands for the point-at-infinity).
    pub const INFINITY: Self = Self { x: GFp::ZERO, y: GFp::ZERO };

    /// Returns the x coordinate (Montgomery domain).
    pub fn x(&self) -> GFp {
        self.x
    }

    /// Returns the y coordinate (Montgomery domain).
    pub fn y(&self) -> GFp {
        self.y
    }

    /// Returns 0xFFFFFFFF if this entry is the all-zero encoding of the
    /// point-at-infinity, 0x00000000 otherwise.
    #[inline(always)]
    pub fn isneutral(&self) -> u32 {
        self.x.iszero() & self.y.iszero()
    }

    #[inline(always)]
    pub(crate) fn set_cond(&mut self, P: &Self, ctl: u32) {
        self.x.set_cond(&P.x, ctl);
        self.y.set_cond(&P.y, ctl);
    }

    // Negates this point if ctl == 0xFFFFFFFF (unchanged if ctl == 0).
    #[inline(always)]
    pub(crate) fn set_condneg(&mut self, ctl: u32) {
        let ny = -self.y;
        self.y.set_cond(&ny, ctl);
    }
}

impl Point {

    // Curve equation is y^2 = x^3 + 7. Doubling uses the a = 0 Jacobian
    // formulas (3M+4S plus linear operations); addition uses the
    // standard Jacobian formulas (12M+4S), mixed addition saves the
    // multiplications by Z2. Neither formula is complete by itself: the
    // exceptional cases (operand at infinity, equal operands) are fixed
    // with masked selections so that the sequence of operations does not
    // depend on the values.

    /// The point-at-infinity (neutral element).
    pub const NEUTRAL: Self = Self {
        X: GFp::ZERO,
        Y: GFp::MONT_ONE,
        Z: GFp::ZERO,
    };

    /// The conventional generator G (Montgomery domain, Z = 1).
    pub const BASE: Self = Self {
        X: GFp::w64le(
            0xD7362E5A487E2097, 0x231E295329BC66DB,
            0x979F48C033FD129C, 0x9981E643E9089F48),
        Y: GFp::w64le(
            0xB15EA6D2D3DBABE2, 0x8DFC5D5D1F1DC64D,
            0x70B6B59AAC19C136, 0xCF3F851FD4A582D6),
        Z: GFp::MONT_ONE,
    };

    /// Curve equation parameter b, as a plain word multiplier (word
    /// multiplication commutes with the Montgomery representation).
    const B: u64 = 7;

    /// Returns the Jacobian coordinates (X, Y, Z) of this point
    /// (Montgomery domain).
    pub fn to_jacobian(self) -> (GFp, GFp, GFp) {
        (self.X, self.Y, self.Z)
    }

    /// Tests whether this point is the point-at-infinity.
    ///
    /// Returned value is 0xFFFFFFFF for infinity, 0x00000000 otherwise.
    #[inline(always)]
    pub fn isneutral(self) -> u32 {
        self.Z.iszero()
    }

    /// Doubles this point (in place).
    pub fn set_double(&mut self) {
        let (X, Y, Z) = (&self.X, &self.Y, &self.Z);

        // S = 4*X*Y^2, M = 3*X^2, T = 8*Y^4
        // X3 = M^2 - 2*S, Y3 = M*(S - X3) - T, Z3 = 2*Y*Z
        let S = Y.double();
        let Z3 = S.mul_mont(Z);
        let S = S.sqr_mont();
        let T = S.sqr_mont().half();
        let M = X.sqr_mont().triple();
        let S = S.mul_mont(X);
        let X3 = M.sqr_mont() - S.double();
        let Y3 = (S - X3).mul_mont(&M) - T;

        // Z = 0 yields Z3 = 0: infinity is preserved.
        self.X = X3;
        self.Y = Y3;
        self.Z = Z3;
    }

    /// Doubles this point.
    #[inline(always)]
    pub fn double(self) -> Self {
        let mut r = self;
        r.set_double();
        r
    }

    /// Doubles this point n times (in place).
    pub fn set_xdouble(&mut self, n: u32) {
        for _ in 0..n {
            self.set_double();
        }
    }

    /// Doubles this point n times.
    #[inline(always)]
    pub fn xdouble(self, n: u32) -> Self {
        let mut r = self;
        r.set_xdouble(n);
        r
    }

    /// Adds point `rhs` to `self`.
    ///
    /// All cases are handled in constant-time: either operand may be
    /// the point-at-infinity, and the operands may be equal or opposite.
    pub fn set_add(&mut self, rhs: &Self) {
        let (X1, Y1, Z1) = (&self.X, &self.Y, &self.Z);
        let (X2, Y2, Z2) = (&rhs.X, &rhs.Y, &rhs.Z);

        let z1z1 = Z1.sqr_mont();
        let z2z2 = Z2.sqr_mont();
        let U1 = X1.mul_mont(&z2z2);
        let U2 = X2.mul_mont(&z1z1);
        let S1 = Y1.mul_mont(&z2z2).mul_mont(Z2);
        let S2 = Y2.mul_mont(&z1z1).mul_mont(Z1);
        let H = U2 - U1;
        let R = S2 - S1;

        let hh = H.sqr_mont();
        let hhh = hh.mul_mont(&H);
        let V = U1.mul_mont(&hh);
        let X3 = R.sqr_mont() - hhh - V.double();
        let Y3 = R.mul_mont(&(V - X3)) - S1.mul_mont(&hhh);
        let Z3 = H.mul_mont(Z1).mul_mont(Z2);

        // H = 0 and R = 0 with both operands finite means that the
        // operands are equal; the formulas then yield zero and we use
        // the doubling instead. Opposite operands give H = 0 but R != 0,
        // hence Z3 = 0 (infinity), which is correct.
        let inf1 = self.isneutral();
        let inf2 = rhs.isneutral();
        let same = H.iszero() & R.iszero() & !inf1 & !inf2;
        let D = self.double();
        let P1 = *self;

        self.X = X3;
        self.Y = Y3;
        self.Z = Z3;
        self.set_cond(&D, same);
        self.set_cond(rhs, inf1);
        self.set_cond(&P1, inf2);
    }

    /// Adds the affine point `rhs` (Montgomery domain) to `self`.
    ///
    /// The all-zero affine point is interpreted as the point-at-infinity.
    pub fn set_add_affine(&mut self, rhs: &PointAffine) {
        let (X1, Y1, Z1) = (&self.X, &self.Y, &self.Z);
        let (x2, y2) = (&rhs.x, &rhs.y);

        // Same as set_add(), with Z2 = 1.
        let z1z1 = Z1.sqr_mont();
        let U2 = x2.mul_mont(&z1z1);
        let S2 = y2.mul_mont(&z1z1).mul_mont(Z1);
        let H = U2 - X1;
        let R = S2 - Y1;

        let hh = H.sqr_mont();
        let hhh = hh.mul_mont(&H);
        let V = X1.mul_mont(&hh);
        let X3 = R.sqr_mont() - hhh - V.double();
        let Y3 = R.mul_mont(&(V - X3)) - Y1.mul_mont(&hhh);
        let Z3 = H.mul_mont(Z1);

        let inf1 = self.isneutral();
        let inf2 = rhs.isneutral();
        let same = H.iszero() & R.iszero() & !inf1 & !inf2;
        let D = self.double();
        let P1 = *self;
        let P2 = Self { X: *x2, Y: *y2, Z: GFp::MONT_ONE };

        self.X = X3;
        self.Y = Y3;
        self.Z = Z3;
        self.set_cond(&D, same);
        self.set_cond(&P2, inf1);
        self.set_cond(&P1, inf2);
    }

    /// Negates this point (in place).
    #[inline(always)]
    pub fn set_neg(&mut self) {
        self.Y.set_neg();
    }

    /// Subtracts point `rhs` from `self`.
    pub fn set_sub(&mut self, rhs: &Self) {
        self.set_add(&-rhs);
    }

    /// Compares two points for equality.
    ///
    /// Returned value is 0xFFFFFFFF if the two points are equal,
    /// 0x00000000 otherwise. The point-at-infinity is equal only to
    /// itself.
    pub fn equals(self, rhs: Self) -> u32 {
        let z1z1 = self.Z.sqr_mont();
        let z2z2 = rhs.Z.sqr_mont();
        let ex = self.X.mul_mont(&z2z2).equals(rhs.X.mul_mont(&z1z1));
        let ey = self.Y.mul_mont(&z2z2).mul_mont(&rhs.Z)
            .equals(rhs.Y.mul_mont(&z1z1).mul_mont(&self.Z));
        let inf1 = self.isneutral();
        let inf2 = rhs.isneutral();
        (inf1 & inf2) | (!inf1 & !inf2 & ex & ey)
    }

    /// Checks that this point satisfies the curve equation
    /// Y^2 = X^3 + 7*Z^6. The point-at-infinity is on the curve.
    ///
    /// Returned value is 0xFFFFFFFF on success, 0x00000000 otherwise.
    pub fn is_on_curve(self) -> u32 {
        let yy = self.Y.sqr_mont();
        let xxx = self.X.sqr_mont().mul_mont(&self.X);
        let zz = self.Z.sqr_mont();
        let z6 = zz.sqr_mont().mul_mont(&zz);
        yy.equals(xxx + z6.mul_word(Self::B)) | self.Z.iszero()
    }

    // Conditionally copies the provided point (`P`) into `self`.
    //
    //  - If `ctl` is 0xFFFFFFFF, then the value of `P` is copied into `self`.
    //
    //  - if `ctl` is 0x00000000, then the value of `self` is unchanged.
    //
    // Value `ctl` MUST be either 0x00000000 or 0xFFFFFFFF.
    #[inline]
    pub fn set_cond(&mut self, P: &Self, ctl: u32) {
        self.X.set_cond(&P.X, ctl);
        self.Y.set_cond(&P.Y, ctl);
        self.Z.set_cond(&P.Z, ctl);
    }

    /// Returns a point equal to `P0` (if `ctl` = 0x00000000) or `P1` (if
    /// `ctl` = 0xFFFFFFFF).
    ///
    /// Value `ctl` MUST be either 0x00000000 or 0xFFFFFFFF.
    #[inline(always)]
    pub fn select(P0: &Self, P1: &Self, ctl: u32) -> Self {
        let mut P = *P0;
        P.set_cond(P1, ctl);
        P
    }

    /// Conditionally negates this point.
    #[inline]
    pub fn set_condneg(&mut self, ctl: u32) {
        let ny = -self.Y;
        self.Y.set_cond(&ny, ctl);
    }

    /// Converts this point to affine coordinates, staying in the
    /// Montgomery domain. The point-at-infinity yields (0, 0).
    pub fn to_affine_mont(self) -> PointAffine {
        let zi = self.Z.invert_mont();
        let zi2 = zi.sqr_mont();
        PointAffine {
            x: self.X.mul_mont(&zi2),
            y: self.Y.mul_mont(&zi2).mul_mont(&zi),
        }
    }

    /// Returns the affine coordinates (x, y) of this point, as plain
    /// (non-Montgomery) field elements.
    ///
    /// The point-at-infinity has no affine coordinates and yields
    /// `Error::PointAtInfinity`.
    pub fn to_affine(self) -> Result<(GFp, GFp), Error> {
        if self.isneutral() != 0 {
            return Err(Error::PointAtInfinity);
        }
        let P = self.to_affine_mont();
        Ok((P.x.from_mont(), P.y.from_mont()))
    }

    /// Creates a point from plain (non-Montgomery) affine coordinates.
    ///
    /// The coordinates must be reduced modulo p. If (x, y) is not on the
    /// curve (in particular, (0, 0)), then `Error::InvalidPoint` is
    /// returned.
    pub fn from_affine(x: &GFp, y: &GFp) -> Result<Self, Error> {
        let P = Self {
            X: x.to_mont(),
            Y: y.to_mont(),
            Z: GFp::MONT_ONE,
        };
        if P.is_on_curve() == 0 {
            return Err(Error::InvalidPoint);
        }
        Ok(P)
    }

    /// Creates a point from an affine table entry (Montgomery domain);
    /// the all-zero entry maps to the point-at-infinity.
    pub fn from_affine_mont(P: &PointAffine) -> Self {
        let Z = GFp::select(&GFp::MONT_ONE, &GFp::ZERO, P.isneutral());
        Self { X: P.x, Y: P.y, Z }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "X: {}", self.X)?;
        writeln!(f, "Y: {}", self.Y)?;
        write!(f, "Z: {}", self.Z)
    }
}

impl Add<Point> for Point {
    type Output = Point;

    #[inline(always)]
    fn add(self, other: Point) -> Point {
        let mut P = self;
        P.set_add(&other);
        P
    }
}

impl Add<&Point> for Point {
    type Output = Point;

    #[inline(always)]
    fn add(self, other: &Point) -> Point {
        let mut P = self;
        P.set_add(other);
        P
    }
}

impl Add<Point> for &Point {
    type Output = Point;

    #[inline(always)]
    fn add(self, other: Point) -> Point {
        let mut P = *self;
        P.set_add(&other);
        P
    }
}

impl Add<&Point> for &Point {
    type Output = Point;

    #[inline(always)]
    fn add(self, other: &Point) -> Point {
        let mut P = *self;
        P.set_add(other);
        P
    }
}

impl AddAssign<Point> for Point {
    #[inline(always)]
    fn add_assign(&mut self, other: Point) {
        self.set_add(&other);
    }
}

impl AddAssign<&Point> for Point {
    #[inline(always)]
    fn add_assign(&mut self, other: &Point) {
        self.set_add(other);
    }
}

impl Neg for Point {
    type Output = Point;

    #[inline(always)]
    fn neg(self) -> Point {
        let mut P = self;
        P.set_neg();
        P
    }
}

impl Neg for &Point {
    type Output = Point;

    #[inline(always)]
    fn neg(self) -> Point {
        let mut P = *self;
        P.set_neg();
        P
    }
}

impl Sub<Point> for Point {
    type Output = Point;

    #[inline(always)]
    fn sub(self, other: Point) -> Point {
        let mut P = self;
        P.set_sub(&other);
        P
    }
}

impl Sub<&Point> for Point {
    type Output = Point;

    #[inline(always)]
    fn sub(self, other: &Point) -> Point {
        let mut P = self;
        P.set_sub(other);
        P
    }
}

impl Sub<Point> for &Point {
    type Output = Point;

    #[inline(always)]
    fn sub(self, other: Point) -> Point {
        let mut P = *self;
        P.set_sub(&other);
        P
    }
}

impl Sub<&Point> for &Point {
    type Output = Point;

    #[inline(always)]
    fn sub(self, other: &Point) -> Point {
        let mut P = *self;
        P.set_sub(other);
        P
    }
}

impl SubAssign<Point> for Point {
    #[inline(always)]
    fn sub_assign(&mut self, other: Point) {
        self.set_sub(&other);
    }
}

impl SubAssign<&Point> for Point {
    #[inline(always)]
    fn sub_assign(&mut self, other: &Point) {
        self.set_sub(other);
    }
}

#[cfg(test)]
mod tests {

    use super::{Point, PointAffine};
    use crate::secp256k1::GFp;
    use crate::Error;

    // 2*G and 3*G (plain affine coordinates).
    const KG2: [&str; 2] = [
        "C6047F9441ED7D6D3045406E95C07CD85C778E4B8CEF3CA7ABAC09B95C709EE5",
        "1AE168FEA63DC339A3C58419466CEAEEF7F632653266D0E1236431A950CFE52A",
    ];
    const KG3: [&str; 2] = [
        "F9308A019258C31049344F85F89D5229B531C845836F99B08601F113BCE036F9",
        "388F7B0F632DE8140FE337E62A37F3566500A99934C2231B6CB9FD7584B8E672",
    ];

    fn from_hex(v: &[&str; 2]) -> Point {
        let x = GFp::from_hex(v[0]).unwrap();
        let y = GFp::from_hex(v[1]).unwrap();
        Point::from_affine(&x, &y).unwrap()
    }

    fn check_affine(P: Point, v: &[&str; 2]) {
        let (x, y) = P.to_affine().unwrap();
        assert!(x.equals(GFp::from_hex(v[0]).unwrap()) == 0xFFFFFFFF);
        assert!(y.equals(GFp::from_hex(v[1]).unwrap()) == 0xFFFFFFFF);
    }

    #[test]
    fn base_arith() {
        let G = Point::BASE;
        assert!(G.is_on_curve() == 0xFFFFFFFF);
        assert!(G.isneutral() == 0);
        check_affine(G, &[
            "79BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798",
            "483ADA7726A3C4655DA4FBFC0E1108A8FD17B448A68554199C47D08FFB10D4B8",
        ]);

        let G2 = G.double();
        assert!(G2.is_on_curve() == 0xFFFFFFFF);
        check_affine(G2, &KG2);
        check_affine(G + G, &KG2);
        let G3 = G2 + G;
        check_affine(G3, &KG3);
        check_affine(G + G2, &KG3);
        assert!(G3.equals(from_hex(&KG3)) == 0xFFFFFFFF);
        assert!(G3.equals(G2) == 0);
        assert!((G3 - G).equals(G2) == 0xFFFFFFFF);

        // Jacobian operands with distinct Z.
        let G4 = G2.double();
        assert!((G3 + G).equals(G4) == 0xFFFFFFFF);
        assert!((G2 + G2).equals(G4) == 0xFFFFFFFF);
        let mut T = G3;
        T += G3;
        T -= G2;
        assert!(T.equals(G4) == 0xFFFFFFFF);
    }

    #[test]
    fn neutral() {
        let N = Point::NEUTRAL;
        let G = Point::BASE;
        assert!(N.isneutral() == 0xFFFFFFFF);
        assert!(N.is_on_curve() == 0xFFFFFFFF);
        assert!(N.double().isneutral() == 0xFFFFFFFF);
        assert!(N.xdouble(5).isneutral() == 0xFFFFFFFF);
        assert!((N + N).isneutral() == 0xFFFFFFFF);
        assert!((G + N).equals(G) == 0xFFFFFFFF);
        assert!((N + G).equals(G) == 0xFFFFFFFF);
        assert!((G - G).isneutral() == 0xFFFFFFFF);
        assert!((G.double() + (-G.double())).isneutral() == 0xFFFFFFFF);
        assert!(N.equals(N) == 0xFFFFFFFF);
        assert!(N.equals(G) == 0);
        assert!(G.equals(N) == 0);
        assert!(N.to_affine().err() == Some(Error::PointAtInfinity));
        let P = N.to_affine_mont();
        assert!(P.isneutral() == 0xFFFFFFFF);
        assert!(Point::from_affine_mont(&P).isneutral() == 0xFFFFFFFF);
    }

    #[test]
    fn affine() {
        let G = Point::BASE;
        let G2 = G.double();
        let G3 = G2 + G;

        // Mixed addition, including all exceptional cases.
        let a1 = G.to_affine_mont();
        let a2 = G2.to_affine_mont();
        let mut T = G2;
        T.set_add_affine(&a1);
        assert!(T.equals(G3) == 0xFFFFFFFF);
        let mut T = G2;
        T.set_add_affine(&a2);
        assert!(T.equals(G2.double()) == 0xFFFFFFFF);
        let mut T = G2;
        let mut na2 = a2;
        na2.set_condneg(0xFFFFFFFF);
        T.set_add_affine(&na2);
        assert!(T.isneutral() == 0xFFFFFFFF);
        let mut T = Point::NEUTRAL;
        T.set_add_affine(&a1);
        assert!(T.equals(G) == 0xFFFFFFFF);
        let mut T = G3;
        T.set_add_affine(&PointAffine::INFINITY);
        assert!(T.equals(G3) == 0xFFFFFFFF);
        let mut T = Point::NEUTRAL;
        T.set_add_affine(&PointAffine::INFINITY);
        assert!(T.isneutral() == 0xFFFFFFFF);

        // Round trip through plain affine coordinates.
        let (x, y) = G3.to_affine().unwrap();
        let P = Point::from_affine(&x, &y).unwrap();
        assert!(P.equals(G3) == 0xFFFFFFFF);
        let (x2, y2) = P.to_affine().unwrap();
        assert!(x2.equals(x) == 0xFFFFFFFF && y2.equals(y) == 0xFFFFFFFF);
        assert!(Point::from_affine_mont(&a1).equals(G) == 0xFFFFFFFF);

        // Invalid points.
        assert!(Point::from_affine(&GFp::ZERO, &GFp::ZERO).err()
            == Some(Error::InvalidPoint));
        assert!(Point::from_affine(&x, &y.add_word(1)).err()
            == Some(Error::InvalidPoint));
    }

    #[test]
    fn cond_ops() {
        let G = Point::BASE;
        let N = Point::NEUTRAL;
        assert!(Point::select(&G, &N, 0).equals(G) == 0xFFFFFFFF);
        assert!(Point::select(&G, &N, 0xFFFFFFFF).isneutral() == 0xFFFFFFFF);
        let mut T = G;
        T.set_condneg(0);
        assert!(T.equals(G) == 0xFFFFFFFF);
        T.set_condneg(0xFFFFFFFF);
        assert!(T.equals(-G) == 0xFFFFFFFF);
        let (X, Y, Z) = G.to_jacobian();
        assert!(X.equals(G.X) == 0xFFFFFFFF);
        assert!(Y.equals(G.Y) == 0xFFFFFFFF);
        assert!(Z.equals(GFp::MONT_ONE) == 0xFFFFFFFF);
        let s = format!("{}", G);
        assert!(s.starts_with("X: 9981e643e9089f48"));
        assert!(s.ends_with("01000003d1"));
        assert!(s.lines().count() == 3);
    }
}
