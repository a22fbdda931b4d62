use super::point::{Point, PointAffine};

#[cfg(feature = "alloc")]
use crate::{Error, Vec};

// Constant-time conditional copy, shared by all table entry types so
// that a single gather/scatter pair serves every table.
pub(crate) trait CondAssign: Copy {
    // Value returned by a gather whose index matches no entry.
    const ZERO_ENTRY: Self;

    fn ct_assign(&mut self, src: &Self, ctl: u32);
}

impl CondAssign for Point {
    // All-zero: Z = 0, hence the point-at-infinity.
    const ZERO_ENTRY: Self = Point {
        X: super::GFp::ZERO,
        Y: super::GFp::ZERO,
        Z: super::GFp::ZERO,
    };

    #[inline(always)]
    fn ct_assign(&mut self, src: &Self, ctl: u32) {
        self.set_cond(src, ctl);
    }
}

impl CondAssign for PointAffine {
    const ZERO_ENTRY: Self = PointAffine::INFINITY;

    #[inline(always)]
    fn ct_assign(&mut self, src: &Self, ctl: u32) {
        self.set_cond(src, ctl);
    }
}

// Returns 0xFFFFFFFF if j == idx, 0x00000000 otherwise. Both values
// MUST be lower than 2^31, except that idx may be 0xFFFFFFFF (which
// then matches nothing).
#[inline(always)]
fn eq_mask(idx: u32, j: u32) -> u32 {
    // Values a-b and b-a both have their high bit equal to 0 only
    // if a == b.
    let w = !(idx.wrapping_sub(j) | j.wrapping_sub(idx));
    ((w as i32) >> 31) as u32
}

// Reads entry idx from the table; all entries are read. An index beyond
// the table yields T::ZERO_ENTRY.
#[inline]
pub(crate) fn gather<T: CondAssign>(tab: &[T], idx: u32) -> T {
    let mut r = T::ZERO_ENTRY;
    for (j, e) in tab.iter().enumerate() {
        r.ct_assign(e, eq_mask(idx, j as u32));
    }
    r
}

// Writes val into entry idx; all entries are accessed.
#[inline]
pub(crate) fn scatter<T: CondAssign>(tab: &mut [T], val: &T, idx: u32) {
    for (j, e) in tab.iter_mut().enumerate() {
        e.ct_assign(val, eq_mask(idx, j as u32));
    }
}

/// Window table for point multiplication: entry `k - 1` holds `k*Q`,
/// for k = 1 to 16.
#[derive(Clone, Copy, Debug)]
#[repr(C, align(64))]
pub struct PointTable(pub(crate) [Point; 16]);

impl PointTable {

    /// Builds the table for point `Q`.
    pub fn new(Q: &Point) -> Self {
        let mut tab = [Point::NEUTRAL; 16];
        let mut tmp = [Point::NEUTRAL; 5];

        // Multiples are produced in the order:
        //   1 2 3 4 6 5 7 8 12 10 14 13 11 15 9 16
        // each one being a doubling or an addition of Q to an earlier
        // multiple kept in tmp[].
        tmp[0] = *Q;
        scatter(&mut tab, &tmp[0], 0);
        tmp[1] = tmp[0].double();                   // 2
        scatter(&mut tab, &tmp[1], 1);
        tmp[2] = tmp[1] + tmp[0];                   // 3
        scatter(&mut tab, &tmp[2], 2);
        tmp[3] = tmp[1].double();                   // 4
        scatter(&mut tab, &tmp[3], 3);
        tmp[4] = tmp[2].double();                   // 6
        scatter(&mut tab, &tmp[4], 5);
        tmp[1] = tmp[3] + tmp[0];                   // 5
        scatter(&mut tab, &tmp[1], 4);
        tmp[2] = tmp[4] + tmp[0];                   // 7
        scatter(&mut tab, &tmp[2], 6);
        tmp[3] = tmp[3].double();                   // 8
        scatter(&mut tab, &tmp[3], 7);
        tmp[4] = tmp[4].double();                   // 12
        scatter(&mut tab, &tmp[4], 11);
        tmp[1] = tmp[1].double();                   // 10
        scatter(&mut tab, &tmp[1], 9);
        tmp[2] = tmp[2].double();                   // 14
        scatter(&mut tab, &tmp[2], 13);
        tmp[4] = tmp[4] + tmp[0];                   // 13
        scatter(&mut tab, &tmp[4], 12);
        tmp[1] = tmp[1] + tmp[0];                   // 11
        scatter(&mut tab, &tmp[1], 10);
        tmp[2] = tmp[2] + tmp[0];                   // 15
        scatter(&mut tab, &tmp[2], 14);
        tmp[4] = tmp[3] + tmp[0];                   // 9
        scatter(&mut tab, &tmp[4], 8);
        tmp[3] = tmp[3].double();                   // 16
        scatter(&mut tab, &tmp[3], 15);

        Self(tab)
    }

    /// Returns `k*Q` for magnitude `k` (0 to 16) in constant-time; zero
    /// yields the point-at-infinity.
    #[inline]
    pub fn lookup(&self, k: u32) -> Point {
        gather(&self.0, k.wrapping_sub(1))
    }
}

/// Number of rows in the generator table (one per 7-bit window).
pub const GEN_ROWS: usize = 37;

/// Number of entries per row in the generator table.
pub const GEN_COLS: usize = 64;

/// One row of the generator table, aligned on a cache line.
#[derive(Clone, Copy, Debug)]
#[repr(C, align(64))]
pub struct TableRow(pub(crate) [PointAffine; GEN_COLS]);

/// Precomputed affine multiples of the generator: in row i, entry
/// `k - 1` holds `k*2^(7*i)*G` (Montgomery domain), for k = 1 to 64.
///
/// The table uses about 150 kB of heap memory.
#[cfg(feature = "alloc")]
#[derive(Clone, Debug)]
pub struct GeneratorTable {
    rows: Vec<TableRow>,
}

#[cfg(feature = "alloc")]
impl GeneratorTable {

    /// Allocates and computes the table.
    ///
    /// If the memory cannot be obtained, `Error::AllocationFailure` is
    /// returned.
    pub fn new() -> Result<Self, Error> {
        let _span = tracing::debug_span!("generator_table", rows = GEN_ROWS,
            cols = GEN_COLS).entered();

        let mut rows: Vec<TableRow> = Vec::new();
        rows.try_reserve_exact(GEN_ROWS).map_err(|_| {
            tracing::error!(rows = GEN_ROWS, "cannot allocate generator table");
            Error::AllocationFailure
        })?;
        rows.resize(GEN_ROWS, TableRow([PointAffine::INFINITY; GEN_COLS]));

        // T = k*G; its successive 7-doublings fill column k-1 of all rows.
        let mut T = Point::BASE;
        for k in 1..=(GEN_COLS as u32) {
            let mut P = T;
            for row in rows.iter_mut() {
                scatter(&mut row.0, &P.to_affine_mont(), k - 1);
                P.set_xdouble(7);
            }
            T += Point::BASE;
        }

        tracing::debug!("generator table computed");
        Ok(Self { rows })
    }

    /// Returns `k*2^(7*row)*G` as an affine point (Montgomery domain)
    /// for magnitude `k` (0 to 64), in constant-time; zero yields the
    /// all-zero entry (point-at-infinity).
    ///
    /// `row` MUST be lower than 37 (it is not secret).
    #[inline]
    pub fn lookup(&self, row: usize, k: u32) -> PointAffine {
        gather(&self.rows[row].0, k.wrapping_sub(1))
    }

    /// Returns the number of rows (always 37).
    pub fn rows(&self) -> usize {
        self.rows.len()
    }
}

// Table shared by tests in the curve modules; computed once.
#[cfg(all(test, feature = "std"))]
pub(crate) fn shared_table() -> &'static GeneratorTable {
    use std::sync::OnceLock;
    static TABLE: OnceLock<GeneratorTable> = OnceLock::new();
    TABLE.get_or_init(|| GeneratorTable::new().unwrap())
}
