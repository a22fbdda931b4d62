//! Process-wide precomputation context.
//!
//! Generator multiplication needs a precomputed table (about 150 kB).
//! A `Context` owns that table together with the detected CPU features.
//! The table is handed out as a reference-counted handle, so that the
//! internal lock is held only while the table slot is read or changed,
//! never during arithmetic; freeing the table while multiplications are
//! in progress is safe (they keep their own handle).
//!
//! The free functions `init()`, `deinit()` and `mulgen()` operate on a
//! single global context. `init()` is idempotent and thread-safe: when
//! several threads call it concurrently, the table is built exactly once.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::cpuid::{CpuFeatures, Implementation};
use crate::secp256k1::{GeneratorTable, Point, Scalar};
use crate::Error;

#[derive(Debug)]
struct ContextState {
    table: Option<Arc<GeneratorTable>>,
    cpu: Option<CpuFeatures>,
    implementation: Implementation,
}

/// Shared state for generator multiplication.
#[derive(Debug)]
pub struct Context {
    initialized: AtomicBool,
    state: Mutex<ContextState>,
    builds: AtomicUsize,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {

    /// Creates an empty (uninitialized) context.
    pub const fn new() -> Self {
        Self {
            initialized: AtomicBool::new(false),
            state: Mutex::new(ContextState {
                table: None,
                cpu: None,
                implementation: Implementation::Portable,
            }),
            builds: AtomicUsize::new(0),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, ContextState>, Error> {
        self.state.lock().map_err(|_| {
            tracing::error!("context lock poisoned");
            Error::LockFailure
        })
    }

    /// Initializes this context: detects CPU features and builds the
    /// generator table. Calling it again is a no-op.
    ///
    /// If the table cannot be allocated, the error is logged and the
    /// process is aborted.
    pub fn init(&self) -> Result<(), Error> {
        if self.initialized.load(Ordering::Acquire) {
            return Ok(());
        }
        let mut st = self.lock()?;
        if self.initialized.load(Ordering::Acquire) {
            return Ok(());
        }

        let cpu = CpuFeatures::detect();
        tracing::debug!(features = %cpu, "CPU features detected");
        if st.table.is_none() {
            match GeneratorTable::new() {
                Ok(t) => {
                    st.table = Some(Arc::new(t));
                    self.builds.fetch_add(1, Ordering::Relaxed);
                }
                Err(e) => {
                    tracing::error!(error = %e, "cannot build generator table");
                    std::process::abort();
                }
            }
        }
        st.implementation = Implementation::select(&cpu);
        st.cpu = Some(cpu);

        self.initialized.store(true, Ordering::Release);
        tracing::info!(implementation = st.implementation.name(),
            "secp256k1 context initialized");
        Ok(())
    }

    /// Releases the generator table and forgets the CPU features. Calling
    /// it on an uninitialized context is a no-op.
    pub fn deinit(&self) -> Result<(), Error> {
        if !self.initialized.load(Ordering::Acquire) {
            return Ok(());
        }
        let mut st = self.lock()?;
        if !self.initialized.load(Ordering::Acquire) {
            return Ok(());
        }
        st.table = None;
        st.cpu = None;
        self.initialized.store(false, Ordering::Release);
        tracing::info!("secp256k1 context released");
        Ok(())
    }

    /// Returns true if `init()` has completed (and `deinit()` has not
    /// been called since).
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Builds the generator table if it is not present yet. Calling it
    /// while a table exists is a no-op.
    pub fn generate_table(&self) -> Result<(), Error> {
        let mut st = self.lock()?;
        if st.table.is_some() {
            tracing::debug!("generator table already present");
            return Ok(());
        }
        st.table = Some(Arc::new(GeneratorTable::new()?));
        self.builds.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Releases the generator table, if any. Multiplications that already
    /// obtained the table keep using it until they complete.
    pub fn free_table(&self) -> Result<(), Error> {
        let mut st = self.lock()?;
        if st.table.take().is_some() {
            tracing::debug!("generator table released");
        }
        Ok(())
    }

    /// Returns a handle on the generator table, or
    /// `Error::NotInitialized` if no table is present.
    pub fn table(&self) -> Result<Arc<GeneratorTable>, Error> {
        let st = self.lock()?;
        st.table.clone().ok_or(Error::NotInitialized)
    }

    /// Computes `k*G` with the generator table.
    pub fn mulgen(&self, k: &Scalar) -> Result<Point, Error> {
        let table = self.table()?;
        Ok(Point::mulgen(&table, k))
    }

    /// Returns the CPU features detected by `init()`, if initialized.
    pub fn cpu_features(&self) -> Result<Option<CpuFeatures>, Error> {
        Ok(self.lock()?.cpu)
    }

    /// Returns the arithmetic implementation in use.
    pub fn implementation(&self) -> Result<Implementation, Error> {
        Ok(self.lock()?.implementation)
    }

    /// Returns how many times the generator table was built by this
    /// context.
    pub fn table_builds(&self) -> usize {
        self.builds.load(Ordering::Relaxed)
    }
}

static GLOBAL: Context = Context::new();

/// Returns the process-wide context.
pub fn global() -> &'static Context {
    &GLOBAL
}

/// Initializes the process-wide context (see `Context::init()`).
pub fn init() -> Result<(), Error> {
    GLOBAL.init()
}

/// Releases the process-wide context (see `Context::deinit()`).
pub fn deinit() -> Result<(), Error> {
    GLOBAL.deinit()
}

/// Computes `k*G` with the process-wide context, which must have been
/// initialized.
pub fn mulgen(k: &Scalar) -> Result<Point, Error> {
    GLOBAL.mulgen(k)
}

#[cfg(test)]
mod tests {

    use super::Context;
    use crate::secp256k1::{Point, Scalar};
    use crate::{Error, Vec};
    use std::sync::Arc;

    #[test]
    fn lifecycle() {
        let ctx = Context::new();
        assert!(!ctx.is_initialized());
        assert!(ctx.table().err() == Some(Error::NotInitialized));
        assert!(ctx.mulgen(&Scalar::ONE).err() == Some(Error::NotInitialized));
        assert!(ctx.cpu_features().unwrap().is_none());

        // Freeing nothing, deinit before init: harmless.
        ctx.free_table().unwrap();
        ctx.deinit().unwrap();

        ctx.generate_table().unwrap();
        ctx.generate_table().unwrap();
        assert!(ctx.table_builds() == 1);
        ctx.free_table().unwrap();
        ctx.free_table().unwrap();
        assert!(ctx.table().is_err());

        ctx.init().unwrap();
        ctx.init().unwrap();
        assert!(ctx.is_initialized());
        assert!(ctx.table_builds() == 2);
        assert!(ctx.cpu_features().unwrap().is_some());
        let k = Scalar::from_word(7);
        let P = ctx.mulgen(&k).unwrap();
        assert!(P.equals(Point::BASE.mul(&k)) == 0xFFFFFFFF);

        // A table handle survives deinit.
        let t = ctx.table().unwrap();
        ctx.deinit().unwrap();
        ctx.deinit().unwrap();
        assert!(!ctx.is_initialized());
        assert!(ctx.mulgen(&k).is_err());
        assert!(Point::mulgen(&t, &k).equals(P) == 0xFFFFFFFF);
    }

    #[test]
    fn concurrent_init() {
        let ctx = Arc::new(Context::new());
        let mut handles = Vec::new();
        for i in 0..8u64 {
            let c = Arc::clone(&ctx);
            handles.push(std::thread::spawn(move || {
                c.init().unwrap();
                let k = Scalar::from_word(i + 1);
                c.mulgen(&k).unwrap().equals(Point::BASE.mul(&k))
            }));
        }
        for h in handles {
            assert!(h.join().unwrap() == 0xFFFFFFFF);
        }
        assert!(ctx.table_builds() == 1);
        assert!(ctx.is_initialized());
    }

    #[test]
    fn global_context() {
        super::init().unwrap();
        super::init().unwrap();
        let P = super::mulgen(&Scalar::from_word(2)).unwrap();
        assert!(P.equals(Point::BASE.double()) == 0xFFFFFFFF);
        assert!(super::global().is_initialized());
    }
}
