//! CPU feature detection.
//!
//! The arithmetic code is portable and constant-time on every supported
//! target; the detected features are recorded so that callers (and the
//! benchmarks) can report them, and so that `Implementation::select()`
//! has a single place to dispatch on.

use core::fmt;

/// Instruction set extensions available on the current CPU.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CpuFeatures {
    pub sse2: bool,
    pub sse3: bool,
    pub ssse3: bool,
    pub sse41: bool,
    pub avx: bool,
    pub avx2: bool,
    pub bmi2: bool,
    pub neon: bool,
}

impl CpuFeatures {

    /// Probes the current CPU. Without the `std` feature, only the
    /// features enabled at compile time are reported.
    pub fn detect() -> Self {
        let mut f = Self::default();

        #[cfg(all(feature = "std", any(target_arch = "x86", target_arch = "x86_64")))]
        {
            f.sse2 = std::is_x86_feature_detected!("sse2");
            f.sse3 = std::is_x86_feature_detected!("sse3");
            f.ssse3 = std::is_x86_feature_detected!("ssse3");
            f.sse41 = std::is_x86_feature_detected!("sse4.1");
            f.avx = std::is_x86_feature_detected!("avx");
            f.avx2 = std::is_x86_feature_detected!("avx2");
            f.bmi2 = std::is_x86_feature_detected!("bmi2");
        }

        #[cfg(not(all(feature = "std", any(target_arch = "x86", target_arch = "x86_64"))))]
        {
            f.sse2 = cfg!(target_feature = "sse2");
            f.sse3 = cfg!(target_feature = "sse3");
            f.ssse3 = cfg!(target_feature = "ssse3");
            f.sse41 = cfg!(target_feature = "sse4.1");
            f.avx = cfg!(target_feature = "avx");
            f.avx2 = cfg!(target_feature = "avx2");
            f.bmi2 = cfg!(target_feature = "bmi2");
        }

        #[cfg(all(feature = "std", target_arch = "aarch64"))]
        {
            f.neon = std::arch::is_aarch64_feature_detected!("neon");
        }

        #[cfg(not(all(feature = "std", target_arch = "aarch64")))]
        {
            f.neon = cfg!(target_feature = "neon");
        }

        f
    }
}

impl fmt::Display for CpuFeatures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (self.sse2, "sse2"), (self.sse3, "sse3"), (self.ssse3, "ssse3"),
            (self.sse41, "sse4.1"), (self.avx, "avx"), (self.avx2, "avx2"),
            (self.bmi2, "bmi2"), (self.neon, "neon"),
        ];
        let mut first = true;
        for (on, name) in names.iter() {
            if *on {
                if !first {
                    f.write_str(",")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        if first {
            f.write_str("none")?;
        }
        Ok(())
    }
}

/// Arithmetic implementation in use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Implementation {
    /// 64-bit limbs with 128-bit products; used on all targets.
    Portable,
}

impl Implementation {

    /// Chooses the implementation for the given CPU features.
    pub fn select(_features: &CpuFeatures) -> Self {
        Implementation::Portable
    }

    pub fn name(self) -> &'static str {
        match self {
            Implementation::Portable => "portable-w64",
        }
    }
}
