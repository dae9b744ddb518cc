//! # CPU Feature Detection
//!
//! Runtime detection of the vector instruction sets the lane tier can use.
//! Detection runs once; the result is shared process-wide.

use std::sync::OnceLock;

/// Vector features relevant to lane comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CpuFeatures {
    /// SSE2 (128-bit integer compare + movemask)
    pub has_sse2: bool,
    /// SSE4.2 (PCMPESTRI string compare)
    pub has_sse42: bool,
    /// ARM NEON (Advanced SIMD)
    pub has_neon: bool,
}

impl CpuFeatures {
    /// Detect available CPU features at runtime
    pub fn detect() -> Self {
        #[cfg(target_arch = "x86_64")]
        {
            Self::detect_x86()
        }

        #[cfg(target_arch = "aarch64")]
        {
            // Advanced SIMD is mandatory on AArch64
            Self { has_neon: true, ..Self::default() }
        }

        #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
        {
            Self::default()
        }
    }

    #[cfg(target_arch = "x86_64")]
    fn detect_x86() -> Self {
        let cpuid = raw_cpuid::CpuId::new();
        let mut features = Self::default();

        if let Some(info) = cpuid.get_feature_info() {
            features.has_sse2 = info.has_sse2();
            features.has_sse42 = info.has_sse42();
        }

        // cpuid can be masked by hypervisors; trust the OS-aware check last
        features.has_sse2 &= is_x86_feature_detected!("sse2");
        features.has_sse42 &= is_x86_feature_detected!("sse4.2");
        features
    }
}

static CPU_FEATURES: OnceLock<CpuFeatures> = OnceLock::new();

/// Get the global CPU feature set (detected once on first call)
pub fn get_cpu_features() -> &'static CpuFeatures {
    CPU_FEATURES.get_or_init(|| {
        let features = CpuFeatures::detect();
        log::debug!("Detected CPU features: {:?}", features);
        features
    })
}
