//! SIMD lane classification with graceful fallback
//!
//! Kernels process input in fixed [`WINDOW`]-byte windows. For each window a
//! backend computes lane masks (bit `k` set when byte `k` equals a target)
//! with runtime CPU feature detection:
//! - AVX2 (x86_64)
//! - NEON (aarch64)
//! - Scalar fallback (all platforms)
//!
//! Every backend produces masks identical to the scalar one.

pub mod mask;

pub use mask::{windows, SetBits, Windows};

use std::sync::atomic::{AtomicU8, Ordering};

/// Bytes per window. One bit per lane fits a `u32` mask.
pub const WINDOW: usize = 32;

/// Detected backend (cached after first check)
/// 0 = not checked, 1 = scalar, 2 = NEON, 3 = AVX2
static BACKEND: AtomicU8 = AtomicU8::new(0);

const BACKEND_UNCHECKED: u8 = 0;
const BACKEND_SCALAR: u8 = 1;
#[cfg(target_arch = "aarch64")]
const BACKEND_NEON: u8 = 2;
#[cfg(target_arch = "x86_64")]
const BACKEND_AVX2: u8 = 3;

/// Lane-mask implementation selected for a kernel call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Portable per-byte loop; the reference implementation
    Scalar,
    /// 256-bit compares + movemask
    #[cfg(target_arch = "x86_64")]
    Avx2,
    /// Two 128-bit compares per window, bits gathered by horizontal add
    #[cfg(target_arch = "aarch64")]
    Neon,
}

impl Backend {
    /// Best backend for this CPU, detected once and cached.
    #[inline]
    pub fn detect() -> Self {
        let cached = BACKEND.load(Ordering::Relaxed);
        if cached != BACKEND_UNCHECKED {
            return Self::from_code(cached);
        }

        let detected = Self::probe();
        BACKEND.store(detected.code(), Ordering::Relaxed);
        tracing::debug!(backend = detected.name(), "Selected SIMD backend");
        detected
    }

    /// Every backend usable on this CPU, scalar first.
    pub fn available() -> Vec<Self> {
        let mut backends = vec![Self::Scalar];
        let best = Self::detect();
        if best != Self::Scalar {
            backends.push(best);
        }
        backends
    }

    /// Short display name
    pub fn name(self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            #[cfg(target_arch = "x86_64")]
            Self::Avx2 => "avx2",
            #[cfg(target_arch = "aarch64")]
            Self::Neon => "neon",
        }
    }

    /// Compute one lane mask per target byte for a single window.
    ///
    /// Bit `k` of `masks[t]` is set iff `window[k] == targets[t]`.
    #[inline]
    pub fn eq_masks<const K: usize>(self, window: &[u8; WINDOW], targets: &[u8; K]) -> [u32; K] {
        match self {
            Self::Scalar => mask::eq_masks_scalar(window, targets),
            // Safety: only constructed after `is_x86_feature_detected!("avx2")`
            #[cfg(target_arch = "x86_64")]
            Self::Avx2 => unsafe { mask::eq_masks_avx2(window, targets) },
            // Safety: NEON is part of the aarch64 baseline
            #[cfg(target_arch = "aarch64")]
            Self::Neon => unsafe { mask::eq_masks_neon(window, targets) },
        }
    }

    #[allow(unreachable_code)]
    fn probe() -> Self {
        #[cfg(target_arch = "x86_64")]
        {
            if is_x86_feature_detected!("avx2") {
                return Self::Avx2;
            }
        }

        #[cfg(target_arch = "aarch64")]
        {
            return Self::Neon;
        }

        Self::Scalar
    }

    fn code(self) -> u8 {
        match self {
            Self::Scalar => BACKEND_SCALAR,
            #[cfg(target_arch = "x86_64")]
            Self::Avx2 => BACKEND_AVX2,
            #[cfg(target_arch = "aarch64")]
            Self::Neon => BACKEND_NEON,
        }
    }

    fn from_code(code: u8) -> Self {
        match code {
            #[cfg(target_arch = "x86_64")]
            BACKEND_AVX2 => Self::Avx2,
            #[cfg(target_arch = "aarch64")]
            BACKEND_NEON => Self::Neon,
            _ => Self::Scalar,
        }
    }
}
