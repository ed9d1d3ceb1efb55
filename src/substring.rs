//! Fixed-pattern substring search
//!
//! Two kernels that must agree on every input:
//! - [`naive_contains`] compares the whole pattern at every start offset.
//! - [`simd_contains`] builds a lane mask of positions equal to the pattern's
//!   first byte for each [`WINDOW`]-byte window, then verifies only those
//!   candidates with a full scalar comparison. The tail after the last full
//!   window goes through the scalar path.
//!
//! An empty pattern matches every buffer, including an empty one.

use crate::buffer::Buffer;
use crate::error::Result;
use crate::simd::{self, Backend, SetBits, WINDOW};
use std::path::Path;

/// Scalar search: `true` if `pattern` occurs anywhere in `haystack`.
pub fn naive_contains(haystack: &[u8], pattern: &[u8]) -> bool {
    if pattern.is_empty() {
        return true;
    }
    haystack.windows(pattern.len()).any(|candidate| candidate == pattern)
}

/// Vectorized search using the best backend for this CPU.
#[inline]
pub fn simd_contains(haystack: &[u8], pattern: &[u8]) -> bool {
    simd_contains_with(Backend::detect(), haystack, pattern)
}

/// Vectorized search with an explicit lane-mask backend.
pub fn simd_contains_with(backend: Backend, haystack: &[u8], pattern: &[u8]) -> bool {
    let Some(&first) = pattern.first() else {
        return true;
    };
    let (n, m) = (haystack.len(), pattern.len());
    if m > n {
        return false;
    }

    let mut windows = simd::windows(haystack);
    let mut base = 0;
    for window in windows.by_ref() {
        let [candidates] = backend.eq_masks(window, &[first]);
        for lane in SetBits::new(candidates) {
            let pos = base + lane;
            if pos + m <= n && &haystack[pos..pos + m] == pattern {
                return true;
            }
        }
        base += WINDOW;
    }

    // Tail: only offsets where the whole pattern still fits
    let tail_start = n - windows.remainder().len();
    (tail_start..=n - m).any(|pos| haystack[pos] == first && &haystack[pos..pos + m] == pattern)
}

/// Load `path` and search it with the scalar kernel.
///
/// An empty pattern returns `true` without touching the file.
pub fn naive_substring_search(path: impl AsRef<Path>, pattern: &[u8]) -> Result<bool> {
    if pattern.is_empty() {
        return Ok(true);
    }
    let buf = Buffer::open(path.as_ref())?;
    let found = naive_contains(&buf, pattern);
    tracing::trace!(path = %path.as_ref().display(), found, "Naive substring search");
    Ok(found)
}

/// Load `path` and search it with the vectorized kernel.
///
/// An empty pattern returns `true` without touching the file.
pub fn simd_substring_search(path: impl AsRef<Path>, pattern: &[u8]) -> Result<bool> {
    if pattern.is_empty() {
        return Ok(true);
    }
    let buf = Buffer::open(path.as_ref())?;
    let found = simd_contains(&buf, pattern);
    tracing::trace!(path = %path.as_ref().display(), found, "SIMD substring search");
    Ok(found)
}
