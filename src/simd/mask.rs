//! Lane masks: per-backend equality classification and set-bit iteration

use super::WINDOW;
use std::slice::ChunksExact;

/// Full windows of a buffer, in order. The short tail is left for the
/// caller's scalar path via [`Windows::remainder`].
pub struct Windows<'a> {
    chunks: ChunksExact<'a, u8>,
}

/// Split `data` into full [`WINDOW`]-byte windows.
pub fn windows(data: &[u8]) -> Windows<'_> {
    Windows {
        chunks: data.chunks_exact(WINDOW),
    }
}

impl<'a> Windows<'a> {
    /// Bytes after the last full window (fewer than [`WINDOW`]).
    pub fn remainder(&self) -> &'a [u8] {
        self.chunks.remainder()
    }
}

impl<'a> Iterator for Windows<'a> {
    type Item = &'a [u8; WINDOW];

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.chunks.next().and_then(|chunk| chunk.first_chunk::<WINDOW>())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }
}

/// Ascending positions of the set bits in a lane mask.
///
/// Each step takes the lowest set bit (`trailing_zeros`) and clears it
/// (`mask &= mask - 1`) until the mask is zero.
#[derive(Debug, Clone, Copy)]
pub struct SetBits(u32);

impl SetBits {
    pub fn new(mask: u32) -> Self {
        Self(mask)
    }
}

impl Iterator for SetBits {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.0 == 0 {
            return None;
        }
        let lane = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(lane)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for SetBits {}

/// Scalar implementation (fallback for all platforms)
/// This is the reference implementation that all SIMD versions must match.
#[inline]
pub fn eq_masks_scalar<const K: usize>(window: &[u8; WINDOW], targets: &[u8; K]) -> [u32; K] {
    let mut masks = [0u32; K];
    for (lane, &byte) in window.iter().enumerate() {
        for (mask, &target) in masks.iter_mut().zip(targets) {
            *mask |= ((byte == target) as u32) << lane;
        }
    }
    masks
}

// ============================================================================
// AVX2 Implementation (x86_64)
//
// One unaligned 256-bit load per window, then a cmpeq + movemask per target.
// ============================================================================

/// # Safety
///
/// The CPU must support AVX2.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
pub unsafe fn eq_masks_avx2<const K: usize>(window: &[u8; WINDOW], targets: &[u8; K]) -> [u32; K] {
    use std::arch::x86_64::*;

    let block = _mm256_loadu_si256(window.as_ptr() as *const __m256i);

    let mut masks = [0u32; K];
    for (mask, &target) in masks.iter_mut().zip(targets) {
        let needle = _mm256_set1_epi8(target as i8);
        let eq = _mm256_cmpeq_epi8(block, needle);
        *mask = _mm256_movemask_epi8(eq) as u32;
    }
    masks
}

// ============================================================================
// NEON Implementation (aarch64)
//
// NEON has no movemask. Compare results (0xFF per matching lane) are ANDed
// with per-lane bit weights and each 8-lane half is summed horizontally,
// giving one mask byte per half.
// ============================================================================

/// # Safety
///
/// The CPU must support NEON (always true on aarch64).
#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
pub unsafe fn eq_masks_neon<const K: usize>(window: &[u8; WINDOW], targets: &[u8; K]) -> [u32; K] {
    use std::arch::aarch64::*;

    const BIT_WEIGHTS: [u8; 16] = [1, 2, 4, 8, 16, 32, 64, 128, 1, 2, 4, 8, 16, 32, 64, 128];

    let weights = vld1q_u8(BIT_WEIGHTS.as_ptr());
    let lo = vld1q_u8(window.as_ptr());
    let hi = vld1q_u8(window.as_ptr().add(16));

    let movemask = |eq: uint8x16_t| -> u32 {
        let bits = vandq_u8(eq, weights);
        let low = vaddv_u8(vget_low_u8(bits)) as u32;
        let high = vaddv_u8(vget_high_u8(bits)) as u32;
        low | (high << 8)
    };

    let mut masks = [0u32; K];
    for (mask, &target) in masks.iter_mut().zip(targets) {
        let needle = vdupq_n_u8(target);
        let lo_mask = movemask(vceqq_u8(lo, needle));
        let hi_mask = movemask(vceqq_u8(hi, needle));
        *mask = lo_mask | (hi_mask << 16);
    }
    masks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_bits_ascending() {
        let lanes: Vec<usize> = SetBits::new(0b1010_0101).collect();
        assert_eq!(lanes, vec![0, 2, 5, 7]);
    }

    #[test]
    fn test_set_bits_edges() {
        assert_eq!(SetBits::new(0).count(), 0);
        assert_eq!(SetBits::new(1 << 31).collect::<Vec<_>>(), vec![31]);
        assert_eq!(SetBits::new(u32::MAX).len(), 32);
        assert_eq!(SetBits::new(u32::MAX).collect::<Vec<_>>(), (0..32).collect::<Vec<_>>());
    }

    #[test]
    fn test_scalar_masks() {
        let mut window = [b'x'; WINDOW];
        window[0] = b'(';
        window[3] = b')';
        window[31] = b'(';

        let [open, close, absent] = eq_masks_scalar(&window, b"()z");
        assert_eq!(open, 1 | (1 << 31));
        assert_eq!(close, 1 << 3);
        assert_eq!(absent, 0);
    }

    #[test]
    fn test_windows_split() {
        let data: Vec<u8> = (0..100).map(|i| i as u8).collect();
        let mut iter = windows(&data);
        assert_eq!(iter.size_hint(), (3, Some(3)));

        let first = iter.next().unwrap();
        assert_eq!(first[0], 0);
        assert_eq!(first[31], 31);
        assert_eq!(iter.by_ref().count(), 2);
        assert_eq!(iter.remainder(), &data[96..]);
    }

    #[test]
    fn test_windows_shorter_than_one_window() {
        let data = [1u8; WINDOW - 1];
        let mut iter = windows(&data);
        assert!(iter.next().is_none());
        assert_eq!(iter.remainder().len(), WINDOW - 1);
    }

    #[test]
    fn test_windows_exact_multiple() {
        let data = [7u8; WINDOW * 2];
        let mut iter = windows(&data);
        assert_eq!(iter.by_ref().count(), 2);
        assert!(iter.remainder().is_empty());
    }
}
