//! Balanced-bracket validation over `()`, `[]` and `{}`
//!
//! Matching is a strictly sequential fold over a stack, so the vectorized
//! validator only parallelizes classification: per [`simd::WINDOW`] it computes six
//! lane masks (one per bracket kind and direction) and then replays the same
//! stack discipline as the scalar validator, lane by lane, reading each
//! byte's class back from the masks. Any other byte is ignored.
//!
//! A buffer is balanced iff no closer ever meets an empty stack or a
//! different kind of opener, and the stack is empty at the end.

use crate::buffer::Buffer;
use crate::error::Result;
use crate::simd::{self, Backend, SetBits};
use std::path::Path;

/// The three bracket pair classes. No cross-class matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketKind {
    Round,
    Square,
    Curly,
}

impl BracketKind {
    pub const ALL: [BracketKind; 3] = [Self::Round, Self::Square, Self::Curly];

    pub fn open(self) -> u8 {
        match self {
            Self::Round => b'(',
            Self::Square => b'[',
            Self::Curly => b'{',
        }
    }

    pub fn close(self) -> u8 {
        match self {
            Self::Round => b')',
            Self::Square => b']',
            Self::Curly => b'}',
        }
    }
}

/// Role of a single byte in the stack discipline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Class {
    Open(BracketKind),
    Close(BracketKind),
    Other,
}

/// Classify one byte directly (scalar path).
#[inline]
pub fn classify(byte: u8) -> Class {
    match byte {
        b'(' => Class::Open(BracketKind::Round),
        b')' => Class::Close(BracketKind::Round),
        b'[' => Class::Open(BracketKind::Square),
        b']' => Class::Close(BracketKind::Square),
        b'{' => Class::Open(BracketKind::Curly),
        b'}' => Class::Close(BracketKind::Curly),
        _ => Class::Other,
    }
}

/// Target bytes for the six lane masks, in mask order.
const MASK_TARGETS: [u8; 6] = *b"()[]{}";

/// Mask index -> class, parallel to [`MASK_TARGETS`].
const MASK_CLASSES: [Class; 6] = [
    Class::Open(BracketKind::Round),
    Class::Close(BracketKind::Round),
    Class::Open(BracketKind::Square),
    Class::Close(BracketKind::Square),
    Class::Open(BracketKind::Curly),
    Class::Close(BracketKind::Curly),
];

/// Read a lane's class back from the six masks of its window.
#[inline]
fn class_from_masks(masks: &[u32; 6], lane: usize) -> Class {
    let bit = 1u32 << lane;
    masks
        .iter()
        .position(|mask| mask & bit != 0)
        .map_or(Class::Other, |i| MASK_CLASSES[i])
}

/// Stack of unmatched openers, live for one check call.
#[derive(Debug, Default)]
pub struct BracketStack {
    open: Vec<BracketKind>,
}

impl BracketStack {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            open: Vec::with_capacity(capacity),
        }
    }

    /// Apply one classified byte. Returns `false` on a closer that meets an
    /// empty stack or a different kind of opener; the stack is then stale.
    #[inline]
    pub fn apply(&mut self, class: Class) -> bool {
        match class {
            Class::Open(kind) => {
                self.open.push(kind);
                true
            }
            Class::Close(kind) => self.open.pop() == Some(kind),
            Class::Other => true,
        }
    }

    pub fn depth(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }
}

/// Scalar validator.
pub fn naive_balanced(data: &[u8]) -> bool {
    let mut stack = BracketStack::with_capacity(data.len() / 2);
    data.iter().all(|&byte| stack.apply(classify(byte))) && stack.is_empty()
}

/// Vectorized-classification validator using the best backend for this CPU.
#[inline]
pub fn simd_balanced(data: &[u8]) -> bool {
    simd_balanced_with(Backend::detect(), data)
}

/// Vectorized-classification validator with an explicit lane-mask backend.
pub fn simd_balanced_with(backend: Backend, data: &[u8]) -> bool {
    let mut stack = BracketStack::with_capacity(data.len() / 2);

    let mut windows = simd::windows(data);
    for window in windows.by_ref() {
        let masks = backend.eq_masks(window, &MASK_TARGETS);

        // Lanes outside the union hold no bracket and cannot change the stack
        let brackets = masks.iter().fold(0u32, |acc, &mask| acc | mask);
        for lane in SetBits::new(brackets) {
            if !stack.apply(class_from_masks(&masks, lane)) {
                return false;
            }
        }
    }

    windows
        .remainder()
        .iter()
        .all(|&byte| stack.apply(classify(byte)))
        && stack.is_empty()
}

/// Load `path` and validate it with the scalar kernel.
pub fn naive_bracket_check(path: impl AsRef<Path>) -> Result<bool> {
    let buf = Buffer::open(path.as_ref())?;
    let balanced = naive_balanced(&buf);
    tracing::trace!(path = %path.as_ref().display(), balanced, "Naive bracket check");
    Ok(balanced)
}

/// Load `path` and validate it with the vectorized kernel.
pub fn simd_bracket_check(path: impl AsRef<Path>) -> Result<bool> {
    let buf = Buffer::open(path.as_ref())?;
    let balanced = simd_balanced(&buf);
    tracing::trace!(path = %path.as_ref().display(), balanced, "SIMD bracket check");
    Ok(balanced)
}
