//! Fixed-capacity ring of raw TDS probe samples.
//!
//! The backing store is a plain `[u16; N]` — no heap, no `Option` slots.
//! Slots that have not been written yet hold `0` and are still part of
//! [`snapshot`](SampleRing::snapshot); the median filter therefore sees
//! zero samples until the ring has wrapped once.

/// Overwrite-oldest ring buffer of raw ADC samples.
#[derive(Debug, Clone)]
pub struct SampleRing<const N: usize> {
    buf: [u16; N],
    /// Next slot to write.  Always in `[0, N)`.
    cursor: usize,
    /// Number of pushes, saturating at `N`.
    filled: usize,
}

impl<const N: usize> SampleRing<N> {
    const NON_EMPTY: () = assert!(N > 0, "SampleRing capacity must be non-zero");

    /// Zero-initialised ring with the cursor at slot 0.
    pub const fn new() -> Self {
        let () = Self::NON_EMPTY;
        Self {
            buf: [0; N],
            cursor: 0,
            filled: 0,
        }
    }

    /// Store `raw` at the cursor, then advance the cursor modulo `N`.
    pub fn push(&mut self, raw: u16) {
        self.buf[self.cursor] = raw;
        self.cursor += 1;
        if self.cursor >= N {
            self.cursor = 0;
        }
        if self.filled < N {
            self.filled += 1;
        }
    }

    /// The whole backing store in slot order, regardless of fill state.
    pub fn snapshot(&self) -> &[u16; N] {
        &self.buf
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Slots written at least once (`0..=N`).
    pub fn filled(&self) -> usize {
        self.filled
    }

    /// `true` once every slot holds a real sample.
    pub fn is_primed(&self) -> bool {
        self.filled == N
    }

    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for SampleRing<N> {
    fn default() -> Self {
        Self::new()
    }
}
