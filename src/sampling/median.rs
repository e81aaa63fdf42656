//! Median noise filter for the TDS probe.
//!
//! The probe output is noisy and occasionally spikes when the ADC sample
//! lands on a switching edge.  Taking the middle of the sorted window
//! rejects those outliers without the smearing a running mean introduces.

/// Middle element of `samples` after an ascending sort.
///
/// Returns index `N / 2` of the sorted copy, so an even-length window yields
/// the upper of the two middle values (no averaging).  The input is left
/// untouched; the sort runs on a stack copy.
pub fn median<const N: usize>(samples: &[u16; N]) -> u16 {
    let mut sorted = *samples;
    sorted.sort_unstable();
    sorted[N / 2]
}
