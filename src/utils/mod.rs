//! Utility functions and helpers

pub mod formats;

pub use formats::{from_sprs_csr, to_dense, to_sprs_csr};

/// Computes an inclusive prefix sum in place: `values[i] += values[i - 1]`
/// from left to right.
///
/// Applied to a table of per-row counts staged one slot ahead (slot 0 left
/// at zero), this turns the counts into CRS row boundaries.
pub fn inclusive_scan_in_place(values: &mut [usize]) {
    for i in 1..values.len() {
        values[i] += values[i - 1];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inclusive_scan_in_place() {
        let mut values = vec![0, 1, 2, 3, 4];
        inclusive_scan_in_place(&mut values);
        assert_eq!(values, vec![0, 1, 3, 6, 10]);

        let mut values = vec![0, 0, 0, 5, 0];
        inclusive_scan_in_place(&mut values);
        assert_eq!(values, vec![0, 0, 0, 5, 5]);
    }

    #[test]
    fn test_inclusive_scan_short_inputs() {
        let mut empty: Vec<usize> = Vec::new();
        inclusive_scan_in_place(&mut empty);
        assert!(empty.is_empty());

        let mut single = vec![7];
        inclusive_scan_in_place(&mut single);
        assert_eq!(single, vec![7]);
    }
}
