//! Saaty's random consistency index.
//!
//! RI(n) is the average consistency index of randomly generated reciprocal
//! matrices of size `n`. Dividing a matrix's CI by RI(n) gives the
//! consistency ratio, which is comparable across sizes.

/// Random index values for sizes 1 through 10 (index 0 is size 1).
pub const RANDOM_INDEX: [f64; 10] = [0.0, 0.0, 0.58, 0.90, 1.12, 1.24, 1.32, 1.41, 1.45, 1.49];

/// Value used for any size beyond the table.
pub const RANDOM_INDEX_FALLBACK: f64 = 1.49;

/// Look up RI for a matrix of size `n`.
///
/// Sizes 0 and 1 map to 0.0; sizes above 10 map to [`RANDOM_INDEX_FALLBACK`].
pub fn random_index(n: usize) -> f64 {
    match n {
        0 => 0.0,
        n if n <= RANDOM_INDEX.len() => RANDOM_INDEX[n - 1],
        _ => RANDOM_INDEX_FALLBACK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_values() {
        assert_eq!(random_index(1), 0.0);
        assert_eq!(random_index(2), 0.0);
        assert_eq!(random_index(3), 0.58);
        assert_eq!(random_index(4), 0.90);
        assert_eq!(random_index(7), 1.32);
        assert_eq!(random_index(10), 1.49);
    }

    #[test]
    fn out_of_table_sizes() {
        assert_eq!(random_index(0), 0.0);
        assert_eq!(random_index(11), RANDOM_INDEX_FALLBACK);
        assert_eq!(random_index(100), RANDOM_INDEX_FALLBACK);
    }

    #[test]
    fn table_is_non_decreasing() {
        for w in RANDOM_INDEX.windows(2) {
            assert!(w[0] <= w[1], "{} then {}", w[0], w[1]);
        }
    }
}
