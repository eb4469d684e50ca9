//! Standard nominal duct sizes.
//!
//! Round duct is stocked in whole inches up to 10" and in 2" steps above
//! that. Rectangular duct is fabricated to whole even inches.

/// Stocked round diameters, inches.
pub const ROUND_DIAMETERS_IN: [f64; 32] = [
    4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 12.0, 14.0, 16.0, 18.0, 20.0, 22.0, 24.0, 26.0, 28.0,
    30.0, 32.0, 34.0, 36.0, 38.0, 40.0, 42.0, 44.0, 46.0, 48.0, 50.0, 52.0, 54.0, 56.0, 58.0,
    60.0,
];

// Absorbs float noise so 12.000000001 still maps to 12".
const SNAP_IN: f64 = 1e-6;

/// Smallest stocked round diameter that is at least `diameter_in`.
/// Above the table, sizes continue in 2" steps.
pub fn next_round_size(diameter_in: f64) -> f64 {
    ROUND_DIAMETERS_IN
        .iter()
        .copied()
        .find(|&d| d + SNAP_IN >= diameter_in)
        .unwrap_or_else(|| next_even_inch(diameter_in))
}

/// Largest stocked round diameter that is at most `diameter_in`.
pub fn previous_round_size(diameter_in: f64) -> Option<f64> {
    let last = ROUND_DIAMETERS_IN[ROUND_DIAMETERS_IN.len() - 1];
    if diameter_in > last + SNAP_IN {
        return Some(((diameter_in + SNAP_IN) / 2.0).floor() * 2.0);
    }
    ROUND_DIAMETERS_IN
        .iter()
        .rev()
        .copied()
        .find(|&d| d <= diameter_in + SNAP_IN)
}

/// Round a rectangular side up to the next whole even inch.
pub fn next_even_inch(side_in: f64) -> f64 {
    ((side_in - SNAP_IN) / 2.0).ceil().max(1.0) * 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_ascending() {
        for pair in ROUND_DIAMETERS_IN.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn next_round_size_rounds_up() {
        assert_eq!(next_round_size(19.15), 20.0);
        assert_eq!(next_round_size(12.0), 12.0);
        assert_eq!(next_round_size(12.000_000_01), 12.0);
        assert_eq!(next_round_size(10.5), 12.0);
        assert_eq!(next_round_size(2.0), 4.0);
        assert_eq!(next_round_size(61.0), 62.0);
    }

    #[test]
    fn previous_round_size_rounds_down() {
        assert_eq!(previous_round_size(19.15), Some(18.0));
        assert_eq!(previous_round_size(4.0), Some(4.0));
        assert_eq!(previous_round_size(3.9), None);
        assert_eq!(previous_round_size(63.0), Some(62.0));
    }

    #[test]
    fn even_inch_rounding() {
        assert_eq!(next_even_inch(17.1), 18.0);
        assert_eq!(next_even_inch(18.0), 18.0);
        assert_eq!(next_even_inch(0.5), 2.0);
    }
}
