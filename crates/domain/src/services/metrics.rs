//! Small arithmetic helpers with division-by-zero guards.

/// Rounded percentage of `part` in `whole`; 0 when `whole` is 0.
pub fn percent_of(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        0
    } else {
        (100.0 * part as f64 / whole as f64).round() as u32
    }
}

/// Unrounded share of `part` in `whole` (0.0 - 1.0); 0 when `whole` is 0.
pub fn ratio(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

/// Mean of a sum over `count` items; 0 when there are none.
pub fn mean(sum: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Rounded percentage change from `previous` to `current`.
///
/// Undefined (None) when there is no previous activity to compare against.
pub fn change_percent(current: u32, previous: u32) -> Option<i32> {
    if previous == 0 {
        None
    } else {
        Some((100.0 * (current as f64 - previous as f64) / previous as f64).round() as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(1, 3), 33);
        assert_eq!(percent_of(2, 3), 67);
        assert_eq!(percent_of(5, 0), 0);
        assert_eq!(percent_of(4, 4), 100);
    }

    #[test]
    fn test_ratio_and_mean() {
        assert_eq!(ratio(1, 4), 0.25);
        assert_eq!(ratio(1, 0), 0.0);
        assert_eq!(mean(30.0, 3), 10.0);
        assert_eq!(mean(30.0, 0), 0.0);
    }

    #[test]
    fn test_change_percent() {
        assert_eq!(change_percent(15, 10), Some(50));
        assert_eq!(change_percent(5, 10), Some(-50));
        assert_eq!(change_percent(5, 0), None);
    }
}
