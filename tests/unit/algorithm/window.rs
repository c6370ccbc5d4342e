//! Tests for the quality parameter and candidate window policy

#[cfg(test)]
mod tests {
    use pixel_reassign::ReassignError;
    use pixel_reassign::algorithm::window::{Quality, candidate_window};
    use pixel_reassign::io::configuration::{DEFAULT_QUALITY, MIN_CANDIDATE_WINDOW};

    fn q(value: u8) -> Quality {
        Quality::new(value).unwrap()
    }

    // Tests quality above 100 is rejected
    // Verified by clamping instead of rejecting
    #[test]
    fn test_quality_range() {
        assert_eq!(q(0), Quality::MIN);
        assert_eq!(q(100), Quality::MAX);
        assert!(matches!(
            Quality::new(101),
            Err(ReassignError::InvalidParameter {
                parameter: "quality",
                ..
            })
        ));
        assert!(Quality::try_from(250_u8).is_err());
        assert_eq!(Quality::default().get(), DEFAULT_QUALITY);
    }

    // Tests window scales with quality on large pools
    // Verified by ignoring quality in the formula
    #[test]
    fn test_window_scales_with_quality() {
        let n = 10_000;
        assert_eq!(candidate_window(q(50), n, MIN_CANDIDATE_WINDOW), 5_000);
        assert_eq!(candidate_window(q(1), n, MIN_CANDIDATE_WINDOW), 100);
        assert_eq!(candidate_window(q(100), n, MIN_CANDIDATE_WINDOW), n);
    }

    // Tests the minimum floor applies at low quality
    // Verified by removing the floor
    #[test]
    fn test_window_floor() {
        assert_eq!(candidate_window(q(0), 10_000, MIN_CANDIDATE_WINDOW), 100);
        assert_eq!(candidate_window(q(0), 10_000, 0), 1);
    }

    // Tests window never exceeds the pool and is never zero
    // Verified by applying the floor after the pool cap
    #[test]
    fn test_window_bounded_by_pool() {
        assert_eq!(candidate_window(q(0), 40, MIN_CANDIDATE_WINDOW), 40);
        assert_eq!(candidate_window(q(100), 1, MIN_CANDIDATE_WINDOW), 1);
        assert_eq!(candidate_window(q(0), 0, MIN_CANDIDATE_WINDOW), 1);
    }

    // Tests window is non-decreasing in quality across sizes
    // Verified by inverting the quality ratio
    #[test]
    fn test_window_monotonic_in_quality() {
        for n in [0, 1, 7, 99, 100, 101, 4_096, 65_536] {
            let mut previous = 0;
            for value in 0..=100 {
                let window = candidate_window(q(value), n, MIN_CANDIDATE_WINDOW);
                assert!(window >= previous, "n={n} q={value}");
                assert!(window >= 1);
                assert!(window <= n.max(1));
                previous = window;
            }
        }
    }
}
