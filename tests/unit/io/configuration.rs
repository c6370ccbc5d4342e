//! Tests for configuration constants

#[cfg(test)]
mod tests {
    use pixel_reassign::algorithm::executor::EngineConfig;
    use pixel_reassign::io::configuration::{
        DEFAULT_CHUNK_SIZE, DEFAULT_EXACT_CEILING, DEFAULT_GRID_SIZE, DEFAULT_QUALITY,
        MAX_GRID_SIZE, MAX_QUALITY, MIN_CANDIDATE_WINDOW, OUTPUT_SUFFIX, SUPPORTED_EXTENSIONS,
    };

    // Tests defaults stay inside their accepted ranges
    // Verified by setting a default above its maximum
    #[test]
    fn test_defaults_within_bounds() {
        assert!(DEFAULT_QUALITY <= MAX_QUALITY);
        assert!((1..=MAX_GRID_SIZE).contains(&DEFAULT_GRID_SIZE));
        assert!(DEFAULT_CHUNK_SIZE > 0);
        assert!(MIN_CANDIDATE_WINDOW > 0);
    }

    // Tests the default exact ceiling admits the default grid
    // Verified by lowering the ceiling
    #[test]
    fn test_exact_ceiling_covers_default_grid() {
        let pixels = DEFAULT_GRID_SIZE as usize * DEFAULT_GRID_SIZE as usize;
        assert!(pixels <= DEFAULT_EXACT_CEILING);
    }

    // Tests the engine defaults come from the constants
    // Verified by hardcoding a different chunk size
    #[test]
    fn test_engine_config_default() {
        let config = EngineConfig::default();
        assert_eq!(config.chunk_size, DEFAULT_CHUNK_SIZE);
        assert_eq!(config.min_window, MIN_CANDIDATE_WINDOW);
        assert_eq!(config.exact_ceiling, DEFAULT_EXACT_CEILING);
        assert!(!config.fallback_to_heuristic);
        assert!(config.validate().is_ok());
    }

    // Tests extensions are lowercase and the suffix is non-empty
    // Verified by adding an uppercase extension
    #[test]
    fn test_file_settings() {
        assert!(
            SUPPORTED_EXTENSIONS
                .iter()
                .all(|ext| ext.chars().all(|c| c.is_ascii_lowercase()))
        );
        assert!(SUPPORTED_EXTENSIONS.contains(&"png"));
        assert!(!OUTPUT_SUFFIX.is_empty());
    }
}
