use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Stats keep at least one label per report
/// - Age bands have labels and ordered bounds
/// - Source base URL is set when a source is configured
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.stats.top_n == 0 {
        return Err(ConfigError::ValidationError(
            "stats.top_n must be at least 1".to_string(),
        ));
    }

    for (i, band) in config.stats.age_bands.iter().enumerate() {
        if band.label.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "stats.age_bands[{}] has an empty label",
                i
            )));
        }
        if let (Some(min), Some(max)) = (band.min, band.max) {
            if min > max {
                return Err(ConfigError::ValidationError(format!(
                    "stats.age_bands[{}] ({}) has min {} > max {}",
                    i, band.label, min, max
                )));
            }
        }
    }

    if let Some(source) = &config.source {
        if source.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "source.base_url cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}
