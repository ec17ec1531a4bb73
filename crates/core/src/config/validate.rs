use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Universe entries, alias keys and rule keys name known trackers
/// - Rule minimums are positive when set
/// - Upload command and tracker flag are not blank
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let table = config.trackers.table();

    let unknown: Vec<&str> = config
        .trackers
        .universe
        .iter()
        .chain(config.trackers.rules.keys())
        .map(String::as_str)
        .filter(|name| table.normalize(name).is_none())
        .collect();
    if !unknown.is_empty() {
        return Err(ConfigError::ValidationError(format!(
            "unknown trackers: {}",
            unknown.join(", ")
        )));
    }

    for (tracker, rules) in &config.trackers.rules {
        if rules.min_size_bytes == Some(0) {
            return Err(ConfigError::ValidationError(format!(
                "trackers.rules.{tracker}.min_size_bytes cannot be 0"
            )));
        }
        if rules.min_duration_secs == Some(0) {
            return Err(ConfigError::ValidationError(format!(
                "trackers.rules.{tracker}.min_duration_secs cannot be 0"
            )));
        }
    }

    if config.upload.command.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "upload.command cannot be empty".to_string(),
        ));
    }
    if config.upload.tracker_flag.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "upload.tracker_flag cannot be empty".to_string(),
        ));
    }

    Ok(())
}
