//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::HarvestConfig;
use crate::config::secret_string;
use crate::domain::errors::HarvestError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into HarvestConfig
/// 4. Applies environment variable overrides (DOCHARVEST_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use docharvest::config::loader::load_config;
///
/// let config = load_config("docharvest.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<HarvestConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(HarvestError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        HarvestError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_from_str(&contents)
}

/// Loads configuration from TOML text
///
/// Same as [`load_config`] without the file access.
///
/// # Errors
///
/// Returns an error if substitution, parsing or validation fails.
pub fn load_config_from_str(contents: &str) -> Result<HarvestConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: HarvestConfig = toml::from_str(&contents)?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        HarvestError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied unchanged.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| HarvestError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(HarvestError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

/// Applies environment variable overrides using the DOCHARVEST_* prefix
///
/// Environment variables follow the pattern: DOCHARVEST_<SECTION>_<KEY>
/// For example: DOCHARVEST_SOURCE_SSL_MODE, DOCHARVEST_OUTPUT_BASE_DIRECTORY
fn apply_env_overrides(config: &mut HarvestConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("DOCHARVEST_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("DOCHARVEST_APPLICATION_DRY_RUN") {
        config.application.dry_run = parse_bool("DOCHARVEST_APPLICATION_DRY_RUN", &val)?;
    }

    // Source overrides
    if let Ok(val) = std::env::var("DOCHARVEST_SOURCE_CONNECTION_STRING") {
        config.source.connection_string = secret_string(val);
    }
    if let Ok(val) = std::env::var("DOCHARVEST_SOURCE_MAX_CONNECTIONS") {
        config.source.max_connections = val.parse().map_err(|_| {
            HarvestError::Configuration(format!(
                "DOCHARVEST_SOURCE_MAX_CONNECTIONS must be a number, got '{val}'"
            ))
        })?;
    }
    if let Ok(val) = std::env::var("DOCHARVEST_SOURCE_SSL_MODE") {
        config.source.ssl_mode = val;
    }

    // Output overrides
    if let Ok(val) = std::env::var("DOCHARVEST_OUTPUT_BASE_DIRECTORY") {
        config.output.base_directory = val;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("DOCHARVEST_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_bool("DOCHARVEST_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("DOCHARVEST_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    value.trim().parse().map_err(|_| {
        HarvestError::Configuration(format!("{name} must be true or false, got '{value}'"))
    })
}
