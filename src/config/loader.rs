//! Configuration loader with YAML/TOML parsing and environment variable overrides

use super::schema::BackupConfig;
use super::secret::secret_string;
use crate::domain::errors::BackupError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a YAML or TOML file
///
/// This function:
/// 1. Reads the file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the document into BackupConfig (TOML for `.toml` files, YAML otherwise)
/// 4. Applies environment variable overrides (CFBACKUP_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`BackupError::Configuration`] if the file cannot be read or
/// parsed, a referenced environment variable is missing, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use cfbackup::config::loader::load_config;
///
/// let config = load_config("cfbackup.yaml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<BackupConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(BackupError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        BackupError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config = parse_config(path, &contents)?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        BackupError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

fn parse_config(path: &Path, contents: &str) -> Result<BackupConfig> {
    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("toml"))
        .unwrap_or(false);

    if is_toml {
        Ok(toml::from_str(contents)?)
    } else {
        serde_yaml::from_str(contents)
            .map_err(|e| BackupError::Configuration(format!("Failed to parse YAML: {}", e)))
    }
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| BackupError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
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
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(BackupError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the CFBACKUP_* prefix
///
/// Variables follow the pattern CFBACKUP_<SECTION>_<KEY>, for example
/// CFBACKUP_CLOUDFLARE_TOKEN or CFBACKUP_EXPORT_PARALLEL_ZONES.
fn apply_env_overrides(config: &mut BackupConfig) {
    if let Ok(val) = std::env::var("CFBACKUP_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Ok(val) = std::env::var("CFBACKUP_CLOUDFLARE_EMAIL") {
        config.cloudflare.email = Some(val);
    }
    if let Ok(val) = std::env::var("CFBACKUP_CLOUDFLARE_KEY") {
        config.cloudflare.key = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("CFBACKUP_CLOUDFLARE_TOKEN") {
        config.cloudflare.token = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("CFBACKUP_CLOUDFLARE_BASE_URL") {
        config.cloudflare.base_url = val;
    }
    if let Ok(val) = std::env::var("CFBACKUP_CLOUDFLARE_PER_PAGE") {
        if let Ok(per_page) = val.parse() {
            config.cloudflare.per_page = per_page;
        }
    }

    if let Ok(val) = std::env::var("CFBACKUP_EXPORT_PARALLEL_ZONES") {
        if let Ok(parallel) = val.parse() {
            config.export.parallel_zones = parallel;
        }
    }
    if let Ok(val) = std::env::var("CFBACKUP_EXPORT_DRY_RUN") {
        config.export.dry_run = val.parse().unwrap_or(false);
    }

    if let Ok(val) = std::env::var("CFBACKUP_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("CFBACKUP_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}
