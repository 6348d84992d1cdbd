use std::path::Path;

use crate::config::schema::Config;
use crate::error::ConfigError;

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    load_config_from_str(&content)
}

pub fn load_config_from_str(content: &str) -> Result<Config, ConfigError> {
    let config: Config = serde_yaml::from_str(content)?;

    validate_config(&config)?;

    Ok(config)
}

fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.input_project_file.is_empty() {
        return Err(ConfigError::Validation {
            message: "input_project_file must not be empty".to_string(),
        });
    }

    if config.output_project_file.is_empty() {
        return Err(ConfigError::Validation {
            message: "output_project_file must not be empty".to_string(),
        });
    }

    // Duplicate rule names are allowed: lookup is first-match over an
    // ordered table, so a later duplicate is simply shadowed.
    for rule in &config.update_items {
        if rule.name.is_empty() {
            return Err(ConfigError::InvalidRule {
                name: rule.name.clone(),
                reason: "rule name must not be empty".to_string(),
            });
        }

        if rule.top_layer.is_empty() {
            return Err(ConfigError::InvalidRule {
                name: rule.name.clone(),
                reason: "top_layer must not be empty".to_string(),
            });
        }

        // An empty prefix would match every item during removal.
        if rule.update_object.is_empty() {
            return Err(ConfigError::InvalidRule {
                name: rule.name.clone(),
                reason: "update_object must not be empty".to_string(),
            });
        }

        if rule.body_file.is_empty() {
            return Err(ConfigError::InvalidRule {
                name: rule.name.clone(),
                reason: "body_file must not be empty".to_string(),
            });
        }
    }

    Ok(())
}
