use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::{ServerSettings, Settings};
use crate::domain::Collection;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(settings: &Settings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = Self::validate_server(&settings.server) {
            errors.extend(e);
        }

        if EnvFilter::try_new(&settings.log_level).is_err() {
            errors.push(ValidationError::InvalidValue {
                field: "log_level".to_string(),
                reason: format!("'{}' is not a valid log filter", settings.log_level),
            });
        }

        if let Err(e) = Self::validate_schemas(settings) {
            errors.extend(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_server(server: &ServerSettings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if server.host.is_empty() {
            errors.push(ValidationError::MissingField("server.host".to_string()));
        }

        if server.port == 0 {
            errors.push(ValidationError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_schemas(settings: &Settings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        for (name, schema) in &settings.schemas {
            let field = format!("schemas.{}", name);
            if name.parse::<Collection>().is_err() {
                errors.push(ValidationError::InvalidValue {
                    field,
                    reason: "Unknown collection".to_string(),
                });
            } else if !schema.is_object() {
                errors.push(ValidationError::InvalidValue {
                    field,
                    reason: "Schema must be a JSON object".to_string(),
                });
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(ConfigValidator::validate(&Settings::default()).is_ok());
    }

    #[test]
    fn test_rejects_port_zero_and_empty_host() {
        let mut settings = Settings::default();
        settings.server.port = 0;
        settings.server.host.clear();

        let errors = ConfigValidator::validate(&settings).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.to_string().contains("server.port")));
        assert!(errors.iter().any(|e| e.to_string().contains("server.host")));
    }

    #[test]
    fn test_rejects_bad_schema_overrides() {
        let mut settings = Settings::default();
        settings.schemas.insert("notes".to_string(), json!({}));
        settings.schemas.insert("todos".to_string(), json!("String"));

        let errors = ConfigValidator::validate(&settings).unwrap_err();
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        assert_eq!(
            messages,
            vec![
                "Invalid value for schemas.notes: Unknown collection",
                "Invalid value for schemas.todos: Schema must be a JSON object",
            ]
        );
    }
}
