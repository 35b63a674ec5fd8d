//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("server.name is required")]
    MissingServerName,
    #[error("limits.max_line_len must be greater than 0")]
    ZeroLineLength,
    #[error("limits.max_name_len must be greater than 0")]
    ZeroNameLength,
    #[error("limits.max_name_len ({name}) cannot exceed limits.max_line_len ({line})")]
    NameLongerThanLine { name: usize, line: usize },
    #[error("limits.outbound_queue must be greater than 0")]
    ZeroOutboundQueue,
    #[error("server.metrics_port {0} collides with the listen port")]
    MetricsPortCollision(u16),
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.name.trim().is_empty() {
        errors.push(ValidationError::MissingServerName);
    }

    let limits = &config.limits;
    if limits.max_line_len == 0 {
        errors.push(ValidationError::ZeroLineLength);
    }
    if limits.max_name_len == 0 {
        errors.push(ValidationError::ZeroNameLength);
    } else if limits.max_line_len > 0 && limits.max_name_len > limits.max_line_len {
        errors.push(ValidationError::NameLongerThanLine {
            name: limits.max_name_len,
            line: limits.max_line_len,
        });
    }
    if limits.outbound_queue == 0 {
        errors.push(ValidationError::ZeroOutboundQueue);
    }

    if let Some(port) = config.server.metrics_port
        && port != 0
        && port == config.listen.address.port()
    {
        errors.push(ValidationError::MetricsPortCollision(port));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
