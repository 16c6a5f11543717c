use crate::config::types::{
    expand_url_template, Config, CrawlerConfig, OutputConfig, UserAgentConfig, ID_PLACEHOLDER,
};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawl thresholds and the URL template
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_retry < 1 {
        return Err(ConfigError::Validation(format!(
            "max_retry must be >= 1, got {}",
            config.max_retry
        )));
    }

    if config.empty_limit < 1 {
        return Err(ConfigError::Validation(format!(
            "empty_limit must be >= 1, got {}",
            config.empty_limit
        )));
    }

    if config.batch_size < 1 {
        return Err(ConfigError::Validation(format!(
            "batch_size must be >= 1, got {}",
            config.batch_size
        )));
    }

    if config.request_timeout < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout must be >= 1s, got {}s",
            config.request_timeout
        )));
    }

    if config.max_ids == Some(0) {
        return Err(ConfigError::Validation(
            "max_ids must be >= 1 when set".to_string(),
        ));
    }

    validate_url_template(&config.url_template)
}

/// The template must hold exactly one placeholder and expand to an HTTP(S) URL
fn validate_url_template(template: &str) -> Result<(), ConfigError> {
    let placeholders = template.matches(ID_PLACEHOLDER).count();
    if placeholders != 1 {
        return Err(ConfigError::InvalidUrl(format!(
            "url_template must contain exactly one '{}' placeholder, found {} in '{}'",
            ID_PLACEHOLDER, placeholders, template
        )));
    }

    let sample = expand_url_template(template, 1);
    let url = Url::parse(&sample)
        .map_err(|e| ConfigError::InvalidUrl(format!("'{}': {}", template, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "'{}' must use the http or https scheme",
            template
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.trim().is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if config.crawler_name.chars().any(char::is_whitespace) {
        return Err(ConfigError::Validation(format!(
            "crawler_name cannot contain whitespace, got '{}'",
            config.crawler_name
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.ledger_path.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "ledger_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
