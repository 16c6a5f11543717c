use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from TOML text
///
/// Missing sections and fields take their defaults.
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_LEDGER_PATH, DEFAULT_URL_TEMPLATE};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[crawler]
url-template = "http://localhost:8080/achievement/?achievement={}"
max-retry = 5
empty-limit = 20
batch-size = 10
exhaustion-floor = 0
request-timeout = 3
max-ids = 100

[user-agent]
crawler-name = "TestCrawler"
crawler-version = "1.0"

[output]
ledger-path = "./out/ledger.csv"
action-log = false
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawler.max_retry, 5);
        assert_eq!(config.crawler.empty_limit, 20);
        assert_eq!(config.crawler.batch_size, 10);
        assert_eq!(config.crawler.exhaustion_floor, 0);
        assert_eq!(config.crawler.max_ids, Some(100));
        assert_eq!(config.user_agent.header_value(), "TestCrawler/1.0");
        assert_eq!(config.output.ledger_path.to_str(), Some("./out/ledger.csv"));
        assert!(!config.output.action_log);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();

        assert_eq!(config.crawler.url_template, DEFAULT_URL_TEMPLATE);
        assert_eq!(config.crawler.max_retry, 3);
        assert_eq!(config.crawler.empty_limit, 10);
        assert_eq!(config.crawler.batch_size, 50);
        assert_eq!(config.crawler.exhaustion_floor, 34000);
        assert_eq!(config.crawler.request_timeout, 10);
        assert_eq!(config.crawler.max_ids, None);
        assert_eq!(config.output.ledger_path.to_str(), Some(DEFAULT_LEDGER_PATH));
        assert!(config.output.action_log);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = parse_config("[crawler]\nbatch-size = 7\n").unwrap();
        assert_eq!(config.crawler.batch_size, 7);
        assert_eq!(config.crawler.max_retry, 3);
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/crawler.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let result = parse_config("[crawler]\nmax-retry = 0\n");
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }

    #[test]
    fn test_page_url_expansion() {
        let config = parse_config("").unwrap();
        assert_eq!(
            config.crawler.page_url(42),
            "https://hackmyvm.eu/achievement/?achievement=42"
        );
    }
}
