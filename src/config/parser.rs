use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Default config file looked for when no path is given
const DEFAULT_CONFIG_FILE: &str = "quotemill.toml";

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;

    let config: Config = toml::from_str(&content)?;

    validate(&config)?;

    Ok(config)
}

/// Resolves the effective configuration
///
/// With an explicit path the file must exist and parse. Without one,
/// `quotemill.toml` in the working directory is used when present,
/// otherwise the built-in defaults apply.
pub fn load_or_default(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(p) => load_config(p),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                load_config(default_path)
            } else {
                let config = Config::default();
                validate(&config)?;
                Ok(config)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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
[store]
database-path = "./test.db"
max-quote-length = 120

[crawler]
max-pages = 5
request-delay-ms = 250
request-timeout-secs = 10

[user-agent]
client-name = "testbot"
client-version = "0.1"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.store.database_path, "./test.db");
        assert_eq!(config.store.max_quote_length, Some(120));
        assert_eq!(config.crawler.max_pages, 5);
        assert_eq!(config.user_agent.client_name, "testbot");
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let file = create_temp_config("[crawler]\nmax-pages = 3\n");
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawler.max_pages, 3);
        assert_eq!(config.store.database_path, "quotes.db");
        assert_eq!(config.store.max_quote_length, None);
        assert_eq!(config.render.wrap_width, 30);
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/quotemill.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let file = create_temp_config("[crawler]\nmax-pages = 0\n");
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }

    #[test]
    fn test_defaults_when_no_path() {
        let config = load_or_default(None).unwrap();
        assert_eq!(config.crawler.max_pages, 50);
        assert_eq!(config.crawler.request_delay_ms, 1000);
    }

    #[test]
    fn test_user_agent_header_value() {
        let config = Config::default();
        let ua = config.user_agent.header_value();
        assert!(ua.starts_with("quotemill/"));
    }
}
