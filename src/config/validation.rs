use super::{Config, ConfigError};
use url::Url;

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Validate every configured backend URL; absent URLs are legal and
        // switch the matching collaborator to its fallback behavior.
        for (name, url) in [
            ("intent", &self.intent_url),
            ("menu", &self.menu_url),
            ("loki", &self.loki.url),
        ] {
            if let Some(url) = url {
                Url::parse(url).map_err(|e| {
                    ConfigError::InvalidUrl(format!("Invalid {name} URL '{url}': {e}"))
                })?;
            }
        }

        // Validate timeouts
        if self.intent_timeout_secs == 0 || self.menu_timeout_secs == 0 {
            return Err(ConfigError::InvalidConfig(
                "Backend timeouts must be greater than 0".to_string(),
            ));
        }
        if self.loki.timeout_secs == 0 {
            return Err(ConfigError::InvalidConfig(
                "Loki timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn test_invalid_backend_url_rejected() {
        let config = Config {
            menu_url: Some("not a url".to_string()),
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::default();
        config.loki.timeout_secs = 0;
        assert!(config.validate().is_err());

        let config = Config {
            intent_timeout_secs: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_configured_urls_accepted() {
        let mut config = Config {
            intent_url: Some("http://intent:8080/classify".to_string()),
            menu_url: Some("http://menu:8080/menu".to_string()),
            ..Config::default()
        };
        config.loki.url = Some("http://loki:3100/loki/api/v1/push".to_string());
        config.validate().unwrap();
    }
}
