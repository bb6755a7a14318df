//! configuration validation stuff
use {
    crate::{config::options::*, utils::is_theme_identifier, validator},
    url::Url,
};

/// trait for validating config structs
pub trait Validate {
    /// validate the config
    fn validate(&self) -> Result<(), Vec<String>>;

    /// check if the config is valid
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

validator! { ThemeCfg,
    store_path => |v: &String| !v.trim().is_empty(),
        "must not be empty";
    stylesheet => |v: &String| !v.trim().is_empty(),
        "must not be empty";
}

validator! { RemoteCfg,
    base_url => |v: &String| Url::parse(v).is_ok_and(|u| matches!(u.scheme(), "http" | "https")),
        "must be an http(s) url";
    table => |v: &String| is_theme_identifier(v),
        "must be lowercase letters, digits, '-' or '_'";
    api_key => |v: &String| !v.trim().is_empty(),
        "must not be empty";
}

/// valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

validator! { LoggingConfig,
    level => |v: &String| VALID_LOG_LEVELS.contains(&v.to_lowercase().as_str()),
        "must be one of: trace, debug, info, warn, error, off";
}

impl Validate for SiteThemeCfg {
    fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors: Vec<String> = Vec::new();

        macro_rules! validate_nested {
            ($($field:ident),* $(,)?) => {
                $(
                    if let Some(ref nested) = self.$field {
                        if let Err(nested_errors) = nested.validate() {
                            for err in nested_errors {
                                errors.push(format!("{}.{}", stringify!($field), err));
                            }
                        }
                    }
                )*
            };
        }

        validate_nested!(theme, remote, logging);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// format validation errors for display
pub fn format_validation_errors(errors: &[String]) -> String {
    let mut output = String::from("Configuration validation failed:\n");
    for (i, err) in errors.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, err));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_errors_are_prefixed() {
        let cfg = SiteThemeCfg {
            remote: Some(RemoteCfg {
                base_url: Some("ftp://db.example.com".to_string()),
                ..RemoteCfg::default()
            }),
            logging: Some(LoggingConfig {
                level: Some("loud".to_string()),
                ..LoggingConfig::default()
            }),
            ..SiteThemeCfg::default()
        };

        let errors = cfg.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].starts_with("remote.base_url:"));
        assert!(errors[1].starts_with("logging.level:"));
        assert!(format_validation_errors(&errors).contains("  2. logging.level"));
    }

    #[test]
    fn test_remote_url_accepted() {
        let remote = RemoteCfg {
            base_url: Some("https://db.example.com".to_string()),
            api_key: Some("anon-key".to_string()),
            ..RemoteCfg::default()
        };

        assert!(remote.is_valid());
    }
}
