#[cfg(test)]
mod test {
    use std::io::Write;
    use std::time::Duration;

    use serial_test::serial;

    use crate::config::loader::{expand_env_vars, file_to_config, parse_config};
    use crate::config::settings::LogFormat;
    use crate::config::validator::validate_service_config;

    const VALID_YAML: &str = r#"
client:
  client_id: client-1
  client_secret: ${OAUTH_TEST_CLIENT_SECRET}
  token_url: https://auth.example.com/oauth/token
  audience: svcA
  timeout: 3
cache:
  url: ${OAUTH_TEST_REDIS_URL:redis://127.0.0.1:6379/0}
logging:
  level: debug
  format: json
"#;

    #[tokio::test]
    #[serial]
    async fn config_file_is_loaded_with_env_expansion() {
        std::env::set_var("OAUTH_TEST_CLIENT_SECRET", "from-env");
        std::env::remove_var("OAUTH_TEST_REDIS_URL");

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(VALID_YAML.as_bytes()).unwrap();

        let service_config = file_to_config(file.path()).await.unwrap();

        assert_eq!(service_config.client.client_secret, "from-env");
        assert_eq!(service_config.client.timeout, Duration::from_secs(3));
        assert_eq!(service_config.client.cache_key(), "oauth_token_cache__client-1_svcA");
        assert_eq!(service_config.cache.url, "redis://127.0.0.1:6379/0");
        let logging = service_config.logging.unwrap();
        assert_eq!(logging.level, "debug");
        assert_eq!(logging.format, LogFormat::Json);

        std::env::remove_var("OAUTH_TEST_CLIENT_SECRET");
    }

    #[test]
    #[serial]
    fn unset_variable_without_default_expands_to_empty() {
        std::env::remove_var("OAUTH_TEST_UNSET");
        assert_eq!(expand_env_vars("a${OAUTH_TEST_UNSET}b").unwrap(), "ab");
        assert_eq!(expand_env_vars("${OAUTH_TEST_UNSET:fallback}").unwrap(), "fallback");
    }

    #[tokio::test]
    async fn missing_config_file_is_reported() {
        let err = file_to_config(std::path::Path::new("does/not/exist.yaml")).await.unwrap_err();
        assert!(err.to_string().contains("cannot read config file"));
    }

    #[test]
    fn logging_defaults_are_applied() {
        let yaml = r#"
client:
  client_id: client-1
  client_secret: s
  token_url: http://localhost:8080/token
  audience: svcA
cache:
  url: redis://localhost
"#;
        let service_config = parse_config(yaml).unwrap();
        let logging = service_config.logging.unwrap();
        assert_eq!(logging.level, "info");
        assert_eq!(service_config.client.timeout, Duration::from_secs(5));
    }

    #[test]
    fn unknown_client_option_is_rejected() {
        let yaml = r#"
client:
  client_id: client-1
  client_secret: s
  token_url: http://localhost:8080/token
  audience: svcA
  scope: read
cache:
  url: redis://localhost
"#;
        let err = parse_config(yaml).unwrap_err();
        assert!(err.to_string().contains("scope"), "{err}");
    }

    #[test]
    fn invalid_config_reports_all_errors() {
        let yaml = r#"
client:
  client_id: ""
  client_secret: s
  token_url: ftp://auth.example.com/token
  audience: svcA
  timeout: 0
cache:
  url: http://localhost:6379
logging:
  level: loud
  format: compact
"#;
        let service_config: crate::config::settings::ServiceConfig = serde_yaml::from_str(yaml).unwrap();
        let errs = validate_service_config(&service_config).unwrap_err();

        assert_eq!(errs.len(), 5, "{errs:?}");
        assert!(errs.iter().any(|e| e.contains("client_id")));
        assert!(errs.iter().any(|e| e.contains("token_url")));
        assert!(errs.iter().any(|e| e.contains("timeout")));
        assert!(errs.iter().any(|e| e.contains("cache.url")));
        assert!(errs.iter().any(|e| e.contains("logging.level")));

        let err = parse_config(yaml).unwrap_err();
        assert!(err.to_string().contains("config is not valid"));
    }
}
