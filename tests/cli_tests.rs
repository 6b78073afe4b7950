//! Integration tests for CLI functionality

#[cfg(feature = "cli")]
mod cli_integration_tests {
    use std::fs;
    use tempfile::TempDir;

    use mlphone::cli::commands::{format_keys, write_keys_from_reader};
    use mlphone::cli::paths::{config_file_path_with_override, validate_config_path};
    use mlphone::cli::{Config, OutputFormat};
    use mlphone::phonetic::{compute, KeyLevel};

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.level, None);
        assert_eq!(config.output_format(), OutputFormat::Text);
        assert!(config.color_enabled());
    }

    #[test]
    fn test_config_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.json");
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.json");

        let config = Config {
            level: Some(KeyLevel::Hard),
            format: Some(OutputFormat::Json),
            color: Some(false),
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load(Some(path.clone())).unwrap();
        assert_eq!(loaded, config);

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"hard\""));
        assert!(contents.contains("\"json\""));
    }

    #[test]
    fn test_config_partial_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, r#"{ "level": "broad" }"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.level, Some(KeyLevel::Broad));
        assert_eq!(config.format, None);
        assert_eq!(config.color, None);
    }

    #[test]
    fn test_config_invalid_json_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_config_path_must_be_json() {
        assert!(validate_config_path(std::path::Path::new("settings.json")).is_ok());
        assert!(validate_config_path(std::path::Path::new("settings.toml")).is_err());
        assert!(validate_config_path(std::path::Path::new("settings")).is_err());
        assert!(config_file_path_with_override(Some("settings.yaml".into())).is_err());
    }

    #[test]
    fn test_config_merge() {
        let base = Config {
            level: Some(KeyLevel::Broad),
            format: Some(OutputFormat::Json),
            color: Some(false),
        };
        let merged = base.merge_with_cli(Some(KeyLevel::Full), None);
        assert_eq!(merged.level, Some(KeyLevel::Full));
        assert_eq!(merged.format, Some(OutputFormat::Json));
        assert_eq!(merged.color, Some(false));
    }

    #[test]
    fn test_keys_from_reader_with_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, r#"{ "level": "broad", "format": "text" }"#).unwrap();
        let config = Config::load_from(&path).unwrap();

        let mut out = Vec::new();
        let count =
            write_keys_from_reader("കേരളം\nമലയാളം\n".as_bytes(), &mut out, &config).unwrap();
        assert_eq!(count, 2);
        assert_eq!(String::from_utf8(out).unwrap(), "കേരളം\tKRL3\nമലയാളം\tMLYL3\n");
    }

    #[test]
    fn test_format_keys_json_round_trip() {
        let config = Config::default().merge_with_cli(None, Some(OutputFormat::Json));
        let keys = compute("ഉൽസവം");
        let line = format_keys("ഉൽസവം", &keys, &config).unwrap();
        let parsed: mlphone::phonetic::PhoneticKeys = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed, keys);
    }
}
