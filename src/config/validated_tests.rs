//! Tests for configuration merging and validation.

use std::io::Write;
use std::time::Duration;

use tempfile::{NamedTempFile, tempdir};

use super::{Cli, ConfigError, OutputFormat, TomlConfig, ValidatedConfig, write_default_config};

fn cli(args: &[&str]) -> Cli {
    let mut full = vec!["ipscout"];
    full.extend_from_slice(args);
    Cli::parse_from_iter(full)
}

fn toml(content: &str) -> TomlConfig {
    TomlConfig::parse(content).unwrap()
}

mod defaults {
    use super::*;

    #[test]
    fn no_sources_yields_built_in_defaults() {
        let config = ValidatedConfig::from_raw(&cli(&[]), None).unwrap();

        assert_eq!(
            config.resolver.public_ip_service_url.as_str(),
            "https://api.ipify.org/"
        );
        assert_eq!(config.resolver.timeout, Duration::from_secs(5));
        assert!(config.exclude_interfaces.is_empty());
        assert!(config.bind_address.is_none());
        assert!(config.lookup_public);
        assert_eq!(config.format, OutputFormat::Text);
        assert!(!config.verbose);
    }
}

mod precedence {
    use super::*;

    const FILE: &str = r#"
        [public_ip]
        url = "https://file.example.test/ip"
        timeout = 9

        [local]
        exclude_interfaces = ["^docker"]

        [transport]
        bind_address = "10.0.0.5"
    "#;

    #[test]
    fn toml_overrides_defaults() {
        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&toml(FILE))).unwrap();

        assert_eq!(
            config.resolver.public_ip_service_url.as_str(),
            "https://file.example.test/ip"
        );
        assert_eq!(config.resolver.timeout, Duration::from_secs(9));
        assert_eq!(config.bind_address.as_deref(), Some("10.0.0.5"));
        assert_eq!(config.exclude_interfaces.len(), 1);
        assert_eq!(config.exclude_interfaces[0].as_str(), "^docker");
    }

    #[test]
    fn cli_overrides_toml() {
        let cli = cli(&[
            "--url",
            "http://cli.example.test/",
            "--timeout",
            "2",
            "--bind-address",
            "127.0.0.1",
        ]);

        let config = ValidatedConfig::from_raw(&cli, Some(&toml(FILE))).unwrap();

        assert_eq!(
            config.resolver.public_ip_service_url.as_str(),
            "http://cli.example.test/"
        );
        assert_eq!(config.resolver.timeout, Duration::from_secs(2));
        assert_eq!(config.bind_address.as_deref(), Some("127.0.0.1"));
    }

    #[test]
    fn cli_excludes_replace_toml_excludes() {
        let cli = cli(&[
            "--exclude-interface",
            "^veth",
            "--exclude-interface",
            "^br-",
        ]);

        let config = ValidatedConfig::from_raw(&cli, Some(&toml(FILE))).unwrap();

        let patterns: Vec<_> = config
            .exclude_interfaces
            .iter()
            .map(|f| f.as_str().to_string())
            .collect();
        assert_eq!(patterns, vec!["^veth", "^br-"]);
    }
}

mod public_lookup_switch {
    use super::*;

    #[test]
    fn local_only_flag_disables_lookup() {
        let config = ValidatedConfig::from_raw(&cli(&["--local-only"]), None).unwrap();

        assert!(!config.lookup_public);
    }

    #[test]
    fn toml_can_disable_lookup() {
        let toml = toml("[public_ip]\nenabled = false\n");

        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&toml)).unwrap();

        assert!(!config.lookup_public);
    }

    #[test]
    fn toml_enabled_does_not_override_local_only() {
        let toml = toml("[public_ip]\nenabled = true\n");

        let config = ValidatedConfig::from_raw(&cli(&["--local-only"]), Some(&toml)).unwrap();

        assert!(!config.lookup_public);
    }
}

mod validation {
    use super::*;

    #[test]
    fn zero_timeout_is_rejected() {
        let result = ValidatedConfig::from_raw(&cli(&["--timeout", "0"]), None);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidTimeout { seconds: 0 })
        ));
    }

    #[test]
    fn zero_timeout_in_toml_is_rejected() {
        let toml = toml("[public_ip]\ntimeout = 0\n");

        let result = ValidatedConfig::from_raw(&cli(&[]), Some(&toml));

        assert!(matches!(result, Err(ConfigError::InvalidTimeout { .. })));
    }

    #[test]
    fn malformed_url_is_rejected() {
        let result = ValidatedConfig::from_raw(&cli(&["--url", "not a url"]), None);

        assert!(matches!(result, Err(ConfigError::InvalidUrl { url, .. }) if url == "not a url"));
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        let result = ValidatedConfig::from_raw(&cli(&["--url", "ftp://example.test/ip"]), None);

        assert!(matches!(
            result,
            Err(ConfigError::UnsupportedScheme { scheme, .. }) if scheme == "ftp"
        ));
    }

    #[test]
    fn invalid_regex_is_rejected() {
        let result = ValidatedConfig::from_raw(&cli(&["--exclude-interface", "[unclosed"]), None);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidRegex { pattern, .. }) if pattern == "[unclosed"
        ));
    }
}

mod loading {
    use super::*;

    #[test]
    fn load_reads_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [public_ip]
            url = "https://file.example.test/"
            timeout = 7
            "#
        )
        .unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let config = ValidatedConfig::load(&cli(&["--config", &path])).unwrap();

        assert_eq!(config.resolver.timeout, Duration::from_secs(7));
    }

    #[test]
    fn load_missing_file_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let result = ValidatedConfig::load(&cli(&["--config", path.to_str().unwrap()]));

        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }

    #[test]
    fn load_without_config_uses_defaults() {
        let config = ValidatedConfig::load(&cli(&[])).unwrap();

        assert!(config.lookup_public);
    }

    #[test]
    fn display_summarizes_config() {
        let config = ValidatedConfig::from_raw(&cli(&["--bind-address", "0.0.0.0"]), None).unwrap();

        let text = config.to_string();

        assert!(text.contains("https://api.ipify.org/"));
        assert!(text.contains("timeout: 5s"));
        assert!(text.contains("bind_address: 0.0.0.0"));
    }
}

mod init {
    use super::*;

    #[test]
    fn written_template_loads_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ipscout.toml");

        write_default_config(&path).unwrap();
        let config = ValidatedConfig::load(&cli(&["--config", path.to_str().unwrap()])).unwrap();

        assert_eq!(config.resolver.timeout, Duration::from_secs(5));
        assert!(config.lookup_public);
    }

    #[test]
    fn write_to_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no/such/dir/ipscout.toml");

        let result = write_default_config(&path);

        assert!(matches!(result, Err(ConfigError::FileWrite { .. })));
    }
}
