use crate::domain::DiscoveryConfig;
use crate::ports::ConfigProvider;

// ============================================================================
// StaticConfigProvider - Hardcoded config for testing/development
// ============================================================================

/// Static configuration provider wrapping a ready-made config.
///
/// Useful for testing and development. For deployments, use `TomlConfigProvider`.
#[derive(Debug, Clone)]
pub struct StaticConfigProvider {
    config: DiscoveryConfig,
}

impl StaticConfigProvider {
    /// Wrap a config.
    #[must_use]
    pub fn new(config: DiscoveryConfig) -> Self {
        Self { config }
    }
}

impl ConfigProvider for StaticConfigProvider {
    fn discovery_config(&self) -> DiscoveryConfig {
        self.config.clone()
    }
}

// ============================================================================
// TomlConfigProvider - File-based config (requires "toml-config" feature)
// ============================================================================

#[cfg(feature = "toml-config")]
mod toml_config {
    use super::*;
    use crate::domain::{
        DecodeError, NodeRecord, PeerAddress, RecordInput, DEFAULT_LOOKUP_INTERVAL_MS,
    };
    use serde::Deserialize;
    use std::fs;
    use std::path::Path;
    use std::time::Duration;
    use thiserror::Error;

    /// Configuration file structure.
    #[derive(Debug, Deserialize)]
    struct ConfigFile {
        discovery: DiscoveryTable,
    }

    #[derive(Debug, Deserialize)]
    struct DiscoveryTable {
        local_record: String,
        bind_address: Option<String>,
        #[serde(default)]
        boot_records: Vec<String>,
        enabled: Option<bool>,
        lookup_interval_ms: Option<u64>,
    }

    /// TOML-based configuration provider.
    ///
    /// # Config File Format
    ///
    /// ```toml
    /// [discovery]
    /// enabled = true
    /// bind_address = "/ip4/0.0.0.0/udp/9000"
    /// lookup_interval_ms = 5000
    /// local_record = "enr:..."
    /// boot_records = [
    ///     "enr:...",
    /// ]
    /// ```
    ///
    /// The local record is decoded while loading. Boot records stay encoded
    /// and are decoded when the service is constructed.
    #[derive(Debug, Clone)]
    pub struct TomlConfigProvider {
        config: DiscoveryConfig,
    }

    impl TomlConfigProvider {
        /// Load configuration from a TOML file.
        ///
        /// # Errors
        ///
        /// Returns error if the file cannot be read or parsed.
        pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
            let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
                path: path.as_ref().display().to_string(),
                error: e.to_string(),
            })?;

            Self::parse(&content)
        }

        /// Parse configuration from a TOML string.
        pub fn parse(content: &str) -> Result<Self, ConfigError> {
            let file: ConfigFile =
                toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
            let table = file.discovery;

            let local_record: NodeRecord = table.local_record.parse()?;

            let mut config = DiscoveryConfig::new(local_record)
                .with_boot_records(table.boot_records.into_iter().map(RecordInput::Encoded))
                .with_lookup_interval(Duration::from_millis(
                    table.lookup_interval_ms.unwrap_or(DEFAULT_LOOKUP_INTERVAL_MS),
                ));

            if let Some(enabled) = table.enabled {
                config = config.with_enabled(enabled);
            }

            if let Some(bind) = table.bind_address {
                let address: PeerAddress =
                    bind.parse().map_err(|_| ConfigError::InvalidValue {
                        field: "bind_address",
                        reason: format!("'{}' is not an address", bind),
                    })?;
                if !address.is_udp() {
                    return Err(ConfigError::InvalidValue {
                        field: "bind_address",
                        reason: format!("'{}' is not a UDP address", bind),
                    });
                }
                config = config.with_bind_address(address);
            }

            Ok(Self { config })
        }
    }

    impl ConfigProvider for TomlConfigProvider {
        fn discovery_config(&self) -> DiscoveryConfig {
            self.config.clone()
        }
    }

    /// Errors that can occur during config loading.
    #[derive(Debug, Clone, PartialEq, Eq, Error)]
    pub enum ConfigError {
        /// File I/O error.
        #[error("Failed to read {path}: {error}")]
        Io {
            /// Path of the file that failed to load.
            path: String,
            /// Error message from the I/O operation.
            error: String,
        },
        /// TOML parsing error.
        #[error("Failed to parse config: {0}")]
        Parse(String),
        /// A field holds an unusable value.
        #[error("Invalid value for {field}: {reason}")]
        InvalidValue {
            /// Offending field
            field: &'static str,
            /// What is wrong with it
            reason: String,
        },
        /// The local record could not be decoded.
        #[error("Invalid local record: {0}")]
        Record(#[from] DecodeError),
    }
}

#[cfg(feature = "toml-config")]
pub use toml_config::{ConfigError, TomlConfigProvider};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NodeRecord, PublicKey};
    use std::net::Ipv4Addr;

    fn record(byte: u8) -> NodeRecord {
        let mut key = [0u8; 33];
        key[0] = 0x02;
        key[1] = byte;
        NodeRecord::new(1, PublicKey::new(key))
            .with_ip(Ipv4Addr::new(10, 0, 0, byte))
            .with_udp(9000)
    }

    #[test]
    fn test_static_provider_returns_config() {
        let config = DiscoveryConfig::new(record(1)).with_enabled(false);
        let provider = StaticConfigProvider::new(config.clone());
        assert_eq!(provider.discovery_config(), config);
    }

    #[cfg(feature = "toml-config")]
    mod toml_provider {
        use super::*;
        use crate::domain::RecordInput;
        use std::time::Duration;

        #[test]
        fn test_parse_full_config() {
            let content = format!(
                r#"
                [discovery]
                enabled = false
                bind_address = "/ip4/127.0.0.1/udp/9100"
                lookup_interval_ms = 250
                local_record = "{}"
                boot_records = ["{}", "{}"]
                "#,
                record(1).to_text(),
                record(2).to_text(),
                record(3).to_text(),
            );

            let config = TomlConfigProvider::parse(&content)
                .unwrap()
                .discovery_config();
            assert_eq!(config.local_record, record(1));
            assert!(!config.enabled);
            assert_eq!(config.bind_address.to_string(), "/ip4/127.0.0.1/udp/9100");
            assert_eq!(config.lookup_interval, Duration::from_millis(250));
            assert_eq!(
                config.boot_records,
                vec![
                    RecordInput::Encoded(record(2).to_text()),
                    RecordInput::Encoded(record(3).to_text()),
                ]
            );
        }

        #[test]
        fn test_parse_applies_defaults() {
            let content = format!("[discovery]\nlocal_record = \"{}\"\n", record(1).to_text());
            let config = TomlConfigProvider::parse(&content)
                .unwrap()
                .discovery_config();
            assert!(config.enabled);
            assert!(config.boot_records.is_empty());
            assert_eq!(config.lookup_interval, Duration::from_millis(5000));
            assert_eq!(config.bind_address.to_string(), "/ip4/0.0.0.0/udp/9000");
        }

        #[test]
        fn test_parse_rejects_tcp_bind_address() {
            let content = format!(
                "[discovery]\nlocal_record = \"{}\"\nbind_address = \"/ip4/0.0.0.0/tcp/9000\"\n",
                record(1).to_text()
            );
            assert!(matches!(
                TomlConfigProvider::parse(&content),
                Err(ConfigError::InvalidValue {
                    field: "bind_address",
                    ..
                })
            ));
        }

        #[test]
        fn test_parse_rejects_bad_local_record() {
            let content = "[discovery]\nlocal_record = \"not-a-record\"\n";
            assert!(matches!(
                TomlConfigProvider::parse(content),
                Err(ConfigError::Record(_))
            ));
        }

        #[test]
        fn test_parse_rejects_missing_table() {
            assert!(matches!(
                TomlConfigProvider::parse("enabled = true"),
                Err(ConfigError::Parse(_))
            ));
        }

        #[test]
        fn test_load_reports_missing_file() {
            let err = TomlConfigProvider::load("/nonexistent/enr-discovery.toml").unwrap_err();
            assert!(matches!(err, ConfigError::Io { .. }));
        }
    }
}
