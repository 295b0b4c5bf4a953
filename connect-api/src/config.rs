use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::store::firestore_base_url;
use crate::view::DEFAULT_NOTIFICATION_TIMEOUT_SECS;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ConnectConfig {
    pub server: Option<ServerConfig>,
    pub cors: Option<CorsConfig>,
    #[serde(default)]
    pub source: SourceConfig,
    pub native_contacts: Option<NativeContactsConfig>,
    pub downloads: Option<DownloadsConfig>,
    pub ui: Option<UiConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

/// The remote document collection the contact list is read from.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SourceConfig {
    #[serde(default = "firestore_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default = "default_collection")]
    pub collection: String,
    pub api_key: Option<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: firestore_base_url(),
            project_id: String::new(),
            collection: default_collection(),
            api_key: None,
        }
    }
}

fn default_collection() -> String {
    "contacts".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NativeContactsConfig {
    pub endpoint: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DownloadsConfig {
    pub directory: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct UiConfig {
    pub notification_timeout_secs: Option<i64>,
}

const DEFAULT_CONFIG: &str = r#"
[server]
host = "127.0.0.1"
port = 8080

[cors]
allowed_origins = ["http://localhost:3000"]

[source]
# Firestore project holding the contacts collection
# project_id = "your-project-id"
collection = "contacts"
# api_key = "your-web-api-key"

[native_contacts]
# Device bridge that writes straight into the address book. When unset,
# selected contacts are exported as .vcf files instead.
# endpoint = "http://127.0.0.1:9090/contacts"

[downloads]
# directory = "/path/to/downloads"

[ui]
notification_timeout_secs = 6
"#;

impl ConnectConfig {
    /// Loads the config file, writing a commented default on first run.
    ///
    /// `KIKIS_CONNECT__SECTION__KEY` environment variables override file
    /// values, e.g. `KIKIS_CONNECT__SOURCE__API_KEY`.
    pub fn load(path: Option<&Path>) -> Result<(Self, PathBuf), ConfigError> {
        let config_path = path.map(Path::to_path_buf).unwrap_or_else(get_config_path);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        if !config_path.exists() {
            std::fs::write(&config_path, DEFAULT_CONFIG).map_err(|e| {
                ConfigError::Message(format!("Failed to write default config: {e}"))
            })?;
        }

        let builder = Config::builder()
            .add_source(File::from(config_path.clone()))
            .add_source(Environment::with_prefix("KIKIS_CONNECT").separator("__"))
            .build()?;

        let config: ConnectConfig = builder.try_deserialize()?;

        Ok((config, config_path))
    }

    pub fn bind_address(&self) -> (String, u16) {
        match &self.server {
            Some(server) => (server.host.clone(), server.port),
            None => ("127.0.0.1".to_string(), 8080),
        }
    }

    pub fn native_endpoint(&self) -> Option<&str> {
        self.native_contacts
            .as_ref()
            .and_then(|n| n.endpoint.as_deref())
    }

    pub fn downloads_directory(&self) -> PathBuf {
        self.downloads
            .as_ref()
            .and_then(|d| d.directory.clone())
            .unwrap_or_else(|| {
                dirs::download_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("kikis-connect")
            })
    }

    pub fn notification_timeout(&self) -> chrono::Duration {
        let secs = match self.ui.as_ref().and_then(|ui| ui.notification_timeout_secs) {
            Some(secs) if secs > 0 => secs,
            Some(secs) => {
                tracing::warn!(
                    "notification_timeout_secs = {} is not positive, using {}",
                    secs,
                    DEFAULT_NOTIFICATION_TIMEOUT_SECS
                );
                DEFAULT_NOTIFICATION_TIMEOUT_SECS
            }
            None => DEFAULT_NOTIFICATION_TIMEOUT_SECS,
        };
        chrono::Duration::seconds(secs)
    }
}

pub fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("kikis-connect").join("connect.toml")
    } else {
        PathBuf::from("connect.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_run_writes_default_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("connect.toml");

        let (config, loaded_from) = ConnectConfig::load(Some(&path)).unwrap();

        assert_eq!(loaded_from, path);
        assert!(path.exists());
        assert_eq!(config.bind_address(), ("127.0.0.1".to_string(), 8080));
        assert_eq!(config.source.collection, "contacts");
        assert_eq!(config.source.base_url, "https://firestore.googleapis.com/v1");
        assert!(config.native_endpoint().is_none());
        assert_eq!(config.notification_timeout(), chrono::Duration::seconds(6));
    }

    #[test]
    fn test_explicit_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("connect.toml");
        std::fs::write(
            &path,
            r#"
[server]
host = "0.0.0.0"
port = 9000

[source]
project_id = "kikis"
collection = "important"

[native_contacts]
endpoint = "http://127.0.0.1:9090/contacts"

[downloads]
directory = "/tmp/vcards"

[ui]
notification_timeout_secs = 3
"#,
        )
        .unwrap();

        let (config, _) = ConnectConfig::load(Some(&path)).unwrap();

        assert_eq!(config.bind_address(), ("0.0.0.0".to_string(), 9000));
        assert_eq!(config.source.project_id, "kikis");
        assert_eq!(config.source.collection, "important");
        assert_eq!(config.native_endpoint(), Some("http://127.0.0.1:9090/contacts"));
        assert_eq!(config.downloads_directory(), PathBuf::from("/tmp/vcards"));
        assert_eq!(config.notification_timeout(), chrono::Duration::seconds(3));
        assert!(config.cors.is_none());
    }

    #[test]
    fn test_non_positive_timeout_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        for secs in ["0", "-3"] {
            let path = dir.path().join(format!("connect{secs}.toml"));
            std::fs::write(&path, format!("[ui]\nnotification_timeout_secs = {secs}\n")).unwrap();

            let (config, _) = ConnectConfig::load(Some(&path)).unwrap();

            assert_eq!(
                config.notification_timeout(),
                chrono::Duration::seconds(DEFAULT_NOTIFICATION_TIMEOUT_SECS)
            );
        }
    }
}
