//! Connection-credential resolution
//!
//! Flags and environment take precedence; whatever is still missing comes
//! from the `[connection]` table of the config file
//! (`~/.config/studioctl/config.toml` unless `--config` points elsewhere).

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::cli::ConnectionArgs;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("no server URL configured: pass --url, set STUDIO_URL, or add connection.url to the config file")]
    MissingUrl,

    #[error("no API key configured: pass --api-key, set STUDIO_API_KEY, or add connection.api_key to the config file")]
    MissingApiKey,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    connection: ConnectionTable,
}

#[derive(Debug, Default, Deserialize)]
struct ConnectionTable {
    url: Option<String>,
    api_key: Option<String>,
}

/// Resolved connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub url: String,
    pub api_key: String,
}

/// Resolve the connection from flags, environment, and config file.
///
/// An explicitly passed `--config` path must exist; the default location may
/// be absent.
pub fn resolve(args: &ConnectionArgs) -> Result<Connection, ConfigError> {
    let file = match &args.config {
        Some(path) => load_file(path)?,
        None => match default_path() {
            Some(path) if path.exists() => load_file(&path)?,
            _ => ConfigFile::default(),
        },
    };

    let url = args
        .url
        .clone()
        .or(file.connection.url)
        .ok_or(ConfigError::MissingUrl)?;
    let api_key = args
        .api_key
        .clone()
        .or(file.connection.api_key)
        .ok_or(ConfigError::MissingApiKey)?;
    Ok(Connection { url, api_key })
}

fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("studioctl").join("config.toml"))
}

fn load_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn args(url: Option<&str>, api_key: Option<&str>, config: Option<PathBuf>) -> ConnectionArgs {
        ConnectionArgs {
            url: url.map(str::to_string),
            api_key: api_key.map(str::to_string),
            config,
        }
    }

    fn config_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_flags_alone_resolve() {
        let resolved = resolve(&args(Some("http://localhost:8080"), Some("key"), None)).unwrap();
        assert_eq!(
            resolved,
            Connection {
                url: "http://localhost:8080".to_string(),
                api_key: "key".to_string(),
            }
        );
    }

    #[test]
    fn test_file_fills_missing_settings() {
        let file = config_file(
            "[connection]\nurl = \"http://studio:80\"\napi_key = \"from-file\"\n",
        );
        let resolved = resolve(&args(None, None, Some(file.path().to_path_buf()))).unwrap();
        assert_eq!(resolved.url, "http://studio:80");
        assert_eq!(resolved.api_key, "from-file");
    }

    #[test]
    fn test_flags_override_file() {
        let file = config_file(
            "[connection]\nurl = \"http://studio:80\"\napi_key = \"from-file\"\n",
        );
        let resolved = resolve(&args(
            Some("http://other:8080"),
            None,
            Some(file.path().to_path_buf()),
        ))
        .unwrap();
        assert_eq!(resolved.url, "http://other:8080");
        assert_eq!(resolved.api_key, "from-file");
    }

    #[test]
    fn test_missing_settings_are_typed_errors() {
        let file = config_file("[connection]\nurl = \"http://studio:80\"\n");
        let err = resolve(&args(None, None, Some(file.path().to_path_buf()))).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));

        let empty = config_file("");
        let err = resolve(&args(None, None, Some(empty.path().to_path_buf()))).unwrap_err();
        assert!(matches!(err, ConfigError::MissingUrl));
    }

    #[test]
    fn test_explicit_config_path_must_exist() {
        let err = resolve(&args(
            Some("http://localhost"),
            Some("key"),
            Some(PathBuf::from("/does/not/exist.toml")),
        ))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_malformed_file_is_a_parse_error() {
        let file = config_file("connection = \"not a table\"");
        let err = resolve(&args(None, None, Some(file.path().to_path_buf()))).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
