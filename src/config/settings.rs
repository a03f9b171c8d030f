use crate::config::env::{self, EnvKey};
use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Local,
    S3,
}

impl FromStr for StorageBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" | "fs" => Ok(StorageBackend::Local),
            "s3" | "minio" => Ok(StorageBackend::S3),
            _ => Err(()),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct S3Config {
    pub endpoint: String,
    pub bucket: String,
    pub access_key: String,
    pub secret_key: String,
    pub public_url: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    pub server_port: u16,
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub storage_backend: StorageBackend,
    pub media_root: PathBuf,
    pub media_url: String,
    pub s3: Option<S3Config>,
    pub page_size: u64,
    pub max_page_size: u64,
    pub max_upload_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_port: 3000,
            database_url: None,
            jwt_secret: String::new(),
            storage_backend: StorageBackend::Local,
            media_root: PathBuf::from("./media"),
            media_url: "/media".to_string(),
            s3: None,
            page_size: 10,
            max_page_size: 100,
            max_upload_bytes: 5 * 1024 * 1024,
        }
    }
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let jwt_secret = env::get_opt(EnvKey::JwtSecret)
            .ok_or(ConfigError::Missing(EnvKey::JwtSecret.as_str()))?;

        let storage_backend = match env::get_opt(EnvKey::StorageBackend) {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                key: EnvKey::StorageBackend.as_str(),
                value: raw,
            })?,
            None => defaults.storage_backend,
        };

        let s3 = match storage_backend {
            StorageBackend::S3 => Some(S3Config::from_env()?),
            StorageBackend::Local => None,
        };

        Ok(Self {
            server_port: env::get_parsed(EnvKey::ServerPort, defaults.server_port)?,
            database_url: env::get_opt(EnvKey::DatabaseUrl),
            jwt_secret,
            storage_backend,
            media_root: PathBuf::from(env::get_or(EnvKey::MediaRoot, "./media")),
            media_url: env::get_or(EnvKey::MediaUrl, &defaults.media_url),
            s3,
            page_size: env::get_parsed(EnvKey::PageSize, defaults.page_size)?,
            max_page_size: env::get_parsed(EnvKey::MaxPageSize, defaults.max_page_size)?,
            max_upload_bytes: env::get_parsed(EnvKey::MaxUploadBytes, defaults.max_upload_bytes)?,
        })
    }
}

impl S3Config {
    fn from_env() -> Result<Self, ConfigError> {
        let required = |key: EnvKey| {
            let name = key.as_str();
            env::get_opt(key).ok_or(ConfigError::Missing(name))
        };

        Ok(Self {
            endpoint: required(EnvKey::MinioUrl)?,
            bucket: required(EnvKey::MinioBucket)?,
            access_key: required(EnvKey::MinioAccessKey)?,
            secret_key: required(EnvKey::MinioSecretKey)?,
            public_url: env::get_opt(EnvKey::MinioPublicUrl),
        })
    }

    /// Base URL objects are reachable at, without a trailing slash.
    pub fn public_base(&self) -> String {
        match &self.public_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("{}/{}", self.endpoint.trim_end_matches('/'), self.bucket),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_backend_parses_aliases() {
        assert_eq!("local".parse(), Ok(StorageBackend::Local));
        assert_eq!(" S3 ".parse(), Ok(StorageBackend::S3));
        assert_eq!("minio".parse(), Ok(StorageBackend::S3));
        assert!("ftp".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn s3_public_base_defaults_to_endpoint_and_bucket() {
        let mut s3 = S3Config {
            endpoint: "http://localhost:9000/".to_string(),
            bucket: "images".to_string(),
            access_key: "key".to_string(),
            secret_key: "secret".to_string(),
            public_url: None,
        };
        assert_eq!(s3.public_base(), "http://localhost:9000/images");

        s3.public_url = Some("https://cdn.example.com/".to_string());
        assert_eq!(s3.public_base(), "https://cdn.example.com");
    }
}
