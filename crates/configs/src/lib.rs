use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub upload: UploadConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 5000 }
    }
}

/// Which content store backs the REST routes.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// JSON files under `data_dir`
    #[default]
    File,
    /// seeded in-memory tables, lost on restart
    Memory,
}

impl std::str::FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "memory" | "mock" => Ok(Self::Memory),
            other => Err(anyhow!("unknown storage backend `{other}` (expected file|memory)")),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_uploads_dir")]
    pub uploads_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            data_dir: default_data_dir(),
            uploads_dir: default_uploads_dir(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    #[serde(default = "default_admin_username")]
    pub admin_username: String,
    #[serde(default = "default_admin_password")]
    pub admin_password: String,
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            admin_username: default_admin_username(),
            admin_password: default_admin_password(),
            token_ttl_hours: default_token_ttl_hours(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    #[serde(default = "default_max_upload_bytes")]
    pub max_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self { max_bytes: default_max_upload_bytes() }
    }
}

fn default_data_dir() -> String { "data".into() }
fn default_uploads_dir() -> String { "uploads".into() }
fn default_jwt_secret() -> String { "your-secret-key".into() }
fn default_admin_username() -> String { "eventninja12@".into() }
fn default_admin_password() -> String { "9323641780".into() }
fn default_token_ttl_hours() -> i64 { 8 }
fn default_max_upload_bytes() -> usize { 10 * 1024 * 1024 }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`), falling back to defaults when the
    /// file is missing, then apply env overrides and validate.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default().unwrap_or_default();
        cfg.apply_env(|key| std::env::var(key).ok())?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Override fields from environment variables. The lookup is injected so
    /// tests do not have to mutate the process environment.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("SERVER_PORT").or_else(|| lookup("PORT")) {
            self.server.port = port
                .parse()
                .map_err(|_| anyhow!("SERVER_PORT is not a valid port: {port}"))?;
        }
        if let Some(backend) = lookup("STORAGE_BACKEND") {
            self.storage.backend = backend.parse()?;
        }
        if let Some(dir) = lookup("DATA_DIR") {
            self.storage.data_dir = dir;
        }
        if let Some(dir) = lookup("UPLOADS_DIR") {
            self.storage.uploads_dir = dir;
        }
        if let Some(secret) = lookup("JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }
        if let Some(user) = lookup("ADMIN_USERNAME") {
            self.auth.admin_username = user;
        }
        if let Some(pass) = lookup("ADMIN_PASSWORD") {
            self.auth.admin_password = pass;
        }
        Ok(())
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.storage.validate()?;
        self.auth.validate()?;
        if self.upload.max_bytes == 0 {
            return Err(anyhow!("upload.max_bytes must be > 0"));
        }
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl StorageConfig {
    fn validate(&self) -> Result<()> {
        if self.data_dir.trim().is_empty() {
            return Err(anyhow!("storage.data_dir is empty"));
        }
        if self.uploads_dir.trim().is_empty() {
            return Err(anyhow!("storage.uploads_dir is empty"));
        }
        Ok(())
    }
}

impl AuthConfig {
    fn validate(&self) -> Result<()> {
        if self.jwt_secret.is_empty() {
            return Err(anyhow!("auth.jwt_secret is empty"));
        }
        if self.admin_username.trim().is_empty() || self.admin_password.is_empty() {
            return Err(anyhow!("auth.admin_username and auth.admin_password are required"));
        }
        if self.token_ttl_hours <= 0 {
            return Err(anyhow!("auth.token_ttl_hours must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_match_legacy_values() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.port, 5000);
        assert_eq!(cfg.storage.backend, StorageBackend::File);
        assert_eq!(cfg.storage.data_dir, "data");
        assert_eq!(cfg.auth.admin_username, "eventninja12@");
        assert_eq!(cfg.auth.token_ttl_hours, 8);
        assert_eq!(cfg.upload.max_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn parse_partial_toml_keeps_defaults() {
        let cfg = parse(
            r#"
            [server]
            host = "0.0.0.0"
            port = 8080

            [storage]
            backend = "memory"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.bind_addr(), "0.0.0.0:8080");
        assert_eq!(cfg.storage.backend, StorageBackend::Memory);
        assert_eq!(cfg.storage.uploads_dir, "uploads");
        assert_eq!(cfg.auth.jwt_secret, "your-secret-key");
    }

    #[test]
    fn env_overrides_apply() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("SERVER_PORT", "9000"),
            ("STORAGE_BACKEND", "mock"),
            ("JWT_SECRET", "s3cret"),
            ("DATA_DIR", "/tmp/site-data"),
        ]);
        let mut cfg = AppConfig::default();
        cfg.apply_env(|k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.storage.backend, StorageBackend::Memory);
        assert_eq!(cfg.auth.jwt_secret, "s3cret");
        assert_eq!(cfg.storage.data_dir, "/tmp/site-data");
    }

    #[test]
    fn invalid_values_rejected() {
        let mut cfg = AppConfig::default();
        assert!(cfg.apply_env(|k| (k == "SERVER_PORT").then(|| "nope".to_string())).is_err());

        let mut cfg = AppConfig::default();
        cfg.auth.token_ttl_hours = 0;
        assert!(cfg.normalize_and_validate().is_err());

        let mut cfg = AppConfig::default();
        cfg.server.port = 0;
        assert!(cfg.normalize_and_validate().is_err());
    }
}
