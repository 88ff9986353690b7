use serde::Deserialize;

/// Configuration options for the catalog server, loaded from an optional
/// `config.yaml` plus `CATALOG_`-prefixed environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Path of the SQLite database file.
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory receiving uploaded product images, served under `/media`.
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,
    /// Language prefix the bare root redirects to.
    #[serde(default = "default_lang")]
    pub default_lang: String,
    /// Signing key for flash message cookies, at least 32 bytes when set.
    /// A random key is generated when absent.
    #[serde(default)]
    pub secret_key: Option<String>,
}

impl ServerConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("CATALOG"))
            .build()?
            .try_deserialize()
    }
}

fn default_database_url() -> String {
    "catalog.db".to_string()
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_upload_dir() -> String {
    "media".to_string()
}

fn default_lang() -> String {
    "en".to_string()
}
