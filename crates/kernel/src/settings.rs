use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use serde::Deserialize;

const DEFAULT_ENV: &str = "local";
const ENV_VAR_NAME: &str = "CATALOGO_ENV";
const CONFIG_DIR_ENV: &str = "CATALOGO_CONFIG_DIR";
const ENV_PREFIX: &str = "CATALOGO";

/// Bare variables understood by earlier deployments, mapped onto settings keys.
const LEGACY_OVERRIDES: &[(&str, &str)] = &[("PORT", "server.port"), ("HOST_URL", "server.public_url")];

/// Deployment environment the application is running in.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Staging,
    Production,
}

impl Environment {
    fn parse(name: &str) -> anyhow::Result<Self> {
        match name {
            "local" => Ok(Environment::Local),
            "staging" => Ok(Environment::Staging),
            "production" => Ok(Environment::Production),
            other => Err(anyhow!(
                "unsupported environment '{}'; expected local/staging/production",
                other
            )),
        }
    }
}

/// Top-level configuration structure loaded from layered sources.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

impl Settings {
    /// Load configuration by layering `.env`, base file, environment overlay and variables.
    pub fn load() -> anyhow::Result<Self> {
        // Allow missing `.env` files without failing.
        let _ = dotenvy::dotenv();

        let environment = std::env::var(ENV_VAR_NAME).unwrap_or_else(|_| DEFAULT_ENV.to_string());
        let config_dir = match std::env::var(CONFIG_DIR_ENV) {
            Ok(dir) => PathBuf::from(dir),
            // Default to repo root `config` directory.
            Err(_) => std::env::current_dir()
                .context("unable to resolve current directory")?
                .join("config"),
        };

        Self::load_from(&config_dir, &environment)
    }

    /// Load configuration from `config_dir` for the named environment.
    pub fn load_from(config_dir: &Path, environment: &str) -> anyhow::Result<Self> {
        Self::load_with_vars(config_dir, environment, std::env::vars().collect())
    }

    /// Same as [`Settings::load_from`], reading variables from `vars` instead of the process.
    pub fn load_with_vars(
        config_dir: &Path,
        environment: &str,
        vars: config::Map<String, String>,
    ) -> anyhow::Result<Self> {
        let parsed_environment = Environment::parse(environment)?;

        let base_path = config_dir.join("base.toml");
        let environment_path = config_dir.join(format!("{}.toml", environment));

        let mut builder = config::Config::builder()
            .add_source(config::File::from(base_path).required(false))
            .add_source(config::File::from(environment_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .source(Some(vars.clone())),
            );

        // An empty legacy variable counts as unset
        for (variable, key) in LEGACY_OVERRIDES {
            let value = vars.get(*variable).filter(|value| !value.is_empty()).cloned();
            builder = builder
                .set_override_option(*key, value)
                .with_context(|| format!("failed to apply {} override", variable))?;
        }

        let cfg = builder
            .build()
            .with_context(|| "failed to build configuration")?;

        let mut settings: Settings = cfg
            .try_deserialize()
            .with_context(|| "failed to deserialize configuration")?;

        settings.environment = parsed_environment;

        Ok(settings)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "ServerSettings::default_host")]
    pub host: String,
    #[serde(default = "ServerSettings::default_port")]
    pub port: u16,
    #[serde(default = "ServerSettings::default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Externally reachable base URL, advertised in the API description
    #[serde(default = "ServerSettings::default_public_url")]
    pub public_url: String,
}

impl ServerSettings {
    fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    fn default_port() -> u16 {
        8083
    }

    fn default_request_timeout_ms() -> u64 {
        15000
    }

    fn default_public_url() -> String {
        "http://localhost:8083".to_string()
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            request_timeout_ms: Self::default_request_timeout_ms(),
            public_url: Self::default_public_url(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Full connection URL; takes precedence over the individual fields
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "DatabaseSettings::default_host")]
    pub host: String,
    #[serde(default = "DatabaseSettings::default_port")]
    pub port: u16,
    #[serde(default = "DatabaseSettings::default_user")]
    pub user: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "DatabaseSettings::default_name")]
    pub name: String,
}

impl DatabaseSettings {
    fn default_host() -> String {
        "localhost".to_string()
    }

    fn default_port() -> u16 {
        3306
    }

    fn default_user() -> String {
        "root".to_string()
    }

    fn default_name() -> String {
        "biblioteca".to_string()
    }

    /// URL handed to the storage connector.
    pub fn connection_url(&self) -> String {
        if let Some(url) = &self.url {
            return url.clone();
        }

        let user = urlencoding::encode(&self.user);
        let credentials = if self.password.is_empty() {
            user.into_owned()
        } else {
            format!("{}:{}", user, urlencoding::encode(&self.password))
        };

        format!(
            "mysql://{}@{}:{}/{}",
            credentials, self.host, self.port, self.name
        )
    }

    /// Connection target safe to log (no credentials).
    pub fn redacted_target(&self) -> String {
        match &self.url {
            Some(url) => url.split('@').next_back().unwrap_or(url).to_string(),
            None => format!("{}:{}/{}", self.host, self.port, self.name),
        }
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: None,
            host: Self::default_host(),
            port: Self::default_port(),
            user: Self::default_user(),
            password: String::new(),
            name: Self::default_name(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TelemetrySettings {
    #[serde(default)]
    pub log_format: LogFormat,
    /// `EnvFilter` directives; falls back to `RUST_LOG`
    #[serde(default)]
    pub filter: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}
