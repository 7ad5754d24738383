//! Service configuration.
//!
//! Settings come from an optional TOML file and are overridden by environment
//! variables. The file is named by `STEWARD_CONFIG`; without it `steward.toml`
//! in the working directory is used when present.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [github]
//! app_id = 12345
//! private_key_path = "/run/secrets/steward.pem"
//! webhook_secret = "..."
//!
//! [sweep]
//! interval_secs = 86400
//!
//! [bot]
//! bot_login = "repo-steward[bot]"
//!
//! [bot.commit_message]
//! convention = "conventional"
//! ```

use repo_steward_core::BotSettings;
use secrecy::SecretString;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::DEFAULT_PORT;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Config file used when `STEWARD_CONFIG` is not set.
pub const DEFAULT_CONFIG_FILE: &str = "steward.toml";

/// One day.
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 86_400;

/// Errors raised while loading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse the configuration file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value '{value}' for {name}")]
    InvalidValue { name: &'static str, value: String },

    #[error(
        "No GitHub credentials configured. Set GITHUB_TOKEN or GITHUB_APP_ID with \
         GITHUB_APP_PRIVATE_KEY or GITHUB_APP_PRIVATE_KEY_PATH"
    )]
    MissingCredentials,
}

/// Address the HTTP server binds to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// How the service authenticates against GitHub.
#[derive(Debug)]
pub enum Credentials {
    /// Personal access token or a pre-issued installation token.
    Token(SecretString),

    /// GitHub App. Every event and sweep uses a token of the installation it
    /// belongs to.
    App {
        app_id: u64,
        private_key: SecretString,
    },
}

/// Periodic sweep settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepConfig {
    /// Seconds between sweeps. Zero disables the scheduler.
    pub interval_secs: u64,

    /// Repositories (`owner/repo`) swept when authenticating with a token.
    /// GitHub App deployments sweep every installed repository instead.
    pub repositories: Vec<String>,
}

impl SweepConfig {
    /// Returns the sweep period, or `None` when sweeps are disabled.
    pub fn interval(&self) -> Option<Duration> {
        (self.interval_secs > 0).then(|| Duration::from_secs(self.interval_secs))
    }
}

/// The complete service configuration.
#[derive(Debug)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub webhook_secret: Option<SecretString>,
    pub credentials: Credentials,
    pub sweep: SweepConfig,
    pub bot: BotSettings,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    server: ServerConfig,
    github: GitHubSection,
    sweep: SweepSection,
    bot: BotSettings,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct GitHubSection {
    webhook_secret: Option<String>,
    token: Option<String>,
    app_id: Option<u64>,
    private_key: Option<String>,
    private_key_path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SweepSection {
    interval_secs: Option<u64>,
    repositories: Vec<String>,
}

impl AppConfig {
    /// Loads the configuration from the process environment and the config file.
    pub fn load() -> Result<Self, ConfigError> {
        let lookup = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

        let file_text = match lookup("STEWARD_CONFIG") {
            Some(path) => Some(read_file(Path::new(&path))?),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Some(read_file(default)?)
                } else {
                    None
                }
            }
        };

        Self::from_sources(file_text.as_deref(), lookup)
    }

    /// Builds the configuration from the text of a config file and an
    /// environment lookup. Environment values take precedence.
    pub fn from_sources<F>(file_text: Option<&str>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file: FileConfig = match file_text {
            Some(text) => toml::from_str(text)?,
            None => FileConfig::default(),
        };

        let mut server = file.server;
        if let Some(host) = env("API_HOST") {
            server.host = host;
        }
        if let Some(port) = env("API_PORT") {
            server.port = parse_number("API_PORT", &port)?;
        }

        let mut github = file.github;
        let webhook_secret = env("GITHUB_WEBHOOK_SECRET")
            .or(github.webhook_secret.take())
            .map(SecretString::from);
        let credentials = resolve_credentials(github, &env)?;

        let interval_secs = match env("SWEEP_INTERVAL_SECS") {
            Some(value) => parse_number("SWEEP_INTERVAL_SECS", &value)?,
            None => file
                .sweep
                .interval_secs
                .unwrap_or(DEFAULT_SWEEP_INTERVAL_SECS),
        };
        let repositories = match env("SWEEP_REPOSITORIES") {
            Some(list) => split_list(&list),
            None => file.sweep.repositories,
        };
        for repo in &repositories {
            if repo.parse::<github_client::RepoRef>().is_err() {
                return Err(ConfigError::InvalidValue {
                    name: "SWEEP_REPOSITORIES",
                    value: repo.clone(),
                });
            }
        }

        let mut bot = file.bot;
        if let Some(login) = env("BOT_LOGIN") {
            bot.bot_login = login;
        }

        Ok(Self {
            server,
            webhook_secret,
            credentials,
            sweep: SweepConfig {
                interval_secs,
                repositories,
            },
            bot,
        })
    }
}

/// App credentials win over a token when both are configured.
fn resolve_credentials<F>(github: GitHubSection, env: &F) -> Result<Credentials, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let app_id = match env("GITHUB_APP_ID") {
        Some(value) => Some(parse_number("GITHUB_APP_ID", &value)?),
        None => github.app_id,
    };

    if let Some(app_id) = app_id {
        let private_key = match env("GITHUB_APP_PRIVATE_KEY").or(github.private_key) {
            Some(key) => Some(key),
            None => match env("GITHUB_APP_PRIVATE_KEY_PATH")
                .map(PathBuf::from)
                .or(github.private_key_path)
            {
                Some(path) => Some(read_file(&path)?),
                None => None,
            },
        };

        if let Some(key) = private_key {
            // Keys passed through the environment often have escaped newlines.
            let key = key.replace("\\n", "\n");
            return Ok(Credentials::App {
                app_id,
                private_key: SecretString::from(key),
            });
        }
    }

    env("GITHUB_TOKEN")
        .or(github.token)
        .map(|token| Credentials::Token(SecretString::from(token)))
        .ok_or(ConfigError::MissingCredentials)
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_number<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name,
        value: value.to_string(),
    })
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
