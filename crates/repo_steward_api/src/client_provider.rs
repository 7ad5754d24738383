//! Builds the GitHub client each event and sweep is handled with.
//!
//! With a token every event shares one client. As a GitHub App the client is
//! authenticated as the installation named in the event payload, and sweeps
//! cover every repository of every installation.

use async_trait::async_trait;
use github_client::{create_app_client, create_token_client, GitHubApi, GitHubClient, RepoRef};
use repo_steward_core::{Event, RepositorySource, StewardResult, SweepTarget};
use secrecy::ExposeSecret;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::config::Credentials;

#[cfg(test)]
#[path = "client_provider_tests.rs"]
mod tests;

/// Supplies the client a webhook event is dispatched with.
#[async_trait]
pub trait ClientSource: Send + Sync {
    async fn client_for(&self, event: &Event) -> Result<Arc<dyn GitHubApi>, github_client::Error>;
}

/// Client provider for the configured credentials.
pub enum ClientProvider {
    Token {
        client: Arc<GitHubClient>,
        repositories: Vec<RepoRef>,
    },
    App {
        app: GitHubClient,
    },
}

impl ClientProvider {
    /// Creates the provider. `repositories` are the sweep targets in token
    /// mode; they are ignored for a GitHub App.
    pub async fn from_credentials(
        credentials: &Credentials,
        repositories: &[String],
    ) -> Result<Self, github_client::Error> {
        match credentials {
            Credentials::Token(token) => {
                let client = GitHubClient::new(create_token_client(token.expose_secret())?);
                let repositories = repositories
                    .iter()
                    .filter_map(|r| r.parse::<RepoRef>().ok())
                    .collect();
                Ok(Self::Token {
                    client: Arc::new(client),
                    repositories,
                })
            }
            Credentials::App {
                app_id,
                private_key,
            } => {
                let octocrab = create_app_client(*app_id, private_key.expose_secret()).await?;
                Ok(Self::App {
                    app: GitHubClient::new(octocrab),
                })
            }
        }
    }
}

/// Reads `installation.id` from a webhook payload.
pub fn installation_id(event: &Event) -> Option<u64> {
    event
        .payload
        .get("installation")
        .and_then(|i| i.get("id"))
        .and_then(|id| id.as_u64())
}

#[async_trait]
impl ClientSource for ClientProvider {
    async fn client_for(&self, event: &Event) -> Result<Arc<dyn GitHubApi>, github_client::Error> {
        match self {
            Self::Token { client, .. } => Ok(client.clone()),
            Self::App { app } => {
                let id = installation_id(event).ok_or_else(|| {
                    github_client::Error::AuthError(
                        "Event does not name the installation it belongs to".to_string(),
                    )
                })?;
                debug!(installation_id = id, "Authenticating as installation");
                Ok(Arc::new(app.for_installation(id).await?))
            }
        }
    }
}

#[async_trait]
impl RepositorySource for ClientProvider {
    #[instrument(skip(self))]
    async fn sweep_targets(&self) -> StewardResult<Vec<SweepTarget>> {
        match self {
            Self::Token {
                client,
                repositories,
            } => Ok(repositories
                .iter()
                .map(|repo| SweepTarget {
                    repo: repo.clone(),
                    github: client.clone(),
                })
                .collect()),
            Self::App { app } => {
                let mut targets = Vec::new();
                for installation in app.list_installations().await? {
                    let client = match app.for_installation(installation.id).await {
                        Ok(client) => Arc::new(client),
                        Err(e) => {
                            warn!(
                                installation_id = installation.id,
                                account = %installation.account.login,
                                error = %e,
                                "Skipping installation in sweep"
                            );
                            continue;
                        }
                    };

                    let repositories = match client.list_installation_repositories().await {
                        Ok(repositories) => repositories,
                        Err(e) => {
                            warn!(
                                installation_id = installation.id,
                                error = %e,
                                "Failed to list installation repositories"
                            );
                            continue;
                        }
                    };

                    info!(
                        installation_id = installation.id,
                        account = %installation.account.login,
                        repositories = repositories.len(),
                        "Collected repositories to sweep"
                    );
                    targets.extend(repositories.iter().map(|r| SweepTarget {
                        repo: r.repo_ref(),
                        github: client.clone() as Arc<dyn GitHubApi>,
                    }));
                }
                Ok(targets)
            }
        }
    }
}
