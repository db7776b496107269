use crate::config::{Config, Credential};
use crate::error::{FetchError, OrgReposError, Resource, Result};
use crate::github::OrgSource;
use async_trait::async_trait;
use octocrab::service::middleware::retry::RetryConfig;
use octocrab::Octocrab;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

pub struct GithubClient {
    octocrab: Octocrab,
}

#[derive(Debug, Deserialize)]
pub struct OrgInfo {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub struct RepoInfo {
    pub name: String,
}

impl GithubClient {
    /// Without a credential the client sends no Authorization header and the
    /// upstream rejects requests with 401.
    pub fn new(credential: Option<&Credential>, config: &Config) -> Result<Self> {
        let timeout = config.timeout();
        let mut builder = Octocrab::builder()
            .base_uri(config.base_url())
            .map_err(|e| OrgReposError::Config(format!("Invalid API base URL: {e}")))?
            .set_connect_timeout(Some(timeout))
            .set_read_timeout(Some(timeout))
            .add_retry_config(RetryConfig::None);

        if let Some(credential) = credential {
            builder = builder.personal_token(credential.expose().to_string());
        }

        let octocrab = builder
            .build()
            .map_err(|e| OrgReposError::GitHub(e.to_string()))?;
        Ok(Self { octocrab })
    }

    /// Single GET returning one decoded page. Any non-2xx status is a failure.
    async fn fetch_page<T: DeserializeOwned>(
        &self,
        route: String,
        resource: Resource,
    ) -> std::result::Result<Vec<T>, FetchError> {
        debug!(%route, "GET");
        let response = self
            .octocrab
            ._get(route.as_str())
            .await
            .map_err(|e| FetchError::Transport {
                resource: resource.clone(),
                message: transport_message(&e),
            })?;

        let status = response.status();
        debug!(%route, status = status.as_u16(), "response");
        if !status.is_success() {
            return Err(FetchError::RemoteFetchFailure {
                resource,
                status_code: status.as_u16(),
            });
        }

        let body = self
            .octocrab
            .body_to_string(response)
            .await
            .map_err(|e| FetchError::Transport {
                resource: resource.clone(),
                message: transport_message(&e),
            })?;

        serde_json::from_str(&body).map_err(|e| FetchError::Decode {
            resource,
            message: e.to_string(),
        })
    }
}

/// octocrab's `Display` carries a captured backtrace; keep only the cause chain.
fn transport_message(err: &octocrab::Error) -> String {
    let mut causes = Vec::new();
    let mut next = std::error::Error::source(err);
    while let Some(cause) = next {
        causes.extend(cause.to_string().lines().next().map(str::to_string));
        next = cause.source();
    }
    if causes.is_empty() {
        err.to_string().lines().next().unwrap_or_default().to_string()
    } else {
        causes.join(": ")
    }
}

#[async_trait]
impl OrgSource for GithubClient {
    async fn list_organizations(&self) -> std::result::Result<Vec<String>, FetchError> {
        let orgs: Vec<OrgInfo> = self
            .fetch_page("/user/orgs".to_string(), Resource::Organizations)
            .await?;
        Ok(orgs.into_iter().map(|o| o.login).collect())
    }

    async fn list_repositories(
        &self,
        organization: &str,
    ) -> std::result::Result<Vec<String>, FetchError> {
        let repos: Vec<RepoInfo> = self
            .fetch_page(
                format!("/orgs/{}/repos", urlencoding::encode(organization)),
                Resource::Repositories(organization.to_string()),
            )
            .await?;
        Ok(repos.into_iter().map(|r| r.name).collect())
    }
}
