mod client;

pub use client::GithubClient;

use crate::error::FetchError;
use async_trait::async_trait;

/// The two read-only listings the report is built from.
#[async_trait]
pub trait OrgSource: Send + Sync {
    /// Logins of the organizations visible to the credential, in upstream order.
    async fn list_organizations(&self) -> Result<Vec<String>, FetchError>;

    /// Names of one organization's repositories, in upstream order.
    async fn list_repositories(&self, organization: &str) -> Result<Vec<String>, FetchError>;
}
