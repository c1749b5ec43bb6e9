//! Recent public GitHub activity
//!
//! Lists the user's most recently pushed public repositories.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::time::Duration;

use ns_core::{ContextFetcher, DomainResult};
use ns_shared::config::GitHubConfig;

use crate::http::{build_client, read_body};
use crate::InfrastructureError;

const PROVIDER: &str = "GitHub";
const DEFAULT_BASE_URL: &str = "https://api.github.com";
const REPO_LIMIT: usize = 5;

#[derive(Debug, Deserialize)]
struct Repo {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    fork: bool,
    #[serde(default)]
    archived: bool,
    #[serde(default)]
    stargazers_count: u64,
    pushed_at: Option<DateTime<Utc>>,
}

/// Render the repository list as a short bullet list
pub(crate) fn summarize_repos(body: &str) -> Result<String, InfrastructureError> {
    let repos: Vec<Repo> =
        serde_json::from_str(body).map_err(|e| InfrastructureError::parse(PROVIDER, e.to_string()))?;

    let lines: Vec<String> = repos
        .into_iter()
        .filter(|r| !r.fork && !r.archived)
        .take(REPO_LIMIT)
        .map(|r| {
            let mut line = format!("- {}", r.name);
            if let Some(description) = r.description.filter(|d| !d.trim().is_empty()) {
                line.push_str(&format!(": {}", description.trim()));
            }
            let mut meta = Vec::new();
            if let Some(language) = r.language {
                meta.push(language);
            }
            if r.stargazers_count > 0 {
                meta.push(format!("{} stars", r.stargazers_count));
            }
            if let Some(pushed) = r.pushed_at {
                meta.push(format!("updated {}", pushed.format("%Y-%m-%d")));
            }
            if !meta.is_empty() {
                line.push_str(&format!(" ({})", meta.join(", ")));
            }
            line
        })
        .collect();

    if lines.is_empty() {
        return Err(InfrastructureError::parse(PROVIDER, "no public repositories"));
    }
    Ok(format!("Recently active projects:\n{}", lines.join("\n")))
}

pub struct GitHubActivityFetcher {
    client: reqwest::Client,
    username: Option<String>,
    token: Option<String>,
    base_url: String,
}

impl GitHubActivityFetcher {
    pub fn new(config: &GitHubConfig, timeout: Duration) -> Result<Self, InfrastructureError> {
        Ok(Self {
            client: build_client(timeout)?,
            username: config.username.clone(),
            token: config.token.clone(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn fetch_repos(&self) -> Result<String, InfrastructureError> {
        let username = self
            .username
            .as_deref()
            .ok_or_else(|| InfrastructureError::Config("GITHUB_USERNAME is not set".to_string()))?;

        let mut request = self
            .client
            .get(format!("{}/users/{}/repos", self.base_url, username))
            .query(&[("sort", "pushed"), ("per_page", "20")])
            .header(reqwest::header::ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| InfrastructureError::request(PROVIDER, e))?;
        let body = read_body(PROVIDER, response).await?;
        summarize_repos(&body)
    }
}

#[async_trait]
impl ContextFetcher for GitHubActivityFetcher {
    fn source(&self) -> &str {
        "github"
    }

    async fn fetch(&self) -> DomainResult<String> {
        Ok(self.fetch_repos().await?)
    }

    fn fallback(&self) -> String {
        match &self.username {
            Some(username) => format!(
                "We ship client and open-source work continuously. See https://github.com/{} for recent projects.",
                username
            ),
            None => "We ship client and open-source work continuously.".to_string(),
        }
    }
}
