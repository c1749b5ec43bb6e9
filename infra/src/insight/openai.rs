//! OpenAI chat-completions client for audit summaries

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use ns_core::{AuditReport, DomainResult, InsightGenerator};
use ns_shared::config::OpenAiConfig;

use crate::http::{build_client, read_body};
use crate::InfrastructureError;

const PROVIDER: &str = "OpenAI";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const MAX_TOKENS: u32 = 300;

const SYSTEM_PROMPT: &str = "You are an SEO consultant at a digital marketing agency. \
Write a short, plain-language summary (3 to 4 sentences) of a website audit for a small \
business owner. Mention the score, the biggest strength and the most important fix. \
Do not invent numbers that are not in the data.";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Facts about the report handed to the model
pub(crate) fn build_prompt(report: &AuditReport) -> String {
    let mut lines = vec![
        format!("Website: {}", report.domain),
        format!("Overall score: {}/100", report.score),
    ];
    if let Some(name) = &report.business_name {
        lines.push(format!("Business: {}", name));
    }
    if let Some(o) = &report.overview {
        lines.push(format!(
            "Organic keywords: {}, estimated monthly organic traffic: {:.0}",
            o.organic_keywords, o.organic_traffic
        ));
    }
    if let Some(b) = &report.backlinks {
        lines.push(format!(
            "Backlinks: {} from {} referring domains (authority {:.0}/100)",
            b.backlinks,
            b.referring_domains,
            b.authority()
        ));
    }
    if let Some(p) = &report.on_page {
        lines.push(format!(
            "Homepage on-page score: {:.0}/100, HTTPS: {}, load time: {}",
            p.onpage_score,
            if p.https { "yes" } else { "no" },
            p.load_time_ms
                .map(|ms| format!("{:.1}s", ms as f64 / 1000.0))
                .unwrap_or_else(|| "unknown".to_string())
        ));
    }
    if let Some(c) = report.competitors.as_ref().and_then(|c| c.first()) {
        lines.push(format!("Top competitor: {}", c.domain));
    }
    if !report.recommendations.is_empty() {
        let titles: Vec<&str> = report
            .recommendations
            .iter()
            .take(5)
            .map(|r| r.title.as_str())
            .collect();
        lines.push(format!("Recommendations: {}", titles.join("; ")));
    }
    if !report.failed_sections.is_empty() {
        let failed: Vec<&str> = report.failed_sections.iter().map(|s| s.as_str()).collect();
        lines.push(format!("Unavailable data: {}", failed.join(", ")));
    }
    lines.join("\n")
}

pub(crate) fn parse_completion(body: &str) -> Result<String, InfrastructureError> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|e| InfrastructureError::parse(PROVIDER, e.to_string()))?;
    response
        .choices
        .into_iter()
        .next()
        .map(|c| c.message.content.trim().to_string())
        .filter(|c| !c.is_empty())
        .ok_or_else(|| InfrastructureError::parse(PROVIDER, "completion has no content"))
}

pub struct OpenAiInsightClient {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl OpenAiInsightClient {
    pub fn new(config: &OpenAiConfig, timeout: Duration) -> Result<Self, InfrastructureError> {
        Ok(Self {
            client: build_client(timeout)?,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn complete(&self, prompt: String) -> Result<String, InfrastructureError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| InfrastructureError::Config("OPENAI_API_KEY is not set".to_string()))?;

        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt,
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: 0.4,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| InfrastructureError::request(PROVIDER, e))?;

        let body = read_body(PROVIDER, response).await?;
        parse_completion(&body)
    }
}

#[async_trait]
impl InsightGenerator for OpenAiInsightClient {
    async fn summarize(&self, report: &AuditReport) -> DomainResult<String> {
        Ok(self.complete(build_prompt(report)).await?)
    }
}
