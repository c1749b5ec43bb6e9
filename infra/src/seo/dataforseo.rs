//! DataForSEO client
//!
//! Every call is a `POST` of a one-element task array to a live endpoint.
//! Responses wrap the payload as `tasks[0].result[0]`; a task-level
//! `status_code` other than 20000 is an error even when HTTP says 200.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;

use ns_core::{
    BacklinkSummary, Competitor, DomainOverview, DomainResult, OnPageResult, RankedKeyword,
    SeoDataProvider,
};
use ns_shared::config::DataForSeoConfig;

use crate::http::{build_client, read_body};
use crate::InfrastructureError;

const PROVIDER: &str = "DataForSEO";
const DEFAULT_BASE_URL: &str = "https://api.dataforseo.com/v3";
const TASK_OK: i64 = 20000;

pub(crate) const DOMAIN_OVERVIEW_PATH: &str = "dataforseo_labs/google/domain_rank_overview/live";
pub(crate) const BACKLINKS_SUMMARY_PATH: &str = "backlinks/summary/live";
pub(crate) const RANKED_KEYWORDS_PATH: &str = "dataforseo_labs/google/ranked_keywords/live";
pub(crate) const ON_PAGE_PATH: &str = "on_page/instant_pages";
pub(crate) const COMPETITORS_PATH: &str = "dataforseo_labs/google/competitors_domain/live";

/// `tasks[0].result[0]`, after checking the task status
pub(crate) fn task_result(body: &Value) -> Result<&Value, InfrastructureError> {
    let task = body
        .pointer("/tasks/0")
        .ok_or_else(|| InfrastructureError::parse(PROVIDER, "response has no tasks"))?;

    let status = task.get("status_code").and_then(Value::as_i64).unwrap_or_default();
    if status != TASK_OK {
        let message = task
            .get("status_message")
            .and_then(Value::as_str)
            .unwrap_or("unknown task error");
        return Err(InfrastructureError::provider(
            PROVIDER,
            format!("task failed ({}): {}", status, message),
        ));
    }

    task.pointer("/result/0")
        .filter(|v| !v.is_null())
        .ok_or_else(|| InfrastructureError::parse(PROVIDER, "task has no result"))
}

fn u64_at(value: &Value, pointer: &str) -> u64 {
    value
        .pointer(pointer)
        .and_then(|v| v.as_u64().or_else(|| v.as_f64().map(|f| f.max(0.0) as u64)))
        .unwrap_or_default()
}

fn f64_at(value: &Value, pointer: &str) -> f64 {
    value.pointer(pointer).and_then(Value::as_f64).unwrap_or_default()
}

fn str_at(value: &Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

fn items(result: &Value) -> &[Value] {
    result
        .get("items")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

pub(crate) fn parse_domain_overview(body: &Value) -> Result<DomainOverview, InfrastructureError> {
    let result = task_result(body)?;
    // A domain with no rankings comes back with an empty item list
    let Some(item) = items(result).first() else {
        return Ok(DomainOverview::default());
    };
    Ok(DomainOverview {
        organic_keywords: u64_at(item, "/metrics/organic/count"),
        organic_traffic: f64_at(item, "/metrics/organic/etv"),
        organic_traffic_cost: f64_at(item, "/metrics/organic/estimated_paid_traffic_cost"),
        paid_keywords: u64_at(item, "/metrics/paid/count"),
    })
}

pub(crate) fn parse_backlinks_summary(body: &Value) -> Result<BacklinkSummary, InfrastructureError> {
    let result = task_result(body)?;
    Ok(BacklinkSummary {
        rank: u64_at(result, "/rank").min(u64::from(u32::MAX)) as u32,
        backlinks: u64_at(result, "/backlinks"),
        referring_domains: u64_at(result, "/referring_domains"),
        broken_backlinks: u64_at(result, "/broken_backlinks"),
    })
}

pub(crate) fn parse_ranked_keywords(body: &Value) -> Result<Vec<RankedKeyword>, InfrastructureError> {
    let result = task_result(body)?;
    Ok(items(result)
        .iter()
        .filter_map(|item| {
            let keyword = str_at(item, "/keyword_data/keyword")?;
            Some(RankedKeyword {
                keyword,
                position: u64_at(item, "/ranked_serp_element/serp_item/rank_group") as u32,
                search_volume: u64_at(item, "/keyword_data/keyword_info/search_volume"),
                url: str_at(item, "/ranked_serp_element/serp_item/url"),
            })
        })
        .collect())
}

pub(crate) fn parse_on_page(body: &Value, url: &str) -> Result<OnPageResult, InfrastructureError> {
    let result = task_result(body)?;
    let page = items(result)
        .first()
        .ok_or_else(|| InfrastructureError::parse(PROVIDER, "on-page result has no items"))?;

    let https = page
        .pointer("/checks/is_https")
        .and_then(Value::as_bool)
        .unwrap_or_else(|| url.starts_with("https://"));
    let missing_alt = page
        .pointer("/checks/no_image_alt")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    Ok(OnPageResult {
        onpage_score: f64_at(page, "/onpage_score"),
        status_code: page
            .get("status_code")
            .and_then(Value::as_u64)
            .and_then(|c| u16::try_from(c).ok()),
        title: str_at(page, "/meta/title"),
        meta_description: str_at(page, "/meta/description"),
        h1_count: page
            .pointer("/meta/htags/h1")
            .and_then(Value::as_array)
            .map(|h| h.len() as u32)
            .unwrap_or_default(),
        word_count: u64_at(page, "/meta/content/plain_text_word_count"),
        images_without_alt: u32::from(missing_alt),
        https,
        load_time_ms: page
            .pointer("/page_timing/duration_time")
            .and_then(|v| v.as_u64().or_else(|| v.as_f64().map(|f| f as u64))),
    })
}

pub(crate) fn parse_competitors(body: &Value, target: &str) -> Result<Vec<Competitor>, InfrastructureError> {
    let result = task_result(body)?;
    Ok(items(result)
        .iter()
        .filter_map(|item| {
            let domain = str_at(item, "/domain")?;
            // The target itself is listed among its competitors
            if domain.eq_ignore_ascii_case(target) {
                return None;
            }
            Some(Competitor {
                domain,
                intersections: u64_at(item, "/intersections"),
                organic_traffic: f64_at(item, "/full_domain_metrics/organic/etv"),
            })
        })
        .collect())
}

pub struct DataForSeoClient {
    client: reqwest::Client,
    login: Option<String>,
    password: Option<String>,
    location_code: u32,
    language_code: String,
    base_url: String,
}

impl DataForSeoClient {
    pub fn new(config: &DataForSeoConfig, timeout: Duration) -> Result<Self, InfrastructureError> {
        Ok(Self {
            client: build_client(timeout)?,
            login: config.login.clone(),
            password: config.password.clone(),
            location_code: config.location_code,
            language_code: config.language_code.clone(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Task body with the target plus location and language
    pub(crate) fn localized_task(&self, target: &str, extra: Value) -> Value {
        let mut task = json!({
            "target": target,
            "location_code": self.location_code,
            "language_code": self.language_code,
        });
        if let (Some(fields), Value::Object(extra)) = (task.as_object_mut(), extra) {
            fields.extend(extra);
        }
        json!([task])
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, InfrastructureError> {
        let (login, password) = match (&self.login, &self.password) {
            (Some(login), Some(password)) => (login, password),
            _ => {
                return Err(InfrastructureError::Config(
                    "DATAFORSEO_LOGIN and DATAFORSEO_PASSWORD must be set".to_string(),
                ))
            }
        };

        tracing::debug!(path, "calling DataForSEO");
        let response = self
            .client
            .post(format!("{}/{}", self.base_url, path))
            .basic_auth(login, Some(password))
            .json(&body)
            .send()
            .await
            .map_err(|e| InfrastructureError::request(PROVIDER, e))?;

        let text = read_body(PROVIDER, response).await?;
        serde_json::from_str(&text).map_err(|e| InfrastructureError::parse(PROVIDER, e.to_string()))
    }
}

#[async_trait]
impl SeoDataProvider for DataForSeoClient {
    async fn domain_overview(&self, domain: &str) -> DomainResult<DomainOverview> {
        let body = self
            .post(DOMAIN_OVERVIEW_PATH, self.localized_task(domain, json!({})))
            .await?;
        Ok(parse_domain_overview(&body)?)
    }

    async fn backlinks_summary(&self, domain: &str) -> DomainResult<BacklinkSummary> {
        let task = json!([{ "target": domain, "include_subdomains": true }]);
        let body = self.post(BACKLINKS_SUMMARY_PATH, task).await?;
        Ok(parse_backlinks_summary(&body)?)
    }

    async fn ranked_keywords(&self, domain: &str, limit: u32) -> DomainResult<Vec<RankedKeyword>> {
        let task = self.localized_task(
            domain,
            json!({
                "limit": limit,
                "order_by": ["keyword_data.keyword_info.search_volume,desc"],
            }),
        );
        let body = self.post(RANKED_KEYWORDS_PATH, task).await?;
        Ok(parse_ranked_keywords(&body)?)
    }

    async fn on_page(&self, url: &str) -> DomainResult<OnPageResult> {
        let task = json!([{ "url": url, "enable_javascript": false }]);
        let body = self.post(ON_PAGE_PATH, task).await?;
        Ok(parse_on_page(&body, url)?)
    }

    async fn competitors(&self, domain: &str, limit: u32) -> DomainResult<Vec<Competitor>> {
        // One extra row because the target is in the list
        let task = self.localized_task(
            domain,
            json!({ "limit": limit + 1, "exclude_top_domains": true }),
        );
        let body = self.post(COMPETITORS_PATH, task).await?;
        let mut competitors = parse_competitors(&body, domain)?;
        competitors.truncate(limit as usize);
        Ok(competitors)
    }
}
