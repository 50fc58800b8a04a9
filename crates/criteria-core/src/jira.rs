use crate::config::TrackerConfig;
use crate::error::{CriteriaError, Result};
use crate::tracker::{document_to_text, text_to_document, Issue, IssueTracker, TrackerUser};
use chrono::{DateTime, Utc};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const ISSUE_EXPAND: &str = "names,schema,operations,editmeta,changelog,renderedFields";

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct IssueResponse {
    key: String,
    fields: IssueFields,
}

#[derive(Debug, Deserialize)]
struct IssueFields {
    #[serde(default)]
    summary: String,
    #[serde(default)]
    description: Value,
    #[serde(default)]
    issuetype: Option<Named>,
    #[serde(default)]
    status: Option<Named>,
    #[serde(default)]
    priority: Option<Named>,
    #[serde(default)]
    assignee: Option<Person>,
    #[serde(default)]
    reporter: Option<Person>,
    #[serde(default)]
    created: Option<String>,
    #[serde(default)]
    updated: Option<String>,
    /// Story points live in a custom field on most cloud instances.
    #[serde(default)]
    customfield_10016: Option<f64>,
    #[serde(default)]
    labels: Vec<String>,
    #[serde(default)]
    components: Vec<Named>,
}

#[derive(Debug, Deserialize)]
struct Named {
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Person {
    display_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MyselfResponse {
    account_id: String,
    display_name: String,
    #[serde(default)]
    email_address: Option<String>,
    #[serde(default)]
    avatar_urls: std::collections::HashMap<String, String>,
}

// ---------------------------------------------------------------------------
// JiraClient
// ---------------------------------------------------------------------------

/// Blocking client for the Jira Cloud REST API v3 using basic auth.
pub struct JiraClient {
    http: Client,
    api_base: String,
    instance: String,
    user_email: String,
    api_token: String,
}

impl JiraClient {
    pub fn new(
        base_url: impl Into<String>,
        user_email: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Result<Self> {
        let base_url = base_url.into();
        let base = base_url.trim_end_matches('/');
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            api_base: format!("{base}/rest/api/3"),
            instance: instance_host(base).to_string(),
            user_email: user_email.into(),
            api_token: api_token.into(),
        })
    }

    pub fn from_config(cfg: &TrackerConfig) -> Result<Self> {
        match (&cfg.base_url, &cfg.user_email, &cfg.api_token) {
            (Some(url), Some(email), Some(token)) => Self::new(url, email, token),
            _ => Err(CriteriaError::MissingConfig(
                "tracker.base_url, tracker.user_email and tracker.api_token".to_string(),
            )),
        }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.api_base, path))
            .basic_auth(&self.user_email, Some(&self.api_token))
            .header("Accept", "application/json")
    }

    /// Send and map tracker status codes onto domain errors.
    fn send(&self, req: RequestBuilder, key: &str) -> Result<Response> {
        let resp = req.send()?;
        let status = resp.status();
        tracing::info!(%status, key, "tracker response");
        match status {
            s if s.is_success() => Ok(resp),
            StatusCode::UNAUTHORIZED => Err(CriteriaError::Unauthorized),
            StatusCode::FORBIDDEN => Err(CriteriaError::Forbidden(key.to_string())),
            StatusCode::NOT_FOUND => Err(CriteriaError::IssueNotFound(key.to_string())),
            s => {
                let body = resp.text().unwrap_or_default();
                Err(CriteriaError::Tracker(format!("HTTP {s}: {body}")))
            }
        }
    }
}

impl IssueTracker for JiraClient {
    fn fetch_issue(&self, key: &str) -> Result<Issue> {
        tracing::info!(key, "fetching issue");
        let req = self
            .request(reqwest::Method::GET, &format!("/issue/{key}"))
            .query(&[("expand", ISSUE_EXPAND)]);
        let raw: IssueResponse = self.send(req, key)?.json()?;
        Ok(issue_from_response(raw))
    }

    fn update_description(&self, key: &str, description: &str) -> Result<()> {
        tracing::info!(key, len = description.len(), "updating description");
        let body = json!({ "fields": { "description": text_to_document(description) } });
        let req = self
            .request(reqwest::Method::PUT, &format!("/issue/{key}"))
            .json(&body);
        self.send(req, key)?;
        Ok(())
    }

    fn add_comment(&self, key: &str, body: &str) -> Result<()> {
        tracing::info!(key, "adding comment");
        let payload = json!({ "body": text_to_document(body) });
        let req = self
            .request(reqwest::Method::POST, &format!("/issue/{key}/comment"))
            .json(&payload);
        self.send(req, key)?;
        Ok(())
    }

    fn current_user(&self) -> Result<TrackerUser> {
        let req = self.request(reqwest::Method::GET, "/myself");
        let me: MyselfResponse = self.send(req, "myself")?.json()?;
        Ok(TrackerUser {
            id: me.account_id,
            name: me.display_name,
            email: me.email_address,
            avatar: me.avatar_urls.get("32x32").cloned(),
            instance: self.instance.clone(),
        })
    }
}

fn issue_from_response(raw: IssueResponse) -> Issue {
    let fields = raw.fields;
    let mut issue = Issue::new(raw.key, fields.summary, document_to_text(&fields.description));
    issue.issue_type = fields.issuetype.map(|n| n.name).unwrap_or_default();
    issue.status = fields.status.map(|n| n.name).unwrap_or_default();
    if let Some(p) = fields.priority {
        issue.priority = p.name;
    }
    issue.assignee = fields.assignee.map(|p| p.display_name);
    issue.reporter = fields.reporter.map(|p| p.display_name);
    issue.created = fields.created.as_deref().and_then(parse_tracker_time);
    issue.updated = fields.updated.as_deref().and_then(parse_tracker_time);
    issue.story_points = fields.customfield_10016.unwrap_or(0.0);
    issue.labels = fields.labels;
    issue.components = fields.components.into_iter().map(|c| c.name).collect();
    issue
}

/// Tracker timestamps look like `2024-01-15T10:30:00.000+0000`.
fn parse_tracker_time(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%z")
        .or_else(|_| DateTime::parse_from_rfc3339(s))
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

fn instance_host(base: &str) -> &str {
    let without_scheme = base.split_once("://").map_or(base, |(_, rest)| rest);
    without_scheme.split('/').next().unwrap_or(without_scheme)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
