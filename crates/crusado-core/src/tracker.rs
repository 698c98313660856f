//! The remote seam: listing iterations and creating work items in Azure DevOps.

use crate::config::RemoteConfig;
use crate::error::{CrusadoError, Result};
use crate::iteration::{Iteration, IterationScope};
use crate::template::WorkItemType;
use crate::workitems::PatchDocument;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub const API_VERSION: &str = "7.0";

const JSON_PATCH: &str = "application/json-patch+json";

/// Operations crusado needs from the tracking service.
pub trait WorkItemTracker {
    fn list_iterations(&self, scope: IterationScope) -> Result<Vec<Iteration>>;

    /// Create a work item. With `validate_only` the service checks the
    /// document without saving anything.
    fn create_work_item(
        &self,
        kind: WorkItemType,
        document: &PatchDocument,
        validate_only: bool,
    ) -> Result<WorkItem>;
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItemLinks {
    #[serde(default)]
    pub html: Option<Link>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    #[serde(default)]
    pub id: Option<i64>,
    /// REST url of the item, used as the target of parent relations.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(rename = "_links", default)]
    pub links: Option<WorkItemLinks>,
}

impl WorkItem {
    /// Link to the item in the web UI.
    pub fn html_url(&self) -> Option<&str> {
        self.links
            .as_ref()
            .and_then(|l| l.html.as_ref())
            .map(|l| l.href.as_str())
    }
}

#[derive(Deserialize)]
struct ListResponse<T> {
    value: Vec<T>,
}

// ---------------------------------------------------------------------------
// AzureDevOps
// ---------------------------------------------------------------------------

/// Blocking REST client for one Azure DevOps project.
pub struct AzureDevOps {
    http: Client,
    base: Url,
    project: String,
    team: Option<String>,
    token: String,
}

impl AzureDevOps {
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        let base = Url::parse(&config.organization_url)
            .ok()
            .filter(|u| !u.cannot_be_a_base())
            .ok_or_else(|| CrusadoError::InvalidUrl(config.organization_url.clone()))?;

        let http = Client::builder()
            .user_agent(concat!("crusado/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base,
            project: config.project.clone(),
            team: config.team.clone(),
            token: config.personal_access_token.clone(),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| CrusadoError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .push(&self.project)
            .extend(segments);
        url.query_pairs_mut().append_pair("api-version", API_VERSION);
        Ok(url)
    }

    fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.basic_auth("", Some(&self.token)).send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(CrusadoError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }
        Ok(response.json()?)
    }
}

impl WorkItemTracker for AzureDevOps {
    fn list_iterations(&self, scope: IterationScope) -> Result<Vec<Iteration>> {
        let mut segments: Vec<&str> = Vec::with_capacity(5);
        if let Some(team) = &self.team {
            segments.push(team);
        }
        segments.extend(["_apis", "work", "teamsettings", "iterations"]);

        let mut url = self.endpoint(&segments)?;
        if scope == IterationScope::Current {
            url.query_pairs_mut().append_pair("$timeframe", "current");
        }

        tracing::debug!(%url, ?scope, "listing iterations");
        let list: ListResponse<Iteration> = self.send(self.http.get(url))?;
        Ok(list.value)
    }

    fn create_work_item(
        &self,
        kind: WorkItemType,
        document: &PatchDocument,
        validate_only: bool,
    ) -> Result<WorkItem> {
        let type_segment = format!("${}", kind.remote_name());
        let mut url = self.endpoint(&["_apis", "wit", "workitems", type_segment.as_str()])?;
        if validate_only {
            url.query_pairs_mut().append_pair("validateOnly", "true");
        }

        tracing::debug!(%url, %kind, validate_only, "creating work item");
        let request = self
            .http
            .post(url)
            .header(CONTENT_TYPE, JSON_PATCH)
            .body(serde_json::to_vec(document)?);
        self.send(request)
    }
}

/// Azure DevOps reports failures as `{"message": ...}`; fall back to the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}
