use crate::error::{CrusadoError, Result};
use std::path::PathBuf;

pub const ORG_URL_ENV: &str = "AZURE_ORG_URL";
pub const TOKEN_ENV: &str = "AZURE_PAT";
pub const PROJECT_ENV: &str = "AZURE_PROJECT_NAME";
pub const TEAM_ENV: &str = "AZURE_TEAM_NAME";
pub const TEMPLATES_DIR_ENV: &str = "CRUSADO_TEMPLATES_DIR";

pub const DEFAULT_TEMPLATES_DIR: &str = "templates";

/// Settings for one invocation, resolved once from flags and environment.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub organization_url: Option<String>,
    pub personal_access_token: Option<String>,
    pub project: Option<String>,
    /// Team whose iterations are used. The project's default team when unset.
    pub team: Option<String>,
    pub templates_dir: PathBuf,
}

/// The subset of [`Config`] needed to talk to Azure DevOps.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub organization_url: String,
    pub personal_access_token: String,
    pub project: String,
    pub team: Option<String>,
}

impl RemoteConfig {
    /// New work items land in the area named after the project.
    pub fn area_path(&self) -> &str {
        &self.project
    }
}

impl Config {
    /// Check that every remote setting is present and non-empty.
    pub fn require_remote(&self) -> Result<RemoteConfig> {
        Ok(RemoteConfig {
            organization_url: required(&self.organization_url, ORG_URL_ENV)?,
            personal_access_token: required(&self.personal_access_token, TOKEN_ENV)?,
            project: required(&self.project, PROJECT_ENV)?,
            team: self.team.clone().filter(|t| !t.trim().is_empty()),
        })
    }
}

fn required(value: &Option<String>, env: &'static str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(CrusadoError::MissingConfig(env)),
    }
}
