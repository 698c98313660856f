pub mod apply;
pub mod iterations;
pub mod list;
pub mod show;
pub mod validate;

use anyhow::Context;
use crusado_core::config::{Config, RemoteConfig};
use crusado_core::{AzureDevOps, TemplateSet};

pub(crate) fn load_templates(config: &Config) -> anyhow::Result<TemplateSet> {
    let dir = &config.templates_dir;
    TemplateSet::load(dir)
        .with_context(|| format!("failed to load templates from '{}'", dir.display()))
}

pub(crate) fn connect(config: &Config) -> anyhow::Result<(AzureDevOps, RemoteConfig)> {
    let remote = config.require_remote()?;
    let client = AzureDevOps::new(&remote).context("failed to set up the azure devops client")?;
    Ok((client, remote))
}
