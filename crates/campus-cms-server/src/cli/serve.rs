//! `campus-cms serve`: run the JSON API.

use std::sync::Arc;

use anyhow::Result;
use campus_cms::{CmsConfig, ContentService};

use crate::rest::{self, AppState};

pub async fn run(config: &CmsConfig, addr: &str) -> Result<()> {
    let service = ContentService::from_config(config)?;
    tracing::info!("Campus CMS server");
    tracing::info!("CMS: {}", config.base_url);
    match config.timeout {
        Some(t) => tracing::info!("Request timeout: {}s", t.as_secs()),
        None => tracing::info!("Request timeout: none"),
    }

    let state = Arc::new(AppState::new(service, config.base_url.clone()));
    rest::start(addr, state).await
}
