use crate::catalog::{Catalog, ReplaceOutcome};
use crate::config::Config;
use crate::errors::RemoteError;
use crate::models::{CompletionEvent, ContentItem};
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

#[derive(Clone)]
pub struct RemoteSync {
    client: Client,
    base_url: String,
    token: String,
}

impl RemoteSync {
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, RemoteError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, RemoteError> {
        Self::new(&config.api_base, &config.api_token, config.remote_timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn fetch_catalog(&self) -> Result<Vec<ContentItem>, RemoteError> {
        let response = self
            .client
            .get(format!("{}/loops", self.base_url))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RemoteError::Status(response.status()));
        }

        let bytes = response.bytes().await?;
        let entries: Vec<Value> = serde_json::from_slice(&bytes)?;
        Ok(decode_loops(entries))
    }

    pub async fn sync_catalog(&self, catalog: &Catalog) -> Option<ReplaceOutcome> {
        match self.fetch_catalog().await {
            Ok(items) => {
                info!(count = items.len(), "loaded loops from remote");
                Some(catalog.replace_all(items).await)
            }
            Err(err) => {
                warn!("failed to fetch loops from remote, using fallback data: {err}");
                None
            }
        }
    }

    pub fn spawn_catalog_sync(&self, catalog: Arc<Catalog>) -> JoinHandle<Option<ReplaceOutcome>> {
        let remote = self.clone();
        tokio::spawn(async move { remote.sync_catalog(&catalog).await })
    }

    pub async fn report_completion(&self, event: CompletionEvent) -> Result<(), RemoteError> {
        let response = self
            .client
            .post(format!("{}/users/guest/loop", self.base_url))
            .bearer_auth(&self.token)
            .json(&event)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RemoteError::Status(response.status()));
        }
        Ok(())
    }

    pub fn spawn_report(&self, event: CompletionEvent) -> JoinHandle<()> {
        let remote = self.clone();
        tokio::spawn(async move {
            match remote.report_completion(event).await {
                Ok(()) => debug!(loop_id = event.loop_id, "recorded loop with remote"),
                Err(err) => warn!("failed to record loop with remote: {err}"),
            }
        })
    }
}

fn decode_loops(entries: Vec<Value>) -> Vec<ContentItem> {
    let total = entries.len();
    let items: Vec<ContentItem> = entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<ContentItem>(entry) {
            Ok(item) => Some(item),
            Err(err) => {
                debug!("skipping loop entry: {err}");
                None
            }
        })
        .collect();
    if items.len() < total {
        debug!(skipped = total - items.len(), "ignored unrecognized loop entries");
    }
    items
}
