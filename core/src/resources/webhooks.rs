//! Webhook subscriptions.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::client::HostexClient;
use crate::context::CallContext;
use crate::error::HostexError;
use crate::http::HttpMethod;
use crate::resources::endpoint;
use crate::transport::Transport;
use crate::types::Webhook;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Webhooks {
    #[serde(default)]
    pub webhooks: Vec<Webhook>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedWebhook {
    pub webhook: Webhook,
}

impl<T: Transport> HostexClient<T> {
    pub async fn list_webhooks(&self, ctx: &CallContext) -> Result<Webhooks, HostexError> {
        self.request(ctx, HttpMethod::Get, "/webhooks", None, None::<&()>)
            .await
    }

    pub async fn create_webhook(
        &self,
        ctx: &CallContext,
        url: &str,
    ) -> Result<CreatedWebhook, HostexError> {
        let body = json!({ "url": url });
        self.request(ctx, HttpMethod::Post, "/webhooks", None, Some(&body))
            .await
    }

    pub async fn delete_webhook(&self, ctx: &CallContext, webhook_id: u64) -> Result<(), HostexError> {
        let path = endpoint(&["webhooks", &webhook_id.to_string()])?;
        self.request_empty(ctx, HttpMethod::Delete, &path, None, None::<&()>)
            .await
    }
}
