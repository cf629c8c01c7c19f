//! Guest conversations.

use serde::{Deserialize, Serialize};

use crate::client::HostexClient;
use crate::context::CallContext;
use crate::error::HostexError;
use crate::http::HttpMethod;
use crate::query::Query;
use crate::resources::endpoint;
use crate::transport::Transport;
use crate::types::{Conversation, Guest, Message, SendMessage};

/// The API requires both values; unset ones fall back to these.
const DEFAULT_OFFSET: u32 = 0;
const DEFAULT_LIMIT: u32 = 20;

#[derive(Debug, Clone, Default)]
pub struct ListConversationsParams {
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationsPage {
    #[serde(default)]
    pub conversations: Vec<Conversation>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationDetails {
    #[serde(default)]
    pub guest: Guest,
    #[serde(default)]
    pub channel_type: String,
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl<T: Transport> HostexClient<T> {
    pub async fn list_conversations(
        &self,
        ctx: &CallContext,
        params: &ListConversationsParams,
    ) -> Result<ConversationsPage, HostexError> {
        let query = Query::new()
            .with("offset", params.offset.unwrap_or(DEFAULT_OFFSET).to_string())
            .with("limit", params.limit.unwrap_or(DEFAULT_LIMIT).to_string());
        self.request(ctx, HttpMethod::Get, "/conversations", Some(&query), None::<&()>)
            .await
    }

    pub async fn get_conversation(
        &self,
        ctx: &CallContext,
        conversation_id: &str,
    ) -> Result<ConversationDetails, HostexError> {
        let path = endpoint(&["conversations", conversation_id])?;
        self.request(ctx, HttpMethod::Get, &path, None, None::<&()>)
            .await
    }

    pub async fn send_message(
        &self,
        ctx: &CallContext,
        conversation_id: &str,
        message: &SendMessage,
    ) -> Result<(), HostexError> {
        let path = endpoint(&["conversations", conversation_id])?;
        self.request_empty(ctx, HttpMethod::Post, &path, None, Some(message))
            .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::config::ClientConfig;
    use crate::test_support::RecordingTransport;
    use crate::types::SenderRole;

    fn client(transport: &RecordingTransport) -> HostexClient<RecordingTransport> {
        let config = ClientConfig::new("t").with_base_url("http://localhost:3000");
        HostexClient::with_transport(config, transport.clone()).unwrap()
    }

    #[tokio::test]
    async fn list_conversations_always_sends_offset_and_limit() {
        let transport = RecordingTransport::ok(json!({"conversations": [], "total": 0}));
        client(&transport)
            .list_conversations(&CallContext::default(), &ListConversationsParams::default())
            .await
            .unwrap();
        assert_eq!(
            transport.last().url,
            "http://localhost:3000/conversations?offset=0&limit=20"
        );
    }

    #[tokio::test]
    async fn get_conversation_decodes_messages() {
        let transport = RecordingTransport::ok(json!({
            "guest": {"name": "Ada"},
            "channel_type": "airbnb",
            "messages": [
                {"id": "m1", "sender_role": "guest", "content": "Hi", "created_at": "2024-06-01T08:00:00Z"},
                {"id": "m2", "sender_role": "host", "content": "Welcome"}
            ]
        }));
        let details = client(&transport)
            .get_conversation(&CallContext::default(), "c-1")
            .await
            .unwrap();
        assert_eq!(details.guest.name.as_deref(), Some("Ada"));
        assert_eq!(details.messages[1].sender_role, SenderRole::Host);
        assert_eq!(transport.last().url, "http://localhost:3000/conversations/c-1");
    }

    #[tokio::test]
    async fn send_message_posts_text() {
        let transport = RecordingTransport::ok(serde_json::Value::Null);
        client(&transport)
            .send_message(&CallContext::default(), "c-1", &SendMessage::text("See you soon"))
            .await
            .unwrap();
        let sent = transport.last();
        assert_eq!(sent.method, HttpMethod::Post);
        assert_eq!(sent.body.as_deref(), Some(r#"{"message":"See you soon"}"#));
    }
}
