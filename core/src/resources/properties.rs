//! Properties and room types.

use serde::{Deserialize, Serialize};

use crate::client::HostexClient;
use crate::context::CallContext;
use crate::error::HostexError;
use crate::http::HttpMethod;
use crate::query::Query;
use crate::transport::Transport;
use crate::types::{Property, RoomType};

#[derive(Debug, Clone, Default, Serialize)]
pub struct ListPropertiesParams {
    pub offset: Option<u32>,
    pub limit: Option<u32>,
    /// Restrict the result to a single property.
    pub id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertiesPage {
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ListRoomTypesParams {
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomTypesPage {
    #[serde(default)]
    pub room_types: Vec<RoomType>,
    #[serde(default)]
    pub total: u64,
}

impl<T: Transport> HostexClient<T> {
    pub async fn list_properties(
        &self,
        ctx: &CallContext,
        params: &ListPropertiesParams,
    ) -> Result<PropertiesPage, HostexError> {
        let query = Query::from_params(params)?;
        self.request(ctx, HttpMethod::Get, "/properties", Some(&query), None::<&()>)
            .await
    }

    pub async fn list_room_types(
        &self,
        ctx: &CallContext,
        params: &ListRoomTypesParams,
    ) -> Result<RoomTypesPage, HostexError> {
        let query = Query::from_params(params)?;
        self.request(ctx, HttpMethod::Get, "/room_types", Some(&query), None::<&()>)
            .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::config::ClientConfig;
    use crate::test_support::RecordingTransport;

    fn client(transport: &RecordingTransport) -> HostexClient<RecordingTransport> {
        let config = ClientConfig::new("t").with_base_url("http://localhost:3000");
        HostexClient::with_transport(config, transport.clone()).unwrap()
    }

    #[tokio::test]
    async fn list_properties_sends_only_set_params() {
        let transport = RecordingTransport::ok(json!({
            "properties": [{"id": 7, "title": "Loft", "channels": [{"channel_type": "airbnb", "listing_id": "A1"}]}],
            "total": 1
        }));
        let params = ListPropertiesParams {
            limit: Some(1),
            ..Default::default()
        };
        let page = client(&transport)
            .list_properties(&CallContext::default(), &params)
            .await
            .unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.properties[0].channels[0].listing_id, "A1");
        let sent = transport.last();
        assert_eq!(sent.method, HttpMethod::Get);
        assert_eq!(sent.url, "http://localhost:3000/properties?limit=1");
    }

    #[tokio::test]
    async fn property_id_zero_is_sent() {
        let transport = RecordingTransport::ok(json!({"properties": [], "total": 0}));
        let params = ListPropertiesParams {
            id: Some(0),
            ..Default::default()
        };
        client(&transport)
            .list_properties(&CallContext::default(), &params)
            .await
            .unwrap();
        assert_eq!(transport.last().url, "http://localhost:3000/properties?id=0");
    }

    #[tokio::test]
    async fn list_room_types_decodes_page() {
        let transport = RecordingTransport::ok(json!({
            "room_types": [{"id": 3, "title": "Twin", "properties": [{"id": 7, "title": "Loft"}]}],
            "total": 1
        }));
        let page = client(&transport)
            .list_room_types(&CallContext::default(), &ListRoomTypesParams::default())
            .await
            .unwrap();
        assert_eq!(page.room_types[0].properties[0].id, 7);
        assert_eq!(transport.last().url, "http://localhost:3000/room_types");
    }
}
