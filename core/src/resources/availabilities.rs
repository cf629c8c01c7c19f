//! Property availability.

use serde::{Deserialize, Serialize};

use crate::client::HostexClient;
use crate::context::CallContext;
use crate::error::HostexError;
use crate::http::HttpMethod;
use crate::query::Query;
use crate::transport::Transport;
use crate::types::{Availability, UpdateAvailabilities};

/// All three fields are required by the API. `property_ids` is sent as a
/// comma-separated list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListAvailabilitiesParams {
    pub property_ids: Vec<u64>,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availabilities {
    #[serde(default)]
    pub listings: Vec<ListingAvailability>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingAvailability {
    pub id: u64,
    #[serde(default)]
    pub channel_type: String,
    #[serde(default)]
    pub listing_id: String,
    #[serde(default)]
    pub availabilities: Vec<Availability>,
}

impl<T: Transport> HostexClient<T> {
    pub async fn list_availabilities(
        &self,
        ctx: &CallContext,
        params: &ListAvailabilitiesParams,
    ) -> Result<Availabilities, HostexError> {
        let query = Query::from_params(params)?;
        self.request(ctx, HttpMethod::Get, "/availabilities", Some(&query), None::<&()>)
            .await
    }

    pub async fn update_availabilities(
        &self,
        ctx: &CallContext,
        data: &UpdateAvailabilities,
    ) -> Result<(), HostexError> {
        self.request_empty(ctx, HttpMethod::Post, "/availabilities", None, Some(data))
            .await
    }
}
