//! Channel listing calendars: prices, inventories and stay restrictions.

use serde::{Deserialize, Serialize};

use crate::client::HostexClient;
use crate::context::CallContext;
use crate::error::HostexError;
use crate::http::HttpMethod;
use crate::transport::Transport;
use crate::types::{
    ListingCalendarRequest, UpdateListingInventories, UpdateListingPrices,
    UpdateListingRestrictions,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingCalendar {
    #[serde(default)]
    pub listings: Vec<ListingCalendarEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingCalendarEntry {
    pub channel_type: String,
    pub listing_id: String,
    #[serde(default)]
    pub calendar: Vec<CalendarDay>,
}

/// One night on a listing's calendar. Unset values were not reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_stay: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_stay: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_to_arrival: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_to_departure: Option<bool>,
}

impl<T: Transport> HostexClient<T> {
    /// The API takes the listing set in a POST body, not the query string.
    pub async fn get_listing_calendar(
        &self,
        ctx: &CallContext,
        data: &ListingCalendarRequest,
    ) -> Result<ListingCalendar, HostexError> {
        self.request(ctx, HttpMethod::Post, "/listings/calendar", None, Some(data))
            .await
    }

    pub async fn update_listing_prices(
        &self,
        ctx: &CallContext,
        data: &UpdateListingPrices,
    ) -> Result<(), HostexError> {
        self.request_empty(ctx, HttpMethod::Post, "/listings/prices", None, Some(data))
            .await
    }

    pub async fn update_listing_inventories(
        &self,
        ctx: &CallContext,
        data: &UpdateListingInventories,
    ) -> Result<(), HostexError> {
        self.request_empty(ctx, HttpMethod::Post, "/listings/inventories", None, Some(data))
            .await
    }

    pub async fn update_listing_restrictions(
        &self,
        ctx: &CallContext,
        data: &UpdateListingRestrictions,
    ) -> Result<(), HostexError> {
        self.request_empty(ctx, HttpMethod::Post, "/listings/restrictions", None, Some(data))
            .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::config::ClientConfig;
    use crate::test_support::RecordingTransport;
    use crate::types::{Inventory, ListingRef, Restriction};

    fn client(transport: &RecordingTransport) -> HostexClient<RecordingTransport> {
        let config = ClientConfig::new("t").with_base_url("http://localhost:3000");
        HostexClient::with_transport(config, transport.clone()).unwrap()
    }

    #[tokio::test]
    async fn calendar_is_requested_with_post_body() {
        let transport = RecordingTransport::ok(json!({
            "listings": [{
                "channel_type": "airbnb",
                "listing_id": "L1",
                "calendar": [{"date": "2024-06-01", "price": 150, "available": true}]
            }]
        }));
        let request = ListingCalendarRequest {
            start_date: "2024-06-01".to_string(),
            end_date: "2024-06-07".to_string(),
            listings: vec![ListingRef::new("airbnb", "L1")],
        };
        let calendar = client(&transport)
            .get_listing_calendar(&CallContext::default(), &request)
            .await
            .unwrap();

        let day = &calendar.listings[0].calendar[0];
        assert_eq!(day.price, Some(150));
        assert_eq!(day.min_stay, None);
        let sent = transport.last();
        assert_eq!(sent.method, HttpMethod::Post);
        assert_eq!(sent.url, "http://localhost:3000/listings/calendar");
    }

    #[tokio::test]
    async fn inventory_and_restriction_updates_hit_their_paths() {
        let transport = RecordingTransport::ok(serde_json::Value::Null);
        let client = client(&transport);
        let ctx = CallContext::default();
        let listing = ListingRef::new("booking", "B7");

        client
            .update_listing_inventories(
                &ctx,
                &UpdateListingInventories {
                    listing: listing.clone(),
                    inventories: vec![Inventory {
                        date: "2024-06-01".to_string(),
                        inventory: 2,
                    }],
                },
            )
            .await
            .unwrap();
        client
            .update_listing_restrictions(
                &ctx,
                &UpdateListingRestrictions {
                    listing,
                    restrictions: vec![Restriction {
                        date: "2024-06-01".to_string(),
                        closed_to_arrival: Some(true),
                        ..Restriction::default()
                    }],
                },
            )
            .await
            .unwrap();

        let urls: Vec<String> = transport.requests().into_iter().map(|r| r.url).collect();
        assert_eq!(
            urls,
            vec![
                "http://localhost:3000/listings/inventories",
                "http://localhost:3000/listings/restrictions",
            ]
        );
    }
}
