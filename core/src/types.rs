//! Domain DTOs for the Hostex API.
//!
//! # Design
//! Fields the API may omit are `Option` (or default to empty collections) so
//! that absence is never confused with a legitimate zero or empty value.
//! Request payloads skip `None` fields when serialized. Calendar dates stay
//! as `YYYY-MM-DD` strings, exactly as the API exchanges them; instants are
//! parsed into `DateTime<Utc>`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: u64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub channels: Vec<Channel>,
}

/// A property's presence on one booking channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub channel_type: String,
    pub listing_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomType {
    pub id: u64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Property>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub channels: Vec<Channel>,
}

// ---------------------------------------------------------------------------
// Reservations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub reservation_code: String,
    pub stay_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    pub property_id: u64,
    pub channel_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing_id: Option<String>,
    pub check_in_date: String,
    pub check_out_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_guests: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_adults: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_children: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_infants: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_pets: Option<u32>,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booked_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<Value>,
    #[serde(default)]
    pub in_reservation_box: bool,
}

/// Payload for a direct booking. Amounts are in the currency's minor unit
/// as the API expects them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateReservation {
    pub property_id: String,
    pub custom_channel_id: u64,
    pub check_in_date: String,
    pub check_out_date: String,
    pub guest_name: String,
    pub currency: String,
    pub rate_amount: i64,
    pub commission_amount: i64,
    pub received_amount: i64,
    pub income_method_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_guests: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

/// Free-form per-stay fields; values are whatever JSON the account stores.
pub type CustomFieldMap = Map<String, Value>;

// ---------------------------------------------------------------------------
// Messaging
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub channel_type: String,
    #[serde(default)]
    pub guest: Guest,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub unread_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SenderRole {
    Host,
    Guest,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub sender_role: SenderRole,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// A text message, an image, or both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jpeg_base64: Option<String>,
}

impl SendMessage {
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            jpeg_base64: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Reviews
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub reservation_code: String,
    pub property_id: u64,
    pub channel_type: String,
    pub check_out_date: String,
    pub review_status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_review: Option<ReviewData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_review: Option<ReviewData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_reply: Option<ReplyData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A host review of the guest, a reply to the guest's review, or both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateReview {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_review_score: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_review_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_reply_content: Option<String>,
}

// ---------------------------------------------------------------------------
// Webhooks and account options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Webhook {
    pub id: u64,
    pub url: String,
    #[serde(default)]
    pub manageable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomChannel {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeMethod {
    pub id: u64,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Availability and channel calendars
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub date: String,
    pub available: bool,
}

/// Open or close properties either over a date range or on explicit dates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateAvailabilities {
    pub property_ids: Vec<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dates: Vec<String>,
    pub available: bool,
}

/// Identifies one listing on one channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListingRef {
    pub channel_type: String,
    pub listing_id: String,
}

impl ListingRef {
    pub fn new(channel_type: impl Into<String>, listing_id: impl Into<String>) -> Self {
        Self {
            channel_type: channel_type.into(),
            listing_id: listing_id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingCalendarRequest {
    pub start_date: String,
    pub end_date: String,
    pub listings: Vec<ListingRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateListingPrices {
    #[serde(flatten)]
    pub listing: ListingRef,
    pub prices: Vec<Price>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    pub date: String,
    pub price: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateListingInventories {
    #[serde(flatten)]
    pub listing: ListingRef,
    pub inventories: Vec<Inventory>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub date: String,
    pub inventory: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateListingRestrictions {
    #[serde(flatten)]
    pub listing: ListingRef,
    pub restrictions: Vec<Restriction>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restriction {
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_stay: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_stay: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_to_arrival: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_to_departure: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reservation_tolerates_missing_optional_fields() {
        let reservation: Reservation = serde_json::from_value(json!({
            "reservation_code": "0-HM1-abc",
            "stay_code": "0-HM1-abc-1",
            "property_id": 12,
            "channel_type": "airbnb",
            "check_in_date": "2024-06-01",
            "check_out_date": "2024-06-04",
            "status": "accepted",
            "booked_at": "2024-05-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(reservation.property_id, 12);
        assert!(reservation.guest_name.is_none());
        assert!(reservation.tags.is_empty());
        assert_eq!(
            reservation.booked_at.unwrap().to_rfc3339(),
            "2024-05-01T10:00:00+00:00"
        );
    }

    #[test]
    fn listing_updates_flatten_the_listing_ref() {
        let update = UpdateListingPrices {
            listing: ListingRef::new("airbnb", "L1"),
            prices: vec![Price {
                date: "2024-06-01".to_string(),
                price: 120,
            }],
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value["channel_type"], "airbnb");
        assert_eq!(value["listing_id"], "L1");
        assert_eq!(value["prices"][0]["price"], 120);
    }

    #[test]
    fn restriction_omits_unset_rules() {
        let value = serde_json::to_value(Restriction {
            date: "2024-06-01".to_string(),
            min_stay: Some(2),
            ..Restriction::default()
        })
        .unwrap();
        assert_eq!(value, json!({"date": "2024-06-01", "min_stay": 2}));
    }

    #[test]
    fn message_sender_role_is_lowercase() {
        let message: Message = serde_json::from_value(json!({
            "id": "m1",
            "sender_role": "guest",
            "content": "Hi"
        }))
        .unwrap();
        assert_eq!(message.sender_role, SenderRole::Guest);
    }

    #[test]
    fn availability_update_skips_absent_range() {
        let value = serde_json::to_value(UpdateAvailabilities {
            property_ids: vec![1, 2],
            dates: vec!["2024-06-01".to_string()],
            available: false,
            ..UpdateAvailabilities::default()
        })
        .unwrap();
        assert_eq!(
            value,
            json!({"property_ids": [1, 2], "dates": ["2024-06-01"], "available": false})
        );
    }
}
