//! Reservations, lock codes and per-stay custom fields.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::client::HostexClient;
use crate::context::CallContext;
use crate::error::HostexError;
use crate::http::HttpMethod;
use crate::query::Query;
use crate::resources::endpoint;
use crate::transport::Transport;
use crate::types::{CreateReservation, CustomFieldMap, Reservation};

/// Filters for [`HostexClient::list_reservations`]. Dates are `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListReservationsParams {
    pub reservation_code: Option<String>,
    pub property_id: Option<u64>,
    pub status: Option<String>,
    pub start_check_in_date: Option<String>,
    pub end_check_in_date: Option<String>,
    pub start_check_out_date: Option<String>,
    pub end_check_out_date: Option<String>,
    pub order_by: Option<String>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationsPage {
    #[serde(default)]
    pub reservations: Vec<Reservation>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedReservation {
    pub reservation: Reservation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomFields {
    #[serde(default)]
    pub custom_fields: CustomFieldMap,
}

impl<T: Transport> HostexClient<T> {
    pub async fn list_reservations(
        &self,
        ctx: &CallContext,
        params: &ListReservationsParams,
    ) -> Result<ReservationsPage, HostexError> {
        let query = Query::from_params(params)?;
        self.request(ctx, HttpMethod::Get, "/reservations", Some(&query), None::<&()>)
            .await
    }

    /// Create a direct booking.
    pub async fn create_reservation(
        &self,
        ctx: &CallContext,
        data: &CreateReservation,
    ) -> Result<CreatedReservation, HostexError> {
        self.request(ctx, HttpMethod::Post, "/reservations", None, Some(data))
            .await
    }

    /// Cancel a direct booking.
    pub async fn cancel_reservation(
        &self,
        ctx: &CallContext,
        reservation_code: &str,
    ) -> Result<(), HostexError> {
        let path = endpoint(&["reservations", reservation_code])?;
        self.request_empty(ctx, HttpMethod::Delete, &path, None, None::<&()>)
            .await
    }

    pub async fn update_lock_code(
        &self,
        ctx: &CallContext,
        stay_code: &str,
        lock_code: &str,
    ) -> Result<(), HostexError> {
        let path = endpoint(&["reservations", stay_code, "check_in_details"])?;
        let body = json!({ "lock_code": lock_code });
        self.request_empty(ctx, HttpMethod::Patch, &path, None, Some(&body))
            .await
    }

    pub async fn get_custom_fields(
        &self,
        ctx: &CallContext,
        stay_code: &str,
    ) -> Result<CustomFields, HostexError> {
        let path = endpoint(&["reservations", stay_code, "custom_fields"])?;
        self.request(ctx, HttpMethod::Get, &path, None, None::<&()>)
            .await
    }

    /// Merge `custom_fields` into the stay's fields.
    pub async fn update_custom_fields(
        &self,
        ctx: &CallContext,
        stay_code: &str,
        custom_fields: &CustomFieldMap,
    ) -> Result<(), HostexError> {
        let path = endpoint(&["reservations", stay_code, "custom_fields"])?;
        let body = json!({ "custom_fields": custom_fields });
        self.request_empty(ctx, HttpMethod::Patch, &path, None, Some(&body))
            .await
    }
}
