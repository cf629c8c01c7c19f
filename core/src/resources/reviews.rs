//! Guest and host reviews.

use serde::{Deserialize, Serialize};

use crate::client::HostexClient;
use crate::context::CallContext;
use crate::error::HostexError;
use crate::http::HttpMethod;
use crate::query::Query;
use crate::resources::endpoint;
use crate::transport::Transport;
use crate::types::{CreateReview, Review};

#[derive(Debug, Clone, Default, Serialize)]
pub struct ListReviewsParams {
    pub reservation_code: Option<String>,
    pub property_id: Option<u64>,
    pub review_status: Option<String>,
    pub start_check_out_date: Option<String>,
    pub end_check_out_date: Option<String>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewsPage {
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub total: u64,
}

impl<T: Transport> HostexClient<T> {
    pub async fn list_reviews(
        &self,
        ctx: &CallContext,
        params: &ListReviewsParams,
    ) -> Result<ReviewsPage, HostexError> {
        let query = Query::from_params(params)?;
        self.request(ctx, HttpMethod::Get, "/reviews", Some(&query), None::<&()>)
            .await
    }

    /// Review the guest and/or reply to their review.
    pub async fn create_review(
        &self,
        ctx: &CallContext,
        reservation_code: &str,
        review: &CreateReview,
    ) -> Result<(), HostexError> {
        let path = endpoint(&["reviews", reservation_code])?;
        self.request_empty(ctx, HttpMethod::Post, &path, None, Some(review))
            .await
    }
}
