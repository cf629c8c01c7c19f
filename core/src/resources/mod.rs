//! Per-endpoint operations.
//!
//! Each operation is a thin binding over [`HostexClient::request`] or
//! [`HostexClient::request_empty`](crate::HostexClient::request_empty): it
//! names the method and path, turns its parameter struct into a
//! [`Query`](crate::Query), and declares the payload shape it expects back.
//!
//! [`HostexClient::request`]: crate::HostexClient::request

mod availabilities;
mod conversations;
mod listings;
mod options;
mod properties;
mod reservations;
mod reviews;
mod webhooks;

pub use availabilities::{Availabilities, ListAvailabilitiesParams, ListingAvailability};
pub use conversations::{ConversationDetails, ConversationsPage, ListConversationsParams};
pub use listings::{CalendarDay, ListingCalendar, ListingCalendarEntry};
pub use options::{CustomChannels, IncomeMethods};
pub use properties::{ListPropertiesParams, ListRoomTypesParams, PropertiesPage, RoomTypesPage};
pub use reservations::{CreatedReservation, CustomFields, ListReservationsParams, ReservationsPage};
pub use reviews::{ListReviewsParams, ReviewsPage};
pub use webhooks::{CreatedWebhook, Webhooks};

use url::Url;

use crate::error::HostexError;

/// Join path segments into an absolute path, percent-encoding each one.
///
/// Identifiers such as reservation codes are caller data; a `/` or `?` in one
/// must not change which endpoint is hit. Empty, `.` and `..` segments are
/// rejected outright since URL normalisation would collapse them.
pub(crate) fn endpoint(segments: &[&str]) -> Result<String, HostexError> {
    if let Some(bad) = segments
        .iter()
        .find(|s| s.is_empty() || **s == "." || **s == "..")
    {
        return Err(HostexError::Configuration(format!(
            "invalid path segment {bad:?}"
        )));
    }
    let invalid = || HostexError::Configuration(format!("cannot build path from {segments:?}"));
    let mut url = Url::parse("http://path.invalid/").map_err(|_| invalid())?;
    url.path_segments_mut()
        .map_err(|()| invalid())?
        .pop_if_empty()
        .extend(segments);
    Ok(url.path().to_string())
}
