//! In-memory stand-in for the Hostex API.
//!
//! Every response is the API's envelope: HTTP 200 with `error_code` carrying
//! the application status. Requests without the configured access token are
//! answered with `error_code: 401`. State lives in one `RwLock`-guarded
//! store seeded with a small fixture account.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const TOKEN_HEADER: &str = "hostex-access-token";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Property {
    pub id: u64,
    pub title: String,
    pub address: String,
    pub channels: Vec<Value>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Reservation {
    pub reservation_code: String,
    pub stay_code: String,
    pub property_id: u64,
    pub channel_type: String,
    pub check_in_date: String,
    pub check_out_date: String,
    pub status: String,
    pub guest_name: String,
    pub number_of_guests: u32,
    pub booked_at: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Webhook {
    pub id: u64,
    pub url: String,
    pub manageable: bool,
    pub created_at: String,
}

#[derive(Deserialize)]
pub struct CreateReservation {
    pub property_id: String,
    pub check_in_date: String,
    pub check_out_date: String,
    pub guest_name: String,
    #[serde(default)]
    pub number_of_guests: Option<u32>,
}

#[derive(Debug, Default)]
pub struct Store {
    pub properties: Vec<Property>,
    pub reservations: Vec<Reservation>,
    pub webhooks: Vec<Webhook>,
    pub lock_codes: HashMap<String, String>,
    pub custom_fields: HashMap<String, Map<String, Value>>,
    pub messages: HashMap<String, Vec<Value>>,
    pub reviews: BTreeMap<String, Value>,
    /// (property id, date) -> available
    pub availability: BTreeMap<(u64, String), bool>,
    /// (channel type, listing id) -> date -> calendar fields
    pub calendars: BTreeMap<(String, String), BTreeMap<String, Map<String, Value>>>,
    next_id: u64,
}

impl Store {
    pub fn seeded() -> Self {
        let properties = vec![
            Property {
                id: 7,
                title: "Loft".to_string(),
                address: "1 Canal St".to_string(),
                channels: vec![json!({"channel_type": "airbnb", "listing_id": "A7"})],
            },
            Property {
                id: 8,
                title: "Garden Flat".to_string(),
                address: "2 Park Rd".to_string(),
                channels: vec![],
            },
            Property {
                id: 9,
                title: "Studio".to_string(),
                address: "3 Hill Ln".to_string(),
                channels: vec![json!({"channel_type": "booking", "listing_id": "B9"})],
            },
        ];
        let reservations = vec![Reservation {
            reservation_code: "0-HM1-seed".to_string(),
            stay_code: "0-HM1-seed-1".to_string(),
            property_id: 7,
            channel_type: "airbnb".to_string(),
            check_in_date: "2024-06-01".to_string(),
            check_out_date: "2024-06-04".to_string(),
            status: "accepted".to_string(),
            guest_name: "Ada".to_string(),
            number_of_guests: 2,
            booked_at: "2024-05-01T10:00:00Z".to_string(),
        }];
        let mut messages = HashMap::new();
        messages.insert(
            "conv-1".to_string(),
            vec![json!({
                "id": "m1",
                "sender_role": "guest",
                "content": "What time is check-in?",
                "created_at": "2024-05-30T09:00:00Z"
            })],
        );
        let mut reviews = BTreeMap::new();
        reviews.insert(
            "0-HM1-seed".to_string(),
            json!({
                "reservation_code": "0-HM1-seed",
                "property_id": 7,
                "channel_type": "airbnb",
                "check_out_date": "2024-06-04",
                "review_status": "pending",
                "guest_review": {"score": 5, "content": "Lovely stay"}
            }),
        );

        Self {
            properties,
            reservations,
            messages,
            reviews,
            next_id: 100,
            ..Self::default()
        }
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

pub struct AppState {
    pub token: String,
    pub store: RwLock<Store>,
}

pub type Db = Arc<AppState>;

pub fn app(token: &str) -> Router {
    let state: Db = Arc::new(AppState {
        token: token.to_string(),
        store: RwLock::new(Store::seeded()),
    });
    Router::new()
        .route("/properties", get(list_properties))
        .route("/room_types", get(list_room_types))
        .route("/reservations", get(list_reservations).post(create_reservation))
        .route("/reservations/{code}", delete(cancel_reservation))
        .route("/reservations/{code}/check_in_details", patch(update_lock_code))
        .route(
            "/reservations/{code}/custom_fields",
            get(get_custom_fields).patch(update_custom_fields),
        )
        .route("/availabilities", get(list_availabilities).post(update_availabilities))
        .route("/conversations", get(list_conversations))
        .route("/conversations/{id}", get(get_conversation).post(send_message))
        .route("/reviews", get(list_reviews))
        .route("/reviews/{code}", post(create_review))
        .route("/listings/calendar", post(listing_calendar))
        .route("/listings/prices", post(update_prices))
        .route("/listings/inventories", post(update_inventories))
        .route("/listings/restrictions", post(update_restrictions))
        .route("/webhooks", get(list_webhooks).post(create_webhook))
        .route("/webhooks/{id}", delete(delete_webhook))
        .route("/custom_channels", get(list_custom_channels))
        .route("/income_methods", get(list_income_methods))
        .layer(middleware::from_fn_with_state(state.clone(), require_token))
        .with_state(state)
}

pub async fn run(listener: TcpListener, token: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(token)).await
}

// ---------------------------------------------------------------------------
// Envelope helpers
// ---------------------------------------------------------------------------

type Reply = Json<Value>;

fn envelope(code: i64, message: &str, data: Value) -> Reply {
    Json(json!({
        "request_id": Uuid::new_v4().to_string(),
        "error_code": code,
        "error_msg": message,
        "data": data,
    }))
}

fn ok(data: impl Serialize) -> Reply {
    envelope(200, "", json!(data))
}

fn done() -> Reply {
    envelope(200, "", Value::Null)
}

fn fail(code: i64, message: &str) -> Reply {
    tracing::debug!(code, error_msg = message, "rejecting request");
    envelope(code, message, Value::Null)
}

async fn require_token(State(state): State<Db>, request: Request, next: Next) -> Response {
    let presented = request
        .headers()
        .get(TOKEN_HEADER)
        .and_then(|value| value.to_str().ok());
    if presented != Some(state.token.as_str()) {
        return fail(401, "invalid token").into_response();
    }
    next.run(request).await
}

#[derive(Deserialize, Default)]
pub struct Page {
    pub offset: Option<usize>,
    pub limit: Option<usize>,
}

impl Page {
    fn new(offset: Option<usize>, limit: Option<usize>) -> Self {
        Self { offset, limit }
    }

    fn slice<T: Clone>(&self, items: &[T]) -> Vec<T> {
        items
            .iter()
            .skip(self.offset.unwrap_or(0))
            .take(self.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct PropertyFilter {
    pub id: Option<u64>,
    pub offset: Option<usize>,
    pub limit: Option<usize>,
}

async fn list_properties(State(db): State<Db>, Query(filter): Query<PropertyFilter>) -> Reply {
    let store = db.store.read().await;
    let matching: Vec<Property> = store
        .properties
        .iter()
        .filter(|p| filter.id.is_none_or(|id| p.id == id))
        .cloned()
        .collect();
    ok(json!({
        "properties": Page::new(filter.offset, filter.limit).slice(&matching),
        "total": matching.len(),
    }))
}

async fn list_room_types(State(db): State<Db>, Query(page): Query<Page>) -> Reply {
    let store = db.store.read().await;
    let room_types = vec![json!({
        "id": 1,
        "title": "Whole apartment",
        "properties": store.properties,
    })];
    ok(json!({"room_types": page.slice(&room_types), "total": room_types.len()}))
}

// ---------------------------------------------------------------------------
// Reservations
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct ReservationFilter {
    pub reservation_code: Option<String>,
    pub property_id: Option<u64>,
    pub status: Option<String>,
    pub offset: Option<usize>,
    pub limit: Option<usize>,
}

async fn list_reservations(
    State(db): State<Db>,
    Query(filter): Query<ReservationFilter>,
) -> Reply {
    let store = db.store.read().await;
    let matching: Vec<Reservation> = store
        .reservations
        .iter()
        .filter(|r| {
            filter
                .reservation_code
                .as_ref()
                .is_none_or(|code| &r.reservation_code == code)
                && filter.property_id.is_none_or(|id| r.property_id == id)
                && filter.status.as_ref().is_none_or(|s| &r.status == s)
        })
        .cloned()
        .collect();
    ok(json!({
        "reservations": Page::new(filter.offset, filter.limit).slice(&matching),
        "total": matching.len(),
    }))
}

async fn create_reservation(State(db): State<Db>, Json(input): Json<CreateReservation>) -> Reply {
    let Ok(property_id) = input.property_id.parse::<u64>() else {
        return fail(400, "property_id must be numeric");
    };
    let mut store = db.store.write().await;
    if !store.properties.iter().any(|p| p.id == property_id) {
        return fail(404, "property not found");
    }
    let id = store.next_id();
    let code = format!("0-DB-{id}");
    let reservation = Reservation {
        stay_code: format!("{code}-1"),
        reservation_code: code,
        property_id,
        channel_type: "hostex_direct".to_string(),
        check_in_date: input.check_in_date,
        check_out_date: input.check_out_date,
        status: "accepted".to_string(),
        guest_name: input.guest_name,
        number_of_guests: input.number_of_guests.unwrap_or(1),
        booked_at: "2024-06-01T00:00:00Z".to_string(),
    };
    store.reservations.push(reservation.clone());
    ok(json!({ "reservation": reservation }))
}

async fn cancel_reservation(State(db): State<Db>, Path(code): Path<String>) -> Reply {
    let mut store = db.store.write().await;
    match store
        .reservations
        .iter_mut()
        .find(|r| r.reservation_code == code)
    {
        Some(reservation) if reservation.status == "cancelled" => {
            fail(409, "reservation already cancelled")
        }
        Some(reservation) => {
            reservation.status = "cancelled".to_string();
            done()
        }
        None => fail(404, "reservation not found"),
    }
}

fn stay_exists(store: &Store, stay_code: &str) -> bool {
    store.reservations.iter().any(|r| r.stay_code == stay_code)
}

#[derive(Deserialize)]
pub struct LockCode {
    pub lock_code: String,
}

async fn update_lock_code(
    State(db): State<Db>,
    Path(stay_code): Path<String>,
    Json(input): Json<LockCode>,
) -> Reply {
    let mut store = db.store.write().await;
    if !stay_exists(&store, &stay_code) {
        return fail(404, "stay not found");
    }
    store.lock_codes.insert(stay_code, input.lock_code);
    done()
}

async fn get_custom_fields(State(db): State<Db>, Path(stay_code): Path<String>) -> Reply {
    let store = db.store.read().await;
    if !stay_exists(&store, &stay_code) {
        return fail(404, "stay not found");
    }
    let fields = store.custom_fields.get(&stay_code).cloned().unwrap_or_default();
    ok(json!({ "custom_fields": fields }))
}

#[derive(Deserialize)]
pub struct CustomFieldsUpdate {
    pub custom_fields: Map<String, Value>,
}

async fn update_custom_fields(
    State(db): State<Db>,
    Path(stay_code): Path<String>,
    Json(input): Json<CustomFieldsUpdate>,
) -> Reply {
    let mut store = db.store.write().await;
    if !stay_exists(&store, &stay_code) {
        return fail(404, "stay not found");
    }
    store
        .custom_fields
        .entry(stay_code)
        .or_default()
        .extend(input.custom_fields);
    done()
}

// ---------------------------------------------------------------------------
// Availability
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct AvailabilityQuery {
    pub property_ids: String,
    pub start_date: String,
    pub end_date: String,
}

async fn list_availabilities(
    State(db): State<Db>,
    Query(query): Query<AvailabilityQuery>,
) -> Reply {
    let Ok(ids) = query
        .property_ids
        .split(',')
        .map(|id| id.trim().parse::<u64>())
        .collect::<Result<Vec<_>, _>>()
    else {
        return fail(400, "property_ids must be a comma-separated list of ids");
    };
    let store = db.store.read().await;
    let listings: Vec<Value> = ids
        .iter()
        .map(|id| {
            let days: Vec<Value> = store
                .availability
                .iter()
                .filter(|((pid, date), _)| {
                    pid == id && *date >= query.start_date && *date <= query.end_date
                })
                .map(|((_, date), available)| json!({"date": date, "available": available}))
                .collect();
            json!({"id": id, "availabilities": days})
        })
        .collect();
    ok(json!({ "listings": listings }))
}

#[derive(Deserialize)]
pub struct AvailabilityUpdate {
    pub property_ids: Vec<u64>,
    #[serde(default)]
    pub dates: Vec<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub available: bool,
}

async fn update_availabilities(
    State(db): State<Db>,
    Json(input): Json<AvailabilityUpdate>,
) -> Reply {
    let mut dates = input.dates;
    match (input.start_date, input.end_date) {
        (Some(start), Some(end)) => {
            // Range updates only mark the endpoints; the stub has no calendar math.
            dates.push(start);
            dates.push(end);
        }
        (None, None) => {}
        _ => return fail(400, "start_date and end_date must be given together"),
    }
    if dates.is_empty() {
        return fail(400, "no dates given");
    }
    let mut store = db.store.write().await;
    for id in input.property_ids {
        for date in &dates {
            store.availability.insert((id, date.clone()), input.available);
        }
    }
    done()
}

// ---------------------------------------------------------------------------
// Conversations and reviews
// ---------------------------------------------------------------------------

async fn list_conversations(State(db): State<Db>, Query(page): Query<Page>) -> Reply {
    if page.offset.is_none() || page.limit.is_none() {
        return fail(400, "offset and limit are required");
    }
    let store = db.store.read().await;
    let conversations: Vec<Value> = store
        .messages
        .iter()
        .map(|(id, messages)| {
            json!({
                "id": id,
                "channel_type": "airbnb",
                "guest": {"name": "Ada"},
                "property_id": 7,
                "unread_count": messages.len(),
            })
        })
        .collect();
    ok(json!({
        "conversations": page.slice(&conversations),
        "total": conversations.len(),
    }))
}

async fn get_conversation(State(db): State<Db>, Path(id): Path<String>) -> Reply {
    let store = db.store.read().await;
    match store.messages.get(&id) {
        Some(messages) => ok(json!({
            "guest": {"name": "Ada"},
            "channel_type": "airbnb",
            "messages": messages,
        })),
        None => fail(404, "conversation not found"),
    }
}

#[derive(Deserialize)]
pub struct OutgoingMessage {
    pub message: Option<String>,
    pub jpeg_base64: Option<String>,
}

async fn send_message(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<OutgoingMessage>,
) -> Reply {
    if input.message.is_none() && input.jpeg_base64.is_none() {
        return fail(400, "message or jpeg_base64 is required");
    }
    let mut store = db.store.write().await;
    let message_id = format!("m{}", store.next_id());
    let Some(messages) = store.messages.get_mut(&id) else {
        return fail(404, "conversation not found");
    };
    messages.push(json!({
        "id": message_id,
        "sender_role": "host",
        "content": input.message.unwrap_or_default(),
        "created_at": "2024-06-01T12:00:00Z",
    }));
    done()
}

async fn list_reviews(State(db): State<Db>, Query(page): Query<Page>) -> Reply {
    let store = db.store.read().await;
    let reviews: Vec<Value> = store.reviews.values().cloned().collect();
    ok(json!({"reviews": page.slice(&reviews), "total": reviews.len()}))
}

#[derive(Deserialize)]
pub struct ReviewInput {
    pub host_review_score: Option<u8>,
    pub host_review_content: Option<String>,
    pub host_reply_content: Option<String>,
}

async fn create_review(
    State(db): State<Db>,
    Path(code): Path<String>,
    Json(input): Json<ReviewInput>,
) -> Reply {
    let mut store = db.store.write().await;
    let Some(review) = store.reviews.get_mut(&code) else {
        return fail(404, "review not found");
    };
    if input.host_review_score.is_some() || input.host_review_content.is_some() {
        review["host_review"] = json!({
            "score": input.host_review_score,
            "content": input.host_review_content,
        });
    }
    if let Some(reply) = input.host_reply_content {
        review["host_reply"] = json!({ "content": reply });
    }
    review["review_status"] = json!("reviewed");
    done()
}

// ---------------------------------------------------------------------------
// Listing calendars
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct ListingKey {
    pub channel_type: String,
    pub listing_id: String,
}

#[derive(Deserialize)]
pub struct CalendarQuery {
    pub start_date: String,
    pub end_date: String,
    pub listings: Vec<ListingKey>,
}

async fn listing_calendar(State(db): State<Db>, Json(input): Json<CalendarQuery>) -> Reply {
    let store = db.store.read().await;
    let listings: Vec<Value> = input
        .listings
        .into_iter()
        .map(|key| {
            let calendar: Vec<Value> = store
                .calendars
                .get(&(key.channel_type.clone(), key.listing_id.clone()))
                .map(|days| {
                    days.range(input.start_date.clone()..=input.end_date.clone())
                        .map(|(date, fields)| {
                            let mut day = fields.clone();
                            day.insert("date".to_string(), json!(date));
                            Value::Object(day)
                        })
                        .collect()
                })
                .unwrap_or_default();
            json!({
                "channel_type": key.channel_type,
                "listing_id": key.listing_id,
                "calendar": calendar,
            })
        })
        .collect();
    ok(json!({ "listings": listings }))
}

/// Shared shape of the three calendar update payloads: the listing plus one
/// array of per-date entries under `field`.
async fn merge_calendar(db: &Db, input: Map<String, Value>, field: &str) -> Reply {
    let (Some(Value::String(channel)), Some(Value::String(listing)), Some(Value::Array(entries))) = (
        input.get("channel_type"),
        input.get("listing_id"),
        input.get(field),
    ) else {
        return fail(400, "channel_type, listing_id and entries are required");
    };
    let mut store = db.store.write().await;
    let days = store
        .calendars
        .entry((channel.clone(), listing.clone()))
        .or_default();
    for entry in entries {
        let Some(Value::String(date)) = entry.get("date") else {
            return fail(400, "every entry needs a date");
        };
        let day = days.entry(date.clone()).or_default();
        if let Value::Object(fields) = entry {
            day.extend(
                fields
                    .iter()
                    .filter(|(key, _)| key.as_str() != "date")
                    .map(|(key, value)| (key.clone(), value.clone())),
            );
        }
    }
    done()
}

async fn update_prices(State(db): State<Db>, Json(input): Json<Map<String, Value>>) -> Reply {
    merge_calendar(&db, input, "prices").await
}

async fn update_inventories(State(db): State<Db>, Json(input): Json<Map<String, Value>>) -> Reply {
    merge_calendar(&db, input, "inventories").await
}

async fn update_restrictions(State(db): State<Db>, Json(input): Json<Map<String, Value>>) -> Reply {
    merge_calendar(&db, input, "restrictions").await
}

// ---------------------------------------------------------------------------
// Webhooks and options
// ---------------------------------------------------------------------------

async fn list_webhooks(State(db): State<Db>) -> Reply {
    let store = db.store.read().await;
    ok(json!({ "webhooks": store.webhooks }))
}

#[derive(Deserialize)]
pub struct CreateWebhook {
    pub url: String,
}

async fn create_webhook(State(db): State<Db>, Json(input): Json<CreateWebhook>) -> Reply {
    if !input.url.starts_with("http://") && !input.url.starts_with("https://") {
        return fail(400, "url must be http(s)");
    }
    let mut store = db.store.write().await;
    let webhook = Webhook {
        id: store.next_id(),
        url: input.url,
        manageable: true,
        created_at: "2024-06-01T00:00:00Z".to_string(),
    };
    store.webhooks.push(webhook.clone());
    ok(json!({ "webhook": webhook }))
}

async fn delete_webhook(State(db): State<Db>, Path(id): Path<u64>) -> Reply {
    let mut store = db.store.write().await;
    let before = store.webhooks.len();
    store.webhooks.retain(|w| w.id != id);
    if store.webhooks.len() == before {
        return fail(404, "webhook not found");
    }
    done()
}

async fn list_custom_channels() -> Reply {
    ok(json!({"custom_channels": [{"id": 1, "name": "Walk-in"}, {"id": 2, "name": "Phone"}]}))
}

async fn list_income_methods() -> Reply {
    ok(json!({"income_methods": [{"id": 1, "name": "Cash"}, {"id": 2, "name": "Bank transfer"}]}))
}
