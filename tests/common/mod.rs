#![allow(dead_code)]

//! In-process stub of the coupon API.
//!
//! Speaks the same envelopes as the real service, including its habit of
//! answering application errors with HTTP 200.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{DateTime, Duration, Utc};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration as StdDuration;

use coupon_console::domain::entities::{Coupon, CouponType, UsageMode};
use coupon_console::infrastructure::http::{ApiClient, HttpCouponRepository, HttpOrderRepository};

/// Requests seen and coupons held by the stub.
#[derive(Default)]
pub struct StubState {
    pub coupons: Vec<Value>,
    pub list_queries: Vec<HashMap<String, String>>,
    pub bodies: Vec<Value>,
}

pub type SharedState = Arc<Mutex<StubState>>;

pub struct StubApi {
    pub base_url: String,
    pub state: SharedState,
}

impl StubApi {
    /// Starts the stub on an ephemeral port.
    pub async fn start() -> Self {
        let state: SharedState = Arc::new(Mutex::new(StubState::default()));

        let app = Router::new()
            .route("/v1/ping", get(ping))
            .route("/v1/coupons", get(list_coupons).post(create_coupon))
            .route(
                "/v1/coupons/{code}",
                get(get_coupon).put(update_coupon).delete(delete_coupon),
            )
            .route("/v1/orders/mock", post(mock_order))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    /// Adds `count` coupons named `{prefix}001`, `{prefix}002`, ...
    pub fn seed(&self, prefix: &str, count: usize) {
        let mut state = self.state.lock().unwrap();
        for i in 1..=count {
            state
                .coupons
                .push(coupon_json(&format!("{prefix}{i:03}"), Utc::now() + Duration::days(30)));
        }
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.base_url, "v1", StdDuration::from_secs(5)).unwrap()
    }

    pub fn coupons(&self) -> HttpCouponRepository {
        HttpCouponRepository::new(self.client())
    }

    pub fn orders(&self) -> HttpOrderRepository {
        HttpOrderRepository::new(self.client())
    }

    pub fn last_body(&self) -> Value {
        self.state.lock().unwrap().bodies.last().cloned().unwrap()
    }

    pub fn last_list_query(&self) -> HashMap<String, String> {
        self.state.lock().unwrap().list_queries.last().cloned().unwrap()
    }

    pub fn coupon_count(&self) -> usize {
        self.state.lock().unwrap().coupons.len()
    }
}

pub fn coupon_json(code: &str, expires_at: DateTime<Utc>) -> Value {
    json!({
        "coupon_code": code,
        "title": format!("Coupon {code}"),
        "description": "Seeded by the stub",
        "coupon_type": "percentage",
        "usage": "manual",
        "coupon_value": 10,
        "expired_at": expires_at,
        "created_at": "2026-01-01T00:00:00Z",
        "updated_at": "2026-01-01T00:00:00Z"
    })
}

/// In-memory coupon for repository-level tests.
pub fn coupon(code: &str) -> Coupon {
    let now = Utc::now();
    Coupon {
        code: code.to_string(),
        title: format!("Coupon {code}"),
        description: String::new(),
        kind: CouponType::Percentage,
        usage_mode: UsageMode::Manual,
        discount_value: 10.0,
        expires_at: now + Duration::days(30),
        created_at: now,
        updated_at: now,
    }
}

fn error_envelope(message: &str, code: u16) -> Response {
    Json(json!({ "error": message, "code": code })).into_response()
}

async fn ping() -> Json<Value> {
    Json(json!({ "data": "pong", "message": "Ping successfully" }))
}

async fn list_coupons(
    State(state): State<SharedState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let mut state = state.lock().unwrap();
    state.list_queries.push(params.clone());

    let (Some(limit), Some(offset)) = (
        params.get("limit").and_then(|v| v.parse::<usize>().ok()),
        params.get("offset").and_then(|v| v.parse::<usize>().ok()),
    ) else {
        return error_envelope("Invalid pagination parameters", 400);
    };

    let filter = params.get("coupon_code").cloned().unwrap_or_default();
    let matching: Vec<&Value> = state
        .coupons
        .iter()
        .filter(|c| {
            c["coupon_code"]
                .as_str()
                .is_some_and(|code| code.contains(&filter))
        })
        .collect();

    let total = matching.len();
    let data: Vec<Value> = matching.into_iter().skip(offset).take(limit).cloned().collect();

    Json(json!({
        "data": data,
        "paging": { "total": total, "limit": limit, "offset": offset },
        "message": "Coupons retrieved successfully"
    }))
    .into_response()
}

async fn get_coupon(State(state): State<SharedState>, Path(code): Path<String>) -> Response {
    let state = state.lock().unwrap();
    match state.coupons.iter().find(|c| c["coupon_code"] == code) {
        Some(coupon) => Json(json!({
            "data": coupon,
            "message": "Coupon retrieved successfully",
            "code": 200
        }))
        .into_response(),
        None => error_envelope("not found", 404),
    }
}

async fn create_coupon(State(state): State<SharedState>, Json(body): Json<Value>) -> Response {
    let mut state = state.lock().unwrap();
    state.bodies.push(body.clone());

    let Some(code) = body["coupon_code"].as_str().map(str::to_string) else {
        return error_envelope("coupon_code is required", 400);
    };
    if state.coupons.iter().any(|c| c["coupon_code"] == code) {
        return error_envelope("Coupon code already exists", 409);
    }

    let mut coupon = body;
    coupon["created_at"] = json!(Utc::now());
    coupon["updated_at"] = json!(Utc::now());
    state.coupons.push(coupon.clone());

    Json(json!({ "data": coupon, "message": "Coupon created successfully", "code": 201 }))
        .into_response()
}

async fn update_coupon(
    State(state): State<SharedState>,
    Path(code): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    state.bodies.push(body.clone());

    let Some(existing) = state.coupons.iter_mut().find(|c| c["coupon_code"] == code) else {
        return error_envelope("not found", 404);
    };

    for key in ["title", "description", "coupon_type", "usage", "coupon_value", "expired_at"] {
        if let Some(value) = body.get(key) {
            existing[key] = value.clone();
        }
    }
    existing["updated_at"] = json!(Utc::now());

    Json(json!({ "data": existing.clone(), "message": "Coupon updated successfully", "code": 200 }))
        .into_response()
}

async fn delete_coupon(State(state): State<SharedState>, Path(code): Path<String>) -> Response {
    let mut state = state.lock().unwrap();
    let before = state.coupons.len();
    state.coupons.retain(|c| c["coupon_code"] != code);

    if state.coupons.len() == before {
        return error_envelope("not found", 404);
    }

    Json(json!({
        "data": format!("Coupon with ID {code} has been deleted"),
        "message": "Coupon deleted successfully",
        "code": 200
    }))
    .into_response()
}

async fn mock_order(State(state): State<SharedState>, Json(body): Json<Value>) -> Response {
    let mut state = state.lock().unwrap();
    state.bodies.push(body.clone());

    let cost = body["cost"].as_f64().unwrap_or_default();
    let created_at = body["created_at"].clone();

    match body.get("coupon_code").and_then(Value::as_str) {
        None => Json(json!({
            "data": { "cost": cost, "total_amount": cost, "created_at": created_at },
            "message": "Mock order created"
        }))
        .into_response(),
        Some("BROKEN") => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Internal Server Error" })),
        )
            .into_response(),
        Some(code) => match state.coupons.iter().find(|c| c["coupon_code"] == code) {
            Some(coupon) => {
                let percent = coupon["coupon_value"].as_f64().unwrap_or_default();
                Json(json!({
                    "data": {
                        "cost": cost,
                        "total_amount": cost * (100.0 - percent) / 100.0,
                        "coupon_code": code,
                        "created_at": created_at,
                        "coupon": coupon
                    },
                    "message": "Mock order created"
                }))
                .into_response()
            }
            None => error_envelope("Coupon not found", 404),
        },
    }
}
