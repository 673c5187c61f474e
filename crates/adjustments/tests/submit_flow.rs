//! End-to-end adjustment flow against an in-process stub backend: catalog
//! lookup, line resolution, validation, submit, and the exact body the
//! backend receives.

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use serde_json::{Value, json};

use retaildesk_adjustments::{
    AdjustmentAction, AdjustmentDraft, LineInput, fetch_products,
};
use retaildesk_client::{ApiClient, ApiConfig};

#[derive(Clone, Default)]
struct StubState {
    received: Arc<Mutex<Option<Value>>>,
    reject_submit: bool,
}

struct TestServer {
    base_url: String,
    received: Arc<Mutex<Option<Value>>>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(reject_submit: bool) -> Self {
        let received = Arc::new(Mutex::new(None));
        let state = StubState {
            received: received.clone(),
            reject_submit,
        };

        let app = Router::new()
            .route("/products", get(products))
            .route("/adjustments", post(create_adjustment))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            received,
            handle,
        }
    }

    fn client(&self) -> ApiClient {
        ApiClient::new(ApiConfig::new(&self.base_url)).unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn products() -> Json<Value> {
    Json(json!({
        "data": [
            { "id": 11, "name": "Kopi Sachet", "brandName": "Kapal Api" },
            { "id": 12, "name": "Gula 1kg", "brandName": "Gulaku" },
        ],
    }))
}

async fn create_adjustment(State(state): State<StubState>, Json(body): Json<Value>) -> Response {
    *state.received.lock().unwrap() = Some(body);
    if state.reject_submit {
        (StatusCode::UNPROCESSABLE_ENTITY, "stock below zero").into_response()
    } else {
        Json(json!({ "id": 99 })).into_response()
    }
}

#[tokio::test]
async fn combine_flow_sends_the_normalized_body() {
    let server = TestServer::spawn(false).await;
    let client = server.client();

    let catalog = fetch_products(&client).await.unwrap();
    assert_eq!(catalog.len(), 2);

    let mut draft = AdjustmentDraft::new(
        AdjustmentAction::Combine,
        NaiveDate::from_ymd_opt(2026, 8, 30).unwrap(),
    );

    // Lines resolved the way the form does: pick names against the catalog.
    let mut first = LineInput {
        quantity: 5,
        ..Default::default()
    };
    first.select_product(&catalog, "Kopi Sachet");
    let mut second = LineInput {
        quantity: 5,
        ..Default::default()
    };
    second.select_product(&catalog, "Gula 1kg");
    draft.sources = vec![first, second];

    // A name missing from the catalog becomes a new-product request.
    let mut result = LineInput {
        quantity: 5,
        ..Default::default()
    };
    result.select_product(&catalog, "Paket Kopi & Gula");
    result.new_brand_name = Some("Toko".to_string());
    result.new_category_name = Some("Bundle".to_string());
    let result = result.with_price(15000.0);
    draft.results = vec![result];

    let validated = draft.validate().unwrap();
    validated.submit(&client).await.unwrap();

    let body = server.received.lock().unwrap().take().unwrap();
    assert_eq!(body["action"], "COMBINE");
    assert_eq!(body["adjustmentDate"], "2026-08-30");

    let lines = body["products"].as_array().unwrap();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["productId"], 11);
    assert_eq!(lines[0]["adjustmentRole"], "SOURCE");
    assert_eq!(lines[0]["adjustmentPrice"], 0.0);
    assert_eq!(lines[1]["productId"], 12);

    // New-product line: no id, escaped free text, explicit price.
    assert!(lines[2].get("productId").is_none());
    assert_eq!(lines[2]["name"], "Paket Kopi &amp; Gula");
    assert_eq!(lines[2]["newBrandName"], "Toko");
    assert_eq!(lines[2]["adjustmentRole"], "RESULT");
    assert_eq!(lines[2]["adjustmentPrice"], 15000.0);
    assert_eq!(lines[2]["adjustmentQuantity"], 5);
}

#[tokio::test]
async fn submit_surfaces_backend_rejections_unchanged() {
    let server = TestServer::spawn(true).await;
    let client = server.client();

    let mut draft = AdjustmentDraft::new(
        AdjustmentAction::Split,
        NaiveDate::from_ymd_opt(2026, 8, 30).unwrap(),
    );
    draft.sources = vec![LineInput::existing(11, "Kopi Sachet", 4)];
    draft.results = vec![
        LineInput::new_product("Kopi Kecil", "Kapal Api", "Minuman", 4).with_price(500.0),
        LineInput::new_product("Kopi Mini", "Kapal Api", "Minuman", 4).with_price(250.0),
    ];

    let validated = draft.validate().unwrap();
    let err = validated.submit(&client).await.unwrap_err();

    assert_eq!(err.status(), Some(422));
    assert_eq!(err.body(), Some("stock below zero"));

    // The body still went over the wire in the normalized shape.
    let body = server.received.lock().unwrap().take().unwrap();
    assert_eq!(body["action"], "SPLIT");
    assert_eq!(body["products"].as_array().unwrap().len(), 3);
}
