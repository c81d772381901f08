//! Inbound HTTP API for the relay
//!
//! Merchant backends call these routes with plain JSON; each handler validates
//! the request, hands it to a [`PaymentGateway`] and maps the outcome onto an
//! HTTP status:
//!
//! | Route | Success | Failure |
//! |---|---|---|
//! | `POST /api/v1/payment/initiate` | 200 with `data.paymentUrl` | 400 invalid input, 500 gateway error |
//! | `POST /api/v1/payment/direct` | gateway body, 200 or 400 on `success` | 400 / 500 |
//! | `POST /api/v1/payment/payout` | gateway body, 200 or 400 on `success` | 400 / 500 |
//! | `POST /api/v1/payment/status` | gateway body, 200 or 400 on `success` | 400 / 500 |
//! | `POST /api/v1/payment/webhook` | 200 acknowledgement | 400 invalid input |
//! | `GET /health` | 200 | |

use crate::gateway::PaymentGateway;
use crate::types::{
    DirectPaymentRequest, ErrorResponse, InitiatePaymentRequest, PayoutTransferRequest,
    TransactionStatusRequest,
};
use crate::Result;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Configuration for HTTP server binding
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080")
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: format!("0.0.0.0:{}", crate::config::DEFAULT_SERVER_PORT),
        }
    }
}

impl ServerConfig {
    pub fn new(bind_addr: impl Into<String>) -> Self {
        Self {
            bind_addr: bind_addr.into(),
        }
    }
}

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    gateway: Arc<dyn PaymentGateway>,
}

impl AppState {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }
}

/// Build the relay router with request tracing and permissive CORS
pub fn create_router(gateway: Arc<dyn PaymentGateway>) -> Router {
    let payment_routes = Router::new()
        .route("/initiate", post(initiate_payment_handler))
        .route("/direct", post(direct_payment_handler))
        .route("/payout", post(payout_transfer_handler))
        .route("/status", post(transaction_status_handler))
        .route("/webhook", post(webhook_handler));

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api/v1/payment", payment_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(AppState::new(gateway))
}

/// Bind and serve the router until the process stops
pub async fn serve(router: Router, config: ServerConfig) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("Relay listening on http://{}", config.bind_addr);

    axum::serve(listener, router).await?;

    Ok(())
}

fn error_response(status: StatusCode, message: &str, error: impl std::fmt::Display) -> Response {
    (status, Json(ErrorResponse::new(message, error))).into_response()
}

fn invalid_request(error: impl std::fmt::Display) -> Response {
    error_response(StatusCode::BAD_REQUEST, "Invalid request data", error)
}

/// Pass a gateway body through, 200 when it reports success and 400 otherwise
fn gateway_reply<T: Serialize>(success: bool, body: T) -> Response {
    let status = if success {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    (status, Json(body)).into_response()
}

async fn initiate_payment_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<InitiatePaymentRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return invalid_request(rejection.body_text()),
    };
    if let Err(e) = request.validate() {
        return invalid_request(e);
    }

    match state.gateway.initiate_payment(&request).await {
        Ok(payment_url) => {
            tracing::info!("Payment {} initiated", request.id);
            Json(json!({
                "success": true,
                "message": "Payment initiated successfully",
                "data": { "paymentUrl": payment_url },
            }))
            .into_response()
        }
        Err(e) => {
            tracing::error!("Failed to initiate payment {}: {}", request.id, e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to initiate payment",
                e,
            )
        }
    }
}

async fn direct_payment_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<DirectPaymentRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return invalid_request(rejection.body_text()),
    };
    if let Err(e) = request.validate() {
        return invalid_request(e);
    }

    match state.gateway.direct_payment(&request).await {
        Ok(response) => gateway_reply(response.success, response),
        Err(e) => {
            tracing::error!("Failed to process direct payment {}: {}", request.id, e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to process direct payment",
                e,
            )
        }
    }
}

async fn payout_transfer_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<PayoutTransferRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return invalid_request(rejection.body_text()),
    };
    if let Err(e) = request.validate() {
        return invalid_request(e);
    }

    match state.gateway.payout_transfer(&request).await {
        Ok(response) => gateway_reply(response.success, response),
        Err(e) => {
            tracing::error!("Failed to process payout transfer {}: {}", request.id, e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to process payout transfer",
                e,
            )
        }
    }
}

async fn transaction_status_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<TransactionStatusRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return invalid_request(rejection.body_text()),
    };
    if let Err(e) = request.validate() {
        return invalid_request(e);
    }

    match state.gateway.transaction_status(&request).await {
        Ok(response) => gateway_reply(response.success, response),
        Err(e) => {
            tracing::error!("Failed to fetch transaction status {}: {}", request.id, e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch transaction status",
                e,
            )
        }
    }
}

/// Gateway callback; logged and acknowledged
async fn webhook_handler(
    payload: std::result::Result<Json<Map<String, Value>>, JsonRejection>,
) -> Response {
    let Json(event) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                "Invalid webhook data",
                rejection.body_text(),
            )
        }
    };

    tracing::info!(
        "Received webhook: {}",
        serde_json::to_string(&event).unwrap_or_default()
    );

    Json(json!({
        "success": true,
        "message": "Webhook received successfully",
    }))
    .into_response()
}

/// Health check endpoint
async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "message": "Santim Pay API is running",
        "version": crate::VERSION,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DirectPaymentResponse, TransactionStatusResponse};
    use crate::GatewayError;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request};
    use std::sync::Mutex;
    use tower::ServiceExt;

    /// Canned gateway that records the ids it was called with
    #[derive(Default)]
    struct StubGateway {
        fail: bool,
        success: bool,
        calls: Mutex<Vec<String>>,
    }

    impl StubGateway {
        fn succeeding() -> Self {
            Self {
                success: true,
                ..Default::default()
            }
        }

        fn declining() -> Self {
            Self::default()
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        fn record(&self, id: &str) -> Result<()> {
            self.calls.lock().unwrap().push(id.to_string());
            if self.fail {
                return Err(GatewayError::rejected(401, "invalid token"));
            }
            Ok(())
        }

        fn reply(&self) -> DirectPaymentResponse {
            DirectPaymentResponse {
                success: self.success,
                message: if self.success { "ok" } else { "declined" }.to_string(),
                data: None,
            }
        }
    }

    #[async_trait::async_trait]
    impl PaymentGateway for StubGateway {
        async fn initiate_payment(&self, request: &InitiatePaymentRequest) -> Result<String> {
            self.record(&request.id)?;
            Ok(format!("https://checkout.example.com/{}", request.id))
        }

        async fn direct_payment(
            &self,
            request: &DirectPaymentRequest,
        ) -> Result<DirectPaymentResponse> {
            self.record(&request.id)?;
            Ok(self.reply())
        }

        async fn payout_transfer(
            &self,
            request: &PayoutTransferRequest,
        ) -> Result<DirectPaymentResponse> {
            self.record(&request.id)?;
            Ok(self.reply())
        }

        async fn transaction_status(
            &self,
            request: &TransactionStatusRequest,
        ) -> Result<TransactionStatusResponse> {
            self.record(&request.id)?;
            Ok(TransactionStatusResponse {
                success: self.success,
                message: "found".to_string(),
                status: "COMPLETED".to_string(),
                transaction: None,
            })
        }
    }

    async fn send(
        gateway: Arc<StubGateway>,
        method: Method,
        uri: &str,
        body: Body,
    ) -> (StatusCode, Value) {
        let response = create_router(gateway)
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(body)
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn post_json(gateway: Arc<StubGateway>, uri: &str, body: Value) -> (StatusCode, Value) {
        send(gateway, Method::POST, uri, Body::from(body.to_string())).await
    }

    fn initiate_body() -> Value {
        json!({
            "id": "ORD-1",
            "amount": 100.5,
            "paymentReason": "order-42",
            "successRedirectUrl": "https://merchant.example.com/ok",
            "failureRedirectUrl": "https://merchant.example.com/fail",
            "notifyUrl": "https://merchant.example.com/notify"
        })
    }

    fn direct_body() -> Value {
        json!({
            "id": "ORD-2",
            "amount": 25,
            "paymentReason": "coffee",
            "notifyUrl": "https://merchant.example.com/notify",
            "phoneNumber": "+251911000000",
            "paymentMethod": "Telebirr"
        })
    }

    #[tokio::test]
    async fn test_health() {
        let gateway = Arc::new(StubGateway::succeeding());
        let (status, body) = send(gateway, Method::GET, "/health", Body::empty()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["message"], "Santim Pay API is running");
        assert_eq!(body["version"], crate::VERSION);
    }

    #[tokio::test]
    async fn test_initiate_payment() {
        let gateway = Arc::new(StubGateway::succeeding());
        let (status, body) =
            post_json(gateway.clone(), "/api/v1/payment/initiate", initiate_body()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "success": true,
                "message": "Payment initiated successfully",
                "data": {"paymentUrl": "https://checkout.example.com/ORD-1"}
            })
        );
        assert_eq!(*gateway.calls.lock().unwrap(), vec!["ORD-1".to_string()]);
    }

    #[tokio::test]
    async fn test_initiate_payment_validation() {
        let gateway = Arc::new(StubGateway::succeeding());
        let mut request = initiate_body();
        request["amount"] = json!(0);

        let (status, body) =
            post_json(gateway.clone(), "/api/v1/payment/initiate", request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Invalid request data");
        assert!(body["error"].as_str().unwrap().contains("amount"));
        assert!(gateway.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let gateway = Arc::new(StubGateway::succeeding());
        let (status, body) = send(
            gateway,
            Method::POST,
            "/api/v1/payment/direct",
            Body::from("{not json"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid request data");
    }

    #[tokio::test]
    async fn test_initiate_payment_gateway_failure() {
        let gateway = Arc::new(StubGateway::failing());
        let (status, body) = post_json(gateway, "/api/v1/payment/initiate", initiate_body()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Failed to initiate payment");
        assert!(body["error"].as_str().unwrap().contains("invalid token"));
    }

    #[tokio::test]
    async fn test_direct_payment_status_follows_success() {
        let (status, body) = post_json(
            Arc::new(StubGateway::succeeding()),
            "/api/v1/payment/direct",
            direct_body(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let (status, body) = post_json(
            Arc::new(StubGateway::declining()),
            "/api/v1/payment/direct",
            direct_body(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "declined");
    }

    #[tokio::test]
    async fn test_direct_payment_gateway_failure() {
        let (status, body) = post_json(
            Arc::new(StubGateway::failing()),
            "/api/v1/payment/direct",
            direct_body(),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Failed to process direct payment");
    }

    #[tokio::test]
    async fn test_payout_transfer() {
        let gateway = Arc::new(StubGateway::succeeding());
        let mut request = direct_body();
        request["id"] = json!("PO-1");

        let (status, _) = post_json(gateway.clone(), "/api/v1/payment/payout", request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(*gateway.calls.lock().unwrap(), vec!["PO-1".to_string()]);

        let (status, body) = post_json(
            Arc::new(StubGateway::failing()),
            "/api/v1/payment/payout",
            direct_body(),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Failed to process payout transfer");
    }

    #[tokio::test]
    async fn test_payout_requires_phone_number() {
        let mut request = direct_body();
        request["phoneNumber"] = json!("  ");

        let (status, body) = post_json(
            Arc::new(StubGateway::succeeding()),
            "/api/v1/payment/payout",
            request,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid request data");
    }

    #[tokio::test]
    async fn test_transaction_status() {
        let (status, body) = post_json(
            Arc::new(StubGateway::succeeding()),
            "/api/v1/payment/status",
            json!({"id": "TX1"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "COMPLETED");

        let (status, body) = post_json(
            Arc::new(StubGateway::failing()),
            "/api/v1/payment/status",
            json!({"id": "TX1"}),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Failed to fetch transaction status");

        let (status, _) = post_json(
            Arc::new(StubGateway::succeeding()),
            "/api/v1/payment/status",
            json!({}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_webhook() {
        let gateway = Arc::new(StubGateway::succeeding());
        let (status, body) = post_json(
            gateway.clone(),
            "/api/v1/payment/webhook",
            json!({"txnId": "TX1", "Status": "COMPLETED"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"success": true, "message": "Webhook received successfully"})
        );

        let (status, body) =
            post_json(gateway, "/api/v1/payment/webhook", json!(["not", "an", "object"])).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid webhook data");
    }

    #[tokio::test]
    async fn test_serve_reports_bind_failure_as_io() {
        let occupied = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = occupied.local_addr().unwrap().to_string();

        let gateway = Arc::new(StubGateway::succeeding());
        let err = serve(create_router(gateway), ServerConfig::new(addr))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Io(_)), "{:?}", err);
    }

    #[test]
    fn test_server_config() {
        assert_eq!(ServerConfig::default().bind_addr, "0.0.0.0:8080");
        assert_eq!(
            ServerConfig::new("127.0.0.1:3000").bind_addr,
            "127.0.0.1:3000"
        );
    }
}
