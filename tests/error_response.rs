use axum::{
    body::to_bytes,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use restaurant_orders_api::error::{
    AppError, CheckoutError, NotificationError, PersistenceError, StoreError, ValidationError,
};
use serde_json::Value;

async fn render(err: CheckoutError) -> (StatusCode, Value) {
    let response: Response = AppError::Checkout(err).into_response();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn notification_failure_reports_recorded_order() {
    let (status, body) = render(CheckoutError::Notification {
        order_id: 41,
        source: NotificationError::Rejected {
            status: 500,
            body: "upstream stack trace".into(),
        },
    })
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let data = &body["data"];
    assert_eq!(data["stage"], "notification");
    assert_eq!(data["order_id"], 41);
    assert_eq!(data["order_persisted"], true);
    assert!(data.get("error").is_none());
    assert!(body["message"].as_str().unwrap().contains("#41 foi registrado"));
    assert!(!body.to_string().contains("upstream stack trace"));
}

#[tokio::test]
async fn items_failure_reports_unrecorded_sale() {
    let (status, body) = render(CheckoutError::Persistence(PersistenceError::Items {
        order_id: 7,
        source: StoreError::Unavailable("connection reset by peer".into()),
    }))
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let data = &body["data"];
    assert_eq!(data["stage"], "items");
    assert_eq!(data["order_id"], 7);
    assert_eq!(data["order_persisted"], false);
    assert!(!body.to_string().contains("connection reset"));
}

#[tokio::test]
async fn order_failure_has_no_order_id() {
    let (status, body) = render(CheckoutError::Persistence(PersistenceError::Order {
        source: StoreError::Unavailable("down".into()),
    }))
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["data"]["stage"], "order");
    assert!(body["data"]["order_id"].is_null());
    assert_eq!(body["data"]["order_persisted"], false);
}

#[tokio::test]
async fn validation_and_in_progress_statuses() {
    let (status, body) = render(CheckoutError::Validation(ValidationError::EmptyCart)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"]["stage"], "validation");

    let (status, body) = render(CheckoutError::InProgress).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["data"]["stage"].is_null());
}
