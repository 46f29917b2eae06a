use std::sync::{Arc, Mutex};

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use restaurant_orders_api::{
    cart::Cart,
    catalog::MenuCatalog,
    error::NotificationError,
    models::{OrderForm, PaymentMethod},
    services::{
        notifier::{NotificationResult, Notifier, WebhookNotifier},
        order_assembler::{AssembledOrder, assemble},
    },
};
use serde_json::Value;

type Captured = Arc<Mutex<Vec<Value>>>;

/// Starts a webhook on an ephemeral port answering every POST with `status` and `body`.
async fn fake_webhook(status: StatusCode, body: &'static str) -> (String, Captured) {
    let captured: Captured = Arc::default();
    let app = Router::new()
        .route(
            "/hook",
            post(
                move |State(seen): State<Captured>, Json(payload): Json<Value>| async move {
                    seen.lock().unwrap().push(payload);
                    (status, body)
                },
            ),
        )
        .with_state(captured.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}/hook"), captured)
}

fn assembled() -> AssembledOrder {
    let menu = MenuCatalog::house_menu();
    let mut cart = Cart::new();
    cart.add_item(menu.get("2").unwrap());
    cart.add_item(menu.get("2").unwrap());
    cart.add_item(menu.get("6").unwrap());
    let form = OrderForm {
        name: "Ana".into(),
        phone: "11999999999".into(),
        address: "Rua A, 1".into(),
        payment_method: PaymentMethod::Pix,
    };
    assemble(&cart, &form).unwrap()
}

#[tokio::test]
async fn posts_order_payload_and_reads_json_reply() {
    let (url, captured) = fake_webhook(
        StatusCode::OK,
        r#"{"display_message":"Pedido #123 confirmado","message":"ok"}"#,
    )
    .await;
    let order = assembled();

    let reply = WebhookNotifier::new(url)
        .dispatch(&order.notification(123), &order.summary)
        .await
        .unwrap();

    assert_eq!(
        reply,
        NotificationResult {
            display_message: Some("Pedido #123 confirmado".into()),
            message: Some("ok".into()),
        }
    );

    let bodies = captured.lock().unwrap().clone();
    assert_eq!(bodies.len(), 1);
    let body = &bodies[0];
    assert_eq!(body["order_id"], 123);
    assert_eq!(body["customer"]["name"], "Ana");
    assert_eq!(body["customer"]["phone"], "11999999999");
    assert_eq!(body["order"]["payment"], "pix");
    assert_eq!(body["order"]["total"].as_f64(), Some(98.0));
    assert_eq!(body["order"]["items"][0]["name"], "Burger Industrial");
    assert_eq!(body["order"]["items"][0]["quantity"], 2);
    assert_eq!(body["message_summary"].as_str(), Some(order.summary.as_str()));
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn plain_text_reply_becomes_message() {
    let (url, _) = fake_webhook(StatusCode::OK, "Accepted").await;
    let order = assembled();

    let reply = WebhookNotifier::new(url)
        .dispatch(&order.notification(1), &order.summary)
        .await
        .unwrap();

    assert_eq!(reply.display_message, None);
    assert_eq!(reply.message.as_deref(), Some("Accepted"));
}

#[tokio::test]
async fn empty_reply_is_still_success() {
    let (url, _) = fake_webhook(StatusCode::NO_CONTENT, "").await;
    let order = assembled();

    let reply = WebhookNotifier::new(url)
        .dispatch(&order.notification(1), &order.summary)
        .await
        .unwrap();

    assert_eq!(reply, NotificationResult::default());
}

#[tokio::test]
async fn error_status_is_rejected() {
    let (url, _) = fake_webhook(StatusCode::INTERNAL_SERVER_ERROR, "boom").await;
    let order = assembled();

    let err = WebhookNotifier::new(url)
        .dispatch(&order.notification(1), &order.summary)
        .await
        .unwrap_err();

    match err {
        NotificationError::Rejected { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn unreachable_webhook_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let order = assembled();

    let err = WebhookNotifier::new(format!("http://{addr}/hook"))
        .dispatch(&order.notification(1), &order.summary)
        .await
        .unwrap_err();

    assert!(matches!(err, NotificationError::Transport(_)));
}

#[test]
fn reply_parsing_ignores_blank_and_non_string_fields() {
    let parsed = NotificationResult::from_body(r#"{"display_message":"  ","message":7}"#);
    assert_eq!(parsed, NotificationResult::default());

    let parsed = NotificationResult::from_body("[1,2]");
    assert_eq!(parsed.message.as_deref(), Some("[1,2]"));
}
