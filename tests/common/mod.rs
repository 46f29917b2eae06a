#![allow(dead_code)]

use std::{
    collections::VecDeque,
    time::Duration,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicI64, Ordering},
    },
};

use async_trait::async_trait;
use restaurant_orders_api::{
    catalog::MenuCatalog,
    error::{NotificationError, StoreError},
    models::{Order, OrderForm, OrderItem, PaymentMethod},
    services::{
        checkout_service::CheckoutService,
        notifier::{NotificationResult, Notifier, OrderNotification},
        order_assembler::NewOrder,
        persistence::OrderStore,
    },
    session::SessionStore,
};
use uuid::Uuid;

/// Order store kept in memory, with switches to make either write fail.
#[derive(Default)]
pub struct RecordingStore {
    next_id: AtomicI64,
    pub orders: Mutex<Vec<Order>>,
    pub items: Mutex<Vec<OrderItem>>,
    pub fail_orders: AtomicBool,
    pub fail_items: AtomicBool,
}

impl RecordingStore {
    pub fn orders(&self) -> Vec<Order> {
        self.orders.lock().unwrap().clone()
    }

    pub fn items(&self) -> Vec<OrderItem> {
        self.items.lock().unwrap().clone()
    }

    pub fn fail_orders(&self, fail: bool) {
        self.fail_orders.store(fail, Ordering::SeqCst);
    }

    pub fn fail_items(&self, fail: bool) {
        self.fail_items.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl OrderStore for RecordingStore {
    async fn insert_order(&self, order: &NewOrder) -> Result<Order, StoreError> {
        if self.fail_orders.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("orders table offline".into()));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let saved = Order {
            id,
            whatsapp: order.whatsapp.clone(),
            customer_name: order.customer_name.clone(),
            address: order.address.clone(),
            payment_method: order.payment_method.to_string(),
            total_value: order.total_value,
            channel: order.channel.to_string(),
            created_at: order.created_at,
        };
        self.orders.lock().unwrap().push(saved.clone());
        Ok(saved)
    }

    async fn insert_items(&self, items: &[OrderItem]) -> Result<(), StoreError> {
        if self.fail_items.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("order_items table offline".into()));
        }
        self.items.lock().unwrap().extend_from_slice(items);
        Ok(())
    }
}

/// Notifier that records each payload and answers from a script.
/// Once the script runs out every call succeeds with an empty reply.
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<(OrderNotification, String)>>,
    script: Mutex<VecDeque<Result<NotificationResult, NotificationError>>>,
    delay: Option<Duration>,
}

impl RecordingNotifier {
    /// Waits `delay` before answering each call.
    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn reply_with(&self, reply: Result<NotificationResult, NotificationError>) {
        self.script.lock().unwrap().push_back(reply);
    }

    pub fn sent(&self) -> Vec<(OrderNotification, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn dispatch(
        &self,
        order: &OrderNotification,
        summary: &str,
    ) -> Result<NotificationResult, NotificationError> {
        self.sent
            .lock()
            .unwrap()
            .push((order.clone(), summary.to_string()));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(NotificationResult::default()))
    }
}

pub struct Harness {
    pub store: Arc<RecordingStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub sessions: SessionStore,
    pub checkout: CheckoutService,
    pub catalog: MenuCatalog,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_notifier(RecordingNotifier::default())
    }

    pub fn with_notifier(notifier: RecordingNotifier) -> Self {
        let store = Arc::new(RecordingStore::default());
        let notifier = Arc::new(notifier);
        let checkout = CheckoutService::new(store.clone(), notifier.clone());
        Self {
            store,
            notifier,
            sessions: SessionStore::new(),
            checkout,
            catalog: MenuCatalog::house_menu(),
        }
    }

    /// Opens a session holding 2x Burger Industrial and 1x Soda Italiana.
    pub async fn session_with_burgers(&self) -> Uuid {
        let id = self.sessions.create().await;
        let burger = self.catalog.get("2").unwrap().clone();
        let soda = self.catalog.get("6").unwrap().clone();
        self.sessions
            .update_cart(id, |cart| {
                cart.add_item(&burger);
                cart.add_item(&burger);
                cart.add_item(&soda);
            })
            .await
            .unwrap();
        id
    }
}

pub fn form() -> OrderForm {
    OrderForm {
        name: "Ana".into(),
        phone: "11999999999".into(),
        address: "Rua A, 1".into(),
        payment_method: PaymentMethod::Pix,
    }
}
