//! Per-visitor state: the cart plus where its checkout stands.
//!
//! Sessions live only in memory and are handed around through `AppState`;
//! nothing outside `SessionStore` mutates them.

use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use serde::Serialize;
use tokio::sync::Mutex;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    cart::Cart,
    error::{CheckoutError, CheckoutStage},
    models::OrderForm,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutPhase {
    #[default]
    Idle,
    Submitting,
    Success,
    Failed,
}

/// What the client sees about the latest checkout attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct CheckoutStatus {
    pub phase: CheckoutPhase,
    pub order_id: Option<i64>,
    pub stage: Option<CheckoutStage>,
    pub order_persisted: bool,
    pub message: Option<String>,
}

impl CheckoutStatus {
    pub fn succeeded(order_id: i64, message: impl Into<String>) -> Self {
        Self {
            phase: CheckoutPhase::Success,
            order_id: Some(order_id),
            stage: None,
            order_persisted: true,
            message: Some(message.into()),
        }
    }

    pub fn failed(err: &CheckoutError) -> Self {
        Self {
            phase: CheckoutPhase::Failed,
            order_id: err.order_id(),
            stage: err.stage(),
            order_persisted: err.order_persisted(),
            message: Some(err.user_message()),
        }
    }
}

/// An order whose header was written by an attempt that later failed.
/// A retry with the same cart and form continues it instead of inserting again.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingOrder {
    pub order_id: i64,
    pub cart: Cart,
    pub form: OrderForm,
    pub items_written: bool,
}

impl PendingOrder {
    pub fn matches(&self, cart: &Cart, form: &OrderForm) -> bool {
        self.cart == *cart && self.form == *form
    }
}

#[derive(Debug)]
struct Session {
    cart: Cart,
    status: CheckoutStatus,
    pending: Option<PendingOrder>,
    last_seen: Instant,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            cart: Cart::new(),
            status: CheckoutStatus::default(),
            pending: None,
            last_seen: Instant::now(),
        }
    }
}

impl Session {
    fn submitting(&self) -> bool {
        self.status.phase == CheckoutPhase::Submitting
    }
}

#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens an empty session and returns its id.
    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.inner.lock().await.insert(id, Session::default());
        id
    }

    pub async fn cart(&self, id: Uuid) -> Cart {
        let mut sessions = self.inner.lock().await;
        let session = sessions.entry(id).or_default();
        session.last_seen = Instant::now();
        session.cart.clone()
    }

    /// Applies `f` to the session cart unless a checkout is running.
    pub async fn update_cart<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut Cart) -> R,
    ) -> Result<R, CheckoutError> {
        let mut sessions = self.inner.lock().await;
        let session = sessions.entry(id).or_default();
        session.last_seen = Instant::now();
        if session.submitting() {
            return Err(CheckoutError::InProgress);
        }
        Ok(f(&mut session.cart))
    }

    pub async fn status(&self, id: Uuid) -> CheckoutStatus {
        let sessions = self.inner.lock().await;
        sessions
            .get(&id)
            .map(|s| s.status.clone())
            .unwrap_or_default()
    }

    /// Moves the session to `Submitting` and snapshots what the pipeline needs.
    pub async fn begin_checkout(
        &self,
        id: Uuid,
    ) -> Result<(Cart, Option<PendingOrder>), CheckoutError> {
        let mut sessions = self.inner.lock().await;
        let session = sessions.entry(id).or_default();
        session.last_seen = Instant::now();
        if session.submitting() {
            return Err(CheckoutError::InProgress);
        }
        session.status = CheckoutStatus {
            phase: CheckoutPhase::Submitting,
            ..CheckoutStatus::default()
        };
        Ok((session.cart.clone(), session.pending.clone()))
    }

    /// Records a successful checkout and empties the cart.
    pub async fn complete_checkout(&self, id: Uuid, status: CheckoutStatus) {
        let mut sessions = self.inner.lock().await;
        let session = sessions.entry(id).or_default();
        session.cart.clear();
        session.pending = None;
        session.status = status;
        session.last_seen = Instant::now();
    }

    /// Records a failed checkout; the cart is left as it was.
    pub async fn fail_checkout(
        &self,
        id: Uuid,
        status: CheckoutStatus,
        pending: Option<PendingOrder>,
    ) {
        let mut sessions = self.inner.lock().await;
        let session = sessions.entry(id).or_default();
        session.pending = pending;
        session.status = status;
        session.last_seen = Instant::now();
    }

    /// Drops sessions unused for longer than `max_idle`. Sessions mid-checkout are kept.
    pub async fn evict_idle(&self, max_idle: Duration) -> usize {
        let mut sessions = self.inner.lock().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.submitting() || s.last_seen.elapsed() <= max_idle);
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }
}
