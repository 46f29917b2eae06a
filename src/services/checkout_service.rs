//! Checkout pipeline: assemble, save the header, save the items, notify.
//!
//! Stages run strictly in order and each one only starts when the previous
//! returned. The cart is cleared only after the notification went through.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    cart::Cart,
    error::{CheckoutError, PersistenceError},
    models::OrderForm,
    services::{
        notifier::{NotificationResult, Notifier},
        order_assembler::assemble,
        persistence::{OrderStore, PersistenceGateway},
    },
    session::{CheckoutStatus, PendingOrder, SessionStore},
};

pub const DEFAULT_CONFIRMATION: &str =
    "Pedido recebido! Em breve você receberá a confirmação pelo WhatsApp.";

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CheckoutReceipt {
    pub order_id: i64,
    pub total: Decimal,
    /// Text to show the customer.
    pub message: String,
    pub display_message: Option<String>,
    pub notification_message: Option<String>,
}

impl CheckoutReceipt {
    fn new(order_id: i64, total: Decimal, reply: NotificationResult) -> Self {
        let message = reply
            .display_message
            .clone()
            .or_else(|| reply.message.clone())
            .unwrap_or_else(|| DEFAULT_CONFIRMATION.to_string());
        Self {
            order_id,
            total,
            message,
            display_message: reply.display_message,
            notification_message: reply.message,
        }
    }
}

/// Result of one pass through the pipeline, plus the order to resume on retry.
#[derive(Debug)]
pub struct Attempt {
    pub result: Result<CheckoutReceipt, CheckoutError>,
    pub pending: Option<PendingOrder>,
}

impl Attempt {
    fn failed(err: impl Into<CheckoutError>, pending: Option<PendingOrder>) -> Self {
        Self {
            result: Err(err.into()),
            pending,
        }
    }
}

#[derive(Clone)]
pub struct CheckoutService {
    gateway: PersistenceGateway,
    notifier: Arc<dyn Notifier>,
}

impl CheckoutService {
    pub fn new(store: Arc<dyn OrderStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            gateway: PersistenceGateway::new(store),
            notifier,
        }
    }

    /// Runs a checkout for the session's current cart.
    ///
    /// The pipeline runs on its own task, so a caller that goes away mid-way
    /// does not cancel it and the session always leaves `Submitting`.
    pub async fn submit(
        &self,
        sessions: &SessionStore,
        session_id: Uuid,
        form: OrderForm,
    ) -> Result<CheckoutReceipt, CheckoutError> {
        let (cart, pending) = sessions.begin_checkout(session_id).await?;

        let service = self.clone();
        let task_sessions = sessions.clone();
        let task = tokio::spawn(async move {
            let attempt = service.run(&cart, &form, pending).await;
            settle(&task_sessions, session_id, attempt).await
        });

        match task.await {
            Ok(result) => result,
            Err(err) => {
                tracing::error!(%session_id, error = %err, "checkout task failed");
                let failure = CheckoutError::Interrupted;
                sessions
                    .fail_checkout(session_id, CheckoutStatus::failed(&failure), None)
                    .await;
                Err(failure)
            }
        }
    }

    pub async fn run(
        &self,
        cart: &Cart,
        form: &OrderForm,
        pending: Option<PendingOrder>,
    ) -> Attempt {
        let assembled = match assemble(cart, form) {
            Ok(assembled) => assembled,
            Err(err) => {
                tracing::warn!(error = %err, "checkout rejected");
                return Attempt::failed(err, pending);
            }
        };

        let resumable = match pending {
            Some(p) if p.matches(cart, form) => Some(p),
            Some(p) => {
                if !p.items_written {
                    tracing::warn!(
                        order_id = p.order_id,
                        reconciliation = "required",
                        "cart changed, abandoning order without items"
                    );
                }
                None
            }
            None => None,
        };

        let order_id = match resumable {
            Some(p) if p.items_written => {
                tracing::info!(order_id = p.order_id, "order already saved, resending notification");
                p.order_id
            }
            Some(p) => match self.gateway.persist_items(p.order_id, &assembled.items).await {
                Ok(_) => p.order_id,
                Err(err) => {
                    log_persistence_error(&err);
                    return Attempt::failed(err, Some(p));
                }
            },
            None => match self.gateway.persist(&assembled.order, &assembled.items).await {
                Ok(saved) => saved.order.id,
                Err(err) => {
                    log_persistence_error(&err);
                    let pending = match &err {
                        PersistenceError::Items { order_id, .. } => Some(PendingOrder {
                            order_id: *order_id,
                            cart: cart.clone(),
                            form: form.clone(),
                            items_written: false,
                        }),
                        PersistenceError::Order { .. } => None,
                    };
                    return Attempt::failed(err, pending);
                }
            },
        };

        let notification = assembled.notification(order_id);
        match self.notifier.dispatch(&notification, &assembled.summary).await {
            Ok(reply) => {
                tracing::info!(order_id, "checkout completed");
                Attempt {
                    result: Ok(CheckoutReceipt::new(
                        order_id,
                        assembled.order.total_value,
                        reply,
                    )),
                    pending: None,
                }
            }
            Err(source) => {
                tracing::warn!(order_id, error = %source, "order saved but notification failed");
                Attempt::failed(
                    CheckoutError::Notification { order_id, source },
                    Some(PendingOrder {
                        order_id,
                        cart: cart.clone(),
                        form: form.clone(),
                        items_written: true,
                    }),
                )
            }
        }
    }
}

/// Records the outcome of an attempt on the session.
async fn settle(
    sessions: &SessionStore,
    session_id: Uuid,
    attempt: Attempt,
) -> Result<CheckoutReceipt, CheckoutError> {
    match &attempt.result {
        Ok(receipt) => {
            sessions
                .complete_checkout(
                    session_id,
                    CheckoutStatus::succeeded(receipt.order_id, receipt.message.clone()),
                )
                .await;
        }
        Err(err) => {
            sessions
                .fail_checkout(session_id, CheckoutStatus::failed(err), attempt.pending)
                .await;
        }
    }
    attempt.result
}

fn log_persistence_error(err: &PersistenceError) {
    match err {
        PersistenceError::Order { source } => {
            tracing::error!(stage = "order", error = %source, "order insert failed");
        }
        PersistenceError::Items { order_id, source } => {
            tracing::error!(
                stage = "items",
                order_id,
                reconciliation = "required",
                error = %source,
                "order saved without items"
            );
        }
    }
}
