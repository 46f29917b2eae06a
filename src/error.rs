use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::response::ApiResponse;

/// Rejections raised before anything is written or sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("{0} must not be blank")]
    BlankField(&'static str),

    #[error("quantity of product {0} is out of range")]
    QuantityOutOfRange(String),
}

/// Failure of a single call against the order store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Orm(#[from] sea_orm::DbErr),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("order insert failed: {source}")]
    Order { source: StoreError },

    /// The order header is committed but has no items.
    #[error("item insert failed for order {order_id}: {source}")]
    Items { order_id: i64, source: StoreError },
}

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("webhook responded with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutStage {
    Validation,
    Order,
    Items,
    Notification,
}

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("a checkout is already in progress for this session")]
    InProgress,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error("order {order_id} was saved but the notification failed: {source}")]
    Notification {
        order_id: i64,
        source: NotificationError,
    },

    /// The pipeline task panicked before reporting an outcome.
    #[error("checkout was interrupted")]
    Interrupted,
}

impl CheckoutError {
    pub fn stage(&self) -> Option<CheckoutStage> {
        match self {
            CheckoutError::InProgress | CheckoutError::Interrupted => None,
            CheckoutError::Validation(_) => Some(CheckoutStage::Validation),
            CheckoutError::Persistence(PersistenceError::Order { .. }) => {
                Some(CheckoutStage::Order)
            }
            CheckoutError::Persistence(PersistenceError::Items { .. }) => {
                Some(CheckoutStage::Items)
            }
            CheckoutError::Notification { .. } => Some(CheckoutStage::Notification),
        }
    }

    /// Id of the order header, when one was written before the failure.
    pub fn order_id(&self) -> Option<i64> {
        match self {
            CheckoutError::Persistence(PersistenceError::Items { order_id, .. })
            | CheckoutError::Notification { order_id, .. } => Some(*order_id),
            _ => None,
        }
    }

    /// True when the sale itself (header and items) is recorded.
    pub fn order_persisted(&self) -> bool {
        matches!(self, CheckoutError::Notification { .. })
    }

    /// Message shown to the customer.
    pub fn user_message(&self) -> String {
        match self {
            CheckoutError::InProgress => {
                "Seu pedido já está sendo enviado. Aguarde a confirmação.".to_string()
            }
            CheckoutError::Validation(ValidationError::EmptyCart) => {
                "Seu carrinho está vazio.".to_string()
            }
            CheckoutError::Validation(ValidationError::BlankField(field)) => {
                format!("Preencha o campo obrigatório: {field}.")
            }
            CheckoutError::Validation(ValidationError::QuantityOutOfRange(_)) => {
                "A quantidade de um dos itens é inválida.".to_string()
            }
            CheckoutError::Persistence(PersistenceError::Order { .. }) => {
                "Não foi possível registrar seu pedido. Tente novamente.".to_string()
            }
            CheckoutError::Persistence(PersistenceError::Items { order_id, .. }) => format!(
                "Seu pedido #{order_id} foi iniciado, mas os itens não puderam ser registrados. \
                 Tente novamente para concluir."
            ),
            CheckoutError::Notification { order_id, .. } => format!(
                "Seu pedido #{order_id} foi registrado, mas a confirmação não pôde ser enviada. \
                 Tente novamente para reenviar a confirmação."
            ),
            CheckoutError::Interrupted => {
                "Não foi possível concluir seu pedido. Tente novamente.".to_string()
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request {0}")]
    BadRequest(String),

    #[error("Unauthorized {0}")]
    Unauthorized(String),

    #[error("Forbidden")]
    Forbidden,

    #[error("Checkout failed: {0}")]
    Checkout(#[from] CheckoutError),

    #[error("Database error")]
    DbError(#[from] sqlx::Error),

    #[error("ORM error")]
    OrmError(#[from] sea_orm::DbErr),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorData {
    error: String,
}

/// What the client learns about a failed checkout. Store and webhook
/// diagnostics stay in the logs.
#[derive(Debug, Serialize, ToSchema)]
pub struct CheckoutFailure {
    pub stage: Option<CheckoutStage>,
    pub order_id: Option<i64>,
    pub order_persisted: bool,
}

impl From<&CheckoutError> for CheckoutFailure {
    fn from(err: &CheckoutError) -> Self {
        Self {
            stage: err.stage(),
            order_id: err.order_id(),
            order_persisted: err.order_persisted(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Checkout(err) = &self {
            let status = match err {
                CheckoutError::InProgress => StatusCode::CONFLICT,
                CheckoutError::Validation(_) => StatusCode::BAD_REQUEST,
                CheckoutError::Persistence(_) | CheckoutError::Interrupted => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
                CheckoutError::Notification { .. } => StatusCode::BAD_GATEWAY,
            };
            let body = ApiResponse::failure(err.user_message(), CheckoutFailure::from(err));
            return (status, axum::Json(body)).into_response();
        }

        let status = match &self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::DbError(_) | AppError::OrmError(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Checkout(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = ?self, "request failed");
        }

        let message = self.to_string();
        let body = ApiResponse::failure(message.clone(), ErrorData { error: message });

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
