//! Two dependent writes: the order header, then its items.
//!
//! The writes are separate statements with no shared transaction. When the
//! second one fails the header stays committed and the error carries its id,
//! so the caller can resume or flag it. Nothing here retries.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, EntityTrait, Set};

use crate::{
    db::OrmConn,
    entity::{
        order_items::ActiveModel as OrderItemActive,
        orders::{ActiveModel as OrderActive, Model as OrderModel},
        OrderItems,
    },
    error::{PersistenceError, StoreError},
    models::{Order, OrderItem},
    services::order_assembler::{NewOrder, NewOrderItem},
};

#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Inserts the header and returns it with its generated id.
    async fn insert_order(&self, order: &NewOrder) -> Result<Order, StoreError>;

    /// Inserts every item in one statement.
    async fn insert_items(&self, items: &[OrderItem]) -> Result<(), StoreError>;
}

#[derive(Debug, Clone)]
pub struct PgOrderStore {
    orm: OrmConn,
}

impl PgOrderStore {
    pub fn new(orm: OrmConn) -> Self {
        Self { orm }
    }
}

#[async_trait]
impl OrderStore for PgOrderStore {
    async fn insert_order(&self, order: &NewOrder) -> Result<Order, StoreError> {
        let model = OrderActive {
            id: NotSet,
            whatsapp: Set(order.whatsapp.clone()),
            nome: Set(order.customer_name.clone()),
            endereco: Set(order.address.clone()),
            forma_pagamento: Set(order.payment_method.as_str().to_string()),
            valor_total: Set(order.total_value),
            canal: Set(order.channel.to_string()),
            created_at: Set(order.created_at.into()),
        }
        .insert(&self.orm)
        .await?;

        Ok(order_from_entity(model))
    }

    async fn insert_items(&self, items: &[OrderItem]) -> Result<(), StoreError> {
        let rows = items.iter().map(|item| OrderItemActive {
            id: NotSet,
            order_id: Set(item.order_id),
            produto: Set(item.product_name.clone()),
            preco: Set(item.unit_price),
            quantidade: Set(item.quantity),
            subtotal: Set(item.subtotal),
        });
        OrderItems::insert_many(rows).exec(&self.orm).await?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct PersistedOrder {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

#[derive(Clone)]
pub struct PersistenceGateway {
    store: Arc<dyn OrderStore>,
}

impl PersistenceGateway {
    pub fn new(store: Arc<dyn OrderStore>) -> Self {
        Self { store }
    }

    /// Writes the header and then its items.
    pub async fn persist(
        &self,
        order: &NewOrder,
        items: &[NewOrderItem],
    ) -> Result<PersistedOrder, PersistenceError> {
        let order = self
            .store
            .insert_order(order)
            .await
            .map_err(|source| PersistenceError::Order { source })?;
        tracing::info!(order_id = order.id, total = %order.total_value, "order header saved");

        let items = self.persist_items(order.id, items).await?;
        Ok(PersistedOrder { order, items })
    }

    /// Writes the items of an order whose header already exists.
    pub async fn persist_items(
        &self,
        order_id: i64,
        items: &[NewOrderItem],
    ) -> Result<Vec<OrderItem>, PersistenceError> {
        let rows: Vec<OrderItem> = items
            .iter()
            .map(|item| OrderItem {
                order_id,
                product_name: item.product_name.clone(),
                unit_price: item.unit_price,
                quantity: item.quantity,
                subtotal: item.subtotal,
            })
            .collect();

        self.store
            .insert_items(&rows)
            .await
            .map_err(|source| PersistenceError::Items { order_id, source })?;
        tracing::info!(order_id, items = rows.len(), "order items saved");
        Ok(rows)
    }
}

pub fn order_from_entity(model: OrderModel) -> Order {
    Order {
        id: model.id,
        whatsapp: model.whatsapp,
        customer_name: model.nome,
        address: model.endereco,
        payment_method: model.forma_pagamento,
        total_value: model.valor_total,
        channel: model.canal,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
