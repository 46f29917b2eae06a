use std::sync::Arc;

use crate::{
    catalog::MenuCatalog,
    config::AppConfig,
    db::{DbPool, OrmConn, orm_from_pool},
    services::{
        checkout_service::CheckoutService, notifier::WebhookNotifier, persistence::PgOrderStore,
    },
    session::SessionStore,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub catalog: Arc<MenuCatalog>,
    pub sessions: SessionStore,
    pub checkout: CheckoutService,
    pub jwt_secret: Arc<str>,
    pub dashboard_timezone: Arc<str>,
}

impl AppState {
    pub fn new(config: &AppConfig, pool: DbPool) -> Self {
        let orm = orm_from_pool(&pool);
        let checkout = CheckoutService::new(
            Arc::new(PgOrderStore::new(orm.clone())),
            Arc::new(WebhookNotifier::new(config.webhook_url.clone())),
        );
        Self {
            pool,
            orm,
            catalog: Arc::new(MenuCatalog::house_menu()),
            sessions: SessionStore::new(),
            checkout,
            jwt_secret: Arc::from(config.jwt_secret.as_str()),
            dashboard_timezone: Arc::from(config.dashboard_timezone.as_str()),
        }
    }
}
