use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    dto::{
        dashboard::{DashboardSummary, HeatmapCell},
        orders::OrderList,
    },
    error::AppResult,
    middleware::auth::{AuthUser, ensure_admin},
    models::Order,
    response::ApiResponse,
    routes::params::{SalesFilter, SalesQuery},
    services::dashboard_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/dashboard/heatmap", get(heatmap))
        .route("/sales", get(list_sales))
        .route("/orders/orphaned", get(list_orphaned_orders))
}

#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    params(SalesFilter),
    responses(
        (status = 200, description = "KPIs, top products and daily revenue", body = ApiResponse<DashboardSummary>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn dashboard(
    State(state): State<AppState>,
    user: AuthUser,
    Query(filter): Query<SalesFilter>,
) -> AppResult<Json<ApiResponse<DashboardSummary>>> {
    ensure_admin(&user)?;
    let resp = dashboard_service::summary(&state.pool, &state.dashboard_timezone, &filter).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/dashboard/heatmap",
    params(SalesFilter),
    responses(
        (status = 200, description = "Orders by day of month and hour", body = ApiResponse<Vec<HeatmapCell>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn heatmap(
    State(state): State<AppState>,
    user: AuthUser,
    Query(filter): Query<SalesFilter>,
) -> AppResult<Json<ApiResponse<Vec<HeatmapCell>>>> {
    ensure_admin(&user)?;
    let resp = dashboard_service::heatmap(&state.pool, &state.dashboard_timezone, &filter).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/sales",
    params(SalesQuery),
    responses(
        (status = 200, description = "Filtered orders with their items", body = ApiResponse<OrderList>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_sales(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<SalesQuery>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    ensure_admin(&user)?;
    let (pagination, filter) = query.split();
    let resp =
        dashboard_service::list_sales(&state.pool, &state.dashboard_timezone, pagination, &filter)
            .await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/orders/orphaned",
    responses(
        (status = 200, description = "Orders saved without items, awaiting reconciliation", body = ApiResponse<Vec<Order>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_orphaned_orders(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<Vec<Order>>>> {
    ensure_admin(&user)?;
    let resp = dashboard_service::list_orphaned(&state.pool).await?;
    Ok(Json(resp))
}
