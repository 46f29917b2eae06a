//! Sales analytics over the persisted orders.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{Postgres, postgres::PgArguments, query::QueryAs};

use crate::{
    db::DbPool,
    dto::{
        dashboard::{DailyRevenue, DashboardSummary, HeatmapCell, Kpis, TopProduct},
        orders::{OrderList, OrderWithItems},
    },
    error::AppResult,
    models::{Order, OrderItem},
    response::{ApiResponse, Meta},
    routes::params::{Pagination, SalesFilter},
};

const TOP_PRODUCTS: i64 = 5;

// Placeholders $1..$7, bound in this order by `bind_filter`.
const FILTER_SQL: &str = r#"
    (o.created_at AT TIME ZONE $1)::date BETWEEN $2 AND $3
    AND ($4::text IS NULL OR o.nome ILIKE '%' || $4 || '%')
    AND ($5::text IS NULL OR o.endereco ILIKE '%' || $5 || '%')
    AND ($6::numeric IS NULL OR o.valor_total >= $6)
    AND ($7::text IS NULL OR EXISTS (
        SELECT 1 FROM order_items fi
        WHERE fi.order_id = o.id AND fi.produto ILIKE '%' || $7 || '%'
    ))
"#;

/// Filter values resolved against a timezone and today's date.
#[derive(Debug, Clone)]
struct BoundFilter {
    tz: String,
    start: NaiveDate,
    end: NaiveDate,
    customer: Option<String>,
    address: Option<String>,
    min_total: Option<Decimal>,
    product: Option<String>,
}

impl BoundFilter {
    fn new(tz: &str, filter: &SalesFilter) -> Self {
        let (start, end) = filter.range(Utc::now().date_naive());
        Self {
            tz: tz.to_string(),
            start,
            end,
            customer: filter.customer().map(str::to_string),
            address: filter.address().map(str::to_string),
            min_total: filter.min_total,
            product: filter.product().map(str::to_string),
        }
    }
}

fn bind_filter<'q, O>(
    query: QueryAs<'q, Postgres, O, PgArguments>,
    f: &BoundFilter,
) -> QueryAs<'q, Postgres, O, PgArguments> {
    query
        .bind(f.tz.clone())
        .bind(f.start)
        .bind(f.end)
        .bind(f.customer.clone())
        .bind(f.address.clone())
        .bind(f.min_total)
        .bind(f.product.clone())
}

#[derive(sqlx::FromRow)]
struct KpiRow {
    revenue: Decimal,
    orders: i64,
    unique_customers: i64,
}

#[derive(sqlx::FromRow)]
struct HeatmapRow {
    day: i32,
    hour: i32,
    orders: i64,
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i64,
    whatsapp: String,
    nome: String,
    endereco: String,
    forma_pagamento: String,
    valor_total: Decimal,
    canal: String,
    created_at: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Order {
            id: row.id,
            whatsapp: row.whatsapp,
            customer_name: row.nome,
            address: row.endereco,
            payment_method: row.forma_pagamento,
            total_value: row.valor_total,
            channel: row.canal,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct OrderItemRow {
    order_id: i64,
    produto: String,
    preco: Decimal,
    quantidade: i32,
    subtotal: Decimal,
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        OrderItem {
            order_id: row.order_id,
            product_name: row.produto,
            unit_price: row.preco,
            quantity: row.quantidade,
            subtotal: row.subtotal,
        }
    }
}

pub async fn summary(
    pool: &DbPool,
    tz: &str,
    filter: &SalesFilter,
) -> AppResult<ApiResponse<DashboardSummary>> {
    let f = BoundFilter::new(tz, filter);

    let kpi_sql = format!(
        "SELECT COALESCE(SUM(o.valor_total), 0) AS revenue, COUNT(*) AS orders, \
         COUNT(DISTINCT o.whatsapp) AS unique_customers \
         FROM orders o WHERE {FILTER_SQL}"
    );
    let kpi: KpiRow = bind_filter(sqlx::query_as(&kpi_sql), &f)
        .fetch_one(pool)
        .await?;

    let top_sql = format!(
        "SELECT i.produto AS name, SUM(i.quantidade)::int8 AS quantity, SUM(i.subtotal) AS revenue \
         FROM order_items i JOIN orders o ON o.id = i.order_id \
         WHERE {FILTER_SQL} \
         GROUP BY i.produto ORDER BY quantity DESC, revenue DESC LIMIT {TOP_PRODUCTS}"
    );
    let top_products: Vec<TopProduct> = bind_filter(sqlx::query_as(&top_sql), &f)
        .fetch_all(pool)
        .await?;

    let daily_sql = format!(
        "SELECT (o.created_at AT TIME ZONE $1)::date AS day, COUNT(*) AS orders, \
         SUM(o.valor_total) AS revenue \
         FROM orders o WHERE {FILTER_SQL} GROUP BY day ORDER BY day"
    );
    let daily: Vec<DailyRevenue> = bind_filter(sqlx::query_as(&daily_sql), &f)
        .fetch_all(pool)
        .await?;

    let data = DashboardSummary {
        start: f.start,
        end: f.end,
        kpis: kpis(kpi.revenue, kpi.orders, kpi.unique_customers),
        top_products,
        daily,
    };
    Ok(ApiResponse::success("Dashboard", data, Some(Meta::empty())))
}

pub fn kpis(revenue: Decimal, orders: i64, unique_customers: i64) -> Kpis {
    let average_ticket = if orders > 0 {
        (revenue / Decimal::from(orders)).round_dp(2)
    } else {
        Decimal::ZERO
    };
    Kpis {
        revenue,
        orders,
        unique_customers,
        average_ticket,
    }
}

pub async fn heatmap(
    pool: &DbPool,
    tz: &str,
    filter: &SalesFilter,
) -> AppResult<ApiResponse<Vec<HeatmapCell>>> {
    let f = BoundFilter::new(tz, filter);
    let sql = format!(
        "SELECT EXTRACT(DAY FROM o.created_at AT TIME ZONE $1)::int4 AS day, \
         EXTRACT(HOUR FROM o.created_at AT TIME ZONE $1)::int4 AS hour, \
         COUNT(*) AS orders \
         FROM orders o WHERE {FILTER_SQL} GROUP BY 1, 2"
    );
    let rows: Vec<HeatmapRow> = bind_filter(sqlx::query_as(&sql), &f)
        .fetch_all(pool)
        .await?;

    let counts = rows
        .into_iter()
        .filter_map(|r| {
            let day = u32::try_from(r.day).ok()?;
            let hour = u32::try_from(r.hour).ok()?;
            Some(((day, hour), r.orders))
        })
        .collect();

    Ok(ApiResponse::success(
        "Heatmap",
        heatmap_grid(&counts),
        Some(Meta::empty()),
    ))
}

/// Full day-of-month by hour grid, intensity scaled to the busiest cell.
pub fn heatmap_grid(counts: &HashMap<(u32, u32), i64>) -> Vec<HeatmapCell> {
    let peak = counts.values().copied().max().unwrap_or(0);
    (1..=31)
        .flat_map(|day| (0..24).map(move |hour| (day, hour)))
        .map(|(day, hour)| {
            let orders = counts.get(&(day, hour)).copied().unwrap_or(0);
            let intensity = if peak > 0 {
                orders as f64 / peak as f64
            } else {
                0.0
            };
            HeatmapCell {
                day,
                hour,
                orders,
                intensity,
            }
        })
        .collect()
}

pub async fn list_sales(
    pool: &DbPool,
    tz: &str,
    pagination: Pagination,
    filter: &SalesFilter,
) -> AppResult<ApiResponse<OrderList>> {
    let (page, limit, offset) = pagination.normalize();
    let f = BoundFilter::new(tz, filter);

    let list_sql = format!(
        "SELECT o.* FROM orders o WHERE {FILTER_SQL} \
         ORDER BY o.created_at DESC LIMIT $8 OFFSET $9"
    );
    let orders: Vec<OrderRow> = bind_filter(sqlx::query_as(&list_sql), &f)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

    let count_sql = format!("SELECT COUNT(*) FROM orders o WHERE {FILTER_SQL}");
    let total: (i64,) = bind_filter(sqlx::query_as(&count_sql), &f)
        .fetch_one(pool)
        .await?;

    let items = with_items(pool, orders).await?;
    let meta = Meta::new(page, limit, total.0);
    Ok(ApiResponse::success("Sales", OrderList { items }, Some(meta)))
}

/// Orders whose items were never written.
pub async fn list_orphaned(pool: &DbPool) -> AppResult<ApiResponse<Vec<Order>>> {
    let rows: Vec<OrderRow> = sqlx::query_as(
        r#"
        SELECT o.* FROM orders o
        WHERE NOT EXISTS (SELECT 1 FROM order_items i WHERE i.order_id = o.id)
        ORDER BY o.created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    let meta = Meta::all(rows.len());
    let orders = rows.into_iter().map(Order::from).collect();
    Ok(ApiResponse::success("Orphaned orders", orders, Some(meta)))
}

async fn with_items(pool: &DbPool, orders: Vec<OrderRow>) -> AppResult<Vec<OrderWithItems>> {
    let ids: Vec<i64> = orders.iter().map(|o| o.id).collect();
    let rows: Vec<OrderItemRow> = sqlx::query_as(
        "SELECT order_id, produto, preco, quantidade, subtotal FROM order_items \
         WHERE order_id = ANY($1) ORDER BY id",
    )
    .bind(ids)
    .fetch_all(pool)
    .await?;

    let mut by_order: HashMap<i64, Vec<OrderItem>> = HashMap::new();
    for row in rows {
        by_order.entry(row.order_id).or_default().push(row.into());
    }

    Ok(orders
        .into_iter()
        .map(|row| {
            let items = by_order.remove(&row.id).unwrap_or_default();
            OrderWithItems {
                order: row.into(),
                items,
            }
        })
        .collect())
}
