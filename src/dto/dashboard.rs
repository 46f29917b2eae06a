use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Kpis {
    pub revenue: Decimal,
    pub orders: i64,
    pub unique_customers: i64,
    pub average_ticket: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema, sqlx::FromRow)]
pub struct TopProduct {
    pub name: String,
    pub quantity: i64,
    pub revenue: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema, sqlx::FromRow)]
pub struct DailyRevenue {
    pub day: NaiveDate,
    pub orders: i64,
    pub revenue: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardSummary {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub kpis: Kpis,
    pub top_products: Vec<TopProduct>,
    pub daily: Vec<DailyRevenue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct HeatmapCell {
    pub day: u32,
    pub hour: u32,
    pub orders: i64,
    /// `orders` relative to the busiest cell, 0 to 1.
    pub intensity: f64,
}
