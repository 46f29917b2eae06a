use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::models::Category;

pub const DEFAULT_RANGE_DAYS: u64 = 30;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl Pagination {
    pub fn normalize(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1).saturating_mul(per_page);
        (page, per_page, offset)
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MenuQuery {
    pub category: Option<Category>,
}

/// Filters shared by every dashboard endpoint. Text filters are
/// case-insensitive substring matches; dates are inclusive.
#[derive(Debug, Default, Clone, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SalesFilter {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub customer: Option<String>,
    pub product: Option<String>,
    pub address: Option<String>,
    pub min_total: Option<Decimal>,
}

impl SalesFilter {
    /// Date range to query, defaulting to the last thirty days up to `today`.
    pub fn range(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let end = self.end.unwrap_or(today);
        let start = self
            .start
            .unwrap_or_else(|| end.checked_sub_days(Days::new(DEFAULT_RANGE_DAYS)).unwrap_or(end));
        if start > end { (end, start) } else { (start, end) }
    }

    pub fn customer(&self) -> Option<&str> {
        non_blank(self.customer.as_deref())
    }

    pub fn product(&self) -> Option<&str> {
        non_blank(self.product.as_deref())
    }

    pub fn address(&self) -> Option<&str> {
        non_blank(self.address.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SalesQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub customer: Option<String>,
    pub product: Option<String>,
    pub address: Option<String>,
    pub min_total: Option<Decimal>,
}

impl SalesQuery {
    pub fn split(self) -> (Pagination, SalesFilter) {
        (
            Pagination {
                page: self.page,
                per_page: self.per_page,
            },
            SalesFilter {
                start: self.start,
                end: self.end,
                customer: self.customer,
                product: self.product,
                address: self.address,
                min_total: self.min_total,
            },
        )
    }
}
