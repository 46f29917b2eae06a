use std::collections::HashMap;

use chrono::NaiveDate;
use restaurant_orders_api::{
    routes::params::{Pagination, SalesFilter, SalesQuery},
    services::dashboard_service::{heatmap_grid, kpis},
};
use rust_decimal::Decimal;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn heatmap_covers_every_day_and_hour() {
    let mut counts = HashMap::new();
    counts.insert((5, 20), 4);
    counts.insert((12, 13), 2);

    let grid = heatmap_grid(&counts);
    assert_eq!(grid.len(), 31 * 24);

    let peak = grid.iter().find(|c| c.day == 5 && c.hour == 20).unwrap();
    assert_eq!(peak.orders, 4);
    assert_eq!(peak.intensity, 1.0);

    let half = grid.iter().find(|c| c.day == 12 && c.hour == 13).unwrap();
    assert_eq!(half.intensity, 0.5);

    let quiet = grid.iter().find(|c| c.day == 1 && c.hour == 0).unwrap();
    assert_eq!(quiet.orders, 0);
    assert_eq!(quiet.intensity, 0.0);
}

#[test]
fn empty_heatmap_has_zero_intensity() {
    let grid = heatmap_grid(&HashMap::new());
    assert_eq!(grid.len(), 744);
    assert!(grid.iter().all(|c| c.orders == 0 && c.intensity == 0.0));
}

#[test]
fn kpis_average_ticket() {
    let k = kpis(Decimal::new(10000, 2), 3, 2);
    assert_eq!(k.average_ticket, Decimal::new(3333, 2));
    assert_eq!(k.unique_customers, 2);

    let none = kpis(Decimal::ZERO, 0, 0);
    assert_eq!(none.average_ticket, Decimal::ZERO);
}

#[test]
fn range_defaults_to_last_thirty_days() {
    let today = date(2026, 3, 31);
    let (start, end) = SalesFilter::default().range(today);
    assert_eq!(end, today);
    assert_eq!(start, date(2026, 3, 1));
}

#[test]
fn reversed_range_is_swapped() {
    let filter = SalesFilter {
        start: Some(date(2026, 2, 10)),
        end: Some(date(2026, 2, 1)),
        ..SalesFilter::default()
    };
    assert_eq!(
        filter.range(date(2026, 3, 1)),
        (date(2026, 2, 1), date(2026, 2, 10))
    );
}

#[test]
fn blank_text_filters_are_ignored() {
    let filter = SalesFilter {
        customer: Some("  ".into()),
        product: Some(" burger ".into()),
        ..SalesFilter::default()
    };
    assert_eq!(filter.customer(), None);
    assert_eq!(filter.product(), Some("burger"));
    assert_eq!(filter.address(), None);
}

#[test]
fn pagination_is_clamped() {
    let p = Pagination {
        page: Some(0),
        per_page: Some(1_000),
    };
    assert_eq!(p.normalize(), (1, 100, 0));

    let p = Pagination {
        page: Some(3),
        per_page: Some(10),
    };
    assert_eq!(p.normalize(), (3, 10, 20));
}

#[test]
fn huge_page_does_not_overflow_offset() {
    let p = Pagination {
        page: Some(i64::MAX),
        per_page: Some(100),
    };
    let (page, per_page, offset) = p.normalize();
    assert_eq!(page, i64::MAX);
    assert_eq!(per_page, 100);
    assert_eq!(offset, i64::MAX);
}

#[test]
fn sales_query_splits_into_pagination_and_filter() {
    let query = SalesQuery {
        page: Some(2),
        customer: Some("ana".into()),
        min_total: Some(Decimal::new(5000, 2)),
        ..SalesQuery::default()
    };
    let (pagination, filter) = query.split();
    assert_eq!(pagination.page, Some(2));
    assert_eq!(filter.customer(), Some("ana"));
    assert_eq!(filter.min_total, Some(Decimal::new(5000, 2)));
}
