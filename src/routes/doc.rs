use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse},
        cart::{AddToCartRequest, AddToCartResponse, CartView, SessionCreated, UpdateQuantityRequest},
        dashboard::{DailyRevenue, DashboardSummary, HeatmapCell, Kpis, TopProduct},
        orders::{OrderList, OrderWithItems},
    },
    error::{CheckoutFailure, CheckoutStage},
    models::{CartLine, Category, Order, OrderForm, OrderItem, PaymentMethod, Product},
    response::{ApiResponse, Meta},
    routes::{admin, auth, cart, checkout, health, menu, params},
    services::{checkout_service::CheckoutReceipt, notifier::NotificationResult},
    session::{CheckoutPhase, CheckoutStatus},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        menu::list_menu,
        menu::get_menu_item,
        cart::create_session,
        cart::view_cart,
        cart::add_to_cart,
        cart::update_quantity,
        cart::clear_cart,
        checkout::checkout,
        checkout::checkout_status,
        auth::login,
        admin::dashboard,
        admin::heatmap,
        admin::list_sales,
        admin::list_orphaned_orders
    ),
    components(
        schemas(
            Product,
            Category,
            CartLine,
            PaymentMethod,
            OrderForm,
            Order,
            OrderItem,
            CartView,
            AddToCartRequest,
            AddToCartResponse,
            UpdateQuantityRequest,
            SessionCreated,
            CheckoutReceipt,
            CheckoutFailure,
            CheckoutStage,
            CheckoutPhase,
            CheckoutStatus,
            NotificationResult,
            LoginRequest,
            LoginResponse,
            Kpis,
            TopProduct,
            DailyRevenue,
            DashboardSummary,
            HeatmapCell,
            OrderList,
            OrderWithItems,
            params::Pagination,
            params::SalesFilter,
            Meta,
            ApiResponse<CartView>,
            ApiResponse<CheckoutReceipt>,
            ApiResponse<CheckoutFailure>,
            ApiResponse<DashboardSummary>,
            ApiResponse<OrderList>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Menu", description = "House menu"),
        (name = "Cart", description = "Session cart endpoints"),
        (name = "Checkout", description = "Order submission"),
        (name = "Auth", description = "Admin authentication"),
        (name = "Admin", description = "Sales dashboard and reconciliation"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
