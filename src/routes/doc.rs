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
    auth_gate::{GateDecision, SiteRoute},
    catalog::Category,
    dto::{
        auth::{Identity, LoginRequest, LoginResponse, RegisterRequest},
        cart::{AddToCartRequest, CartCount, CartLine, CartView, UpdateQuantityRequest},
        checkout::{CheckoutPrefill, CheckoutRequest, CheckoutSummary},
        navigation::NavigationView,
        orders::{OrderList, OrderWithItems},
        products::{CategoryList, ProductList},
        profile::SaveProfileRequest,
    },
    models::{Order, OrderItem, OrderStatus, Product, Profile, User},
    response::{ApiResponse, Meta},
    routes::{auth, cart, checkout, health, navigation, orders, params, products, profile},
    validation::ValidationErrors,
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
        auth::register,
        auth::login,
        auth::me,
        products::list_products,
        products::list_categories,
        products::featured_products,
        products::get_product,
        cart::view_cart,
        cart::add_to_cart,
        cart::update_quantity,
        cart::remove_from_cart,
        cart::clear_cart,
        cart::item_count,
        checkout::checkout_summary,
        checkout::place_order,
        checkout::checkout_prefill,
        orders::list_orders,
        orders::get_order,
        profile::get_profile,
        profile::save_profile,
        navigation::resolve
    ),
    components(
        schemas(
            User,
            Product,
            Category,
            Profile,
            Order,
            OrderItem,
            OrderStatus,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            Identity,
            AddToCartRequest,
            UpdateQuantityRequest,
            CartLine,
            CartView,
            CartCount,
            CheckoutRequest,
            CheckoutSummary,
            CheckoutPrefill,
            SaveProfileRequest,
            ValidationErrors,
            SiteRoute,
            GateDecision,
            NavigationView,
            OrderList,
            OrderWithItems,
            ProductList,
            CategoryList,
            params::Pagination,
            params::SortOrder,
            params::ProductQuery,
            params::OrderListQuery,
            params::NavigationQuery,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<CartView>,
            ApiResponse<CheckoutSummary>,
            ApiResponse<OrderWithItems>,
            ApiResponse<OrderList>,
            ApiResponse<Profile>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Sign up, sign in and current identity"),
        (name = "Products", description = "Dairy catalog and category filter"),
        (name = "Cart", description = "Session cart, keyed by the x-cart-session header"),
        (name = "Checkout", description = "Order summary and submission"),
        (name = "Orders", description = "Past orders of the signed-in shopper"),
        (name = "Profile", description = "Delivery profile"),
        (name = "Navigation", description = "Route guard decisions for storefront clients"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
