use crate::{
    catalog::CategoryFilter,
    dto::products::{CategoryList, ProductList},
    error::{AppError, AppResult},
    models::Product,
    response::{ApiResponse, Meta},
    routes::params::ProductQuery,
    state::AppState,
};

pub fn list_products(state: &AppState, query: ProductQuery) -> ApiResponse<ProductList> {
    let filter = CategoryFilter::parse(query.category.as_deref());
    let items: Vec<Product> = state.catalog.filter(&filter).into_iter().cloned().collect();
    let total = items.len() as i64;
    let message = if items.is_empty() {
        "No products found in this category."
    } else {
        "Products"
    };
    ApiResponse::success(message, ProductList { items }, Some(Meta::new(1, total, total)))
}

pub fn featured_products(state: &AppState) -> ApiResponse<ProductList> {
    let items = state.catalog.featured().into_iter().cloned().collect();
    ApiResponse::success("Featured products", ProductList { items }, None)
}

pub fn list_categories(state: &AppState) -> ApiResponse<CategoryList> {
    let items = state.catalog.categories().to_vec();
    ApiResponse::success("Categories", CategoryList { items }, None)
}

pub fn get_product(state: &AppState, id: i32) -> AppResult<ApiResponse<Product>> {
    let product = state.catalog.find(id).cloned().ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Product", product, None))
}
