//! Persistence seam for orders and profiles.

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Order, OrderItem, OrderStatus, Profile},
};

pub mod memory;
pub mod sea_orm_repo;

pub use memory::InMemoryRepository;
pub use sea_orm_repo::SeaOrmRepository;

#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub user_id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub delivery_address: String,
    pub delivery_notes: Option<String>,
    pub subtotal: f64,
    pub delivery_fee: f64,
    pub total_amount: f64,
    pub status: OrderStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItem {
    pub order_id: Uuid,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: f64,
    pub total_price: f64,
}

/// Insert-or-update keyed by `user_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileUpsert {
    pub user_id: Uuid,
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub delivery_address: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub newest_first: bool,
    pub limit: u64,
    pub offset: u64,
}

#[async_trait]
pub trait StoreRepository: Send + Sync {
    /// Insert one order and return it with its generated id.
    async fn create_order(&self, order: NewOrder) -> AppResult<Order>;

    /// Insert all line items of one order as a single batch.
    async fn create_order_items(&self, items: Vec<NewOrderItem>) -> AppResult<Vec<OrderItem>>;

    /// Remove an order that never received its line items.
    async fn discard_order(&self, order_id: Uuid) -> AppResult<()>;

    async fn upsert_profile(&self, profile: ProfileUpsert) -> AppResult<Profile>;

    async fn fetch_profile(&self, user_id: Uuid) -> AppResult<Option<Profile>>;

    /// A page of the user's orders plus the unpaged total.
    async fn list_orders(&self, user_id: Uuid, filter: OrderFilter) -> AppResult<(Vec<Order>, i64)>;

    async fn get_order(&self, user_id: Uuid, order_id: Uuid)
    -> AppResult<Option<(Order, Vec<OrderItem>)>>;
}
