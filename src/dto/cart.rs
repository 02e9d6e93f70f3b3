use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    cart::CartStore,
    models::CartItem,
    pricing::{format_rupees, line_total},
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddToCartRequest {
    pub product_id: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateQuantityRequest {
    pub quantity: i64,
}

/// One cart entry with its computed line total.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CartLine {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub price: String,
    pub quantity: u32,
    pub line_total: f64,
    pub line_total_display: String,
}

impl From<&CartItem> for CartLine {
    fn from(item: &CartItem) -> Self {
        let total = line_total(&item.price, item.quantity);
        Self {
            id: item.id,
            name: item.name.clone(),
            image: item.image.clone(),
            price: item.price.clone(),
            quantity: item.quantity,
            line_total: total,
            line_total_display: format_rupees(total),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartView {
    pub items: Vec<CartLine>,
    pub item_count: u64,
    pub total: f64,
    pub total_display: String,
}

impl CartView {
    pub fn from_store(cart: &impl CartStore) -> Self {
        let total = cart.total_price();
        Self {
            items: cart.items().iter().map(CartLine::from).collect(),
            item_count: cart.item_count(),
            total,
            total_display: format_rupees(total),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartCount {
    pub count: u64,
}
