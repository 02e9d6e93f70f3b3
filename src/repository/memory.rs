use std::{
    collections::{HashMap, HashSet},
    time::Duration,
};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Order, OrderItem, Profile},
};

use super::{NewOrder, NewOrderItem, OrderFilter, ProfileUpsert, StoreRepository};

/// Write operations that can be told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailPoint {
    CreateOrder,
    CreateOrderItems,
    DiscardOrder,
    UpsertProfile,
}

#[derive(Debug, Default)]
struct Tables {
    orders: Vec<Order>,
    order_items: Vec<OrderItem>,
    profiles: HashMap<Uuid, Profile>,
    failing: HashSet<FailPoint>,
    order_delay: Option<Duration>,
    /// Write calls in the order they arrived, by name.
    calls: Vec<&'static str>,
}

/// Process-local store used by tests and local demos.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    tables: Mutex<Tables>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn fail_on(&self, point: FailPoint) {
        self.tables.lock().await.failing.insert(point);
    }

    /// Make every `create_order` take at least `by`.
    pub async fn delay_orders(&self, by: Duration) {
        self.tables.lock().await.order_delay = Some(by);
    }

    pub async fn orders(&self) -> Vec<Order> {
        self.tables.lock().await.orders.clone()
    }

    pub async fn order_items(&self) -> Vec<OrderItem> {
        self.tables.lock().await.order_items.clone()
    }

    pub async fn profiles(&self) -> Vec<Profile> {
        self.tables.lock().await.profiles.values().cloned().collect()
    }

    pub async fn calls(&self) -> Vec<&'static str> {
        self.tables.lock().await.calls.clone()
    }
}

fn injected(point: FailPoint) -> AppError {
    AppError::Internal(anyhow::anyhow!("injected failure at {point:?}"))
}

impl Tables {
    fn record(&mut self, call: &'static str, point: FailPoint) -> AppResult<()> {
        self.calls.push(call);
        if self.failing.contains(&point) {
            return Err(injected(point));
        }
        Ok(())
    }
}

#[async_trait]
impl StoreRepository for InMemoryRepository {
    async fn create_order(&self, order: NewOrder) -> AppResult<Order> {
        let delay = self.tables.lock().await.order_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let mut tables = self.tables.lock().await;
        tables.record("create_order", FailPoint::CreateOrder)?;
        let now = Utc::now();
        let order = Order {
            id: Uuid::new_v4(),
            user_id: order.user_id,
            customer_name: order.customer_name,
            customer_email: order.customer_email,
            customer_phone: order.customer_phone,
            delivery_address: order.delivery_address,
            delivery_notes: order.delivery_notes,
            subtotal: order.subtotal,
            delivery_fee: order.delivery_fee,
            total_amount: order.total_amount,
            status: order.status,
            created_at: now,
            updated_at: now,
        };
        tables.orders.push(order.clone());
        Ok(order)
    }

    async fn create_order_items(&self, items: Vec<NewOrderItem>) -> AppResult<Vec<OrderItem>> {
        let mut tables = self.tables.lock().await;
        tables.record("create_order_items", FailPoint::CreateOrderItems)?;
        let now = Utc::now();
        let created: Vec<OrderItem> = items
            .into_iter()
            .map(|item| OrderItem {
                id: Uuid::new_v4(),
                order_id: item.order_id,
                product_name: item.product_name,
                quantity: item.quantity,
                unit_price: item.unit_price,
                total_price: item.total_price,
                created_at: now,
            })
            .collect();
        tables.order_items.extend(created.iter().cloned());
        Ok(created)
    }

    async fn discard_order(&self, order_id: Uuid) -> AppResult<()> {
        let mut tables = self.tables.lock().await;
        tables.record("discard_order", FailPoint::DiscardOrder)?;
        tables.order_items.retain(|item| item.order_id != order_id);
        tables.orders.retain(|order| order.id != order_id);
        Ok(())
    }

    async fn upsert_profile(&self, profile: ProfileUpsert) -> AppResult<Profile> {
        let mut tables = self.tables.lock().await;
        tables.record("upsert_profile", FailPoint::UpsertProfile)?;
        let now = Utc::now();
        let saved = match tables.profiles.get(&profile.user_id) {
            Some(existing) => Profile {
                email: profile.email,
                full_name: profile.full_name,
                phone: profile.phone,
                delivery_address: profile.delivery_address,
                updated_at: now,
                ..existing.clone()
            },
            None => Profile {
                id: Uuid::new_v4(),
                user_id: profile.user_id,
                email: profile.email,
                full_name: profile.full_name,
                phone: profile.phone,
                delivery_address: profile.delivery_address,
                created_at: now,
                updated_at: now,
            },
        };
        tables.profiles.insert(saved.user_id, saved.clone());
        Ok(saved)
    }

    async fn fetch_profile(&self, user_id: Uuid) -> AppResult<Option<Profile>> {
        Ok(self.tables.lock().await.profiles.get(&user_id).cloned())
    }

    async fn list_orders(&self, user_id: Uuid, filter: OrderFilter) -> AppResult<(Vec<Order>, i64)> {
        let tables = self.tables.lock().await;
        let mut orders: Vec<Order> = tables
            .orders
            .iter()
            .filter(|o| o.user_id == user_id)
            .filter(|o| filter.status.is_none_or(|status| o.status == status))
            .cloned()
            .collect();
        if filter.newest_first {
            orders.reverse();
        }
        let total = orders.len() as i64;
        let page = orders
            .into_iter()
            .skip(filter.offset as usize)
            .take(filter.limit as usize)
            .collect();
        Ok((page, total))
    }

    async fn get_order(
        &self,
        user_id: Uuid,
        order_id: Uuid,
    ) -> AppResult<Option<(Order, Vec<OrderItem>)>> {
        let tables = self.tables.lock().await;
        let Some(order) = tables
            .orders
            .iter()
            .find(|o| o.id == order_id && o.user_id == user_id)
            .cloned()
        else {
            return Ok(None);
        };
        let items = tables
            .order_items
            .iter()
            .filter(|item| item.order_id == order_id)
            .cloned()
            .collect();
        Ok(Some((order, items)))
    }
}
