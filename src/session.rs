//! Per-browsing-session state: the cart and where its checkout stands.

use std::{collections::HashMap, sync::Arc, time::Duration};

use tokio::{
    sync::{Mutex, RwLock},
    task::JoinHandle,
    time::Instant,
};
use uuid::Uuid;

use crate::{cart::Cart, checkout::CheckoutState, middleware::cart_session::CartSessionId};

#[derive(Debug, Default)]
pub struct ShopperSession {
    pub cart: Cart,
    pub checkout: CheckoutState,
}

pub type SessionHandle = Arc<Mutex<ShopperSession>>;

#[derive(Debug)]
struct Slot {
    handle: SessionHandle,
    last_seen: Instant,
}

/// Sessions are created by the first cart write and dropped after a
/// period without any request.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Slot>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Existing session or a fresh empty one. Only cart writes call this.
    pub async fn get_or_create(&self, id: CartSessionId) -> SessionHandle {
        let mut sessions = self.sessions.write().await;
        let slot = sessions.entry(id.0).or_insert_with(|| {
            tracing::debug!(session = %id.0, "new shopper session");
            Slot {
                handle: SessionHandle::default(),
                last_seen: Instant::now(),
            }
        });
        slot.last_seen = Instant::now();
        slot.handle.clone()
    }

    /// Existing session, if any. Unknown ids are not stored.
    pub async fn get(&self, id: CartSessionId) -> Option<SessionHandle> {
        let mut sessions = self.sessions.write().await;
        let slot = sessions.get_mut(&id.0)?;
        slot.last_seen = Instant::now();
        Some(slot.handle.clone())
    }

    /// Drop sessions idle for at least `max_idle`. Sessions whose lock is
    /// held, or whose checkout is still submitting, are kept.
    pub async fn evict_idle(&self, max_idle: Duration) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, slot| {
            if slot.last_seen.elapsed() < max_idle {
                return true;
            }
            match slot.handle.try_lock() {
                Ok(shopper) => shopper.checkout == CheckoutState::Submitting,
                Err(_) => true,
            }
        });
        before - sessions.len()
    }

    /// Background sweep calling [`SessionStore::evict_idle`] every `every`.
    pub fn spawn_sweeper(&self, every: Duration, max_idle: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                let evicted = store.evict_idle(max_idle).await;
                if evicted > 0 {
                    tracing::debug!(evicted, "idle shopper sessions dropped");
                }
            }
        })
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use crate::cart::CartStore;
    use crate::models::NewCartItem;

    use super::*;

    fn curd() -> NewCartItem {
        NewCartItem {
            id: 4,
            name: "Fresh Curd".into(),
            price: "₹40/500g".into(),
            image: "/assets/yogurt.jpg".into(),
        }
    }

    #[tokio::test]
    async fn same_id_shares_one_cart() {
        let store = SessionStore::new();
        let id = CartSessionId(Uuid::new_v4());

        store.get_or_create(id).await.lock().await.cart.add_to_cart(NewCartItem {
            id: 1,
            name: "Fresh Whole Milk".into(),
            price: "₹60/L".into(),
            image: "/assets/whole-milk.jpg".into(),
        });

        let again = store.get_or_create(id).await;
        assert_eq!(again.lock().await.cart.item_count(), 1);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let store = SessionStore::new();
        let a = store.get_or_create(CartSessionId(Uuid::new_v4())).await;
        let b = store.get_or_create(CartSessionId(Uuid::new_v4())).await;

        a.lock().await.cart.add_to_cart(curd());

        assert!(b.lock().await.cart.is_empty());
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn lookup_of_unknown_id_stores_nothing() {
        let store = SessionStore::new();
        assert!(store.get(CartSessionId(Uuid::new_v4())).await.is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn idle_sessions_are_evicted_unless_submitting() {
        let store = SessionStore::new();
        store.get_or_create(CartSessionId(Uuid::new_v4())).await;
        let busy = CartSessionId(Uuid::new_v4());
        store.get_or_create(busy).await.lock().await.checkout = CheckoutState::Submitting;

        assert_eq!(store.evict_idle(Duration::from_secs(3600)).await, 0);
        assert_eq!(store.evict_idle(Duration::ZERO).await, 1);
        assert_eq!(store.len().await, 1);
        assert!(store.get(busy).await.is_some());
    }
}
