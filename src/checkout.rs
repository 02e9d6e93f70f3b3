//! Order submission: validate, persist order, items and profile, clear cart.

use std::sync::Arc;

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    cart::{CartStore, unit_price},
    dto::{
        cart::CartLine,
        checkout::{CheckoutRequest, CheckoutSummary, DeliveryDetails},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{CartItem, Order, OrderItem, OrderStatus, Profile},
    pricing::{format_rupees, line_total},
    repository::{NewOrder, NewOrderItem, ProfileUpsert, StoreRepository},
    session::SessionHandle,
    validation::CHECKOUT_SCHEMA,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CheckoutState {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded { order_id: Uuid },
    /// Editable again; the shopper may resubmit.
    Failed { reason: String },
}

impl CheckoutState {
    /// Submitting is the only state that refuses another submit.
    pub fn accepts_submit(&self) -> bool {
        !matches!(self, CheckoutState::Submitting)
    }
}

/// Totals shown on the checkout page.
pub fn summarize(cart: &impl CartStore, delivery_fee: f64) -> CheckoutSummary {
    let subtotal = cart.total_price();
    let total = subtotal + delivery_fee;
    CheckoutSummary {
        items: cart.items().iter().map(CartLine::from).collect(),
        item_count: cart.item_count(),
        subtotal,
        delivery_fee,
        total,
        pay_label: format!("Pay Now - {}", format_rupees(total)),
    }
}

#[derive(Debug, Clone)]
pub struct PlacedOrder {
    pub order: Order,
    pub items: Vec<OrderItem>,
    /// `None` when the profile write failed after the order went through.
    pub profile: Option<Profile>,
}

#[derive(Clone)]
pub struct OrderSubmission {
    repo: Arc<dyn StoreRepository>,
    delivery_fee: f64,
}

impl OrderSubmission {
    pub fn new(repo: Arc<dyn StoreRepository>, delivery_fee: f64) -> Self {
        Self { repo, delivery_fee }
    }

    pub fn delivery_fee(&self) -> f64 {
        self.delivery_fee
    }

    /// Run one checkout for the session.
    ///
    /// The session lock is only held while checking and updating state, so
    /// the cart stays editable during persistence. Persistence runs on its
    /// own task: if the caller goes away the order still settles and the
    /// session leaves `Submitting`. Writes happen strictly in order: order,
    /// then its items, then the profile.
    pub async fn submit(
        &self,
        session: &SessionHandle,
        identity: Option<&AuthUser>,
        form: &CheckoutRequest,
    ) -> AppResult<PlacedOrder> {
        let (user, lines, details) = {
            let mut shopper = session.lock().await;
            if !shopper.checkout.accepts_submit() {
                return Err(AppError::SubmissionInProgress);
            }
            if shopper.cart.is_empty() {
                return Err(AppError::EmptyCart);
            }
            let Some(user) = identity else {
                return Err(AppError::AuthRequired);
            };

            shopper.checkout = CheckoutState::Validating;
            if let Err(errors) = CHECKOUT_SCHEMA.validate(form) {
                shopper.checkout = CheckoutState::Idle;
                return Err(AppError::Validation(errors));
            }

            shopper.checkout = CheckoutState::Submitting;
            (
                user.clone(),
                shopper.cart.items().to_vec(),
                DeliveryDetails::from_validated(form),
            )
        };

        let flow = self.clone();
        let owner = session.clone();
        let task = tokio::spawn(async move {
            let outcome = flow.persist(&user, &lines, &details).await;
            settle(&owner, &user, &lines, outcome).await
        });

        match task.await {
            Ok(result) => result,
            Err(err) => {
                tracing::error!(error = %err, "order submission task aborted");
                session.lock().await.checkout = CheckoutState::Failed {
                    reason: AppError::OrderFailed.to_string(),
                };
                Err(AppError::OrderFailed)
            }
        }
    }

    async fn persist(
        &self,
        user: &AuthUser,
        lines: &[CartItem],
        details: &DeliveryDetails,
    ) -> AppResult<PlacedOrder> {
        let subtotal: f64 = lines
            .iter()
            .map(|line| line_total(&line.price, line.quantity))
            .sum();
        let quantities = lines
            .iter()
            .map(|line| {
                i32::try_from(line.quantity)
                    .map_err(|_| AppError::BadRequest(format!("quantity too large for {}", line.name)))
            })
            .collect::<AppResult<Vec<i32>>>()?;
        let delivery_address = details.full_address();

        let order = self
            .repo
            .create_order(NewOrder {
                user_id: user.user_id,
                customer_name: details.name.clone(),
                customer_email: details.email.clone(),
                customer_phone: details.phone.clone(),
                delivery_address: delivery_address.clone(),
                delivery_notes: details.notes.clone(),
                subtotal,
                delivery_fee: self.delivery_fee,
                total_amount: subtotal + self.delivery_fee,
                status: OrderStatus::Pending,
            })
            .await
            .map_err(|err| {
                tracing::warn!(error = %err, user_id = %user.user_id, "order insert failed");
                AppError::OrderFailed
            })?;

        let new_items = lines
            .iter()
            .zip(quantities)
            .map(|(line, quantity)| NewOrderItem {
                order_id: order.id,
                product_name: line.name.clone(),
                quantity,
                unit_price: unit_price(line),
                total_price: line_total(&line.price, line.quantity),
            })
            .collect();

        let items = match self.repo.create_order_items(new_items).await {
            Ok(items) => items,
            Err(err) => {
                tracing::warn!(error = %err, order_id = %order.id, "order item insert failed");
                if let Err(discard_err) = self.repo.discard_order(order.id).await {
                    tracing::error!(
                        error = %discard_err,
                        order_id = %order.id,
                        "order left without items"
                    );
                }
                return Err(AppError::OrderFailed);
            }
        };

        let profile = match self
            .repo
            .upsert_profile(ProfileUpsert {
                user_id: user.user_id,
                email: details.email.clone(),
                full_name: details.name.clone(),
                phone: Some(details.phone.clone()),
                delivery_address: Some(delivery_address),
            })
            .await
        {
            Ok(profile) => Some(profile),
            Err(err) => {
                tracing::warn!(error = %err, order_id = %order.id, "profile upsert after order failed");
                None
            }
        };

        Ok(PlacedOrder {
            order,
            items,
            profile,
        })
    }
}

/// Record the outcome on the session. On success only the ordered lines
/// leave the cart; anything added meanwhile stays.
async fn settle(
    session: &SessionHandle,
    user: &AuthUser,
    ordered: &[CartItem],
    outcome: AppResult<PlacedOrder>,
) -> AppResult<PlacedOrder> {
    let mut shopper = session.lock().await;
    match outcome {
        Ok(placed) => {
            remove_ordered(&mut shopper.cart, ordered);
            shopper.checkout = CheckoutState::Succeeded {
                order_id: placed.order.id,
            };
            tracing::info!(
                order_id = %placed.order.id,
                user_id = %user.user_id,
                total = placed.order.total_amount,
                "order placed"
            );
            Ok(placed)
        }
        Err(err) => {
            shopper.checkout = CheckoutState::Failed {
                reason: err.to_string(),
            };
            Err(err)
        }
    }
}

/// Take the ordered quantities out of `cart`.
pub fn remove_ordered(cart: &mut impl CartStore, ordered: &[CartItem]) {
    for line in ordered {
        let current = cart
            .items()
            .iter()
            .find(|item| item.id == line.id)
            .map(|item| item.quantity);
        match current {
            Some(quantity) if quantity > line.quantity => {
                cart.update_quantity(line.id, i64::from(quantity - line.quantity));
            }
            Some(_) => cart.remove_from_cart(line.id),
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::cart::Cart;
    use crate::models::NewCartItem;

    use super::*;

    #[test]
    fn summary_adds_delivery_fee() {
        let mut cart = Cart::new();
        let paneer = NewCartItem {
            id: 10,
            name: "Fresh Paneer".into(),
            price: "₹150/250g".into(),
            image: "/assets/paneer.jpg".into(),
        };
        cart.add_to_cart(paneer);
        cart.update_quantity(10, 2);
        cart.add_to_cart(NewCartItem {
            id: 9,
            name: "Garlic Butter".into(),
            price: "₹120/100g".into(),
            image: "/assets/butter.jpg".into(),
        });
        cart.add_to_cart(NewCartItem {
            id: 6,
            name: "Flavored Yogurt".into(),
            price: "₹60/200g".into(),
            image: "/assets/yogurt.jpg".into(),
        });

        let summary = summarize(&cart, 20.0);
        assert_eq!(summary.subtotal, 480.0);
        assert_eq!(summary.total, 500.0);
        assert_eq!(summary.pay_label, "Pay Now - ₹500");
        assert_eq!(summary.item_count, 4);
    }

    #[test]
    fn ordered_lines_leave_later_additions_behind() {
        let mut cart = Cart::new();
        let milk = NewCartItem {
            id: 1,
            name: "Fresh Whole Milk".into(),
            price: "₹60/L".into(),
            image: "/assets/whole-milk.jpg".into(),
        };
        cart.add_to_cart(milk.clone());
        let ordered = cart.items().to_vec();

        cart.add_to_cart(milk);
        cart.add_to_cart(NewCartItem {
            id: 10,
            name: "Fresh Paneer".into(),
            price: "₹150/250g".into(),
            image: "/assets/paneer.jpg".into(),
        });

        remove_ordered(&mut cart, &ordered);
        let left: Vec<(i32, u32)> = cart.items().iter().map(|i| (i.id, i.quantity)).collect();
        assert_eq!(left, vec![(1, 1), (10, 1)]);
    }

    #[test]
    fn only_submitting_blocks_resubmission() {
        assert!(CheckoutState::Idle.accepts_submit());
        assert!(!CheckoutState::Submitting.accepts_submit());
        assert!(
            CheckoutState::Failed {
                reason: "network".into()
            }
            .accepts_submit()
        );
    }
}
