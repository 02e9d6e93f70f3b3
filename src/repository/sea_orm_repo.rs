use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    db::OrmConn,
    entity::{
        order_items::{
            ActiveModel as OrderItemActive, Column as OrderItemCol, Entity as OrderItems,
            Model as OrderItemModel,
        },
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel},
        profiles::{ActiveModel as ProfileActive, Column as ProfileCol, Entity as Profiles, Model as ProfileModel},
    },
    error::{AppError, AppResult},
    models::{Order, OrderItem, OrderStatus, Profile},
};

use super::{NewOrder, NewOrderItem, OrderFilter, ProfileUpsert, StoreRepository};

#[derive(Clone)]
pub struct SeaOrmRepository {
    orm: OrmConn,
}

impl SeaOrmRepository {
    pub fn new(orm: OrmConn) -> Self {
        Self { orm }
    }
}

#[async_trait]
impl StoreRepository for SeaOrmRepository {
    async fn create_order(&self, order: NewOrder) -> AppResult<Order> {
        let model = OrderActive {
            id: Set(Uuid::new_v4()),
            user_id: Set(order.user_id),
            customer_name: Set(order.customer_name),
            customer_email: Set(order.customer_email),
            customer_phone: Set(order.customer_phone),
            delivery_address: Set(order.delivery_address),
            delivery_notes: Set(order.delivery_notes),
            subtotal: Set(order.subtotal),
            delivery_fee: Set(order.delivery_fee),
            total_amount: Set(order.total_amount),
            status: Set(order.status.as_str().to_string()),
            created_at: NotSet,
            updated_at: NotSet,
        }
        .insert(&self.orm)
        .await?;

        order_from_entity(model)
    }

    async fn create_order_items(&self, items: Vec<NewOrderItem>) -> AppResult<Vec<OrderItem>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = items.iter().map(|_| Uuid::new_v4()).collect();
        let active = items
            .into_iter()
            .zip(ids.iter().copied())
            .map(|(item, id)| OrderItemActive {
                id: Set(id),
                order_id: Set(item.order_id),
                product_name: Set(item.product_name),
                quantity: Set(item.quantity),
                unit_price: Set(item.unit_price),
                total_price: Set(item.total_price),
                created_at: NotSet,
            });

        OrderItems::insert_many(active).exec(&self.orm).await?;

        let mut rows = OrderItems::find()
            .filter(OrderItemCol::Id.is_in(ids.clone()))
            .all(&self.orm)
            .await?;
        rows.sort_by_key(|row| ids.iter().position(|id| *id == row.id));
        Ok(rows.into_iter().map(order_item_from_entity).collect())
    }

    async fn discard_order(&self, order_id: Uuid) -> AppResult<()> {
        OrderItems::delete_many()
            .filter(OrderItemCol::OrderId.eq(order_id))
            .exec(&self.orm)
            .await?;
        Orders::delete_by_id(order_id).exec(&self.orm).await?;
        Ok(())
    }

    async fn upsert_profile(&self, profile: ProfileUpsert) -> AppResult<Profile> {
        let now = Utc::now();
        let active = ProfileActive {
            id: Set(Uuid::new_v4()),
            user_id: Set(profile.user_id),
            email: Set(profile.email),
            full_name: Set(profile.full_name),
            phone: Set(profile.phone),
            delivery_address: Set(profile.delivery_address),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        Profiles::insert(active)
            .on_conflict(
                OnConflict::column(ProfileCol::UserId)
                    .update_columns([
                        ProfileCol::Email,
                        ProfileCol::FullName,
                        ProfileCol::Phone,
                        ProfileCol::DeliveryAddress,
                        ProfileCol::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.orm)
            .await?;

        let saved = Profiles::find()
            .filter(ProfileCol::UserId.eq(profile.user_id))
            .one(&self.orm)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("profile missing after upsert")))?;

        Ok(profile_from_entity(saved))
    }

    async fn fetch_profile(&self, user_id: Uuid) -> AppResult<Option<Profile>> {
        let profile = Profiles::find()
            .filter(ProfileCol::UserId.eq(user_id))
            .one(&self.orm)
            .await?
            .map(profile_from_entity);
        Ok(profile)
    }

    async fn list_orders(&self, user_id: Uuid, filter: OrderFilter) -> AppResult<(Vec<Order>, i64)> {
        let mut condition = Condition::all().add(OrderCol::UserId.eq(user_id));
        if let Some(status) = filter.status {
            condition = condition.add(OrderCol::Status.eq(status.as_str()));
        }

        let mut finder = Orders::find().filter(condition);
        finder = if filter.newest_first {
            finder.order_by_desc(OrderCol::CreatedAt)
        } else {
            finder.order_by_asc(OrderCol::CreatedAt)
        };

        let total = finder.clone().count(&self.orm).await? as i64;

        let orders = finder
            .limit(filter.limit)
            .offset(filter.offset)
            .all(&self.orm)
            .await?
            .into_iter()
            .map(order_from_entity)
            .collect::<AppResult<Vec<_>>>()?;

        Ok((orders, total))
    }

    async fn get_order(
        &self,
        user_id: Uuid,
        order_id: Uuid,
    ) -> AppResult<Option<(Order, Vec<OrderItem>)>> {
        let order = Orders::find()
            .filter(
                Condition::all()
                    .add(OrderCol::UserId.eq(user_id))
                    .add(OrderCol::Id.eq(order_id)),
            )
            .one(&self.orm)
            .await?;
        let order = match order {
            Some(o) => order_from_entity(o)?,
            None => return Ok(None),
        };

        let items = OrderItems::find()
            .filter(OrderItemCol::OrderId.eq(order.id))
            .order_by_asc(OrderItemCol::CreatedAt)
            .all(&self.orm)
            .await?
            .into_iter()
            .map(order_item_from_entity)
            .collect();

        Ok(Some((order, items)))
    }
}

fn order_from_entity(model: OrderModel) -> AppResult<Order> {
    let status = model
        .status
        .parse::<OrderStatus>()
        .map_err(|err| AppError::Internal(err.into()))?;
    Ok(Order {
        id: model.id,
        user_id: model.user_id,
        customer_name: model.customer_name,
        customer_email: model.customer_email,
        customer_phone: model.customer_phone,
        delivery_address: model.delivery_address,
        delivery_notes: model.delivery_notes,
        subtotal: model.subtotal,
        delivery_fee: model.delivery_fee,
        total_amount: model.total_amount,
        status,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}

fn order_item_from_entity(model: OrderItemModel) -> OrderItem {
    OrderItem {
        id: model.id,
        order_id: model.order_id,
        product_name: model.product_name,
        quantity: model.quantity,
        unit_price: model.unit_price,
        total_price: model.total_price,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn profile_from_entity(model: ProfileModel) -> Profile {
    Profile {
        id: model.id,
        user_id: model.user_id,
        email: model.email,
        full_name: model.full_name,
        phone: model.phone,
        delivery_address: model.delivery_address,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
