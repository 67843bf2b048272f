use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{MenuItemId, OrderId, OrderItemId, UserId};
use domain::{Money, NewOrder, Order, OrderItem, OrderNumber, OrderStatus, OrderType};
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::{Result, StoreError, store::OrderStore};

/// PostgreSQL-backed order store implementation.
#[derive(Clone)]
pub struct PostgresOrderStore {
    pool: PgPool,
}

impl PostgresOrderStore {
    /// Creates a new PostgreSQL order store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        tracing::info!("running database migrations");
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }

    fn row_to_order(row: PgRow) -> Result<Order> {
        let status_raw: String = row.try_get("status")?;
        let status = status_raw
            .parse::<OrderStatus>()
            .map_err(|_| StoreError::Decode {
                column: "status",
                value: status_raw,
            })?;

        let order_type = match row.try_get::<Option<String>, _>("order_type")? {
            Some(raw) => Some(raw.parse::<OrderType>().map_err(|_| StoreError::Decode {
                column: "order_type",
                value: raw,
            })?),
            None => None,
        };

        // Items are loaded separately and attached by the caller.
        Ok(Order {
            id: OrderId::from_i64(row.try_get("id")?),
            order_number: OrderNumber::new(row.try_get::<String, _>("order_number")?),
            user_id: UserId::from_i64(row.try_get("user_id")?),
            total_amount: Money::from_cents(row.try_get("total_amount_cents")?),
            status,
            order_type,
            delivery_address: row.try_get("delivery_address")?,
            phone_number: row.try_get("phone_number")?,
            special_instructions: row.try_get("special_instructions")?,
            estimated_delivery_time: row.try_get("estimated_delivery_time")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
            items: Vec::new(),
        })
    }

    fn row_to_item(row: PgRow) -> Result<OrderItem> {
        Ok(OrderItem {
            id: OrderItemId::from_i64(row.try_get("id")?),
            menu_item_id: MenuItemId::from_i64(row.try_get("menu_item_id")?),
            menu_item_name: row.try_get("menu_item_name")?,
            quantity: row.try_get::<i32, _>("quantity")? as u32,
            unit_price: Money::from_cents(row.try_get("unit_price_cents")?),
            total_price: Money::from_cents(row.try_get("total_price_cents")?),
            created_at: row.try_get("created_at")?,
        })
    }

    async fn load_items(&self, order_id: OrderId) -> Result<Vec<OrderItem>> {
        let rows = sqlx::query(
            r#"
            SELECT id, menu_item_id, menu_item_name, quantity, unit_price_cents, total_price_cents, created_at
            FROM order_items
            WHERE order_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(order_id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_item).collect()
    }

    async fn attach_items(&self, mut orders: Vec<Order>) -> Result<Vec<Order>> {
        if orders.is_empty() {
            return Ok(orders);
        }

        let ids: Vec<i64> = orders.iter().map(|o| o.id.as_i64()).collect();
        let rows = sqlx::query(
            r#"
            SELECT id, order_id, menu_item_id, menu_item_name, quantity, unit_price_cents, total_price_cents, created_at
            FROM order_items
            WHERE order_id = ANY($1)
            ORDER BY id ASC
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_order: HashMap<i64, Vec<OrderItem>> = HashMap::new();
        for row in rows {
            let order_id: i64 = row.try_get("order_id")?;
            by_order
                .entry(order_id)
                .or_default()
                .push(Self::row_to_item(row)?);
        }

        for order in &mut orders {
            if let Some(items) = by_order.remove(&order.id.as_i64()) {
                order.items = items;
            }
        }

        Ok(orders)
    }

    async fn fetch_order(&self, row: Option<PgRow>) -> Result<Option<Order>> {
        match row {
            Some(row) => {
                let mut order = Self::row_to_order(row)?;
                order.items = self.load_items(order.id).await?;
                Ok(Some(order))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl OrderStore for PostgresOrderStore {
    async fn create_order(&self, order: NewOrder) -> Result<Order> {
        let mut tx = self.pool.begin().await?;

        let order_row = sqlx::query(
            r#"
            INSERT INTO orders (order_number, user_id, total_amount_cents, status, order_type,
                                delivery_address, phone_number, special_instructions,
                                estimated_delivery_time, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
            RETURNING id, order_number, user_id, total_amount_cents, status, order_type,
                      delivery_address, phone_number, special_instructions,
                      estimated_delivery_time, created_at, updated_at
            "#,
        )
        .bind(order.order_number.as_str())
        .bind(order.user_id.as_i64())
        .bind(order.total_amount.cents())
        .bind(order.status.as_str())
        .bind(order.order_type.map(|t| t.as_str()))
        .bind(&order.delivery_address)
        .bind(&order.phone_number)
        .bind(order.special_instructions.as_deref())
        .bind(order.estimated_delivery_time)
        .bind(order.created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            // A unique violation here means the order number lost the race.
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.constraint() == Some("orders_order_number_key")
            {
                return StoreError::OrderNumberTaken(order.order_number.clone());
            }
            StoreError::Database(e)
        })?;

        let mut stored = Self::row_to_order(order_row)?;

        let mut items = Vec::with_capacity(order.items.len());
        for line in &order.items {
            let item_row = sqlx::query(
                r#"
                INSERT INTO order_items (order_id, menu_item_id, menu_item_name, quantity,
                                         unit_price_cents, total_price_cents, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING id, menu_item_id, menu_item_name, quantity, unit_price_cents, total_price_cents, created_at
                "#,
            )
            .bind(stored.id.as_i64())
            .bind(line.menu_item_id.as_i64())
            .bind(&line.menu_item_name)
            .bind(line.quantity as i32)
            .bind(line.unit_price.cents())
            .bind(line.total_price().cents())
            .bind(order.created_at)
            .fetch_one(&mut *tx)
            .await?;

            items.push(Self::row_to_item(item_row)?);
        }

        tx.commit().await?;

        stored.items = items;
        Ok(stored)
    }

    async fn get_order(&self, id: OrderId) -> Result<Option<Order>> {
        let row = sqlx::query(
            r#"
            SELECT id, order_number, user_id, total_amount_cents, status, order_type,
                   delivery_address, phone_number, special_instructions,
                   estimated_delivery_time, created_at, updated_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        self.fetch_order(row).await
    }

    async fn get_order_by_number(&self, number: &OrderNumber) -> Result<Option<Order>> {
        let row = sqlx::query(
            r#"
            SELECT id, order_number, user_id, total_amount_cents, status, order_type,
                   delivery_address, phone_number, special_instructions,
                   estimated_delivery_time, created_at, updated_at
            FROM orders
            WHERE order_number = $1
            "#,
        )
        .bind(number.as_str())
        .fetch_optional(&self.pool)
        .await?;

        self.fetch_order(row).await
    }

    async fn transition_status(
        &self,
        id: OrderId,
        expected: OrderStatus,
        target: OrderStatus,
    ) -> Result<Option<Order>> {
        let row = sqlx::query(
            r#"
            UPDATE orders
            SET status = $3, updated_at = NOW()
            WHERE id = $1 AND status = $2
            RETURNING id, order_number, user_id, total_amount_cents, status, order_type,
                      delivery_address, phone_number, special_instructions,
                      estimated_delivery_time, created_at, updated_at
            "#,
        )
        .bind(id.as_i64())
        .bind(expected.as_str())
        .bind(target.as_str())
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = row {
            return self.fetch_order(Some(row)).await;
        }

        // Zero rows either means the order is missing or another writer
        // changed the status first. Tell the two apart for the caller.
        let current: Option<String> = sqlx::query_scalar("SELECT status FROM orders WHERE id = $1")
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await?;

        match current {
            Some(actual_raw) => {
                let actual = actual_raw
                    .parse::<OrderStatus>()
                    .map_err(|_| StoreError::Decode {
                        column: "status",
                        value: actual_raw,
                    })?;
                Err(StoreError::StatusConflict {
                    id,
                    expected,
                    actual,
                })
            }
            None => Ok(None),
        }
    }

    async fn all_orders(&self) -> Result<Vec<Order>> {
        let rows = sqlx::query(
            r#"
            SELECT id, order_number, user_id, total_amount_cents, status, order_type,
                   delivery_address, phone_number, special_instructions,
                   estimated_delivery_time, created_at, updated_at
            FROM orders
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let orders = rows
            .into_iter()
            .map(Self::row_to_order)
            .collect::<Result<Vec<_>>>()?;
        self.attach_items(orders).await
    }

    async fn orders_for_user(&self, user_id: UserId) -> Result<Vec<Order>> {
        let rows = sqlx::query(
            r#"
            SELECT id, order_number, user_id, total_amount_cents, status, order_type,
                   delivery_address, phone_number, special_instructions,
                   estimated_delivery_time, created_at, updated_at
            FROM orders
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        let orders = rows
            .into_iter()
            .map(Self::row_to_order)
            .collect::<Result<Vec<_>>>()?;
        self.attach_items(orders).await
    }

    async fn orders_with_status(&self, status: OrderStatus) -> Result<Vec<Order>> {
        let rows = sqlx::query(
            r#"
            SELECT id, order_number, user_id, total_amount_cents, status, order_type,
                   delivery_address, phone_number, special_instructions,
                   estimated_delivery_time, created_at, updated_at
            FROM orders
            WHERE status = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await?;

        let orders = rows
            .into_iter()
            .map(Self::row_to_order)
            .collect::<Result<Vec<_>>>()?;
        self.attach_items(orders).await
    }

    async fn orders_for_user_with_status(
        &self,
        user_id: UserId,
        status: OrderStatus,
    ) -> Result<Vec<Order>> {
        let rows = sqlx::query(
            r#"
            SELECT id, order_number, user_id, total_amount_cents, status, order_type,
                   delivery_address, phone_number, special_instructions,
                   estimated_delivery_time, created_at, updated_at
            FROM orders
            WHERE user_id = $1 AND status = $2
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id.as_i64())
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await?;

        let orders = rows
            .into_iter()
            .map(Self::row_to_order)
            .collect::<Result<Vec<_>>>()?;
        self.attach_items(orders).await
    }

    async fn orders_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Order>> {
        let rows = sqlx::query(
            r#"
            SELECT id, order_number, user_id, total_amount_cents, status, order_type,
                   delivery_address, phone_number, special_instructions,
                   estimated_delivery_time, created_at, updated_at
            FROM orders
            WHERE created_at >= $1 AND created_at <= $2
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        let orders = rows
            .into_iter()
            .map(Self::row_to_order)
            .collect::<Result<Vec<_>>>()?;
        self.attach_items(orders).await
    }

    async fn count_orders(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn delivered_revenue_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Money> {
        let cents: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(total_amount_cents), 0)::BIGINT
            FROM orders
            WHERE status = $1 AND created_at >= $2 AND created_at <= $3
            "#,
        )
        .bind(OrderStatus::Delivered.as_str())
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok(Money::from_cents(cents))
    }
}
