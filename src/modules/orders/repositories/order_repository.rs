use chrono::Utc;
use sqlx::{MySql, MySqlPool, Transaction};
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::orders::models::{Order, OrderItem, OrderStatus};

const ORDER_COLUMNS: &str = r#"
    id, customer_id, user_id, status, payment_method, shipping,
    delivery_region, transport_company_id, tax_substitution, with_ipi,
    full_invoice, half_invoice_percentage, half_invoice_type, delivery_fee,
    subtotal, total_discount, tax_total, products_total, total,
    created_at, updated_at
"#;

const ITEM_COLUMNS: &str = r#"
    id, order_id, product_id, product_name, list_price, weight,
    quantity_per_volume, quantity, discount, final_price, ipi_value,
    tax_substitution_value, subtotal, total_with_taxes
"#;

/// Repository for order and order item persistence
pub struct OrderRepository {
    pool: MySqlPool,
}

impl OrderRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Insert an order with its items in one transaction.
    pub async fn create(&self, order: &Order) -> Result<Order> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let id = order
            .id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        sqlx::query(
            r#"
            INSERT INTO orders (
                id, customer_id, user_id, status, payment_method, shipping,
                delivery_region, transport_company_id, tax_substitution,
                with_ipi, full_invoice, half_invoice_percentage,
                half_invoice_type, delivery_fee, subtotal, total_discount,
                tax_total, products_total, total, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&order.customer_id)
        .bind(&order.user_id)
        .bind(order.status)
        .bind(order.payment_method)
        .bind(order.shipping)
        .bind(order.delivery_region)
        .bind(&order.transport_company_id)
        .bind(order.tax_substitution)
        .bind(order.with_ipi)
        .bind(order.full_invoice)
        .bind(order.half_invoice_percentage)
        .bind(order.half_invoice_type)
        .bind(order.delivery_fee)
        .bind(order.subtotal)
        .bind(order.total_discount)
        .bind(order.tax_total)
        .bind(order.products_total)
        .bind(order.total)
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        Self::insert_items(&mut tx, &id, &order.items).await?;

        tx.commit().await.map_err(AppError::Database)?;

        let mut created = order.clone();
        created.id = Some(id);
        Ok(created)
    }

    /// Find an order by id, with its items.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Order>> {
        let query = format!("SELECT {} FROM orders WHERE id = ?", ORDER_COLUMNS);
        let order = sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        let Some(mut order) = order else {
            return Ok(None);
        };

        order.items = self.find_items(id).await?;
        Ok(Some(order))
    }

    /// List orders newest first, optionally scoped to one salesperson.
    ///
    /// Items are not joined in list view.
    pub async fn list(
        &self,
        salesperson_id: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Order>> {
        let limit = limit.clamp(1, 100);
        let offset = offset.max(0);

        let orders = match salesperson_id {
            Some(user_id) => {
                let query = format!(
                    "SELECT {} FROM orders WHERE user_id = ? \
                     ORDER BY created_at DESC LIMIT ? OFFSET ?",
                    ORDER_COLUMNS
                );
                sqlx::query_as::<_, Order>(&query)
                    .bind(user_id)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(&self.pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {} FROM orders ORDER BY created_at DESC LIMIT ? OFFSET ?",
                    ORDER_COLUMNS
                );
                sqlx::query_as::<_, Order>(&query)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(AppError::Database)?;

        Ok(orders)
    }

    /// Replace an order's mutable fields and items in one transaction.
    pub async fn update(&self, order: &Order) -> Result<()> {
        let id = order
            .id
            .as_deref()
            .ok_or_else(|| AppError::internal("Cannot update an order without an id"))?;

        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let result = sqlx::query(
            r#"
            UPDATE orders SET
                customer_id = ?, payment_method = ?, shipping = ?,
                delivery_region = ?, transport_company_id = ?,
                tax_substitution = ?, with_ipi = ?, full_invoice = ?,
                half_invoice_percentage = ?, half_invoice_type = ?,
                delivery_fee = ?, subtotal = ?, total_discount = ?,
                tax_total = ?, products_total = ?, total = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&order.customer_id)
        .bind(order.payment_method)
        .bind(order.shipping)
        .bind(order.delivery_region)
        .bind(&order.transport_company_id)
        .bind(order.tax_substitution)
        .bind(order.with_ipi)
        .bind(order.full_invoice)
        .bind(order.half_invoice_percentage)
        .bind(order.half_invoice_type)
        .bind(order.delivery_fee)
        .bind(order.subtotal)
        .bind(order.total_discount)
        .bind(order.tax_total)
        .bind(order.products_total)
        .bind(order.total)
        .bind(Utc::now())
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Order '{}' not found", id)));
        }

        sqlx::query("DELETE FROM order_items WHERE order_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        Self::insert_items(&mut tx, id, &order.items).await?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(())
    }

    /// Persist a status change.
    pub async fn update_status(&self, id: &str, status: OrderStatus) -> Result<()> {
        let result = sqlx::query("UPDATE orders SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Order '{}' not found", id)));
        }

        Ok(())
    }

    async fn find_items(&self, order_id: &str) -> Result<Vec<OrderItem>> {
        let query = format!(
            "SELECT {} FROM order_items WHERE order_id = ? ORDER BY id",
            ITEM_COLUMNS
        );
        sqlx::query_as::<_, OrderItem>(&query)
            .bind(order_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn insert_items(
        tx: &mut Transaction<'_, MySql>,
        order_id: &str,
        items: &[OrderItem],
    ) -> Result<()> {
        for item in items {
            let item_id = item
                .id
                .clone()
                .unwrap_or_else(|| Uuid::new_v4().to_string());

            sqlx::query(
                r#"
                INSERT INTO order_items (
                    id, order_id, product_id, product_name, list_price,
                    weight, quantity_per_volume, quantity, discount,
                    final_price, ipi_value, tax_substitution_value,
                    subtotal, total_with_taxes
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&item_id)
            .bind(order_id)
            .bind(&item.product_id)
            .bind(&item.product_name)
            .bind(item.list_price)
            .bind(item.weight)
            .bind(item.quantity_per_volume)
            .bind(item.quantity)
            .bind(item.discount)
            .bind(item.final_price)
            .bind(item.ipi_value)
            .bind(item.tax_substitution_value)
            .bind(item.subtotal)
            .bind(item.total_with_taxes)
            .execute(&mut **tx)
            .await
            .map_err(AppError::Database)?;
        }

        Ok(())
    }
}
