//! Order desk
//!
//! Storefront order placement and the admin order management surface.

use pahana_core::models::{Order, OrderStatus};
use pahana_core::traits::{BookStore, OrderStore};
use pahana_core::AppError;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

/// Partial update accepted on the admin path
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdate {
    pub customer_name: Option<String>,
    pub quantity: Option<i32>,
    pub total_price: Option<f64>,
    pub status: Option<OrderStatus>,
}

/// Order service over the order and book collections
#[derive(Clone)]
pub struct OrderDesk {
    orders: Arc<dyn OrderStore>,
    books: Arc<dyn BookStore>,
}

impl OrderDesk {
    pub fn new(orders: Arc<dyn OrderStore>, books: Arc<dyn BookStore>) -> Self {
        Self { orders, books }
    }

    /// Accept a new order: stamps the order date and forces PENDING
    #[instrument(skip(self, order))]
    pub async fn place_order(&self, mut order: Order) -> Result<Order, AppError> {
        order.order_date = Some(chrono::Utc::now());
        order.status = OrderStatus::Pending;

        let saved = self.orders.save(order).await?;
        info!(
            order_id = %saved.id,
            book = %saved.book_title,
            quantity = saved.quantity,
            "Placed order"
        );
        Ok(saved)
    }

    pub async fn list(&self) -> Result<Vec<Order>, AppError> {
        self.orders.find_all().await
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Order, AppError> {
        self.orders
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::OrderNotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn update_status(&self, id: &str, status: OrderStatus) -> Result<Order, AppError> {
        let mut order = self.find_by_id(id).await?;
        order.status = status;
        self.orders.save(order).await
    }

    /// Apply a partial admin update
    #[instrument(skip(self, update))]
    pub async fn update(&self, id: &str, update: OrderUpdate) -> Result<Order, AppError> {
        let mut order = self.find_by_id(id).await?;

        if let Some(name) = update.customer_name {
            order.customer_name = Some(name);
        }
        if let Some(quantity) = update.quantity {
            order.quantity = quantity;
        }
        if let Some(total_price) = update.total_price {
            order.total_price = total_price;
        }
        if let Some(status) = update.status {
            order.status = status;
        }

        self.orders.save(order).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        if !self.orders.delete_by_id(id).await? {
            return Err(AppError::OrderNotFound(id.to_string()));
        }
        info!(id = %id, "Deleted order");
        Ok(())
    }

    /// Orders for one email address
    ///
    /// Book titles are refreshed from the catalog so renames show up in the
    /// customer's history; orders for since-deleted books keep the snapshot
    /// taken at placement.
    pub async fn orders_by_email(&self, email: &str) -> Result<Vec<Order>, AppError> {
        let mut orders = self.orders.find_by_email(email).await?;

        for order in &mut orders {
            if let Some(book) = self.books.find_by_id(&order.book_id).await? {
                order.book_title = book.title;
            }
        }

        Ok(orders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pahana_core::models::Book;
    use pahana_store::{MemoryBookStore, MemoryOrderStore};

    fn desk() -> (OrderDesk, Arc<MemoryBookStore>) {
        let books = Arc::new(MemoryBookStore::new());
        (
            OrderDesk::new(Arc::new(MemoryOrderStore::new()), books.clone()),
            books,
        )
    }

    #[tokio::test]
    async fn test_place_order_stamps_date_and_status() {
        let (desk, _) = desk();

        let order = desk
            .place_order(Order {
                book_title: "Gatsby".to_string(),
                email: "a@b.com".to_string(),
                quantity: 2,
                status: OrderStatus::Completed, // caller-supplied status is ignored
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.order_date.is_some());
        assert!(!order.id.is_empty());
    }

    #[tokio::test]
    async fn test_update_status_and_partial_update() {
        let (desk, _) = desk();
        let order = desk.place_order(Order::default()).await.unwrap();

        let updated = desk
            .update_status(&order.id, OrderStatus::Completed)
            .await
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Completed);

        let updated = desk
            .update(
                &order.id,
                OrderUpdate {
                    quantity: Some(5),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.quantity, 5);
        // Untouched fields survive a partial update
        assert_eq!(updated.status, OrderStatus::Completed);
    }

    #[tokio::test]
    async fn test_delete_unknown_order() {
        let (desk, _) = desk();
        let result = desk.delete("missing").await;
        assert!(matches!(result, Err(AppError::OrderNotFound(_))));
    }

    #[tokio::test]
    async fn test_orders_by_email_refresh_title() {
        let (desk, books) = desk();

        let mut book = Book::default();
        book.title = "Old Title".to_string();
        let book = books.save(book).await.unwrap();

        desk.place_order(Order {
            book_id: book.id.clone(),
            book_title: "Old Title".to_string(),
            email: "a@b.com".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

        let mut renamed = book.clone();
        renamed.title = "New Title".to_string();
        books.save(renamed).await.unwrap();

        let orders = desk.orders_by_email("a@b.com").await.unwrap();
        assert_eq!(orders[0].book_title, "New Title");

        // Snapshot survives when the book is gone
        books.delete_by_id(&book.id).await.unwrap();
        let orders = desk.orders_by_email("a@b.com").await.unwrap();
        assert_eq!(orders[0].book_title, "Old Title");
    }
}
