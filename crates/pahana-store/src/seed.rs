//! First-run seeding
//!
//! Populates empty collections on startup so a fresh deployment has a
//! browsable catalog and a working admin login. Collections that already
//! hold documents are left untouched.

use pahana_core::models::{Book, User, UserRole};
use pahana_core::traits::{BookStore, UserStore};
use pahana_core::AppError;
use tracing::info;

/// Seed the default admin account when no back-office user exists.
///
/// The caller supplies the already-hashed password so this crate stays
/// free of any credential handling.
pub async fn seed_admin(users: &dyn UserStore, password_hash: String) -> Result<(), AppError> {
    if users.count().await? > 0 {
        return Ok(());
    }

    let admin = User {
        username: "admin".to_string(),
        password_hash,
        name: "Administrator".to_string(),
        role: UserRole::Admin,
        ..Default::default()
    };
    users.save(admin).await?;
    info!("Seeded default admin user");
    Ok(())
}

/// Seed the sample catalog when the book collection is empty
pub async fn seed_books(books: &dyn BookStore) -> Result<(), AppError> {
    if books.count().await? > 0 {
        return Ok(());
    }

    for book in sample_books() {
        books.save(book).await?;
    }
    info!("Seeded sample book catalog");
    Ok(())
}

fn sample_book(
    title: &str,
    author: &str,
    description: &str,
    category: &str,
    price: f64,
    published_year: i32,
    stock: i32,
) -> Book {
    let mut book = Book::default();
    book.title = title.to_string();
    book.author = author.to_string();
    book.description = Some(description.to_string());
    book.category = Some(category.to_string());
    book.price = price;
    book.published_year = published_year;
    book.set_stock_quantity(stock);
    book
}

fn sample_books() -> Vec<Book> {
    vec![
        sample_book(
            "The Great Gatsby",
            "F. Scott Fitzgerald",
            "A classic American novel set in the Jazz Age",
            "Novels",
            15.99,
            1925,
            25,
        ),
        sample_book(
            "To Kill a Mockingbird",
            "Harper Lee",
            "A story of racial injustice in the American South",
            "Novels",
            12.99,
            1960,
            30,
        ),
        sample_book(
            "1984",
            "George Orwell",
            "A dystopian vision of total surveillance",
            "Novels",
            14.99,
            1949,
            20,
        ),
        sample_book(
            "The Cat in the Hat",
            "Dr. Seuss",
            "A mischievous cat turns a rainy day upside down",
            "Children",
            8.99,
            1957,
            50,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryBookStore, MemoryUserStore};

    #[tokio::test]
    async fn test_seed_books_only_when_empty() {
        let store = MemoryBookStore::new();
        seed_books(&store).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 4);

        // Second run leaves the collection alone
        seed_books(&store).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_seeded_books_carry_stock_and_derived_status() {
        let store = MemoryBookStore::new();
        seed_books(&store).await.unwrap();

        let books = store.find_all().await.unwrap();
        let gatsby = books
            .iter()
            .find(|b| b.title == "The Great Gatsby")
            .unwrap();
        assert_eq!(gatsby.stock_quantity(), 25);
        assert_eq!(
            gatsby.status(),
            pahana_core::models::StockStatus::InStock
        );
        assert_eq!(gatsby.category_or_default(), "Novels");
    }

    #[tokio::test]
    async fn test_seed_admin_skipped_when_user_exists() {
        let store = MemoryUserStore::new();
        seed_admin(&store, "$argon2$first".to_string()).await.unwrap();
        seed_admin(&store, "$argon2$second".to_string()).await.unwrap();

        let admin = store.find_by_username("admin").await.unwrap().unwrap();
        assert_eq!(admin.password_hash, "$argon2$first");
        assert_eq!(store.count().await.unwrap(), 1);
    }
}
