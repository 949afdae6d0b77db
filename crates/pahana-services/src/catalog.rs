//! Catalog service
//!
//! Storefront listing with filters and pagination, plus the admin CRUD
//! surface. Archived books are soft-deleted: they stay in the collection but
//! disappear from listings, statistics and the category index.

use pahana_core::models::{Book, StockStatus};
use pahana_core::traits::BookStore;
use pahana_core::AppError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

const DEFAULT_PAGE_SIZE: usize = 12;

/// Listing filters; exactly one filter dimension applies, in declaration
/// order: search wins over category, category over status, status over the
/// price range.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort: Option<String>,
    pub page: Option<usize>,
    pub size: Option<usize>,
}

/// One page of catalog results
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPage {
    pub books: Vec<Book>,
    pub total: usize,
    pub page: usize,
    pub size: usize,
}

/// Inventory statistics over the non-archived catalog
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStatistics {
    pub total_books: usize,
    pub in_stock: usize,
    pub low_stock: usize,
    pub out_of_stock: usize,
    pub total_stock_quantity: i64,
}

/// Catalog service over the book collection
#[derive(Clone)]
pub struct CatalogService {
    books: Arc<dyn BookStore>,
}

impl CatalogService {
    pub fn new(books: Arc<dyn BookStore>) -> Self {
        Self { books }
    }

    /// Filtered, sorted, paginated listing of the non-archived catalog
    #[instrument(skip(self, filter))]
    pub async fn list(&self, filter: &BookFilter) -> Result<BookPage, AppError> {
        let all = self.books.find_all().await?;

        let mut matched: Vec<Book> = all
            .into_iter()
            .filter(|b| !b.archived)
            .filter(|b| Self::matches(b, filter))
            .collect();

        match filter.sort.as_deref() {
            Some("price_asc") => {
                matched.sort_by(|a, b| a.price.partial_cmp(&b.price).unwrap_or(std::cmp::Ordering::Equal))
            }
            Some("price_desc") => {
                matched.sort_by(|a, b| b.price.partial_cmp(&a.price).unwrap_or(std::cmp::Ordering::Equal))
            }
            Some("rating") => {
                matched.sort_by(|a, b| b.rating.partial_cmp(&a.rating).unwrap_or(std::cmp::Ordering::Equal))
            }
            Some("newest") => matched.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            _ => matched.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase())),
        }

        let total = matched.len();
        let page = filter.page.unwrap_or(0);
        let size = filter.size.unwrap_or(DEFAULT_PAGE_SIZE).max(1);

        let books = matched
            .into_iter()
            .skip(page * size)
            .take(size)
            .collect();

        Ok(BookPage {
            books,
            total,
            page,
            size,
        })
    }

    fn matches(book: &Book, filter: &BookFilter) -> bool {
        if let Some(term) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let needle = term.to_lowercase();
            return book.title.to_lowercase().contains(&needle)
                || book.author.to_lowercase().contains(&needle);
        }

        if let Some(category) = filter.category.as_deref().filter(|s| !s.is_empty()) {
            return book.category_or_default().eq_ignore_ascii_case(category);
        }

        if let Some(status) = filter.status.as_deref().and_then(StockStatus::from_str) {
            return book.status() == status;
        }

        if filter.min_price.is_some() || filter.max_price.is_some() {
            let min = filter.min_price.unwrap_or(0.0);
            let max = filter.max_price.unwrap_or(f64::MAX);
            return book.price >= min && book.price <= max;
        }

        true
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Book, AppError> {
        self.books
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::BookNotFound(id.to_string()))
    }

    #[instrument(skip(self, book))]
    pub async fn add(&self, mut book: Book) -> Result<Book, AppError> {
        // Status is derived from the quantity, never trusted from input
        book.set_stock_quantity(book.stock_quantity());
        let saved = self.books.save(book).await?;
        info!(title = %saved.title, "Added book to catalog");
        Ok(saved)
    }

    /// Replace a book's content fields; identity and timestamps survive
    #[instrument(skip(self, incoming))]
    pub async fn update(&self, id: &str, incoming: Book) -> Result<Book, AppError> {
        let mut book = self.find_by_id(id).await?;
        let quantity = incoming.stock_quantity();

        book.title = incoming.title;
        book.author = incoming.author;
        book.description = incoming.description;
        book.image_url = incoming.image_url;
        book.price = incoming.price;
        book.category = incoming.category;
        book.isbn = incoming.isbn;
        book.language = incoming.language;
        book.published_year = incoming.published_year;
        book.format = incoming.format;
        book.publisher = incoming.publisher;
        book.pages = incoming.pages;
        book.set_stock_quantity(quantity);
        book.updated_at = chrono::Utc::now();

        self.books.save(book).await
    }

    /// Set the stock quantity, re-deriving the status unless an explicit
    /// status override is given
    #[instrument(skip(self))]
    pub async fn update_stock(
        &self,
        id: &str,
        quantity: i32,
        status: Option<StockStatus>,
    ) -> Result<Book, AppError> {
        let mut book = self.find_by_id(id).await?;

        book.set_stock_quantity(quantity);
        if let Some(status) = status {
            book.set_status(status);
        }
        book.updated_at = chrono::Utc::now();

        self.books.save(book).await
    }

    /// Soft delete: the book stays addressable by id but leaves listings
    #[instrument(skip(self))]
    pub async fn archive(&self, id: &str) -> Result<Book, AppError> {
        let mut book = self.find_by_id(id).await?;
        book.archived = true;
        book.updated_at = chrono::Utc::now();
        self.books.save(book).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        if !self.books.delete_by_id(id).await? {
            return Err(AppError::BookNotFound(id.to_string()));
        }
        info!(id = %id, "Deleted book");
        Ok(())
    }

    /// Distinct categories of the non-archived catalog, sorted
    pub async fn categories(&self) -> Result<Vec<String>, AppError> {
        let books = self.books.find_all().await?;
        let mut categories: Vec<String> = books
            .iter()
            .filter(|b| !b.archived)
            .map(|b| b.category_or_default().to_string())
            .collect();
        categories.sort();
        categories.dedup();
        Ok(categories)
    }

    /// Per-status counts and total stock over the non-archived catalog
    pub async fn statistics(&self) -> Result<CatalogStatistics, AppError> {
        let books = self.books.find_all().await?;
        let active: Vec<&Book> = books.iter().filter(|b| !b.archived).collect();

        Ok(CatalogStatistics {
            total_books: active.len(),
            in_stock: active
                .iter()
                .filter(|b| b.status() == StockStatus::InStock)
                .count(),
            low_stock: active
                .iter()
                .filter(|b| b.status() == StockStatus::LowStock)
                .count(),
            out_of_stock: active
                .iter()
                .filter(|b| b.status() == StockStatus::OutOfStock)
                .count(),
            total_stock_quantity: active.iter().map(|b| b.stock_quantity() as i64).sum(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pahana_store::MemoryBookStore;

    fn book(title: &str, author: &str, category: &str, price: f64, stock: i32) -> Book {
        let mut book = Book::default();
        book.title = title.to_string();
        book.author = author.to_string();
        book.category = Some(category.to_string());
        book.price = price;
        book.set_stock_quantity(stock);
        book
    }

    async fn seeded_service() -> CatalogService {
        let store = Arc::new(MemoryBookStore::new());
        let service = CatalogService::new(store);
        for b in [
            book("Gatsby", "Fitzgerald", "Novels", 15.99, 25),
            book("Mockingbird", "Harper Lee", "Novels", 12.99, 3),
            book("Cat in the Hat", "Dr. Seuss", "Children", 8.99, 0),
        ] {
            service.add(b).await.unwrap();
        }
        service
    }

    #[tokio::test]
    async fn test_search_matches_title_or_author() {
        let service = seeded_service().await;

        let page = service
            .list(&BookFilter {
                search: Some("harper".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.books[0].title, "Mockingbird");

        let page = service
            .list(&BookFilter {
                search: Some("cat".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn test_search_takes_priority_over_category() {
        let service = seeded_service().await;

        let page = service
            .list(&BookFilter {
                search: Some("gatsby".to_string()),
                category: Some("Children".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.books[0].title, "Gatsby");
    }

    #[tokio::test]
    async fn test_price_range_filter() {
        let service = seeded_service().await;

        let page = service
            .list(&BookFilter {
                min_price: Some(10.0),
                max_price: Some(14.0),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.books[0].title, "Mockingbird");
    }

    #[tokio::test]
    async fn test_pagination() {
        let service = seeded_service().await;

        let page = service
            .list(&BookFilter {
                size: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.books.len(), 2);

        let page = service
            .list(&BookFilter {
                page: Some(1),
                size: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.books.len(), 1);
    }

    #[tokio::test]
    async fn test_archived_books_leave_listings_but_stay_addressable() {
        let service = seeded_service().await;
        let page = service.list(&BookFilter::default()).await.unwrap();
        let id = page.books[0].id.clone();

        service.archive(&id).await.unwrap();

        let page = service.list(&BookFilter::default()).await.unwrap();
        assert_eq!(page.total, 2);
        assert!(service.find_by_id(&id).await.unwrap().archived);
    }

    #[tokio::test]
    async fn test_update_replaces_content_and_rederives_status() {
        let service = seeded_service().await;
        let page = service.list(&BookFilter::default()).await.unwrap();
        let id = page.books[0].id.clone();
        let created_at = page.books[0].created_at;

        let updated = service
            .update(&id, book("Cat in the Hat", "Dr. Seuss", "Children", 9.99, 4))
            .await
            .unwrap();

        assert_eq!(updated.id, id);
        assert_eq!(updated.title, "Cat in the Hat");
        assert_eq!(updated.price, 9.99);
        assert_eq!(updated.stock_quantity(), 4);
        assert_eq!(updated.status(), StockStatus::LowStock);
        // Identity and the creation timestamp survive a full replace
        assert_eq!(updated.created_at, created_at);
    }

    #[tokio::test]
    async fn test_update_stock_rederives_unless_overridden() {
        let service = seeded_service().await;
        let page = service.list(&BookFilter::default()).await.unwrap();
        let id = page.books[0].id.clone();

        let updated = service.update_stock(&id, 2, None).await.unwrap();
        assert_eq!(updated.status(), StockStatus::LowStock);

        let updated = service
            .update_stock(&id, 2, Some(StockStatus::OutOfStock))
            .await
            .unwrap();
        assert_eq!(updated.status(), StockStatus::OutOfStock);
    }

    #[tokio::test]
    async fn test_statistics_skip_archived() {
        let service = seeded_service().await;
        let stats = service.statistics().await.unwrap();
        assert_eq!(
            stats,
            CatalogStatistics {
                total_books: 3,
                in_stock: 1,
                low_stock: 1,
                out_of_stock: 1,
                total_stock_quantity: 28,
            }
        );

        let page = service.list(&BookFilter::default()).await.unwrap();
        service.archive(&page.books[0].id).await.unwrap();

        let stats = service.statistics().await.unwrap();
        assert_eq!(stats.total_books, 2);
    }

    #[tokio::test]
    async fn test_categories_distinct_sorted() {
        let service = seeded_service().await;
        let categories = service.categories().await.unwrap();
        assert_eq!(categories, ["Children", "Novels"]);
    }

    #[tokio::test]
    async fn test_delete_unknown_book() {
        let service = seeded_service().await;
        let result = service.delete("missing").await;
        assert!(matches!(result, Err(AppError::BookNotFound(_))));
    }
}
