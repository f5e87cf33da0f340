use async_trait::async_trait;
use thiserror::Error;

use crate::models::product::{Category, Product, ProductError, StoreProductRequest};

#[derive(Error, Debug)]
pub enum ProductRepositoryError {
    #[error("Duplicate product id: {0}")]
    DuplicateId(String),
    #[error("Validation error: {0}")]
    ValidationError(#[from] ProductError),
}

/// Product repository trait for catalog lookups
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Product>, ProductRepositoryError>;
    async fn find_all(&self) -> Result<Vec<Product>, ProductRepositoryError>;
    async fn find_by_category(&self, category: Category) -> Result<Vec<Product>, ProductRepositoryError>;
    async fn search(&self, search_term: &str) -> Result<Vec<Product>, ProductRepositoryError>;
    async fn count(&self) -> Result<usize, ProductRepositoryError>;
}

/// In-memory catalog. Products keep the order they were added in.
pub struct InMemoryProductRepository {
    products: Vec<Product>,
}

impl InMemoryProductRepository {
    pub fn new(products: Vec<Product>) -> Result<Self, ProductRepositoryError> {
        {
            let mut seen = std::collections::HashSet::new();
            for product in &products {
                if !seen.insert(product.id.as_str()) {
                    return Err(ProductRepositoryError::DuplicateId(product.id.clone()));
                }
            }
        }
        Ok(Self { products })
    }

    pub fn from_requests(requests: Vec<StoreProductRequest>) -> Result<Self, ProductRepositoryError> {
        let products = requests
            .into_iter()
            .map(Product::new)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(products)
    }

    /// Placeholder catalog shown on the home dashboard: five featured
    /// products, four recommendations and the two cart demo items.
    pub fn demo() -> Result<Self, ProductRepositoryError> {
        let featured = (0..5u32).map(|index| {
            demo_request(
                &format!("prod_{}", index),
                &format!("Product Title {}", index),
                f64::from((index + 1) * 10) + 0.99,
                &format!("https://picsum.photos/200/200?random={}", index),
                Category::ALL[index as usize],
            )
        });

        let recommended = [
            ("rec_1", "Rec Product 1", 49.99, 10, Category::Fashion),
            ("rec_2", "Rec Product 2", 29.99, 11, Category::Beauty),
            ("rec_3", "Rec Product 3", 89.99, 12, Category::Electronics),
            ("rec_4", "Rec Product 4", 19.99, 13, Category::Home),
        ]
        .into_iter()
        .map(|(id, title, price, image, category)| {
            demo_request(
                id,
                title,
                price,
                &format!("https://picsum.photos/200/200?random={}", image),
                category,
            )
        });

        let cart_items = [
            ("1", "Wireless Headphones", 299.99, 1),
            ("2", "Smart Watch", 199.99, 2),
        ]
        .into_iter()
        .map(|(id, title, price, image)| {
            demo_request(
                id,
                title,
                price,
                &format!("https://picsum.photos/200/200?random={}", image),
                Category::Electronics,
            )
        });

        Self::from_requests(featured.chain(recommended).chain(cart_items).collect())
    }
}

fn demo_request(
    id: &str,
    title: &str,
    price: f64,
    image_url: &str,
    category: Category,
) -> StoreProductRequest {
    StoreProductRequest {
        id: id.to_string(),
        title: title.to_string(),
        price,
        image_url: image_url.to_string(),
        category,
        rating: 4.8,
        review_count: 120,
        description: format!(
            "{} is part of our {} collection. Quality materials, fast delivery.",
            title, category
        ),
        colors: vec!["Black".to_string(), "White".to_string(), "Blue".to_string()],
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Product>, ProductRepositoryError> {
        Ok(self.products.iter().find(|product| product.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Product>, ProductRepositoryError> {
        Ok(self.products.clone())
    }

    async fn find_by_category(&self, category: Category) -> Result<Vec<Product>, ProductRepositoryError> {
        Ok(self
            .products
            .iter()
            .filter(|product| product.category == category)
            .cloned()
            .collect())
    }

    async fn search(&self, search_term: &str) -> Result<Vec<Product>, ProductRepositoryError> {
        Ok(self
            .products
            .iter()
            .filter(|product| product.matches_search(search_term))
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<usize, ProductRepositoryError> {
        Ok(self.products.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_demo_catalog_contents() {
        let repo = InMemoryProductRepository::demo().unwrap();
        assert_eq!(repo.count().await.unwrap(), 11);

        let prod = repo.find_by_id("prod_2").await.unwrap().unwrap();
        assert_eq!(prod.title, "Product Title 2");
        assert!((prod.price - 30.99).abs() < 1e-9);

        let rec = repo.find_by_id("rec_3").await.unwrap().unwrap();
        assert!((rec.price - 89.99).abs() < 1e-9);

        assert!(repo.find_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_by_category_and_search() {
        let repo = InMemoryProductRepository::demo().unwrap();

        let sports = repo.find_by_category(Category::Sports).await.unwrap();
        assert_eq!(sports.len(), 1);
        assert_eq!(sports[0].id, "prod_4");

        let recs = repo.search("rec product").await.unwrap();
        assert_eq!(recs.len(), 4);

        let watch = repo.search("WATCH").await.unwrap();
        assert_eq!(watch.len(), 1);
        assert_eq!(watch[0].id, "2");
    }

    #[test]
    fn test_from_requests_validates() {
        let mut request = demo_request("mug", "Mug", 2.0, "", Category::Home);
        request.price = -2.0;
        let result = InMemoryProductRepository::from_requests(vec![request]);
        assert!(matches!(result, Err(ProductRepositoryError::ValidationError(_))));

        let bad_id = demo_request("mug 2", "Mug", 2.0, "", Category::Home);
        let result = InMemoryProductRepository::from_requests(vec![bad_id]);
        assert!(matches!(result, Err(ProductRepositoryError::ValidationError(_))));
    }

    #[test]
    fn test_new_repository_lookup() {
        let repo = InMemoryProductRepository::from_requests(vec![demo_request(
            "solo",
            "Solo",
            5.0,
            "",
            Category::Sports,
        )])
        .unwrap();
        let found = tokio_test::block_on(repo.find_by_id("solo")).unwrap();
        assert_eq!(found.map(|p| p.title), Some("Solo".to_string()));
        assert_eq!(tokio_test::block_on(repo.count()).unwrap(), 1);
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let result = InMemoryProductRepository::from_requests(vec![
            demo_request("dup", "Dup", 1.0, "", Category::Home),
            demo_request("dup", "Dup again", 2.0, "", Category::Fashion),
        ]);
        assert!(matches!(result, Err(ProductRepositoryError::DuplicateId(id)) if id == "dup"));
    }
}
