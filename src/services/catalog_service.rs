use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    models::{
        line_item::LineItem,
        product::{Category, Product},
    },
    repositories::{ProductRepository, ProductRepositoryError},
};

#[derive(Error, Debug)]
pub enum CatalogServiceError {
    #[error("Product not found: {id}")]
    ProductNotFound { id: String },

    #[error("Repository error: {0}")]
    RepositoryError(#[from] ProductRepositoryError),
}

// Product filter for listing
#[derive(Debug, Default, Clone)]
pub struct ProductFilter {
    pub category: Option<Category>,
    pub search_term: Option<String>,
}

impl ProductFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }
}

pub struct CatalogService {
    product_repository: Arc<dyn ProductRepository>,
}

impl CatalogService {
    pub fn new(product_repository: Arc<dyn ProductRepository>) -> Self {
        Self { product_repository }
    }

    pub async fn get_product(&self, id: &str) -> Result<Product, CatalogServiceError> {
        let product = self.product_repository.find_by_id(id).await?;

        product.ok_or_else(|| {
            warn!("Product lookup failed for id: {}", id);
            CatalogServiceError::ProductNotFound { id: id.to_string() }
        })
    }

    /// List products, narrowing by category and search term when given.
    pub async fn list_products(&self, filter: ProductFilter) -> Result<Vec<Product>, CatalogServiceError> {
        debug!("Listing products with filter: {:?}", filter);

        let products = match filter {
            ProductFilter {
                category: None,
                search_term: None,
            } => self.product_repository.find_all().await?,
            ProductFilter {
                category: Some(category),
                search_term: None,
            } => self.product_repository.find_by_category(category).await?,
            ProductFilter {
                category: None,
                search_term: Some(ref term),
            } => self.product_repository.search(term).await?,
            ProductFilter {
                category: Some(category),
                search_term: Some(ref term),
            } => self
                .product_repository
                .find_by_category(category)
                .await?
                .into_iter()
                .filter(|product| product.matches_search(term))
                .collect(),
        };

        debug!("Found {} products", products.len());
        Ok(products)
    }

    pub async fn catalog_size(&self) -> Result<usize, CatalogServiceError> {
        Ok(self.product_repository.count().await?)
    }

    /// Resolve a product id into a single-unit line item for the cart.
    pub async fn line_item_for(&self, product_id: &str) -> Result<LineItem, CatalogServiceError> {
        let product = self.get_product(product_id).await?;
        info!("Prepared line item for product: {}", product.id);
        Ok(product.to_line_item())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryProductRepository;

    fn service() -> CatalogService {
        CatalogService::new(Arc::new(InMemoryProductRepository::demo().unwrap()))
    }

    #[tokio::test]
    async fn test_get_product_not_found() {
        let result = service().get_product("prod_99").await;
        assert!(matches!(
            result,
            Err(CatalogServiceError::ProductNotFound { id }) if id == "prod_99"
        ));
    }

    #[tokio::test]
    async fn test_list_products_filters() {
        let service = service();

        let all = service.list_products(ProductFilter::new()).await.unwrap();
        assert_eq!(all.len(), 11);
        assert_eq!(service.catalog_size().await.unwrap(), 11);

        let electronics = service
            .list_products(ProductFilter::new().with_category(Category::Electronics))
            .await
            .unwrap();
        assert_eq!(
            electronics.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(),
            vec!["prod_0", "rec_3", "1", "2"]
        );

        let both = service
            .list_products(
                ProductFilter::new()
                    .with_category(Category::Electronics)
                    .with_search("headphones"),
            )
            .await
            .unwrap();
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].id, "1");
    }

    #[tokio::test]
    async fn test_line_item_for_product() {
        let item = service().line_item_for("rec_4").await.unwrap();
        assert_eq!(item.title, "Rec Product 4");
        assert_eq!(item.quantity, 1);
        assert!((item.unit_price - 19.99).abs() < 1e-9);
    }
}
