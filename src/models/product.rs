use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::line_item::LineItem;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Electronics,
    Fashion,
    Home,
    Beauty,
    Sports,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Electronics,
        Category::Fashion,
        Category::Home,
        Category::Beauty,
        Category::Sports,
    ];
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Electronics => write!(f, "Electronics"),
            Category::Fashion => write!(f, "Fashion"),
            Category::Home => write!(f, "Home"),
            Category::Beauty => write!(f, "Beauty"),
            Category::Sports => write!(f, "Sports"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Product {
    pub id: String,
    pub title: String,
    pub price: f64,
    pub image_url: String,
    pub category: Category,
    pub rating: f32,
    pub review_count: u32,
    pub description: String,
    pub colors: Vec<String>,
}

// request dto
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct StoreProductRequest {
    #[validate(regex(
        path = "PRODUCT_ID_REGEX",
        message = "Product id can only contain letters, numbers, '_' and '-'"
    ))]
    pub id: String,

    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    #[validate(custom = "validate_title")]
    pub title: String,

    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: f64,

    pub image_url: String,

    pub category: Category,

    #[validate(range(min = 0.0, max = 5.0, message = "Rating must be between 0 and 5"))]
    pub rating: f32,

    pub review_count: u32,

    #[validate(length(max = 1000, message = "Description must be less than 1000 characters"))]
    pub description: String,

    pub colors: Vec<String>,
}

lazy_static::lazy_static! {
    static ref PRODUCT_ID_REGEX: Regex = Regex::new(r"^[A-Za-z0-9_\-]+$").unwrap();
}

pub fn is_valid_product_id(id: &str) -> bool {
    PRODUCT_ID_REGEX.is_match(id)
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::new("Title is required"));
    }
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    #[error("Validation error: {0}")]
    ValidationError(#[from] validator::ValidationErrors),
}

impl Product {
    pub fn new(request: StoreProductRequest) -> Result<Self, ProductError> {
        request.validate()?;

        Ok(Self {
            id: request.id,
            title: request.title.trim().to_string(),
            price: request.price,
            image_url: request.image_url,
            category: request.category,
            rating: request.rating,
            review_count: request.review_count,
            description: request.description.trim().to_string(),
            colors: request.colors,
        })
    }

    /// Single unit of this product, ready to go into a cart.
    pub fn to_line_item(&self) -> LineItem {
        LineItem::new(
            self.id.clone(),
            self.title.clone(),
            self.price,
            1,
            self.image_url.clone(),
        )
    }

    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.title.to_lowercase().contains(&term)
            || self.description.to_lowercase().contains(&term)
    }
}
