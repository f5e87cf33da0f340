use std::fmt;
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::product::is_valid_product_id;

/// Every destination of the app, with the data it needs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum Screen {
    Welcome,
    SignIn,
    SignUp,
    Home,
    ProductDetail { product_id: String },
    Cart,
    Checkout,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RouteError {
    #[error("Unknown route: '{0}'")]
    UnknownRoute(String),
    #[error("Route '{0}' is missing a product id")]
    MissingProductId(String),
    #[error("Invalid product id '{0}'")]
    InvalidProductId(String),
}

lazy_static::lazy_static! {
    static ref PRODUCT_DETAIL_ROUTE: Regex =
        Regex::new(r"^product_detail(?:/(?P<product_id>.*))?$").unwrap();
}

impl Screen {
    pub fn product_detail(product_id: impl Into<String>) -> Result<Self, RouteError> {
        let product_id = product_id.into();
        if product_id.is_empty() {
            return Err(RouteError::MissingProductId("product_detail/".to_string()));
        }
        if !is_valid_product_id(&product_id) {
            return Err(RouteError::InvalidProductId(product_id));
        }
        Ok(Screen::ProductDetail { product_id })
    }

    /// Route template, with the parameter placeholder for product detail.
    pub fn pattern(&self) -> &'static str {
        match self {
            Screen::Welcome => "welcome",
            Screen::SignIn => "signin",
            Screen::SignUp => "signup",
            Screen::Home => "home",
            Screen::ProductDetail { .. } => "product_detail/{productId}",
            Screen::Cart => "cart",
            Screen::Checkout => "checkout",
        }
    }

    pub fn path(&self) -> String {
        match self {
            Screen::ProductDetail { product_id } => format!("product_detail/{}", product_id),
            other => other.pattern().to_string(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Welcome => "Welcome",
            Screen::SignIn => "Sign In",
            Screen::SignUp => "Sign Up",
            Screen::Home => "Khmer ShopCart",
            Screen::ProductDetail { .. } => "Product Details",
            Screen::Cart => "My Cart",
            Screen::Checkout => "Checkout",
        }
    }

    pub fn parse(path: &str) -> Result<Self, RouteError> {
        let path = path.trim().trim_matches('/');
        match path {
            "welcome" => return Ok(Screen::Welcome),
            "signin" => return Ok(Screen::SignIn),
            "signup" => return Ok(Screen::SignUp),
            "home" => return Ok(Screen::Home),
            "cart" => return Ok(Screen::Cart),
            "checkout" => return Ok(Screen::Checkout),
            _ => {}
        }

        let captures = PRODUCT_DETAIL_ROUTE
            .captures(path)
            .ok_or_else(|| RouteError::UnknownRoute(path.to_string()))?;

        match captures.name("product_id").map(|m| m.as_str()) {
            None | Some("") => Err(RouteError::MissingProductId(path.to_string())),
            Some(product_id) => Screen::product_detail(product_id),
        }
    }
}

impl FromStr for Screen {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Screen::parse(s)
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}
