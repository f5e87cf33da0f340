use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::line_item::LineItem;

/// User intent applied to the session cart.
#[derive(Debug, Clone, PartialEq)]
pub enum CartEvent {
    Increment(String),
    Decrement(String),
    Remove(String),
    SetQuantity(String, i64),
    AddProduct(LineItem),
    Checkout,
}

/// What applying a [`CartEvent`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOutcome {
    Changed,
    Unchanged,
    /// Checkout requested. Carries no cart data; the checkout screen reads
    /// the cart itself.
    NavigateToCheckout,
}

/// Cart event as written in a replay script or on the command line.
/// Products are referenced by id and resolved against the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptedEvent {
    Increment { id: String },
    Decrement { id: String },
    Remove { id: String },
    Set { id: String, quantity: i64 },
    Add { product_id: String },
    Checkout,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CartScript {
    #[serde(default)]
    pub description: Option<String>,
    pub events: Vec<ScriptedEvent>,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EventParseError {
    #[error("Empty event")]
    Empty,
    #[error("Unknown event '{0}', expected one of inc, dec, rm, set, add, checkout")]
    UnknownKind(String),
    #[error("Event '{0}' is missing an id")]
    MissingId(String),
    #[error("Invalid quantity in '{0}', expected set:<id>=<quantity>")]
    InvalidQuantity(String),
}

impl FromStr for ScriptedEvent {
    type Err = EventParseError;

    /// Parses `inc:<id>`, `dec:<id>`, `rm:<id>`, `set:<id>=<qty>`,
    /// `add:<product_id>` and `checkout`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if token.is_empty() {
            return Err(EventParseError::Empty);
        }

        if token.eq_ignore_ascii_case("checkout") {
            return Ok(ScriptedEvent::Checkout);
        }

        let (kind, rest) = token
            .split_once(':')
            .ok_or_else(|| EventParseError::UnknownKind(token.to_string()))?;
        let rest = rest.trim();
        if rest.is_empty() {
            return Err(EventParseError::MissingId(token.to_string()));
        }

        match kind.trim().to_ascii_lowercase().as_str() {
            "inc" | "increment" => Ok(ScriptedEvent::Increment { id: rest.to_string() }),
            "dec" | "decrement" => Ok(ScriptedEvent::Decrement { id: rest.to_string() }),
            "rm" | "remove" => Ok(ScriptedEvent::Remove { id: rest.to_string() }),
            "add" => Ok(ScriptedEvent::Add { product_id: rest.to_string() }),
            "set" => {
                let (id, quantity) = rest
                    .split_once('=')
                    .ok_or_else(|| EventParseError::InvalidQuantity(token.to_string()))?;
                if id.trim().is_empty() {
                    return Err(EventParseError::MissingId(token.to_string()));
                }
                let quantity = quantity
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| EventParseError::InvalidQuantity(token.to_string()))?;
                Ok(ScriptedEvent::Set {
                    id: id.trim().to_string(),
                    quantity,
                })
            }
            _ => Err(EventParseError::UnknownKind(token.to_string())),
        }
    }
}

impl fmt::Display for ScriptedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptedEvent::Increment { id } => write!(f, "inc:{}", id),
            ScriptedEvent::Decrement { id } => write!(f, "dec:{}", id),
            ScriptedEvent::Remove { id } => write!(f, "rm:{}", id),
            ScriptedEvent::Set { id, quantity } => write!(f, "set:{}={}", id, quantity),
            ScriptedEvent::Add { product_id } => write!(f, "add:{}", product_id),
            ScriptedEvent::Checkout => write!(f, "checkout"),
        }
    }
}
