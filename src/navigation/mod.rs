pub mod navigator;
pub mod route;

pub use navigator::{NavEvent, Navigator};
pub use route::{RouteError, Screen};
