use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    cli::commands::{CliApp, CHECKMARK, CROSS, INFO, WARNING},
    models::event::{CartEvent, CartOutcome},
    navigation::{NavEvent, Navigator, Screen},
    services::{CartController, ProductFilter},
    utils::formatting::{format_date, format_product_detail, format_product_table, format_screen},
};

/// One line typed into the interactive shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Help,
    Quit,
    Where,
    Navigate(NavEvent),
    Products,
    AddToCart,
    ShowCart,
    Increment(String),
    Decrement(String),
    Remove(String),
    SetQuantity(String, i64),
    Checkout,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ShellParseError {
    #[error("Unknown command '{0}', type 'help' for a list")]
    Unknown(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(String),
    #[error("'{0}' is not a whole number")]
    InvalidQuantity(String),
}

impl FromStr for ShellCommand {
    type Err = ShellParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let name = match parts.next() {
            Some(name) => name.to_lowercase(),
            None => return Ok(ShellCommand::Where),
        };
        let mut arg = |command: &str| {
            parts
                .next()
                .map(str::to_string)
                .ok_or_else(|| ShellParseError::MissingArgument(command.to_string()))
        };

        let command = match name.as_str() {
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" => ShellCommand::Quit,
            "where" => ShellCommand::Where,
            "start" => ShellCommand::Navigate(NavEvent::GetStarted),
            "signin" => ShellCommand::Navigate(NavEvent::SignInSuccess),
            "signup" => ShellCommand::Navigate(NavEvent::SignUpSuccess),
            "goto-signup" => ShellCommand::Navigate(NavEvent::GoToSignUp),
            "goto-signin" => ShellCommand::Navigate(NavEvent::GoToSignIn),
            "open" => ShellCommand::Navigate(NavEvent::OpenProduct(arg("open")?)),
            "cart" => ShellCommand::Navigate(NavEvent::OpenCart),
            "buy" => ShellCommand::Navigate(NavEvent::BuyNow),
            "back" => ShellCommand::Navigate(NavEvent::Back),
            "products" => ShellCommand::Products,
            "add" => ShellCommand::AddToCart,
            "show" => ShellCommand::ShowCart,
            "inc" => ShellCommand::Increment(arg("inc")?),
            "dec" => ShellCommand::Decrement(arg("dec")?),
            "rm" => ShellCommand::Remove(arg("rm")?),
            "set" => {
                let id = arg("set")?;
                let raw = arg("set")?;
                let quantity = raw
                    .parse::<i64>()
                    .map_err(|_| ShellParseError::InvalidQuantity(raw.clone()))?;
                ShellCommand::SetQuantity(id, quantity)
            }
            "checkout" => ShellCommand::Checkout,
            other => return Err(ShellParseError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

impl ShellCommand {
    /// Whether the command can run while `screen` is showing.
    pub fn allowed_on(&self, screen: &Screen) -> bool {
        match self {
            ShellCommand::Help | ShellCommand::Quit | ShellCommand::Where | ShellCommand::Navigate(_) => true,
            ShellCommand::Products => matches!(screen, Screen::Home),
            ShellCommand::AddToCart => matches!(screen, Screen::ProductDetail { .. }),
            ShellCommand::ShowCart => matches!(screen, Screen::Cart | Screen::Checkout),
            ShellCommand::Increment(_)
            | ShellCommand::Decrement(_)
            | ShellCommand::Remove(_)
            | ShellCommand::SetQuantity(_, _)
            | ShellCommand::Checkout => matches!(screen, Screen::Cart),
        }
    }
}

impl fmt::Display for ShellCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Send the checkout event and follow it to the checkout screen. An empty
/// cart never reaches checkout.
pub fn checkout<'a>(controller: &mut CartController, navigator: &'a mut Navigator) -> Option<&'a Screen> {
    if controller.cart().is_empty() {
        return None;
    }
    match controller.apply(CartEvent::Checkout) {
        CartOutcome::NavigateToCheckout => navigator.handle(NavEvent::Checkout),
        _ => None,
    }
}

const HELP: &str = "\
navigation: start, signin, signup, goto-signup, goto-signin, open <id>, cart, buy, back
home:       products
product:    add
cart:       show, inc <id>, dec <id>, rm <id>, set <id> <qty>, checkout
other:      where, help, quit";

impl CliApp {
    pub(crate) async fn run_shell(&self, empty: bool, force: bool) -> Result<()> {
        let theme = ColorfulTheme::default();
        let mut navigator = Navigator::new();
        let mut controller = self.new_controller(empty);
        let mut cart_rx = controller.subscribe();

        println!(
            "{} Session {} started {}",
            INFO,
            style(controller.session_id()).dim(),
            format_date(&controller.started_at())
        );
        println!("{}", format_screen(navigator.current()));

        loop {
            let line: String = Input::with_theme(&theme)
                .with_prompt(navigator.current().path())
                .allow_empty(true)
                .interact_text()?;

            let command = match line.parse::<ShellCommand>() {
                Ok(command) => command,
                Err(e) => {
                    println!("{} {}", WARNING, style(e).yellow());
                    continue;
                }
            };

            if !command.allowed_on(navigator.current()) {
                println!(
                    "{} Not available on {}",
                    WARNING,
                    style(navigator.current().title()).yellow()
                );
                continue;
            }

            debug!("Shell command: {}", command);
            match command {
                ShellCommand::Quit => break,
                ShellCommand::Help => println!("{}", HELP),
                ShellCommand::Where => {
                    let stack: Vec<String> = navigator.back_stack().iter().map(Screen::path).collect();
                    println!("{}", format_screen(navigator.current()));
                    println!("Back stack: {}", style(stack.join(" > ")).dim());
                }
                ShellCommand::Navigate(event) => match navigator.handle(event) {
                    Some(screen) => {
                        println!("{}", format_screen(screen));
                        self.render_screen(screen, &controller).await;
                    }
                    None => println!("{} Nothing to do here", WARNING),
                },
                ShellCommand::Products => {
                    let products = self.catalog_service.list_products(ProductFilter::new()).await?;
                    println!("{}", format_product_table(&products, &self.config.currency_symbol));
                }
                ShellCommand::AddToCart => {
                    if let Screen::ProductDetail { product_id } = navigator.current() {
                        match self.catalog_service.line_item_for(product_id).await {
                            Ok(item) => {
                                controller.apply(CartEvent::AddProduct(item));
                                println!("{} Added to cart", CHECKMARK);
                            }
                            Err(e) => println!("{} {}", CROSS, style(e).red()),
                        }
                    }
                }
                ShellCommand::ShowCart => self.print_cart(&controller.snapshot()),
                ShellCommand::Increment(id) => {
                    controller.apply(CartEvent::Increment(id));
                }
                ShellCommand::Decrement(id) => {
                    controller.apply(CartEvent::Decrement(id));
                }
                ShellCommand::SetQuantity(id, quantity) => {
                    controller.apply(CartEvent::SetQuantity(id, quantity));
                }
                ShellCommand::Remove(id) => {
                    let confirmed = force
                        || Confirm::with_theme(&theme)
                            .with_prompt(format!("Remove '{}' from the cart?", id))
                            .default(false)
                            .interact()?;
                    if confirmed {
                        controller.apply(CartEvent::Remove(id));
                    } else {
                        println!("Removal cancelled");
                    }
                }
                ShellCommand::Checkout => {
                    if controller.cart().is_empty() {
                        println!("{} Your cart is empty", WARNING);
                    } else if let Some(screen) = checkout(&mut controller, &mut navigator) {
                        println!("{}", format_screen(screen));
                        self.render_screen(screen, &controller).await;
                    }
                }
            }

            if cart_rx.has_changed().unwrap_or(false) {
                let snapshot = cart_rx.borrow_and_update().clone();
                if matches!(navigator.current(), Screen::Cart) {
                    self.print_cart(&snapshot);
                }
            }
        }

        info!("Shell session {} finished", controller.session_id());
        controller.reset();
        Ok(())
    }

    async fn render_screen(&self, screen: &Screen, controller: &CartController) {
        match screen {
            Screen::ProductDetail { product_id } => {
                match self.catalog_service.get_product(product_id).await {
                    Ok(product) => {
                        print!("{}", format_product_detail(&product, &self.config.currency_symbol))
                    }
                    Err(e) => println!("{} {}", CROSS, style(e).red()),
                }
            }
            Screen::Cart | Screen::Checkout => self.print_cart(&controller.snapshot()),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_navigation_commands() {
        assert_eq!("start".parse::<ShellCommand>(), Ok(ShellCommand::Navigate(NavEvent::GetStarted)));
        assert_eq!(
            "open prod_1".parse::<ShellCommand>(),
            Ok(ShellCommand::Navigate(NavEvent::OpenProduct("prod_1".to_string())))
        );
        assert_eq!("  ".parse::<ShellCommand>(), Ok(ShellCommand::Where));
        assert_eq!("BACK".parse::<ShellCommand>(), Ok(ShellCommand::Navigate(NavEvent::Back)));
    }

    #[test]
    fn test_parse_cart_commands() {
        assert_eq!("inc 1".parse::<ShellCommand>(), Ok(ShellCommand::Increment("1".to_string())));
        assert_eq!("set 2 -1".parse::<ShellCommand>(), Ok(ShellCommand::SetQuantity("2".to_string(), -1)));
        assert_eq!(
            "set 2".parse::<ShellCommand>(),
            Err(ShellParseError::MissingArgument("set".to_string()))
        );
        assert_eq!(
            "set 2 lots".parse::<ShellCommand>(),
            Err(ShellParseError::InvalidQuantity("lots".to_string()))
        );
        assert_eq!(
            "dance".parse::<ShellCommand>(),
            Err(ShellParseError::Unknown("dance".to_string()))
        );
    }

    fn navigator_on_cart() -> Navigator {
        let mut navigator = Navigator::starting_at(Screen::Home);
        navigator.handle(NavEvent::OpenCart);
        navigator
    }

    #[test]
    fn test_checkout_with_items_reaches_checkout_screen() {
        let mut controller = CartController::new(crate::models::cart::Cart::demo());
        let mut navigator = navigator_on_cart();
        assert_eq!(checkout(&mut controller, &mut navigator), Some(&Screen::Checkout));
        assert_eq!(controller.cart().len(), 2);
    }

    #[test]
    fn test_empty_cart_does_not_check_out() {
        let mut controller = CartController::default();
        let mut navigator = navigator_on_cart();
        assert_eq!(checkout(&mut controller, &mut navigator), None);
        assert_eq!(navigator.current(), &Screen::Cart);
    }

    #[test]
    fn test_commands_are_scoped_to_screens() {
        let detail = Screen::ProductDetail { product_id: "prod_1".to_string() };
        assert!(ShellCommand::AddToCart.allowed_on(&detail));
        assert!(!ShellCommand::AddToCart.allowed_on(&Screen::Cart));
        assert!(ShellCommand::Increment("1".to_string()).allowed_on(&Screen::Cart));
        assert!(!ShellCommand::Checkout.allowed_on(&Screen::Home));
        assert!(ShellCommand::Navigate(NavEvent::Back).allowed_on(&Screen::Welcome));
    }
}
