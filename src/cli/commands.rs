use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use console::{style, Emoji};
use tracing::{error, info, warn};

use crate::{
    cli::args::*,
    models::{
        cart::{Cart, CartSnapshot},
        event::{CartEvent, CartOutcome, CartScript, ScriptedEvent},
        product::Category as ModelCategory,
    },
    navigation::Screen,
    repositories::InMemoryProductRepository,
    services::{CartController, CatalogService, CatalogServiceError, ProductFilter},
    utils::{
        formatting::{format_cart, format_product_detail, format_product_table, format_screen},
        Config,
    },
};

pub(crate) static CHECKMARK: Emoji<'_, '_> = Emoji("✅ ", "");
pub(crate) static CROSS: Emoji<'_, '_> = Emoji("❌ ", "");
pub(crate) static WARNING: Emoji<'_, '_> = Emoji("⚠️ ", "");
pub(crate) static INFO: Emoji<'_, '_> = Emoji("ℹ️ ", "");
pub(crate) static CART: Emoji<'_, '_> = Emoji("🛒 ", "");

pub struct CliApp {
    pub(crate) config: Config,
    pub(crate) catalog_service: Arc<CatalogService>,
}

impl CliApp {
    pub fn new(config: Config) -> Result<Self> {
        let product_repo =
            Arc::new(InMemoryProductRepository::demo().context("Failed to load the demo catalog")?);
        let catalog_service = Arc::new(CatalogService::new(product_repo));

        Ok(Self {
            config,
            catalog_service,
        })
    }

    pub async fn run(&self, args: Args) -> Result<()> {
        match args.command {
            Commands::Cart { command } => self.handle_cart_command(command).await,
            Commands::Products { command } => self.handle_product_command(command).await,
            Commands::Replay { file, empty } => self.handle_replay(&file, empty).await,
            Commands::Route { path } => self.handle_route(&path),
            Commands::Shell { empty, force } => self.run_shell(empty, force).await,
        }
    }

    /// Fresh session controller, seeded with the demo cart unless `empty`
    /// is set or seeding is switched off in the config.
    pub fn new_controller(&self, empty: bool) -> CartController {
        let cart = if empty || !self.config.seed_demo_cart {
            Cart::new()
        } else {
            Cart::demo()
        };
        CartController::new(cart)
    }

    /// Turn a scripted event into a cart event, looking products up in the catalog.
    pub async fn resolve_event(&self, event: ScriptedEvent) -> Result<CartEvent, CatalogServiceError> {
        let event = match event {
            ScriptedEvent::Increment { id } => CartEvent::Increment(id),
            ScriptedEvent::Decrement { id } => CartEvent::Decrement(id),
            ScriptedEvent::Remove { id } => CartEvent::Remove(id),
            ScriptedEvent::Set { id, quantity } => CartEvent::SetQuantity(id, quantity),
            ScriptedEvent::Add { product_id } => {
                CartEvent::AddProduct(self.catalog_service.line_item_for(&product_id).await?)
            }
            ScriptedEvent::Checkout => CartEvent::Checkout,
        };
        Ok(event)
    }

    /// Apply scripted events in order and return one outcome per event.
    pub async fn apply_events(
        &self,
        controller: &mut CartController,
        events: Vec<ScriptedEvent>,
    ) -> Result<Vec<CartOutcome>> {
        let mut outcomes = Vec::with_capacity(events.len());
        for event in events {
            let label = event.to_string();
            let cart_event = self
                .resolve_event(event)
                .await
                .with_context(|| format!("Failed to resolve event '{}'", label))?;
            outcomes.push(controller.apply(cart_event));
        }
        Ok(outcomes)
    }

    pub(crate) fn print_cart(&self, snapshot: &CartSnapshot) {
        println!("{} {}", CART, style("My Cart").bold().cyan());
        print!("{}", format_cart(snapshot, &self.config.currency_symbol));
    }

    // Cart Commands
    async fn handle_cart_command(&self, command: CartCommands) -> Result<()> {
        match command {
            CartCommands::Show { empty } => {
                let controller = self.new_controller(empty);
                self.print_cart(&controller.snapshot());
                Ok(())
            }
            CartCommands::Apply { events, empty } => self.handle_apply(events, empty).await,
            CartCommands::Export { output, empty } => {
                let controller = self.new_controller(empty);
                export_snapshot(&controller.snapshot(), output.as_deref())
            }
        }
    }

    /// Parse `inc:1`-style tokens and apply them in order. Nothing is applied
    /// when any token fails to parse.
    pub async fn apply_tokens(
        &self,
        controller: &mut CartController,
        tokens: &[String],
    ) -> Result<Vec<CartOutcome>> {
        let events = tokens
            .iter()
            .map(|token| token.parse::<ScriptedEvent>())
            .collect::<Result<Vec<_>, _>>()
            .context("Invalid cart event")?;
        self.apply_events(controller, events).await
    }

    async fn handle_apply(&self, tokens: Vec<String>, empty: bool) -> Result<()> {
        let mut controller = self.new_controller(empty);
        let outcomes = self.apply_tokens(&mut controller, &tokens).await?;
        self.report_outcomes(&outcomes);
        self.print_cart(&controller.snapshot());
        Ok(())
    }

    async fn handle_replay(&self, file: &Path, empty: bool) -> Result<()> {
        let script = load_script(file)?;
        if let Some(description) = &script.description {
            println!("{} {}", INFO, style(description).dim());
        }
        info!("Replaying {} events from {}", script.events.len(), file.display());

        let mut controller = self.new_controller(empty);
        match self.apply_events(&mut controller, script.events).await {
            Ok(outcomes) => {
                self.report_outcomes(&outcomes);
                self.print_cart(&controller.snapshot());
            }
            Err(e) => {
                println!("{} Replay failed: {}", CROSS, style(&e).red());
                error!("Replay failed: {:#}", e);
                return Err(e);
            }
        }
        Ok(())
    }

    fn report_outcomes(&self, outcomes: &[CartOutcome]) {
        let changed = outcomes.iter().filter(|o| **o == CartOutcome::Changed).count();
        let unchanged = outcomes.iter().filter(|o| **o == CartOutcome::Unchanged).count();
        println!(
            "{} Applied {} events ({} changed the cart, {} had no effect)",
            CHECKMARK,
            outcomes.len(),
            changed,
            unchanged
        );
        if outcomes.contains(&CartOutcome::NavigateToCheckout) {
            println!("{} Checkout requested", INFO);
        }
    }

    // Product Commands
    async fn handle_product_command(&self, command: ProductCommands) -> Result<()> {
        match command {
            ProductCommands::List { category, search } => {
                let mut filter = ProductFilter::new();
                if let Some(category) = category {
                    filter = filter.with_category(to_model_category(&category));
                }
                if let Some(search) = search {
                    filter = filter.with_search(search);
                }

                let total = self.catalog_service.catalog_size().await?;
                match self.catalog_service.list_products(filter).await {
                    Ok(products) if products.is_empty() => println!("{} No products found", INFO),
                    Ok(products) => {
                        println!(
                            "{} {}",
                            INFO,
                            style(format!("Found {} of {} products", products.len(), total)).bold()
                        );
                        println!(
                            "{}",
                            format_product_table(&products, &self.config.currency_symbol)
                        );
                    }
                    Err(e) => {
                        println!("{} Failed to list products: {}", CROSS, style(&e).red());
                        error!("Failed to list products: {}", e);
                    }
                }
            }
            ProductCommands::Show { id } => match self.catalog_service.get_product(&id).await {
                Ok(product) => {
                    println!("{} {}", INFO, style("Product Details").bold().cyan());
                    print!("{}", format_product_detail(&product, &self.config.currency_symbol));
                }
                Err(CatalogServiceError::ProductNotFound { id }) => {
                    println!("{} Product '{}' not found", CROSS, style(id).red());
                }
                Err(e) => {
                    println!("{} Failed to get product: {}", CROSS, style(&e).red());
                    error!("Failed to get product: {}", e);
                }
            },
        }
        Ok(())
    }

    fn handle_route(&self, path: &str) -> Result<()> {
        match Screen::parse(path) {
            Ok(screen) => {
                println!("{} {}", CHECKMARK, format_screen(&screen));
                println!("Pattern: {}", style(screen.pattern()).dim());
            }
            Err(e) => {
                println!("{} {}", WARNING, style(&e).yellow());
                warn!("Route resolution failed: {}", e);
            }
        }
        Ok(())
    }
}

pub fn to_model_category(category: &Category) -> ModelCategory {
    match category {
        Category::Electronics => ModelCategory::Electronics,
        Category::Fashion => ModelCategory::Fashion,
        Category::Home => ModelCategory::Home,
        Category::Beauty => ModelCategory::Beauty,
        Category::Sports => ModelCategory::Sports,
    }
}

pub fn load_script(path: &Path) -> Result<CartScript> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;
    let script = serde_json::from_str(&content)
        .with_context(|| format!("Invalid event script {}", path.display()))?;
    Ok(script)
}

/// Write the snapshot as pretty JSON to `output`, or stdout when `None`.
pub fn export_snapshot(snapshot: &CartSnapshot, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot).context("Failed to serialize cart")?;
    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("{} Cart exported to {}", CHECKMARK, style(path.display()).green());
            info!("Cart exported to {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}
