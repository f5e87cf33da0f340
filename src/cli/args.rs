use clap::{Parser, Subcommand, ValueEnum};
use std::fmt;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "khmer-shopcart")]
#[command(about = "Khmer ShopCart: browse the demo catalog and drive a shopping cart from the terminal")]
#[command(version = "0.1.0")]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Cart commands
    Cart {
        #[command(subcommand)]
        command: CartCommands,
    },
    /// Product catalog commands
    Products {
        #[command(subcommand)]
        command: ProductCommands,
    },
    /// Apply a JSON event script to a fresh cart
    Replay {
        /// Script file path
        file: PathBuf,
        /// Start from an empty cart instead of the demo cart
        #[arg(long)]
        empty: bool,
    },
    /// Resolve a route path to its screen
    Route {
        /// Route path, e.g. product_detail/prod_1
        path: String,
    },
    /// Interactive shopping session
    Shell {
        /// Start from an empty cart instead of the demo cart
        #[arg(long)]
        empty: bool,
        /// Skip confirmation prompts
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum CartCommands {
    /// Show the cart and its totals
    Show {
        /// Start from an empty cart instead of the demo cart
        #[arg(long)]
        empty: bool,
    },
    /// Apply events (inc:<id>, dec:<id>, rm:<id>, set:<id>=<qty>, add:<product>, checkout)
    Apply {
        /// Events to apply, in order
        #[arg(required = true)]
        events: Vec<String>,
        /// Start from an empty cart instead of the demo cart
        #[arg(long)]
        empty: bool,
    },
    /// Export the cart snapshot as JSON
    Export {
        /// Output file path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Start from an empty cart instead of the demo cart
        #[arg(long)]
        empty: bool,
    },
}

#[derive(Subcommand)]
pub enum ProductCommands {
    /// List products with optional filtering
    List {
        /// Filter by category
        #[arg(short, long)]
        category: Option<Category>,
        /// Search keyword
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show detailed information about a product
    Show {
        /// Product ID
        id: String,
    },
}

#[derive(Clone, ValueEnum)]
pub enum Category {
    Electronics,
    Fashion,
    Home,
    Beauty,
    Sports,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Electronics => write!(f, "electronics"),
            Category::Fashion => write!(f, "fashion"),
            Category::Home => write!(f, "home"),
            Category::Beauty => write!(f, "beauty"),
            Category::Sports => write!(f, "sports"),
        }
    }
}
