use chrono::{DateTime, Local, Utc};
use console::style;
use tabled::{
    settings::{Alignment, Style},
    Table, Tabled,
};

use crate::models::{
    cart::{CartSnapshot, CartTotals, TAX_RATE},
    line_item::LineItem,
    product::Product,
};
use crate::navigation::Screen;

#[derive(Tabled)]
struct CartTableRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Item")]
    title: String,
    #[tabled(rename = "Price")]
    unit_price: String,
    #[tabled(rename = "Qty")]
    quantity: i64,
    #[tabled(rename = "Total")]
    line_total: String,
}

#[derive(Tabled)]
struct ProductTableRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Rating")]
    rating: String,
}

/// Two-decimal display of a monetary amount. Stored values are never rounded.
pub fn format_money(amount: f64, currency_symbol: &str) -> String {
    format!("{}{:.2}", currency_symbol, amount)
}

pub fn format_cart_table(items: &[LineItem], currency_symbol: &str) -> String {
    if items.is_empty() {
        return String::new();
    }

    let rows: Vec<CartTableRow> = items
        .iter()
        .map(|item| CartTableRow {
            id: item.id.clone(),
            title: truncate(&item.title, 30),
            unit_price: format_money(item.unit_price, currency_symbol),
            quantity: item.quantity,
            line_total: format_money(item.line_total(), currency_symbol),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded()).with(Alignment::left());
    table.to_string()
}

pub fn format_totals(totals: &CartTotals, currency_symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{}: {}\n",
        style("Subtotal").bold(),
        format_money(totals.subtotal, currency_symbol)
    ));
    output.push_str(&format!(
        "{}: {}\n",
        style(format!("Tax ({:.0}%)", TAX_RATE * 100.0)).bold(),
        format_money(totals.tax, currency_symbol)
    ));
    output.push_str(&format!(
        "{}: {}\n",
        style("Shipping").bold(),
        format_money(totals.shipping, currency_symbol)
    ));
    output.push_str(&format!(
        "{}: {}\n",
        style("Total").bold(),
        style(format_money(totals.total, currency_symbol)).green().bold()
    ));

    output
}

/// Full cart view: the table and the summary, or the empty-cart message.
pub fn format_cart(snapshot: &CartSnapshot, currency_symbol: &str) -> String {
    if snapshot.items.is_empty() {
        return format!(
            "{}\n{}\n",
            style("Your cart is empty").yellow(),
            style("Start shopping from the home screen").dim()
        );
    }

    format!(
        "{}\n{}",
        format_cart_table(&snapshot.items, currency_symbol),
        format_totals(&snapshot.totals, currency_symbol)
    )
}

pub fn format_product_table(products: &[Product], currency_symbol: &str) -> String {
    if products.is_empty() {
        return String::new();
    }

    let rows: Vec<ProductTableRow> = products
        .iter()
        .map(|product| ProductTableRow {
            id: product.id.clone(),
            title: truncate(&product.title, 30),
            category: product.category.to_string(),
            price: format_money(product.price, currency_symbol),
            rating: format!("{:.1}", product.rating),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded()).with(Alignment::left());
    table.to_string()
}

pub fn format_product_detail(product: &Product, currency_symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}: {}\n", style("ID").bold(), style(&product.id).cyan()));
    output.push_str(&format!("{}: {}\n", style("Title").bold(), style(&product.title).green()));
    output.push_str(&format!(
        "{}: {}\n",
        style("Price").bold(),
        style(format_money(product.price, currency_symbol)).yellow()
    ));
    output.push_str(&format!("{}: {}\n", style("Category").bold(), product.category));
    output.push_str(&format!(
        "{}: {:.1} ({} reviews)\n",
        style("Rating").bold(),
        product.rating,
        product.review_count
    ));
    if !product.colors.is_empty() {
        output.push_str(&format!("{}: {}\n", style("Colors").bold(), product.colors.join(", ")));
    }
    output.push_str(&format!("{}: {}\n", style("Description").bold(), style(&product.description).dim()));

    output
}

pub fn format_screen(screen: &Screen) -> String {
    format!("{} {}", style(screen.title()).bold().cyan(), style(format!("({})", screen.path())).dim())
}

pub fn format_date(dt: &DateTime<Utc>) -> String {
    dt.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars - 3).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
