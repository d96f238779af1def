//! `quote` command: build a cart from one store and price it.

use std::io::Write;

use lastbite_core::{DeliveryMethod, ProductId, StoreId};
use lastbite_storefront::StorefrontConfig;
use lastbite_storefront::filters::format_price;
use lastbite_storefront::models::Catalog;
use lastbite_storefront::screens::{BrowseScreen, CartScreen};
use lastbite_storefront::services::OrderSummary;

use super::CliError;

/// Parse an `--item` argument: `ID` (one unit) or `ID=QUANTITY`.
///
/// # Errors
///
/// Returns a message when the ID is empty or the quantity is not an integer.
pub fn parse_item(s: &str) -> Result<(ProductId, i64), String> {
    let (id, quantity) = match s.split_once('=') {
        Some((id, raw)) => {
            let quantity = raw
                .trim()
                .parse::<i64>()
                .map_err(|_| format!("invalid quantity '{raw}' in '{s}'"))?;
            (id, quantity)
        }
        None => (s, 1),
    };

    let id = id.trim();
    if id.is_empty() {
        return Err(format!("missing product ID in '{s}'"));
    }
    Ok((ProductId::new(id), quantity))
}

/// Everything needed to price one order.
pub struct QuoteRequest {
    pub store: StoreId,
    /// Product and quantity pairs. Repeated IDs accumulate.
    pub items: Vec<(ProductId, i64)>,
    pub method: String,
    pub address: Option<String>,
    /// Run the final checkout validation instead of only pricing.
    pub confirm: bool,
}

/// Walk the browse, cart, and checkout screens and print the order summary.
///
/// # Errors
///
/// Returns an error for an unknown store or product, an empty cart, an
/// invalid delivery method, a missing address on confirm, or a write failure.
pub fn quote(
    out: &mut impl Write,
    catalog: &Catalog,
    config: &StorefrontConfig,
    request: &QuoteRequest,
) -> Result<(), CliError> {
    let mut browse = BrowseScreen::new(catalog);
    browse.select_store(&request.store)?;
    for (id, quantity) in &request.items {
        let current = i64::from(browse.quantity(id));
        browse.set_quantity(id, current.saturating_add(*quantity))?;
    }

    let cart = CartScreen::new(browse.open_cart()?, config.currency);
    let mut checkout = cart.proceed_to_checkout(config.delivery_pricing())?;
    checkout.set_method_str(&request.method)?;
    if let Some(address) = &request.address {
        checkout.set_address(address.as_str());
    }

    let summary = if request.confirm {
        checkout.confirm()?
    } else {
        checkout.summary()
    };

    writeln!(out, "{}", cart.store_name())?;
    for line in checkout.lines() {
        writeln!(
            out,
            "  {} x{}  {}",
            line.product.name,
            line.quantity,
            format_price(line.line_total(), config.currency),
        )?;
    }
    write_summary(out, &summary)?;

    writeln!(out, "取貨方式  {}", summary.method.label())?;
    if let Some(address) = checkout.address() {
        writeln!(out, "地址  {address}")?;
    }
    if summary.method == DeliveryMethod::Delivery
        && let Some(remaining) = config
            .delivery_pricing()
            .remaining_for_free_delivery(summary.subtotal)
    {
        writeln!(out, "再買 {} 即可免運", format_price(remaining, config.currency))?;
    }
    if request.confirm {
        writeln!(out, "訂單已確認")?;
    }

    Ok(())
}

fn write_summary(out: &mut impl Write, summary: &OrderSummary) -> std::io::Result<()> {
    writeln!(out, "小計  {}", summary.subtotal_price())?;
    writeln!(out, "節省  {}", summary.savings_price())?;
    if summary.shows_delivery_fee() {
        writeln!(out, "外送費  {}", summary.delivery_fee_price())?;
    }
    writeln!(out, "總計  {}", summary.total_price())
}
