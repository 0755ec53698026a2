//! # Commands
//!
//! The three subcommands of the `market` binary. Each writes its result to
//! the supplied writer (stdout in production) and logs through `tracing`.

use std::io::Write;

use serde::Serialize;
use tracing::{info, warn};

use market_core::{
    Catalog, Client, ClientId, ItemId, MarketService, OrderId, OrderSummary, PromoCode,
};

use crate::error::CliResult;

/// Prints the catalog as an aligned table.
pub fn list_catalog<W: Write>(catalog: &Catalog, out: &mut W) -> CliResult<()> {
    writeln!(
        out,
        "{:>4}  {:<28} {:<12} {:>12} {:>6}",
        "ID", "NAME", "CATEGORY", "PRICE", "STOCK"
    )?;

    for (item, stock) in catalog.iter() {
        writeln!(
            out,
            "{:>4}  {:<28} {:<12} {:>12.2} {:>6}",
            item.id(),
            item.name(),
            item.category(),
            item.price(),
            stock
        )?;
    }

    Ok(())
}

/// Prints the promo code table.
pub fn list_promos<W: Write>(out: &mut W) -> CliResult<()> {
    writeln!(out, "{:<16} {:>8}", "CODE", "DISCOUNT")?;

    for code in PromoCode::ALL {
        writeln!(out, "{:<16} {:>7.0}%", code.code(), code.rate().percentage())?;
    }

    Ok(())
}

/// Everything needed to run one scripted order.
#[derive(Debug, Clone)]
pub struct OrderSession {
    pub client_id: ClientId,
    pub client_name: String,
    pub items: Vec<ItemId>,
    pub promos: Vec<PromoCode>,
}

/// JSON printed by `market order`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionReport<'a> {
    order: OrderSummary,
    rejected_items: &'a [RejectedItem],
}

/// An item id that could not be added, and why.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RejectedItem {
    item_id: ItemId,
    reason: String,
}

/// Creates an order, adds the items, applies the promos, and prints the
/// resulting order as JSON.
///
/// An item that cannot be added (unknown id, no stock left) is logged and
/// listed under `rejectedItems`; the session carries on with the rest.
pub fn run_order<W: Write>(
    service: &mut MarketService,
    session: OrderSession,
    out: &mut W,
) -> CliResult<OrderId> {
    let client = Client::new(session.client_id, session.client_name);
    let order_id = service.create_order_for(client);

    let mut rejected = Vec::new();
    for item_id in session.items {
        match service.add_item_to_order(item_id, order_id) {
            Ok(()) => {}
            Err(err) if err.is_not_found() => {
                warn!(order_id, item_id, error = %err, "Item rejected");
                rejected.push(RejectedItem {
                    item_id,
                    reason: err.to_string(),
                });
            }
            Err(err) => return Err(err.into()),
        }
    }

    for promo in session.promos {
        let total = service.apply_discount_for_order(order_id, promo)?;
        info!(order_id, promo = %promo, total, "Promo code processed");
    }

    let report = SessionReport {
        order: service.order_info(order_id)?.summary(),
        rejected_items: &rejected,
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;

    Ok(order_id)
}
