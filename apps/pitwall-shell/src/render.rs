//! # Rendering
//!
//! Draws an [`AppState`] snapshot as a text frame or a JSON line.
//!
//! ## Frame Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  F1 STREETWEAR                          [account]  [cart 3]   rev 7    │
//! │  search: "racing"              (header; search only on category page)  │
//! │  ─────────────────────────────────────────────────────────────────────  │
//! │  page body: home | category | product | cart | auth | checkout         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rendering never mutates state. [`attach`] subscribes a renderer to the
//! store so that every applied operation writes exactly one frame.

use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

use pitwall_core::{AppState, AuthField, AuthStep, CartTotals, PageId, StateStore, Subscription};
use serde::Serialize;
use tracing::warn;

use crate::config::ShellConfig;
use crate::error::ShellResult;

/// Output sink shared by the input loop and the store subscription.
pub type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

const RULE: &str = "------------------------------------------------------------";

/// JSON frame: the full snapshot plus derived cart totals.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<u64>,
    pub totals: CartTotals,
    pub state: &'a AppState,
}

/// Renders in the configured format.
pub fn render(state: &AppState, config: &ShellConfig, revision: u64) -> ShellResult<String> {
    let revision = config.show_revision.then_some(revision);
    if config.render_json {
        render_json(state, revision)
    } else {
        Ok(render_text(state, config, revision))
    }
}

pub fn render_json(state: &AppState, revision: Option<u64>) -> ShellResult<String> {
    let snapshot = Snapshot {
        revision,
        totals: state.cart_totals(),
        state,
    };
    Ok(serde_json::to_string(&snapshot)?)
}

pub fn render_text(state: &AppState, config: &ShellConfig, revision: Option<u64>) -> String {
    let mut out = String::new();
    header(&mut out, state, config, revision);

    match state.current_page {
        PageId::Home => home_page(&mut out, state),
        PageId::Category => category_page(&mut out, state, config),
        PageId::Product => product_page(&mut out, state, config),
        PageId::Cart => cart_page(&mut out, state, config),
        PageId::Auth => auth_page(&mut out, state),
        PageId::Checkout => checkout_page(&mut out, state, config),
    }

    out
}

fn header(out: &mut String, state: &AppState, config: &ShellConfig, revision: Option<u64>) {
    // Badge only when the cart has lines.
    let badge = if state.cart.is_empty() {
        "[cart]".to_string()
    } else {
        format!("[cart {}]", state.cart_item_count())
    };

    let mut line = format!("{}    [account]  {}", config.store_name, badge);
    if let Some(revision) = revision {
        line.push_str(&format!("    rev {}", revision));
    }
    push_line(out, &line);

    if state.current_page == PageId::Category {
        push_line(out, &format!("search: \"{}\"", state.search_query));
    }
    push_line(out, RULE);
}

fn home_page(out: &mut String, state: &AppState) {
    push_line(out, "F1 STREETWEAR");
    push_line(out, "Race-Inspired Fashion");
    push_line(out, "  > SHOP NOW  (go products)");
    push_line(out, "");
    push_line(out, "Shop by Category");
    for category in &state.categories {
        push_line(
            out,
            &format!(
                "  {:<12} {:<20} {} products",
                category.id,
                category.name,
                category.products.len()
            ),
        );
    }
}

fn category_page(out: &mut String, state: &AppState, config: &ShellConfig) {
    let Some(category) = state.current_category() else {
        push_line(out, "No categories available.");
        return;
    };

    push_line(out, &category.name);
    let products = state.visible_products();
    if products.is_empty() {
        push_line(out, "No products found matching your search.");
        return;
    }

    for product in products {
        push_line(
            out,
            &format!(
                "  {:<10} {:<24} {:>10}",
                product.id,
                product.name,
                config.format_currency(product.price)
            ),
        );
    }
}

fn product_page(out: &mut String, state: &AppState, config: &ShellConfig) {
    let Some(product) = &state.current_product else {
        push_line(out, "No product selected. Pick one from a category page (view <product-id>).");
        return;
    };

    push_line(out, &product.name);
    push_line(out, &config.format_currency(product.price));
    push_line(out, &format!("image: {}", product.image));
    push_line(out, &format!("  > ADD TO CART  (add {})", product.id));
}

fn cart_page(out: &mut String, state: &AppState, config: &ShellConfig) {
    push_line(out, "Your Cart");
    if state.cart.is_empty() {
        push_line(out, "Your cart is empty");
        return;
    }

    for item in state.cart.items() {
        push_line(
            out,
            &format!(
                "  {:<10} {:<24} {:>10}   [-] {} [+]   {:>10}",
                item.id(),
                item.product.name,
                config.format_currency(item.product.price),
                item.quantity,
                config.format_currency(item.line_total())
            ),
        );
    }

    push_line(out, "");
    push_line(
        out,
        &format!("Subtotal: {}", config.format_currency(state.compute_subtotal())),
    );
    push_line(out, "  > PROCEED TO CHECKOUT  (checkout)");
}

fn auth_page(out: &mut String, state: &AppState) {
    let auth = &state.auth;
    push_line(out, auth.step.title());

    if auth.step == AuthStep::Otp {
        push_line(out, &format!("We sent a code to {}", auth.email));
    }

    for &field in auth.step.editable_fields() {
        let shown = match field {
            AuthField::NewPassword => "*".repeat(auth.field(field).chars().count()),
            _ => auth.field(field).to_string(),
        };
        push_line(out, &format!("  {}: {}", field, shown));
    }

    for trigger in auth.step.available_triggers() {
        push_line(out, &format!("  > {}  (auth {})", trigger.label(), trigger));
    }
}

fn checkout_page(out: &mut String, state: &AppState, config: &ShellConfig) {
    push_line(out, "Checkout");
    let totals = state.cart_totals();
    push_line(
        out,
        &format!(
            "{} items, subtotal {}",
            totals.item_count,
            config.format_currency(totals.subtotal)
        ),
    );
    push_line(out, "Payment is not available in this preview.");
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

/// Writes `text` to the shared writer.
pub fn write_out(writer: &SharedWriter, text: &str) -> ShellResult<()> {
    let mut writer = writer.lock().unwrap_or_else(PoisonError::into_inner);
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Subscribes a renderer that writes one frame per applied operation.
///
/// Write failures inside the listener are logged and dropped.
pub fn attach(store: &StateStore, config: ShellConfig, writer: SharedWriter) -> Subscription {
    let mut revision = store.revision();
    store.subscribe(move |state| {
        revision += 1;
        let frame = match render(state, &config, revision) {
            Ok(frame) => frame,
            Err(err) => {
                warn!(error = %err, "failed to render frame");
                return;
            }
        };

        let frame = if config.render_json { frame + "\n" } else { frame };
        if let Err(err) = write_out(&writer, &frame) {
            warn!(error = %err, "failed to write frame");
        }
    })
}
