use std::collections::BTreeMap;
use std::env;
use std::fs;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

use pos_cart::{CartEngine, CustomizeSession};
use pos_client::{submit_cart, HttpOrderClient, MemoryCounter, OrderApi};
use pos_menu::{load_layered, MenuCatalog};

/// One line of the order script. Group ids arrive as JSON object keys,
/// so they are strings here and parse on use.
#[derive(Debug, Deserialize)]
struct LineSpec {
    item: u64,
    #[serde(default = "default_quantity")]
    quantity: u32,
    #[serde(default)]
    choose: BTreeMap<String, u64>,
    #[serde(default)]
    add: BTreeMap<String, Vec<u64>>,
    #[serde(default)]
    special: bool,
}

fn default_quantity() -> u32 {
    1
}

/// Build a cart from the script, print the receipt preview, submit.
pub fn submit(
    paths: &[String],
    table: &str,
    token: Option<String>,
    script: &str,
    endpoint: Option<String>,
    paper: bool,
    note: Option<String>,
) -> Result<()> {
    let loaded = load_layered(paths)?;

    let raw = fs::read_to_string(script)
        .with_context(|| format!("failed to read order script: {script}"))?;
    let specs: Vec<LineSpec> =
        serde_json::from_str(&raw).context("order script has unexpected shape")?;

    let mut cart = build_cart(&loaded.catalog, &specs)?;
    if let Some(note) = note {
        cart.set_order_note(note);
    }

    print_preview(&cart);

    let token = token
        .or_else(|| env::var("POS_TABLE_TOKEN").ok())
        .unwrap_or_default();

    let receipt = if paper {
        let mut counter = MemoryCounter::new();
        run_submit(&mut cart, &mut counter, table, &token)?
    } else {
        let endpoint = endpoint
            .or_else(|| env::var("POS_ENDPOINT").ok())
            .ok_or_else(|| anyhow!("no endpoint: pass --endpoint or set POS_ENDPOINT"))?;
        let mut client = HttpOrderClient::new(endpoint);
        run_submit(&mut cart, &mut client, table, &token)?
    };

    println!("order accepted: id={}", receipt.id);
    if let Some(status) = receipt.status {
        println!("status: {status}");
    }
    Ok(())
}

fn build_cart(catalog: &MenuCatalog, specs: &[LineSpec]) -> Result<CartEngine> {
    let mut cart = CartEngine::new();
    for spec in specs {
        let item = catalog
            .get(spec.item)
            .ok_or_else(|| anyhow!("no such menu item: {}", spec.item))?;

        let mut session = CustomizeSession::open(item)?;
        for (group, option) in &spec.choose {
            let group: u64 = group
                .parse()
                .with_context(|| format!("bad group id in script: {group:?}"))?;
            session.choose(group, *option)?;
        }
        for (group, options) in &spec.add {
            let group: u64 = group
                .parse()
                .with_context(|| format!("bad group id in script: {group:?}"))?;
            for option in options {
                session.toggle(group, *option)?;
            }
        }
        if spec.special {
            session.set_special(true)?;
        }
        session.set_quantity(spec.quantity)?;
        cart.upsert_line(session.confirm()?);
    }
    Ok(cart)
}

fn print_preview(cart: &CartEngine) {
    for line in cart.lines() {
        let note = line.note.as_deref().unwrap_or("-");
        println!(
            "{:>3} x {}  @ {}  = {}  [{}]",
            line.quantity,
            line.name,
            line.unit_price,
            line.extended_price(),
            note
        );
    }
    if !cart.order_note().is_empty() {
        println!("order note: {}", cart.order_note());
    }
    println!("total: {}", cart.total());
}

fn run_submit(
    cart: &mut CartEngine,
    api: &mut dyn OrderApi,
    table: &str,
    token: &str,
) -> Result<pos_menu::OrderReceipt> {
    submit_cart(cart, api, table, token).map_err(Into::into)
}
