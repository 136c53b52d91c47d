use anyhow::{anyhow, Result};
use pos_cart::CustomizeSession;
use pos_menu::load_layered;

use super::parse_pair;

/// Run one customization session headlessly and print what the cart
/// would carry: canonical key, unit price, line note, extended price.
pub fn run(
    paths: &[String],
    item_id: u64,
    choose: &[String],
    add: &[String],
    special: bool,
    qty: u32,
) -> Result<()> {
    let loaded = load_layered(paths)?;
    let item = loaded
        .catalog
        .get(item_id)
        .ok_or_else(|| anyhow!("no such menu item: {item_id}"))?;

    let mut session = CustomizeSession::open(item)?;
    for raw in choose {
        let (group, option) = parse_pair(raw)?;
        session.choose(group, option)?;
    }
    for raw in add {
        let (group, option) = parse_pair(raw)?;
        session.toggle(group, option)?;
    }
    if special {
        session.set_special(true)?;
    }
    session.set_quantity(qty)?;

    // confirm() runs the same validation the customer-facing flow does.
    let line = session.confirm()?;

    println!("key:        {}", line.key);
    println!("unit price: {}", line.unit_price);
    println!("quantity:   {}", line.quantity);
    println!("extended:   {}", line.extended_price());
    match &line.note {
        Some(note) => println!("note:       {note}"),
        None => println!("note:       (none)"),
    }
    Ok(())
}
