use anyhow::Result;
use pos_menu::{load_layered, SelectionType};

/// Load the layered catalog and print an operator summary.
///
/// A required group with zero options is called out loudly: validation
/// would reject every customization of that item, so it can never be
/// ordered.
pub fn check(paths: &[String]) -> Result<()> {
    let loaded = load_layered(paths)?;

    println!("items: {}", loaded.catalog.len());
    for item in loaded.catalog.items() {
        let availability = if item.is_available { "" } else { "  [unavailable]" };
        println!(
            "  {:>5}  {}  base {:.2}{}",
            item.id, item.name, item.base_price, availability
        );
        for group in &item.groups {
            let kind = match group.selection_type {
                SelectionType::Single => "single",
                SelectionType::Multiple => "multiple",
            };
            let required = if group.is_required { ", required" } else { "" };
            println!(
                "         group {:>5}  {} ({kind}{required}, {} options)",
                group.id,
                group.name,
                group.options.len()
            );
            if group.is_required && group.options.is_empty() {
                println!(
                    "         !! required group {} has no options — item {} can never be ordered",
                    group.id, item.id
                );
            }
        }
        if let Some(special) = &item.special {
            println!("         special: {} (+{:.2})", special.label, special.price_delta);
        }
    }

    println!("catalog_hash: {}", loaded.catalog_hash);
    Ok(())
}
