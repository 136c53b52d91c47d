pub mod catalog;
pub mod order;
pub mod quote;

use anyhow::{bail, Context, Result};

/// Parse a `GROUP=OPTION` argument into numeric ids.
pub(crate) fn parse_pair(raw: &str) -> Result<(u64, u64)> {
    let Some((group, option)) = raw.split_once('=') else {
        bail!("expected GROUP=OPTION, got {raw:?}");
    };
    let group = group
        .trim()
        .parse::<u64>()
        .with_context(|| format!("bad group id in {raw:?}"))?;
    let option = option
        .trim()
        .parse::<u64>()
        .with_context(|| format!("bad option id in {raw:?}"))?;
    Ok((group, option))
}
