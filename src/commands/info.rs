//! info command

use super::{CommandContext, Result};
use crate::{
    actions::{DescribeItem, Description},
    store::StoreView,
};

/// Print metadata of the files selected by `range`
///
/// # Errors
///
/// Returns range, bounds and store errors.
pub fn info(store: &mut dyn StoreView, ctx: &CommandContext, range: &str) -> Result<Vec<Description>> {
    let mask = ctx.selection(range)?;
    let mut action = DescribeItem::new();
    ctx.engine(store).apply_to_selection(&ctx.folder, &mut action, &mask)?;

    for description in &action.descriptions {
        if ctx.quiet {
            println!("{}\t{}", description.location, description.info.size);
        } else {
            println!("{description}");
        }
    }
    Ok(action.descriptions)
}
