//! rm and rm-all commands

use tracing::info;

use super::{CommandContext, OperationSummary, Result, confirm};
use crate::{
    actions::{DeleteAllItems, DeleteItem},
    store::StoreView,
};

/// Delete the files selected by `range`
///
/// Asks first unless `yes` or quiet mode is set. A declined prompt returns
/// an empty summary.
///
/// # Errors
///
/// Returns range, bounds and store errors. Files deleted before a store
/// error stay deleted and are reported in the printed summary.
pub fn rm(
    store: &mut dyn StoreView,
    ctx: &CommandContext,
    range: &str,
    yes: bool,
) -> Result<OperationSummary> {
    let mask = ctx.selection(range)?;
    let prompt = format!("Delete files {mask} in {}?", ctx.scope());
    if !confirm(&prompt, yes || ctx.quiet)? {
        println!("Operation cancelled.");
        return Ok(OperationSummary::new());
    }

    let mut action = DeleteItem::new(ctx.retry);
    let result = ctx.engine(store).apply_to_selection(&ctx.folder, &mut action, &mask);

    let mut summary = OperationSummary::new();
    summary.success = action.deleted.len();
    for location in &action.protected {
        summary.add_skip(format!("{location} is read-only"));
    }
    if let Err(e) = &result {
        summary.error = Some(e.to_string());
    }

    if ctx.quiet {
        for location in &action.deleted {
            println!("{location}");
        }
    } else {
        summary.print("Delete");
    }
    result?;
    Ok(summary)
}

/// Delete every file in each visited folder
///
/// # Errors
///
/// Returns the first listing or store failure.
pub fn rm_all(store: &mut dyn StoreView, ctx: &CommandContext, yes: bool) -> Result<OperationSummary> {
    let prompt = format!("Delete all files in {}?", ctx.scope());
    if !confirm(&prompt, yes || ctx.quiet)? {
        println!("Operation cancelled.");
        return Ok(OperationSummary::new());
    }

    let mut action = DeleteAllItems::new();
    let result = ctx.engine(store).walk(&ctx.folder, &mut action);

    let mut summary = OperationSummary::new();
    summary.success = action.cleared.len();
    for folder in &action.partial {
        summary.add_skip(format!("{folder}: protected files left in place"));
    }
    if let Err(e) = &result {
        summary.error = Some(e.to_string());
    }
    info!(cleared = summary.success, "delete-all finished");

    if ctx.quiet {
        for folder in &action.cleared {
            println!("{folder}");
        }
    } else {
        summary.print("Delete All (folders)");
    }
    result?;
    Ok(summary)
}
