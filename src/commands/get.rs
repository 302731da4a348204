//! get and get-all commands

use super::{CommandContext, OperationSummary, Result};
use crate::{
    actions::{FilenamePattern, SaveItem},
    cli::SaveArgs,
    range::SelectionMask,
    store::StoreView,
};

/// Download the files selected by `range`
///
/// # Errors
///
/// Returns range, pattern, bounds and store errors. Files saved before a
/// store error stay saved and are reported in the printed summary.
pub fn get(
    store: &mut dyn StoreView,
    ctx: &CommandContext,
    range: &str,
    args: &SaveArgs,
) -> Result<OperationSummary> {
    let mask = ctx.selection(range)?;
    save_selection(store, ctx, &mask, args)
}

/// Download every file
///
/// # Errors
///
/// Same as [`get`].
pub fn get_all(
    store: &mut dyn StoreView,
    ctx: &CommandContext,
    args: &SaveArgs,
) -> Result<OperationSummary> {
    save_selection(store, ctx, &ctx.everything(), args)
}

fn save_selection(
    store: &mut dyn StoreView,
    ctx: &CommandContext,
    mask: &SelectionMask,
    args: &SaveArgs,
) -> Result<OperationSummary> {
    let pattern = FilenamePattern::parse(args.filename.as_deref().unwrap_or(&ctx.filename))?;
    let mut action = SaveItem::new(&args.dest, pattern, args.force || ctx.overwrite);
    let result = ctx.engine(store).apply_to_selection(&ctx.folder, &mut action, mask);

    let mut summary = OperationSummary::new();
    summary.success = action.saved.len();
    for path in &action.skipped {
        summary.add_skip(format!("{} exists", path.display()));
    }
    if let Err(e) = &result {
        summary.error = Some(e.to_string());
    }

    if ctx.quiet {
        for path in &action.saved {
            println!("{}", path.display());
        }
    } else if summary.success > 0 || summary.skipped > 0 || summary.error.is_some() {
        summary.print("Download");
    } else {
        println!("No files selected.");
    }
    result?;
    Ok(summary)
}
