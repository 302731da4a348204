//! ls, folders and count commands

use tracing::debug;

use super::{CommandContext, Result};
use crate::{
    actions::{CountItems, ListFiles, ListFolders, ListedItem},
    output,
    store::StoreView,
    traverse::{Order, TraversalEngine, TraversalOptions},
};

/// List files with their numbers
///
/// Always walks in store order so the printed numbers are the numbers range
/// expressions use, whatever `--reverse` says.
///
/// # Errors
///
/// Returns the first listing failure.
pub fn files(store: &mut dyn StoreView, ctx: &CommandContext) -> Result<Vec<ListedItem>> {
    let options = TraversalOptions {
        order: Order::Forward,
        ..ctx.options
    };
    let mut listing = ListFiles::new();
    TraversalEngine::new(store, options)
        .with_cancel(ctx.cancel.clone())
        .walk(&ctx.folder, &mut listing)?;

    let mut items = listing.items.iter();
    for (folder, count) in &listing.folders {
        if !ctx.quiet && (*count > 0 || folder == &ctx.folder) {
            println!("{}", output::folder_header(folder, *count));
        }
        for item in items.by_ref().take(*count) {
            println!("{}", output::item_line(item, ctx.quiet));
        }
    }
    debug!(total = listing.items.len(), "listed files");
    Ok(listing.items)
}

/// List the subfolders of every visited folder
///
/// # Errors
///
/// Returns the first listing failure.
pub fn folders(store: &mut dyn StoreView, ctx: &CommandContext) -> Result<usize> {
    let mut listing = ListFolders::new();
    ctx.engine(store).walk(&ctx.folder, &mut listing)?;

    let mut total = 0;
    for (folder, names) in &listing.folders {
        if !ctx.quiet && (!names.is_empty() || folder == &ctx.folder) {
            println!("{}", output::subfolder_header(folder, names.len()));
        }
        for name in names {
            println!("{}", output::subfolder_line(folder, name, ctx.quiet));
        }
        total += names.len();
    }
    Ok(total)
}

/// Count files
///
/// # Errors
///
/// Returns the first listing failure.
pub fn count(store: &mut dyn StoreView, ctx: &CommandContext) -> Result<usize> {
    let mut counter = CountItems::new();
    let summary = ctx.engine(store).walk(&ctx.folder, &mut counter)?;

    if ctx.quiet {
        println!("{}", counter.total);
    } else {
        println!(
            "{} file(s) in {} folder(s) under {}",
            output::colorize_count(counter.total),
            summary.visited_folders,
            ctx.scope()
        );
    }
    Ok(counter.total)
}
