//! Line-item commands over the working draft.
//!
//! Quantities and prices arrive as raw text and go through the engine's
//! lenient parsers, so `"12,5"` and `"12.5"` both work.

use clap::Args;
use uuid::Uuid;

use engine::{ItemDraft, ItemPatch, numbers};

use crate::error::Result;

use super::Context;

#[derive(Debug, Args)]
pub struct ItemAdd {
    /// Trade group; defaults to the first master-data group.
    #[arg(long)]
    pub group: Option<String>,
    #[arg(long, default_value = "")]
    pub category: String,
    #[arg(long)]
    pub description: String,
    #[arg(long, default_value = "1")]
    pub quantity: String,
    #[arg(long, default_value = "0")]
    pub unit_price: String,
    /// Cost price, used for the margin display only.
    #[arg(long)]
    pub cost_price: Option<String>,
}

#[derive(Debug, Args)]
pub struct ItemUpdate {
    pub id: Uuid,
    #[arg(long)]
    pub group: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub quantity: Option<String>,
    #[arg(long)]
    pub unit_price: Option<String>,
    /// An empty string clears the cost price.
    #[arg(long)]
    pub cost_price: Option<String>,
}

pub fn add(ctx: &Context, args: ItemAdd) -> Result<()> {
    let mut budget = ctx.drafts.load_or_create(None);

    let group = args.group.unwrap_or_else(|| {
        let master = ctx.master.load();
        master
            .groups
            .first()
            .map(|group| group.name.clone())
            .unwrap_or_default()
    });

    let id = budget.add_item(ItemDraft {
        group,
        category: args.category,
        description: args.description,
        quantity: numbers::parse_amount(&args.quantity),
        unit_price: numbers::parse_amount(&args.unit_price),
        cost_price: args
            .cost_price
            .as_deref()
            .map(numbers::parse_amount),
    });

    ctx.drafts.save(&budget)?;
    println!("Partida {id} añadida.");
    Ok(())
}

pub fn update(ctx: &Context, args: ItemUpdate) -> Result<()> {
    let mut budget = ctx.drafts.load_or_create(None);

    let patch = ItemPatch {
        group: args.group,
        category: args.category,
        description: args.description,
        quantity: args.quantity.as_deref().map(numbers::parse_amount),
        unit_price: args.unit_price.as_deref().map(numbers::parse_amount),
        cost_price: args.cost_price.as_deref().map(|raw| {
            if raw.is_empty() {
                None
            } else {
                Some(numbers::parse_amount(raw))
            }
        }),
    };

    // An unknown id is not an error, but the user gets a notice.
    if budget.update_item(args.id, patch) {
        ctx.drafts.save(&budget)?;
        println!("Partida actualizada.");
    } else {
        println!("No existe esa partida en el borrador.");
    }
    Ok(())
}

pub fn remove(ctx: &Context, id: Uuid) -> Result<()> {
    let mut budget = ctx.drafts.load_or_create(None);

    if budget.remove_item(id) {
        ctx.drafts.save(&budget)?;
        println!("Partida eliminada.");
    } else {
        println!("No existe esa partida en el borrador.");
    }
    Ok(())
}
