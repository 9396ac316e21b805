//! Import/export commands.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use uuid::Uuid;

use engine::{
    PrintableDocument,
    export::{json, sheet},
};

use crate::error::{AppError, Result};

use super::Context;

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum ExportFormat {
    /// The budget object, verbatim.
    #[default]
    Json,
    /// CSV rows matching the printed layout.
    Sheet,
    /// The assembled printable document, for a page renderer.
    Document,
}

pub async fn export(
    ctx: &Context,
    id: Option<Uuid>,
    format: ExportFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    let budget = match id {
        Some(id) => ctx
            .repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::Input(format!("no existe el proyecto {id}")))?,
        None => ctx.drafts.load_or_create(None),
    };
    let company = ctx.company.load();

    let payload = match format {
        ExportFormat::Json => json::export_budget(&budget)?,
        ExportFormat::Sheet => sheet::export_sheet(&budget, &company)?,
        ExportFormat::Document => {
            serde_json::to_string_pretty(&PrintableDocument::assemble(&budget, &company))
                .map_err(AppError::Json)?
        }
    };

    match output {
        Some(path) => {
            std::fs::write(&path, payload)?;
            println!("Exportado a {}.", path.display());
        }
        None => println!("{payload}"),
    }
    Ok(())
}

/// Loads an exported budget into the working draft.
///
/// A rejected payload surfaces as an error and leaves the draft alone.
pub fn import(ctx: &Context, path: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(path)?;
    let budget = json::import_budget(&raw)?;

    ctx.drafts.save(&budget)?;
    println!("Proyecto importado al borrador.");
    Ok(())
}
