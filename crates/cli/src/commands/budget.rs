//! Budget-level commands: list, show, save, delete, discard, set.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use api_types::budget::BudgetSummary;
use engine::{Budget, ClientField, numbers};

use crate::{
    error::{AppError, Result},
    lookup,
};

use super::Context;

pub async fn list(ctx: &Context) -> Result<()> {
    let budgets = ctx.repository.get_all().await?;
    if budgets.is_empty() {
        println!("No hay proyectos guardados.");
        return Ok(());
    }

    for budget in &budgets {
        let summary = summarize(budget);
        let number = if summary.number.is_empty() {
            "borrador"
        } else {
            summary.number.as_str()
        };
        let client = if summary.client_name.is_empty() {
            "Sin cliente"
        } else {
            summary.client_name.as_str()
        };
        println!(
            "{}  {:<10}  {:<24}  {:>12} €  [{}]",
            summary.id,
            number,
            client,
            numbers::format_money(summary.total),
            summary.status,
        );
    }
    Ok(())
}

pub async fn show(ctx: &Context, id: Option<Uuid>) -> Result<()> {
    let budget = resolve(ctx, id).await?;
    let master = ctx.master.load();

    let number = if budget.number.is_empty() {
        "---"
    } else {
        budget.number.as_str()
    };
    println!("Proyecto {}  ({})", number, budget.date.format("%d/%m/%Y"));
    println!("Cliente: {}  NIF: {}", budget.client.name, budget.client.tax_id);
    if let Some(postal_code) = &budget.client.postal_code {
        println!(
            "Dirección: {}, {} {}",
            budget.client.address,
            postal_code,
            budget.client.city.as_deref().unwrap_or(""),
        );
    } else if !budget.client.address.is_empty() {
        println!("Dirección: {}", budget.client.address);
    }
    println!();

    for group in budget.display_groups(&master) {
        let items: Vec<_> = budget.items_in_group(&group).collect();
        if items.is_empty() {
            continue;
        }
        println!("{group}");
        for item in items {
            println!(
                "  {}  {} | {} x {} = {} €",
                item.id,
                item.description,
                numbers::format_quantity(item.quantity),
                numbers::format_money(item.unit_price),
                numbers::format_money(item.amount),
            );
        }
    }

    println!();
    println!("Base Imponible: {} €", numbers::format_money(budget.subtotal));
    println!(
        "IVA ({:.0}%): {} €",
        budget.tax_rate * 100.0,
        numbers::format_money(budget.tax_amount),
    );
    println!("TOTAL PROYECTO: {} €", numbers::format_money(budget.total));
    println!("Estado: {}", budget.status);
    Ok(())
}

/// Pushes the working draft to the repository. The draft slot stays in
/// place so editing can continue.
pub async fn save(ctx: &Context) -> Result<()> {
    let budget = ctx.drafts.load_or_create(None);
    ctx.repository.save(&budget).await?;
    println!("Proyecto guardado correctamente.");
    Ok(())
}

pub async fn delete(ctx: &Context, id: Uuid, yes: bool) -> Result<()> {
    if !yes {
        return Err(AppError::Input(
            "la eliminación es definitiva; repite el comando con --yes".to_string(),
        ));
    }

    if ctx.repository.delete(id).await? {
        println!("Proyecto eliminado.");
    } else {
        println!("El proyecto no estaba en la copia local.");
    }
    Ok(())
}

/// Discards the working draft. The next command starts from a fresh
/// budget; nothing stale is re-persisted.
pub fn discard(ctx: &Context, yes: bool) -> Result<()> {
    if !yes {
        return Err(AppError::Input(
            "se perderá el borrador actual; repite el comando con --yes".to_string(),
        ));
    }

    ctx.drafts.clear()?;
    println!("Borrador descartado.");
    Ok(())
}

/// Sets one field of the working draft.
///
/// `client.*` fields go through the snapshot; setting a 5-digit postal
/// code also asks the zip service for the city.
pub async fn set_field(ctx: &Context, field: &str, value: String) -> Result<()> {
    let mut budget = ctx.drafts.load_or_create(None);

    if let Some(client_field) = field.strip_prefix("client.") {
        let client_field: ClientField = client_field.parse()?;
        let value = match client_field {
            ClientField::Phone => engine::client::format_phone(&value),
            ClientField::TaxId => engine::client::format_tax_id(&value),
            _ => value,
        };
        budget.client.set(client_field, value.clone());

        if client_field == ClientField::PostalCode
            && let Some(city) = lookup::city_for_postal_code(&ctx.http, &value).await
        {
            budget.client.set(ClientField::City, city);
        }
    } else {
        match field {
            "number" => budget.number = value,
            "date" => budget.date = parse_date(&value)?,
            "tax_rate" | "iva" => budget.set_tax_rate(parse_rate(&value)),
            "notes" => budget.notes = value,
            "status" => budget.status = value.parse()?,
            "signature" => budget.client_signature = (!value.is_empty()).then_some(value),
            other => {
                return Err(AppError::Input(format!("campo desconocido: {other}")));
            }
        }
    }

    ctx.drafts.save(&budget)?;
    Ok(())
}

async fn resolve(ctx: &Context, id: Option<Uuid>) -> Result<Budget> {
    match id {
        Some(id) => ctx
            .repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::Input(format!("no existe el proyecto {id}"))),
        None => Ok(ctx.drafts.load_or_create(None)),
    }
}

fn summarize(budget: &Budget) -> BudgetSummary {
    BudgetSummary {
        id: budget.id,
        number: budget.number.clone(),
        client_name: budget.client.name.clone(),
        date: budget.date,
        total: budget.total,
        status: budget.status.to_string(),
    }
}

fn parse_date(value: &str) -> Result<DateTime<Utc>> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc());
    }
    DateTime::parse_from_rfc3339(value)
        .map(|date| date.with_timezone(&Utc))
        .map_err(|err| AppError::Input(format!("fecha no válida: {err}")))
}

/// Accepts `0.21`, `21%` or plain `21` as a tax rate.
fn parse_rate(value: &str) -> f64 {
    let rate = numbers::parse_decimal(value.trim_end_matches('%').trim());
    if value.contains('%') || rate > 1.0 {
        rate / 100.0
    } else {
        rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_parsing_accepts_percent_and_fraction() {
        assert_eq!(parse_rate("0.21"), 0.21);
        assert_eq!(parse_rate("21%"), 0.21);
        assert_eq!(parse_rate("21"), 0.21);
        assert_eq!(parse_rate("0"), 0.0);
    }

    #[test]
    fn date_parsing_accepts_plain_dates() {
        let date = parse_date("2026-03-15").unwrap();
        assert_eq!(date.format("%d/%m/%Y").to_string(), "15/03/2026");
        assert!(parse_date("next tuesday").is_err());
    }
}
