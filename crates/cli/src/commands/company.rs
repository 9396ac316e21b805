//! Company-configuration commands.

use std::path::Path;

use crate::{
    data,
    error::{AppError, Result},
};

use super::Context;

pub fn show(ctx: &Context) -> Result<()> {
    let config = ctx.company.load();
    println!("{}  CIF: {}", config.name, config.tax_id);
    println!("{}", config.address);
    println!("Tel: {}  {}", config.phone, config.email);
    println!(
        "Logo: {}  Sello: {}",
        if config.logo_url.is_some() {
            "configurado"
        } else {
            "no configurado"
        },
        if config.seal_url.is_some() {
            "configurado"
        } else {
            "no configurado"
        },
    );
    println!("--- Forma de pago ---\n{}", config.payment_terms);
    println!("--- Notas por defecto ---\n{}", config.default_notes);
    Ok(())
}

pub fn set(ctx: &Context, field: &str, value: String) -> Result<()> {
    let mut config = ctx.company.load();
    match field {
        "name" => config.name = value,
        "address" => config.address = value,
        "phone" => config.phone = engine::client::format_phone(&value),
        "email" => config.email = value,
        "tax_id" | "cif" => config.tax_id = engine::client::format_tax_id(&value),
        "default_notes" => config.default_notes = value,
        "payment_terms" => config.payment_terms = value,
        other => {
            return Err(AppError::Input(format!("campo desconocido: {other}")));
        }
    }
    ctx.company.save(&config)?;
    Ok(())
}

pub fn logo(ctx: &Context, path: &Path) -> Result<()> {
    let mut config = ctx.company.load();
    config.logo_url = Some(data::image_data_url(path)?);
    ctx.company.save(&config)?;
    println!("Logo actualizado.");
    Ok(())
}

pub fn seal(ctx: &Context, path: &Path) -> Result<()> {
    let mut config = ctx.company.load();
    config.seal_url = Some(data::image_data_url(path)?);
    ctx.company.save(&config)?;
    println!("Sello actualizado.");
    Ok(())
}
