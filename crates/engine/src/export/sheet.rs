//! Spreadsheet export: company block, client block, one row per line
//! item, totals footer. Monetary cells carry 2 decimals.

use csv::WriterBuilder;

use crate::{
    EngineError,
    budget::Budget,
    company::CompanyConfig,
    numbers::{format_money, format_quantity},
};

/// Renders the budget as CSV rows matching the printed layout.
pub fn export_sheet(budget: &Budget, company: &CompanyConfig) -> Result<String, EngineError> {
    let mut writer = WriterBuilder::new().flexible(true).from_writer(Vec::new());

    let number = if budget.number.is_empty() {
        "---"
    } else {
        budget.number.as_str()
    };
    let number_cell = format!("Nº: {number}");
    let phone_cell = format!("Tel: {}", company.phone);
    let date_cell = format!("Fecha: {}", budget.date.format("%d/%m/%Y"));

    writer.write_record(["LOGO", company.name.as_str(), "", "", "PRESUPUESTO"])?;
    writer.write_record(["", company.address.as_str(), "", "", number_cell.as_str()])?;
    writer.write_record(["", phone_cell.as_str(), "", "", date_cell.as_str()])?;
    writer.write_record(["", company.email.as_str(), "", "", ""])?;
    writer.write_record([""])?;

    writer.write_record(["DATOS DEL CLIENTE"])?;
    writer.write_record([
        "Nombre:",
        budget.client.name.as_str(),
        "",
        "NIF:",
        budget.client.tax_id.as_str(),
    ])?;
    writer.write_record(["Dirección:", budget.client.address.as_str()])?;
    writer.write_record([
        "Teléfono:",
        budget.client.phone.as_str(),
        "",
        "Email:",
        budget.client.email.as_str(),
    ])?;
    writer.write_record([""])?;

    writer.write_record(["PARTIDAS PRESUPUESTARIAS"])?;
    writer.write_record([
        "Grupo",
        "Categoría",
        "Descripción",
        "Cantidad",
        "Precio",
        "Importe",
    ])?;

    for item in &budget.items {
        let quantity = format_quantity(item.quantity);
        let unit_price = format_money(item.unit_price);
        let amount = format_money(item.amount);
        writer.write_record([
            item.group.as_str(),
            item.category.as_str(),
            item.description.as_str(),
            quantity.as_str(),
            unit_price.as_str(),
            amount.as_str(),
        ])?;
    }

    let subtotal = format_money(budget.subtotal);
    let tax_label = format!("IVA ({:.0}%):", budget.tax_rate * 100.0);
    let tax_amount = format_money(budget.tax_amount);
    let total = format_money(budget.total);

    writer.write_record([""])?;
    writer.write_record(["", "", "", "", "Base Imponible:", subtotal.as_str()])?;
    writer.write_record(["", "", "", "", tax_label.as_str(), tax_amount.as_str()])?;
    writer.write_record(["", "", "", "", "TOTAL:", total.as_str()])?;

    let bytes = writer
        .into_inner()
        .map_err(|err| EngineError::Export(err.to_string()))?;
    String::from_utf8(bytes).map_err(|err| EngineError::Export(err.to_string()))
}
