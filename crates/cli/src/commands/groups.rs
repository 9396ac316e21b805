//! Trade group / category master-data commands.

use crate::error::Result;

use super::Context;

pub fn list(ctx: &Context) -> Result<()> {
    let master = ctx.master.load();
    for group in &master.groups {
        println!("{}", group.name);
        for category in &group.categories {
            println!("  - {category}");
        }
    }
    Ok(())
}

pub fn add(ctx: &Context, name: &str) -> Result<()> {
    let mut master = ctx.master.load();
    master.add_group(name);
    ctx.master.save(&master)?;
    Ok(())
}

pub fn remove(ctx: &Context, name: &str) -> Result<()> {
    let mut master = ctx.master.load();
    if master.remove_group(name) {
        ctx.master.save(&master)?;
        println!("Grupo eliminado.");
    } else {
        println!("No existe ese grupo.");
    }
    Ok(())
}

pub fn add_category(ctx: &Context, group: &str, category: &str) -> Result<()> {
    let mut master = ctx.master.load();
    master.add_category(group, category);
    ctx.master.save(&master)?;
    Ok(())
}

pub fn remove_category(ctx: &Context, group: &str, category: &str) -> Result<()> {
    let mut master = ctx.master.load();
    if master.remove_category(group, category) {
        ctx.master.save(&master)?;
        println!("Categoría eliminada.");
    } else {
        println!("No existe esa categoría.");
    }
    Ok(())
}
