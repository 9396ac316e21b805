use std::path::PathBuf;

use clap::{Parser, Subcommand};
use uuid::Uuid;

use commands::{
    Context,
    export::ExportFormat,
    item::{ItemAdd, ItemUpdate},
};

mod client;
mod commands;
mod config;
mod data;
mod error;
mod lookup;

#[derive(Debug, Parser)]
#[command(name = "presu_cli", disable_version_flag = true)]
struct Cli {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    config: Option<String>,
    /// Override base URL (e.g. http://127.0.0.1:3000).
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// Override username (password is never read from CLI).
    #[arg(long, global = true)]
    username: Option<String>,
    /// Override the data directory holding the local slots.
    #[arg(long, global = true)]
    data_dir: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List finalized budgets.
    List,
    /// Show a budget; without an id, the working draft.
    Show { id: Option<Uuid> },
    /// Save the working draft as a finalized budget.
    Save,
    /// Delete a finalized budget.
    Delete {
        id: Uuid,
        #[arg(long)]
        yes: bool,
    },
    /// Discard the working draft.
    Discard {
        #[arg(long)]
        yes: bool,
    },
    /// Set a draft field (number, date, tax_rate, notes, status,
    /// signature, client.*).
    Set { field: String, value: String },
    /// Manage the draft's line items.
    Item {
        #[command(subcommand)]
        command: ItemCommand,
    },
    /// Import a budget JSON file into the working draft.
    Import { path: PathBuf },
    /// Export a budget; without an id, the working draft.
    Export {
        id: Option<Uuid>,
        #[arg(long, value_enum, default_value_t)]
        format: ExportFormat,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Company configuration.
    Company {
        #[command(subcommand)]
        command: CompanyCommand,
    },
    /// Trade groups and categories.
    Groups {
        #[command(subcommand)]
        command: GroupsCommand,
    },
}

#[derive(Debug, Subcommand)]
enum ItemCommand {
    /// Add a line item to the draft.
    Add(ItemAdd),
    /// Update fields of one line item.
    Update(ItemUpdate),
    /// Remove one line item.
    Remove { id: Uuid },
}

#[derive(Debug, Subcommand)]
enum CompanyCommand {
    Show,
    /// Set a company field (name, address, phone, email, tax_id,
    /// default_notes, payment_terms).
    Set { field: String, value: String },
    /// Store an image file as the company logo.
    Logo { path: PathBuf },
    /// Store an image file as the company seal.
    Seal { path: PathBuf },
}

#[derive(Debug, Subcommand)]
enum GroupsCommand {
    List,
    Add { name: String },
    Remove { name: String },
    AddCategory { group: String, category: String },
    RemoveCategory { group: String, category: String },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "presu_cli=info,engine=warn".into()),
        )
        .init();

    if let Err(err) = run().await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

async fn run() -> error::Result<()> {
    let cli = Cli::parse();

    let settings = config::load(
        cli.config.as_deref(),
        config::Overrides {
            base_url: cli.base_url,
            username: cli.username,
            data_dir: cli.data_dir,
        },
    )?;
    let ctx = Context::from_config(&settings)?;

    match cli.command {
        Command::List => commands::budget::list(&ctx).await,
        Command::Show { id } => commands::budget::show(&ctx, id).await,
        Command::Save => commands::budget::save(&ctx).await,
        Command::Delete { id, yes } => commands::budget::delete(&ctx, id, yes).await,
        Command::Discard { yes } => commands::budget::discard(&ctx, yes),
        Command::Set { field, value } => commands::budget::set_field(&ctx, &field, value).await,
        Command::Item { command } => match command {
            ItemCommand::Add(args) => commands::item::add(&ctx, args),
            ItemCommand::Update(args) => commands::item::update(&ctx, args),
            ItemCommand::Remove { id } => commands::item::remove(&ctx, id),
        },
        Command::Import { path } => commands::export::import(&ctx, &path),
        Command::Export { id, format, output } => {
            commands::export::export(&ctx, id, format, output).await
        }
        Command::Company { command } => match command {
            CompanyCommand::Show => commands::company::show(&ctx),
            CompanyCommand::Set { field, value } => commands::company::set(&ctx, &field, value),
            CompanyCommand::Logo { path } => commands::company::logo(&ctx, &path),
            CompanyCommand::Seal { path } => commands::company::seal(&ctx, &path),
        },
        Command::Groups { command } => match command {
            GroupsCommand::List => commands::groups::list(&ctx),
            GroupsCommand::Add { name } => commands::groups::add(&ctx, &name),
            GroupsCommand::Remove { name } => commands::groups::remove(&ctx, &name),
            GroupsCommand::AddCategory { group, category } => {
                commands::groups::add_category(&ctx, &group, &category)
            }
            GroupsCommand::RemoveCategory { group, category } => {
                commands::groups::remove_category(&ctx, &group, &category)
            }
        },
    }
}
