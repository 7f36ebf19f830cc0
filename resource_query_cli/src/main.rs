mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use resource_query::Client;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "rquery")]
#[command(about = "Build filtered, paginated queries and run them against a JSON resource API")]
struct Cli {
    /// Output format: table, json or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the URL a query would request
    Url(commands::QueryArgs),
    /// Fetch the records matching a query
    Get(commands::QueryArgs),
    /// Apply attributes to the records matching a query
    Update(commands::write::UpdateArgs),
    /// Store a new record
    Insert(commands::write::InsertArgs),
    /// Delete the records matching a query
    Delete(commands::QueryArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("resource_query=info".parse()?),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        "markdown" | "md" => OutputFormat::Markdown,
        _ => OutputFormat::Table,
    };

    let client = Client::new();

    match &cli.command {
        Commands::Url(args) => commands::url::run(args, &client, &format)?,
        Commands::Get(args) => commands::read::get(args, &client, &format).await?,
        Commands::Update(args) => commands::write::update(args, &client, &format).await?,
        Commands::Insert(args) => commands::write::insert(args, &client, &format).await?,
        Commands::Delete(args) => commands::write::delete(args, &client, &format).await?,
    }

    Ok(())
}
