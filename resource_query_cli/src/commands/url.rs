use anyhow::Result;
use resource_query::Client;
use serde_json::json;

use super::QueryArgs;
use crate::output::{print_json, OutputFormat};

pub fn run(args: &QueryArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let query = args.build(client)?;
    match format {
        OutputFormat::Json => print_json(&json!({
            "url": query.url(),
            "query": query.to_query_string(),
        })),
        OutputFormat::Table | OutputFormat::Markdown => println!("{}", query.url()),
    }
    Ok(())
}
