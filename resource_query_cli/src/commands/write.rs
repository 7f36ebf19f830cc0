use anyhow::{Context, Result};
use clap::Args;
use resource_query::{Client, Endpoint, QueryBuilder};
use serde_json::Value;

use super::{describe, resolve_url, QueryArgs};
use crate::output::{print_json, print_records, OutputFormat};

#[derive(Args)]
pub struct UpdateArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Attributes to apply, as a JSON object
    #[arg(long)]
    pub data: String,
}

/// Insert sends no query string, so it takes no filter, ordering or paging flags.
#[derive(Args)]
pub struct InsertArgs {
    /// Resource URL. Falls back to RESOURCE_QUERY_BASE_URL
    #[arg(long)]
    pub url: Option<String>,

    /// Attributes of the new record, as a JSON object
    #[arg(long)]
    pub data: String,
}

impl InsertArgs {
    fn builder(&self, client: &Client) -> Result<QueryBuilder<Endpoint<Value>>> {
        let endpoint = Endpoint::new(&resolve_url(self.url.as_deref())?);
        Ok(QueryBuilder::with_client(endpoint, client.clone()))
    }
}

fn parse_attributes(data: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(data).context("--data must be valid JSON")?;
    if !value.is_object() {
        anyhow::bail!("--data must be a JSON object");
    }
    Ok(value)
}

pub async fn update(args: &UpdateArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let attributes = parse_attributes(&args.data)?;
    let query = args.query.build(client)?;
    let fetched = query.update(attributes).await.map_err(describe)?;

    match format {
        OutputFormat::Json => print_json(&fetched.payload),
        _ => {
            let records: Vec<_> = fetched
                .collection
                .iter()
                .map(|record| record.attributes().clone())
                .collect();
            print_records(&records, format);
            eprintln!("{} record(s) updated", records.len());
        }
    }
    Ok(())
}

pub async fn insert(args: &InsertArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let attributes = parse_attributes(&args.data)?;
    let query = args.builder(client)?;
    let model = query.insert(attributes).await.map_err(describe)?;

    match format {
        OutputFormat::Json => print_json(model.attributes()),
        _ => print_records(std::slice::from_ref(model.attributes()), format),
    }
    Ok(())
}

pub async fn delete(args: &QueryArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let query = args.build(client)?;
    let deleted = query.delete_results().await.map_err(describe)?;

    let records: Vec<_> = deleted
        .iter()
        .map(|record| record.attributes().clone())
        .collect();
    match format {
        OutputFormat::Json => print_json(&records),
        _ => {
            print_records(&records, format);
            eprintln!("{} record(s) deleted", records.len());
        }
    }
    Ok(())
}
