use anyhow::Result;
use resource_query::Client;

use super::{describe, QueryArgs};
use crate::output::{print_json, print_records, OutputFormat};

pub async fn get(args: &QueryArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let query = args.build(client)?;
    tracing::debug!("Fetching {}", query.url());
    let fetched = query.get().await.map_err(describe)?;

    match format {
        OutputFormat::Json => print_json(&fetched.payload),
        _ => {
            let records: Vec<_> = fetched
                .collection
                .iter()
                .map(|record| record.attributes().clone())
                .collect();
            print_records(&records, format);
            eprintln!(
                "{} record(s), page {} (limit {})",
                records.len(),
                query.current_page(),
                query.limit()
            );
        }
    }
    Ok(())
}
