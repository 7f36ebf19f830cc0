//! CLI subcommand implementations.

pub mod read;
pub mod url;
pub mod write;

use anyhow::{anyhow, bail, Result};
use clap::Args;
use resource_query::{Client, Endpoint, Ordering, QueryBuilder};
use serde_json::Value;

/// Environment variable consulted when `--url` is not given.
pub const BASE_URL_VAR: &str = "RESOURCE_QUERY_BASE_URL";

/// Flags shared by every subcommand that builds a query.
#[derive(Args)]
pub struct QueryArgs {
    /// Resource URL. Falls back to RESOURCE_QUERY_BASE_URL
    #[arg(long)]
    pub url: Option<String>,

    /// Filter as name=value; values that parse as JSON are sent as such (repeatable)
    #[arg(long = "where", value_name = "NAME=VALUE")]
    pub filters: Vec<String>,

    /// Ordering as attribute or attribute:asc / attribute:desc (repeatable, in priority order)
    #[arg(long = "order", value_name = "ATTR[:DIR]")]
    pub orders: Vec<String>,

    /// Results per page
    #[arg(long, value_parser = clap::value_parser!(i64).range(1..))]
    pub limit: Option<i64>,

    /// Page number
    #[arg(long)]
    pub page: Option<i64>,

    /// Extra query parameter as name=value; repeating a name builds a list (repeatable)
    #[arg(long = "param", value_name = "NAME=VALUE")]
    pub params: Vec<String>,
}

/// Returns `url`, or RESOURCE_QUERY_BASE_URL when it is not given.
pub fn resolve_url(url: Option<&str>) -> Result<String> {
    url.map(str::to_string)
        .or_else(|| std::env::var(BASE_URL_VAR).ok())
        .filter(|url| !url.is_empty())
        .ok_or_else(|| anyhow!("No resource URL: pass --url or set {}", BASE_URL_VAR))
}

impl QueryArgs {
    pub fn resource_url(&self) -> Result<String> {
        resolve_url(self.url.as_deref())
    }

    /// Builds the query described by the flags.
    pub fn build(&self, client: &Client) -> Result<QueryBuilder<Endpoint<Value>>> {
        let endpoint = Endpoint::new(&self.resource_url()?);
        let mut query = QueryBuilder::with_client(endpoint, client.clone());

        for filter in &self.filters {
            let (name, value) = parse_pair(filter)?;
            query.where_(&name, value);
        }

        if !self.orders.is_empty() {
            let orderings = self
                .orders
                .iter()
                .map(|o| {
                    o.parse::<Ordering>()
                        .map_err(|_| anyhow!("Invalid ordering '{}'. Use attribute[:asc|desc]", o))
                })
                .collect::<Result<Vec<_>>>()?;
            query.order_by(orderings);
        }

        if let Some(limit) = self.limit {
            query.set_limit(limit);
        }
        if let Some(page) = self.page {
            query.set_page(page);
        }

        for (name, value) in group_params(&self.params)? {
            query.append(&name, value)?;
        }

        Ok(query)
    }
}

/// Splits `name=value`, parsing the value as JSON when possible.
pub fn parse_pair(input: &str) -> Result<(String, Value)> {
    let Some((name, raw)) = input.split_once('=') else {
        bail!("Expected NAME=VALUE, got '{}'", input);
    };
    let name = name.trim();
    if name.is_empty() {
        bail!("Missing name in '{}'", input);
    }
    Ok((name.to_string(), parse_value(raw)))
}

/// JSON literals (`15`, `true`, `[1,2]`, `{"a":1}`) keep their type; anything else is a string.
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Groups repeated `--param` names into lists, keeping first-seen order.
fn group_params(params: &[String]) -> Result<Vec<(String, Value)>> {
    let mut grouped: Vec<(String, Vec<Value>)> = Vec::new();
    for param in params {
        let (name, value) = parse_pair(param)?;
        match grouped.iter_mut().find(|(n, _)| *n == name) {
            Some((_, values)) => values.push(value),
            None => grouped.push((name, vec![value])),
        }
    }
    Ok(grouped
        .into_iter()
        .map(|(name, mut values)| {
            let value = if values.len() == 1 {
                values.remove(0)
            } else {
                Value::Array(values)
            };
            (name, value)
        })
        .collect())
}

/// Turns a library error into a message that includes any rejection body.
pub fn describe(err: resource_query::Error) -> anyhow::Error {
    match &err {
        resource_query::Error::Rejected { body, .. } => anyhow!("{}: {}", err, body),
        resource_query::Error::UnexpectedStatus { body, .. } if !body.is_empty() => {
            anyhow!("{}: {}", err, body)
        }
        _ => err.into(),
    }
}
