//! Network operations issued from a [`QueryBuilder`].
//!
//! Each operation snapshots the builder when called and returns a future that
//! owns the snapshot, so the builder can keep being mutated (or issue more
//! requests) while earlier ones are in flight. Responses are dispatched on
//! status code: 200 succeeds, 422 and 500 are rejections carrying the
//! decoded body, and 403 is a distinct failure for deletes only.

use std::future::Future;

use reqwest::Method;
use serde_json::Value;

use super::builder::QueryBuilder;
use crate::client::{truncate_body, RawResponse};
use crate::resource::{Collection, Resource};
use crate::types::Fetched;
use crate::Error;

impl<R: Resource> QueryBuilder<R> {
    /// Fetches the records matching this query.
    ///
    /// `GET <resource><query string>`
    pub fn get(&self) -> impl Future<Output = Result<Fetched<R::Collection>, Error>> {
        let snapshot = self.clone();
        let url = self.url();
        async move {
            let response = snapshot.client.send(Method::GET, &url, None).await?;
            match response.status {
                200 => {
                    let payload = response.json()?;
                    let collection = snapshot.into_collection(&payload)?;
                    Ok(Fetched {
                        collection,
                        payload,
                    })
                }
                422 | 500 => Err(rejected(&url, response)),
                _ => Err(unexpected(&url, response)),
            }
        }
    }

    /// Applies `attributes` to every record matching this query and returns
    /// the updated records.
    ///
    /// `POST <resource>/update<query string>`
    pub fn update(
        &self,
        attributes: Value,
    ) -> impl Future<Output = Result<Fetched<R::Collection>, Error>> {
        let snapshot = self.clone();
        let url = self.action_url("update", true);
        async move {
            let response = snapshot
                .client
                .send(Method::POST, &url, Some(&attributes))
                .await?;
            match response.status {
                200 => {
                    let payload = response.json()?;
                    let collection = snapshot.into_collection(&payload)?;
                    Ok(Fetched {
                        collection,
                        payload,
                    })
                }
                422 | 500 => Err(rejected(&url, response)),
                _ => Err(unexpected(&url, response)),
            }
        }
    }

    /// Stores a new record and returns it as a persisted model. Constraints
    /// and parameters are not sent.
    ///
    /// `POST <resource>/store`
    pub fn insert(&self, attributes: Value) -> impl Future<Output = Result<R::Model, Error>> {
        let resource = self.resource.clone();
        let client = self.client.clone();
        let url = self.action_url("store", false);
        async move {
            let response = client.send(Method::POST, &url, Some(&attributes)).await?;
            match response.status {
                200 => {
                    let payload = response.json()?;
                    let record = match payload {
                        Value::Object(mut map)
                            if matches!(map.get("data"), Some(Value::Object(_))) =>
                        {
                            map.remove("data").unwrap_or_default()
                        }
                        other => other,
                    };
                    resource.make_model(record)
                }
                422 | 500 => Err(rejected(&url, response)),
                _ => Err(unexpected(&url, response)),
            }
        }
    }

    /// Deletes every record matching this query and returns the deleted records.
    ///
    /// `POST <resource>/delete<query string>`
    pub fn delete_results(&self) -> impl Future<Output = Result<R::Collection, Error>> {
        let snapshot = self.clone();
        let url = self.action_url("delete", true);
        async move {
            let response = snapshot.client.send(Method::POST, &url, None).await?;
            match response.status {
                200 => {
                    let payload = response.json()?;
                    snapshot.into_collection(&payload)
                }
                403 => {
                    tracing::warn!("POST {} forbidden", url);
                    Err(Error::Forbidden)
                }
                422 | 500 => Err(rejected(&url, response)),
                _ => Err(unexpected(&url, response)),
            }
        }
    }

    fn action_url(&self, action: &str, with_query: bool) -> String {
        let base = self.resource.resource_url();
        let mut url = format!("{}/{}", base.trim_end_matches('/'), action);
        if with_query {
            url.push_str(&self.to_query_string());
        }
        url
    }

    /// Wraps `payload.data` into models and binds the collection to this query.
    fn into_collection(self, payload: &Value) -> Result<R::Collection, Error> {
        let records = payload
            .get("data")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                tracing::error!("Response payload has no `data` array");
                Error::Decode("missing `data` array".to_string())
            })?;
        let models = records
            .iter()
            .cloned()
            .map(|record| self.resource.make_model(record))
            .collect::<Result<Vec<_>, _>>()?;
        let mut collection = self.resource.make_collection(models);
        collection.set_query(self);
        Ok(collection)
    }
}

fn rejected(url: &str, response: RawResponse) -> Error {
    tracing::warn!(
        "Request to {} rejected with status {}: {}",
        url,
        response.status,
        truncate_body(&response.body)
    );
    Error::Rejected {
        status: response.status,
        body: response.json_lossy(),
    }
}

fn unexpected(url: &str, response: RawResponse) -> Error {
    let snippet = truncate_body(&response.body);
    tracing::warn!(
        "Request to {} failed with status {}: {}",
        url,
        response.status,
        snippet
    );
    Error::UnexpectedStatus {
        status: response.status,
        body: snippet,
    }
}
