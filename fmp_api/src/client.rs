//! HTTP client for the Financial Modeling Prep API.

use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::{
    query::{IncomeStatementQuery, Query},
    Error,
};

/// HTTP client for the Financial Modeling Prep API.
///
/// Every request carries the API key as the `apikey` query parameter. No
/// timeout or retry policy is applied here; callers decide how long to wait.
pub struct Client {
    http: reqwest::Client,
    /// Base URL for the API. Defaults to `https://financialmodelingprep.com`.
    base_api_url: String,
    api_key: String,
}

impl Client {
    /// Creates a new client pointing at the production API.
    pub fn new(api_key: &str) -> Self {
        Self::with_base_url("https://financialmodelingprep.com", api_key)
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str, api_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_api_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn get_url(&self, path: &str, query: Option<&impl Query>) -> Result<Url, Error> {
        let url = Url::parse(format!("{}{}", &self.base_api_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::RequestFailed(format!("invalid URL: {}", e))
        })?;
        let mut url = match query {
            Some(query) => query.add_to_url(&url),
            None => url,
        };
        url.query_pairs_mut().append_pair("apikey", &self.api_key);
        Ok(url)
    }

    async fn get<T, Q>(&self, path: &str, query: Option<&Q>) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        let url = self.get_url(path, query)?;
        // reqwest errors embed the URL, which carries the API key.
        let resp = self
            .http
            .get(url)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                tracing::error!("Failed to get resource {}: {}", path, e);
                Error::RequestFailed(e.to_string())
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            let e = e.without_url();
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed(e.to_string())
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        let parsed = serde_json::from_str::<T>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::InvalidJson(e.to_string())
        })?;

        Ok(parsed)
    }

    /// Fetches the income statements of `symbol` as loosely-typed records.
    ///
    /// The elements are returned untouched so that callers can decide how to
    /// treat individual malformed records. A top-level value that is not an
    /// array fails with [`Error::UnexpectedShape`].
    pub async fn get_income_statements(
        &self,
        symbol: &str,
        query: &IncomeStatementQuery,
    ) -> Result<Vec<Value>, Error> {
        let value = self
            .get::<Value, IncomeStatementQuery>(
                format!("/api/v3/income-statement/{}", symbol).as_str(),
                Some(query),
            )
            .await?;

        match value {
            Value::Array(items) => Ok(items),
            other => {
                let body = truncate_body(&other.to_string());
                tracing::error!("Expected a list of statements, got: {}", body);
                Err(Error::UnexpectedShape {
                    found: json_kind(&other).to_string(),
                    body,
                })
            }
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
