//! The statement query pipeline: fetch, convert, filter, sort.

use fmp_api::{Client, IncomeStatementQuery};
use serde_json::Value;

use crate::error::StatementsError;
use crate::filter::{StatementFilters, StatementSort};
use crate::statement::IncomeStatement;

/// Ticker whose statements the service serves.
pub const SYMBOL: &str = "AAPL";

/// Settings the service is constructed with, sourced once at process start.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Provider API key.
    pub api_key: String,
    /// Provider base URL. `None` uses the production endpoint.
    pub base_url: Option<String>,
}

impl ServiceConfig {
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            base_url: None,
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = Some(base_url.to_string());
        self
    }
}

/// Serves annual income statements for [`SYMBOL`].
///
/// Holds no mutable state; every call performs exactly one upstream fetch.
pub struct StatementQueryService {
    client: Client,
}

impl StatementQueryService {
    pub fn new(config: &ServiceConfig) -> Self {
        let client = match &config.base_url {
            Some(base_url) => Client::with_base_url(base_url, &config.api_key),
            None => Client::new(&config.api_key),
        };
        Self { client }
    }

    /// Fetches the statements and returns those matching `filters`, ordered by `sort`.
    ///
    /// Fails only when the filters are invalid or the provider request fails;
    /// individual malformed records are dropped.
    pub async fn query(
        &self,
        filters: &StatementFilters,
        sort: &StatementSort,
    ) -> Result<Vec<IncomeStatement>, StatementsError> {
        filters.validate()?;

        let raw = self
            .client
            .get_income_statements(SYMBOL, &IncomeStatementQuery::default())
            .await?;

        let received = raw.len();
        let statements = select_statements(&raw, filters, sort);
        tracing::info!(
            received,
            returned = statements.len(),
            sort_by = %sort.sort_by,
            order = %sort.order,
            "Income statement query completed"
        );
        Ok(statements)
    }
}

/// Converts raw provider records, keeps those matching `filters`, and sorts them.
///
/// Records that cannot be converted are skipped and logged.
pub fn select_statements(
    raw: &[Value],
    filters: &StatementFilters,
    sort: &StatementSort,
) -> Vec<IncomeStatement> {
    let mut statements: Vec<IncomeStatement> = raw
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match IncomeStatement::from_value(item) {
            Ok(statement) => Some(statement),
            Err(e) => {
                tracing::debug!("Skipping statement record {}: {}", index, e);
                None
            }
        })
        .filter(|statement| filters.matches(statement))
        .collect();
    sort.apply(&mut statements);
    statements
}
