use url::Url;

use super::{common::QueryCommon, Query};

/// Query for the `/api/v3/income-statement/{symbol}` endpoint.
#[derive(Clone, Copy, Debug, Default)]
pub struct IncomeStatementQuery {
    pub common: QueryCommon,
}

impl Query for IncomeStatementQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        self.common.add_to_url(url)
    }
}
