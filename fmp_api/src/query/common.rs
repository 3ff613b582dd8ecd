//! Shared query infrastructure: the [`Query`] trait, [`QueryCommon`] fields, and [`Period`].

use url::Url;

/// Trait implemented by statement query builders.
pub trait Query {
    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url;
}

/// Reporting period of the requested statements. Only fiscal-year
/// statements are served.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Period {
    #[default]
    Annual,
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Period::Annual => "annual",
            }
        )
    }
}

/// Fields shared by all statement queries.
#[derive(Clone, Copy, Debug, Default)]
pub struct QueryCommon {
    pub period: Period,
}

impl QueryCommon {
    /// Appends the period parameter to the URL.
    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("period", &self.period.to_string());
        url
    }
}
