//! The typed income statement and its conversion from raw provider records.

use chrono::{Datelike, NaiveDate};
use fmp_api::types::RawStatementItem;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single annual income statement as returned to callers.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct IncomeStatement {
    /// Fiscal period end date.
    pub date: NaiveDate,
    pub revenue: f64,
    /// Negative for a loss.
    pub net_income: f64,
    pub gross_profit: f64,
    pub eps: f64,
    pub operating_income: f64,
}

/// Why a raw record could not become an [`IncomeStatement`].
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ParseError {
    #[error("record is not a well-formed statement object: {0}")]
    Malformed(String),
    #[error("record has no date")]
    MissingDate,
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("record has no {0}")]
    MissingField(&'static str),
}

impl IncomeStatement {
    /// Calendar year of the statement date.
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Converts one element of the provider response.
    ///
    /// `revenue` and `netIncome` are required; `grossProfit`, `eps` and
    /// `operatingIncome` default to 0 when absent or null.
    pub fn from_value(value: &Value) -> Result<Self, ParseError> {
        if !value.is_object() {
            return Err(ParseError::Malformed(format!("expected an object, got {}", value)));
        }
        let raw = RawStatementItem::deserialize(value)
            .map_err(|e| ParseError::Malformed(e.to_string()))?;
        Self::from_raw(&raw)
    }

    /// Converts an already deserialized raw record.
    pub fn from_raw(raw: &RawStatementItem) -> Result<Self, ParseError> {
        let date = match raw.date.as_deref() {
            None | Some("") => return Err(ParseError::MissingDate),
            Some(date) => parse_date(date)?,
        };
        let revenue = raw.revenue.ok_or(ParseError::MissingField("revenue"))?;
        let net_income = raw.net_income.ok_or(ParseError::MissingField("net_income"))?;

        Ok(Self {
            date,
            revenue,
            net_income,
            gross_profit: raw.gross_profit.unwrap_or(0.0),
            eps: raw.eps.unwrap_or(0.0),
            operating_income: raw.operating_income.unwrap_or(0.0),
        })
    }
}

fn parse_date(input: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| ParseError::InvalidDate(input.to_string()))
}
