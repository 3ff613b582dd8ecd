//! Range filters and sort options for statement queries.

use std::cmp::Ordering;

use serde::Deserialize;

use crate::error::StatementsError;
use crate::statement::IncomeStatement;
use crate::validation;

/// Optional inclusive range filters. All supplied bounds must hold.
///
/// A bound equal to zero counts as not supplied, so `min_revenue=0` or
/// `max_net_income=0` leave the result unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StatementFilters {
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub min_revenue: Option<f64>,
    pub max_revenue: Option<f64>,
    pub min_net_income: Option<f64>,
    pub max_net_income: Option<f64>,
}

impl StatementFilters {
    pub fn with_start_year(mut self, year: i32) -> Self {
        self.start_year = Some(year);
        self
    }

    pub fn with_end_year(mut self, year: i32) -> Self {
        self.end_year = Some(year);
        self
    }

    pub fn with_min_revenue(mut self, revenue: f64) -> Self {
        self.min_revenue = Some(revenue);
        self
    }

    pub fn with_max_revenue(mut self, revenue: f64) -> Self {
        self.max_revenue = Some(revenue);
        self
    }

    pub fn with_min_net_income(mut self, net_income: f64) -> Self {
        self.min_net_income = Some(net_income);
        self
    }

    pub fn with_max_net_income(mut self, net_income: f64) -> Self {
        self.max_net_income = Some(net_income);
        self
    }

    /// Checks every supplied bound. Inverted ranges are allowed and simply
    /// match nothing.
    pub fn validate(&self) -> Result<(), StatementsError> {
        if let Some(year) = self.start_year {
            validation::validate_year("start_year", year)?;
        }
        if let Some(year) = self.end_year {
            validation::validate_year("end_year", year)?;
        }
        if let Some(revenue) = self.min_revenue {
            validation::validate_non_negative("min_revenue", revenue)?;
        }
        if let Some(revenue) = self.max_revenue {
            validation::validate_non_negative("max_revenue", revenue)?;
        }
        if let Some(net_income) = self.min_net_income {
            validation::validate_finite("min_net_income", net_income)?;
        }
        if let Some(net_income) = self.max_net_income {
            validation::validate_finite("max_net_income", net_income)?;
        }
        Ok(())
    }

    pub fn matches_year(&self, year: i32) -> bool {
        within(year, supplied(self.start_year), supplied(self.end_year))
    }

    pub fn matches_revenue(&self, revenue: f64) -> bool {
        within(revenue, supplied(self.min_revenue), supplied(self.max_revenue))
    }

    pub fn matches_net_income(&self, net_income: f64) -> bool {
        within(
            net_income,
            supplied(self.min_net_income),
            supplied(self.max_net_income),
        )
    }

    /// Returns true when the statement satisfies every supplied bound.
    pub fn matches(&self, statement: &IncomeStatement) -> bool {
        self.matches_year(statement.year())
            && self.matches_revenue(statement.revenue)
            && self.matches_net_income(statement.net_income)
    }
}

/// Zero is indistinguishable from an omitted bound.
fn supplied<T: Default + PartialEq>(bound: Option<T>) -> Option<T> {
    bound.filter(|value| *value != T::default())
}

fn within<T: PartialOrd>(value: T, min: Option<T>, max: Option<T>) -> bool {
    if let Some(min) = min {
        if value < min {
            return false;
        }
    }
    if let Some(max) = max {
        if value > max {
            return false;
        }
    }
    true
}

/// Field statements are ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    Date,
    Revenue,
    NetIncome,
}

impl std::fmt::Display for SortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                SortField::Date => "date",
                SortField::Revenue => "revenue",
                SortField::NetIncome => "net_income",
            }
        )
    }
}

/// Sort order. Descending (newest/largest first) is the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                SortOrder::Asc => "asc",
                SortOrder::Desc => "desc",
            }
        )
    }
}

/// Sort field and direction. Defaults to date, descending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatementSort {
    pub sort_by: SortField,
    pub order: SortOrder,
}

impl StatementSort {
    pub fn new(sort_by: SortField, order: SortOrder) -> Self {
        Self { sort_by, order }
    }

    fn compare(&self, a: &IncomeStatement, b: &IncomeStatement) -> Ordering {
        let ordering = match self.sort_by {
            SortField::Date => a.date.cmp(&b.date),
            SortField::Revenue => compare_amounts(a.revenue, b.revenue),
            SortField::NetIncome => compare_amounts(a.net_income, b.net_income),
        };
        match self.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }

    /// Sorts in place. The sort is stable in both directions: statements with
    /// equal keys keep their upstream order.
    pub fn apply(&self, statements: &mut [IncomeStatement]) {
        statements.sort_by(|a, b| self.compare(a, b));
    }
}

/// `-0.0` and `0.0` are the same amount. NaN cannot come out of JSON.
fn compare_amounts(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}
