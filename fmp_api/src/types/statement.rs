//! Raw income statement records as returned by the provider.

use serde::Deserialize;

/// One element of the `/income-statement` response array.
///
/// The provider sends dozens of fields per record; only the ones the
/// service maps are kept, and every one of them is optional because the
/// payload is not guaranteed to be complete. Unknown fields are ignored.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawStatementItem {
    /// Fiscal period end date, `YYYY-MM-DD`.
    pub date: Option<String>,

    /// Total revenue.
    pub revenue: Option<f64>,

    /// Net income. Negative for a loss.
    pub net_income: Option<f64>,

    /// Revenue minus cost of revenue.
    pub gross_profit: Option<f64>,

    /// Earnings per share.
    pub eps: Option<f64>,

    /// Gross profit minus operating expenses.
    pub operating_income: Option<f64>,
}
