mod common;
pub use self::common::{Period, Query};

mod income_statement;
pub use self::income_statement::IncomeStatementQuery;
