use crate::error::StatementsError;

pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 2100;

/// Validate a year bound: must be within 1900..=2100.
pub fn validate_year(name: &str, year: i32) -> Result<i32, StatementsError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(StatementsError::InvalidInput(format!(
            "{} must be between {} and {}, got {}",
            name, MIN_YEAR, MAX_YEAR, year
        )));
    }
    Ok(year)
}

/// Validate a revenue bound: must be a finite number >= 0.
pub fn validate_non_negative(name: &str, value: f64) -> Result<f64, StatementsError> {
    let value = validate_finite(name, value)?;
    if value < 0.0 {
        return Err(StatementsError::InvalidInput(format!(
            "{} must be >= 0, got {}",
            name, value
        )));
    }
    Ok(value)
}

/// Validate a net income bound: any sign, but not NaN or infinite.
pub fn validate_finite(name: &str, value: f64) -> Result<f64, StatementsError> {
    if !value.is_finite() {
        return Err(StatementsError::InvalidInput(format!(
            "{} must be a finite number",
            name
        )));
    }
    Ok(value)
}
