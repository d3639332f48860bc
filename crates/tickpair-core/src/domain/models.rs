use serde::{Deserialize, Serialize};
use time::Date;

use crate::ValidationError;

/// One trading day of provider data.
///
/// Every price field is optional: the provider reports gaps as nulls and the
/// row is kept so that forward-filling can repair it later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    pub date: Date,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub adj_close: Option<f64>,
    pub volume: Option<u64>,
}

impl DailyBar {
    pub fn new(
        date: Date,
        open: Option<f64>,
        high: Option<f64>,
        low: Option<f64>,
        close: Option<f64>,
        adj_close: Option<f64>,
        volume: Option<u64>,
    ) -> Result<Self, ValidationError> {
        validate_optional_finite("open", open)?;
        validate_optional_finite("high", high)?;
        validate_optional_finite("low", low)?;
        validate_optional_finite("close", close)?;
        validate_optional_finite("adj_close", adj_close)?;

        Ok(Self {
            date,
            open,
            high,
            low,
            close,
            adj_close,
            volume,
        })
    }

    /// Row holding only an adjusted close.
    pub fn adjusted(date: Date, adj_close: Option<f64>) -> Result<Self, ValidationError> {
        Self::new(date, None, None, None, None, adj_close, None)
    }
}

fn validate_optional_finite(
    field: &'static str,
    value: Option<f64>,
) -> Result<(), ValidationError> {
    if let Some(value) = value {
        if !value.is_finite() {
            return Err(ValidationError::NonFiniteValue { field });
        }
    }
    Ok(())
}
